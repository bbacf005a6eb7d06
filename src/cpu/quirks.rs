//! Controls the [Quirks] behavior of the CPU on a granular level.

use super::Mode;

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `false` everywhere is the documented behavior. Each flag trades that for
/// something a subset of old ROMs relies on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quirks {
    /// Cosmac VIP: Shift ops in `8xy`(`6`, `E`) shift vY and store the result in vX
    pub shift_vy: bool,
    /// Cosmac VIP: Binary ops in `8xy`(`1`, `2`, `3`) set vF to 0
    pub vf_reset: bool,
    /// Cosmac VIP: DMA instructions `Fx55`/`Fx65` leave I at I + x + 1
    pub dma_inc: bool,
    /// Super Chip: Indexed jump `Bxnn` goes to `xnn` + v`x`, instead of `xnn` + v0
    pub jump_vx: bool,
}

impl From<Mode> for Quirks {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Modern => Quirks::default(),
            Mode::Cosmac => Quirks {
                shift_vy: true,
                vf_reset: true,
                dma_inc: true,
                jump_vx: false,
            },
        }
    }
}
