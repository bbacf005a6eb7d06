// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The delay and sound timers, which count down at 60Hz

/// Rate at which [Timers::tick] should be called, in Hz
pub const TIMER_HZ: u64 = 60;

/// Two independent 8-bit countdown timers
///
/// These are ticked by the host at a fixed 60Hz cadence, no matter how many
/// instructions run between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Timers {
    /// Delay timer (DT)
    pub delay: u8,
    /// Sound timer (ST). A tone plays while it's nonzero.
    pub sound: u8,
}

impl Timers {
    /// Counts both timers down by one, stopping at zero.
    ///
    /// Returns true only on the tick where the sound timer reaches zero.
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut timers = Timers { delay: 2, sound: 1 };
    /// assert!(timers.tick()); // sound ran out
    /// assert!(!timers.tick()); // and stays out
    /// assert_eq!(Timers { delay: 0, sound: 0 }, timers);
    /// ```
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);
        match self.sound {
            0 => false,
            sound => {
                self.sound = sound - 1;
                self.sound == 0
            }
        }
    }

    /// Returns true while a tone should be playing
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }
}
