//! Selects a preset of [Quirks](super::Quirks) for the [super::CPU]

use crate::error::Error;
use std::str::FromStr;

/// Selects a preset of quirks for the interpreter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Documented behavior, as most modern ROMs expect
    #[default]
    Modern,
    /// Cosmac VIP interpreter behavior
    Cosmac,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modern" | "chip8" | "chip-8" => Ok(Mode::Modern),
            "cosmac" | "vip" | "cosmac-vip" => Ok(Mode::Cosmac),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
