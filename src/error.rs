// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for Chippy

use std::path::PathBuf;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Chippy.
///
/// Nothing inside [CPU::step](crate::cpu::CPU::step) produces one of these.
/// They come from loading a program, or from collaborators handing the
/// machine something it can't accept.
#[derive(Debug, Error)]
pub enum Error {
    /// Represents an unimplemented operation
    #[error("opcode {word:04x} not recognized")]
    UnimplementedInstruction {
        /// The offending word
        word: u16,
    },
    /// The program doesn't fit between the load address and the end of memory
    #[error("rom is {len} bytes, but only {max} bytes of program memory exist")]
    RomTooLarge {
        /// Length of the rejected program
        len: usize,
        /// Size of program memory
        max: usize,
    },
    /// The program file couldn't be read
    #[error("could not read rom {path:?}: {source}")]
    RomUnreadable {
        /// The path that was asked for
        path: PathBuf,
        /// Why it couldn't be read
        #[source]
        source: std::io::Error,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
