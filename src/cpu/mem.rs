// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Every address is masked to 12 bits before use, so reads and writes past
//! `0xfff` wrap around to the start of memory instead of failing.

pub mod read;
pub use read::ReadWrite;

use crate::error::{Error, Result};
use std::{
    fmt::{Debug, Display, Formatter},
    ops::Range,
};

/// Size of the address space, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// Mask applied to every address
pub const ADDR_MASK: u16 = 0xfff;

/// The built-in 4x5 hex font, one glyph per 5 bytes
#[rustfmt::skip]
pub const FONT: [u8; 0x50] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM. Writes landing here are dropped.
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The fixed range of addresses this region occupies
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// assert_eq!(0x000..0x050, Charset.range());
    /// assert_eq!(0x200..0x1000, Program.range());
    /// ```
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => 0x000..0x050,
            Region::Program => 0x200..MEM_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
            }
        )
    }
}

/// 4KiB of flat, byte-addressed memory with the font preloaded
#[derive(Clone, PartialEq, Eq)]
pub struct Mem {
    memory: [u8; MEM_SIZE],
}

impl Mem {
    /// Constructs a new Mem, with the font loaded into [Region::Charset]
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mem = Mem::new();
    /// assert_eq!(0xf0, mem.read_byte(0x000));
    /// assert_eq!(0x00, mem.read_byte(0x200));
    /// ```
    pub fn new() -> Self {
        let mut memory = [0; MEM_SIZE];
        memory[Region::Charset.range()].copy_from_slice(&FONT);
        Mem { memory }
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Memory is never empty, but clippy wants this next to [Mem::len]
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Reads the byte at `addr & 0xfff`
    #[inline(always)]
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDR_MASK) as usize]
    }

    /// Writes `data` to `addr & 0xfff`, unless that lands in [Region::Charset]
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut mem = Mem::new();
    /// mem.write_byte(0x1234, 0xaa); // wraps to 0x234
    /// assert_eq!(0xaa, mem.read_byte(0x234));
    /// mem.write_byte(0x000, 0xaa); // font is read-only
    /// assert_eq!(0xf0, mem.read_byte(0x000));
    /// ```
    #[inline(always)]
    pub fn write_byte(&mut self, addr: u16, data: u8) {
        let addr = (addr & ADDR_MASK) as usize;
        if !Region::Charset.range().contains(&addr) {
            self.memory[addr] = data;
        }
    }

    /// Reads a big-endian word. The second byte's address wraps independently.
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut mem = Mem::new();
    /// mem.write_byte(0xfff, 0x12);
    /// // 0x000 holds the top row of the glyph `0`
    /// assert_eq!(0x12f0, mem.read_word(0xfff));
    /// ```
    #[inline(always)]
    pub fn read_word(&self, addr: u16) -> u16 {
        self.read(addr)
    }

    /// Writes a big-endian word
    #[inline(always)]
    pub fn write_word(&mut self, addr: u16, data: u16) {
        self.write(addr, data)
    }

    /// Gets a slice of a named [Region] of memory
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Fills [Region::Program] with zeroes
    pub fn clear_program(&mut self) -> &mut Self {
        self.memory[Region::Program.range()].fill(0);
        self
    }

    /// Loads a program into [Region::Program], replacing whatever was there
    ///
    /// Programs longer than the region are rejected with [Error::RomTooLarge],
    /// and memory is left untouched.
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::new();
    /// mem.load_program(b"\x00\xe0")?;
    /// assert_eq!(0x00e0, mem.read_word(0x200));
    /// assert!(mem.load_program(&[0; 0xe01]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_program(&mut self, rom: &[u8]) -> Result<&mut Self> {
        let range = Region::Program.range();
        if rom.len() > range.len() {
            return Err(Error::RomTooLarge {
                len: rom.len(),
                max: range.len(),
            });
        }
        self.clear_program();
        self.memory[range.start..range.start + rom.len()].copy_from_slice(rom);
        Ok(self)
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // 4KiB of bytes is not useful in a debug print
        f.debug_struct("Mem")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
