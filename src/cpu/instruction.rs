// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains the definition of a Chip-8 [Insn], and its decoder

pub mod disassembler;

use super::{Adr, Nib, Reg};
use std::fmt::Display;

/// Extracts the I nibble of an IXYN instruction
#[inline(always)]
fn i(ins: u16) -> Nib {
    (ins >> 12 & 0xf) as Nib
}
/// Extracts the X nibble of an IXYN instruction
#[inline(always)]
fn x(ins: u16) -> Reg {
    (ins >> 8 & 0xf) as Reg
}
/// Extracts the Y nibble of an IXYN instruction
#[inline(always)]
fn y(ins: u16) -> Reg {
    (ins >> 4 & 0xf) as Reg
}
/// Extracts the N nibble of an IXYN instruction
#[inline(always)]
fn n(ins: u16) -> Nib {
    (ins & 0xf) as Nib
}
/// Extracts the B byte of an IXBB instruction
#[inline(always)]
fn b(ins: u16) -> u8 {
    (ins & 0xff) as u8
}
/// Extracts the ADR trinibble of an IADR instruction
#[inline(always)]
fn a(ins: u16) -> Adr {
    ins & 0x0fff
}

#[allow(non_camel_case_types, non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A single decoded Chip-8 instruction
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    cls,
    /// | 00ee | Return from subroutine
    ret,
    /// | 1aaa | Jumps to an absolute address
    jmp { A: Adr },
    /// | 2aaa | Pushes pc onto the stack, then jumps to a
    call { A: Adr },
    /// | 3xbb | Skips next instruction if register X == b
    seb { B: u8, x: Reg },
    /// | 4xbb | Skips next instruction if register X != b
    sneb { B: u8, x: Reg },
    /// | 5xy_ | Skip next instruction if vX == vY
    se { y: Reg, x: Reg },
    /// | 6xbb | Loads immediate byte b into register vX
    movb { B: u8, x: Reg },
    /// | 7xbb | Adds immediate byte b to register vX
    addb { B: u8, x: Reg },
    /// | 8xy0 | Loads the value of y into x
    mov { y: Reg, x: Reg },
    /// | 8xy1 | Performs bitwise or of vX and vY, and stores the result in vX
    or { y: Reg, x: Reg },
    /// | 8xy2 | Performs bitwise and of vX and vY, and stores the result in vX
    and { y: Reg, x: Reg },
    /// | 8xy3 | Performs bitwise xor of vX and vY, and stores the result in vX
    xor { y: Reg, x: Reg },
    /// | 8xy4 | Performs addition of vX and vY, and stores the result in vX
    add { y: Reg, x: Reg },
    /// | 8xy5 | Performs subtraction of vX and vY, and stores the result in vX
    sub { y: Reg, x: Reg },
    /// | 8xy6 | Performs bitwise right shift of vX (or vY)
    shr { y: Reg, x: Reg },
    /// | 8xy7 | Performs subtraction of vY and vX, and stores the result in vX
    bsub { y: Reg, x: Reg },
    /// | 8xyE | Performs bitwise left shift of vX (or vY)
    shl { y: Reg, x: Reg },
    /// | 9xy_ | Skip next instruction if vX != vY
    sne { y: Reg, x: Reg },
    /// | Aaaa | Load address #a into register I
    movI { A: Adr },
    /// | Baaa | Jump to &adr + v0
    jmpr { A: Adr },
    /// | Cxbb | Stores a random number & the provided byte into vX
    rand { B: u8, x: Reg },
    /// | Dxyn | Draws n-byte sprite to the screen at coordinates (vX, vY)
    draw { y: Reg, x: Reg, n: Nib },
    /// | eX9e | Skip next instruction if key == vX
    sek { x: Reg },
    /// | eXa1 | Skip next instruction if key != vX
    snek { x: Reg },
    /// | fX07 | Set vX to value in delay timer
    getdt { x: Reg },
    /// | fX0a | Wait for input, store key in vX
    waitk { x: Reg },
    /// | fX15 | Set delay timer to the value in vX
    setdt { x: Reg },
    /// | fX18 | Set sound timer to the value in vX
    setst { x: Reg },
    /// | fX1e | Add vX to I
    addI { x: Reg },
    /// | fX29 | Load sprite for character x into I
    font { x: Reg },
    /// | fX33 | BCD convert X into I[0..3]
    bcd { x: Reg },
    /// | fX55 | DMA Stor from I to registers 0..=X
    dmao { x: Reg },
    /// | fX65 | DMA Load from I to registers 0..=X
    dmai { x: Reg },
    /// | ???? | Anything else. Executes as a no-op.
    inval { word: u16 },
}

impl Insn {
    /// Decodes a single instruction word
    ///
    /// Every word decodes to something: words which aren't instructions
    /// become [Insn::inval].
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// assert_eq!(Insn::cls, Insn::decode(0x00e0));
    /// assert_eq!(Insn::add { y: 0x2, x: 0x1 }, Insn::decode(0x8124));
    /// assert_eq!(Insn::inval { word: 0x0123 }, Insn::decode(0x0123));
    /// ```
    #[rustfmt::skip]
    pub fn decode(word: u16) -> Insn {
        let (x, y, n, b, a) = (x(word), y(word), n(word), b(word), a(word));
        match i(word) {
            // |opcode| effect                             |
            // |------|------------------------------------|
            // | 00e0 | Clear screen memory to all 0       |
            // | 00ee | Return from subroutine             |
            0x0 => match word {
                0x00e0 => Insn::cls,
                0x00ee => Insn::ret,
                _ => Insn::inval { word },
            },
            0x1 => Insn::jmp   { A: a },
            0x2 => Insn::call  { A: a },
            0x3 => Insn::seb   { B: b, x },
            0x4 => Insn::sneb  { B: b, x },
            // The low nibble of 5xy_ is ignored
            0x5 => Insn::se    { y, x },
            0x6 => Insn::movb  { B: b, x },
            0x7 => Insn::addb  { B: b, x },
            // # Performs ALU operation
            0x8 => match n {
                0x0 => Insn::mov  { y, x },
                0x1 => Insn::or   { y, x },
                0x2 => Insn::and  { y, x },
                0x3 => Insn::xor  { y, x },
                0x4 => Insn::add  { y, x },
                0x5 => Insn::sub  { y, x },
                0x6 => Insn::shr  { y, x },
                0x7 => Insn::bsub { y, x },
                0xe => Insn::shl  { y, x },
                _ => Insn::inval { word },
            },
            // The low nibble of 9xy_ is ignored
            0x9 => Insn::sne   { y, x },
            0xa => Insn::movI  { A: a },
            0xb => Insn::jmpr  { A: a },
            0xc => Insn::rand  { B: b, x },
            0xd => Insn::draw  { y, x, n },
            0xe => match b {
                0x9e => Insn::sek  { x },
                0xa1 => Insn::snek { x },
                _ => Insn::inval { word },
            },
            // 0xf
            _ => match b {
                0x07 => Insn::getdt { x },
                0x0a => Insn::waitk { x },
                0x15 => Insn::setdt { x },
                0x18 => Insn::setst { x },
                0x1e => Insn::addI  { x },
                0x29 => Insn::font  { x },
                0x33 => Insn::bcd   { x },
                0x55 => Insn::dmao  { x },
                0x65 => Insn::dmai  { x },
                _ => Insn::inval { word },
            },
        }
    }

    /// Returns true if this is [Insn::inval]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Insn::inval { .. })
    }
}

impl From<u16> for Insn {
    fn from(word: u16) -> Self {
        Insn::decode(word)
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::cls               => write!(f, "cls    "),
            Insn::ret               => write!(f, "ret    "),
            Insn::jmp { A }         => write!(f, "jmp    {A:03x}"),
            Insn::call { A }        => write!(f, "call   {A:03x}"),
            Insn::seb { B, x }      => write!(f, "se     #{B:02x}, v{x:X}"),
            Insn::sneb { B, x }     => write!(f, "sne    #{B:02x}, v{x:X}"),
            Insn::se { y, x }       => write!(f, "se     v{y:X}, v{x:X}"),
            Insn::movb { B, x }     => write!(f, "mov    #{B:02x}, v{x:X}"),
            Insn::addb { B, x }     => write!(f, "add    #{B:02x}, v{x:X}"),
            Insn::mov { y, x }      => write!(f, "mov    v{y:X}, v{x:X}"),
            Insn::or { y, x }       => write!(f, "or     v{y:X}, v{x:X}"),
            Insn::and { y, x }      => write!(f, "and    v{y:X}, v{x:X}"),
            Insn::xor { y, x }      => write!(f, "xor    v{y:X}, v{x:X}"),
            Insn::add { y, x }      => write!(f, "add    v{y:X}, v{x:X}"),
            Insn::sub { y, x }      => write!(f, "sub    v{y:X}, v{x:X}"),
            Insn::shr { y, x }      => write!(f, "shr    v{y:X}, v{x:X}"),
            Insn::bsub { y, x }     => write!(f, "bsub   v{y:X}, v{x:X}"),
            Insn::shl { y, x }      => write!(f, "shl    v{y:X}, v{x:X}"),
            Insn::sne { y, x }      => write!(f, "sne    v{y:X}, v{x:X}"),
            Insn::movI { A }        => write!(f, "mov    ${A:03x}, I"),
            Insn::jmpr { A }        => write!(f, "jmp    ${A:03x}+v0"),
            Insn::rand { B, x }     => write!(f, "rand   #{B:02x}, v{x:X}"),
            Insn::draw { y, x, n }  => write!(f, "draw   #{n:x}, v{x:X}, v{y:X}"),
            Insn::sek { x }         => write!(f, "sek    v{x:X}"),
            Insn::snek { x }        => write!(f, "snek   v{x:X}"),
            Insn::getdt { x }       => write!(f, "mov    DT, v{x:X}"),
            Insn::waitk { x }       => write!(f, "waitk  v{x:X}"),
            Insn::setdt { x }       => write!(f, "mov    v{x:X}, DT"),
            Insn::setst { x }       => write!(f, "mov    v{x:X}, ST"),
            Insn::addI { x }        => write!(f, "add    v{x:X}, I"),
            Insn::font { x }        => write!(f, "font   v{x:X}, I"),
            Insn::bcd { x }         => write!(f, "bcd    v{x:X}, &I"),
            Insn::dmao { x }        => write!(f, "dmao   v{x:X}"),
            Insn::dmai { x }        => write!(f, "dmai   v{x:X}"),
            Insn::inval { word }    => write!(f, "inval  {word:04x}"),
        }
    }
}
