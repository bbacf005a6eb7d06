// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! A disassembler for Chip-8 opcodes
use super::Insn;
use owo_colors::{OwoColorize, Style};

/// Disassembles Chip-8 instructions
pub trait Disassembler {
    /// Disassemble a single instruction
    fn once(&self, insn: u16) -> String;
}

/// Disassembles Chip-8 instructions, printing them in the provided [owo_colors::Style]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dis {
    /// Styles invalid instructions
    pub invalid: Style,
    /// Styles valid instruction
    pub normal: Style,
}

impl Dis {
    /// A disassembler which applies no styling at all
    pub fn plain() -> Self {
        Self {
            invalid: Style::new(),
            normal: Style::new(),
        }
    }
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            invalid: Style::new().bold().red(),
            normal: Style::new().green(),
        }
    }
}

impl Disassembler for Dis {
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let dis = Dis::default();
    /// assert!(dis.once(0x12a0).contains("jmp    2a0"));
    /// assert!(dis.once(0x8a0f).contains("inval  8a0f"));
    /// ```
    fn once(&self, insn: u16) -> String {
        let insn = Insn::decode(insn);
        let style = if insn.is_invalid() {
            self.invalid
        } else {
            self.normal
        };
        format!("{}", insn.style(style))
    }
}
