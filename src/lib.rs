// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements a Chip-8 virtual machine as if it were a real CPU architecture.
//!
//! The [CPU](cpu::CPU) owns all machine state, and runs one instruction per
//! [step](cpu::CPU::step). A [Host](host::Host) runs it at a steady 60Hz, and
//! hands the results to whatever [io] collaborators you give it.
//!
//! ```rust
//! use chippy::prelude::*;
//! # fn main() -> Result<()> {
//! let mut cpu = CPU::default();
//! cpu.load_program_bytes(&[
//!     0xa0, 0x0a, // mov $00a, I   (the glyph `2`)
//!     0xd0, 0x05, // draw #5, v0, v0
//!     0x12, 0x04, // jmp 204
//! ])?;
//! let mut host = HostBuilder::new().build(cpu);
//! host.run(None)?;
//! assert!(host.cpu.screen().pixel(0, 0));
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod error;
pub mod host;
pub mod io;
pub mod screen;

/// Common imports for chippy
pub mod prelude {
    use super::*;
    pub use cpu::{
        flags::Flags,
        instruction::{
            disassembler::{Dis, Disassembler},
            Insn,
        },
        keypad::Keypad,
        mem::{Mem, ReadWrite, Region, Region::*},
        mode::Mode,
        quirks::Quirks,
        timers::Timers,
        Status, CPU,
    };
    pub use error::{Error, Result};
    pub use host::{Host, HostBuilder};
    pub use io::{Audio, Clock, FileLog, Headless, Input, LogSink, Logical, Realtime, Record, StderrLog};
    pub use screen::Screen;
}
