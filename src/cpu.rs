// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod keypad;
pub mod mem;
pub mod mode;
pub mod quirks;
pub mod timers;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::Keypad,
    mem::{Mem, ADDR_MASK},
    mode::Mode,
    quirks::Quirks,
    timers::Timers,
};
use crate::{
    error::{Error, Result},
    io::{LogSink, Record},
    screen::Screen,
};
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Where programs are loaded, and where execution begins
pub const START: Adr = 0x200;

/// What the CPU is doing after a [CPU::step]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Ready to execute the next instruction
    Running,
    /// Parked on `Fx0A` until a key is pressed. Stepping re-issues the wait.
    AwaitingKey,
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks], debug mode, etc.
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: [Adr; 16],
    sp: usize,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    timers: Timers,
    // I/O
    keys: Keypad,
    // Execution data
    cycle: usize,
    redraw: bool,
    rng: StdRng,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the given [Flags], and loads the ROM at `rom`
    ///
    /// Returns [Error::RomUnreadable] if the file can't be read, and
    /// [Error::RomTooLarge] if it doesn't fit in program memory.
    pub fn new(rom: impl AsRef<std::path::Path>, flags: Flags) -> Result<Self> {
        let mut cpu = CPU {
            flags,
            ..Default::default()
        };
        cpu.load_program(rom)?;
        Ok(cpu)
    }

    /// Constructs a new CPU with the quirks from the provided [Mode]
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let cpu = CPU::with_mode(Mode::Cosmac);
    /// assert!(cpu.flags.quirks.shift_vy);
    /// ```
    pub fn with_mode(mode: Mode) -> Self {
        let mut cpu = CPU::default();
        cpu.flags.quirks = Quirks::from(mode);
        cpu
    }

    /// Loads a program into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        let path = rom.as_ref();
        let rom = std::fs::read(path).map_err(|source| Error::RomUnreadable {
            path: path.to_owned(),
            source,
        })?;
        self.load_program_bytes(&rom)
    }

    /// Loads bytes into the CPU's program space
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x00, 0xe0])?;
    /// assert_eq!(0x00e0, cpu.mem().read_word(0x200));
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        Ok(self)
    }

    /// Reseeds the random number generator used by `Cxbb`
    ///
    /// Two CPUs with the same seed and the same inputs produce the same results.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut cpu = CPU::default();
    /// assert!(cpu.press(0x7).unwrap());
    /// assert!(!cpu.press(0x7).unwrap());
    /// assert!(cpu.press(0x10).is_err());
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.keys.press(key)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.keys.release(key)
    }

    /// Gets the [Keypad]
    pub fn keys(&self) -> &Keypad {
        &self.keys
    }

    /// Gets the [Keypad] mutably, for an [Input](crate::io::Input) to write to
    pub fn keys_mut(&mut self) -> &mut Keypad {
        &mut self.keys
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// assert!(cpu.set_v(0x10, 0x41).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the stack pointer
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// Gets the return-address stack. Slot [CPU::sp] is the top.
    pub fn stack(&self) -> &[Adr; 16] {
        &self.stack
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.timers.delay
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.timers.sound
    }

    /// Gets both [Timers]
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Gets both [Timers] mutably, so the host can tick them
    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    /// Gets the framebuffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the memory mutably
    pub fn mem_mut(&mut self) -> &mut Mem {
        &mut self.mem
    }

    /// Gets the number of instructions the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Reports whether the screen changed since the last call, and clears the report
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Gets the current [Status]
    pub fn status(&self) -> Status {
        if self.flags.keypause {
            Status::AwaitingKey
        } else {
            Status::Running
        }
    }

    /// Resets the emulator.
    ///
    /// Touches the [Flags] (keypause, halted), stack, pc, registers, timers,
    /// keys, screen, and cycle count.
    ///
    /// Does not touch [Quirks], debug mode, or memory.
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0, 0xff).unwrap();
    /// cpu.flags.keypause = true;
    /// cpu.reset();
    /// assert_eq!(0, cpu.v()[0]);
    /// assert_eq!(Status::Running, cpu.status());
    /// ```
    pub fn reset(&mut self) {
        self.flags = Flags {
            keypause: false,
            halted: false,
            ..self.flags.clone()
        };
        // clear the stack
        self.stack = [0; 16];
        self.sp = 0;
        // Reset the program counter
        self.pc = START;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.timers = Timers::default();
        // I/O
        self.keys = Keypad::default();
        self.screen.clear();
        // Execution data
        self.cycle = 0;
        self.redraw = true;
    }

    /// Executes a single instruction
    ///
    /// Fetches the word at pc, advances pc past it, then decodes and executes it.
    /// Words that aren't instructions are reported to `log` and otherwise ignored.
    ///
    /// Returns [Status::AwaitingKey] while parked on `Fx0A`.
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x01, 0x23, // not an instruction
    /// ]).unwrap();
    /// let mut log: Vec<Record> = vec![];
    /// assert_eq!(Status::Running, cpu.step(&mut log));
    /// assert_eq!(Status::Running, cpu.step(&mut log));
    /// assert_eq!(0x204, cpu.pc());
    /// assert_eq!(vec![Record { addr: 0x202, word: 0x0123 }], log);
    /// ```
    pub fn step(&mut self, log: &mut dyn LogSink) -> Status {
        self.cycle += 1;
        let addr = self.pc;
        let word = self.mem.read_word(addr);

        // Print opcode disassembly:
        if self.flags.debug {
            std::println!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                addr,
                self.disassembler.once(word)
            );
        }

        self.set_pc(addr.wrapping_add(2));
        match Insn::decode(word) {
            Insn::inval { word } => log.log(&Record { addr, word }),
            insn => self.execute(insn),
        }
        self.status()
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 00, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:02x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.sp,
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.timers.delay,
            self.timers.sound,
            self.cycle,
        );
    }
}

// internals shared with behavior.rs
impl CPU {
    /// Sets pc, keeping it even and inside memory
    #[inline(always)]
    fn set_pc(&mut self, addr: Adr) {
        self.pc = addr & ADDR_MASK & !1;
    }
}

impl PartialEq for CPU {
    /// Compares machine state. The random number generator and the
    /// disassembler's styling are not machine state.
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.mem == other.mem
            && self.screen == other.screen
            && self.stack == other.stack
            && self.sp == other.sp
            && self.pc == other.pc
            && self.i == other.i
            && self.v == other.v
            && self.timers == other.timers
            && self.keys == other.keys
            && self.cycle == other.cycle
            && self.redraw == other.redraw
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("stack", &self.stack)
            .field("sp", &self.sp)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("timers", &self.timers)
            .field("keys", &self.keys)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0000` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    /// | sp     |`0x0`    | Stack pointer. The first call uses slot 1.
    ///
    /// # Examples
    /// ```rust
    /// use chippy::prelude::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::new(),
            stack: [0; 16],
            sp: 0,
            pc: START,
            i: 0,
            v: [0; 16],
            timers: Timers::default(),
            keys: Keypad::default(),
            cycle: 0,
            redraw: false,
            rng: StdRng::from_entropy(),
            disassembler: Dis::default(),
        }
    }
}
