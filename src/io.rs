// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Collaborators the [Host](crate::host::Host) drives: display, audio, input,
//! diagnostics, and the clock which paces it all.
//!
//! None of these are needed to run the [CPU](crate::cpu::CPU) directly.

use crate::{cpu::keypad::Keypad, error::Result, screen::Screen};
use owo_colors::OwoColorize;
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

/// Something the CPU ran into, but carried on past
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record {
    /// Address the word was fetched from
    pub addr: u16,
    /// The word which isn't an instruction
    pub word: u16,
}

impl std::fmt::Display for Record {
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// let record = Record { addr: 0x202, word: 0x0123 };
    /// assert_eq!("opcode 0123 not recognized at 202", record.to_string());
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {:03x}",
            crate::error::Error::UnimplementedInstruction { word: self.word },
            self.addr
        )
    }
}

/// Receives a [Record] every time the CPU meets a word it can't execute
pub trait LogSink {
    /// Logs a single [Record]
    fn log(&mut self, record: &Record);
}

/// Collects records, for inspection later
impl LogSink for Vec<Record> {
    fn log(&mut self, record: &Record) {
        self.push(*record)
    }
}

/// Prints records to stderr, in bold red
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StderrLog;

impl LogSink for StderrLog {
    fn log(&mut self, record: &Record) {
        eprintln!("{}", record.bold().red());
    }
}

/// Appends records to a file, one per line
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileLog {
    path: PathBuf,
}

impl FileLog {
    /// Where [FileLog::default] writes
    pub const DEFAULT_PATH: &'static str = "out.txt";

    /// Logs to the file at `path`, which is created when first needed
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    /// Gets the path being logged to
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &Record) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "Unrecognized opcode 0x{:04x}", record.word)
    }
}

impl Default for FileLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl LogSink for FileLog {
    /// A log that can't be written to is reported, but never stops the machine
    fn log(&mut self, record: &Record) {
        if let Err(e) = self.append(record) {
            eprintln!(
                "{}",
                format!("Could not log to {}: {e}", self.path.display())
                    .bold()
                    .red()
            );
        }
    }
}

/// Shows the framebuffer to the user
pub trait Display {
    /// Presents a frame. Only called when the framebuffer has changed.
    fn frame(&mut self, screen: &Screen) -> Result<()>;
}

/// Plays the buzzer
pub trait Audio {
    /// Starts the tone. Called when the sound timer becomes nonzero.
    fn start(&mut self);
    /// Stops the tone. Called when the sound timer returns to zero.
    fn stop(&mut self);
}

/// Writes the state of the keypad
pub trait Input {
    /// Updates `keys`. Returns `false` to ask the host to stop.
    fn poll(&mut self, keys: &mut Keypad) -> Result<bool>;
}

/// Paces the host
pub trait Clock {
    /// Blocks until it's time to run, then returns the number of 60Hz ticks to run
    fn wait(&mut self) -> usize;
}

/// A do-nothing [Display], [Audio], and [Input], for running without a user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Headless;

impl Display for Headless {
    fn frame(&mut self, _: &Screen) -> Result<()> {
        Ok(())
    }
}

impl Audio for Headless {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}

impl Input for Headless {
    fn poll(&mut self, _: &mut Keypad) -> Result<bool> {
        Ok(true)
    }
}

/// Prints each frame to stdout, using [Screen]'s [std::fmt::Display]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Terminal;

impl Display for Terminal {
    fn frame(&mut self, screen: &Screen) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{screen}")?;
        out.flush()?;
        Ok(())
    }
}

/// Most ticks a [Realtime] clock will make up after a stall
pub const MAX_CATCHUP: usize = 4;

/// A [Clock] which keeps pace with the wall clock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Realtime {
    rate: Duration,
    next: Instant,
}

impl Realtime {
    /// Ticks `rate` times a second
    pub fn new(rate: u64) -> Self {
        Self {
            rate: Duration::from_nanos(1_000_000_000 / rate.max(1) + 1),
            next: Instant::now(),
        }
    }
}

impl Default for Realtime {
    fn default() -> Self {
        Self::new(crate::cpu::timers::TIMER_HZ)
    }
}

impl Clock for Realtime {
    /// Sleeps to the next tick boundary. If the host fell behind,
    /// returns the ticks it missed, up to [MAX_CATCHUP]. Past that,
    /// the schedule restarts from now.
    fn wait(&mut self) -> usize {
        std::thread::sleep(self.next.saturating_duration_since(Instant::now()));
        let mut ticks = 0;
        let now = Instant::now();
        while self.next <= now {
            if ticks == MAX_CATCHUP {
                self.next = now + self.rate;
                break;
            }
            self.next += self.rate;
            ticks += 1;
        }
        ticks.max(1)
    }
}

/// A [Clock] which never waits. Every call is one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Logical;

impl Clock for Logical {
    fn wait(&mut self) -> usize {
        1
    }
}
