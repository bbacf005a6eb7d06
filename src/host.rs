// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Drives a [CPU] at a fixed 60Hz cadence, and connects it to the outside world
//!
//! Each tick, the [Host]:
//! 1. Polls [Input] for the state of the keypad. Presses from earlier ticks go stale.
//! 2. Steps the CPU `speed` times, or until it's waiting on a key
//! 3. Ticks the [Timers](crate::cpu::timers::Timers) once
//! 4. Presents the screen, if it changed

use crate::{
    cpu::{Status, CPU},
    error::Result,
    io::{Audio, Clock, Display, Headless, Input, LogSink, Logical, StderrLog},
};

/// Default number of instructions executed per 60Hz tick
pub const DEFAULT_SPEED: usize = 10;

/// Assembles a [Host] from its collaborators.
/// Anything not given is filled in with a headless default.
pub struct HostBuilder {
    speed: usize,
    display: Box<dyn Display>,
    audio: Box<dyn Audio>,
    input: Box<dyn Input>,
    log: Box<dyn LogSink>,
    clock: Box<dyn Clock>,
}

impl HostBuilder {
    /// Starts a new builder, with every collaborator [Headless], a [Logical]
    /// clock, and [StderrLog] diagnostics
    pub fn new() -> Self {
        HostBuilder {
            speed: DEFAULT_SPEED,
            display: Box::new(Headless),
            audio: Box::new(Headless),
            input: Box::new(Headless),
            log: Box::new(StderrLog),
            clock: Box::new(Logical),
        }
    }
    /// Sets the number of instructions to run per tick
    pub fn speed(mut self, speed: usize) -> Self {
        self.speed = speed;
        self
    }
    /// Sets the [Display]
    pub fn display(mut self, display: impl Display + 'static) -> Self {
        self.display = Box::new(display);
        self
    }
    /// Sets the [Audio] output
    pub fn audio(mut self, audio: impl Audio + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }
    /// Sets the [Input]
    pub fn input(mut self, input: impl Input + 'static) -> Self {
        self.input = Box::new(input);
        self
    }
    /// Sets the [LogSink] that receives unrecognized opcodes
    pub fn log(mut self, log: impl LogSink + 'static) -> Self {
        self.log = Box::new(log);
        self
    }
    /// Sets the [Clock]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }
    /// Hands the CPU to a new [Host]
    pub fn build(self, cpu: CPU) -> Host {
        Host {
            cpu,
            speed: self.speed,
            display: self.display,
            audio: self.audio,
            input: self.input,
            log: self.log,
            clock: self.clock,
            tone: false,
            ticks: 0,
        }
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HostBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBuilder")
            .field("speed", &self.speed)
            .finish_non_exhaustive()
    }
}

/// Owns a [CPU] and the collaborators it talks to
pub struct Host {
    /// The machine being run
    pub cpu: CPU,
    speed: usize,
    display: Box<dyn Display>,
    audio: Box<dyn Audio>,
    input: Box<dyn Input>,
    log: Box<dyn LogSink>,
    clock: Box<dyn Clock>,
    /// Whether the tone is playing
    tone: bool,
    ticks: usize,
}

impl Host {
    /// Gets the number of instructions run per tick
    pub fn speed(&self) -> usize {
        self.speed
    }

    /// Gets the number of ticks run so far
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Gets whether the tone is playing
    pub fn is_sounding(&self) -> bool {
        self.tone
    }

    /// Runs a single 60Hz tick. Returns false if [Input] asked to stop.
    ///
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x70, 0x01, // add #01, v0
    ///     0x12, 0x00, // jmp 200
    /// ])?;
    /// let mut host = HostBuilder::new().speed(10).build(cpu);
    /// assert!(host.frame()?);
    /// assert_eq!(5, host.cpu.v()[0]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn frame(&mut self) -> Result<bool> {
        self.cpu.keys_mut().settle();
        if !self.input.poll(self.cpu.keys_mut())? {
            return Ok(false);
        }
        for _ in 0..self.speed {
            let status = self.cpu.step(self.log.as_mut());
            self.sync_tone();
            if status == Status::AwaitingKey {
                break;
            }
        }
        if self.cpu.timers_mut().tick() && self.tone {
            self.tone = false;
            self.audio.stop();
        }
        if self.cpu.take_redraw() {
            self.display.frame(self.cpu.screen())?;
        }
        self.ticks += 1;
        Ok(true)
    }

    /// Runs until the program halts, [Input] asks to stop,
    /// or `limit` ticks have run, whichever comes first.
    ///
    /// A halted program keeps ticking until its tone has played out.
    /// The tone is always stopped on return.
    ///
    /// # Examples
    /// ```rust
    /// # use chippy::prelude::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x12, 0x00])?; // jmp 200
    /// let mut host = HostBuilder::new().build(cpu);
    /// host.run(None)?;
    /// assert!(host.cpu.flags.halted);
    /// # Ok(())
    /// # }
    /// ```
    pub fn run(&mut self, limit: Option<usize>) -> Result<()> {
        loop {
            for _ in 0..self.clock.wait() {
                let finished = self.cpu.flags.halted && !self.tone;
                if finished || limit.map_or(false, |limit| self.ticks >= limit) {
                    self.silence();
                    return Ok(());
                }
                if !self.frame()? {
                    self.silence();
                    return Ok(());
                }
            }
        }
    }

    /// Stops the tone, if it's playing
    fn silence(&mut self) {
        if self.tone {
            self.tone = false;
            self.audio.stop();
        }
    }

    /// Starts or stops the tone to match the sound timer
    fn sync_tone(&mut self) {
        match (self.tone, self.cpu.timers().is_sounding()) {
            (false, true) => {
                self.tone = true;
                self.audio.start();
            }
            (true, false) => {
                self.tone = false;
                self.audio.stop();
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("cpu", &self.cpu)
            .field("speed", &self.speed)
            .field("tone", &self.tone)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
