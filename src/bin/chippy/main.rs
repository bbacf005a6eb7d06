// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Chippy: A chip-8 virtual machine in Rust
//!
//! Runs a ROM headless at 60Hz, reporting unrecognized opcodes as it goes.

use chippy::{
    io::{FileLog, Headless, Realtime, StderrLog, Terminal},
    prelude::*,
};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::path::PathBuf;

fn main() {
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = run(options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run on Chippy.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,

    #[options(help = "Set the instructions-per-tick rate.", default = "10")]
    pub speed: usize,

    #[options(help = "Run in (Modern, Cosmac) mode.")]
    pub mode: Option<Mode>,

    #[options(short = "z", help = "Toggle setting vF to 0 after a bitwise operation.")]
    pub vfreset: bool,
    #[options(short = "c", help = "Toggle leaving I at I+x+1 after a DMA instruction.")]
    pub memory: bool,
    #[options(short = "v", help = "Toggle bit-shifts which shift vY into vX.")]
    pub shift: bool,
    #[options(short = "b", help = "Toggle SUPER-CHIP style indexed jump, relative to v[adr].")]
    pub jumping: bool,

    #[options(help = "Seed the random number generator.", meta = "SEED")]
    pub seed: Option<u64>,
    #[options(help = "Stop after N ticks.", meta = "N")]
    pub frames: Option<usize>,
    #[options(help = "Log unrecognized opcodes to a file.", meta = "PATH")]
    pub log: Option<PathBuf>,
    #[options(help = "Print the screen on exit.")]
    pub dump: bool,
    #[options(help = "Print the screen every time it changes.")]
    pub terminal: bool,

    #[options(help = "Set the target framerate.", default = "60", meta = "FR")]
    pub frame_rate: u64,
}

fn run(options: Arguments) -> Result<()> {
    let mut cpu = CPU::new(
        &options.file,
        Flags {
            quirks: options.mode.unwrap_or_default().into(),
            debug: options.debug,
            ..Default::default()
        },
    )?;
    // Flip the state of the quirks
    cpu.flags.quirks.vf_reset ^= options.vfreset;
    cpu.flags.quirks.dma_inc ^= options.memory;
    cpu.flags.quirks.shift_vy ^= options.shift;
    cpu.flags.quirks.jump_vx ^= options.jumping;
    if let Some(seed) = options.seed {
        cpu.seed(seed);
    }

    let mut builder = HostBuilder::new()
        .speed(options.speed)
        .clock(Realtime::new(options.frame_rate));
    builder = match options.log {
        Some(path) => builder.log(FileLog::new(path)),
        None => builder.log(StderrLog),
    };
    builder = match options.terminal {
        true => builder.display(Terminal),
        false => builder.display(Headless),
    };
    let mut host = builder.build(cpu);

    host.run(options.frames)?;

    if options.dump {
        println!("{}", host.cpu.screen());
    }
    if options.debug {
        host.cpu.dump();
    }
    Ok(())
}
