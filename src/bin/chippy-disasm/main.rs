// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Prints the disassembly of every word in a Chip-8 ROM

use chippy::{
    cpu::START,
    error::{Error, Result},
    prelude::*,
};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
}

fn main() {
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = disassemble(&options) {
        eprintln!("{}", e.bold().red());
        std::process::exit(1);
    }
}

fn disassemble(options: &Arguments) -> Result<()> {
    let contents = read(&options.file).map_err(|source| Error::RomUnreadable {
        path: options.file.clone(),
        source,
    })?;
    let disassembler = Dis::default();
    for (addr, insn) in contents
        .get(options.offset..)
        .unwrap_or_default()
        .chunks_exact(2)
        .enumerate()
    {
        let insn = u16::from_be_bytes([insn[0], insn[1]]);
        println!(
            "{:03x}: {} {:04x}",
            2 * addr + START as usize + options.offset,
            disassembler.once(insn),
            insn.bright_black(),
        );
    }
    Ok(())
}
