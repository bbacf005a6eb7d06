//! Testing methods on Chippy's public API
use chippy::{io::Display, prelude::*};
use std::{cell::RefCell, collections::hash_map::DefaultHasher, hash::Hash, rc::Rc};

#[test]
fn cpu() {
    let cpu = CPU::default(); // Default
    let cpu2 = cpu.clone(); // Clone
    assert_eq!(cpu, cpu2); // PartialEq
    println!("{cpu:?}"); // Debug
}

/// Loads a program into a fresh CPU
fn with_program(rom: &[u8]) -> CPU {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(rom)
        .expect("Program should fit in memory");
    cpu
}

/// Steps until the CPU halts, giving up after `limit` steps
fn run_to_halt(cpu: &mut CPU, limit: usize) -> Vec<Record> {
    let mut log: Vec<Record> = vec![];
    for _ in 0..limit {
        if cpu.flags.halted {
            break;
        }
        cpu.step(&mut log);
    }
    assert!(cpu.flags.halted, "program did not halt in {limit} steps");
    log
}

mod programs {
    use super::*;

    #[test]
    fn counts_to_ten() {
        #[rustfmt::skip]
        let mut cpu = with_program(&[
            0x60, 0x00, // 200: mov #00, v0
            0x70, 0x01, // 202: add #01, v0
            0x30, 0x0a, // 204: se  #0a, v0
            0x12, 0x02, // 206: jmp 202
            0x12, 0x08, // 208: jmp 208
        ]);
        let log = run_to_halt(&mut cpu, 100);
        assert!(log.is_empty());
        assert_eq!(10, cpu.v()[0]);
        assert_eq!(0x208, cpu.pc());
    }

    #[test]
    fn subroutine() {
        #[rustfmt::skip]
        let mut cpu = with_program(&[
            0x22, 0x08, // 200: call 208
            0x22, 0x08, // 202: call 208
            0x12, 0x04, // 204: jmp 204
            0x00, 0x00, // 206: (padding)
            0x71, 0x05, // 208: add #05, v1
            0x00, 0xee, // 20a: ret
        ]);
        run_to_halt(&mut cpu, 100);
        assert_eq!(10, cpu.v()[1]);
        assert_eq!(0, cpu.sp());
        assert_eq!(0x204, cpu.stack()[1]);
    }

    #[test]
    fn bcd_and_font() {
        #[rustfmt::skip]
        let mut cpu = with_program(&[
            0x60, 0x7b, // 200: mov #7b, v0  (123)
            0xa3, 0x00, // 202: mov $300, I
            0xf0, 0x33, // 204: bcd v0, &I
            0xf2, 0x65, // 206: dmai v2
            0xf1, 0x29, // 208: font v1, I
            0x63, 0x00, // 20a: mov #00, v3
            0xd3, 0x35, // 20c: draw #5, v3, v3
            0x12, 0x0e, // 20e: jmp 20e
        ]);
        run_to_halt(&mut cpu, 100);
        assert_eq!(&[1, 2, 3], &cpu.v()[0..3]);
        assert_eq!(2 * 5, cpu.i());
        // the glyph `2` is 4 pixels wide on its top row
        for x in 0..4 {
            assert!(cpu.screen().pixel(x, 0));
        }
        assert!(!cpu.screen().pixel(4, 0));
        assert_eq!(0, cpu.v()[0xf]);
    }

    #[test]
    fn unrecognized_words_are_skipped() {
        #[rustfmt::skip]
        let mut cpu = with_program(&[
            0x01, 0x23, // 200: not an instruction
            0x8a, 0x0f, // 202: not an instruction
            0x61, 0x42, // 204: mov #42, v1
            0x12, 0x06, // 206: jmp 206
        ]);
        let log = run_to_halt(&mut cpu, 100);
        assert_eq!(
            vec![
                Record { addr: 0x200, word: 0x0123 },
                Record { addr: 0x202, word: 0x8a0f },
            ],
            log
        );
        assert_eq!(0x42, cpu.v()[1]);
    }

    #[test]
    fn seeded_runs_agree() {
        let rom = [
            0xc0, 0xff, // 200: rand #ff, v0
            0xc1, 0xff, // 202: rand #ff, v1
            0xc2, 0xff, // 204: rand #ff, v2
            0x12, 0x06, // 206: jmp 206
        ];
        let (mut a, mut b) = (with_program(&rom), with_program(&rom));
        a.seed(8);
        b.seed(8);
        run_to_halt(&mut a, 10);
        run_to_halt(&mut b, 10);
        assert_eq!(a.v(), b.v());
    }

    #[test]
    fn cosmac_mode() {
        #[rustfmt::skip]
        let rom = [
            0x61, 0x0f, // 200: mov #0f, v1
            0x62, 0x81, // 202: mov #81, v2
            0x81, 0x26, // 204: shr v2, v1
            0x12, 0x06, // 206: jmp 206
        ];
        let mut modern = with_program(&rom);
        let mut cosmac = CPU::with_mode(Mode::Cosmac);
        cosmac.load_program_bytes(&rom).unwrap();
        run_to_halt(&mut modern, 10);
        run_to_halt(&mut cosmac, 10);
        assert_eq!(0x07, modern.v()[1]);
        assert_eq!(0x40, cosmac.v()[1]);
    }
}

mod host {
    use super::*;

    /// Counts what it's shown
    #[derive(Clone, Default)]
    struct Counter(Rc<RefCell<(usize, usize)>>);

    impl Display for Counter {
        fn frame(&mut self, _: &Screen) -> Result<()> {
            self.0.borrow_mut().0 += 1;
            Ok(())
        }
    }
    impl Audio for Counter {
        fn start(&mut self) {
            self.0.borrow_mut().1 += 1;
        }
        fn stop(&mut self) {}
    }

    /// Taps `F` on every poll
    struct TapF;
    impl Input for TapF {
        fn poll(&mut self, keys: &mut Keypad) -> Result<bool> {
            keys.release(0xf)?;
            keys.press(0xf)?;
            Ok(true)
        }
    }

    #[test]
    fn run_program() -> Result<()> {
        #[rustfmt::skip]
        let cpu = with_program(&[
            0xf5, 0x0a, // 200: waitk v5
            0xf5, 0x18, // 202: mov v5, ST
            0x00, 0xe0, // 204: cls
            0x12, 0x06, // 206: jmp 206
        ]);
        let counter = Counter::default();
        let mut host = HostBuilder::new()
            .display(counter.clone())
            .audio(counter.clone())
            .input(TapF)
            .clock(Logical)
            .build(cpu);
        host.run(Some(100))?;
        assert!(host.cpu.flags.halted);
        assert_eq!(0xf, host.cpu.v()[5]);
        assert_eq!(0, host.cpu.sound());
        // the first tick runs the program, the rest play out the tone
        assert_eq!(15, host.ticks());
        assert_eq!((1, 1), *counter.0.borrow());
        Ok(())
    }

    #[test]
    fn debug() {
        println!("{:?}", HostBuilder::new().build(CPU::default()));
    }
}

mod region {
    use super::*;
    #[test]
    fn copy() {
        let r1 = Charset;
        let r2 = r1;
        assert_eq!(r1, r2);
    }
    #[test]
    fn display() {
        assert_eq!("CharsetProgram", format!("{Charset}{Program}"));
    }
    #[test]
    fn ord() {
        assert!(Charset < Program);
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Program.hash(&mut hasher);
        println!("{hasher:?}");
    }
    #[test]
    fn font_is_readable() {
        let cpu = CPU::default();
        assert_eq!(0x50, cpu.mem().get_region(Charset).len());
        assert_eq!(0xe00, cpu.mem().get_region(Program).len());
    }
}

mod error {
    use super::*;
    #[test]
    fn display() {
        let e = Error::RomTooLarge { len: 4000, max: 3584 };
        assert_eq!(
            "rom is 4000 bytes, but only 3584 bytes of program memory exist",
            e.to_string()
        );
        let e = Error::UnimplementedInstruction { word: 0x0123 };
        assert_eq!("opcode 0123 not recognized", e.to_string());
    }
    #[test]
    fn rom_unreadable() {
        match CPU::new("no/such/rom.ch8", Flags::default()) {
            Err(e @ Error::RomUnreadable { .. }) => {
                assert!(std::error::Error::source(&e).is_some())
            }
            other => panic!("{other:?}"),
        }
    }
    #[test]
    fn invalid_mode() {
        assert!("superchip".parse::<Mode>().is_err());
    }
}

mod disassembler {
    use super::*;
    #[test]
    fn plain() {
        let dis = Dis::plain();
        assert!(dis.once(0x00e0).contains("cls"));
        assert!(dis.once(0x0123).contains("inval  0123"));
        assert!(dis.once(0xd125).contains("draw   #5, v1, v2"));
    }
}
