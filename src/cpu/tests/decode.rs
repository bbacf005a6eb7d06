// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the instruction decode logic.
use super::*;

const INDX: &[u8; 16] = b"\0\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f";

/// runs one arbitrary operation on a brand new CPU
/// returns the CPU for inspection, and whatever it logged
fn run_single_op(op: &[u8]) -> (CPU, Vec<Record>) {
    let mut cpu = CPU::default();
    let mut log: Vec<Record> = vec![];
    cpu.load_program_bytes(op).unwrap();
    cpu.v = *INDX;
    cpu.flags.quirks = Quirks::default();
    cpu.step(&mut log);
    (cpu, log)
}

/// runs an operation, and checks that it was logged and ignored
fn ignored(op: &[u8]) {
    let (cpu, log) = run_single_op(op);
    assert_eq!(1, log.len(), "{op:02x?} should be logged");
    assert_eq!(0x202, cpu.pc);
    assert_eq!(INDX, &cpu.v);
}

#[rustfmt::skip]
mod sys {
    use super::*;
    #[test] fn cls()   { assert!(run_single_op(b"\x00\xe0").1.is_empty()); }
    #[test] fn ret()   { assert!(run_single_op(b"\x00\xee").1.is_empty()); }
    #[test] fn u0420() { ignored(b"\x04\x20"); }
    #[test] fn u00e1() { ignored(b"\x00\xe1"); }
    #[test] fn u0000() { ignored(b"\x00\x00"); }
}
#[rustfmt::skip]
mod jump {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x12\x30").0.pc); }
    #[test] fn unaligned() { assert_eq!(0x230, run_single_op(b"\x12\x31").0.pc); }
}
#[rustfmt::skip]
mod call {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x22\x30").0.pc); }
    #[test] fn pushes()    { assert_eq!(0x202, run_single_op(b"\x22\x30").0.stack[1]); }
}
#[rustfmt::skip]
mod seb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x30\x00").0.pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x30\x01").0.pc); }
}
#[rustfmt::skip]
mod sneb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x40\x01").0.pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x40\x00").0.pc); }
}
#[rustfmt::skip]
mod se {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x50\x00").0.pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x50\x10").0.pc); }
    // the low nibble is ignored
    #[test] fn u5ff1()   { assert_eq!(0x204, run_single_op(b"\x5f\xf1").0.pc); }
    #[test] fn u5ef7()   { assert_eq!(0x202, run_single_op(b"\x5e\xf7").0.pc); }
}
#[rustfmt::skip]
mod mov {
    use super::*;
    #[test] fn w00() { assert_eq!(0x00, run_single_op(b"\x61\x00").0.v[1]); }
    #[test] fn wc5() { assert_eq!(0xc5, run_single_op(b"\x62\xc5").0.v[2]); }
    #[test] fn wff() { assert_eq!(0xff, run_single_op(b"\x63\xff").0.v[3]); }
}
#[rustfmt::skip]
mod add {
    use super::*;
    #[test] fn p00() { assert_eq!(0x01, run_single_op(b"\x71\x00").0.v[1]); }
    #[test] fn pc5() { assert_eq!(0xc7, run_single_op(b"\x72\xc5").0.v[2]); }
    #[test] fn pff() { assert_eq!(0x02, run_single_op(b"\x73\xff").0.v[3]); }
}
#[rustfmt::skip]
mod alu {
    use super::*;
    #[test] fn mov()  { assert_eq!(0x02, run_single_op(b"\x81\x20").0.v[1]); }
    #[test] fn or()   { assert_eq!(0x03, run_single_op(b"\x81\x21").0.v[1]); }
    #[test] fn and()  { assert_eq!(0x00, run_single_op(b"\x81\x22").0.v[1]); }
    #[test] fn xor()  { assert_eq!(0x03, run_single_op(b"\x81\x23").0.v[1]); }
    #[test] fn add()  { assert_eq!(0x03, run_single_op(b"\x81\x24").0.v[1]); }
    #[test] fn sub()  { assert_eq!(0xff, run_single_op(b"\x81\x25").0.v[1]); }
    #[test] fn shr()  { assert_eq!(0x00, run_single_op(b"\x81\x26").0.v[1]); }
    #[test] fn bsub() { assert_eq!(0x01, run_single_op(b"\x81\x27").0.v[1]); }
    #[test] fn shl()  { assert_eq!(0x02, run_single_op(b"\x81\x2e").0.v[1]); }
    #[test] fn u8128() { ignored(b"\x81\x28"); }
    #[test] fn u8129() { ignored(b"\x81\x29"); }
    #[test] fn u812a() { ignored(b"\x81\x2a"); }
    #[test] fn u812b() { ignored(b"\x81\x2b"); }
    #[test] fn u812c() { ignored(b"\x81\x2c"); }
    #[test] fn u812d() { ignored(b"\x81\x2d"); }
    #[test] fn u812f() { ignored(b"\x81\x2f"); }
}
#[rustfmt::skip]
mod sne {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x90\x10").0.pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x90\x00").0.pc); }
    // the low nibble is ignored
    #[test] fn u9ef1()   { assert_eq!(0x204, run_single_op(b"\x9e\xf1").0.pc); }
}
#[rustfmt::skip]
mod movi {
    use super::*;
    #[test] fn mov()   { assert_eq!(0x123, run_single_op(b"\xa1\x23").0.i); }
}
#[rustfmt::skip]
mod jmpr {
    use super::*;
    #[test] fn v0()    { assert_eq!(0x230, run_single_op(b"\xb2\x30").0.pc); }
}
#[rustfmt::skip]
mod rnd {
    use super::*;
    #[test] fn mask0() { assert_eq!(0x00, run_single_op(b"\xc4\x00").0.v[4]); }
}
#[rustfmt::skip]
mod draw {
    use super::*;
    #[test] fn glyph() { assert!(!run_single_op(b"\xd0\x05").0.screen.is_blank()); }
    #[test] fn empty() { assert!(run_single_op(b"\xd0\x00").0.screen.is_blank()); }
}
#[rustfmt::skip]
mod key {
    use super::*;
    #[test] fn sek()   { assert_eq!(0x202, run_single_op(b"\xe1\x9e").0.pc); }
    #[test] fn snek()  { assert_eq!(0x204, run_single_op(b"\xe1\xa1").0.pc); }
    #[test] fn ue19f() { ignored(b"\xe1\x9f"); }
    #[test] fn ue1a0() { ignored(b"\xe1\xa0"); }
}
#[rustfmt::skip]
mod io {
    use super::*;
    #[test] fn getdt() { assert_eq!(0x00, run_single_op(b"\xf3\x07").0.v[3]); }
    #[test] fn waitk() { assert_eq!(0x200, run_single_op(b"\xf3\x0a").0.pc); }
    #[test] fn setdt() { assert_eq!(0x03, run_single_op(b"\xf3\x15").0.delay()); }
    #[test] fn setst() { assert_eq!(0x03, run_single_op(b"\xf3\x18").0.sound()); }
    #[test] fn addi()  { assert_eq!(0x03, run_single_op(b"\xf3\x1e").0.i); }
    #[test] fn font()  { assert_eq!(0x0f, run_single_op(b"\xf3\x29").0.i); }
    #[test] fn bcd()   { assert_eq!(0x00, run_single_op(b"\xf3\x33").0.i); }
    #[test] fn dmao()  { assert_eq!(0x00, run_single_op(b"\xf3\x55").0.i); }
    #[test] fn dmai()  { assert_eq!(0x00, run_single_op(b"\xf3\x65").0.i); }
    #[test] fn uf308() { ignored(b"\xf3\x08"); }
    #[test] fn uf375() { ignored(b"\xf3\x75"); }
    #[test] fn uf385() { ignored(b"\xf3\x85"); }
}

/// Every word decodes, exactly as an ordered first-match rule list would decode it
mod rule_list {
    use super::*;

    type Rule = (u16, u16, fn(u16) -> Insn);

    fn x(w: u16) -> usize {
        (w >> 8 & 0xf) as usize
    }
    fn y(w: u16) -> usize {
        (w >> 4 & 0xf) as usize
    }

    #[rustfmt::skip]
    const RULES: &[Rule] = &[
        (0xffff, 0x00e0, |_| Insn::cls),
        (0xffff, 0x00ee, |_| Insn::ret),
        (0xf000, 0x1000, |w| Insn::jmp   { A: w & 0xfff }),
        (0xf000, 0x2000, |w| Insn::call  { A: w & 0xfff }),
        (0xf000, 0x3000, |w| Insn::seb   { B: w as u8, x: x(w) }),
        (0xf000, 0x4000, |w| Insn::sneb  { B: w as u8, x: x(w) }),
        (0xf000, 0x5000, |w| Insn::se    { y: y(w), x: x(w) }),
        (0xf000, 0x6000, |w| Insn::movb  { B: w as u8, x: x(w) }),
        (0xf000, 0x7000, |w| Insn::addb  { B: w as u8, x: x(w) }),
        (0xf00f, 0x8000, |w| Insn::mov   { y: y(w), x: x(w) }),
        (0xf00f, 0x8001, |w| Insn::or    { y: y(w), x: x(w) }),
        (0xf00f, 0x8002, |w| Insn::and   { y: y(w), x: x(w) }),
        (0xf00f, 0x8003, |w| Insn::xor   { y: y(w), x: x(w) }),
        (0xf00f, 0x8004, |w| Insn::add   { y: y(w), x: x(w) }),
        (0xf00f, 0x8005, |w| Insn::sub   { y: y(w), x: x(w) }),
        (0xf00f, 0x8006, |w| Insn::shr   { y: y(w), x: x(w) }),
        (0xf00f, 0x8007, |w| Insn::bsub  { y: y(w), x: x(w) }),
        (0xf00f, 0x800e, |w| Insn::shl   { y: y(w), x: x(w) }),
        (0xf000, 0x9000, |w| Insn::sne   { y: y(w), x: x(w) }),
        (0xf000, 0xa000, |w| Insn::movI  { A: w & 0xfff }),
        (0xf000, 0xb000, |w| Insn::jmpr  { A: w & 0xfff }),
        (0xf000, 0xc000, |w| Insn::rand  { B: w as u8, x: x(w) }),
        (0xf000, 0xd000, |w| Insn::draw  { y: y(w), x: x(w), n: (w & 0xf) as u8 }),
        (0xf0ff, 0xe09e, |w| Insn::sek   { x: x(w) }),
        (0xf0ff, 0xe0a1, |w| Insn::snek  { x: x(w) }),
        (0xf0ff, 0xf007, |w| Insn::getdt { x: x(w) }),
        (0xf0ff, 0xf00a, |w| Insn::waitk { x: x(w) }),
        (0xf0ff, 0xf015, |w| Insn::setdt { x: x(w) }),
        (0xf0ff, 0xf018, |w| Insn::setst { x: x(w) }),
        (0xf0ff, 0xf01e, |w| Insn::addI  { x: x(w) }),
        (0xf0ff, 0xf029, |w| Insn::font  { x: x(w) }),
        (0xf0ff, 0xf033, |w| Insn::bcd   { x: x(w) }),
        (0xf0ff, 0xf055, |w| Insn::dmao  { x: x(w) }),
        (0xf0ff, 0xf065, |w| Insn::dmai  { x: x(w) }),
        (0x0000, 0x0000, |word| Insn::inval { word }),
    ];

    fn first_match(word: u16) -> Insn {
        RULES
            .iter()
            .find(|(mask, fixed, _)| word & mask == *fixed)
            .map(|(_, _, build)| build(word))
            .expect("The last rule matches everything")
    }

    #[test]
    fn total() {
        for word in 0..=0xffff {
            assert_eq!(first_match(word), Insn::decode(word), "{word:04x}");
        }
    }

    #[test]
    fn display_is_total() {
        for word in 0..=0xffff {
            assert!(!Insn::decode(word).to_string().is_empty());
        }
    }

    #[test]
    fn inval_count() {
        let recognized = (0..=0xffffu16)
            .filter(|&word| !Insn::decode(word).is_invalid())
            .count();
        // 2 fixed words, 12 whole families, 9 ALU ops, 2 key ops, 9 I/O ops
        assert_eq!(2 + 12 * 0x1000 + 9 * 0x100 + 2 * 0x10 + 9 * 0x10, recognized);
    }
}
