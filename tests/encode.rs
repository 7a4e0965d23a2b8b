use pretty_assertions::assert_eq;
use regvm_asm::encoder::{encode_program, pack};
use regvm_asm::{assemble, encode, parse, Instr, Kind};

fn samples() -> Vec<Instr> {
    vec![
        Instr::LoadConst { dest: 0, value: 0 },
        Instr::LoadConst { dest: 63, value: 268_435_455 },
        Instr::LoadConst { dest: 17, value: 99 },
        Instr::ReadMem { dest: 0, base: 0, offset: 0 },
        Instr::ReadMem { dest: 63, base: 63, offset: 16383 },
        Instr::ReadMem { dest: 1, base: 2, offset: 3 },
        Instr::WriteMem { addr: 0, src: 0 },
        Instr::WriteMem { addr: 16_777_215, src: 63 },
        Instr::Abs { dest: 5, base: 7 },
        Instr::Abs { dest: 63, base: 63 },
    ]
}

#[test]
fn low_six_bits_hold_the_opcode() {
    for instr in samples() {
        let want = match instr.kind() {
            Kind::LoadConst => 33,
            Kind::ReadMem => 19,
            Kind::WriteMem => 58,
            Kind::Abs => 26,
        };
        assert_eq!(pack(&instr) & 0x3F, want, "{instr}");
        assert_eq!(encode(&instr).as_bytes()[0] & 0x3F, want as u8, "{instr}");
    }
}

#[test]
fn chunk_lengths_are_fixed_per_kind() {
    for instr in samples() {
        let want = match instr.kind() {
            Kind::LoadConst => 5,
            Kind::ReadMem => 4,
            Kind::WriteMem => 5,
            Kind::Abs => 3,
        };
        assert_eq!(encode(&instr).len(), want, "{instr}");
    }
}

#[test]
fn known_words() {
    let cases: &[(Instr, &[u8])] = &[
        // const field all ones
        (
            Instr::LoadConst { dest: 0, value: 268_435_455 },
            &[0xE1, 0xFF, 0xFF, 0xFF, 0x03],
        ),
        (
            Instr::LoadConst { dest: 63, value: 0 },
            &[0x21, 0x00, 0x00, 0x00, 0xFC],
        ),
        (
            Instr::ReadMem { dest: 63, base: 63, offset: 16383 },
            &[0xD3, 0xFF, 0xFF, 0xFF],
        ),
        (
            Instr::WriteMem { addr: 16_777_215, src: 63 },
            &[0xFA, 0xFF, 0xFF, 0xFF, 0x0F],
        ),
        (Instr::Abs { dest: 5, base: 7 }, &[0x5A, 0x71, 0x00]),
        (Instr::Abs { dest: 63, base: 63 }, &[0xDA, 0xFF, 0x03]),
    ];
    for (instr, bytes) in cases {
        assert_eq!(encode(instr).as_bytes(), *bytes, "{instr}");
    }
}

#[test]
fn const_field_all_ones_from_source() {
    let program = parse("REG[0] = 268435455").unwrap();
    let word = encode(&program.instrs[0]).word();
    assert_eq!((word >> 6) & 0xFFF_FFFF, 0xFFF_FFFF);
    assert_eq!(word >> 34, 0);
}

#[test]
fn oversized_fields_are_masked_not_spilled() {
    // Built by hand, bypassing the parser: only the low 28 bits survive
    // and dest is untouched.
    let e = encode(&Instr::LoadConst { dest: 1, value: 0x1000_0005 });
    assert_eq!(e.as_bytes(), &[0x61, 0x01, 0x00, 0x00, 0x04]);

    let e = encode(&Instr::Abs { dest: 0x41, base: 0 });
    assert_eq!(e.word(), 26 | 1 << 6);
}

#[test]
fn image_is_concatenation_of_chunks() {
    let program = samples().into();
    let mut joined = Vec::new();
    for chunk in encode_program(&program) {
        joined.extend_from_slice(chunk.as_bytes());
    }
    assert_eq!(assemble(&program), joined);
    assert_eq!(joined.len(), 5 * 3 + 4 * 3 + 5 * 2 + 3 * 2);
}
