use pretty_assertions::assert_eq;
use regvm_asm::decoder::{decode, decode_all};
use regvm_asm::{assemble, encode, parse, DecodeError, Instr};

#[test]
fn every_kind_decodes_to_itself() {
    let regs = [0u8, 1, 31, 62, 63];
    let mut instrs = Vec::new();
    for &a in &regs {
        for &b in &regs {
            instrs.push(Instr::ReadMem { dest: a, base: b, offset: 0x2AAA });
            instrs.push(Instr::Abs { dest: a, base: b });
        }
        for value in [0, 1, 0x555_5555, 268_435_455] {
            instrs.push(Instr::LoadConst { dest: a, value });
        }
        for addr in [0, 10, 0xAA_AAAA, 16_777_215] {
            instrs.push(Instr::WriteMem { addr, src: a });
        }
    }
    for instr in instrs {
        let e = encode(&instr);
        assert_eq!(decode(e.as_bytes()), Ok((instr, e.len())), "{instr}");
    }
}

#[test]
fn whole_image_decodes_in_order() {
    let src = "\
REG[0] = 5
MEM[10] = REG[0]
REG[9] = MEM[REG[0]+77]
REG[10] = abs(MEM[REG[9]])
REG[11] = 268435455
";
    let program = parse(src).unwrap();
    let image = assemble(&program);
    assert_eq!(decode_all(&image).unwrap(), program.instrs);
}

#[test]
fn truncated_image_reports_offset() {
    let program = parse("REG[0] = 5\nMEM[10] = REG[0]").unwrap();
    let image = assemble(&program);
    assert_eq!(
        decode_all(&image[..8]),
        Err(DecodeError::Truncated { offset: 5, need: 5, have: 3 })
    );
}

#[test]
fn garbage_opcode_reports_offset() {
    let mut image = assemble(&parse("REG[1] = abs(MEM[REG[2]])").unwrap());
    image.push(0x3F);
    assert_eq!(
        decode_all(&image),
        Err(DecodeError::UnknownOpcode { offset: 3, opcode: 0x3F })
    );
}
