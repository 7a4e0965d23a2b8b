//! Inverse of the encoder's bit layout.
//!
//! The opcode sits in the low 6 bits of the first byte of every chunk, which
//! is enough to find the chunk length and walk a whole image.

use bitvec::prelude::*;

use crate::error::DecodeError;
use crate::field;
use crate::instr::Instr;
use crate::isa;

/// Decode the chunk at the start of `bytes`. Returns the record and the
/// number of bytes it occupied.
pub fn decode(bytes: &[u8]) -> Result<(Instr, usize), DecodeError> {
    decode_at(bytes, 0)
}

/// Decode a complete image back into records.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Instr>, DecodeError> {
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let (instr, len) = decode_at(bytes, offset)?;
        out.push(instr);
        offset += len;
    }
    Ok(out)
}

fn decode_at(bytes: &[u8], offset: usize) -> Result<(Instr, usize), DecodeError> {
    let rest = bytes.get(offset..).unwrap_or_default();
    let Some(&first) = rest.first() else {
        return Err(DecodeError::Truncated { offset, need: 1, have: 0 });
    };
    let opcode = first & field::OPCODE.mask() as u8;
    let desc = isa::by_opcode(opcode).ok_or(DecodeError::UnknownOpcode { offset, opcode })?;
    if rest.len() < desc.len {
        return Err(DecodeError::Truncated {
            offset,
            need: desc.len,
            have: rest.len(),
        });
    }

    let bits = rest[..desc.len].view_bits::<Lsb0>();
    let ops: Vec<u64> = desc
        .layout
        .iter()
        .map(|s| {
            let lo = s.shift as usize;
            bits[lo..lo + s.field.bits as usize].load_le::<u64>()
        })
        .collect();
    Ok((Instr::from_operands(desc.kind, &ops), desc.len))
}
