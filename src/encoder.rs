//! Back end: bit-packs records into fixed-length little-endian chunks.

use tracing::debug;

use crate::instr::{Instr, Program};

/// One encoded instruction. Length is fixed by the instruction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    word: u64,
    bytes: [u8; 8],
    len: usize,
}

impl Encoded {
    /// The packed instruction word before byte emission.
    pub fn word(&self) -> u64 {
        self.word
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    // Never zero: every kind encodes to 3..=5 bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Pack the record's fields into one word, lowest field first.
/// Every field is masked to its width, so nothing can spill into a neighbour.
pub fn pack(instr: &Instr) -> u64 {
    instr
        .kind()
        .layout()
        .iter()
        .zip(instr.operands())
        .fold(0u64, |word, (slot, v)| word | slot.field.place(v, slot.shift))
}

pub fn encode(instr: &Instr) -> Encoded {
    let word = pack(instr);
    let len = instr.kind().len();
    Encoded {
        word,
        bytes: word.to_le_bytes(),
        len,
    }
}

/// Per-instruction chunks, in program order.
pub fn encode_program(program: &Program) -> Vec<Encoded> {
    program.iter().map(encode).collect()
}

/// The raw binary image: chunks concatenated with no padding.
pub fn assemble(program: &Program) -> Vec<u8> {
    let mut out = Vec::new();
    for enc in encode_program(program) {
        out.extend_from_slice(enc.as_bytes());
    }
    debug!(instrs = program.len(), bytes = out.len(), "assembled");
    out
}
