use std::fmt;

use crate::encoder::{encode, Encoded};
use crate::instr::{Instr, Program};

/// `A=<opcode>, B=.., C=..` with letters in word-layout order.
pub fn fmt_fields(instr: &Instr) -> String {
    instr
        .operands()
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{}={}", char::from(b'A' + i as u8), v))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn fmt_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:#04X}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub index: usize,
    pub instr: Instr,
    pub encoded: Encoded,
}

/// Diagnostic view of an assembled program.
#[derive(Debug, Clone)]
pub struct Listing {
    pub entries: Vec<Entry>,
}

impl Listing {
    pub fn new(program: &Program) -> Self {
        let entries = program
            .iter()
            .enumerate()
            .map(|(index, instr)| Entry {
                index,
                instr: *instr,
                encoded: encode(instr),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} -> {}",
            self.index,
            self.instr.kind().mnemonic(),
            fmt_fields(&self.instr),
            fmt_bytes(self.encoded.as_bytes())
        )
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.entries {
            writeln!(f, "{e}")?;
        }
        write!(f, "instructions: {}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_two_digits_upper() {
        assert_eq!(fmt_bytes(&[0x0a, 0xff, 0x00]), "0x0A, 0xFF, 0x00");
        assert_eq!(fmt_bytes(&[]), "");
    }

    #[test]
    fn field_letters_follow_layout() {
        let s = fmt_fields(&Instr::ReadMem { dest: 1, base: 2, offset: 300 });
        assert_eq!(s, "A=19, B=1, C=2, D=300");
    }
}
