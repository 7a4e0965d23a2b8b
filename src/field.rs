//! Bit-field descriptors shared by the parser, encoder and decoder.

use crate::error::{AsmError, FieldRangeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub bits: u32,
}

pub const OPCODE: Field = Field { name: "opcode", bits: 6 };
pub const REGISTER: Field = Field { name: "register", bits: 6 };
pub const CONSTANT: Field = Field { name: "constant", bits: 28 };
pub const OFFSET: Field = Field { name: "offset", bits: 14 };
pub const MEM_ADDR: Field = Field { name: "memory address", bits: 24 };

impl Field {
    pub const fn mask(&self) -> u64 {
        (1u64 << self.bits) - 1
    }

    pub const fn max(&self) -> u64 {
        self.mask()
    }

    pub const fn fits(&self, v: u64) -> bool {
        v <= self.max()
    }

    /// Truncate `v` to the field width and place it at bit `shift`.
    pub const fn place(&self, v: u64, shift: u32) -> u64 {
        (v & self.mask()) << shift
    }

    pub fn check_value(&self, v: u64) -> Result<u64, FieldRangeError> {
        if self.fits(v) {
            Ok(v)
        } else {
            Err(FieldRangeError {
                field: self.name,
                value: v,
                max: self.max(),
            })
        }
    }

    /// Parse a decimal literal and check it against the field width.
    /// `lit` must already be known to consist of ASCII digits only.
    pub fn check(&self, line: usize, lit: &str) -> Result<u64, AsmError> {
        let out_of_range = || AsmError::Range {
            line,
            field: self.name,
            value: lit.to_string(),
            max: self.max(),
        };
        // Digits-only literals that overflow u64 are out of range too.
        let v = lit.parse::<u64>().map_err(|_| out_of_range())?;
        if self.fits(v) {
            Ok(v)
        } else {
            Err(out_of_range())
        }
    }
}

/// True for a non-empty run of ASCII digits.
pub fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
