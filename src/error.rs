#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: unrecognized statement `{text}`")]
    Syntax { line: usize, text: String },
    #[error("line {line}: {field} {value} out of range (0..={max})")]
    Range {
        line: usize,
        field: &'static str,
        value: String,
        max: u64,
    },
}

impl AsmError {
    pub fn line(&self) -> usize {
        match self {
            AsmError::Syntax { line, .. } | AsmError::Range { line, .. } => *line,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown opcode {opcode} at byte {offset}")]
    UnknownOpcode { offset: usize, opcode: u8 },
    #[error("truncated instruction at byte {offset}: need {need} bytes, have {have}")]
    Truncated { offset: usize, need: usize, have: usize },
}

/// A field value outside its bit width, found outside of source parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {value} out of range (0..={max})")]
pub struct FieldRangeError {
    pub field: &'static str,
    pub value: u64,
    pub max: u64,
}
