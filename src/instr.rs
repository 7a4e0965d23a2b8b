use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FieldRangeError;
use crate::field::{CONSTANT, MEM_ADDR, OFFSET, REGISTER};
use crate::isa::Kind;

/// Register index, `REG[n]` with n < 64.
pub type Reg = u8;

/// One parsed statement. Field values are range-checked by the parser and
/// on deserialization; the encoder only masks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[serde(try_from = "RawInstr")]
pub enum Instr {
    /// `REG[dest] = value`
    LoadConst { dest: Reg, value: u32 },
    /// `REG[dest] = MEM[REG[base]+offset]`
    ReadMem { dest: Reg, base: Reg, offset: u16 },
    /// `MEM[addr] = REG[src]`
    WriteMem { addr: u32, src: Reg },
    /// `REG[dest] = abs(MEM[REG[base]])`
    Abs { dest: Reg, base: Reg },
}

impl Instr {
    pub fn kind(&self) -> Kind {
        match self {
            Instr::LoadConst { .. } => Kind::LoadConst,
            Instr::ReadMem { .. } => Kind::ReadMem,
            Instr::WriteMem { .. } => Kind::WriteMem,
            Instr::Abs { .. } => Kind::Abs,
        }
    }

    pub fn opcode(&self) -> u8 {
        self.kind().opcode()
    }

    /// Field values in [`Kind::layout`] order, opcode first.
    pub fn operands(&self) -> Vec<u64> {
        let op = u64::from(self.opcode());
        match *self {
            Instr::LoadConst { dest, value } => vec![op, value.into(), dest.into()],
            Instr::ReadMem { dest, base, offset } => {
                vec![op, dest.into(), base.into(), offset.into()]
            }
            Instr::WriteMem { addr, src } => vec![op, addr.into(), src.into()],
            Instr::Abs { dest, base } => vec![op, dest.into(), base.into()],
        }
    }

    /// Rebuild a record from layout-ordered values. The opcode slot is
    /// ignored, missing values read as zero and every value is assumed to be
    /// masked to its width already.
    pub fn from_operands(kind: Kind, ops: &[u64]) -> Self {
        let at = |i: usize| ops.get(i).copied().unwrap_or(0);
        match kind {
            Kind::LoadConst => Instr::LoadConst {
                value: at(1) as u32,
                dest: at(2) as Reg,
            },
            Kind::ReadMem => Instr::ReadMem {
                dest: at(1) as Reg,
                base: at(2) as Reg,
                offset: at(3) as u16,
            },
            Kind::WriteMem => Instr::WriteMem {
                addr: at(1) as u32,
                src: at(2) as Reg,
            },
            Kind::Abs => Instr::Abs {
                dest: at(1) as Reg,
                base: at(2) as Reg,
            },
        }
    }
}

/// Unchecked wire shape of [`Instr`].
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawInstr {
    LoadConst { dest: u64, value: u64 },
    ReadMem { dest: u64, base: u64, offset: u64 },
    WriteMem { addr: u64, src: u64 },
    Abs { dest: u64, base: u64 },
}

impl TryFrom<RawInstr> for Instr {
    type Error = FieldRangeError;

    fn try_from(raw: RawInstr) -> Result<Self, Self::Error> {
        let reg = |v| REGISTER.check_value(v).map(|v| v as Reg);
        let instr = match raw {
            RawInstr::LoadConst { dest, value } => Instr::LoadConst {
                dest: reg(dest)?,
                value: CONSTANT.check_value(value)? as u32,
            },
            RawInstr::ReadMem { dest, base, offset } => Instr::ReadMem {
                dest: reg(dest)?,
                base: reg(base)?,
                offset: OFFSET.check_value(offset)? as u16,
            },
            RawInstr::WriteMem { addr, src } => Instr::WriteMem {
                addr: MEM_ADDR.check_value(addr)? as u32,
                src: reg(src)?,
            },
            RawInstr::Abs { dest, base } => Instr::Abs {
                dest: reg(dest)?,
                base: reg(base)?,
            },
        };
        Ok(instr)
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instr::LoadConst { dest, value } => write!(f, "REG[{dest}] = {value}"),
            Instr::ReadMem { dest, base, offset } => {
                write!(f, "REG[{dest}] = MEM[REG[{base}]+{offset}]")
            }
            Instr::WriteMem { addr, src } => write!(f, "MEM[{addr}] = REG[{src}]"),
            Instr::Abs { dest, base } => write!(f, "REG[{dest}] = abs(MEM[REG[{base}]])"),
        }
    }
}

/// Instructions in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    pub instrs: Vec<Instr>,
}

impl Program {
    pub fn new(instrs: Vec<Instr>) -> Self {
        Self { instrs }
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instr> {
        self.instrs.iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instr;
    type IntoIter = std::slice::Iter<'a, Instr>;

    fn into_iter(self) -> Self::IntoIter {
        self.instrs.iter()
    }
}

impl From<Vec<Instr>> for Program {
    fn from(instrs: Vec<Instr>) -> Self {
        Self { instrs }
    }
}
