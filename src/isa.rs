use serde::{Deserialize, Serialize};

use crate::field::{Field, CONSTANT, MEM_ADDR, OFFSET, OPCODE, REGISTER};

/// Instruction variants known to the VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    LoadConst,
    ReadMem,
    WriteMem,
    Abs,
}

/// A field placed at a bit offset of the instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub field: Field,
    pub shift: u32,
}

const fn slot(field: Field, shift: u32) -> Slot {
    Slot { field, shift }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub kind: Kind,
    pub mnemonic: &'static str,
    pub opcode: u8,
    /// Encoded length in bytes.
    pub len: usize,
    pub syntax: &'static str,
    /// Word layout, low to high. The first slot is always the opcode.
    pub layout: &'static [Slot],
}

/// Instruction table. Order is the parser's matching priority.
pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        kind: Kind::LoadConst,
        mnemonic: "load_const",
        opcode: 33,
        len: 5,
        syntax: "REG[d] = <const>",
        layout: &[slot(OPCODE, 0), slot(CONSTANT, 6), slot(REGISTER, 34)],
    },
    InstrDesc {
        kind: Kind::ReadMem,
        mnemonic: "read_mem",
        opcode: 19,
        len: 4,
        syntax: "REG[d] = MEM[REG[b]+<offset>]",
        layout: &[
            slot(OPCODE, 0),
            slot(REGISTER, 6),
            slot(REGISTER, 12),
            slot(OFFSET, 18),
        ],
    },
    InstrDesc {
        kind: Kind::WriteMem,
        mnemonic: "write_mem",
        opcode: 58,
        len: 5,
        syntax: "MEM[<addr>] = REG[s]",
        layout: &[slot(OPCODE, 0), slot(MEM_ADDR, 6), slot(REGISTER, 30)],
    },
    InstrDesc {
        kind: Kind::Abs,
        mnemonic: "abs",
        opcode: 26,
        len: 3,
        syntax: "REG[d] = abs(MEM[REG[b]])",
        layout: &[slot(OPCODE, 0), slot(REGISTER, 6), slot(REGISTER, 12)],
    },
];

impl Kind {
    pub fn desc(self) -> &'static InstrDesc {
        match self {
            Kind::LoadConst => &TABLE[0],
            Kind::ReadMem => &TABLE[1],
            Kind::WriteMem => &TABLE[2],
            Kind::Abs => &TABLE[3],
        }
    }

    pub fn opcode(self) -> u8 {
        self.desc().opcode
    }

    pub fn len(self) -> usize {
        self.desc().len
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn layout(self) -> &'static [Slot] {
        self.desc().layout
    }
}

pub fn by_opcode(opcode: u8) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.opcode == opcode)
}
