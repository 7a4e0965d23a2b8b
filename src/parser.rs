//! Front end: source text to [`Program`].
//!
//! Every statement has the shape `left = right`. The surface forms are tried
//! in [`isa::TABLE`](crate::isa::TABLE) order and the first one whose shape
//! matches builds the record. A shape match followed by an oversized literal
//! is a range error, not a fallthrough to the next form.

use tracing::{debug, trace};

use crate::error::AsmError;
use crate::field::{self, is_decimal};
use crate::instr::{Instr, Program, Reg};
use crate::isa::{Kind, TABLE};

/// Parse a complete source text. The first bad line aborts the whole parse.
pub fn parse(src: &str) -> Result<Program, AsmError> {
    let mut instrs = Vec::new();
    for (i, line) in src.lines().enumerate() {
        if let Some(instr) = parse_line(i + 1, line)? {
            instrs.push(instr);
        }
    }
    debug!(count = instrs.len(), "parsed program");
    Ok(Program::new(instrs))
}

/// Parse one physical line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Instr>, AsmError> {
    let s = line.trim();
    if s.is_empty() || s.starts_with('#') {
        trace!(line = line_no, "skip");
        return Ok(None);
    }
    let syntax = || AsmError::Syntax {
        line: line_no,
        text: s.to_string(),
    };

    let (left, right) = s.split_once('=').ok_or_else(syntax)?;
    let (left, right) = (left.trim(), right.trim());
    if right.contains('=') {
        return Err(syntax());
    }

    for desc in TABLE {
        if let Some(instr) = match_form(desc.kind, line_no, left, right)? {
            debug!(line = line_no, mnemonic = desc.mnemonic, %instr, "parsed");
            return Ok(Some(instr));
        }
    }
    Err(syntax())
}

fn match_form(kind: Kind, line: usize, left: &str, right: &str) -> Result<Option<Instr>, AsmError> {
    let instr = match kind {
        Kind::LoadConst => {
            let Some(dest) = parse_reg(left) else { return Ok(None) };
            if !is_decimal(right) {
                return Ok(None);
            }
            let value = field::CONSTANT.check(line, right)? as u32;
            Instr::LoadConst { dest, value }
        }
        Kind::ReadMem => {
            let Some(dest) = parse_reg(left) else { return Ok(None) };
            let Some((base, offset)) = bracketed(right, "MEM[", "]").and_then(|inner| inner.split_once('+'))
            else {
                return Ok(None);
            };
            let (Some(base), offset) = (parse_reg(base), offset.trim()) else { return Ok(None) };
            if !is_decimal(offset) {
                return Ok(None);
            }
            let offset = field::OFFSET.check(line, offset)? as u16;
            Instr::ReadMem { dest, base, offset }
        }
        Kind::WriteMem => {
            let Some(addr) = bracketed(left, "MEM[", "]").filter(|a| is_decimal(a)) else {
                return Ok(None);
            };
            let Some(src) = parse_reg(right) else { return Ok(None) };
            let addr = field::MEM_ADDR.check(line, addr)? as u32;
            Instr::WriteMem { addr, src }
        }
        Kind::Abs => {
            let Some(dest) = parse_reg(left) else { return Ok(None) };
            let Some(base) = bracketed(right, "abs(MEM[", "])").and_then(parse_reg) else {
                return Ok(None);
            };
            Instr::Abs { dest, base }
        }
    };
    Ok(Some(instr))
}

/// `REG[n]` with n in 0..64; any other shape is not a register.
fn parse_reg(s: &str) -> Option<Reg> {
    let n = bracketed(s.trim(), "REG[", "]")?;
    if !is_decimal(n) {
        return None;
    }
    let n = n.parse::<u64>().ok()?;
    field::REGISTER.fits(n).then_some(n as Reg)
}

fn bracketed<'a>(s: &'a str, open: &str, close: &str) -> Option<&'a str> {
    s.strip_prefix(open)?.strip_suffix(close).map(str::trim)
}
