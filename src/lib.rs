pub mod decoder;
pub mod encoder;
pub mod error;
pub mod field;
pub mod instr;
pub mod isa;
pub mod listing;
pub mod parser;

pub use encoder::{assemble, encode, Encoded};
pub use error::{AsmError, DecodeError, FieldRangeError};
pub use instr::{Instr, Program, Reg};
pub use isa::Kind;
pub use listing::Listing;
pub use parser::parse;
