//! Three-address code generation for the ASL compiler.
//!
//! This crate provides:
//! - `Instr` - the instruction set, one variant per opcode
//! - `Subroutine` / `TacProgram` - the emitted units and the whole program,
//!   with `Display` as the single source of truth for the text form
//! - `CodeGen` - the third tree walk: lowers the decorated tree into
//!   instructions, handling widening, array element access for owned and
//!   by-reference arrays, and the calling convention

pub mod codegen;
pub mod instruction;
pub mod program;

pub use codegen::CodeGen;
pub use instruction::Instr;
pub use program::{Local, Subroutine, TacProgram};

/// Synthetic first parameter carrying a function's return value.
pub const RESULT_PARAM: &str = "_result";
