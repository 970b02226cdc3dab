//! The three-address instruction set.
//!
//! One variant per opcode, with per-case operand fields. Operands are
//! symbolic: bare variable names, `%tN` temporaries, base-10 integer
//! literals, or character text with the quotes already stripped. An
//! instruction list is a plain `Vec<Instr>`; concatenation is its only
//! composition operator, and labels and jumps carry all control flow.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instr {
    // Memory / data movement
    Load { dst: String, src: String },
    ILoad { dst: String, value: String },
    FLoad { dst: String, value: String },
    ChLoad { dst: String, value: String },
    LoadX { dst: String, base: String, offset: String },
    XLoad { base: String, offset: String, src: String },
    /// Address-of: loads the address of `name` into `dst`.
    ALoad { dst: String, name: String },

    // Integer arithmetic
    Add { dst: String, lhs: String, rhs: String },
    Sub { dst: String, lhs: String, rhs: String },
    Mul { dst: String, lhs: String, rhs: String },
    Div { dst: String, lhs: String, rhs: String },

    // Float arithmetic
    FAdd { dst: String, lhs: String, rhs: String },
    FSub { dst: String, lhs: String, rhs: String },
    FMul { dst: String, lhs: String, rhs: String },
    FDiv { dst: String, lhs: String, rhs: String },

    // Unary and conversion
    Neg { dst: String, src: String },
    FNeg { dst: String, src: String },
    Not { dst: String, src: String },
    Float { dst: String, src: String },

    // Integer comparison (NE/GT/GE are derived with NOT)
    Eq { dst: String, lhs: String, rhs: String },
    Lt { dst: String, lhs: String, rhs: String },
    Le { dst: String, lhs: String, rhs: String },

    // Float comparison (same NOT derivations)
    FEq { dst: String, lhs: String, rhs: String },
    FLt { dst: String, lhs: String, rhs: String },
    FLe { dst: String, lhs: String, rhs: String },

    // Logical
    And { dst: String, lhs: String, rhs: String },
    Or { dst: String, lhs: String, rhs: String },

    // Control flow
    Label(String),
    UJump(String),
    FJump { cond: String, label: String },

    // Calling convention
    /// `PUSH` with no operand reserves the result slot.
    Push(Option<String>),
    /// `POP` with no operand discards.
    Pop(Option<String>),
    Call(String),
    Return,

    // I/O
    ReadI(String),
    ReadF(String),
    ReadC(String),
    WriteI(String),
    WriteF(String),
    WriteC(String),
    WriteLn,
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Load { dst, src } => write!(f, "LOAD {dst}, {src}"),
            Instr::ILoad { dst, value } => write!(f, "ILOAD {dst}, {value}"),
            Instr::FLoad { dst, value } => write!(f, "FLOAD {dst}, {value}"),
            Instr::ChLoad { dst, value } => write!(f, "CHLOAD {dst}, {value}"),
            Instr::LoadX { dst, base, offset } => write!(f, "LOADX {dst}, {base}, {offset}"),
            Instr::XLoad { base, offset, src } => write!(f, "XLOAD {base}, {offset}, {src}"),
            Instr::ALoad { dst, name } => write!(f, "ALOAD {dst}, {name}"),
            Instr::Add { dst, lhs, rhs } => write!(f, "ADD {dst}, {lhs}, {rhs}"),
            Instr::Sub { dst, lhs, rhs } => write!(f, "SUB {dst}, {lhs}, {rhs}"),
            Instr::Mul { dst, lhs, rhs } => write!(f, "MUL {dst}, {lhs}, {rhs}"),
            Instr::Div { dst, lhs, rhs } => write!(f, "DIV {dst}, {lhs}, {rhs}"),
            Instr::FAdd { dst, lhs, rhs } => write!(f, "FADD {dst}, {lhs}, {rhs}"),
            Instr::FSub { dst, lhs, rhs } => write!(f, "FSUB {dst}, {lhs}, {rhs}"),
            Instr::FMul { dst, lhs, rhs } => write!(f, "FMUL {dst}, {lhs}, {rhs}"),
            Instr::FDiv { dst, lhs, rhs } => write!(f, "FDIV {dst}, {lhs}, {rhs}"),
            Instr::Neg { dst, src } => write!(f, "NEG {dst}, {src}"),
            Instr::FNeg { dst, src } => write!(f, "FNEG {dst}, {src}"),
            Instr::Not { dst, src } => write!(f, "NOT {dst}, {src}"),
            Instr::Float { dst, src } => write!(f, "FLOAT {dst}, {src}"),
            Instr::Eq { dst, lhs, rhs } => write!(f, "EQ {dst}, {lhs}, {rhs}"),
            Instr::Lt { dst, lhs, rhs } => write!(f, "LT {dst}, {lhs}, {rhs}"),
            Instr::Le { dst, lhs, rhs } => write!(f, "LE {dst}, {lhs}, {rhs}"),
            Instr::FEq { dst, lhs, rhs } => write!(f, "FEQ {dst}, {lhs}, {rhs}"),
            Instr::FLt { dst, lhs, rhs } => write!(f, "FLT {dst}, {lhs}, {rhs}"),
            Instr::FLe { dst, lhs, rhs } => write!(f, "FLE {dst}, {lhs}, {rhs}"),
            Instr::And { dst, lhs, rhs } => write!(f, "AND {dst}, {lhs}, {rhs}"),
            Instr::Or { dst, lhs, rhs } => write!(f, "OR {dst}, {lhs}, {rhs}"),
            Instr::Label(label) => write!(f, "LABEL {label}"),
            Instr::UJump(label) => write!(f, "UJUMP {label}"),
            Instr::FJump { cond, label } => write!(f, "FJUMP {cond}, {label}"),
            Instr::Push(Some(value)) => write!(f, "PUSH {value}"),
            Instr::Push(None) => write!(f, "PUSH"),
            Instr::Pop(Some(dst)) => write!(f, "POP {dst}"),
            Instr::Pop(None) => write!(f, "POP"),
            Instr::Call(name) => write!(f, "CALL {name}"),
            Instr::Return => write!(f, "RETURN"),
            Instr::ReadI(dst) => write!(f, "READI {dst}"),
            Instr::ReadF(dst) => write!(f, "READF {dst}"),
            Instr::ReadC(dst) => write!(f, "READC {dst}"),
            Instr::WriteI(src) => write!(f, "WRITEI {src}"),
            Instr::WriteF(src) => write!(f, "WRITEF {src}"),
            Instr::WriteC(src) => write!(f, "WRITEC {src}"),
            Instr::WriteLn => write!(f, "WRITELN"),
        }
    }
}
