//! Type-check pass for the ASL compiler.
//!
//! The second tree walk: computes a type and an l-value flag for every
//! expression node, validates statements, and emits semantic diagnostics.
//! The `Error` type absorbs errors - rules that see it on an operand skip
//! the checks that would only fire because of it, so one mistake produces
//! one diagnostic.

mod checker;
mod expressions;

pub use checker::Checker;
