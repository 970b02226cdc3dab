//! Typed AST and recursive-descent parser for the ASL compiler.
//!
//! This crate provides:
//! - the AST node types, each semantically interesting node carrying a
//!   stable `NodeIndex` that the later passes key their side tables on
//! - `parse` - the recursive-descent parser, producing a `Program` plus
//!   front-end diagnostics (lexical and syntactic)

pub mod ast;
pub mod parser;

pub use ast::NodeIndex;
pub use parser::{ParseOutput, parse};
