//! Symbol table and symbol pass for the ASL compiler.
//!
//! This crate provides:
//! - `SymbolTable` - the scope stack: named scopes holding classified
//!   entries (local variables, parameters, functions)
//! - `Decorations` - per-node side tables for scope ids, types and l-value
//!   flags, keyed by `NodeIndex`
//! - `Binder` - the first tree walk: builds the scopes, resolves declared
//!   types, detects redeclarations

pub mod binder;
pub mod decorations;
pub mod symbol_table;

pub use binder::Binder;
pub use decorations::Decorations;
pub use symbol_table::{Scope, ScopeId, Symbol, SymbolKind, SymbolTable};

/// Name of the scope holding all function symbols.
pub const GLOBAL_SCOPE_NAME: &str = "$global$";
