//! Interned type descriptors for the ASL compiler.
//!
//! This crate provides:
//! - `TypeId` - a copyable handle into the registry
//! - `TypeRegistry` - interning of primitive, array and function types, so
//!   that id equality is structural equality
//! - the structural predicates the checker and the code generator rely on
//!   (`is_numeric`, `copyable_types`, `comparable_types`, `size_of`, ...)

pub mod registry;

pub use registry::{Comparison, Type, TypeId, TypeRegistry};
