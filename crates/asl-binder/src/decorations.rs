//! Per-node semantic attributes, stored as side tables keyed by `NodeIndex`.
//!
//! The symbol pass writes scope ids and declared types; the type-check pass
//! writes expression types and l-value flags. Within a pass each attribute
//! is set at most once per node.

use rustc_hash::FxHashMap;

use asl_parser::NodeIndex;
use asl_types::TypeId;

use crate::symbol_table::ScopeId;

#[derive(Debug, Default)]
pub struct Decorations {
    scopes: FxHashMap<NodeIndex, ScopeId>,
    types: FxHashMap<NodeIndex, TypeId>,
    lvalues: FxHashMap<NodeIndex, bool>,
}

impl Decorations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scope(&mut self, node: NodeIndex, scope: ScopeId) {
        self.scopes.insert(node, scope);
    }

    #[must_use]
    pub fn scope_of(&self, node: NodeIndex) -> Option<ScopeId> {
        self.scopes.get(&node).copied()
    }

    pub fn set_type(&mut self, node: NodeIndex, ty: TypeId) {
        self.types.insert(node, ty);
    }

    #[must_use]
    pub fn type_of(&self, node: NodeIndex) -> Option<TypeId> {
        self.types.get(&node).copied()
    }

    pub fn set_lvalue(&mut self, node: NodeIndex, lvalue: bool) {
        self.lvalues.insert(node, lvalue);
    }

    /// L-value flag of a node; nodes never decorated are not l-values.
    #[must_use]
    pub fn is_lvalue(&self, node: NodeIndex) -> bool {
        self.lvalues.get(&node).copied().unwrap_or(false)
    }
}
