//! Scopes and the scope stack.
//!
//! Scopes live in a table owned by `SymbolTable` and reference their parent
//! by id, never by pointer. Popping a scope deactivates it without
//! destroying it: decorations hold `ScopeId`s and later passes re-enter
//! scopes with [`SymbolTable::push_scope`].

use indexmap::IndexMap;
use tracing::debug;

use asl_types::{TypeId, TypeRegistry};

/// Handle to a scope in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

impl ScopeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Classification of a symbol table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    LocalVar,
    Parameter,
    Function,
}

#[derive(Clone, Debug)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub ty: TypeId,
}

/// A named frame of declarations. Entry order is insertion order, so
/// parameters keep their declaration order.
#[derive(Debug)]
pub struct Scope {
    pub name: String,
    pub parent: Option<ScopeId>,
    entries: IndexMap<String, Symbol>,
}

impl Scope {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Symbol)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The scope table plus the push-down stack of active scopes.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    stack: Vec<ScopeId>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope whose parent is the current top of stack, push it,
    /// and return its id.
    pub fn push_new_scope(&mut self, name: &str) -> ScopeId {
        let parent = self.stack.last().copied();
        let id = ScopeId(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(Scope {
            name: name.to_string(),
            parent,
            entries: IndexMap::new(),
        });
        self.stack.push(id);
        debug!(scope = name, id = id.0, "pushed new scope");
        id
    }

    /// Re-enter an existing scope (later passes walk the tree again).
    pub fn push_scope(&mut self, id: ScopeId) {
        self.stack.push(id);
    }

    pub fn pop_scope(&mut self) {
        self.stack.pop();
    }

    #[must_use]
    pub fn current_scope(&self) -> Option<ScopeId> {
        self.stack.last().copied()
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    fn add(&mut self, name: &str, kind: SymbolKind, ty: TypeId) {
        let Some(&top) = self.stack.last() else {
            return;
        };
        let scope = &mut self.scopes[top.index()];
        // First declaration wins; redeclaration is the caller's diagnostic.
        scope
            .entries
            .entry(name.to_string())
            .or_insert(Symbol { kind, ty });
    }

    pub fn add_local_var(&mut self, name: &str, ty: TypeId) {
        self.add(name, SymbolKind::LocalVar, ty);
    }

    pub fn add_parameter(&mut self, name: &str, ty: TypeId) {
        self.add(name, SymbolKind::Parameter, ty);
    }

    pub fn add_function(&mut self, name: &str, ty: TypeId) {
        self.add(name, SymbolKind::Function, ty);
    }

    /// Whether `name` is declared in the scope at the top of the stack.
    #[must_use]
    pub fn contains_in_current(&self, name: &str) -> bool {
        self.stack
            .last()
            .is_some_and(|&top| self.scopes[top.index()].get(name).is_some())
    }

    /// Search the stack from the top; returns the stack index of the frame
    /// declaring `name`.
    #[must_use]
    pub fn find_in_stack(&self, name: &str) -> Option<usize> {
        self.stack
            .iter()
            .rposition(|&id| self.scopes[id.index()].get(name).is_some())
    }

    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.stack
            .iter()
            .rev()
            .find_map(|&id| self.scopes[id.index()].get(name))
    }

    /// Type of the innermost visible declaration of `name`.
    #[must_use]
    pub fn type_of(&self, name: &str) -> Option<TypeId> {
        self.lookup(name).map(|symbol| symbol.ty)
    }

    #[must_use]
    pub fn is_local_var(&self, name: &str) -> bool {
        self.lookup(name)
            .is_some_and(|symbol| symbol.kind == SymbolKind::LocalVar)
    }

    #[must_use]
    pub fn is_parameter(&self, name: &str) -> bool {
        self.lookup(name)
            .is_some_and(|symbol| symbol.kind == SymbolKind::Parameter)
    }

    #[must_use]
    pub fn is_function(&self, name: &str) -> bool {
        self.lookup(name)
            .is_some_and(|symbol| symbol.kind == SymbolKind::Function)
    }

    /// Whether a function named `main` with no parameters and a void return
    /// type exists in the bottom scope of the stack.
    #[must_use]
    pub fn main_properly_declared(&self, types: &TypeRegistry) -> bool {
        let Some(&bottom) = self.stack.first() else {
            return false;
        };
        let Some(symbol) = self.scopes[bottom.index()].get("main") else {
            return false;
        };
        symbol.kind == SymbolKind::Function
            && types.is_function_ty(symbol.ty)
            && types.function_params(symbol.ty).is_empty()
            && types.is_void_ty(types.function_ret_ty(symbol.ty))
    }
}
