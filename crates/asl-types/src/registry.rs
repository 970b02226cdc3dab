//! Type registry: interned descriptors and structural queries.
//!
//! Every type the compiler ever talks about is interned here once and
//! referred to by `TypeId`. Primitive descriptors are pre-interned
//! singletons; `Array` and `Function` descriptors are interned by field
//! equality, so two structurally equal types always share an id and
//! `TypeId` equality is all the equality the passes need.
//!
//! The `Error` descriptor absorbs errors: rules that see it produce it and
//! suppress further diagnostics for the same root.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Handle to an interned type descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An interned type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Error,
    Void,
    Integer,
    Float,
    Boolean,
    Character,
    Array { size: u32, elem: TypeId },
    Function { params: SmallVec<[TypeId; 4]>, ret: TypeId },
}

/// Comparison families accepted by [`TypeRegistry::comparable_types`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// `==` / `!=`
    Equality,
    /// `<`, `<=`, `>`, `>=`
    Ordering,
}

// Fixed slots for the pre-interned primitives.
const ERROR: TypeId = TypeId(0);
const VOID: TypeId = TypeId(1);
const INTEGER: TypeId = TypeId(2);
const FLOAT: TypeId = TypeId(3);
const BOOLEAN: TypeId = TypeId(4);
const CHARACTER: TypeId = TypeId(5);

/// Owner of all type descriptors for one compilation.
#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<Type>,
    interned: FxHashMap<Type, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        let types = vec![
            Type::Error,
            Type::Void,
            Type::Integer,
            Type::Float,
            Type::Boolean,
            Type::Character,
        ];
        let mut interned = FxHashMap::default();
        for (i, ty) in types.iter().enumerate() {
            interned.insert(ty.clone(), TypeId(i as u32));
        }
        Self { types, interned }
    }

    // Constructors. Primitive constructors return the singleton id; the
    // compound constructors intern by field equality.

    #[must_use]
    pub const fn error_ty(&self) -> TypeId {
        ERROR
    }

    #[must_use]
    pub const fn void_ty(&self) -> TypeId {
        VOID
    }

    #[must_use]
    pub const fn integer_ty(&self) -> TypeId {
        INTEGER
    }

    #[must_use]
    pub const fn float_ty(&self) -> TypeId {
        FLOAT
    }

    #[must_use]
    pub const fn boolean_ty(&self) -> TypeId {
        BOOLEAN
    }

    #[must_use]
    pub const fn character_ty(&self) -> TypeId {
        CHARACTER
    }

    pub fn array_ty(&mut self, size: u32, elem: TypeId) -> TypeId {
        self.intern(Type::Array { size, elem })
    }

    pub fn function_ty(&mut self, params: impl IntoIterator<Item = TypeId>, ret: TypeId) -> TypeId {
        let params: SmallVec<[TypeId; 4]> = params.into_iter().collect();
        self.intern(Type::Function { params, ret })
    }

    fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(&id) = self.interned.get(&ty) {
            return id;
        }
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(ty.clone());
        self.interned.insert(ty, id);
        id
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    // Structural predicates.

    #[must_use]
    pub fn is_error_ty(&self, id: TypeId) -> bool {
        id == ERROR
    }

    #[must_use]
    pub fn is_void_ty(&self, id: TypeId) -> bool {
        id == VOID
    }

    #[must_use]
    pub fn is_integer_ty(&self, id: TypeId) -> bool {
        id == INTEGER
    }

    #[must_use]
    pub fn is_float_ty(&self, id: TypeId) -> bool {
        id == FLOAT
    }

    #[must_use]
    pub fn is_boolean_ty(&self, id: TypeId) -> bool {
        id == BOOLEAN
    }

    #[must_use]
    pub fn is_character_ty(&self, id: TypeId) -> bool {
        id == CHARACTER
    }

    /// Integer or Float.
    #[must_use]
    pub fn is_numeric_ty(&self, id: TypeId) -> bool {
        id == INTEGER || id == FLOAT
    }

    /// Integer, Float, Boolean or Character.
    #[must_use]
    pub fn is_primitive_ty(&self, id: TypeId) -> bool {
        matches!(id, INTEGER | FLOAT | BOOLEAN | CHARACTER)
    }

    #[must_use]
    pub fn is_primitive_non_void_ty(&self, id: TypeId) -> bool {
        self.is_primitive_ty(id)
    }

    #[must_use]
    pub fn is_array_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Array { .. })
    }

    #[must_use]
    pub fn is_function_ty(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Function { .. })
    }

    /// Element type of an array; `Error` when `id` is not an array.
    #[must_use]
    pub fn array_elem_ty(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            Type::Array { elem, .. } => *elem,
            _ => ERROR,
        }
    }

    /// Declared size of an array; 0 when `id` is not an array.
    #[must_use]
    pub fn array_size(&self, id: TypeId) -> u32 {
        match self.get(id) {
            Type::Array { size, .. } => *size,
            _ => 0,
        }
    }

    /// Parameter types of a function; empty when `id` is not a function.
    #[must_use]
    pub fn function_params(&self, id: TypeId) -> &[TypeId] {
        match self.get(id) {
            Type::Function { params, .. } => params,
            _ => &[],
        }
    }

    /// Return type of a function; `Error` when `id` is not a function.
    #[must_use]
    pub fn function_ret_ty(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            Type::Function { ret, .. } => *ret,
            _ => ERROR,
        }
    }

    /// Size in virtual-machine words: 1 for primitives, the declared size
    /// for arrays of primitives.
    #[must_use]
    pub fn size_of(&self, id: TypeId) -> usize {
        match self.get(id) {
            Type::Array { size, .. } => *size as usize,
            _ => 1,
        }
    }

    /// Whether a value of `from` can be stored into a location of `to`:
    /// equal types, or the Integer -> Float widening. Arrays are copyable
    /// only when equal (same element type and size), which interning reduces
    /// to id equality.
    #[must_use]
    pub fn copyable_types(&self, to: TypeId, from: TypeId) -> bool {
        to == from || (to == FLOAT && from == INTEGER)
    }

    /// Whether two types can be compared with the given family of
    /// operators: equality holds for two primitives that are equal or both
    /// numeric; ordering only for two numerics.
    #[must_use]
    pub fn comparable_types(&self, a: TypeId, b: TypeId, cmp: Comparison) -> bool {
        match cmp {
            Comparison::Equality => {
                self.is_primitive_ty(a)
                    && self.is_primitive_ty(b)
                    && (a == b || (self.is_numeric_ty(a) && self.is_numeric_ty(b)))
            }
            Comparison::Ordering => self.is_numeric_ty(a) && self.is_numeric_ty(b),
        }
    }

    /// Human-readable form for logs and diagnostics.
    #[must_use]
    pub fn to_string(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Error => "<error>".to_string(),
            Type::Void => "void".to_string(),
            Type::Integer => "int".to_string(),
            Type::Float => "float".to_string(),
            Type::Boolean => "bool".to_string(),
            Type::Character => "char".to_string(),
            Type::Array { size, elem } => {
                format!("array[{size}] of {}", self.to_string(*elem))
            }
            Type::Function { params, ret } => {
                let params: Vec<String> = params.iter().map(|p| self.to_string(*p)).collect();
                format!("({}) -> {}", params.join(", "), self.to_string(*ret))
            }
        }
    }
}
