//! Type interning.

use kura_ir::{Name, TypeId};
use rustc_hash::FxHashMap;

use crate::TypeData;

/// Interner mapping [`TypeData`] to compact [`TypeId`] handles.
///
/// The five non-parameterized types are pre-interned at the fixed indices
/// declared on [`TypeId`]; list and struct types are interned on demand.
pub struct TypeInterner {
    /// Storage indexed by `TypeId`.
    types: Vec<TypeData>,
    /// Reverse map for deduplication.
    map: FxHashMap<TypeData, TypeId>,
}

impl TypeInterner {
    /// Create an interner with the primitive types pre-interned.
    pub fn new() -> Self {
        let types = vec![
            TypeData::Int,
            TypeData::Bool,
            TypeData::Void,
            TypeData::Func,
            TypeData::Error,
        ];
        debug_assert_eq!(types.len() as u32, TypeId::FIRST_DYNAMIC);
        let mut map = FxHashMap::default();
        for (i, data) in types.iter().enumerate() {
            map.insert(data.clone(), TypeId::from_raw(i as u32));
        }
        Self { types, map }
    }

    /// Intern a type, returning its handle.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.push(data.clone());
        self.map.insert(data, id);
        id
    }

    /// Intern a list type with the given element type.
    pub fn list_of(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeData::List(elem))
    }

    /// Intern a struct type with the given name.
    pub fn struct_named(&mut self, name: Name) -> TypeId {
        self.intern(TypeData::Struct(name))
    }

    /// Resolve a handle back to its type data.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this interner.
    #[inline]
    #[track_caller]
    pub fn lookup(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the primitives are pre-interned.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preinterned_primitives() {
        let interner = TypeInterner::new();
        assert_eq!(interner.lookup(TypeId::INT), &TypeData::Int);
        assert_eq!(interner.lookup(TypeId::BOOL), &TypeData::Bool);
        assert_eq!(interner.lookup(TypeId::VOID), &TypeData::Void);
        assert_eq!(interner.lookup(TypeId::FUNC), &TypeData::Func);
        assert_eq!(interner.lookup(TypeId::ERROR), &TypeData::Error);
    }

    #[test]
    fn test_intern_dedup() {
        let mut interner = TypeInterner::new();
        let a = interner.list_of(TypeId::INT);
        let b = interner.list_of(TypeId::INT);
        let c = interner.list_of(TypeId::BOOL);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_nested_list() {
        let mut interner = TypeInterner::new();
        let inner = interner.list_of(TypeId::INT);
        let outer = interner.list_of(inner);
        assert_eq!(interner.lookup(outer), &TypeData::List(inner));
    }

    #[test]
    fn test_intern_primitive_returns_fixed_id() {
        let mut interner = TypeInterner::new();
        assert_eq!(interner.intern(TypeData::Int), TypeId::INT);
        assert_eq!(interner.intern(TypeData::Void), TypeId::VOID);
    }
}
