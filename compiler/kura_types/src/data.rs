//! Interned type representation.

use kura_ir::{Name, TypeId};

/// The static type of a value.
///
/// List element types are themselves interned, so arbitrarily nested list
/// types stay cheap to compare: two types are equal iff their `TypeId`s are.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    /// Machine integer. Unboxed on the operand stack, boxed in reference
    /// contexts.
    Int,
    /// Machine boolean. Unboxed on the operand stack, boxed in reference
    /// contexts.
    Bool,
    /// Absence of a value; only valid as a return type.
    Void,
    /// First-class function reference; a bound function value at runtime.
    Func,
    /// Poison type from upstream checking. Never reaches code generation.
    Error,
    /// Growable ordered sequence of boxed elements, held by reference.
    List(TypeId),
    /// Named struct instance, held by reference.
    Struct(Name),
}

impl TypeData {
    /// Whether values of this type are uniformly references (never boxed or
    /// unboxed at representation boundaries).
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            TypeData::Func | TypeData::List(_) | TypeData::Struct(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_classification() {
        assert!(TypeData::Func.is_reference());
        assert!(TypeData::List(TypeId::INT).is_reference());
        assert!(TypeData::Struct(Name::EMPTY).is_reference());
        assert!(!TypeData::Int.is_reference());
        assert!(!TypeData::Bool.is_reference());
        assert!(!TypeData::Void.is_reference());
    }
}
