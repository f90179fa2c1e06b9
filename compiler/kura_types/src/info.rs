//! Resolved program info: the oracle code generation reads.
//!
//! Produced by upstream name resolution and type checking, which have already
//! validated the whole program. Lookups for names that genuinely occur in the
//! checked AST are therefore total; a miss is an internal invariant
//! violation, not a user-facing error, and panics.

use kura_ir::{ExprId, Name, TypeId};
use rustc_hash::FxHashMap;

/// Resolved signature of a function or method.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionSig {
    /// Parameter types in declaration order.
    pub params: Vec<TypeId>,
    /// Return type; `TypeId::VOID` for procedures.
    pub ret: TypeId,
}

impl FunctionSig {
    pub fn new(params: Vec<TypeId>, ret: TypeId) -> Self {
        FunctionSig { params, ret }
    }
}

/// What a struct member name denotes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberKind {
    /// A stored field with its declared type.
    Field(TypeId),
    /// A method; accessing it forms a bound function value.
    Method,
}

/// Resolved layout of one struct.
#[derive(Clone, Debug, Default)]
pub struct StructInfo {
    /// Fields in declaration order.
    pub fields: Vec<(Name, TypeId)>,
    /// Method signatures keyed by method name.
    pub methods: FxHashMap<Name, FunctionSig>,
}

impl StructInfo {
    /// Declared type of a field, if `name` is a field.
    pub fn field_type(&self, name: Name) -> Option<TypeId> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|&(_, ty)| ty)
    }

    /// Whether `name` is a method of this struct.
    pub fn is_method(&self, name: Name) -> bool {
        self.methods.contains_key(&name)
    }

    /// Resolved signature of a method, if `name` is one.
    pub fn method_sig(&self, name: Name) -> Option<&FunctionSig> {
        self.methods.get(&name)
    }
}

/// Everything upstream checking resolved about one program.
///
/// Code generation consults this for the static type of any expression node
/// and for function/struct shapes; it never infers types itself.
#[derive(Default)]
pub struct ProgramInfo {
    /// Static type per expression, indexed by `ExprId`.
    expr_types: Vec<TypeId>,
    /// Free function signatures keyed by function name.
    functions: FxHashMap<Name, FunctionSig>,
    /// Struct layouts and method tables keyed by struct name.
    structs: FxHashMap<Name, StructInfo>,
}

impl ProgramInfo {
    /// Create an empty info table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the static type of an expression.
    pub fn set_expr_type(&mut self, id: ExprId, ty: TypeId) {
        if self.expr_types.len() <= id.index() {
            self.expr_types.resize(id.index() + 1, TypeId::ERROR);
        }
        self.expr_types[id.index()] = ty;
    }

    /// The static type of an expression.
    ///
    /// # Panics
    /// Panics if no type was recorded for `id`; the checker records one for
    /// every expression it accepts.
    #[inline]
    #[track_caller]
    pub fn expr_type(&self, id: ExprId) -> TypeId {
        match self.expr_types.get(id.index()) {
            Some(&ty) if ty != TypeId::ERROR => ty,
            _ => panic!("codegen invariant: no resolved type for {id:?}"),
        }
    }

    /// Register a free function's resolved signature.
    pub fn declare_function(&mut self, name: Name, sig: FunctionSig) {
        self.functions.insert(name, sig);
    }

    /// Resolved signature of a free function, if `name` is one.
    ///
    /// Identifier reads use the `None` case to distinguish variables from
    /// function references, so this lookup is fallible by design.
    pub fn function_sig(&self, name: Name) -> Option<&FunctionSig> {
        self.functions.get(&name)
    }

    /// Whether `name` denotes a declared free function.
    pub fn is_function(&self, name: Name) -> bool {
        self.functions.contains_key(&name)
    }

    /// Register a struct's resolved layout.
    pub fn declare_struct(&mut self, name: Name, info: StructInfo) {
        self.structs.insert(name, info);
    }

    /// Resolved layout of a struct.
    ///
    /// # Panics
    /// Panics if `name` is not a declared struct.
    #[track_caller]
    pub fn struct_info(&self, name: Name) -> &StructInfo {
        match self.structs.get(&name) {
            Some(info) => info,
            None => panic!("codegen invariant: unknown struct {name:?}"),
        }
    }

    /// Resolve what a member name denotes on the given struct.
    ///
    /// # Panics
    /// Panics if the member is neither a field nor a method; the checker
    /// rejects such accesses.
    #[track_caller]
    pub fn member_kind(&self, strct: Name, member: Name) -> MemberKind {
        let info = self.struct_info(strct);
        if let Some(ty) = info.field_type(member) {
            MemberKind::Field(ty)
        } else if info.is_method(member) {
            MemberKind::Method
        } else {
            panic!("codegen invariant: unknown member {member:?} on struct {strct:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expr_type_roundtrip() {
        let mut info = ProgramInfo::new();
        info.set_expr_type(ExprId::new(3), TypeId::BOOL);
        assert_eq!(info.expr_type(ExprId::new(3)), TypeId::BOOL);
    }

    #[test]
    #[should_panic(expected = "codegen invariant")]
    fn test_expr_type_missing_panics() {
        let info = ProgramInfo::new();
        let _ = info.expr_type(ExprId::new(0));
    }

    #[test]
    fn test_function_lookup() {
        let mut info = ProgramInfo::new();
        let name = Name::from_raw(7);
        info.declare_function(name, FunctionSig::new(vec![TypeId::INT], TypeId::VOID));
        assert!(info.is_function(name));
        assert!(!info.is_function(Name::from_raw(8)));
        let sig = info.function_sig(name);
        assert_eq!(sig.map(|s| s.ret), Some(TypeId::VOID));
    }

    #[test]
    fn test_member_kind() {
        let mut info = ProgramInfo::new();
        let strct = Name::from_raw(1);
        let field = Name::from_raw(2);
        let method = Name::from_raw(3);
        let mut si = StructInfo::default();
        si.fields.push((field, TypeId::INT));
        si.methods
            .insert(method, FunctionSig::new(vec![], TypeId::VOID));
        info.declare_struct(strct, si);

        assert_eq!(info.member_kind(strct, field), MemberKind::Field(TypeId::INT));
        assert_eq!(info.member_kind(strct, method), MemberKind::Method);
    }

    #[test]
    #[should_panic(expected = "unknown member")]
    fn test_member_kind_missing_panics() {
        let mut info = ProgramInfo::new();
        let strct = Name::from_raw(1);
        info.declare_struct(strct, StructInfo::default());
        let _ = info.member_kind(strct, Name::from_raw(9));
    }
}
