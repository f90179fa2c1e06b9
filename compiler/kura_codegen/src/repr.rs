//! Representation and boxing policy.
//!
//! Int and Bool values exist in two stack representations: unboxed scalars
//! for arithmetic and branching, boxed references wherever a context stores
//! or passes them generically (list elements, call arguments, struct fields,
//! non-void returns). Which one a context gets is decided purely by the
//! static type of the destination, never by the shape of the source
//! expression. List, function-value and struct values are uniformly
//! references and never cross a boxing boundary.

use kura_ir::TypeId;
use kura_types::TypeData;

use crate::context::CodegenContext;

/// Runtime class wrapping the growable list.
pub const LIST_CLASS: &str = "List";
/// Runtime class carrying a (receiver, member-name) bound function value.
pub const BOUND_FN_CLASS: &str = "BoundFn";

/// Glue boxing an unboxed int into an `Integer` reference.
pub const BOX_INT: &str = "invokestatic java/lang/Integer/valueOf(I)Ljava/lang/Integer;";
/// Glue boxing an unboxed bool into a `Boolean` reference.
pub const BOX_BOOL: &str = "invokestatic java/lang/Boolean/valueOf(Z)Ljava/lang/Boolean;";
/// Glue unboxing an `Integer` reference.
pub const UNBOX_INT: &str = "invokevirtual java/lang/Integer/intValue()I";
/// Glue unboxing a `Boolean` reference.
pub const UNBOX_BOOL: &str = "invokevirtual java/lang/Boolean/booleanValue()Z";

/// Boxing instruction for a scalar type; `None` for reference types.
pub fn box_instr(ty: TypeId) -> Option<&'static str> {
    match ty {
        TypeId::INT => Some(BOX_INT),
        TypeId::BOOL => Some(BOX_BOOL),
        _ => None,
    }
}

/// Unboxing instruction for a scalar type; `None` for reference types.
pub fn unbox_instr(ty: TypeId) -> Option<&'static str> {
    match ty {
        TypeId::INT => Some(UNBOX_INT),
        TypeId::BOOL => Some(UNBOX_BOOL),
        _ => None,
    }
}

/// Runtime class implementing the boxed form of a type.
///
/// # Panics
/// Panics for Void and Error, which have no value representation.
pub fn class_name(ctx: &CodegenContext<'_>, ty: TypeId) -> String {
    match ctx.types.lookup(ty) {
        TypeData::Int => "java/lang/Integer".to_owned(),
        TypeData::Bool => "java/lang/Boolean".to_owned(),
        TypeData::List(_) => LIST_CLASS.to_owned(),
        TypeData::Func => BOUND_FN_CLASS.to_owned(),
        TypeData::Struct(name) => ctx.resolve_name(*name).to_owned(),
        TypeData::Void | TypeData::Error => {
            panic!("codegen invariant: {ty:?} has no runtime class")
        }
    }
}

/// Representation string of a type in signatures and field declarations.
pub fn descriptor(ctx: &CodegenContext<'_>, ty: TypeId) -> String {
    if ty.is_void() {
        "V".to_owned()
    } else {
        format!("L{};", class_name(ctx, ty))
    }
}

/// Instructions leaving the default value of `ty` on the stack, in the
/// unboxed representation for scalars.
///
/// Int → 0, Bool → false, function value → null reference, List → a fresh
/// empty wrapper, Struct → a fresh instance whose initializer in turn
/// defaults its own fields.
pub fn emit_default(ctx: &mut CodegenContext<'_>, ty: TypeId) -> String {
    match ctx.types.lookup(ty) {
        TypeData::Int | TypeData::Bool => "ldc 0\n".to_owned(),
        TypeData::Func => "aconst_null\n".to_owned(),
        TypeData::List(_) => {
            let tmp = ctx.frame.new_temporary();
            let mut code = String::new();
            code.push_str("new java/util/ArrayList\n");
            code.push_str("dup\n");
            code.push_str("invokespecial java/util/ArrayList/<init>()V\n");
            code.push_str(&format!("astore {tmp}\n"));
            code.push_str(&format!("new {LIST_CLASS}\n"));
            code.push_str("dup\n");
            code.push_str(&format!("aload {tmp}\n"));
            code.push_str(&format!(
                "invokespecial {LIST_CLASS}/<init>(Ljava/util/ArrayList;)V\n"
            ));
            ctx.frame.release_temporary();
            code
        }
        TypeData::Struct(name) => {
            let class = ctx.resolve_name(*name).to_owned();
            format!("new {class}\ndup\ninvokespecial {class}/<init>()V\n")
        }
        TypeData::Void | TypeData::Error => {
            panic!("codegen invariant: {ty:?} has no default value")
        }
    }
}
