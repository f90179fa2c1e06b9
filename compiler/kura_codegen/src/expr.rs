//! Expression lowering.
//!
//! Every function here returns an instruction sequence that evaluates its
//! sub-expressions left to right and leaves exactly one value on the operand
//! stack, unboxed for scalars unless the destination context boxes it.
//! Sequences compose by concatenation; the caller appends boxing glue where
//! its own context demands a reference.

use kura_ir::{BinaryOp, ExprArena, ExprId, ExprKind, ExprRange, Name, TypeId, UnaryOp};
use kura_types::{MemberKind, TypeData};

use crate::context::CodegenContext;
use crate::repr::{self, BOUND_FN_CLASS, LIST_CLASS};

/// Lower an expression to a stack-balanced instruction sequence.
pub fn emit_expr(ctx: &mut CodegenContext<'_>, arena: &ExprArena, id: ExprId) -> String {
    let expr = arena.get_expr(id);
    match &expr.kind {
        ExprKind::Int(n) => format!("ldc {n}\n"),
        ExprKind::Bool(b) => format!("ldc {}\n", i32::from(*b)),
        ExprKind::Ident(name) => emit_ident(ctx, id, *name),
        ExprKind::Unary { op, operand } => emit_unary(ctx, arena, *op, *operand),
        ExprKind::Binary { op, lhs, rhs } => emit_binary(ctx, arena, *op, *lhs, *rhs),
        ExprKind::Member { object, member } => emit_member(ctx, arena, *object, *member),
        ExprKind::Index { list, index } => emit_index(ctx, arena, id, *list, *index),
        ExprKind::Call { callee, args } => emit_call(ctx, arena, id, *callee, *args),
        ExprKind::ListSize(list) => {
            let mut code = emit_expr(ctx, arena, *list);
            code.push_str(&format!("invokevirtual {LIST_CLASS}/getSize()I\n"));
            code
        }
        ExprKind::ListAppend { list, elem } => emit_list_append(ctx, arena, *list, *elem),
    }
}

/// Identifier read.
///
/// A name that resolves to a declared function evaluates to a bound function
/// value over the current receiver (slot 0); anything else is a slot load,
/// unboxed when the static type is scalar.
fn emit_ident(ctx: &mut CodegenContext<'_>, id: ExprId, name: Name) -> String {
    if ctx.info.is_function(name) {
        return emit_bound_fn("aload_0\n", ctx.resolve_name(name));
    }
    let slot = ctx.frame.slot_of(name);
    let mut code = format!("aload {slot}\n");
    if let Some(unbox) = repr::unbox_instr(ctx.expr_type(id)) {
        code.push_str(unbox);
        code.push('\n');
    }
    code
}

/// Allocate a bound function value over an already-emitted receiver.
fn emit_bound_fn(receiver: &str, member: &str) -> String {
    let mut code = format!("new {BOUND_FN_CLASS}\ndup\n");
    code.push_str(receiver);
    code.push_str(&format!("ldc \"{member}\"\n"));
    code.push_str(&format!(
        "invokespecial {BOUND_FN_CLASS}/<init>(Ljava/lang/Object;Ljava/lang/String;)V\n"
    ));
    code
}

fn emit_unary(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    op: UnaryOp,
    operand: ExprId,
) -> String {
    let mut code = emit_expr(ctx, arena, operand);
    match op {
        UnaryOp::Neg => {
            code.push_str("ineg\n");
            code
        }
        UnaryOp::Not => {
            let false_label = ctx.new_label();
            let after_label = ctx.new_label();
            code.push_str(&format!("ifne {false_label}\n"));
            code.push_str("iconst_1\n");
            code.push_str(&format!("goto {after_label}\n"));
            code.push_str(&format!("{false_label}:\n"));
            code.push_str("iconst_0\n");
            code.push_str(&format!("{after_label}:\n"));
            code
        }
    }
}

fn emit_binary(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    op: BinaryOp,
    lhs: ExprId,
    rhs: ExprId,
) -> String {
    match op {
        BinaryOp::Add => emit_arith(ctx, arena, lhs, rhs, "iadd"),
        BinaryOp::Sub => emit_arith(ctx, arena, lhs, rhs, "isub"),
        BinaryOp::Mul => emit_arith(ctx, arena, lhs, rhs, "imul"),
        BinaryOp::Div => emit_arith(ctx, arena, lhs, rhs, "idiv"),
        // Branch on the inverse condition to a "false" label.
        BinaryOp::Lt => emit_compare(ctx, arena, lhs, rhs, "if_icmpge"),
        BinaryOp::Gt => emit_compare(ctx, arena, lhs, rhs, "if_icmple"),
        BinaryOp::Eq => emit_equality(ctx, arena, lhs, rhs),
        BinaryOp::And | BinaryOp::Or => emit_logical(ctx, arena, op, lhs, rhs),
        BinaryOp::Assign => emit_assign(ctx, arena, lhs, rhs),
    }
}

fn emit_arith(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    lhs: ExprId,
    rhs: ExprId,
    instr: &str,
) -> String {
    let mut code = emit_expr(ctx, arena, lhs);
    code.push_str(&emit_expr(ctx, arena, rhs));
    code.push_str(instr);
    code.push('\n');
    code
}

/// Materialize a boolean from a two-operand comparison branch.
fn emit_compare(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    lhs: ExprId,
    rhs: ExprId,
    inverse_branch: &str,
) -> String {
    let mut code = emit_expr(ctx, arena, lhs);
    code.push_str(&emit_expr(ctx, arena, rhs));
    let false_label = ctx.new_label();
    let after_label = ctx.new_label();
    code.push_str(&format!("{inverse_branch} {false_label}\n"));
    code.push_str("iconst_1\n");
    code.push_str(&format!("goto {after_label}\n"));
    code.push_str(&format!("{false_label}:\n"));
    code.push_str("iconst_0\n");
    code.push_str(&format!("{after_label}:\n"));
    code
}

/// Equality, dispatched on the left operand's static type.
///
/// Scalars compare by value; lists, function values and structs compare by
/// reference identity.
fn emit_equality(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    lhs: ExprId,
    rhs: ExprId,
) -> String {
    let lhs_ty = ctx.expr_type(lhs);
    let branch = if lhs_ty.is_scalar() {
        "if_icmpne"
    } else {
        debug_assert!(
            ctx.types.lookup(lhs_ty).is_reference(),
            "codegen invariant: equality on a non-value type"
        );
        "if_acmpne"
    };
    emit_compare(ctx, arena, lhs, rhs, branch)
}

/// Short-circuit `and`/`or`.
///
/// The right operand's code is jumped over entirely when the left operand
/// decides the result.
fn emit_logical(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    op: BinaryOp,
    lhs: ExprId,
    rhs: ExprId,
) -> String {
    let short_label = ctx.new_label();
    let after_label = ctx.new_label();
    let mut code = emit_expr(ctx, arena, lhs);
    let (branch, decided, other) = match op {
        BinaryOp::And => ("ifeq", "iconst_0", "iconst_1"),
        BinaryOp::Or => ("ifne", "iconst_1", "iconst_0"),
        _ => panic!("codegen invariant: {op:?} is not a logical operator"),
    };
    code.push_str(&format!("{branch} {short_label}\n"));
    code.push_str(&emit_expr(ctx, arena, rhs));
    code.push_str(&format!("{branch} {short_label}\n"));
    code.push_str(other);
    code.push('\n');
    code.push_str(&format!("goto {after_label}\n"));
    code.push_str(&format!("{short_label}:\n"));
    code.push_str(decided);
    code.push('\n');
    code.push_str(&format!("{after_label}:\n"));
    code
}

/// Assignment pseudo-operator.
///
/// The target's syntactic kind selects the storage protocol; in every
/// protocol the assigned value stays on the stack as the expression result
/// (unboxed for scalars), enabling chained and embedded assignment.
pub fn emit_assign(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    target: ExprId,
    value: ExprId,
) -> String {
    match &arena.get_expr(target).kind {
        ExprKind::Ident(name) => {
            let name = *name;
            let target_ty = ctx.expr_type(target);
            let mut code = emit_stored_value(ctx, arena, value, target_ty);
            code.push_str("dup\n");
            if let Some(box_glue) = repr::box_instr(target_ty) {
                code.push_str(box_glue);
                code.push('\n');
            }
            let slot = ctx.frame.slot_of(name);
            code.push_str(&format!("astore {slot}\n"));
            code
        }
        ExprKind::Index { list, index } => {
            let (list, index) = (*list, *index);
            let elem_ty = ctx.expr_type(target);
            let mut code = emit_expr(ctx, arena, list);
            code.push_str(&emit_expr(ctx, arena, index));
            code.push_str(&emit_stored_value(ctx, arena, value, elem_ty));
            // Copy the assigned value below list and index before it is
            // consumed by the element store.
            code.push_str("dup_x2\n");
            if let Some(box_glue) = repr::box_instr(elem_ty) {
                code.push_str(box_glue);
                code.push('\n');
            }
            code.push_str(&format!(
                "invokevirtual {LIST_CLASS}/setElement(ILjava/lang/Object;)V\n"
            ));
            code
        }
        ExprKind::Member { object, member } => {
            let (object, member) = (*object, *member);
            let strct = struct_of(ctx, ctx.expr_type(object));
            let MemberKind::Field(field_ty) = ctx.info.member_kind(strct, member) else {
                panic!("codegen invariant: assignment to a method member");
            };
            let class = ctx.resolve_name(strct).to_owned();
            let field = ctx.resolve_name(member).to_owned();
            let desc = repr::descriptor(ctx, field_ty);
            let mut code = emit_expr(ctx, arena, object);
            code.push_str(&emit_stored_value(ctx, arena, value, field_ty));
            code.push_str("dup_x1\n");
            if let Some(box_glue) = repr::box_instr(field_ty) {
                code.push_str(box_glue);
                code.push('\n');
            }
            code.push_str(&format!("putfield {class}/{field} {desc}\n"));
            code
        }
        _ => panic!("codegen invariant: invalid assignment target"),
    }
}

/// Lower the right-hand side of a store to the representation the target
/// type keeps.
///
/// A list-typed store copy-constructs a fresh wrapper over the source's
/// contents: assignment never aliases lists.
pub fn emit_stored_value(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    value: ExprId,
    target_ty: TypeId,
) -> String {
    if matches!(ctx.types.lookup(target_ty), TypeData::List(_)) {
        let mut code = format!("new {LIST_CLASS}\ndup\n");
        code.push_str(&emit_expr(ctx, arena, value));
        code.push_str(&format!("invokespecial {LIST_CLASS}/<init>(L{LIST_CLASS};)V\n"));
        code
    } else {
        emit_expr(ctx, arena, value)
    }
}

/// Struct member read: a field fetch or a bound method value.
fn emit_member(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    object: ExprId,
    member: Name,
) -> String {
    let strct = struct_of(ctx, ctx.expr_type(object));
    match ctx.info.member_kind(strct, member) {
        MemberKind::Field(field_ty) => {
            let class = ctx.resolve_name(strct).to_owned();
            let field = ctx.resolve_name(member).to_owned();
            let desc = repr::descriptor(ctx, field_ty);
            let mut code = emit_expr(ctx, arena, object);
            code.push_str(&format!("getfield {class}/{field} {desc}\n"));
            if let Some(unbox) = repr::unbox_instr(field_ty) {
                code.push_str(unbox);
                code.push('\n');
            }
            code
        }
        MemberKind::Method => {
            let receiver = emit_expr(ctx, arena, object);
            emit_bound_fn(&receiver, ctx.resolve_name(member))
        }
    }
}

/// List element read, narrowed to the statically expected element type.
fn emit_index(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    id: ExprId,
    list: ExprId,
    index: ExprId,
) -> String {
    let mut code = emit_expr(ctx, arena, list);
    code.push_str(&emit_expr(ctx, arena, index));
    code.push_str(&format!(
        "invokevirtual {LIST_CLASS}/getElement(I)Ljava/lang/Object;\n"
    ));
    let elem_ty = ctx.expr_type(id);
    code.push_str(&format!("checkcast {}\n", repr::class_name(ctx, elem_ty)));
    if let Some(unbox) = repr::unbox_instr(elem_ty) {
        code.push_str(unbox);
        code.push('\n');
    }
    code
}

/// Uniform call protocol.
///
/// The callee evaluates to a bound function value whatever its shape (free
/// function name, method access, function-valued variable); arguments are
/// boxed into a fresh argument collection held in a temporary slot; the
/// invocation goes through the runtime's generic invoke-by-name entry point;
/// a non-void result is narrowed back to its static type.
fn emit_call(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    id: ExprId,
    callee: ExprId,
    args: ExprRange,
) -> String {
    let mut code = emit_expr(ctx, arena, callee);
    code.push_str("new java/util/ArrayList\n");
    code.push_str("dup\n");
    code.push_str("invokespecial java/util/ArrayList/<init>()V\n");
    let tmp = ctx.frame.new_temporary();
    code.push_str(&format!("astore {tmp}\n"));
    for &arg in arena.get_expr_list(args) {
        code.push_str(&format!("aload {tmp}\n"));
        let arg_ty = ctx.expr_type(arg);
        code.push_str(&emit_stored_value(ctx, arena, arg, arg_ty));
        if let Some(box_glue) = repr::box_instr(arg_ty) {
            code.push_str(box_glue);
            code.push('\n');
        }
        code.push_str("invokevirtual java/util/ArrayList/add(Ljava/lang/Object;)Z\n");
        code.push_str("pop\n");
    }
    code.push_str(&format!("aload {tmp}\n"));
    code.push_str(&format!(
        "invokevirtual {BOUND_FN_CLASS}/invoke(Ljava/util/ArrayList;)Ljava/lang/Object;\n"
    ));
    ctx.frame.release_temporary();
    let result_ty = ctx.expr_type(id);
    if !result_ty.is_void() {
        code.push_str(&format!("checkcast {}\n", repr::class_name(ctx, result_ty)));
        if let Some(unbox) = repr::unbox_instr(result_ty) {
            code.push_str(unbox);
            code.push('\n');
        }
    }
    code
}

/// In-place append; the list reference stays on the stack as the result.
fn emit_list_append(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    list: ExprId,
    elem: ExprId,
) -> String {
    let mut code = emit_expr(ctx, arena, list);
    code.push_str("dup\n");
    code.push_str(&emit_expr(ctx, arena, elem));
    if let Some(box_glue) = repr::box_instr(ctx.expr_type(elem)) {
        code.push_str(box_glue);
        code.push('\n');
    }
    code.push_str(&format!(
        "invokevirtual {LIST_CLASS}/addElement(Ljava/lang/Object;)V\n"
    ));
    code
}

/// The struct name behind a struct-typed expression.
fn struct_of(ctx: &CodegenContext<'_>, ty: TypeId) -> Name {
    match ctx.types.lookup(ty) {
        TypeData::Struct(name) => *name,
        other => panic!("codegen invariant: member access on non-struct type {other:?}"),
    }
}
