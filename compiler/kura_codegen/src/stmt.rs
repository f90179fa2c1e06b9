//! Statement lowering.
//!
//! Statements write their instructions into the current unit's writer and
//! leave the operand stack at the depth they found it. Temporary slots
//! allocated while lowering a statement are all released by the time the
//! statement completes; that balance is asserted on every statement.

use kura_ir::{ExprArena, ExprId, StmtId, StmtKind, TypeId, VarDecl};

use crate::context::CodegenContext;
use crate::expr::{emit_assign, emit_expr, emit_stored_value};
use crate::repr;
use crate::writer::UnitWriter;

/// Lower a single statement.
pub fn emit_stmt(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    id: StmtId,
) {
    let temps_before = ctx.frame.live_temporaries();
    match &arena.get_stmt(id).kind {
        StmtKind::Block(range) => {
            for &stmt in arena.get_stmt_list(*range) {
                emit_stmt(ctx, writer, arena, stmt);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => emit_if(ctx, writer, arena, *cond, *then_branch, *else_branch),
        StmtKind::While { cond, body } => emit_while(ctx, writer, arena, *cond, *body),
        StmtKind::DoWhile { body, cond } => emit_do_while(ctx, writer, arena, *body, *cond),
        StmtKind::Decl(range) => {
            for decl in arena.get_decls(*range) {
                emit_var_decl(ctx, writer, arena, decl);
            }
        }
        StmtKind::Assign { target, value } => {
            writer.push(&emit_assign(ctx, arena, *target, *value));
            writer.push("pop");
        }
        StmtKind::Call(call) => {
            let call = *call;
            writer.push(&emit_expr(ctx, arena, call));
            if !ctx.expr_type(call).is_void() {
                writer.push("pop");
            }
        }
        StmtKind::Display(arg) => emit_display(ctx, writer, arena, *arg),
        StmtKind::Return(value) => emit_return(ctx, writer, arena, *value),
        StmtKind::Append(append) => {
            // The append expression leaves the list reference as its result.
            writer.push(&emit_expr(ctx, arena, *append));
            writer.push("pop");
        }
        StmtKind::Size(size) => {
            writer.push(&emit_expr(ctx, arena, *size));
            writer.push("pop");
        }
    }
    debug_assert_eq!(
        temps_before,
        ctx.frame.live_temporaries(),
        "codegen invariant: temporary slots must balance across a statement"
    );
}

fn emit_if(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    cond: ExprId,
    then_branch: StmtId,
    else_branch: Option<StmtId>,
) {
    let else_label = ctx.new_label();
    let exit_label = ctx.new_label();
    writer.push(&emit_expr(ctx, arena, cond));
    writer.push(&format!("ifeq {else_label}"));
    emit_stmt(ctx, writer, arena, then_branch);
    writer.push(&format!("goto {exit_label}"));
    writer.push(&format!("{else_label}:"));
    // Dummy push/discard keeps both join paths' stack bookkeeping identical.
    writer.push("iconst_0");
    writer.push("pop");
    if let Some(else_branch) = else_branch {
        emit_stmt(ctx, writer, arena, else_branch);
    }
    writer.push(&format!("{exit_label}:"));
    writer.push("iconst_0");
    writer.push("pop");
}

fn emit_while(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    cond: ExprId,
    body: StmtId,
) {
    let start_label = ctx.new_label();
    let exit_label = ctx.new_label();
    writer.push(&format!("{start_label}:"));
    writer.push(&emit_expr(ctx, arena, cond));
    writer.push(&format!("ifeq {exit_label}"));
    emit_stmt(ctx, writer, arena, body);
    writer.push(&format!("goto {start_label}"));
    writer.push(&format!("{exit_label}:"));
}

fn emit_do_while(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    body: StmtId,
    cond: ExprId,
) {
    let start_label = ctx.new_label();
    let exit_label = ctx.new_label();
    writer.push(&format!("{start_label}:"));
    emit_stmt(ctx, writer, arena, body);
    writer.push(&emit_expr(ctx, arena, cond));
    writer.push(&format!("ifeq {exit_label}"));
    writer.push(&format!("goto {start_label}"));
    writer.push(&format!("{exit_label}:"));
}

/// Bind a local slot and emit its initializing store.
///
/// A declaration always stores: either the lowered explicit initializer or
/// the declared type's default value.
fn emit_var_decl(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    decl: &VarDecl,
) {
    let slot = ctx.frame.bind_local(decl.name);
    let code = match decl.init {
        Some(init) => emit_stored_value(ctx, arena, init, decl.ty),
        None => repr::emit_default(ctx, decl.ty),
    };
    writer.push(&code);
    if let Some(box_glue) = repr::box_instr(decl.ty) {
        writer.push(box_glue);
    }
    writer.push(&format!("astore {slot}"));
}

fn emit_display(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    arg: ExprId,
) {
    writer.push("getstatic java/lang/System/out Ljava/io/PrintStream;");
    let arg_ty = ctx.expr_type(arg);
    writer.push(&emit_expr(ctx, arena, arg));
    match arg_ty {
        TypeId::INT => writer.push("invokevirtual java/io/PrintStream/println(I)V"),
        TypeId::BOOL => writer.push("invokevirtual java/io/PrintStream/println(Z)V"),
        other => panic!("codegen invariant: display of non-scalar type {other:?}"),
    }
}

fn emit_return(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    value: Option<ExprId>,
) {
    let Some(value) = value else {
        writer.push("return");
        return;
    };
    writer.push(&emit_expr(ctx, arena, value));
    if let Some(box_glue) = repr::box_instr(ctx.return_ty()) {
        writer.push(box_glue);
    }
    writer.push("areturn");
}
