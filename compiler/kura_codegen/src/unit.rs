//! Unit assembly: one class per struct, plus the entry class.
//!
//! Signatures come from the resolved program info, never from the AST; only
//! the post-checking tables carry fully resolved parameter and return types.

use kura_ir::{ExprArena, Function, Name, Program, StmtId, StmtKind, StringInterner, StructDef, TypeId};
use kura_types::{FunctionSig, ProgramInfo, TypeInterner};

use crate::context::{CodegenContext, CodegenOptions};
use crate::repr;
use crate::stmt::emit_stmt;
use crate::writer::UnitWriter;
use crate::AssemblyUnit;

/// Emit every unit of a checked program: structs first, then the entry
/// class carrying top-level functions and the top-level statement block.
#[tracing::instrument(level = "debug", skip_all, fields(
    structs = program.structs.len(),
    functions = program.functions.len(),
))]
pub fn emit_program(
    program: &Program,
    arena: &ExprArena,
    interner: &StringInterner,
    types: &TypeInterner,
    info: &ProgramInfo,
    options: &CodegenOptions,
) -> Vec<AssemblyUnit> {
    let mut ctx = CodegenContext::new(interner, types, info, options);
    let mut units = Vec::with_capacity(program.structs.len() + 1);
    for strct in &program.structs {
        units.push(emit_struct_unit(&mut ctx, arena, strct));
    }
    units.push(emit_entry_unit(&mut ctx, arena, program));
    units
}

/// One struct: field declarations in declaration order, the default
/// initializer, then the methods.
fn emit_struct_unit(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    strct: &StructDef,
) -> AssemblyUnit {
    let info = ctx.info;
    let class = ctx.resolve_name(strct.name).to_owned();
    tracing::debug!(unit = %class, "emitting struct unit");

    let mut writer = UnitWriter::new();
    writer.push(&format!(".class public {class}"));
    writer.push(".super java/lang/Object");
    let layout = &info.struct_info(strct.name).fields;
    for &(field, ty) in layout {
        let desc = repr::descriptor(ctx, ty);
        let field = ctx.resolve_name(field);
        writer.push(&format!(".field public {field} {desc}"));
    }
    writer.blank();
    emit_initializer(ctx, &mut writer, &class, layout);
    for method in &strct.methods {
        let sig = match info.struct_info(strct.name).method_sig(method.name) {
            Some(sig) => sig,
            None => panic!("codegen invariant: no signature for method {:?}", method.name),
        };
        writer.blank();
        emit_routine(ctx, &mut writer, arena, method, sig);
    }

    AssemblyUnit {
        name: class,
        text: writer.finish(),
    }
}

/// The entry class: default initializer, the static entry point, the `run`
/// routine holding the top-level statement block, and every free function
/// as an instance method.
///
/// Top-level code runs against a synthetic receiver instance in slot 0, so
/// identifier reads form bound function values over it exactly as struct
/// methods do over theirs.
fn emit_entry_unit(
    ctx: &mut CodegenContext<'_>,
    arena: &ExprArena,
    program: &Program,
) -> AssemblyUnit {
    let info = ctx.info;
    let class = ctx.options.entry_class.clone();
    tracing::debug!(unit = %class, "emitting entry unit");

    let mut writer = UnitWriter::new();
    writer.push(&format!(".class public {class}"));
    writer.push(".super java/lang/Object");
    writer.blank();
    emit_initializer(ctx, &mut writer, &class, &[]);
    writer.blank();

    writer.push(".method public static main([Ljava/lang/String;)V");
    writer.push(&format!(".limit stack {}", ctx.options.stack_limit));
    writer.push(&format!(".limit locals {}", ctx.options.locals_limit));
    writer.push(&format!("new {class}"));
    writer.push("dup");
    writer.push(&format!("invokespecial {class}/<init>()V"));
    writer.push(&format!("invokevirtual {class}/run()V"));
    writer.push("return");
    writer.push(".end method");
    writer.blank();

    ctx.enter_routine(TypeId::VOID);
    writer.push(".method public run()V");
    writer.push(&format!(".limit stack {}", ctx.options.stack_limit));
    writer.push(&format!(".limit locals {}", ctx.options.locals_limit));
    emit_stmt(ctx, &mut writer, arena, program.main_body);
    if !ends_with_return(arena, program.main_body) {
        writer.push("return");
    }
    writer.push(".end method");

    for func in &program.functions {
        let sig = match info.function_sig(func.name) {
            Some(sig) => sig,
            None => panic!("codegen invariant: no signature for function {:?}", func.name),
        };
        writer.blank();
        emit_routine(ctx, &mut writer, arena, func, sig);
    }

    AssemblyUnit {
        name: class,
        text: writer.finish(),
    }
}

/// The zero-argument initializer of a unit: chain to the universal base
/// initializer, then default-initialize every field.
fn emit_initializer(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    class: &str,
    fields: &[(Name, TypeId)],
) {
    ctx.enter_routine(TypeId::VOID);
    writer.push(".method public <init>()V");
    writer.push(&format!(".limit stack {}", ctx.options.stack_limit));
    writer.push(&format!(".limit locals {}", ctx.options.locals_limit));
    writer.push("aload_0");
    writer.push("invokespecial java/lang/Object/<init>()V");
    for &(field, ty) in fields {
        writer.push("aload_0");
        writer.push(&repr::emit_default(ctx, ty));
        if let Some(box_glue) = repr::box_instr(ty) {
            writer.push(box_glue);
        }
        let desc = repr::descriptor(ctx, ty);
        let field = ctx.resolve_name(field);
        writer.push(&format!("putfield {class}/{field} {desc}"));
    }
    writer.push("return");
    writer.push(".end method");
}

/// One function or method body.
///
/// Parameters are pre-bound as the first named slots of a fresh frame; the
/// signature string is built from the resolved parameter and return types.
fn emit_routine(
    ctx: &mut CodegenContext<'_>,
    writer: &mut UnitWriter,
    arena: &ExprArena,
    func: &Function,
    sig: &FunctionSig,
) {
    debug_assert_eq!(
        func.params.len(),
        sig.params.len(),
        "codegen invariant: parameter count differs from resolved signature"
    );
    ctx.enter_routine(sig.ret);
    for param in &func.params {
        ctx.frame.bind_parameter(param.name);
    }

    let mut signature = String::from("(");
    for &ty in &sig.params {
        signature.push_str(&repr::descriptor(ctx, ty));
    }
    signature.push(')');
    signature.push_str(&repr::descriptor(ctx, sig.ret));

    let name = ctx.resolve_name(func.name).to_owned();
    writer.push(&format!(".method public {name}{signature}"));
    writer.push(&format!(".limit stack {}", ctx.options.stack_limit));
    writer.push(&format!(".limit locals {}", ctx.options.locals_limit));
    emit_stmt(ctx, writer, arena, func.body);
    // Non-void routines are validated upstream to return on every path;
    // void routines get a synthesized fall-through return.
    if sig.ret.is_void() && !ends_with_return(arena, func.body) {
        writer.push("return");
    }
    writer.push(".end method");
}

/// Whether a statement (transitively, for blocks) ends in an explicit
/// return.
fn ends_with_return(arena: &ExprArena, id: StmtId) -> bool {
    match &arena.get_stmt(id).kind {
        StmtKind::Return(_) => true,
        StmtKind::Block(range) => arena
            .get_stmt_list(*range)
            .last()
            .is_some_and(|&last| ends_with_return(arena, last)),
        _ => false,
    }
}
