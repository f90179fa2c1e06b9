//! Assembly Code Generation Backend for Kura
//!
//! This crate lowers a type-checked Kura AST to textual assembly for a
//! stack-based, garbage-collected, object-oriented virtual machine. The
//! emitted text is assembled externally; bundling the runtime support
//! library (the `List` wrapper and the `BoundFn` invocation indirection) and
//! writing output files are the driver's responsibility.
//!
//! # Architecture
//!
//! ```text
//! Program + ExprArena + ProgramInfo
//!        ↓
//!   unit emitter      (one unit per struct, plus the entry unit)
//!        ↓
//!   stmt emitter      (control flow, declarations; owns label usage)
//!        ↓
//!   expr emitter      (stack-balanced instruction sequences)
//!        ↓
//!   CodegenResult     (assembly text per unit)
//! ```
//!
//! Every expression lowers to a self-contained sequence that leaves exactly
//! one value on the operand stack; composition is concatenation plus the
//! boxing glue decided by the representation policy in [`repr`].

mod context;
mod expr;
mod frame;
mod labels;
mod repr;
mod stmt;
mod unit;
mod writer;


pub use context::{CodegenContext, CodegenOptions};
pub use frame::Frame;
pub use labels::{Label, LabelAllocator};
pub use unit::emit_program;
pub use writer::UnitWriter;

use kura_ir::{ExprArena, Program, StringInterner};
use kura_types::{ProgramInfo, TypeInterner};

/// One self-contained assembly unit: a struct, or the program entry class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssemblyUnit {
    /// Unit (class) name; also the output file stem.
    pub name: String,
    /// Complete assembly text of the unit.
    pub text: String,
}

/// Result of code generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CodegenResult {
    /// Generated units, structs first, entry unit last.
    pub units: Vec<AssemblyUnit>,
}

impl CodegenResult {
    /// Look up a unit by name.
    pub fn unit(&self, name: &str) -> Option<&AssemblyUnit> {
        self.units.iter().find(|u| u.name == name)
    }
}

/// Generate assembly for a whole checked program.
///
/// The input is assumed validated: every expression has a resolved type in
/// `info`, every identifier is bound, and every non-void function returns on
/// all paths. Violations are internal errors and panic.
pub fn generate(
    program: &Program,
    arena: &ExprArena,
    interner: &StringInterner,
    types: &TypeInterner,
    info: &ProgramInfo,
    options: &CodegenOptions,
) -> CodegenResult {
    CodegenResult {
        units: emit_program(program, arena, interner, types, info, options),
    }
}
