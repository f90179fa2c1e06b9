//! Code generation context and configuration.
//!
//! All emitter state lives in an explicit [`CodegenContext`] value threaded
//! through the recursive emit calls; there is no global mutable state, so a
//! context can be built per test and traversals stay reentrant.

use kura_ir::{ExprId, Name, StringInterner, TypeId};
use kura_types::{ProgramInfo, TypeInterner};

use crate::frame::Frame;
use crate::labels::{Label, LabelAllocator};

/// Tunables for code generation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodegenOptions {
    /// Operand stack depth ceiling declared per routine.
    pub stack_limit: u32,
    /// Local slot count ceiling declared per routine.
    pub locals_limit: u32,
    /// Name of the program entry class.
    pub entry_class: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            stack_limit: 128,
            locals_limit: 128,
            entry_class: "Main".to_owned(),
        }
    }
}

/// Code generation context.
///
/// Holds the read-only oracles (interners, resolved program info) alongside
/// the mutable traversal state: the active frame, the compilation-wide label
/// allocator, and the return type of the routine being emitted.
pub struct CodegenContext<'a> {
    /// String interner for resolving names.
    pub interner: &'a StringInterner,
    /// Type interner for resolving `TypeId`s.
    pub types: &'a TypeInterner,
    /// Resolved program info from upstream checking.
    pub info: &'a ProgramInfo,
    /// Generation tunables.
    pub options: &'a CodegenOptions,
    /// Slot allocator of the routine currently being emitted.
    pub frame: Frame,
    /// Label allocator, shared across all units of the compilation.
    labels: LabelAllocator,
    /// Return type of the routine currently being emitted.
    return_ty: TypeId,
}

impl<'a> CodegenContext<'a> {
    /// Create a context for one compilation.
    pub fn new(
        interner: &'a StringInterner,
        types: &'a TypeInterner,
        info: &'a ProgramInfo,
        options: &'a CodegenOptions,
    ) -> Self {
        Self {
            interner,
            types,
            info,
            options,
            frame: Frame::new(),
            labels: LabelAllocator::new(),
            return_ty: TypeId::VOID,
        }
    }

    /// Begin emitting a routine: fresh frame, new return type.
    ///
    /// Labels are not reset; they are unique across the whole compilation.
    pub fn enter_routine(&mut self, return_ty: TypeId) {
        self.frame = Frame::new();
        self.return_ty = return_ty;
    }

    /// Return type of the routine currently being emitted.
    #[inline]
    pub fn return_ty(&self) -> TypeId {
        self.return_ty
    }

    /// Allocate a fresh control-flow label.
    #[inline]
    pub fn new_label(&mut self) -> Label {
        self.labels.new_label()
    }

    /// The static type of an expression, from the oracle.
    #[inline]
    pub fn expr_type(&self, id: ExprId) -> TypeId {
        self.info.expr_type(id)
    }

    /// Resolve a name to its string content.
    #[inline]
    pub fn resolve_name(&self, name: Name) -> &str {
        self.interner.lookup(name)
    }
}
