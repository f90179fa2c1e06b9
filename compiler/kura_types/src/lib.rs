//! Type system data for Kura.
//!
//! Two pieces live here:
//!
//! - The interned type representation: [`TypeData`] values behind the
//!   [`TypeId`](kura_ir::TypeId) handles that AST nodes carry, managed by a
//!   [`TypeInterner`].
//! - The resolved program info ([`ProgramInfo`]): per-expression static
//!   types, function signatures, struct layouts and method tables. Upstream
//!   type checking produces it; code generation consumes it as a read-only
//!   oracle and never re-infers a type.

mod data;
mod info;
mod type_interner;

pub use data::TypeData;
pub use info::{FunctionSig, MemberKind, ProgramInfo, StructInfo};
pub use type_interner::TypeInterner;
