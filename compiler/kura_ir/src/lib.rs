//! Kura IR - Intermediate Representation Types
//!
//! This crate contains the core data structures for the Kura compiler:
//! - Spans for source locations
//! - Names for interned identifiers
//! - AST nodes (Expr, Stmt, `VarDecl`, Function, `StructDef`, Program)
//! - Arena allocation for expressions and statements
//! - The opaque `TypeId` handle resolved by `kura_types`
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Types → TypeId(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//! - **Closed variant sets**: `ExprKind`/`StmtKind` are exhaustive enums, so
//!   every consumer that matches on them is forced to handle new kinds at
//!   compile time.

mod arena;
pub mod ast;
mod ids;
mod interner;
mod name;
mod span;
mod type_id;

pub use arena::ExprArena;
pub use ast::{
    BinaryOp, Expr, ExprKind, FieldDef, Function, Param, Program, Stmt, StmtKind, StructDef,
    UnaryOp, VarDecl,
};
pub use ids::{DeclRange, ExprId, ExprRange, StmtId, StmtRange};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{Span, Spanned};
pub use type_id::TypeId;
