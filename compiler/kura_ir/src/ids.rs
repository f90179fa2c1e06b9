//! Expression, statement and declaration IDs for the flat AST.
//!
//! Child references are `u32` indices into the [`ExprArena`](crate::ExprArena)
//! instead of `Box`es: equality is an integer compare and the nodes sit in
//! contiguous arrays.

use std::fmt;

/// Index into the expression arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index into the statement arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    /// Create a new `StmtId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        StmtId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StmtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtId({})", self.0)
    }
}

/// Range of expressions in the flattened `expr_lists` table.
///
/// `(start: u32, len: u16)` instead of a `Vec<ExprId>` per node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ExprRange {
    pub start: u32,
    pub len: u16,
}

impl ExprRange {
    /// Empty range.
    pub const EMPTY: ExprRange = ExprRange { start: 0, len: 0 };

    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        ExprRange { start, len }
    }

    /// Whether the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of expressions in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for ExprRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprRange({}..+{})", self.start, self.len)
    }
}

/// Range of statements in the flattened `stmt_lists` table.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct StmtRange {
    pub start: u32,
    pub len: u16,
}

impl StmtRange {
    /// Empty range.
    pub const EMPTY: StmtRange = StmtRange { start: 0, len: 0 };

    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        StmtRange { start, len }
    }

    /// Whether the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of statements in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }
}

impl fmt::Debug for StmtRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StmtRange({}..+{})", self.start, self.len)
    }
}

/// Range of variable declarations in the flattened `decls` table.
///
/// One declaration statement may introduce several variables; the
/// declarations themselves live in the arena's `decls` table.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct DeclRange {
    pub start: u32,
    pub len: u16,
}

impl DeclRange {
    /// Empty range.
    pub const EMPTY: DeclRange = DeclRange { start: 0, len: 0 };

    /// Create a new range.
    #[inline]
    pub const fn new(start: u32, len: u16) -> Self {
        DeclRange { start, len }
    }

    /// Number of declarations in the range.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the range is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for DeclRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclRange({}..+{})", self.start, self.len)
    }
}
