//! Arena allocation for the flat AST.
//!
//! All expressions, statements and declarations of one program live in
//! contiguous vectors; nodes reference children by index. Lists of children
//! (call arguments, block statements, declaration groups) are flattened into
//! side tables addressed by ranges.

use crate::ast::{Expr, Stmt, VarDecl};
use crate::{DeclRange, ExprId, ExprRange, StmtId, StmtRange};

/// Contiguous storage for all AST nodes of a program.
#[derive(Clone, Default)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// All statements (indexed by `StmtId`).
    stmts: Vec<Stmt>,
    /// Flattened expression lists (call arguments).
    expr_lists: Vec<ExprId>,
    /// Flattened statement lists (block bodies).
    stmt_lists: Vec<StmtId>,
    /// Flattened declaration groups (declaration statements).
    decls: Vec<VarDecl>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expressions =====

    /// Allocate an expression, returning its ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Get an expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Number of allocated expressions.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate an expression list, returning its range.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend(exprs);
        let len = (self.expr_lists.len() as u32 - start) as u16;
        ExprRange::new(start, len)
    }

    /// Get an expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    // ===== Statements =====

    /// Allocate a statement, returning its ID.
    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(self.stmts.len() as u32);
        self.stmts.push(stmt);
        id
    }

    /// Get a statement by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Allocate a statement list, returning its range.
    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = self.stmt_lists.len() as u32;
        self.stmt_lists.extend(stmts);
        let len = (self.stmt_lists.len() as u32 - start) as u16;
        StmtRange::new(start, len)
    }

    /// Get a statement list by range.
    #[inline]
    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        let start = range.start as usize;
        &self.stmt_lists[start..start + range.len()]
    }

    // ===== Declarations =====

    /// Allocate a declaration group, returning its range.
    pub fn alloc_decls(&mut self, decls: impl IntoIterator<Item = VarDecl>) -> DeclRange {
        let start = self.decls.len() as u32;
        self.decls.extend(decls);
        let len = (self.decls.len() as u32 - start) as u16;
        DeclRange::new(start, len)
    }

    /// Get a declaration group by range.
    #[inline]
    pub fn get_decls(&self, range: DeclRange) -> &[VarDecl] {
        let start = range.start as usize;
        &self.decls[start..start + range.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use crate::Span;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::SYNTHETIC));
        let b = arena.alloc_expr(Expr::new(ExprKind::Int(2), Span::SYNTHETIC));
        assert_ne!(a, b);
        assert_eq!(arena.get_expr(a).kind, ExprKind::Int(1));
        assert_eq!(arena.get_expr(b).kind, ExprKind::Int(2));
        assert_eq!(arena.expr_count(), 2);
    }

    #[test]
    fn test_expr_list_roundtrip() {
        let mut arena = ExprArena::new();
        let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::SYNTHETIC));
        let b = arena.alloc_expr(Expr::new(ExprKind::Bool(true), Span::SYNTHETIC));
        let range = arena.alloc_expr_list([a, b]);
        assert_eq!(arena.get_expr_list(range), &[a, b]);
    }

    #[test]
    fn test_empty_list_is_empty() {
        let mut arena = ExprArena::new();
        let range = arena.alloc_expr_list([]);
        assert!(range.is_empty());
        assert_eq!(arena.get_expr_list(range), &[]);
    }
}
