//! AST node types.
//!
//! The grammar is small and first-order: structs with fields and methods,
//! free functions, a top-level statement block, dynamic lists, first-class
//! function references, and int/bool scalars. Expression and statement nodes
//! are stored flat in an [`ExprArena`](crate::ExprArena); child links are
//! [`ExprId`]/[`StmtId`] indices.
//!
//! Nodes reaching code generation are fully resolved: declarations carry
//! their checked [`TypeId`] and every expression's static type is on record
//! in the program info produced by the type checker.

use std::fmt;

use crate::{DeclRange, ExprId, ExprRange, Name, Span, Spanned, StmtId, StmtRange, TypeId};

/// Binary operators, including the assignment pseudo-operator.
///
/// Assignment is syntactically binary and is lowered through the same
/// dispatch as the other operators; its left operand selects a storage
/// protocol instead of being evaluated as a value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Comparison
    Lt,
    Gt,
    Eq,

    // Logical (short-circuit)
    And,
    Or,

    // Storage
    Assign,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::And => "&",
            Self::Or => "|",
            Self::Assign => "=",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Logical not.
    Not,
}

impl UnaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "~",
        }
    }
}

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal.
    Int(i32),

    /// Boolean literal.
    Bool(bool),

    /// Identifier read: a variable, or a declared function name (which
    /// evaluates to a bound function value over the current receiver).
    Ident(Name),

    /// Unary operation.
    Unary { op: UnaryOp, operand: ExprId },

    /// Binary operation, including assignment.
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },

    /// Struct member access: a stored field or a method.
    Member { object: ExprId, member: Name },

    /// List element read by index.
    Index { list: ExprId, index: ExprId },

    /// Call through any callable: free function, method, or
    /// function-valued variable.
    Call { callee: ExprId, args: ExprRange },

    /// Element count of a list.
    ListSize(ExprId),

    /// In-place append of an element to a list.
    ListAppend { list: ExprId, elem: ExprId },
}

/// Statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// Brace-delimited statement sequence. No storage scoping boundary:
    /// locals declared inside keep their slots for the whole function.
    Block(StmtRange),

    /// Conditional with optional else branch.
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },

    /// Pre-test loop.
    While { cond: ExprId, body: StmtId },

    /// Post-test loop.
    DoWhile { body: StmtId, cond: ExprId },

    /// Variable declaration statement; may introduce several variables.
    Decl(DeclRange),

    /// Assignment statement; the retained value is discarded.
    Assign { target: ExprId, value: ExprId },

    /// Call statement; a non-void result is discarded.
    Call(ExprId),

    /// Print an int or bool to standard output.
    Display(ExprId),

    /// Return from the enclosing function.
    Return(Option<ExprId>),

    /// List append used as a statement.
    Append(ExprId),

    /// List size used as a statement; the count is discarded.
    Size(ExprId),
}

/// A single variable declaration with its checked type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct VarDecl {
    pub name: Name,
    /// Declared type, resolved by the type checker.
    pub ty: TypeId,
    /// Explicit initializer; `None` means default initialization.
    pub init: Option<ExprId>,
    pub span: Span,
}

impl Spanned for VarDecl {
    fn span(&self) -> Span {
        self.span
    }
}

/// Parameter of a function or method.
///
/// Only the binding name lives here; parameter types come from the resolved
/// signature in the program info, never from the AST.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub span: Span,
}

impl Spanned for Param {
    fn span(&self) -> Span {
        self.span
    }
}

/// Function definition: a free function or a struct method.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Function {
    pub name: Name,
    pub params: Vec<Param>,
    /// Body block statement.
    pub body: StmtId,
    pub span: Span,
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Function {{ name: {:?}, params: {:?}, body: {:?} }}",
            self.name, self.params, self.body
        )
    }
}

impl Spanned for Function {
    fn span(&self) -> Span {
        self.span
    }
}

/// A declared struct field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldDef {
    pub name: Name,
    /// Declared type, resolved by the type checker.
    pub ty: TypeId,
    pub span: Span,
}

impl Spanned for FieldDef {
    fn span(&self) -> Span {
        self.span
    }
}

/// Struct definition: named fields in declaration order plus methods.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructDef {
    pub name: Name,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<Function>,
    pub span: Span,
}

impl Spanned for StructDef {
    fn span(&self) -> Span {
        self.span
    }
}

/// A whole type-checked program.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Program {
    pub structs: Vec<StructDef>,
    pub functions: Vec<Function>,
    /// Top-level statement block: the program entry.
    pub main_body: StmtId,
}
