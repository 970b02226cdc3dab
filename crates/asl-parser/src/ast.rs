//! AST node types for the ASL language.
//!
//! The tree is fully typed: statements and expressions are enums with one
//! variant per syntactic form. Every node that acquires semantic
//! decorations (scope, type, l-value flag) carries a `NodeIndex` assigned
//! sequentially by the parser; the passes key their side tables on it
//! instead of attaching attributes to the nodes themselves.
//!
//! Operator and keyword tokens that anchor diagnostics (the `=` of an
//! assignment, each operator) are kept as spans on their nodes.

use std::fmt;

use asl_common::Span;
use serde::{Deserialize, Serialize};

/// Stable id of an AST node within one parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub u32);

/// Root of the tree: the list of function definitions.
#[derive(Debug, Clone)]
pub struct Program {
    pub node: NodeIndex,
    pub functions: Vec<Function>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub node: NodeIndex,
    pub name: Ident,
    pub params: Vec<Param>,
    /// Declared return type; `None` for an action (void function).
    pub ret: Option<BasicTypeNode>,
    pub decls: Vec<VarDecl>,
    pub body: Statements,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Ident,
    pub ty: TypeNode,
}

/// `var a, b : t ;`
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub node: NodeIndex,
    pub names: Vec<Ident>,
    pub ty: TypeNode,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub node: NodeIndex,
    pub kind: TypeNodeKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNodeKind {
    Basic(BasicType),
    Array { size: u32, elem: BasicType },
}

#[derive(Debug, Clone)]
pub struct BasicTypeNode {
    pub node: NodeIndex,
    pub kind: BasicType,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicType {
    Int,
    Float,
    Bool,
    Char,
}

/// A block of statements (function body, branch of an `if`, loop body).
#[derive(Debug, Clone, Default)]
pub struct Statements {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub node: NodeIndex,
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Assign {
        target: LeftExpr,
        /// Span of the `=` token, anchoring assignment diagnostics.
        assign_span: Span,
        value: Expr,
    },
    If {
        cond: Expr,
        then_branch: Statements,
        else_branch: Option<Statements>,
    },
    While {
        cond: Expr,
        body: Statements,
    },
    ProcCall(Call),
    Return {
        value: Option<Expr>,
    },
    Read {
        target: LeftExpr,
    },
    WriteExpr {
        value: Expr,
    },
    /// `write "literal"`; the content excludes the quotes, escapes kept
    /// verbatim.
    WriteString {
        value: String,
    },
}

/// Assignment / read target: `id` or `id[expr]`.
#[derive(Debug, Clone)]
pub struct LeftExpr {
    pub node: NodeIndex,
    pub ident: Ident,
    pub index: Option<Box<Expr>>,
    pub span: Span,
}

/// A call, in statement position (procedure call) or expression position
/// (function call).
#[derive(Debug, Clone)]
pub struct Call {
    pub node: NodeIndex,
    pub callee: Ident,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// An identifier occurrence. Distinct from the expression wrapping it: both
/// get their own `NodeIndex`, and the identifier's decorations are computed
/// first and propagated.
#[derive(Debug, Clone)]
pub struct Ident {
    pub node: NodeIndex,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub node: NodeIndex,
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Value(Value),
    Ident(Ident),
    ArrayIndex {
        ident: Ident,
        index: Box<Expr>,
    },
    Call(Call),
    Unary {
        op: UnaryOp,
        op_span: Span,
        operand: Box<Expr>,
    },
    Arithmetic {
        op: ArithOp,
        op_span: Span,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Relational {
        op: RelOp,
        op_span: Span,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Logical {
        op: LogicOp,
        op_span: Span,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Paren(Box<Expr>),
}

/// A literal. Numeric literals keep their source text: the code generator
/// emits it unchanged as the instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(String),
    Float(String),
    Bool(bool),
    /// Content between the quotes, escape kept verbatim (`\n` stays two
    /// characters).
    Char(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "not"),
            UnaryOp::Neg => write!(f, "-"),
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for LogicOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicOp::And => write!(f, "and"),
            LogicOp::Or => write!(f, "or"),
        }
    }
}
