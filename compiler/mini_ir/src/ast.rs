//! AST nodes consumed by the evaluator.
//!
//! Expressions and statements own their children. Function definitions
//! sit behind `Rc` so a `Function` value can be cloned out of a table
//! without copying its body.

use crate::{Name, Span};
use std::fmt;
use std::rc::Rc;

/// Numeric literal as written in the source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NumberLit {
    Int(i64),
    Real(f64),
}

impl fmt::Display for NumberLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberLit::Int(n) => write!(f, "{n}"),
            NumberLit::Real(r) => write!(f, "{r:?}"),
        }
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Neg,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
        }
    }
}

/// Infix operators. Each one is also a key in the builtin table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    Or,
    And,
}

impl BinaryOp {
    /// Every operator, in builtin-table seeding order.
    pub const ALL: [BinaryOp; 11] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
        BinaryOp::Eq,
        BinaryOp::Or,
        BinaryOp::And,
    ];

    /// The operator's key in the builtin table.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
        }
    }

    /// Binding power; higher binds tighter.
    ///
    /// Relational operators bind loosest, then `==`/`or`/`and`, then the
    /// additive and multiplicative tiers. All levels are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => 1,
            BinaryOp::Eq | BinaryOp::Or | BinaryOp::And => 2,
            BinaryOp::Add | BinaryOp::Sub => 3,
            BinaryOp::Mul | BinaryOp::Div => 4,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Number(NumberLit),
    /// `[e0, e1, ...]`
    List(Vec<Expr>),
    /// Variable read, optionally subscripted.
    Ident(Identifier),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call(Call),
}

/// A name with zero or more subscripts: `grid[i][j]`.
///
/// Used both as a read expression and as an assignment target.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub name: Name,
    pub subscripts: Vec<Expr>,
    pub span: Span,
}


/// `name(arg0, arg1, ...)`, in expression or procedure position.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub callee: Name,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Assign {
        target: Identifier,
        value: Expr,
    },
    FunctionDef(Rc<FunctionDef>),
    /// Procedure call; the result is discarded.
    Call(Call),
    Return(Expr),
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Block(Vec<Stmt>),
}

/// `func name(p0, p1, ...) { body }`
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A whole source file: top-level statements followed by the entry function.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub preamble: Vec<Stmt>,
    pub entry: Rc<FunctionDef>,
}
