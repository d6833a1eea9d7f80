//! Mini IR - syntax tree and name types for the mini language.
//!
//! This crate contains the data structures shared by the scanner, parser,
//! evaluator and driver:
//! - `Name` handles and the `StringInterner` that owns their text
//! - `Span` byte ranges for diagnostics
//! - AST nodes (`Expr`, `Stmt`, `FunctionDef`, `Program`)
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: names are `Name(u32)`, compared in O(1)
//! - **Closed node set**: every node kind is an enum variant, so consumers
//!   match exhaustively

pub mod ast;
mod interner;
mod name;
pub mod pretty;
mod span;

pub use ast::{
    BinaryOp, Call, Expr, ExprKind, FunctionDef, Identifier, NumberLit, Program, Stmt, StmtKind,
    UnaryOp,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
