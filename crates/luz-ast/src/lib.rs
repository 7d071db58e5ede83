// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token and AST definitions shared by the Luz compiler crates.

pub mod expr;
pub mod stmt;
pub mod token;

pub use expr::{BinOp, Expr, KeywordArg, OrFallback, UnaryOp};
pub use stmt::{MatchCase, Param, Program, Stmt};
pub use token::{Token, TokenKind};
