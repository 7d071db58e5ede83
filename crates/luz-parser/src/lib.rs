// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Luz parser.
//!
//! Recursive descent with a precedence ladder for expressions. The
//! parser is recoverable: a grammar mismatch records a structured
//! error and continues with a synthetic token, so every parse returns
//! a best-effort [`Program`](luz_ast::Program) plus a diagnostics
//! list. Nothing here panics on user input.

mod parser;

pub use parser::{ParseError, ParseResult, Parser};
