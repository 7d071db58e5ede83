// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Luz code generator.
//!
//! Lowers a resolved [`Program`](luz_ast::Program) to a Bash script.
//! Lowering is pure string building: builtins that receive invalid
//! arguments emit `# error:` comment markers into the output, and a
//! post-pass over the finished script collects them as codegen errors.

mod builtins;
mod expressions;
mod fetch;
mod generator;
mod statements;

pub use generator::{generate, Output};
