// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Luz compiler diagnostics.
//!
//! A single position-carrying diagnostic type shared by the CLI and
//! the language server, with a terminal formatter (source line plus
//! caret) and a machine-readable JSON mode.

pub mod formatter;
pub mod json;

use serde::Serialize;

/// The compiler phase a diagnostic originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lex,
    Parse,
    Resolve,
    Codegen,
}

/// A diagnostic with a 1-based source position. Codegen errors carry
/// no position and use line 0.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub phase: Phase,
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(phase: Phase, line: u32, col: u32, message: impl Into<String>) -> Self {
        Self {
            phase,
            line,
            col,
            message: message.into(),
        }
    }

    /// A positionless diagnostic (lowering errors).
    pub fn unpositioned(phase: Phase, message: impl Into<String>) -> Self {
        Self::new(phase, 0, 0, message)
    }
}
