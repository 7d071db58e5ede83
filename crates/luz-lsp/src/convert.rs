// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! LSP protocol conversion utilities.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use luz_ast::token::Token;

/// Convert a compiler diagnostic (1-based) to an LSP diagnostic
/// (0-based, single-character range).
pub fn to_lsp_diagnostic(diagnostic: &luz_diagnostics::Diagnostic) -> Diagnostic {
    let line = diagnostic.line.saturating_sub(1);
    let col = diagnostic.col.saturating_sub(1);

    Diagnostic {
        range: Range::new(Position::new(line, col), Position::new(line, col + 1)),
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some("luz".to_string()),
        message: diagnostic.message.clone(),
        ..Default::default()
    }
}

/// The LSP range of a token whose rendered text is `len` characters.
pub fn token_range(token: &Token, len: usize) -> Range {
    let line = token.line.saturating_sub(1);
    let col = token.col.saturating_sub(1);
    Range::new(Position::new(line, col), Position::new(line, col + len as u32))
}
