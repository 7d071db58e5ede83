// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter.
//!
//! Renders one diagnostic per error as
//!
//! ```text
//! deploy.lz:3:9: expected IDENT, got LPAREN
//!   name = (
//!          ^
//! ```
//!
//! At most [`MAX_DISPLAYED`] diagnostics are rendered; the remainder
//! collapse into a single summary line.

use colored::Colorize;

use crate::Diagnostic;

/// Display cap for a single batch of diagnostics.
pub const MAX_DISPLAYED: usize = 10;

/// Formats diagnostics against one source file.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: &'a str,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str, file_name: &'a str) -> Self {
        Self { source, file_name }
    }

    /// Format a single diagnostic with its source line and caret.
    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        // Positionless diagnostics (resolve/codegen) skip line:col.
        let location = if diagnostic.line == 0 {
            self.file_name.to_string()
        } else {
            format!("{}:{}:{}", self.file_name, diagnostic.line, diagnostic.col)
        };
        out.push_str(&format!(
            "{}: {}\n",
            location.bold(),
            diagnostic.message.red()
        ));

        if diagnostic.line == 0 {
            return out;
        }

        if let Some(line_text) = self.line_text(diagnostic.line) {
            out.push_str(&format!("  {}\n", line_text));
            let pad = (diagnostic.col as usize).saturating_sub(1);
            out.push_str(&format!("  {}{}\n", " ".repeat(pad), "^".red().bold()));
        }

        out
    }

    /// Format a batch, truncating after [`MAX_DISPLAYED`] entries.
    pub fn format_batch(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();

        for diagnostic in diagnostics.iter().take(MAX_DISPLAYED) {
            out.push_str(&self.format(diagnostic));
        }

        if diagnostics.len() > MAX_DISPLAYED {
            let remaining = diagnostics.len() - MAX_DISPLAYED;
            out.push_str(&format!("... and {} more error(s)\n", remaining));
        }

        out
    }

    /// Source text of a 1-based line number.
    fn line_text(&self, line: u32) -> Option<&'a str> {
        self.source.lines().nth((line as usize).checked_sub(1)?)
    }
}
