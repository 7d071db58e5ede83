// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Server state and the analyze pipeline.

use std::collections::HashMap;
use std::sync::RwLock;

use tower_lsp::lsp_types::{Diagnostic, Url};
use tower_lsp::Client;

use luz_diagnostics::Phase;
use luz_lexer::Lexer;
use luz_parser::Parser;

use crate::convert::to_lsp_diagnostic;

pub struct Backend {
    pub client: Client,
    pub documents: RwLock<HashMap<Url, String>>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub async fn publish_diagnostics(&self, uri: Url, text: &str) {
        let diagnostics: Vec<Diagnostic> = analyze(text)
            .iter()
            .map(to_lsp_diagnostic)
            .collect();

        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }
}

/// Lex and parse one document snapshot, deduplicating diagnostics to
/// one per source line. Each call is independent; the server holds no
/// compiler state between requests.
pub fn analyze(source: &str) -> Vec<luz_diagnostics::Diagnostic> {
    let tokens = Lexer::new(source).tokenize();
    let result = Parser::new(tokens).parse();

    let mut diagnostics = Vec::new();
    let mut last_line = None;
    for error in &result.errors {
        if last_line == Some(error.line) {
            continue;
        }
        last_line = Some(error.line);
        diagnostics.push(luz_diagnostics::Diagnostic::new(
            Phase::Parse,
            error.line,
            error.col,
            error.message.clone(),
        ));
    }
    diagnostics
}
