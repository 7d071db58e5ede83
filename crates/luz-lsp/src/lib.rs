// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Luz Language Server
//!
//! Re-uses the lexer and parser — no new compilation semantics.
//! Features:
//! - Diagnostics republish on open/change/save
//! - Hover documentation for builtins, methods, and fetch kwargs
//! - Completion for builtins, keywords, and dot-methods
//! - Whole-document formatting via `luz-fmt`

mod backend;
mod completion;
mod convert;
mod docs;
mod hover;
mod server;

use tower_lsp::{LspService, Server};

use crate::backend::Backend;

/// Serve the language server on stdio until the client disconnects.
pub async fn serve_stdio() {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

/// Blocking wrapper for callers without a runtime (the `luz lsp`
/// subcommand).
pub fn run_stdio() {
    let runtime = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");
    runtime.block_on(serve_stdio());
}
