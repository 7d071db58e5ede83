// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Hover documentation lookup.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};

use luz_ast::token::{Token, TokenKind};
use luz_lexer::Lexer;

use crate::convert::token_range;
use crate::docs;

/// Hover info for the identifier at a 1-based position, if it is a
/// documented builtin, dot-method, or fetch keyword argument.
pub fn hover_at(source: &str, line: u32, col: u32) -> Option<Hover> {
    let tokens = Lexer::new(source).tokenize();
    let idx = find_ident_at(&tokens, line, col)?;

    let TokenKind::Ident(name) = &tokens[idx].kind else {
        return None;
    };

    let doc = lookup_doc(&tokens, idx, name)?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: doc,
        }),
        range: Some(token_range(&tokens[idx], name.chars().count())),
    })
}

fn lookup_doc(tokens: &[Token], idx: usize, name: &str) -> Option<String> {
    if let Some(doc) = docs::builtin_doc(name) {
        return Some(doc.to_string());
    }

    // Method: identifier preceded by a dot.
    if idx > 0 && tokens[idx - 1].kind == TokenKind::Dot {
        if let Some(doc) = docs::method_doc(name) {
            return Some(doc.to_string());
        }
    }

    // Keyword argument: identifier followed by a colon.
    if matches!(tokens.get(idx + 1).map(|t| &t.kind), Some(TokenKind::Colon)) {
        if let Some(desc) = docs::fetch_kwarg_doc(name) {
            return Some(format!("**{}:** {}", name, desc));
        }
    }

    None
}

/// Find the identifier token spanning the given 1-based position.
fn find_ident_at(tokens: &[Token], line: u32, col: u32) -> Option<usize> {
    tokens.iter().position(|token| {
        let TokenKind::Ident(name) = &token.kind else {
            return false;
        };
        let end = token.col + name.chars().count() as u32;
        token.line == line && col >= token.col && col < end
    })
}
