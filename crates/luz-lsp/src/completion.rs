// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Completion providers.

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, Documentation, MarkupContent, MarkupKind,
};

use luz_ast::token::KEYWORDS;

use crate::docs;

/// Builtin functions plus language keywords.
pub fn identifier_completions() -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = docs::BUILTIN_DOCS
        .iter()
        .map(|(name, doc)| item(name, CompletionItemKind::FUNCTION, doc))
        .collect();

    items.extend(KEYWORDS.iter().map(|kw| CompletionItem {
        label: kw.to_string(),
        kind: Some(CompletionItemKind::KEYWORD),
        ..Default::default()
    }));

    items
}

/// Methods offered after a `.` trigger.
pub fn dot_completions() -> Vec<CompletionItem> {
    docs::METHOD_DOCS
        .iter()
        .map(|(name, doc)| item(name, CompletionItemKind::METHOD, doc))
        .collect()
}

fn item(name: &str, kind: CompletionItemKind, doc: &str) -> CompletionItem {
    CompletionItem {
        label: name.to_string(),
        kind: Some(kind),
        documentation: Some(Documentation::MarkupContent(MarkupContent {
            kind: MarkupKind::Markdown,
            value: doc.to_string(),
        })),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_completions_cover_builtins_and_keywords() {
        let items = identifier_completions();
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();

        assert!(labels.contains(&"print"));
        assert!(labels.contains(&"fetch"));
        assert!(labels.contains(&"while"));
        assert!(labels.contains(&"match"));
    }

    #[test]
    fn dot_completions_are_methods() {
        let items = dot_completions();
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();

        assert_eq!(labels, ["replace", "contains", "starts_with", "ends_with"]);
    }
}
