// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The Luz formatter.
//!
//! A line-based re-indenter: every line is trimmed and re-indented by
//! brace depth. It never touches the parser, so it formats broken
//! source just as happily as valid source, and it is idempotent — a
//! second pass is always byte-identical.

mod config;

pub use config::FormatConfig;

/// Format source with the default configuration.
pub fn format_source(source: &str) -> String {
    format_source_with_config(source, &FormatConfig::default())
}

/// Format source with a custom configuration.
pub fn format_source_with_config(source: &str, config: &FormatConfig) -> String {
    let indent = if config.insert_spaces {
        " ".repeat(config.indent_width)
    } else {
        "\t".to_string()
    };

    let mut level: usize = 0;
    let mut result = Vec::new();

    for line in source.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            result.push(String::new());
            continue;
        }

        if trimmed.starts_with('}') {
            level = level.saturating_sub(1);
        }
        result.push(format!("{}{}", indent.repeat(level), trimmed));
        if trimmed.ends_with('{') {
            level += 1;
        }
    }

    result.join("\n")
}
