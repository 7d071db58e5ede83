// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Machine-readable diagnostic output for editor tooling
//! (`luz build --json`).

use serde::Serialize;

use crate::Diagnostic;

#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    errors: &'a [Diagnostic],
}

/// Serialize a diagnostic batch as a single JSON object.
pub fn to_json(file: &str, diagnostics: &[Diagnostic]) -> String {
    let report = JsonReport {
        file,
        errors: diagnostics,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}
