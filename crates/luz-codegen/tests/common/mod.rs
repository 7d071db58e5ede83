// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Shared helpers for codegen tests.

use luz_codegen::generate;
use luz_lexer::Lexer;
use luz_parser::Parser;

/// Compile source to Bash, asserting the front-end succeeded.
pub fn compile(input: &str) -> String {
    let tokens = Lexer::new(input).tokenize();
    let result = Parser::new(tokens).parse();
    assert!(result.is_ok(), "parse errors: {:?}", result.errors);
    generate(&result.program).script
}

/// Compile and return the codegen error list alongside the script.
pub fn compile_with_errors(input: &str) -> (String, Vec<String>) {
    let tokens = Lexer::new(input).tokenize();
    let result = Parser::new(tokens).parse();
    let output = generate(&result.program);
    (output.script, output.errors)
}

/// Strip the prologue and blank lines, leaving just the lowered body.
pub fn body(output: &str) -> String {
    output
        .lines()
        .filter(|line| *line != "#!/bin/bash" && *line != "set -euo pipefail" && !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
