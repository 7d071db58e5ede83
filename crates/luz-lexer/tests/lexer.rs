// SPDX-License-Identifier: (MIT OR Apache-2.0)

use luz_ast::token::{Token, TokenKind};
use luz_lexer::Lexer;

fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).into_iter().map(|t| t.kind).collect()
}

fn assert_kinds(input: &str, mut expected: Vec<TokenKind>) {
    expected.push(TokenKind::Eof);
    assert_eq!(kinds(input), expected, "token stream for {input:?}");
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_string())
}

fn int(digits: &str) -> TokenKind {
    TokenKind::Int(digits.to_string())
}

fn string(content: &str) -> TokenKind {
    TokenKind::Str(content.to_string())
}

#[test]
fn assignment() {
    assert_kinds(
        r#"name = "hello""#,
        vec![ident("name"), TokenKind::Assign, string("hello")],
    );
}

#[test]
fn integer_literal() {
    assert_kinds("count = 42", vec![ident("count"), TokenKind::Assign, int("42")]);
}

#[test]
fn keywords() {
    assert_kinds(
        "if true { return }",
        vec![
            TokenKind::If,
            TokenKind::True,
            TokenKind::LBrace,
            TokenKind::Return,
            TokenKind::RBrace,
        ],
    );
}

#[test]
fn function_declaration() {
    assert_kinds(
        "fn greet(name: str) {",
        vec![
            TokenKind::Fn,
            ident("greet"),
            TokenKind::LParen,
            ident("name"),
            TokenKind::Colon,
            ident("str"),
            TokenKind::RParen,
            TokenKind::LBrace,
        ],
    );
}

#[test]
fn for_loop() {
    assert_kinds(
        "for f in files {",
        vec![
            TokenKind::For,
            ident("f"),
            TokenKind::In,
            ident("files"),
            TokenKind::LBrace,
        ],
    );
}

#[test]
fn or_fallback() {
    assert_kinds(
        r#"val = exec("cmd") or "fallback""#,
        vec![
            ident("val"),
            TokenKind::Assign,
            ident("exec"),
            TokenKind::LParen,
            string("cmd"),
            TokenKind::RParen,
            TokenKind::Or,
            string("fallback"),
        ],
    );
}

#[test]
fn arrow_and_comma() {
    assert_kinds(
        "fn add(a: int, b: int) -> int {",
        vec![
            TokenKind::Fn,
            ident("add"),
            TokenKind::LParen,
            ident("a"),
            TokenKind::Colon,
            ident("int"),
            TokenKind::Comma,
            ident("b"),
            TokenKind::Colon,
            ident("int"),
            TokenKind::RParen,
            TokenKind::Arrow,
            ident("int"),
            TokenKind::LBrace,
        ],
    );
}

#[test]
fn match_statement() {
    assert_kinds(
        r#"match status { "ok" => print("good") _ => exit(1) }"#,
        vec![
            TokenKind::Match,
            ident("status"),
            TokenKind::LBrace,
            string("ok"),
            TokenKind::FatArrow,
            ident("print"),
            TokenKind::LParen,
            string("good"),
            TokenKind::RParen,
            TokenKind::Underscore,
            TokenKind::FatArrow,
            ident("exit"),
            TokenKind::LParen,
            int("1"),
            TokenKind::RParen,
            TokenKind::RBrace,
        ],
    );
}

#[test]
fn comparison_operators() {
    assert_kinds("a == b", vec![ident("a"), TokenKind::Eq, ident("b")]);
    assert_kinds("a != b", vec![ident("a"), TokenKind::NotEq, ident("b")]);
    assert_kinds("a < b", vec![ident("a"), TokenKind::Lt, ident("b")]);
    assert_kinds("a >= b", vec![ident("a"), TokenKind::GtEq, ident("b")]);
    assert_kinds("a <= b", vec![ident("a"), TokenKind::LtEq, ident("b")]);
}

#[test]
fn arithmetic_operators() {
    assert_kinds(
        "a + b - c * d / e % f",
        vec![
            ident("a"),
            TokenKind::Plus,
            ident("b"),
            TokenKind::Minus,
            ident("c"),
            TokenKind::Star,
            ident("d"),
            TokenKind::Slash,
            ident("e"),
            TokenKind::Percent,
            ident("f"),
        ],
    );
}

#[test]
fn parenthesized_expression() {
    assert_kinds(
        "x = (a + b) * c",
        vec![
            ident("x"),
            TokenKind::Assign,
            TokenKind::LParen,
            ident("a"),
            TokenKind::Plus,
            ident("b"),
            TokenKind::RParen,
            TokenKind::Star,
            ident("c"),
        ],
    );
}

#[test]
fn while_and_break() {
    assert_kinds(
        "while x > 0 { break }",
        vec![
            TokenKind::While,
            ident("x"),
            TokenKind::Gt,
            int("0"),
            TokenKind::LBrace,
            TokenKind::Break,
            TokenKind::RBrace,
        ],
    );
}

#[test]
fn and_or_keywords() {
    assert_kinds(
        "if a and b or c {",
        vec![
            TokenKind::If,
            ident("a"),
            TokenKind::And,
            ident("b"),
            TokenKind::Or,
            ident("c"),
            TokenKind::LBrace,
        ],
    );
}

#[test]
fn booleans_and_negation() {
    assert_kinds("x = false", vec![ident("x"), TokenKind::Assign, TokenKind::False]);
    assert_kinds(
        "if !success {",
        vec![TokenKind::If, TokenKind::Bang, ident("success"), TokenKind::LBrace],
    );
}

#[test]
fn dot_access() {
    assert_kinds("f.name", vec![ident("f"), TokenKind::Dot, ident("name")]);
}

#[test]
fn line_comments_skipped() {
    assert_kinds(
        "x = 1 // this is a comment\ny = 2",
        vec![
            ident("x"),
            TokenKind::Assign,
            int("1"),
            ident("y"),
            TokenKind::Assign,
            int("2"),
        ],
    );
    assert_kinds("// just a comment", vec![]);
}

#[test]
fn string_escapes() {
    assert_kinds(
        r#"x = "say \"hello\"""#,
        vec![ident("x"), TokenKind::Assign, string(r#"say "hello""#)],
    );
    assert_kinds(
        r#"x = "line1\nline2""#,
        vec![ident("x"), TokenKind::Assign, string("line1\nline2")],
    );
    assert_kinds(
        r#"x = "col1\tcol2""#,
        vec![ident("x"), TokenKind::Assign, string("col1\tcol2")],
    );
    assert_kinds(
        r#"x = "path\\to\\file""#,
        vec![ident("x"), TokenKind::Assign, string(r"path\to\file")],
    );
    // Unknown escapes pass through verbatim.
    assert_kinds(
        r#"x = "a\qb""#,
        vec![ident("x"), TokenKind::Assign, string(r"a\qb")],
    );
}

#[test]
fn compound_assign_tokens() {
    assert_kinds("x += 5", vec![ident("x"), TokenKind::PlusAssign, int("5")]);
    assert_kinds("x -= 3", vec![ident("x"), TokenKind::MinusAssign, int("3")]);
    assert_kinds("x *= 2", vec![ident("x"), TokenKind::StarAssign, int("2")]);
    assert_kinds("x /= 4", vec![ident("x"), TokenKind::SlashAssign, int("4")]);
}

#[test]
fn pipe_operator() {
    assert_kinds(
        "data |> upper |> trim",
        vec![
            ident("data"),
            TokenKind::Pipe,
            ident("upper"),
            TokenKind::Pipe,
            ident("trim"),
        ],
    );
}

#[test]
fn token_positions() {
    let tokens = lex("x = 1\ny = 2");

    assert_eq!((tokens[0].line, tokens[0].col), (1, 1), "x");
    assert_eq!((tokens[2].line, tokens[2].col), (1, 5), "1");
    assert_eq!((tokens[3].line, tokens[3].col), (2, 1), "y");
}

#[test]
fn unterminated_string() {
    let tokens = lex(r#"x = "unterminated"#);
    assert!(tokens.len() >= 4);
    assert_eq!(tokens[0].kind, ident("x"));
    assert_eq!(tokens[1].kind, TokenKind::Assign);
    assert_eq!(
        tokens[2].kind,
        TokenKind::Illegal("unterminated string".to_string())
    );
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn unknown_characters() {
    let tokens = lex("x = @");
    assert_eq!(tokens[2].kind, TokenKind::Illegal("@".to_string()));

    let tokens = lex("~");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Illegal("~".to_string()));
}

#[test]
fn unicode_identifiers() {
    assert_kinds(
        "名前 = \"hello\"",
        vec![ident("名前"), TokenKind::Assign, string("hello")],
    );
    assert_kinds("café2 = 42", vec![ident("café2"), TokenKind::Assign, int("42")]);
}

#[test]
fn empty_and_whitespace_input() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);

    let tokens = lex("   \t\n  ");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn shebang_skipped() {
    assert_kinds(
        "#!/usr/bin/env luz\nprint(\"hi\")",
        vec![
            ident("print"),
            TokenKind::LParen,
            string("hi"),
            TokenKind::RParen,
        ],
    );

    let tokens = lex("#!/usr/bin/env luz\n");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn hash_without_bang_is_illegal() {
    let tokens = lex("# not a shebang");
    assert_eq!(tokens[0].kind, TokenKind::Illegal("#".to_string()));
}

#[test]
fn bash_block_simple() {
    let tokens = lex(r#"bash { echo "hello" }"#);
    assert!(tokens.len() >= 3);
    assert_eq!(tokens[0].kind, TokenKind::Bash);
    assert_eq!(
        tokens[1].kind,
        TokenKind::BashContent(r#"echo "hello""#.to_string())
    );
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn bash_block_multiline() {
    let tokens = lex("bash {\n    set -euo pipefail\n    trap 'cleanup' EXIT\n}");
    let TokenKind::BashContent(content) = &tokens[1].kind else {
        panic!("expected BASH_CONTENT, got {:?}", tokens[1].kind);
    };
    assert!(content.contains("set -euo pipefail"));
    assert!(content.contains("trap 'cleanup' EXIT"));
}

#[test]
fn bash_block_nested_braces() {
    let tokens = lex("bash {\n    if [ -f file ]; then\n        echo \"found\"\n    fi\n}");
    let TokenKind::BashContent(content) = &tokens[1].kind else {
        panic!("expected BASH_CONTENT, got {:?}", tokens[1].kind);
    };
    assert!(content.contains("if [ -f file ]"));
}

#[test]
fn bash_block_braces_in_strings_and_comments() {
    // Braces inside quoted strings do not count toward nesting.
    let tokens = lex(r#"bash { echo "}" }"#);
    assert_eq!(tokens[1].kind, TokenKind::BashContent(r#"echo "}""#.to_string()));

    let tokens = lex("bash { echo '{'\n}");
    assert_eq!(tokens[1].kind, TokenKind::BashContent("echo '{'".to_string()));

    // A shell comment hides braces to end of line.
    let tokens = lex("bash {\n  # closing } in comment\n  echo ok\n}");
    let TokenKind::BashContent(content) = &tokens[1].kind else {
        panic!("expected BASH_CONTENT, got {:?}", tokens[1].kind);
    };
    assert!(content.contains("echo ok"));
}

#[test]
fn bash_keyword_without_block() {
    let tokens = lex("bash");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Bash);
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn bash_block_unterminated_is_best_effort() {
    let tokens = lex("bash { echo partial");
    assert_eq!(tokens[0].kind, TokenKind::Bash);
    assert_eq!(tokens[1].kind, TokenKind::BashContent("echo partial".to_string()));
}

#[test]
fn import_tokens() {
    assert_kinds(
        r#"import "helpers.lz""#,
        vec![TokenKind::Import, string("helpers.lz")],
    );
}

#[test]
fn underscore_prefixed_identifier() {
    // `_` alone is the wildcard; `_tmp` is an ordinary identifier.
    assert_kinds("_", vec![TokenKind::Underscore]);
    assert_kinds("_tmp = 1", vec![ident("_tmp"), TokenKind::Assign, int("1")]);
}
