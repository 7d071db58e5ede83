// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parse-tree shape tests.

use luz_ast::expr::{BinOp, Expr, OrFallback, UnaryOp};
use luz_ast::stmt::{Program, Stmt};
use luz_lexer::Lexer;
use luz_parser::Parser;

fn parse(input: &str) -> Program {
    let tokens = Lexer::new(input).tokenize();
    let result = Parser::new(tokens).parse();
    assert!(
        result.is_ok(),
        "unexpected parse errors for {input:?}: {:?}",
        result.errors
    );
    result.program
}

fn only_statement(input: &str) -> Stmt {
    let mut program = parse(input);
    assert_eq!(program.statements.len(), 1, "statement count for {input:?}");
    program.statements.remove(0)
}

#[test]
fn string_assignment() {
    let stmt = only_statement(r#"name = "hello""#);
    let Stmt::Assign { name, value } = stmt else {
        panic!("expected assignment, got {stmt:?}");
    };
    assert_eq!(name, "name");
    assert_eq!(value, Expr::Str("hello".to_string()));
}

#[test]
fn call_statement() {
    let stmt = only_statement(r#"print("hello", "world")"#);
    let Stmt::Expr(Expr::Call { name, args, kwargs }) = stmt else {
        panic!("expected call statement");
    };
    assert_eq!(name, "print");
    assert_eq!(args.len(), 2);
    assert!(kwargs.is_empty());
}

#[test]
fn or_fallback_value() {
    let stmt = only_statement(r#"val = exec("cmd") or "fallback""#);
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::Or { value, fallback } = value else {
        panic!("expected or-expression");
    };
    assert!(matches!(*value, Expr::Call { .. }));
    let OrFallback::Expr(fb) = fallback else {
        panic!("expected expression fallback");
    };
    assert_eq!(*fb, Expr::Str("fallback".to_string()));
}

#[test]
fn or_fallback_forms() {
    let stmt = only_statement(r#"content = read(f) or continue"#);
    let Stmt::Assign {
        value: Expr::Or { fallback, .. },
        ..
    } = stmt
    else {
        panic!("expected or-assignment");
    };
    assert_eq!(fallback, OrFallback::Continue);

    let stmt = only_statement(r#"data = read(f) or return 1"#);
    let Stmt::Assign {
        value: Expr::Or { fallback, .. },
        ..
    } = stmt
    else {
        panic!("expected or-assignment");
    };
    assert!(matches!(fallback, OrFallback::Return(Some(_))));

    let stmt = only_statement("x = exec(\"cmd\") or { print(\"failed\") \"fb\" }");
    let Stmt::Assign {
        value: Expr::Or { fallback, .. },
        ..
    } = stmt
    else {
        panic!("expected or-assignment");
    };
    let OrFallback::Block(stmts) = fallback else {
        panic!("expected block fallback");
    };
    assert_eq!(stmts.len(), 2);
}

#[test]
fn if_else() {
    let stmt = only_statement(r#"if ok { print("yes") } else { print("no") }"#);
    let Stmt::If {
        cond,
        body,
        else_body,
    } = stmt
    else {
        panic!("expected if");
    };
    assert_eq!(cond, Expr::Ident("ok".to_string()));
    assert_eq!(body.len(), 1);
    assert_eq!(else_body.len(), 1);
}

#[test]
fn else_if_nests() {
    let stmt = only_statement(
        "if x == 1 { print(\"one\") } else if x == 2 { print(\"two\") } else { print(\"other\") }",
    );
    let Stmt::If { else_body, .. } = stmt else {
        panic!("expected if");
    };
    assert_eq!(else_body.len(), 1);
    let Stmt::If {
        else_body: inner_else,
        ..
    } = &else_body[0]
    else {
        panic!("expected nested if in else body");
    };
    assert_eq!(inner_else.len(), 1);
}

#[test]
fn condition_or_and() {
    let stmt = only_statement("if a and b or c { print(\"x\") }");
    let Stmt::If { cond, .. } = stmt else {
        panic!("expected if");
    };
    // `and` binds tighter: (a and b) or c
    let Expr::Binary { op, left, .. } = cond else {
        panic!("expected binary condition");
    };
    assert_eq!(op, BinOp::Or);
    assert!(matches!(
        *left,
        Expr::Binary {
            op: BinOp::And,
            ..
        }
    ));
}

#[test]
fn while_loop() {
    let stmt = only_statement("while x > 0 { break }");
    let Stmt::While { cond, body } = stmt else {
        panic!("expected while");
    };
    assert!(matches!(cond, Expr::Binary { op: BinOp::Gt, .. }));
    assert_eq!(body, vec![Stmt::Break]);
}

#[test]
fn for_loop() {
    let stmt = only_statement("for f in files { print(f) }");
    let Stmt::For {
        var, collection, ..
    } = stmt
    else {
        panic!("expected for");
    };
    assert_eq!(var, "f");
    assert_eq!(collection, Expr::Ident("files".to_string()));
}

#[test]
fn fn_decl_with_return_type() {
    let stmt = only_statement("fn add(a: int, b: int) -> int { return a + b }");
    let Stmt::FnDecl {
        name,
        params,
        return_type,
        body,
    } = stmt
    else {
        panic!("expected fn decl");
    };
    assert_eq!(name, "add");
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name, "a");
    assert_eq!(params[0].ty, "int");
    assert!(params[0].default.is_none());
    assert_eq!(return_type.as_deref(), Some("int"));
    assert_eq!(body.len(), 1);
}

#[test]
fn fn_decl_default_params() {
    let stmt = only_statement(r#"fn deploy(target: str = "staging") { print(target) }"#);
    let Stmt::FnDecl { params, .. } = stmt else {
        panic!("expected fn decl");
    };
    assert_eq!(params[0].default, Some(Expr::Str("staging".to_string())));

    let stmt = only_statement(r#"fn greet(name: str, greeting: str = "Hello") { print(greeting) }"#);
    let Stmt::FnDecl { params, .. } = stmt else {
        panic!("expected fn decl");
    };
    assert!(params[0].default.is_none());
    assert!(params[1].default.is_some());

    let stmt = only_statement("fn retry(count: int = 3) { print(count) }");
    let Stmt::FnDecl { params, .. } = stmt else {
        panic!("expected fn decl");
    };
    assert_eq!(params[0].default, Some(Expr::Int("3".to_string())));
}

#[test]
fn match_with_wildcard() {
    let stmt = only_statement(
        r#"match status { "ok" => print("good") _ => exit(1) }"#,
    );
    let Stmt::Match { scrutinee, cases } = stmt else {
        panic!("expected match");
    };
    assert_eq!(scrutinee, Expr::Ident("status".to_string()));
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].pattern, Some(Expr::Str("ok".to_string())));
    assert_eq!(cases[0].body.len(), 1);
    assert!(cases[1].pattern.is_none());
}

#[test]
fn match_multi_statement_arm() {
    let stmt = only_statement(
        "match p {\n  \"linux\" => print(\"a\")\n  print(\"b\")\n  \"mac\" => print(\"c\")\n}",
    );
    let Stmt::Match { cases, .. } = stmt else {
        panic!("expected match");
    };
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].body.len(), 2, "arm collects until next pattern");
}

#[test]
fn match_braced_arm() {
    let stmt = only_statement(
        "match p {\n  \"linux\" => { print(\"a\") print(\"b\") }\n  _ => print(\"c\")\n}",
    );
    let Stmt::Match { cases, .. } = stmt else {
        panic!("expected match");
    };
    assert_eq!(cases[0].body.len(), 2);
    assert_eq!(cases[1].body.len(), 1);
}

#[test]
fn compound_assignment_desugars() {
    for (input, op) in [
        ("x += 5", BinOp::Add),
        ("x -= 3", BinOp::Sub),
        ("x *= 2", BinOp::Mul),
        ("x /= 4", BinOp::Div),
    ] {
        let stmt = only_statement(input);
        let Stmt::Assign { name, value } = stmt else {
            panic!("expected assignment for {input:?}");
        };
        assert_eq!(name, "x");
        let Expr::Binary {
            op: actual, left, ..
        } = value
        else {
            panic!("expected binary value for {input:?}");
        };
        assert_eq!(actual, op);
        assert_eq!(*left, Expr::Ident("x".to_string()));
    }
}

#[test]
fn index_expressions() {
    let stmt = only_statement("val = arr[0]");
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::Index { object, index } = value else {
        panic!("expected index expression");
    };
    assert_eq!(*object, Expr::Ident("arr".to_string()));
    assert_eq!(*index, Expr::Int("0".to_string()));

    let stmt = only_statement(r#"val = config["host"]"#);
    let Stmt::Assign {
        value: Expr::Index { index, .. },
        ..
    } = stmt
    else {
        panic!("expected index expression");
    };
    assert_eq!(*index, Expr::Str("host".to_string()));
}

#[test]
fn index_assignment() {
    let stmt = only_statement(r#"arr[0] = "new""#);
    let Stmt::IndexAssign { object, index, .. } = stmt else {
        panic!("expected index assignment");
    };
    assert_eq!(object, "arr");
    assert_eq!(index, Expr::Int("0".to_string()));
}

#[test]
fn method_calls_and_chains() {
    let stmt = only_statement(r#"val = name.replace("old", "new")"#);
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::MethodCall {
        object,
        method,
        args,
    } = value
    else {
        panic!("expected method call");
    };
    assert_eq!(*object, Expr::Ident("name".to_string()));
    assert_eq!(method, "replace");
    assert_eq!(args.len(), 2);

    let stmt = only_statement(r#"val = name.replace("a", "b").upper()"#);
    let Stmt::Assign {
        value: Expr::MethodCall { object, method, .. },
        ..
    } = stmt
    else {
        panic!("expected method call");
    };
    assert_eq!(method, "upper");
    assert!(matches!(
        *object,
        Expr::MethodCall { .. }
    ));
}

#[test]
fn keyword_arguments() {
    let stmt = only_statement(r#"fetch("https://api.com", method: "POST", timeout: 30)"#);
    let Stmt::Expr(Expr::Call { args, kwargs, .. }) = stmt else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 1);
    assert_eq!(kwargs.len(), 2);
    assert_eq!(kwargs[0].key, "method");
    assert_eq!(kwargs[0].value, Expr::Str("POST".to_string()));
    assert_eq!(kwargs[1].key, "timeout");
    assert_eq!(kwargs[1].value, Expr::Int("30".to_string()));
}

#[test]
fn kwarg_map_value() {
    let stmt = only_statement(r#"fetch("url", headers: {content_type: "json"})"#);
    let Stmt::Expr(Expr::Call { kwargs, .. }) = stmt else {
        panic!("expected call");
    };
    assert_eq!(kwargs[0].key, "headers");
    assert!(matches!(kwargs[0].value, Expr::Map(_)));
}

#[test]
fn pipe_chains_left_associative() {
    let stmt = only_statement("result = data |> upper |> trim");
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::Binary {
        op: BinOp::Pipe,
        left,
        right,
    } = value
    else {
        panic!("expected pipe");
    };
    assert_eq!(*right, Expr::Ident("trim".to_string()));
    let Expr::Binary {
        op: BinOp::Pipe,
        left: inner_left,
        right: inner_right,
    } = *left
    else {
        panic!("expected nested pipe");
    };
    assert_eq!(*inner_left, Expr::Ident("data".to_string()));
    assert_eq!(*inner_right, Expr::Ident("upper".to_string()));
}

#[test]
fn pipe_with_call_and_or() {
    let stmt = only_statement(r#"result = data |> json_get(".name")"#);
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::Binary {
        op: BinOp::Pipe,
        right,
        ..
    } = value
    else {
        panic!("expected pipe");
    };
    assert!(matches!(*right, Expr::Call { .. }));

    let stmt = only_statement(r#"result = data |> upper or "default""#);
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::Or { value, .. } = value else {
        panic!("expected or around pipe");
    };
    assert!(matches!(
        *value,
        Expr::Binary {
            op: BinOp::Pipe,
            ..
        }
    ));
}

#[test]
fn list_and_map_literals() {
    let stmt = only_statement(r#"items = ["a", "b", "c"]"#);
    let Stmt::Assign {
        value: Expr::List(elems),
        ..
    } = stmt
    else {
        panic!("expected list literal");
    };
    assert_eq!(elems.len(), 3);

    let stmt = only_statement(r#"config = {port: 8080, host: "localhost"}"#);
    let Stmt::Assign {
        value: Expr::Map(pairs),
        ..
    } = stmt
    else {
        panic!("expected map literal");
    };
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0, "port");
    assert_eq!(pairs[1].0, "host");
}

#[test]
fn map_literal_string_keys() {
    let stmt = only_statement(r#"h = {"content-type": "application/json"}"#);
    let Stmt::Assign {
        value: Expr::Map(pairs),
        ..
    } = stmt
    else {
        panic!("expected map literal");
    };
    assert_eq!(pairs[0].0, "content-type");
}

#[test]
fn unary_negation() {
    let stmt = only_statement("if !success { print(\"failed\") }");
    let Stmt::If { cond, .. } = stmt else {
        panic!("expected if");
    };
    let Expr::Unary { op, operand } = cond else {
        panic!("expected unary");
    };
    assert_eq!(op, UnaryOp::Not);
    assert_eq!(*operand, Expr::Ident("success".to_string()));
}

#[test]
fn grouped_arithmetic() {
    let stmt = only_statement("result = (a + b) * c");
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::Binary {
        op: BinOp::Mul,
        left,
        ..
    } = value
    else {
        panic!("expected multiplication");
    };
    assert!(matches!(
        *left,
        Expr::Binary {
            op: BinOp::Add,
            ..
        }
    ));
}

#[test]
fn imports_and_bash_blocks() {
    let stmt = only_statement(r#"import "helpers.lz""#);
    assert_eq!(
        stmt,
        Stmt::Import {
            path: "helpers.lz".to_string()
        }
    );

    let stmt = only_statement("bash {\n    set -euo pipefail\n}");
    let Stmt::RawBash { content } = stmt else {
        panic!("expected raw bash");
    };
    assert!(content.contains("set -euo pipefail"));

    let program = parse("import \"lib.lz\"\nprint(\"hello\")");
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(program.statements[0], Stmt::Import { .. }));
    assert!(matches!(program.statements[1], Stmt::Expr(Expr::Call { .. })));
}

#[test]
fn return_statements() {
    let stmt = only_statement("return 0");
    assert_eq!(stmt, Stmt::Return(Some(Expr::Int("0".to_string()))));

    let stmt = only_statement("fn f(x: int) { return }");
    let Stmt::FnDecl { body, .. } = stmt else {
        panic!("expected fn decl");
    };
    assert_eq!(body, vec![Stmt::Return(None)]);
}

#[test]
fn dot_access_field() {
    let stmt = only_statement("x = f.name");
    let Stmt::Assign { value, .. } = stmt else {
        panic!("expected assignment");
    };
    let Expr::Field { object, field } = value else {
        panic!("expected field access");
    };
    assert_eq!(*object, Expr::Ident("f".to_string()));
    assert_eq!(field, "name");
}

#[test]
fn empty_program() {
    assert!(parse("").statements.is_empty());
    assert!(parse("// just a comment").statements.is_empty());
}
