// SPDX-License-Identifier: (MIT OR Apache-2.0)

mod common;

use common::{body, compile, compile_with_errors};

#[test]
fn replace_method() {
    let output = body(&compile(
        "name = \"hello world\"\nresult = name.replace(\"world\", \"go\")\nprint(result)\n",
    ));
    assert!(output.contains(r#""${name//world/go}""#));
}

#[test]
fn contains_method() {
    let output = body(&compile(
        "name = \"hello world\"\nif name.contains(\"world\") {\n\tprint(\"found\")\n}\n",
    ));
    assert!(output.contains(r#"[[ "$name" == *"world"* ]]"#));
}

#[test]
fn starts_with_method() {
    let output = body(&compile(
        "path = \"/usr/bin\"\nif path.starts_with(\"/usr\") {\n\tprint(\"yes\")\n}\n",
    ));
    assert!(output.contains(r#"[[ "$path" == "/usr"* ]]"#));
}

#[test]
fn ends_with_method() {
    let output = body(&compile(
        "file = \"script.sh\"\nif file.ends_with(\".sh\") {\n\tprint(\"shell script\")\n}\n",
    ));
    assert!(output.contains(r#"[[ "$file" == *".sh" ]]"#));
}

#[test]
fn unknown_method_is_an_error() {
    let (_, errors) = compile_with_errors("x = name.frobnicate()");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("unknown method frobnicate"));
}

#[test]
fn method_arity_errors() {
    let (_, errors) = compile_with_errors(r#"x = name.replace("only")"#);
    assert!(errors[0].contains("replace() requires 2 arguments"));

    let (_, errors) = compile_with_errors("x = name.contains()");
    assert!(errors[0].contains("contains() requires 1 argument"));
}

#[test]
fn pipe_rewrites_to_call() {
    let output = body(&compile("name = \"hello\"\nresult = name |> upper\n"));
    assert!(output.contains("tr '[:lower:]' '[:upper:]'"));

    let output = body(&compile("name = \"hello\"\nresult = name |> trim\n"));
    assert!(output.contains("xargs"));
}

#[test]
fn pipe_chain_composes() {
    let output = body(&compile("name = \"hello\"\nresult = name |> upper |> trim\n"));
    assert!(output.contains("tr '[:lower:]' '[:upper:]'"));
    assert!(output.contains("xargs"));
}

#[test]
fn pipe_prepends_argument() {
    let output = body(&compile("data = \"test\"\nresult = data |> json_get(\".name\")\n"));
    assert!(output.contains("jq -r"));
    assert!(output.contains(r#"echo "$data""#));
}

#[test]
fn dot_access_passes_through() {
    let output = body(&compile("x = f.name"));
    assert!(output.contains(r#"x="$f".name"#));
}

#[test]
fn bash_block_verbatim() {
    let output = body(&compile(r#"bash { echo "hello world" }"#));
    assert_eq!(output, r#"echo "hello world""#);

    let output = body(&compile("bash {\n    MY_VAR=1\n    trap 'cleanup' EXIT\n}"));
    assert!(output.contains("MY_VAR=1"));
    assert!(output.contains("trap 'cleanup' EXIT"));
}

#[test]
fn bash_block_with_surrounding_code() {
    let output = body(&compile("x = \"before\"\nbash { echo inline }\nprint(x)"));

    assert!(output.contains(r#"x="before""#));
    assert!(output.contains("echo inline"));
    assert!(output.contains(r#"echo "$x""#));
}
