// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The builtin registry.
//!
//! Two parallel lookup tables — statement lowerings and expression
//! lowerings — from function name to a handler that knows its own
//! Bash. Handlers receive the positional and keyword arguments plus
//! the generator's `expr`/`raw` rendering callbacks, and validate
//! their own arity by emitting `# error:` markers.

use luz_ast::expr::{Expr, KeywordArg};

/// Renders a node in one of the generator's quoting modes.
pub(crate) type Render<'a> = &'a dyn Fn(&Expr) -> String;

type Handler = fn(&[Expr], &[KeywordArg], Render, Render) -> String;

/// Lower a statement-position builtin call. `None` means the name is
/// not a builtin and should lower as a user-defined function.
pub(crate) fn gen_stmt(
    name: &str,
    args: &[Expr],
    kwargs: &[KeywordArg],
    expr: Render,
    raw: Render,
) -> Option<String> {
    stmt_handler(name).map(|handler| handler(args, kwargs, expr, raw))
}

/// Lower an expression-position builtin call.
pub(crate) fn gen_expr(
    name: &str,
    args: &[Expr],
    kwargs: &[KeywordArg],
    expr: Render,
    raw: Render,
) -> Option<String> {
    expr_handler(name).map(|handler| handler(args, kwargs, expr, raw))
}

/// Look up a keyword argument by key.
pub(crate) fn find_kwarg<'a>(kwargs: &'a [KeywordArg], key: &str) -> Option<&'a Expr> {
    kwargs.iter().find(|kw| kw.key == key).map(|kw| &kw.value)
}

/// `print` lowers identically in both positions.
fn print_call(args: &[Expr], _: &[KeywordArg], expr: Render, _: Render) -> String {
    if args.is_empty() {
        return "echo".to_string();
    }
    let parts: Vec<String> = args.iter().map(|a| expr(a)).collect();
    format!("echo {}", parts.join(" "))
}

fn stmt_handler(name: &str) -> Option<Handler> {
    let handler: Handler = match name {
        "print" => print_call,
        "write" => |args, _, expr, _| {
            if args.len() != 2 {
                return "# error: write() requires 2 arguments (path, content)".to_string();
            }
            format!("echo {} > {}", expr(&args[1]), expr(&args[0]))
        },
        "append" => |args, _, expr, _| {
            if args.len() != 2 {
                return "# error: append() requires 2 arguments (path, content)".to_string();
            }
            format!("echo {} >> {}", expr(&args[1]), expr(&args[0]))
        },
        "rm" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: rm() requires 1 argument".to_string();
            }
            format!("rm -f {}", expr(&args[0]))
        },
        "rmdir" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: rmdir() requires 1 argument".to_string();
            }
            format!("rm -rf {}", expr(&args[0]))
        },
        "mkdir" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: mkdir() requires 1 argument".to_string();
            }
            format!("mkdir -p {}", expr(&args[0]))
        },
        "copy" => |args, _, expr, _| {
            if args.len() != 2 {
                return "# error: copy() requires 2 arguments (src, dst)".to_string();
            }
            format!("cp {} {}", expr(&args[0]), expr(&args[1]))
        },
        "move" => |args, _, expr, _| {
            if args.len() != 2 {
                return "# error: move() requires 2 arguments (src, dst)".to_string();
            }
            format!("mv {} {}", expr(&args[0]), expr(&args[1]))
        },
        "chmod" => |args, _, expr, raw| {
            if args.len() != 2 {
                return "# error: chmod() requires 2 arguments (path, mode)".to_string();
            }
            format!("chmod {} {}", raw(&args[1]), expr(&args[0]))
        },
        "chown" => |args, _, expr, raw| {
            if args.len() != 2 {
                return "# error: chown() requires 2 arguments (path, owner)".to_string();
            }
            format!("chown {} {}", raw(&args[1]), expr(&args[0]))
        },
        "exit" => |args, _, _, raw| {
            if args.is_empty() {
                return "exit 0".to_string();
            }
            format!("exit {}", raw(&args[0]))
        },
        "sleep" => |args, _, _, raw| {
            if args.is_empty() {
                return "# error: sleep() requires 1 argument (seconds)".to_string();
            }
            format!("sleep {}", raw(&args[0]))
        },
        _ => return None,
    };
    Some(handler)
}

fn expr_handler(name: &str) -> Option<Handler> {
    let handler: Handler = match name {
        "print" => print_call,
        "exec" => |args, _, _, raw| {
            if args.is_empty() {
                return "# error: exec() requires 1 argument".to_string();
            }
            format!("$({})", raw(&args[0]))
        },
        "env" => |args, _, _, raw| {
            if args.is_empty() {
                return "# error: env() requires 1 argument".to_string();
            }
            format!("\"${{{}}}\"", raw(&args[0]))
        },
        "read" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: read() requires 1 argument".to_string();
            }
            format!("$(cat {})", expr(&args[0]))
        },
        "glob" => |args, _, _, raw| {
            if args.is_empty() {
                return "# error: glob() requires 1 argument".to_string();
            }
            format!("({})", raw(&args[0]))
        },
        "exists" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: exists() requires 1 argument".to_string();
            }
            format!("[ -e {} ]", expr(&args[0]))
        },
        "is_file" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: is_file() requires 1 argument".to_string();
            }
            format!("[ -f {} ]", expr(&args[0]))
        },
        "is_dir" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: is_dir() requires 1 argument".to_string();
            }
            format!("[ -d {} ]", expr(&args[0]))
        },
        "range" => |args, _, _, raw| match args {
            [end] => format!("$(seq 0 {})", raw(end)),
            [start, end] => format!("$(seq {} {})", raw(start), raw(end)),
            _ => "# error: range() requires 1 or 2 arguments".to_string(),
        },
        "args" => |_, _, _, _| "(\"$@\")".to_string(),
        "os" => |_, _, _, _| "$(uname -s | tr '[:upper:]' '[:lower:]')".to_string(),
        "arch" => |_, _, _, _| "$(uname -m)".to_string(),
        "hostname" => |_, _, _, _| "$(hostname)".to_string(),
        "whoami" => |_, _, _, _| "$(whoami)".to_string(),
        "dirname" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: dirname() requires 1 argument".to_string();
            }
            format!("$(dirname {})", expr(&args[0]))
        },
        "basename" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: basename() requires 1 argument".to_string();
            }
            format!("$(basename {})", expr(&args[0]))
        },
        "len" => |args, _, _, raw| {
            if args.is_empty() {
                return "# error: len() requires 1 argument".to_string();
            }
            format!("${{#{}[@]}}", raw(&args[0]))
        },
        "trim" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: trim() requires 1 argument".to_string();
            }
            format!("$(echo {} | xargs)", expr(&args[0]))
        },
        "upper" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: upper() requires 1 argument".to_string();
            }
            format!("$(echo {} | tr '[:lower:]' '[:upper:]')", expr(&args[0]))
        },
        "lower" => |args, _, expr, _| {
            if args.is_empty() {
                return "# error: lower() requires 1 argument".to_string();
            }
            format!("$(echo {} | tr '[:upper:]' '[:lower:]')", expr(&args[0]))
        },
        "json_get" => |args, _, expr, _| {
            if args.len() < 2 {
                return "# error: json_get() requires 2 arguments (data, path)".to_string();
            }
            format!("$(echo {} | jq -r {})", expr(&args[0]), expr(&args[1]))
        },
        "timestamp" => |_, _, _, _| "$(date +%s)".to_string(),
        "date" => |_, _, _, _| "$(date +\"%Y-%m-%d\")".to_string(),
        _ => return None,
    };
    Some(handler)
}
