// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Expression rendering: the three quoting modes (expression, raw,
//! condition) plus arithmetic and string interpolation.

use std::sync::LazyLock;

use regex_lite::Regex;

use luz_ast::expr::{BinOp, Expr, KeywordArg, UnaryOp};

use crate::builtins;
use crate::generator::Generator;

static INTERP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Rewrite `{name}` interpolations to Bash `${name}`.
pub(crate) fn interpolate(s: &str) -> String {
    INTERP_RE.replace_all(s, "$${${1}}").into_owned()
}

/// Escape characters that are special inside Bash double quotes.
/// `$` and backtick are included so source text cannot smuggle in
/// shell expansion; interpolation rewriting runs after this.
fn bash_escape(s: &str) -> String {
    s.replace('\\', r"\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`")
}

/// Map keys become part of Bash variable names; hyphens turn into
/// underscores.
pub(crate) fn sanitize_key(key: &str) -> String {
    key.replace('-', "_")
}

impl Generator {
    /// Expression mode: strings double-quoted with interpolation,
    /// identifiers as `"$name"`, integers and booleans verbatim.
    pub(crate) fn expr(&self, node: &Expr) -> String {
        match node {
            Expr::Str(s) => format!("\"{}\"", interpolate(&bash_escape(s))),
            Expr::Int(n) => n.clone(),
            Expr::Bool(true) => "true".to_string(),
            Expr::Bool(false) => "false".to_string(),
            Expr::Ident(name) => format!("\"${}\"", name),
            Expr::Call { name, args, kwargs } => self.call_expr(name, args, kwargs),
            Expr::Field { object, field } => {
                // Pass-through lowering; not meaningful Bash.
                format!("{}.{}", self.expr(object), field)
            }
            Expr::Binary { op, left, right } => {
                if *op == BinOp::Pipe {
                    return self.pipe_expr(left, right);
                }
                if is_arithmetic(*op) {
                    let prec = arith_precedence(*op);
                    return format!(
                        "$(({} {} {}))",
                        self.arith_operand(left, prec),
                        op.as_str(),
                        self.arith_operand(right, prec)
                    );
                }
                format!("{} {} {}", self.expr(left), op.as_str(), self.expr(right))
            }
            Expr::Unary { op, operand } => format!("{}{}", op.as_str(), self.expr(operand)),
            Expr::List(elements) => {
                let rendered: Vec<String> = elements.iter().map(|e| self.expr(e)).collect();
                format!("({})", rendered.join(" "))
            }
            Expr::Index { object, index } => self.index_expr(object, index),
            Expr::MethodCall {
                object,
                method,
                args,
            } => self.method_call(object, method, args),
            Expr::Map(_) | Expr::Or { .. } | Expr::Block(_) => {
                "# error: unhandled expression type".to_string()
            }
        }
    }

    fn call_expr(&self, name: &str, args: &[Expr], kwargs: &[KeywordArg]) -> String {
        let expr = |e: &Expr| self.expr(e);
        let raw = |e: &Expr| self.raw(e);
        if let Some(code) = builtins::gen_expr(name, args, kwargs, &expr, &raw) {
            return code;
        }

        // User-defined function call.
        let rendered: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
        if rendered.is_empty() {
            name.to_string()
        } else {
            format!("{} {}", name, rendered.join(" "))
        }
    }

    /// `lhs |> f` rewrites to `f(lhs)`; `lhs |> f(args…)` rewrites to
    /// `f(lhs, args…)`.
    fn pipe_expr(&self, left: &Expr, right: &Expr) -> String {
        match right {
            Expr::Ident(name) => self.call_expr(name, std::slice::from_ref(left), &[]),
            Expr::Call { name, args, kwargs } => {
                let mut piped = Vec::with_capacity(args.len() + 1);
                piped.push(left.clone());
                piped.extend(args.iter().cloned());
                self.call_expr(name, &piped, kwargs)
            }
            _ => "# error: pipe target must be a function".to_string(),
        }
    }

    fn index_expr(&self, object: &Expr, index: &Expr) -> String {
        let object = self.var_name(object);
        match index {
            // Map read with a string key collapses to a flat variable.
            Expr::Str(key) => format!("\"${}_{}\"", object, sanitize_key(key)),
            _ => format!("\"${{{}[{}]}}\"", object, self.raw(index)),
        }
    }

    /// The bare variable name of a node, without any `$` prefix.
    fn var_name(&self, node: &Expr) -> String {
        match node {
            Expr::Ident(name) => name.clone(),
            _ => self.raw(node),
        }
    }

    fn method_call(&self, object: &Expr, method: &str, args: &[Expr]) -> String {
        let object = self.var_name(object);
        match method {
            "replace" => {
                if args.len() != 2 {
                    return "# error: replace() requires 2 arguments (old, new)".to_string();
                }
                format!(
                    "\"${{{}//{}/{}}}\"",
                    object,
                    self.raw(&args[0]),
                    self.raw(&args[1])
                )
            }
            "contains" => {
                if args.len() != 1 {
                    return "# error: contains() requires 1 argument".to_string();
                }
                format!("[[ \"${}\" == *\"{}\"* ]]", object, self.raw(&args[0]))
            }
            "starts_with" => {
                if args.len() != 1 {
                    return "# error: starts_with() requires 1 argument".to_string();
                }
                format!("[[ \"${}\" == \"{}\"* ]]", object, self.raw(&args[0]))
            }
            "ends_with" => {
                if args.len() != 1 {
                    return "# error: ends_with() requires 1 argument".to_string();
                }
                format!("[[ \"${}\" == *\"{}\" ]]", object, self.raw(&args[0]))
            }
            _ => format!("# error: unknown method {}", method),
        }
    }

    /// Raw mode: un-quoted values for contexts where quoting would
    /// break the shell (chmod modes, seq bounds, array subscripts).
    pub(crate) fn raw(&self, node: &Expr) -> String {
        match node {
            Expr::Str(s) => interpolate(s),
            Expr::Int(n) => n.clone(),
            Expr::Ident(name) => format!("${}", name),
            _ => self.expr(node),
        }
    }

    /// Condition mode: comparisons become test commands, `and`/`or`
    /// become shell connectives, a bare identifier is a truth test.
    pub(crate) fn condition(&self, node: &Expr) -> String {
        match node {
            Expr::Binary { op, left, right } => match op {
                BinOp::And => format!("{} && {}", self.condition(left), self.condition(right)),
                BinOp::Or => format!("{} || {}", self.condition(left), self.condition(right)),
                _ => {
                    let left = self.condition_operand(left);
                    let right = self.condition_operand(right);
                    format!("[ {} {} {} ]", left, bash_compare_op(*op), right)
                }
            },
            Expr::Unary {
                op: UnaryOp::Not,
                operand,
            } => format!("! {}", self.condition(operand)),
            Expr::Call { name, args, kwargs } => self.call_expr(name, args, kwargs),
            Expr::Ident(name) => format!("[ \"${}\" = true ]", name),
            _ => self.expr(node),
        }
    }

    pub(crate) fn condition_operand(&self, node: &Expr) -> String {
        match node {
            Expr::Ident(name) => format!("\"${}\"", name),
            Expr::Int(n) => n.clone(),
            Expr::Str(s) => format!("\"{}\"", interpolate(&bash_escape(s))),
            _ => self.expr(node),
        }
    }

    /// The iterable of a for loop: arrays expand as `"${name[@]}"`,
    /// command-producing calls run in a subshell.
    pub(crate) fn for_collection(&self, node: &Expr) -> String {
        match node {
            Expr::Ident(name) => format!("\"${{{}[@]}}\"", name),
            Expr::Call { name, args, kwargs } => {
                let rendered = self.call_expr(name, args, kwargs);
                if rendered.starts_with("$(") {
                    rendered
                } else {
                    format!("$({})", rendered)
                }
            }
            _ => self.expr(node),
        }
    }

    /// Arithmetic context: bare names and literals, parenthesised when
    /// a lower-precedence operation nests inside a higher one.
    fn arith_operand(&self, node: &Expr, parent_prec: u8) -> String {
        match node {
            Expr::Ident(name) => name.clone(),
            Expr::Int(n) => n.clone(),
            Expr::Binary { op, left, right } if is_arithmetic(*op) => {
                let prec = arith_precedence(*op);
                let inner = format!(
                    "{} {} {}",
                    self.arith_operand(left, prec),
                    op.as_str(),
                    self.arith_operand(right, prec)
                );
                if parent_prec > prec {
                    format!("({})", inner)
                } else {
                    inner
                }
            }
            _ => self.raw(node),
        }
    }
}

fn is_arithmetic(op: BinOp) -> bool {
    matches!(
        op,
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
    )
}

fn arith_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Add | BinOp::Sub => 1,
        BinOp::Mul | BinOp::Div | BinOp::Mod => 2,
        _ => 0,
    }
}

/// Comparison operators translated for `[ ... ]` tests.
fn bash_compare_op(op: BinOp) -> &'static str {
    match op {
        BinOp::Gt => "-gt",
        BinOp::Lt => "-lt",
        BinOp::Ge => "-ge",
        BinOp::Le => "-le",
        BinOp::Eq => "=",
        BinOp::Ne => "!=",
        _ => op.as_str(),
    }
}
