// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Statement lowering.

use luz_ast::expr::{Expr, KeywordArg, OrFallback};
use luz_ast::stmt::{MatchCase, Param, Stmt};

use crate::builtins;
use crate::expressions::sanitize_key;
use crate::generator::Generator;

impl Generator {
    pub(crate) fn gen_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { name, value } => self.gen_assignment(name, value),
            Stmt::IndexAssign {
                object,
                index,
                value,
            } => self.gen_index_assignment(object, index, value),
            Stmt::FnDecl {
                name, params, body, ..
            } => self.gen_fn_decl(name, params, body),
            Stmt::If {
                cond,
                body,
                else_body,
            } => self.gen_if(cond, body, else_body),
            Stmt::While { cond, body } => self.gen_while(cond, body),
            Stmt::For {
                var,
                collection,
                body,
            } => self.gen_for(var, collection, body),
            Stmt::Match { scrutinee, cases } => self.gen_match(scrutinee, cases),
            Stmt::Return(value) => self.gen_return(value.as_ref()),
            Stmt::Continue => self.writeln("continue"),
            Stmt::Break => self.writeln("break"),
            // Imports are spliced away before codegen; one surviving
            // in an unresolved program lowers to nothing.
            Stmt::Import { .. } => {}
            Stmt::RawBash { content } => {
                for line in content.lines() {
                    self.writeln(line);
                }
            }
            Stmt::Expr(Expr::Call { name, args, kwargs }) => self.gen_call_stmt(name, args, kwargs),
            Stmt::Expr(_) => self.writeln("# error: unhandled statement type"),
        }
    }

    fn gen_assignment(&mut self, name: &str, value: &Expr) {
        match value {
            Expr::Or { value, fallback } => self.gen_or_assignment(name, value, fallback),
            Expr::Map(pairs) => self.gen_map_assignment(name, pairs),
            Expr::Call {
                name: func,
                args,
                kwargs,
            } if func == "fetch" => self.gen_fetch_assignment(name, args, kwargs),
            _ => {
                let rendered = self.expr(value);
                self.writeln(&format!("{}={}", name, rendered));
            }
        }
    }

    /// A map literal on the RHS flattens to one variable per key.
    fn gen_map_assignment(&mut self, name: &str, pairs: &[(String, Expr)]) {
        for (key, value) in pairs {
            let rendered = self.expr(value);
            self.writeln(&format!("{}_{}={}", name, sanitize_key(key), rendered));
        }
    }

    fn gen_or_assignment(&mut self, name: &str, value: &Expr, fallback: &OrFallback) {
        if let Expr::Call {
            name: func,
            args,
            kwargs,
        } = value
        {
            // env("VAR") or "default" collapses to "${VAR:-default}".
            if func == "env" {
                if let (Some(var), OrFallback::Expr(fb)) = (args.first(), fallback) {
                    if let Expr::Str(default) = fb.as_ref() {
                        let env_name = self.raw(var);
                        let default = crate::expressions::interpolate(default);
                        self.writeln(&format!(r#"{}="${{{}:-{}}}""#, name, env_name, default));
                        return;
                    }
                }
            }

            // fetch(url) or fallback tests the HTTP status.
            if func == "fetch" {
                self.gen_fetch_assignment(name, args, kwargs);
                self.writeln(r#"if [ "$_status" -ge 200 ] && [ "$_status" -lt 300 ]; then"#);
                self.indent += 1;
                self.writeln("true");
                self.indent -= 1;
                self.writeln("else");
                self.gen_or_fallback(name, fallback);
                self.writeln("fi");
                return;
            }
        }

        // General case: run the primary, assign on success, fall back
        // on a non-zero exit.
        let rendered = self.expr(value);
        self.writeln(&format!(
            "if {}=$({} 2>/dev/null); then",
            name,
            strip_subshell(&rendered)
        ));
        self.indent += 1;
        self.writeln("true");
        self.indent -= 1;
        self.writeln("else");
        self.gen_or_fallback(name, fallback);
        self.writeln("fi");
    }

    fn gen_or_fallback(&mut self, name: &str, fallback: &OrFallback) {
        match fallback {
            OrFallback::Block(stmts) => {
                // The block's terminal value expression becomes the
                // assigned value; calls stay commands.
                match stmts.split_last() {
                    Some((Stmt::Expr(last), rest)) if !matches!(last, Expr::Call { .. }) => {
                        self.gen_block(rest);
                        let rendered = self.expr(last);
                        self.indent += 1;
                        self.writeln(&format!("{}={}", name, rendered));
                        self.indent -= 1;
                    }
                    _ => self.gen_block(stmts),
                }
            }
            OrFallback::Continue => {
                self.indent += 1;
                self.writeln("continue");
                self.indent -= 1;
            }
            OrFallback::Return(value) => {
                self.indent += 1;
                self.gen_return(value.as_deref());
                self.indent -= 1;
            }
            OrFallback::Expr(expr) => match expr.as_ref() {
                Expr::Call {
                    name: func,
                    args,
                    kwargs,
                } => {
                    self.indent += 1;
                    self.gen_call_stmt(func, args, kwargs);
                    self.indent -= 1;
                }
                other => {
                    let rendered = self.expr(other);
                    self.indent += 1;
                    self.writeln(&format!("{}={}", name, rendered));
                    self.indent -= 1;
                }
            },
        }
    }

    pub(crate) fn gen_call_stmt(&mut self, name: &str, args: &[Expr], kwargs: &[KeywordArg]) {
        if name == "fetch" {
            self.gen_fetch_statement(args, kwargs);
            return;
        }

        let lowered = {
            let expr = |e: &Expr| self.expr(e);
            let raw = |e: &Expr| self.raw(e);
            builtins::gen_stmt(name, args, kwargs, &expr, &raw)
        };
        if let Some(code) = lowered {
            self.writeln(&code);
            return;
        }

        // User-defined function call.
        let rendered: Vec<String> = args.iter().map(|a| self.expr(a)).collect();
        if rendered.is_empty() {
            self.writeln(name);
        } else {
            self.writeln(&format!("{} {}", name, rendered.join(" ")));
        }
    }

    fn gen_fn_decl(&mut self, name: &str, params: &[Param], body: &[Stmt]) {
        self.writeln(&format!("{}() {{", name));
        self.indent += 1;

        for (i, param) in params.iter().enumerate() {
            match &param.default {
                Some(default) => {
                    let default = self.raw(default);
                    self.writeln(&format!(
                        r#"local {}="${{{}:-{}}}""#,
                        param.name,
                        i + 1,
                        default
                    ));
                }
                None => self.writeln(&format!(r#"local {}="${}""#, param.name, i + 1)),
            }
        }

        for stmt in body {
            self.gen_statement(stmt);
        }

        self.indent -= 1;
        self.writeln("}");
    }

    fn gen_if(&mut self, cond: &Expr, body: &[Stmt], else_body: &[Stmt]) {
        let cond = self.condition(cond);
        self.writeln(&format!("if {}; then", cond));
        self.gen_block(body);
        self.gen_else_chain(else_body);
        self.writeln("fi");
    }

    /// A single nested `If` in the else body collapses to `elif`.
    fn gen_else_chain(&mut self, else_body: &[Stmt]) {
        if let [Stmt::If {
            cond,
            body,
            else_body: nested_else,
        }] = else_body
        {
            let cond = self.condition(cond);
            self.writeln(&format!("elif {}; then", cond));
            self.gen_block(body);
            self.gen_else_chain(nested_else);
            return;
        }
        if !else_body.is_empty() {
            self.writeln("else");
            self.gen_block(else_body);
        }
    }

    fn gen_while(&mut self, cond: &Expr, body: &[Stmt]) {
        let cond = self.condition(cond);
        self.writeln(&format!("while {}; do", cond));
        self.gen_block(body);
        self.writeln("done");
    }

    fn gen_for(&mut self, var: &str, collection: &Expr, body: &[Stmt]) {
        let collection = self.for_collection(collection);
        self.writeln(&format!("for {} in {}; do", var, collection));
        self.gen_block(body);
        self.writeln("done");
    }

    fn gen_match(&mut self, scrutinee: &Expr, cases: &[MatchCase]) {
        let operand = self.condition_operand(scrutinee);
        self.writeln(&format!("case {} in", operand));
        self.indent += 1;

        for case in cases {
            match &case.pattern {
                None => self.writeln("*)"),
                Some(pattern) => {
                    let pattern = self.raw(pattern);
                    self.writeln(&format!("{})", pattern));
                }
            }
            self.indent += 1;
            for stmt in &case.body {
                self.gen_statement(stmt);
            }
            self.writeln(";;");
            self.indent -= 1;
        }

        self.indent -= 1;
        self.writeln("esac");
    }

    fn gen_index_assignment(&mut self, object: &str, index: &Expr, value: &Expr) {
        let rendered = self.expr(value);
        if let Expr::Str(key) = index {
            // Map write: config["host"] = v  →  config_host=v
            self.writeln(&format!("{}_{}={}", object, sanitize_key(key), rendered));
        } else {
            let index = self.raw(index);
            self.writeln(&format!("{}[{}]={}", object, index, rendered));
        }
    }

    fn gen_return(&mut self, value: Option<&Expr>) {
        match value {
            None => self.writeln("return"),
            Some(value) => {
                let rendered = self.expr(value);
                self.writeln(&format!("return {}", rendered));
            }
        }
    }
}

/// Remove a `$( ... )` wrapper so the command can run directly inside
/// `if name=$( ... )`.
fn strip_subshell(s: &str) -> String {
    if s.len() >= 3 && s.starts_with("$(") && s.ends_with(')') {
        s[2..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}
