// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lowering for the `fetch` builtin: a multi-line curl block with
//! tmpfile handling, an optional retry loop, and the `_status` /
//! `_body` / `_headers` convention variables.

use luz_ast::expr::{Expr, KeywordArg};

use crate::builtins::find_kwarg;
use crate::generator::Generator;

struct FetchOptions {
    url: String,
    method: Option<String>,
    body: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<String>,
    retries: Option<String>,
}

impl Generator {
    fn parse_fetch_options(&self, args: &[Expr], kwargs: &[KeywordArg]) -> FetchOptions {
        let headers = match find_kwarg(kwargs, "headers") {
            Some(Expr::Map(pairs)) => pairs
                .iter()
                .map(|(key, value)| (key.clone(), self.raw(value)))
                .collect(),
            _ => Vec::new(),
        };

        FetchOptions {
            url: args.first().map(|a| self.expr(a)).unwrap_or_default(),
            method: find_kwarg(kwargs, "method").map(|v| self.raw(v)),
            body: find_kwarg(kwargs, "body").map(|v| self.expr(v)),
            headers,
            timeout: find_kwarg(kwargs, "timeout").map(|v| self.raw(v)),
            retries: find_kwarg(kwargs, "retries").map(|v| self.raw(v)),
        }
    }

    /// `name = fetch(...)`: the curl block followed by the body
    /// assignment.
    pub(crate) fn gen_fetch_assignment(
        &mut self,
        name: &str,
        args: &[Expr],
        kwargs: &[KeywordArg],
    ) {
        let opts = self.parse_fetch_options(args, kwargs);
        self.emit_fetch_block(&opts);
        self.writeln(&format!("{}=\"$_body\"", name));
    }

    /// Standalone `fetch(...)` statement.
    pub(crate) fn gen_fetch_statement(&mut self, args: &[Expr], kwargs: &[KeywordArg]) {
        let opts = self.parse_fetch_options(args, kwargs);
        self.emit_fetch_block(&opts);
    }

    /// Tmpfile setup, the curl call, and cleanup. The trailing
    /// `|| true` keeps `set -euo pipefail` from aborting the script
    /// when curl exits non-zero.
    fn emit_curl_core(&mut self, opts: &FetchOptions) {
        self.writeln("_tmp_headers=$(mktemp)");
        self.writeln("_tmp_body=$(mktemp)");
        self.writeln(&format!("_status=$({}) || true", build_curl_cmd(opts)));
        self.writeln("_body=$(cat \"$_tmp_body\")");
        self.writeln("_headers=$(cat \"$_tmp_headers\")");
        self.writeln("rm -f \"$_tmp_headers\" \"$_tmp_body\"");
    }

    /// The curl block, wrapped in a retry loop when `retries:` was
    /// given. Retries sleep one second between attempts and stop on
    /// the first 2xx status.
    fn emit_fetch_block(&mut self, opts: &FetchOptions) {
        let Some(retries) = &opts.retries else {
            self.emit_curl_core(opts);
            return;
        };

        self.writeln("_fetch_attempt=0");
        self.writeln(&format!("_fetch_max={}", retries));
        self.writeln("while [ \"$_fetch_attempt\" -lt \"$_fetch_max\" ]; do");
        self.indent += 1;
        self.writeln("_fetch_attempt=$((_fetch_attempt + 1))");
        self.emit_curl_core(opts);
        self.writeln("if [ \"$_status\" -ge 200 ] && [ \"$_status\" -lt 300 ]; then");
        self.indent += 1;
        self.writeln("break");
        self.indent -= 1;
        self.writeln("fi");
        self.writeln("sleep 1");
        self.indent -= 1;
        self.writeln("done");
    }
}

fn build_curl_cmd(opts: &FetchOptions) -> String {
    let mut parts = vec!["curl -s -w \"%{http_code}\"".to_string()];

    if let Some(method) = &opts.method {
        parts.push(format!("-X {}", method));
    }

    for (key, value) in &opts.headers {
        parts.push(format!("-H \"{}: {}\"", key, value));
    }

    if let Some(body) = &opts.body {
        parts.push(format!("-d {}", body));
    }

    if let Some(timeout) = &opts.timeout {
        parts.push(format!("--max-time {}", timeout));
    }

    parts.push("-D \"$_tmp_headers\"".to_string());
    parts.push("-o \"$_tmp_body\"".to_string());
    parts.push(opts.url.clone());

    parts.join(" ")
}
