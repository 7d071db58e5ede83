// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation.

use luz_ast::expr::{BinOp, Expr, KeywordArg, OrFallback, UnaryOp};
use luz_ast::stmt::{MatchCase, Param, Program, Stmt};
use luz_ast::token::{Token, TokenKind};

/// Maximum number of errors recorded per parse. Recovery keeps
/// scanning past this point but stops collecting.
const MAX_ERRORS: usize = 20;

/// A structured parse error with a 1-based source position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl ParseError {
    fn new(message: impl Into<String>, token: &Token) -> Self {
        Self {
            line: token.line,
            col: token.col,
            message: message.into(),
        }
    }

    fn expected(expected: &str, token: &Token) -> Self {
        Self::new(
            format!("expected {}, got {}", expected, token.kind.display_name()),
            token,
        )
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, col {}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Result of parsing: a best-effort program plus every recorded error.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// First-error view, for callers that abort on the initial
    /// diagnostic (the import resolver, simple tooling).
    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }
}

/// The parser for Luz token streams.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, 1, 1));
        }
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the whole token stream, collecting all errors.
    pub fn parse(&mut self) -> ParseResult {
        let mut program = Program::default();

        while !self.at_end() {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
        }

        ParseResult {
            program,
            errors: std::mem::take(&mut self.errors),
        }
    }

    // =========================================================================
    // Token navigation
    // =========================================================================

    fn current(&self) -> &Token {
        // The stream always ends with EOF and `advance` holds there.
        &self.tokens[self.pos]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_kind(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn record(&mut self, error: ParseError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
    }

    /// Consume a token of the given kind. On mismatch, records a
    /// diagnostic and returns a synthetic token of the expected kind
    /// without advancing, so callers never see a failure.
    fn expect(&mut self, kind: &TokenKind) -> Token {
        if self.check(kind) {
            let tok = self.current().clone();
            self.advance();
            tok
        } else {
            let err = ParseError::expected(kind.display_name(), self.current());
            self.record(err);
            Token::synthetic(kind.clone(), self.current().line, self.current().col)
        }
    }

    /// Consume an identifier and return its name, or record a
    /// diagnostic and return `None` without advancing.
    fn expect_ident(&mut self) -> Option<String> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let name = name.clone();
            self.advance();
            Some(name)
        } else {
            let err = ParseError::expected("IDENT", self.current());
            self.record(err);
            None
        }
    }

    /// Surface an illegal token from the lexer as a parse error.
    /// Single stray characters read as `unexpected character 'X'`;
    /// longer lexemes are already messages (`unterminated string`).
    fn record_illegal(&mut self, lexeme: &str) {
        let message = if lexeme.chars().count() == 1 {
            format!("unexpected character '{}'", lexeme)
        } else {
            lexeme.to_string()
        };
        let err = ParseError::new(message, self.current());
        self.record(err);
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::Match => self.parse_match(),
            TokenKind::Fn => self.parse_fn_decl(),
            TokenKind::Return => self.parse_return(),
            TokenKind::While => self.parse_while(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Bash => self.parse_bash(),
            TokenKind::Continue => {
                self.advance();
                Some(Stmt::Continue)
            }
            TokenKind::Break => {
                self.advance();
                Some(Stmt::Break)
            }
            TokenKind::Ident(_) => self.parse_ident_statement(),
            TokenKind::Str(_)
            | TokenKind::Int(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Bang
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace => self.parse_expression().map(Stmt::Expr),
            TokenKind::Illegal(lexeme) => {
                let lexeme = lexeme.clone();
                self.record_illegal(&lexeme);
                self.advance();
                None
            }
            _ => {
                let err = ParseError::new(
                    format!("unexpected token {}", self.current_kind().display_name()),
                    self.current(),
                );
                self.record(err);
                self.advance();
                None
            }
        }
    }

    /// Dispatch a statement that begins with an identifier:
    /// assignment, compound assignment, index assignment, or a plain
    /// expression statement (calls, method calls, bare values).
    fn parse_ident_statement(&mut self) -> Option<Stmt> {
        match self.peek_kind(1) {
            TokenKind::Assign => self.parse_assignment(),
            TokenKind::PlusAssign
            | TokenKind::MinusAssign
            | TokenKind::StarAssign
            | TokenKind::SlashAssign => self.parse_compound_assignment(),
            TokenKind::LBracket => self.parse_index_statement(),
            _ => self.parse_expression().map(Stmt::Expr),
        }
    }

    fn parse_assignment(&mut self) -> Option<Stmt> {
        let name = self.expect_ident().unwrap_or_default();
        self.expect(&TokenKind::Assign);
        let value = self.parse_assignment_value()?;
        Some(Stmt::Assign { name, value })
    }

    /// An assignment RHS: the only context where `|>` and a trailing
    /// `or` fallback are recognised.
    fn parse_assignment_value(&mut self) -> Option<Expr> {
        let value = self.parse_pipe_expr()?;

        if self.check(&TokenKind::Or) {
            self.advance();
            let fallback = self.parse_or_fallback()?;
            return Some(Expr::Or {
                value: Box::new(value),
                fallback,
            });
        }

        Some(value)
    }

    /// `x += v` desugars to `x = x + v` at parse time.
    fn parse_compound_assignment(&mut self) -> Option<Stmt> {
        let name = self.expect_ident().unwrap_or_default();
        let op = match self.current_kind() {
            TokenKind::PlusAssign => BinOp::Add,
            TokenKind::MinusAssign => BinOp::Sub,
            TokenKind::StarAssign => BinOp::Mul,
            _ => BinOp::Div,
        };
        self.advance();
        let rhs = self.parse_expression()?;

        Some(Stmt::Assign {
            name: name.clone(),
            value: Expr::Binary {
                op,
                left: Box::new(Expr::Ident(name)),
                right: Box::new(rhs),
            },
        })
    }

    /// `obj[index] = value`, or an index expression at statement head.
    fn parse_index_statement(&mut self) -> Option<Stmt> {
        let name = self.expect_ident().unwrap_or_default();
        self.expect(&TokenKind::LBracket);
        let index = self.parse_expression()?;
        self.expect(&TokenKind::RBracket);

        if self.check(&TokenKind::Assign) {
            self.advance();
            let value = self.parse_expression()?;
            return Some(Stmt::IndexAssign {
                object: name,
                index,
                value,
            });
        }

        let expr = Expr::Index {
            object: Box::new(Expr::Ident(name)),
            index: Box::new(index),
        };
        let expr = self.parse_postfix_chain(expr)?;
        Some(Stmt::Expr(expr))
    }

    fn parse_block(&mut self) -> Vec<Stmt> {
        self.expect(&TokenKind::LBrace);

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            if let Some(stmt) = self.parse_statement() {
                stmts.push(stmt);
            }
        }

        self.expect(&TokenKind::RBrace);
        stmts
    }

    fn parse_if(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::If);

        let cond = self.parse_condition()?;
        let body = self.parse_block();

        let mut else_body = Vec::new();
        if self.check(&TokenKind::Else) {
            self.advance();
            if self.check(&TokenKind::If) {
                // `else if` nests recursively, collapsing to elif in
                // the generated script.
                else_body.extend(self.parse_if());
            } else {
                else_body = self.parse_block();
            }
        }

        Some(Stmt::If {
            cond,
            body,
            else_body,
        })
    }

    fn parse_while(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::While);
        let cond = self.parse_condition()?;
        let body = self.parse_block();
        Some(Stmt::While { cond, body })
    }

    fn parse_for(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::For);
        let var = self.expect_ident().unwrap_or_default();
        self.expect(&TokenKind::In);
        let collection = self.parse_expression()?;
        let body = self.parse_block();
        Some(Stmt::For {
            var,
            collection,
            body,
        })
    }

    fn parse_fn_decl(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::Fn);
        let name = self.expect_ident().unwrap_or_default();
        self.expect(&TokenKind::LParen);

        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) && !self.at_end() {
            let Some(pname) = self.expect_ident() else {
                break;
            };
            self.expect(&TokenKind::Colon);
            let Some(ty) = self.expect_ident() else {
                break;
            };

            let default = if self.check(&TokenKind::Assign) {
                self.advance();
                self.parse_primary()
            } else {
                None
            };

            params.push(Param {
                name: pname,
                ty,
                default,
            });

            if self.check(&TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect(&TokenKind::RParen);

        let return_type = if self.check(&TokenKind::Arrow) {
            self.advance();
            self.expect_ident()
        } else {
            None
        };

        let body = self.parse_block();

        Some(Stmt::FnDecl {
            name,
            params,
            return_type,
            body,
        })
    }

    fn parse_match(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::Match);
        let scrutinee = self.parse_expression()?;
        self.expect(&TokenKind::LBrace);

        let mut cases = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let pattern = if self.check(&TokenKind::Underscore) {
                self.advance();
                None
            } else {
                Some(self.parse_expression()?)
            };

            self.expect(&TokenKind::FatArrow);

            let body = if self.check(&TokenKind::LBrace) && !self.at_map_literal() {
                self.parse_block()
            } else {
                // Single-statement arms run until the next pattern.
                let mut body = Vec::new();
                while !self.at_arm_boundary() {
                    if let Some(stmt) = self.parse_statement() {
                        body.push(stmt);
                    }
                }
                body
            };

            cases.push(MatchCase { pattern, body });
        }

        self.expect(&TokenKind::RBrace);

        Some(Stmt::Match { scrutinee, cases })
    }

    /// Two-token lookahead for the start of the next match arm: a
    /// literal followed by `=>`, a wildcard, or the closing brace.
    fn at_arm_boundary(&self) -> bool {
        match self.current_kind() {
            TokenKind::RBrace
            | TokenKind::Eof
            | TokenKind::Underscore
            | TokenKind::FatArrow => true,
            TokenKind::Str(_) | TokenKind::Int(_) | TokenKind::True | TokenKind::False => {
                matches!(self.peek_kind(1), TokenKind::FatArrow)
            }
            _ => false,
        }
    }

    fn parse_return(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::Return);

        let value = if !self.check(&TokenKind::RBrace) && !self.at_end() {
            self.parse_expression()
        } else {
            None
        };

        Some(Stmt::Return(value))
    }

    fn parse_import(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::Import);
        if let TokenKind::Str(path) = self.current_kind() {
            let path = path.clone();
            self.advance();
            Some(Stmt::Import { path })
        } else {
            let err = ParseError::expected("STRING", self.current());
            self.record(err);
            None
        }
    }

    fn parse_bash(&mut self) -> Option<Stmt> {
        self.expect(&TokenKind::Bash);
        if let TokenKind::BashContent(content) = self.current_kind() {
            let content = content.clone();
            self.advance();
            Some(Stmt::RawBash { content })
        } else {
            let err = ParseError::expected("BASH_CONTENT", self.current());
            self.record(err);
            None
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Condition context (if/while): `or` joins at the lowest level.
    fn parse_condition(&mut self) -> Option<Expr> {
        let mut left = self.parse_expression()?;

        while self.check(&TokenKind::Or) {
            self.advance();
            let right = self.parse_expression()?;
            left = Expr::Binary {
                op: BinOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Some(left)
    }

    /// Assignment RHS: `|>` chains rewrite to calls in the generator.
    fn parse_pipe_expr(&mut self) -> Option<Expr> {
        let mut left = self.parse_expression()?;

        while self.check(&TokenKind::Pipe) {
            self.advance();
            let right = self.parse_expression()?;
            left = Expr::Binary {
                op: BinOp::Pipe,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Some(left)
    }

    fn parse_expression(&mut self) -> Option<Expr> {
        let mut left = self.parse_comparison()?;

        while self.check(&TokenKind::And) {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::Binary {
                op: BinOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Some(left)
    }

    /// Comparison is non-associative: at most one comparison per level.
    fn parse_comparison(&mut self) -> Option<Expr> {
        let left = self.parse_additive()?;

        if let Some(op) = comparison_op(self.current_kind()) {
            self.advance();
            let right = self.parse_additive()?;
            return Some(Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Some(left)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Some(left)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Some(left)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        if self.check(&TokenKind::Bang) {
            self.advance();
            let operand = self.parse_unary()?;
            return Some(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }

        let primary = self.parse_primary()?;
        self.parse_postfix_chain(primary)
    }

    /// Postfix operators: `.field`, `.method(args)`, `[index]`.
    fn parse_postfix_chain(&mut self, mut expr: Expr) -> Option<Expr> {
        loop {
            if self.check(&TokenKind::Dot) {
                self.advance();
                let name = self.expect_ident().unwrap_or_default();
                if self.check(&TokenKind::LParen) {
                    let (args, kwargs) = self.parse_call_args();
                    if let Some(kw) = kwargs.first() {
                        let err = ParseError::new(
                            format!("keyword argument '{}' not allowed in method call", kw.key),
                            self.current(),
                        );
                        self.record(err);
                    }
                    expr = Expr::MethodCall {
                        object: Box::new(expr),
                        method: name,
                        args,
                    };
                } else {
                    expr = Expr::Field {
                        object: Box::new(expr),
                        field: name,
                    };
                }
            } else if self.check(&TokenKind::LBracket) {
                self.advance();
                let index = self.parse_expression()?;
                self.expect(&TokenKind::RBracket);
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }

        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current_kind().clone() {
            TokenKind::Str(s) => {
                self.advance();
                Some(Expr::Str(s))
            }
            TokenKind::Int(n) => {
                self.advance();
                Some(Expr::Int(n))
            }
            TokenKind::True => {
                self.advance();
                Some(Expr::Bool(true))
            }
            TokenKind::False => {
                self.advance();
                Some(Expr::Bool(false))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RParen);
                Some(expr)
            }
            TokenKind::LBracket => self.parse_list_literal(),
            TokenKind::LBrace => {
                if self.at_map_literal() {
                    self.parse_map_literal()
                } else {
                    let err = ParseError::expected("expression", self.current());
                    self.record(err);
                    self.advance();
                    None
                }
            }
            TokenKind::Ident(name) => {
                if matches!(self.peek_kind(1), TokenKind::LParen) {
                    self.advance();
                    let (args, kwargs) = self.parse_call_args();
                    Some(Expr::Call { name, args, kwargs })
                } else {
                    self.advance();
                    Some(Expr::Ident(name))
                }
            }
            TokenKind::Illegal(lexeme) => {
                self.record_illegal(&lexeme);
                self.advance();
                None
            }
            _ => {
                let err = ParseError::expected("expression", self.current());
                self.record(err);
                self.advance();
                None
            }
        }
    }

    /// Call argument list. Positional arguments must precede keyword
    /// arguments; a violation is diagnosed but the argument is still
    /// recorded.
    fn parse_call_args(&mut self) -> (Vec<Expr>, Vec<KeywordArg>) {
        self.expect(&TokenKind::LParen);

        let mut args = Vec::new();
        let mut kwargs = Vec::new();

        while !self.check(&TokenKind::RParen) && !self.at_end() {
            let is_kwarg = matches!(self.current_kind(), TokenKind::Ident(_))
                && matches!(self.peek_kind(1), TokenKind::Colon);

            if is_kwarg {
                let key = self.expect_ident().unwrap_or_default();
                self.expect(&TokenKind::Colon);
                if let Some(value) = self.parse_expression() {
                    kwargs.push(KeywordArg { key, value });
                }
            } else {
                if !kwargs.is_empty() {
                    let err = ParseError::new(
                        "positional argument after keyword argument",
                        self.current(),
                    );
                    self.record(err);
                }
                if let Some(arg) = self.parse_expression() {
                    args.push(arg);
                }
            }

            if self.check(&TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect(&TokenKind::RParen);
        (args, kwargs)
    }

    fn parse_list_literal(&mut self) -> Option<Expr> {
        self.expect(&TokenKind::LBracket);

        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) && !self.at_end() {
            if let Some(elem) = self.parse_expression() {
                elements.push(elem);
            }
            if self.check(&TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect(&TokenKind::RBracket);
        Some(Expr::List(elements))
    }

    /// `{` starts a map literal when followed by a bare-word or string
    /// key and a colon; otherwise it is a block (legal only in `or`
    /// fallbacks and match arms).
    fn at_map_literal(&self) -> bool {
        self.check(&TokenKind::LBrace)
            && matches!(
                self.peek_kind(1),
                TokenKind::Ident(_) | TokenKind::Str(_)
            )
            && matches!(self.peek_kind(2), TokenKind::Colon)
    }

    fn parse_map_literal(&mut self) -> Option<Expr> {
        self.expect(&TokenKind::LBrace);

        let mut pairs = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            let key = match self.current_kind().clone() {
                TokenKind::Ident(name) => {
                    self.advance();
                    name
                }
                TokenKind::Str(s) => {
                    self.advance();
                    s
                }
                _ => {
                    let err = ParseError::expected("IDENT", self.current());
                    self.record(err);
                    self.advance();
                    continue;
                }
            };

            self.expect(&TokenKind::Colon);
            if let Some(value) = self.parse_expression() {
                pairs.push((key, value));
            }

            if self.check(&TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect(&TokenKind::RBrace);
        Some(Expr::Map(pairs))
    }

    /// The fallback after `or` in an assignment: an expression, a
    /// block expression, or a bare `continue`/`return`.
    fn parse_or_fallback(&mut self) -> Option<OrFallback> {
        if self.check(&TokenKind::LBrace) && !self.at_map_literal() {
            let stmts = self.parse_block();
            return Some(OrFallback::Block(stmts));
        }

        if self.check(&TokenKind::Continue) {
            self.advance();
            return Some(OrFallback::Continue);
        }

        if self.check(&TokenKind::Return) {
            self.advance();
            let value = if !self.check(&TokenKind::RBrace) && !self.at_end() {
                self.parse_expression().map(Box::new)
            } else {
                None
            };
            return Some(OrFallback::Return(value));
        }

        let expr = self.parse_expression()?;
        Some(OrFallback::Expr(Box::new(expr)))
    }
}

fn comparison_op(kind: &TokenKind) -> Option<BinOp> {
    let op = match kind {
        TokenKind::Eq => BinOp::Eq,
        TokenKind::NotEq => BinOp::Ne,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::LtEq => BinOp::Le,
        TokenKind::GtEq => BinOp::Ge,
        _ => return None,
    };
    Some(op)
}
