// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The scanner implementation.

use luz_ast::token::{keyword, Token, TokenKind};

/// The lexer for Luz source code.
///
/// Scans characters (not bytes) so identifiers may contain any Unicode
/// letters. Columns count characters from 1.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
}

impl Lexer {
    /// Create a new lexer for the given source text.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn current(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos + 1).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        if !self.at_end() && self.current() == '\n' {
            self.line += 1;
            self.col = 0;
        }
        self.pos += 1;
        self.col += 1;
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() {
            let c = self.current();
            if c == ' ' || c == '\t' || c == '\n' || c == '\r' {
                self.advance();
            } else if c == '/' && self.peek() == '/' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while !self.at_end() && self.current() != '\n' {
            self.advance();
        }
    }

    /// Scan the entire input. The stream always ends with `EOF`.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        // A leading `#!` line is a shebang and is skipped entirely.
        if self.pos == 0 && self.current() == '#' && self.peek() == '!' {
            while !self.at_end() && self.current() != '\n' {
                self.advance();
            }
        }

        while !self.at_end() {
            self.skip_whitespace();

            if self.at_end() {
                break;
            }

            let (line, col) = (self.line, self.col);
            let c = self.current();

            match c {
                '=' => {
                    if self.peek() == '>' {
                        tokens.push(Token::new(TokenKind::FatArrow, line, col));
                        self.advance();
                    } else if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::Eq, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Assign, line, col));
                    }
                    self.advance();
                }
                '!' => {
                    if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::NotEq, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Bang, line, col));
                    }
                    self.advance();
                }
                '-' => {
                    if self.peek() == '>' {
                        tokens.push(Token::new(TokenKind::Arrow, line, col));
                        self.advance();
                    } else if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::MinusAssign, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Minus, line, col));
                    }
                    self.advance();
                }
                '+' => {
                    if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::PlusAssign, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Plus, line, col));
                    }
                    self.advance();
                }
                '*' => {
                    if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::StarAssign, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Star, line, col));
                    }
                    self.advance();
                }
                '/' => {
                    if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::SlashAssign, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Slash, line, col));
                    }
                    self.advance();
                }
                '%' => {
                    tokens.push(Token::new(TokenKind::Percent, line, col));
                    self.advance();
                }
                '>' => {
                    if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::GtEq, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Gt, line, col));
                    }
                    self.advance();
                }
                '<' => {
                    if self.peek() == '=' {
                        tokens.push(Token::new(TokenKind::LtEq, line, col));
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Lt, line, col));
                    }
                    self.advance();
                }
                '|' => {
                    if self.peek() == '>' {
                        tokens.push(Token::new(TokenKind::Pipe, line, col));
                        self.advance();
                        self.advance();
                    } else {
                        tokens.push(Token::new(TokenKind::Illegal("|".to_string()), line, col));
                        self.advance();
                    }
                }
                '(' => {
                    tokens.push(Token::new(TokenKind::LParen, line, col));
                    self.advance();
                }
                ')' => {
                    tokens.push(Token::new(TokenKind::RParen, line, col));
                    self.advance();
                }
                '{' => {
                    tokens.push(Token::new(TokenKind::LBrace, line, col));
                    self.advance();
                }
                '}' => {
                    tokens.push(Token::new(TokenKind::RBrace, line, col));
                    self.advance();
                }
                '[' => {
                    tokens.push(Token::new(TokenKind::LBracket, line, col));
                    self.advance();
                }
                ']' => {
                    tokens.push(Token::new(TokenKind::RBracket, line, col));
                    self.advance();
                }
                ',' => {
                    tokens.push(Token::new(TokenKind::Comma, line, col));
                    self.advance();
                }
                ':' => {
                    tokens.push(Token::new(TokenKind::Colon, line, col));
                    self.advance();
                }
                '.' => {
                    tokens.push(Token::new(TokenKind::Dot, line, col));
                    self.advance();
                }
                '"' => {
                    tokens.push(Token::new(self.read_string(), line, col));
                }
                '_' if !is_ident_continue(self.peek()) => {
                    tokens.push(Token::new(TokenKind::Underscore, line, col));
                    self.advance();
                }
                c if c.is_ascii_digit() => {
                    tokens.push(Token::new(TokenKind::Int(self.read_number()), line, col));
                }
                c if is_ident_start(c) => {
                    let word = self.read_ident();
                    match keyword(&word) {
                        Some(kind) => {
                            let is_bash = kind == TokenKind::Bash;
                            tokens.push(Token::new(kind, line, col));
                            if is_bash {
                                // `bash` followed by `{` switches into
                                // brace-balanced raw capture.
                                self.skip_whitespace();
                                if self.current() == '{' {
                                    self.advance();
                                    tokens.push(self.read_bash_content());
                                }
                            }
                        }
                        None => tokens.push(Token::new(TokenKind::Ident(word), line, col)),
                    }
                }
                other => {
                    tokens.push(Token::new(TokenKind::Illegal(other.to_string()), line, col));
                    self.advance();
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, self.line, self.col));
        tokens
    }

    /// Read a double-quoted string. Decodes `\"`, `\n`, `\t` and `\\`;
    /// any other escape is preserved verbatim. An unterminated string
    /// becomes an illegal token.
    fn read_string(&mut self) -> TokenKind {
        self.advance(); // opening "
        let mut buf = String::new();

        while !self.at_end() {
            let c = self.current();
            if c == '"' {
                self.advance(); // closing "
                return TokenKind::Str(buf);
            }
            if c == '\\' && self.pos + 1 < self.chars.len() {
                let next = self.peek();
                match next {
                    '"' => buf.push('"'),
                    'n' => buf.push('\n'),
                    't' => buf.push('\t'),
                    '\\' => buf.push('\\'),
                    other => {
                        buf.push('\\');
                        buf.push(other);
                    }
                }
                self.advance();
                self.advance();
            } else {
                buf.push(c);
                self.advance();
            }
        }

        TokenKind::Illegal("unterminated string".to_string())
    }

    fn read_ident(&mut self) -> String {
        let mut word = String::new();
        while !self.at_end() && is_ident_continue(self.current()) {
            word.push(self.current());
            self.advance();
        }
        word
    }

    fn read_number(&mut self) -> String {
        let mut digits = String::new();
        while !self.at_end() && self.current().is_ascii_digit() {
            digits.push(self.current());
            self.advance();
        }
        digits
    }

    /// Capture the body of a `bash { ... }` block. The opening brace
    /// has already been consumed.
    ///
    /// Braces nest; braces inside single- or double-quoted strings and
    /// after a `#` comment (to end of line) are not counted. The token
    /// is positioned at the closing brace and its content has outer
    /// whitespace trimmed. On unterminated input the capture returns
    /// what it has.
    fn read_bash_content(&mut self) -> Token {
        let mut depth = 1usize;
        let mut buf = String::new();

        while !self.at_end() {
            let c = self.current();
            match c {
                '\'' | '"' => self.consume_shell_string(c, &mut buf),
                '#' => {
                    while !self.at_end() && self.current() != '\n' {
                        buf.push(self.current());
                        self.advance();
                    }
                }
                '{' => {
                    depth += 1;
                    buf.push('{');
                    self.advance();
                }
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let (line, col) = (self.line, self.col);
                        self.advance();
                        return Token::new(TokenKind::BashContent(buf.trim().to_string()), line, col);
                    }
                    buf.push('}');
                    self.advance();
                }
                _ => {
                    buf.push(c);
                    self.advance();
                }
            }
        }

        // Unterminated block: best effort.
        Token::new(TokenKind::BashContent(buf.trim().to_string()), self.line, self.col)
    }

    /// Copy a quoted shell string into the capture buffer. A backslash
    /// consumes the following character.
    fn consume_shell_string(&mut self, quote: char, buf: &mut String) {
        buf.push(quote);
        self.advance();
        while !self.at_end() {
            let c = self.current();
            if c == '\\' {
                buf.push(c);
                self.advance();
                if !self.at_end() {
                    buf.push(self.current());
                    self.advance();
                }
                continue;
            }
            buf.push(c);
            self.advance();
            if c == quote {
                break;
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
