//! MySQL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::{ParserOptions, SqlMode};

/// A lexer that tokenizes MySQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Active SQL mode flags.
    sql_mode: SqlMode,
    /// Server version used to evaluate `/*!NNNNN ... */` comments.
    server_version: u32,
    /// True while lexing the body of an executable version comment.
    in_version_comment: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, &ParserOptions::default())
    }

    /// Creates a new lexer honouring the given SQL mode and server version.
    #[must_use]
    pub const fn with_options(input: &'a str, options: &ParserOptions) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            sql_mode: options.sql_mode,
            server_version: options.server_version,
            in_version_comment: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Returns the character after the next one without advancing.
    fn peek_third(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(2)
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    ///
    /// Returns an error token for an unterminated block comment.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // `#` comments
            if self.peek() == Some('#') {
                self.skip_line();
                continue;
            }

            // `-- ` comments need whitespace (or end of input) after the dashes
            if self.peek() == Some('-')
                && self.peek_next() == Some('-')
                && self.peek_third().is_none_or(char::is_whitespace)
            {
                self.skip_line();
                continue;
            }

            // Closing marker of an executable version comment
            if self.in_version_comment && self.peek() == Some('*') && self.peek_next() == Some('/')
            {
                self.advance();
                self.advance();
                self.in_version_comment = false;
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.start = self.pos;
                self.advance(); // /
                self.advance(); // *
                if self.peek() == Some('!') && !self.in_version_comment {
                    self.advance();
                    if self.enter_version_comment() {
                        continue;
                    }
                }
                if !self.skip_block_comment() {
                    return Some(self.make_token(TokenKind::Error(String::from(
                        "Unterminated comment",
                    ))));
                }
                continue;
            }

            return None;
        }
    }

    /// Skips to the end of the current line.
    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    /// Skips a block comment body; the opening `/*` is already consumed.
    ///
    /// Returns false if the comment is unterminated.
    fn skip_block_comment(&mut self) -> bool {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return true;
                }
                None => return false,
                _ => {}
            }
        }
    }

    /// Handles `/*!` (already consumed). Returns true if the body should be
    /// lexed as SQL; otherwise the caller skips it as a comment.
    fn enter_version_comment(&mut self) -> bool {
        let digits_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let digits = &self.input[digits_start..self.pos];
        let enabled = if digits.is_empty() {
            true
        } else {
            digits
                .parse::<u32>()
                .is_ok_and(|version| version <= self.server_version)
        };
        self.in_version_comment = enabled;
        enabled
    }

    /// Creates a span from start to current position.
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Returns true if `c` can continue an unquoted identifier.
    fn is_identifier_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$'
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(Self::is_identifier_char) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];

        if let Some(keyword) = Keyword::from_str(text) {
            self.make_token(TokenKind::Keyword(keyword))
        } else {
            self.make_token(TokenKind::Identifier(String::from(text)))
        }
    }

    /// Scans a quoted identifier (`` `name` `` or `"name"` under ANSI_QUOTES).
    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        match self.scan_quoted_body(quote, false) {
            Ok(name) if name.is_empty() => {
                self.make_token(TokenKind::Error(String::from("Empty quoted identifier")))
            }
            Ok(name) => self.make_token(TokenKind::QuotedIdentifier(name)),
            Err(()) => self.make_token(TokenKind::Error(String::from(
                "Unterminated quoted identifier",
            ))),
        }
    }

    /// Reads a quoted body; the cursor is on the opening quote.
    ///
    /// A doubled quote stands for one quote character. Backslash escapes are
    /// processed when `escapes` is set.
    fn scan_quoted_body(&mut self, quote: char, escapes: bool) -> Result<String, ()> {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                        value.push(quote);
                    } else {
                        return Ok(value);
                    }
                }
                Some('\\') if escapes => match self.advance() {
                    Some('0') => value.push('\0'),
                    Some('b') => value.push('\u{8}'),
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some('Z') => value.push('\u{1a}'),
                    Some(c @ ('%' | '_')) => {
                        value.push('\\');
                        value.push(c);
                    }
                    Some(c) => value.push(c),
                    None => return Err(()),
                },
                Some(c) => value.push(c),
                None => return Err(()),
            }
        }
    }

    /// Scans a string literal; the cursor is on the opening quote.
    fn scan_string(&mut self, quote: char) -> Token {
        let escapes = !self.sql_mode.contains(SqlMode::NO_BACKSLASH_ESCAPES);
        match self.scan_quoted_body(quote, escapes) {
            Ok(value) => self.make_token(TokenKind::String(value)),
            Err(()) => {
                self.make_token(TokenKind::Error(String::from("Unterminated string literal")))
            }
        }
    }

    /// Scans a number (integer, decimal or float).
    ///
    /// Digit runs followed by identifier characters (e.g. `1abc`) are
    /// identifiers in MySQL.
    fn scan_number(&mut self) -> Token {
        let mut is_decimal = false;
        let mut is_float = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_none_or(|c| c.is_ascii_digit()) {
            is_decimal = true;
            self.advance(); // consume .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        } else if self.peek() == Some('.')
            && self
                .peek_next()
                .is_some_and(|c| !Self::is_identifier_char(c))
        {
            // `1.` is a valid decimal
            is_decimal = true;
            self.advance();
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let exponent_digit = match self.peek_next() {
                Some('+' | '-') => self.peek_third().is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if exponent_digit {
                is_float = true;
                self.advance(); // consume e/E
                if self.peek().is_some_and(|c| c == '+' || c == '-') {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        if !is_decimal && !is_float && self.peek().is_some_and(Self::is_identifier_char) {
            return self.scan_identifier();
        }

        let text = &self.input[self.start..self.pos];

        if is_float {
            match text.parse::<f64>() {
                Ok(f) => self.make_token(TokenKind::Float(f)),
                Err(e) => self.make_token(TokenKind::Error(format!("Invalid number: {e}"))),
            }
        } else if is_decimal {
            self.make_token(TokenKind::Decimal(String::from(text)))
        } else {
            match text.parse::<u64>() {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                // Out of u64 range: keep the exact digits.
                Err(_) => self.make_token(TokenKind::Decimal(String::from(text))),
            }
        }
    }

    /// Scans `0x...` / `0b...` literals; the cursor is after the `0`.
    ///
    /// Returns `None` when the prefix is not followed by valid digits, in
    /// which case the caller falls back to number/identifier scanning.
    fn scan_prefixed_literal(&mut self, hex: bool) -> Option<Token> {
        let saved = self.pos;
        self.advance(); // x or b
        let digits_start = self.pos;
        while self
            .peek()
            .is_some_and(|c| if hex { c.is_ascii_hexdigit() } else { c == '0' || c == '1' })
        {
            self.advance();
        }
        let digits = &self.input[digits_start..self.pos];
        if digits.is_empty() || self.peek().is_some_and(Self::is_identifier_char) {
            self.pos = saved;
            return None;
        }
        let digits = String::from(digits);
        Some(if hex {
            self.make_token(TokenKind::HexString(digits.to_ascii_uppercase()))
        } else {
            self.make_token(TokenKind::BitString(digits))
        })
    }

    /// Scans `X'...'` or `B'...'`; the cursor is on the quote.
    fn scan_quoted_binary(&mut self, hex: bool) -> Token {
        self.advance(); // opening quote
        let digits_start = self.pos;
        loop {
            match self.peek() {
                Some('\'') => break,
                Some(c) if hex && c.is_ascii_hexdigit() => {
                    self.advance();
                }
                Some('0' | '1') if !hex => {
                    self.advance();
                }
                Some(_) => {
                    return self.make_token(TokenKind::Error(String::from(if hex {
                        "Invalid character in hex literal"
                    } else {
                        "Invalid character in bit literal"
                    })));
                }
                None => {
                    return self
                        .make_token(TokenKind::Error(String::from("Unterminated binary literal")));
                }
            }
        }
        let digits = String::from(&self.input[digits_start..self.pos]);
        self.advance(); // closing quote

        if hex {
            if digits.len() % 2 != 0 {
                return self.make_token(TokenKind::Error(String::from(
                    "Odd number of hex digits in hex literal",
                )));
            }
            self.make_token(TokenKind::HexString(digits.to_ascii_uppercase()))
        } else {
            self.make_token(TokenKind::BitString(digits))
        }
    }

    /// Scans a user variable; the cursor is after the `@`.
    fn scan_user_variable(&mut self) -> Token {
        match self.peek() {
            Some('@') => {
                self.advance();
                self.scan_system_variable()
            }
            Some(q @ ('\'' | '"' | '`')) => match self.scan_quoted_body(q, false) {
                Ok(name) => self.make_token(TokenKind::UserVariable(name)),
                Err(()) => self.make_token(TokenKind::Error(String::from(
                    "Unterminated quoted variable name",
                ))),
            },
            Some(c) if Self::is_identifier_char(c) || c == '.' => {
                let name_start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| Self::is_identifier_char(c) || c == '.')
                {
                    self.advance();
                }
                let name = String::from(&self.input[name_start..self.pos]);
                self.make_token(TokenKind::UserVariable(name))
            }
            _ => self.make_token(TokenKind::Error(String::from(
                "Expected variable name after @",
            ))),
        }
    }

    /// Scans a system variable; the cursor is after `@@`.
    fn scan_system_variable(&mut self) -> Token {
        let name_start = self.pos;
        while self.peek().is_some_and(Self::is_identifier_char) {
            self.advance();
        }
        // `@@global.name`: one optional scope qualifier
        if self.peek() == Some('.') && self.peek_next().is_some_and(Self::is_identifier_char) {
            self.advance();
            while self.peek().is_some_and(Self::is_identifier_char) {
                self.advance();
            }
        }
        if self.pos == name_start {
            return self.make_token(TokenKind::Error(String::from(
                "Expected variable name after @@",
            )));
        }
        let name = String::from(&self.input[name_start..self.pos]);
        self.make_token(TokenKind::SystemVariable(name))
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_whitespace_and_comments() {
            return error;
        }
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '^' => self.make_token(TokenKind::Caret),
            '~' => self.make_token(TokenKind::BitNot),
            '?' => self.make_token(TokenKind::Question),
            '@' => self.scan_user_variable(),

            // Potentially multi-character tokens
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos = self.start;
                    self.scan_number()
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                        self.make_token(TokenKind::LongArrow)
                    } else {
                        self.make_token(TokenKind::Arrow)
                    }
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            ':' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Assign)
                } else {
                    self.make_token(TokenKind::Error(String::from("Unexpected character: :")))
                }
            }
            '=' => self.make_token(TokenKind::Eq),
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    if self.peek() == Some('>') {
                        self.advance();
                        self.make_token(TokenKind::NullSafeEq)
                    } else {
                        self.make_token(TokenKind::LtEq)
                    }
                }
                Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                }
                Some('<') => {
                    self.advance();
                    self.make_token(TokenKind::LeftShift)
                }
                _ => self.make_token(TokenKind::Lt),
            },
            '>' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::RightShift)
                }
                _ => self.make_token(TokenKind::Gt),
            },
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.make_token(TokenKind::Bang)
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::DoublePipe)
                } else {
                    self.make_token(TokenKind::BitOr)
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    self.make_token(TokenKind::DoubleAmpersand)
                } else {
                    self.make_token(TokenKind::BitAnd)
                }
            }

            // String literals
            '\'' => {
                self.pos = self.start;
                self.scan_string('\'')
            }
            '"' => {
                self.pos = self.start;
                if self.sql_mode.contains(SqlMode::ANSI_QUOTES) {
                    self.scan_quoted_identifier('"')
                } else {
                    self.scan_string('"')
                }
            }

            // Quoted identifiers
            '`' => {
                self.pos = self.start;
                self.scan_quoted_identifier('`')
            }

            // X'..', B'..' and N'..' literals
            'X' | 'x' if self.peek() == Some('\'') => self.scan_quoted_binary(true),
            'B' | 'b' if self.peek() == Some('\'') => self.scan_quoted_binary(false),
            'N' | 'n' if self.peek() == Some('\'') => match self.scan_string('\'').kind {
                TokenKind::String(value) => self.make_token(TokenKind::NationalString(value)),
                other => self.make_token(other),
            },

            // 0x.. and 0b.. literals
            '0' if matches!(self.peek(), Some('x' | 'b')) => {
                let hex = self.peek() == Some('x');
                self.scan_prefixed_literal(hex).unwrap_or_else(|| {
                    self.pos = self.start;
                    self.scan_number()
                })
            }

            // Numbers
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            // Identifiers and keywords
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                self.pos = self.start;
                self.scan_identifier()
            }

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
