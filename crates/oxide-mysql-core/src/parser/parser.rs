//! MySQL parser: token cursor, statement dispatch and script recovery.

use tracing::{debug, warn};

use super::error::ParseError;
use crate::ast::{ObjectName, Statement};
use crate::dialect::ParserOptions;
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

/// Maximum nesting of expressions, subqueries and parenthesized joins.
pub const MAX_NESTING_DEPTH: usize = 64;

/// MySQL parser.
///
/// A parser is created for one input and consumed by one of the
/// `parse_*` entry points.
pub struct Parser<'a> {
    pub(super) input: &'a str,
    lexer: Lexer<'a>,
    pub(super) options: ParserOptions,
    pub(super) current: Token,
    peeked: Option<Token>,
    pub(super) previous: Token,
    /// Parameter counter for ? placeholders.
    pub(super) param_counter: usize,
    /// Current nesting depth, see [`Parser::nested`].
    depth: usize,
}

/// Result of [`Parser::parse_script`]: every statement that parsed, plus
/// one error per statement that did not.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseOutput {
    /// Successfully parsed statements, in source order.
    pub statements: Vec<Statement>,
    /// Syntax errors, in source order.
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    /// Returns true if no errors were recorded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    /// Creates a new parser honouring the given SQL mode and server version.
    #[must_use]
    pub fn with_options(input: &'a str, options: ParserOptions) -> Self {
        let mut lexer = Lexer::with_options(input, &options);
        let current = lexer.next_token();
        Self {
            input,
            lexer,
            options,
            current,
            peeked: None,
            previous: Token::new(TokenKind::Eof, Span::new(0, 0)),
            param_counter: 0,
            depth: 0,
        }
    }

    /// Parses exactly one statement, optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a single valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_next_statement()?;
        while self.consume(&TokenKind::Semicolon) {}
        if !self.current.is_eof() {
            return Err(self.error_expected("end of input"));
        }
        Ok(statement)
    }

    /// Parses a `;`-separated script, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` encountered.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![];
        loop {
            while self.consume(&TokenKind::Semicolon) {}
            if self.current.is_eof() {
                break;
            }
            statements.push(self.parse_next_statement()?);
        }
        Ok(statements)
    }

    /// Parses a `;`-separated script, recovering from syntax errors.
    ///
    /// After an error the parser skips to the next `;`, or to a line that
    /// starts with a statement keyword such as `INSERT` or `COMMIT`, and
    /// continues from there.
    pub fn parse_script(&mut self) -> ParseOutput {
        let mut output = ParseOutput::default();
        loop {
            while self.consume(&TokenKind::Semicolon) {}
            if self.current.is_eof() {
                break;
            }
            let start = self.current.span.start;
            match self.parse_next_statement() {
                Ok(statement) => {
                    debug!(kind = ?statement.kind(), offset = start, "parsed statement");
                    output.statements.push(statement);
                }
                Err(error) => {
                    warn!(%error, offset = start, "skipping invalid statement");
                    output.errors.push(error);
                    self.synchronize(start);
                }
            }
        }
        output
    }

    /// Parses one statement and checks that it is terminated.
    fn parse_next_statement(&mut self) -> Result<Statement, ParseError> {
        self.param_counter = 0;
        let statement = self.parse_statement_body()?;
        if !self.check(&TokenKind::Semicolon) && !self.current.is_eof() {
            return Err(self.error_expected("';' or end of input"));
        }
        Ok(statement)
    }

    /// Dispatches on the leading keyword.
    fn parse_statement_body(&mut self) -> Result<Statement, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::With) => self.parse_with_statement(),
            TokenKind::Keyword(Keyword::Select | Keyword::Values | Keyword::Table)
            | TokenKind::LeftParen => Ok(Statement::Query(Box::new(self.parse_query()?))),
            TokenKind::Keyword(Keyword::Insert | Keyword::Replace) => {
                Ok(Statement::Insert(Box::new(self.parse_insert()?)))
            }
            TokenKind::Keyword(Keyword::Update) => {
                Ok(Statement::Update(Box::new(self.parse_update()?)))
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Ok(Statement::Delete(Box::new(self.parse_delete()?)))
            }
            TokenKind::Keyword(Keyword::Create) => self.parse_create(),
            TokenKind::Keyword(Keyword::Alter) => self.parse_alter(),
            TokenKind::Keyword(Keyword::Drop) => self.parse_drop(),
            TokenKind::Keyword(Keyword::Truncate) => self.parse_truncate(),
            TokenKind::Keyword(Keyword::Rename) => self.parse_rename(),
            TokenKind::Keyword(Keyword::Grant) => self.parse_grant(),
            TokenKind::Keyword(Keyword::Revoke) => self.parse_revoke(),
            TokenKind::Keyword(Keyword::Start | Keyword::Begin) => {
                self.parse_start_transaction()
            }
            TokenKind::Keyword(Keyword::Commit) => self.parse_commit(),
            TokenKind::Keyword(Keyword::Rollback) => self.parse_rollback(),
            TokenKind::Keyword(Keyword::Savepoint) => self.parse_savepoint(),
            TokenKind::Keyword(Keyword::Release) => self.parse_release_savepoint(),
            TokenKind::Keyword(Keyword::Use) => self.parse_use(),
            TokenKind::Keyword(Keyword::Show) => self.parse_show(),
            TokenKind::Keyword(Keyword::Explain | Keyword::Describe | Keyword::Desc) => {
                self.parse_explain()
            }
            TokenKind::Keyword(Keyword::Set) => self.parse_set(),
            TokenKind::Keyword(Keyword::Lock) => self.parse_lock_tables(),
            TokenKind::Keyword(Keyword::Unlock) => self.parse_unlock_tables(),
            TokenKind::Keyword(Keyword::Call) => self.parse_call(),
            TokenKind::Keyword(Keyword::Prepare) => self.parse_prepare(),
            TokenKind::Keyword(Keyword::Execute) => self.parse_execute(),
            TokenKind::Keyword(Keyword::Deallocate) => self.parse_deallocate(),
            _ => Err(self.error_expected("statement")),
        }
    }

    /// Skips the rest of a failed statement.
    fn synchronize(&mut self, start: usize) {
        // Always make progress, even if the statement failed on its first
        // token.
        if self.current.span.start == start && !self.current.is_eof() {
            self.advance();
        }
        loop {
            match &self.current.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                kind if kind.is_statement_boundary() && self.at_line_start() => return,
                _ => self.advance(),
            }
        }
    }

    /// Returns true if a line break separates the current token from the
    /// previous one.
    fn at_line_start(&self) -> bool {
        self.input
            .get(self.previous.span.end..self.current.span.start)
            .is_some_and(|gap| gap.contains('\n'))
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Fails with a `ParseError` instead of recursing past
    /// [`MAX_NESTING_DEPTH`] levels.
    pub(super) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                format!("Nesting too deep: more than {MAX_NESTING_DEPTH} levels"),
                self.current.span,
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    // --- Token cursor ---

    /// Advances to the next token.
    pub(super) fn advance(&mut self) {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        };
        self.previous = core::mem::replace(&mut self.current, next);
    }

    /// Returns the kind of the token after the current one.
    pub(super) fn peek(&mut self) -> &TokenKind {
        let lexer = &mut self.lexer;
        &self.peeked.get_or_insert_with(|| lexer.next_token()).kind
    }

    /// Checks if the token after the current one is the given keyword.
    pub(super) fn peek_keyword(&mut self, keyword: Keyword) -> bool {
        matches!(self.peek(), TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(&self.current.kind, TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Checks if the current token is an unquoted identifier spelled `word`.
    ///
    /// Used for the context words MySQL does not reserve and the keyword
    /// table does not list (`OUTFILE`, `NOWAIT`, `LATERAL`, ...).
    pub(super) fn check_word(&self, word: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Identifier(name) if name.eq_ignore_ascii_case(word))
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given context word.
    pub(super) fn consume_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.error_expected(&kind.to_string()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error_expected(keyword.as_str()))
        }
    }

    /// Expects the current token to be the given context word.
    pub(super) fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.consume_word(word) {
            Ok(())
        } else {
            Err(self.error_expected(word))
        }
    }

    /// Consumes an optional `=` (as in `ENGINE [=] InnoDB`).
    pub(super) fn consume_optional_eq(&mut self) {
        self.consume(&TokenKind::Eq);
    }

    /// Builds an error for the current token.
    pub(super) fn error_expected(&self, expected: &str) -> ParseError {
        match &self.current.kind {
            TokenKind::Eof => ParseError::unexpected_eof(expected, self.current.span),
            TokenKind::Error(message) => ParseError {
                message: format!("Invalid token: {message}"),
                span: self.current.span,
                expected: Some(String::from(expected)),
                found: Some(self.current.kind.clone()),
            },
            found => ParseError::unexpected(expected, found.clone(), self.current.span),
        }
    }

    // --- Names and literals ---

    /// Returns the identifier text of the current token, if it can be used
    /// as an identifier.
    ///
    /// Non-reserved keywords keep the spelling used in the source.
    pub(super) fn current_identifier(&self) -> Option<String> {
        match &self.current.kind {
            TokenKind::Identifier(name) | TokenKind::QuotedIdentifier(name) => {
                Some(name.clone())
            }
            TokenKind::Keyword(kw) if !kw.is_reserved() => Some(self.current_text()),
            _ => None,
        }
    }

    /// Returns the source text of the current token.
    pub(super) fn current_text(&self) -> String {
        self.current
            .span
            .slice(self.input)
            .map_or_else(String::new, String::from)
    }

    /// Expects and returns an identifier.
    pub(super) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.current_identifier() {
            Some(name) => {
                self.advance();
                Ok(name)
            }
            None => Err(self.error_expected("identifier")),
        }
    }

    /// Expects an identifier after a `.`, where reserved words are allowed.
    pub(super) fn expect_qualified_part(&mut self) -> Result<String, ParseError> {
        if self.current.is_keyword() {
            let name = self.current_text();
            self.advance();
            return Ok(name);
        }
        self.expect_identifier()
    }

    /// Parses `name` or `schema.name`.
    pub(super) fn parse_object_name(&mut self) -> Result<ObjectName, ParseError> {
        let first = self.expect_identifier()?;
        if self.consume(&TokenKind::Dot) {
            let name = self.expect_qualified_part()?;
            Ok(ObjectName::qualified(first, name))
        } else {
            Ok(ObjectName::new(first))
        }
    }

    /// Parses a comma-separated list of object names.
    pub(super) fn parse_object_name_list(&mut self) -> Result<Vec<ObjectName>, ParseError> {
        let mut names = vec![self.parse_object_name()?];
        while self.consume(&TokenKind::Comma) {
            names.push(self.parse_object_name()?);
        }
        Ok(names)
    }

    /// Parses a comma-separated list of identifiers.
    pub(super) fn parse_identifier_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut idents = vec![self.expect_identifier()?];
        while self.consume(&TokenKind::Comma) {
            idents.push(self.expect_identifier()?);
        }
        Ok(idents)
    }

    /// Parses `(ident, ...)`.
    pub(super) fn parse_parenthesized_identifiers(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let idents = self.parse_identifier_list()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(idents)
    }

    /// Parses `[AS] alias`, where a bare alias must not be a reserved word.
    pub(super) fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.consume_keyword(Keyword::As) {
            return match &self.current.kind {
                TokenKind::String(alias) => {
                    let alias = alias.clone();
                    self.advance();
                    Ok(Some(alias))
                }
                _ => Ok(Some(self.expect_identifier()?)),
            };
        }
        match self.current_identifier() {
            Some(alias) => {
                self.advance();
                Ok(Some(alias))
            }
            None => Ok(None),
        }
    }

    /// Expects a string literal and returns its value.
    pub(super) fn expect_string(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::String(value) | TokenKind::NationalString(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            _ => Err(self.error_expected("string literal")),
        }
    }

    /// Expects an identifier or a string literal (names of charsets,
    /// collations, plugins, savepoints and the like).
    pub(super) fn expect_name_or_string(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::String(value) => {
                let value = value.clone();
                self.advance();
                Ok(value)
            }
            _ => self.expect_identifier(),
        }
    }

    /// Expects an unsigned integer that fits in `u32`.
    pub(super) fn expect_u32(&mut self) -> Result<u32, ParseError> {
        match &self.current.kind {
            TokenKind::Integer(n) => {
                let value = u32::try_from(*n).map_err(|_| {
                    ParseError::new(format!("Number out of range: {n}"), self.current.span)
                })?;
                self.advance();
                Ok(value)
            }
            _ => Err(self.error_expected("integer")),
        }
    }
}
