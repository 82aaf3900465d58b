//! Command-line front end for `oxide-mysql-core`.
//!
//! The `oxide-mysql` binary reads a SQL script from a file or stdin and
//! checks, formats, dumps or classifies its statements. The functions here
//! do the work and return plain values; `main.rs` handles arguments,
//! logging and output.
//!
//! ```
//! use oxide_mysql_cli::{format_script, parser_options};
//!
//! let options = parser_options(None, None).unwrap();
//! let formatted = format_script("select 1 from dual; begin", options).unwrap();
//! assert_eq!(formatted, "SELECT 1;\nSTART TRANSACTION;\n");
//! ```

pub mod error;

use std::io::Read;
use std::path::Path;

use oxide_mysql_core::{
    determine_statement_kind, Lexer, Location, Parser, ParserOptions, Span, SqlMode, Statement,
    StatementKind, TokenKind,
};
use tracing::debug;

pub use error::{CliError, Result};

/// Reads the script at `path`, or stdin when `path` is `-`.
///
/// # Errors
///
/// Returns [`CliError::Read`] if the input cannot be read.
pub fn read_input(path: &Path) -> Result<String> {
    let read = if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map(|_| source)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds parser options from the `--sql-mode` and `--server-version`
/// values.
///
/// # Errors
///
/// Returns [`CliError::InvalidServerVersion`] if the version is malformed.
pub fn parser_options(
    sql_mode: Option<&str>,
    server_version: Option<&str>,
) -> Result<ParserOptions> {
    let mut options = ParserOptions::new();
    if let Some(mode) = sql_mode {
        let mode = match mode.parse::<SqlMode>() {
            Ok(mode) => mode,
            Err(never) => match never {},
        };
        options = options.with_sql_mode(mode);
    }
    if let Some(version) = server_version {
        let version = ParserOptions::parse_server_version(version)
            .ok_or_else(|| CliError::InvalidServerVersion(version.to_string()))?;
        options = options.with_server_version(version);
    }
    debug!(sql_mode = %options.sql_mode, server_version = options.server_version, "parser options");
    Ok(options)
}

/// Outcome of `check`.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of statements that parsed.
    pub statements: usize,
    /// One rendered diagnostic per syntax error.
    pub diagnostics: Vec<String>,
}

impl CheckReport {
    /// Returns true if the script had no syntax errors.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Parses the whole script with error recovery and renders every error.
#[must_use]
pub fn check(source: &str, options: ParserOptions) -> CheckReport {
    let output = Parser::with_options(source, options).parse_script();
    debug!(
        statements = output.statements.len(),
        errors = output.errors.len(),
        "checked script"
    );
    CheckReport {
        statements: output.statements.len(),
        diagnostics: output.errors.iter().map(|e| e.render(source)).collect(),
    }
}

fn parse_all(source: &str, options: ParserOptions) -> Result<Vec<Statement>> {
    Parser::with_options(source, options)
        .parse_statements()
        .map_err(|error| CliError::Syntax {
            rendered: error.render(source),
        })
}

/// Renders every statement canonically, one per line, `;` terminated.
///
/// # Errors
///
/// Returns [`CliError::Syntax`] for the first statement that fails to
/// parse.
pub fn format_script(source: &str, options: ParserOptions) -> Result<String> {
    let mut formatted = String::new();
    for statement in parse_all(source, options)? {
        formatted.push_str(&statement.to_string());
        formatted.push_str(";\n");
    }
    Ok(formatted)
}

/// Serializes the parsed statements as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CliError::Syntax`] if the script does not parse.
pub fn ast_json(source: &str, options: ParserOptions) -> Result<String> {
    let statements = parse_all(source, options)?;
    Ok(serde_json::to_string_pretty(&statements)?)
}

/// A statement's start position and sniffed kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffedStatement {
    /// Where the statement starts.
    pub location: Location,
    /// Kind guessed from the leading tokens.
    pub kind: StatementKind,
}

/// Classifies each statement of the script without parsing it.
#[must_use]
pub fn statement_kinds(source: &str, options: ParserOptions) -> Vec<SniffedStatement> {
    split_statements(source, options)
        .into_iter()
        .map(|span| SniffedStatement {
            location: span.location(source),
            kind: determine_statement_kind(span.slice(source).unwrap_or_default(), &options),
        })
        .collect()
}

/// Returns the span of each `;`-separated statement. Empty statements are
/// skipped; comments between statements are not part of any span.
#[must_use]
pub fn split_statements(source: &str, options: ParserOptions) -> Vec<Span> {
    let mut spans = vec![];
    let mut current: Option<Span> = None;
    for token in Lexer::with_options(source, &options).tokenize() {
        match token.kind {
            TokenKind::Semicolon | TokenKind::Eof => spans.extend(current.take()),
            _ => current = Some(current.map_or(token.span, |span| span.merge(token.span))),
        }
    }
    spans
}
