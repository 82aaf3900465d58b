//! MySQL dialect settings.
//!
//! MySQL changes how some text is lexed and parsed depending on the session
//! `sql_mode` and on the server version (version comments, keyword sets).
//! [`ParserOptions`] bundles both; the lexer and parser read it, the AST
//! renderer uses the quoting helpers below.

mod sql_mode;

pub use sql_mode::SqlMode;

use crate::lexer::Keyword;

/// The default server version: MySQL 8.0.0.
pub const DEFAULT_SERVER_VERSION: u32 = 80_000;

/// Options controlling lexing and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Active `sql_mode` flags.
    pub sql_mode: SqlMode,
    /// Server version as `major * 10000 + minor * 100 + patch`.
    pub server_version: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            sql_mode: SqlMode::NONE,
            server_version: DEFAULT_SERVER_VERSION,
        }
    }
}

impl ParserOptions {
    /// Creates options with the default server version and no mode flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SQL mode.
    #[must_use]
    pub const fn with_sql_mode(mut self, sql_mode: SqlMode) -> Self {
        self.sql_mode = sql_mode;
        self
    }

    /// Sets the server version.
    #[must_use]
    pub const fn with_server_version(mut self, server_version: u32) -> Self {
        self.server_version = server_version;
        self
    }

    /// Parses a server version written either as `8.0.32` or as `80032`.
    #[must_use]
    pub fn parse_server_version(text: &str) -> Option<u32> {
        let text = text.trim();
        if !text.contains('.') {
            return text.parse().ok();
        }
        let mut parts = text.split('.').map(str::parse::<u32>);
        let major = parts.next()?.ok()?;
        let minor = parts.next().transpose().ok()?.unwrap_or(0);
        let patch = parts.next().transpose().ok()?.unwrap_or(0);
        if parts.next().is_some() || minor > 99 || patch > 99 {
            return None;
        }
        major
            .checked_mul(10_000)?
            .checked_add(minor * 100 + patch)
    }
}

/// Returns true if `name` must be backtick-quoted to be read back as the
/// same identifier.
#[must_use]
pub fn needs_quoting(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return true;
    };
    first.is_ascii_digit()
        || !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        || Keyword::from_str(name).is_some()
}

/// Renders an identifier, quoting it with backticks when needed.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    if needs_quoting(name) {
        format!("`{}`", name.replace('`', "``"))
    } else {
        String::from(name)
    }
}

/// Renders a string literal with single quotes and backslash escapes.
#[must_use]
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{1a}' => out.push_str("\\Z"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ParserOptions::new();
        assert_eq!(options.server_version, DEFAULT_SERVER_VERSION);
        assert!(options.sql_mode.is_empty());
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::new()
            .with_sql_mode(SqlMode::ANSI_QUOTES)
            .with_server_version(50_744);
        assert!(options.sql_mode.contains(SqlMode::ANSI_QUOTES));
        assert_eq!(options.server_version, 50_744);
    }

    #[test]
    fn test_parse_server_version() {
        assert_eq!(ParserOptions::parse_server_version("8.0.32"), Some(80_032));
        assert_eq!(ParserOptions::parse_server_version("5.7"), Some(50_700));
        assert_eq!(ParserOptions::parse_server_version("80032"), Some(80_032));
        assert_eq!(ParserOptions::parse_server_version("8.x"), None);
        assert_eq!(ParserOptions::parse_server_version("8.0.100"), None);
        assert_eq!(ParserOptions::parse_server_version("1.2.3.4"), None);
        assert_eq!(ParserOptions::parse_server_version("500000.1.2"), None);
        assert_eq!(ParserOptions::parse_server_version("429496.72.95"), Some(u32::MAX));
        assert_eq!(ParserOptions::parse_server_version("429496.72.96"), None);
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "users");
        assert_eq!(quote_identifier("select"), "`select`");
        assert_eq!(quote_identifier("status"), "`status`");
        assert_eq!(quote_identifier("first name"), "`first name`");
        assert_eq!(quote_identifier("a`b"), "`a``b`");
        assert_eq!(quote_identifier("123"), "`123`");
        assert_eq!(quote_identifier(""), "``");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("it's"), "'it''s'");
        assert_eq!(quote_string("a\nb"), "'a\\nb'");
        assert_eq!(quote_string("c:\\dir"), "'c:\\\\dir'");
    }
}
