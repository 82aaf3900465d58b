//! Parser error types.

use thiserror::Error;

use crate::lexer::{Location, Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at position {}..{}", .span.start, .span.end)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected token: expected {expected}, found {found}"),
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected}"),
            span,
            expected: Some(expected),
            found: Some(TokenKind::Eof),
        }
    }

    /// Returns the line and column where the error starts.
    #[must_use]
    pub fn location(&self, source: &str) -> Location {
        self.span.location(source)
    }

    /// Renders the error with the offending source line and a caret marker:
    ///
    /// ```text
    /// error: Unexpected token: expected expression, found keyword FROM
    ///  --> 1:8
    ///   |
    /// 1 | SELECT FROM t
    ///   |        ^^^^
    /// ```
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let location = self.location(source);
        let line_text = source.lines().nth(location.line - 1).unwrap_or("");
        let gutter = location.line.to_string();
        let pad = " ".repeat(gutter.len());

        let column = location.column.saturating_sub(1);
        let remaining = line_text.chars().count().saturating_sub(column);
        let width = source
            .get(self.span.start..self.span.end)
            .map_or(1, |text| text.chars().take_while(|c| *c != '\n').count())
            .clamp(1, remaining.max(1));

        format!(
            "error: {}\n{pad}--> {location}\n{pad} |\n{gutter} | {line_text}\n{pad} | {}{}",
            self.message,
            " ".repeat(column),
            "^".repeat(width),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_span() {
        let err = ParseError::new("Invalid token: unterminated string", Span::new(7, 12));
        assert_eq!(
            err.to_string(),
            "Invalid token: unterminated string at position 7..12"
        );
    }

    #[test]
    fn test_unexpected_records_expected_and_found() {
        let err = ParseError::unexpected("identifier", TokenKind::Comma, Span::new(3, 4));
        assert_eq!(err.expected.as_deref(), Some("identifier"));
        assert_eq!(err.found, Some(TokenKind::Comma));
        assert_eq!(
            err.message,
            "Unexpected token: expected identifier, found ','"
        );
    }

    #[test]
    fn test_unexpected_eof() {
        let err = ParseError::unexpected_eof("')'", Span::new(10, 10));
        assert_eq!(err.found, Some(TokenKind::Eof));
        assert!(err.message.starts_with("Unexpected end of input"));
    }

    #[test]
    fn test_location_is_line_and_column() {
        let source = "SELECT 1;\nSELECT FROM t";
        let err = ParseError::new("boom", Span::new(17, 21));
        let location = err.location(source);
        assert_eq!(location.line, 2);
        assert_eq!(location.column, 8);
    }

    #[test]
    fn test_render_points_at_token() {
        let source = "SELECT FROM t";
        let err = ParseError::new("Unexpected token", Span::new(7, 11));
        let rendered = err.render(source);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "error: Unexpected token");
        assert_eq!(lines[1], " --> 1:8");
        assert_eq!(lines[3], "1 | SELECT FROM t");
        assert_eq!(lines[4], "  |        ^^^^");
    }

    #[test]
    fn test_render_at_end_of_input() {
        let source = "SELECT (1";
        let err = ParseError::unexpected_eof("')'", Span::new(9, 9));
        let rendered = err.render(source);
        assert!(rendered.ends_with("  |          ^"));
    }
}
