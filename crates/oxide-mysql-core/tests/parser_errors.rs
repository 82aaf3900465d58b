//! Tests for error reporting and script-level recovery.

mod common;
use common::*;

use oxide_mysql_core::{Parser, TokenKind};

#[test]
fn missing_select_list() {
    let err = parse_err("SELECT FROM orders");
    assert_eq!(err.span.start, 7);
    assert!(err.message.starts_with("Unexpected token"), "{}", err.message);
}

#[test]
fn unexpected_end_of_input() {
    let err = parse_err("SELECT * FROM orders WHERE");
    assert_eq!(err.found, Some(TokenKind::Eof));
    assert!(err.message.starts_with("Unexpected end of input"), "{}", err.message);
}

#[test]
fn unclosed_parenthesis() {
    let err = parse_err("SELECT (1 + 2 FROM t");
    assert_eq!(err.expected.as_deref(), Some("')'"));
}

#[test]
fn unterminated_string_is_invalid_token() {
    let err = parse_err("SELECT 'abc");
    assert!(err.message.starts_with("Invalid token:"), "{}", err.message);
    assert!(err.message.contains("Unterminated string literal"));
}

#[test]
fn reserved_word_as_table_name_is_rejected() {
    let _ = parse_err("SELECT * FROM select");
    let _ = parse_err("CREATE TABLE order (id INT)");
}

#[test]
fn left_join_requires_condition() {
    let _ = parse_err("SELECT * FROM a LEFT JOIN b");
}

#[test]
fn error_display_includes_position() {
    let err = parse_err("SELECT FROM orders");
    assert!(err.to_string().ends_with("at position 7..11"), "{err}");
}

#[test]
fn location_is_one_based_line_and_column() {
    let source = "SELECT 1;\nSELECT FROM orders";
    let err = Parser::new(source).parse_statements().unwrap_err();
    let location = err.location(source);
    assert_eq!(location.line, 2);
    assert_eq!(location.column, 8);
    assert_eq!(location.to_string(), "2:8");
}

#[test]
fn render_points_at_offending_token() {
    let source = "SELECT 1;\nSELECT FROM orders";
    let err = Parser::new(source).parse_statements().unwrap_err();
    let rendered = err.render(source);
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].starts_with("error: Unexpected token"));
    assert_eq!(lines[1], " --> 2:8");
    assert_eq!(lines[3], "2 | SELECT FROM orders");
    assert_eq!(lines[4], "  |        ^^^^");
}

#[test]
fn parse_script_collects_every_error() {
    let output = Parser::new("SELECT 1; SELECT FROM; SELECT 2; DELETE; SELECT 3").parse_script();
    assert_eq!(output.statements.len(), 3);
    assert_eq!(output.errors.len(), 2);
    assert!(!output.is_ok());
    let rendered: Vec<String> = output.statements.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["SELECT 1", "SELECT 2", "SELECT 3"]);
}

#[test]
fn parse_script_ignores_empty_statements() {
    let output = Parser::new(";;SELECT 1;;\n;SELECT 2;").parse_script();
    assert!(output.is_ok());
    assert_eq!(output.statements.len(), 2);
}

#[test]
fn parse_script_recovers_across_lines() {
    let source = "UPDATE orders SET\nINSERT INTO t VALUES (1);\nCOMMIT";
    let output = Parser::new(source).parse_script();
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.statements.len(), 2);
}

#[test]
fn multi_line_update_is_one_error() {
    let source = "UPDATE orders o\n  JOIN customers c ON c.id = o.customer_id\nSET o.total = o.total * 1.1,\n    o.note =\nWHERE c.vip = 1;\nSELECT 1";
    let output = Parser::new(source).parse_script();
    assert_eq!(output.errors.len(), 1);
    let rendered: Vec<String> = output.statements.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["SELECT 1"]);
}

#[test]
fn insert_select_tail_is_not_a_statement() {
    let source = "INSERT INTO archive (id name)\nSELECT id, name FROM orders;\nCOMMIT";
    let output = Parser::new(source).parse_script();
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.statements.len(), 1);
    assert_eq!(output.statements[0].to_string(), "COMMIT");
}

#[test]
fn deeply_nested_expression_is_an_error() {
    let depth = 10_000;
    let sql = format!("SELECT {}1{}", "(".repeat(depth), ")".repeat(depth));
    let err = parse_err(&sql);
    assert!(err.message.starts_with("Nesting too deep"), "{}", err.message);
    assert!(err.span.start < 100);
}

#[test]
fn deeply_nested_subqueries_and_joins_are_errors() {
    let depth = 5_000;
    let subqueries = format!("{}SELECT 1{}", "(SELECT ".repeat(depth), ")".repeat(depth));
    assert!(parse_err(&subqueries).message.starts_with("Nesting too deep"));

    let joins = format!("SELECT * FROM {}t{}", "(".repeat(depth), ")".repeat(depth));
    assert!(parse_err(&joins).message.starts_with("Nesting too deep"));

    let unary = format!("SELECT {}1", "- ".repeat(depth));
    assert!(parse_err(&unary).message.starts_with("Nesting too deep"));
}

#[test]
fn nesting_below_the_limit_parses() {
    let sql = format!("SELECT {}1{}", "(".repeat(40), ")".repeat(40));
    round_trip(&sql);
}
