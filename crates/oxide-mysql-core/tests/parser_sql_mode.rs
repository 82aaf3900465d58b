//! Tests for `sql_mode` flags and server-version dependent lexing.

mod common;
use common::*;

use oxide_mysql_core::ast::{BinaryOp, Expr, Statement, UnaryOp};
use oxide_mysql_core::{Parser, ParserOptions, SqlMode};

fn first_column(statement: Statement) -> Expr {
    let Statement::Query(query) = statement else {
        panic!("Expected query");
    };
    query
        .as_select()
        .map(|select| select.columns[0].expr.clone())
        .unwrap_or_else(|| panic!("Expected SELECT"))
}

fn parse_with_version(sql: &str, version: u32) -> Statement {
    Parser::with_options(sql, ParserOptions::new().with_server_version(version))
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

#[test]
fn double_quotes_are_strings_by_default() {
    assert_eq!(first_column(parse("SELECT \"id\"")), Expr::string("id"));
    renders_as("SELECT \"it's\"", "SELECT 'it''s'");
}

#[test]
fn ansi_quotes_makes_double_quotes_identifiers() {
    let stmt = parse_with_mode(
        "SELECT \"id\" FROM \"orders\" WHERE \"total\" > 1",
        SqlMode::ANSI_QUOTES,
    );
    assert!(matches!(first_column(stmt.clone()), Expr::Column(c) if c.name == "id"));
    assert_eq!(stmt.to_string(), "SELECT id FROM orders WHERE total > 1");
}

#[test]
fn double_pipe_is_or_by_default() {
    let Expr::Binary { op, .. } = first_column(parse("SELECT a || b")) else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Or);
    renders_as("SELECT a || b", "SELECT a OR b");
}

#[test]
fn pipes_as_concat() {
    let stmt = parse_with_mode("SELECT a || b FROM t", SqlMode::PIPES_AS_CONCAT);
    let Expr::Binary { op, .. } = first_column(stmt.clone()) else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Concat);
    assert_eq!(stmt.to_string(), "SELECT a || b FROM t");
}

#[test]
fn high_not_precedence() {
    let default = parse_select("SELECT * FROM t WHERE NOT a = 1");
    assert!(matches!(
        default.where_clause,
        Some(Expr::Unary { op: UnaryOp::Not, .. })
    ));

    let Statement::Query(query) =
        parse_with_mode("SELECT * FROM t WHERE NOT a = 1", SqlMode::HIGH_NOT_PRECEDENCE)
    else {
        panic!("Expected query");
    };
    let select = query.as_select().unwrap();
    let Some(Expr::Binary { op, left, .. }) = &select.where_clause else {
        panic!("Expected binary");
    };
    assert_eq!(*op, BinaryOp::Eq);
    assert!(matches!(left.as_ref(), Expr::Unary { op: UnaryOp::Not, .. }));
}

#[test]
fn backslash_escapes() {
    assert_eq!(first_column(parse(r"SELECT 'a\tb'")), Expr::string("a\tb"));
    assert_eq!(
        first_column(parse_with_mode(r"SELECT 'a\tb'", SqlMode::NO_BACKSLASH_ESCAPES)),
        Expr::string(r"a\tb")
    );
}

#[test]
fn function_call_with_space_before_parenthesis() {
    renders_as("SELECT COUNT (*) FROM t", "SELECT COUNT(*) FROM t");
    let stmt = parse_with_mode("SELECT COUNT (*) FROM t", SqlMode::IGNORE_SPACE);
    assert_eq!(stmt.to_string(), "SELECT COUNT(*) FROM t");
}

#[test]
fn mode_strings() {
    let ansi: SqlMode = "ANSI".parse().unwrap();
    assert!(ansi.contains(SqlMode::ANSI_QUOTES | SqlMode::PIPES_AS_CONCAT));
    assert!(ansi.contains(SqlMode::IGNORE_SPACE));

    let mixed: SqlMode = "strict_trans_tables, ansi_quotes,NO_ZERO_DATE".parse().unwrap();
    assert_eq!(mixed, SqlMode::ANSI_QUOTES);
    assert_eq!(mixed.to_string(), "ANSI_QUOTES");

    let execution_only: SqlMode = "STRICT_TRANS_TABLES,NO_ZERO_DATE".parse().unwrap();
    assert!(execution_only.is_empty());
}

#[test]
fn ansi_mode_parses_ansi_sql() {
    let mode: SqlMode = "ANSI".parse().unwrap();
    let stmt = parse_with_mode("SELECT \"first\" || ' ' || \"last\" FROM \"people\"", mode);
    assert_eq!(stmt.to_string(), "SELECT `first` || ' ' || `last` FROM people");
}

#[test]
fn server_version_strings() {
    assert_eq!(ParserOptions::parse_server_version("8.0.32"), Some(80_032));
    assert_eq!(ParserOptions::parse_server_version("5.7"), Some(50_700));
    assert_eq!(ParserOptions::parse_server_version("80032"), Some(80_032));
    assert_eq!(ParserOptions::parse_server_version("8.x"), None);
    assert_eq!(ParserOptions::parse_server_version("8.0.1.2"), None);
}

#[test]
fn versioned_comment_is_lexed_when_server_is_new_enough() {
    let sql = "SELECT 1 /*!50700 + 1 */";
    assert_eq!(parse_with_version(sql, 80_000).to_string(), "SELECT 1 + 1");
    assert_eq!(parse_with_version(sql, 50_600).to_string(), "SELECT 1");
}

#[test]
fn unversioned_executable_comment_is_always_lexed() {
    renders_as(
        "CREATE TABLE t (id INT) /*! ENGINE=InnoDB */",
        "CREATE TABLE t (id INT) ENGINE=InnoDB",
    );
}

#[test]
fn plain_comments_are_skipped() {
    renders_as(
        "SELECT /* columns */ id -- trailing\n FROM t # hash comment",
        "SELECT id FROM t",
    );
}
