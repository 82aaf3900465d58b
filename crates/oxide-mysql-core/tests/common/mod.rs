#![allow(dead_code)]

use oxide_mysql_core::ast::{
    CreateTableStatement, DeleteStatement, InsertStatement, Query, Select, SetExpr, Statement,
    UpdateStatement,
};
use oxide_mysql_core::{ParseError, Parser, ParserOptions, SqlMode};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_with_mode(sql: &str, mode: SqlMode) -> Statement {
    Parser::with_options(sql, ParserOptions::new().with_sql_mode(mode))
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(q) => *q,
        other => panic!("Expected query, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> Select {
    match parse_query(sql).body {
        SetExpr::Select(s) => *s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(i) => *i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse(sql) {
        Statement::Update(u) => *u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => *d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn parse_create_table(sql: &str) -> CreateTableStatement {
    match parse(sql) {
        Statement::CreateTable(c) => *c,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

/// Asserts that `sql` renders as `expected`.
pub fn renders_as(sql: &str, expected: &str) {
    assert_eq!(parse(sql).to_string(), expected, "Rendering of: {sql}");
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
