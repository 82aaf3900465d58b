//! Tests for expressions as they appear inside statements: operator
//! precedence, predicates, functions, literals and variables.

mod common;
use common::*;

use oxide_mysql_core::ast::{BinaryOp, Expr, Literal, UnaryOp};

fn first_column(sql: &str) -> Expr {
    parse_select(sql).columns.remove(0).expr
}

#[test]
fn arithmetic_binds_tighter_than_comparison() {
    let e = first_column("SELECT a + 1 > b * 2");
    let Expr::Binary { op, left, right } = e else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Gt);
    assert!(matches!(*left, Expr::Binary { op: BinaryOp::Add, .. }));
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
}

#[test]
fn and_binds_tighter_than_or() {
    let s = parse_select("SELECT * FROM t WHERE a = 1 OR b = 2 AND c = 3");
    let Some(Expr::Binary { op, right, .. }) = s.where_clause else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Or);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::And, .. }));
}

#[test]
fn bitwise_precedence_ladder() {
    // a | b & c << d  =>  a | (b & (c << d))
    let Expr::Binary { op, right, .. } = first_column("SELECT a | b & c << d") else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::BitOr);
    let Expr::Binary { op, right, .. } = *right else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::BitAnd);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::LeftShift, .. }));
}

#[test]
fn caret_binds_tighter_than_multiplication() {
    let Expr::Binary { op, right, .. } = first_column("SELECT a * b ^ c") else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::BitXor, .. }));
}

#[test]
fn unary_minus_and_bit_not() {
    let Expr::Binary { left, .. } = first_column("SELECT -a + ~b") else {
        panic!("Expected binary");
    };
    assert!(matches!(*left, Expr::Unary { op: UnaryOp::Minus, .. }));
}

#[test]
fn between_bounds_bind_above_and() {
    let s = parse_select("SELECT * FROM t WHERE total BETWEEN 1 AND 10 AND id > 0");
    let Some(Expr::Binary { op, left, .. }) = s.where_clause else {
        panic!("Expected binary");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(*left, Expr::Between { negated: false, .. }));
    round_trip("SELECT * FROM t WHERE total BETWEEN 1 AND 10 AND id > 0");
}

#[test]
fn negated_predicates_round_trip() {
    round_trip("SELECT * FROM t WHERE a NOT IN (1, 2, 3)");
    round_trip("SELECT * FROM t WHERE a NOT LIKE 'x%' ESCAPE '!'");
    round_trip("SELECT * FROM t WHERE a NOT BETWEEN 1 AND 2");
    round_trip("SELECT * FROM t WHERE a IS NOT NULL AND b IS NOT TRUE");
    round_trip("SELECT * FROM t WHERE NOT EXISTS (SELECT 1 FROM u WHERE u.id = t.id)");
    round_trip("SELECT * FROM t WHERE id IN (SELECT id FROM u)");
}

#[test]
fn synonym_operators_are_normalized() {
    renders_as("SELECT a && b", "SELECT a AND b");
    renders_as("SELECT a RLIKE '^x'", "SELECT a REGEXP '^x'");
    renders_as("SELECT a MOD 3", "SELECT a % 3");
    renders_as("SELECT a != b", "SELECT a <> b");
}

#[test]
fn adjacent_strings_are_concatenated() {
    assert_eq!(first_column("SELECT 'ab' 'cd'"), Expr::string("abcd"));
}

#[test]
fn literals() {
    assert_eq!(first_column("SELECT NULL"), Expr::null());
    assert!(matches!(
        first_column("SELECT 12.50"),
        Expr::Literal(Literal::Decimal(d)) if d == "12.50"
    ));
    assert!(matches!(
        first_column("SELECT 0x1F"),
        Expr::Literal(Literal::Hex(_))
    ));
    assert!(matches!(
        first_column("SELECT b'101'"),
        Expr::Literal(Literal::Bit(_))
    ));
    assert!(matches!(
        first_column("SELECT N'text'"),
        Expr::Literal(Literal::NationalString(_))
    ));
    round_trip("SELECT 'it''s', 'back\\\\slash', TRUE, FALSE, 1.5e3");
}

#[test]
fn temporal_literals_and_intervals() {
    round_trip("SELECT DATE '2024-01-31' + INTERVAL 1 MONTH");
    round_trip("SELECT created_at - INTERVAL 90 MINUTE FROM orders");
    round_trip("SELECT DATE_ADD(created_at, INTERVAL 1 DAY) FROM orders");
}

#[test]
fn functions_round_trip() {
    round_trip("SELECT COUNT(*), COUNT(DISTINCT customer_id), MAX(total) FROM orders");
    round_trip("SELECT IF(total > 100, 'big', 'small') FROM orders");
    round_trip("SELECT GROUP_CONCAT(DISTINCT email ORDER BY email SEPARATOR ', ') FROM customers");
    round_trip("SELECT CAST(total AS CHAR(10)), CONVERT(email USING utf8mb4) FROM orders");
    round_trip("SELECT EXTRACT(YEAR FROM created_at), TRIM(BOTH 'x' FROM email) FROM orders");
    round_trip("SELECT CURRENT_TIMESTAMP, NOW()");
}

#[test]
fn case_expressions() {
    round_trip("SELECT CASE WHEN total > 100 THEN 'big' WHEN total > 10 THEN 'mid' ELSE 'small' END FROM orders");
    round_trip("SELECT CASE total WHEN 0 THEN 'free' END FROM orders");
}

#[test]
fn variables_and_assignment() {
    assert_eq!(
        first_column("SELECT @counter"),
        Expr::UserVariable(String::from("counter"))
    );
    round_trip("SELECT @@SESSION.sql_mode, @@max_connections");
    round_trip("SELECT @n := @n + 1 FROM orders");
}

#[test]
fn json_operators() {
    round_trip("SELECT payload->'$.id', payload->>'$.email' FROM events");
}

#[test]
fn full_text_match() {
    round_trip("SELECT * FROM articles WHERE MATCH (title, body) AGAINST ('rust' IN NATURAL LANGUAGE MODE)");
}

#[test]
fn collate_and_binary() {
    round_trip("SELECT * FROM customers WHERE email COLLATE utf8mb4_bin = 'A@x.io'");
    round_trip("SELECT BINARY email FROM customers");
}

#[test]
fn parentheses_are_preserved() {
    let Expr::Binary { left, .. } = first_column("SELECT (a + b) * c") else {
        panic!("Expected binary");
    };
    assert!(matches!(*left, Expr::Paren(_)));
    renders_as("SELECT (a + b) * c", "SELECT (a + b) * c");
}

#[test]
fn substring_from_for() {
    renders_as(
        "SELECT SUBSTRING(email FROM 2 FOR 5) FROM customers",
        "SELECT SUBSTRING(email FROM 2 FOR 5) FROM customers",
    );
    renders_as("SELECT MID(email FROM 3)", "SELECT SUBSTRING(email FROM 3)");
    round_trip("SELECT SUBSTR(email FROM 1 FOR 1), SUBSTRING(email, 2, 3) FROM customers");
    assert!(matches!(
        first_column("SELECT SUBSTRING(email, 2)"),
        Expr::Function(_)
    ));
}

#[test]
fn quantified_subquery_comparisons() {
    round_trip("SELECT * FROM orders WHERE total > ALL (SELECT total FROM refunds)");
    round_trip("SELECT * FROM orders WHERE customer_id = ANY (SELECT id FROM customers)");
    renders_as(
        "SELECT * FROM t WHERE a <> some (SELECT b FROM u)",
        "SELECT * FROM t WHERE a <> SOME (SELECT b FROM u)",
    );
}

#[test]
fn sounds_like_and_cast_charset() {
    round_trip("SELECT * FROM customers WHERE last_name SOUNDS LIKE 'Smyth'");
    renders_as(
        "SELECT CAST(a AS CHAR(10) CHARSET utf8mb4)",
        "SELECT CAST(a AS CHAR(10) CHARACTER SET utf8mb4)",
    );
    round_trip("SELECT CONVERT(a, CHAR CHARACTER SET latin1)");
}

#[test]
fn introducers_before_hex_and_bit_literals() {
    round_trip("INSERT INTO blobs VALUES (_binary 0x89504E47, _utf8mb4 X'41', _latin1 b'1000001')");
    renders_as("SELECT _binary X'ff'", "SELECT _binary 0xFF");
}
