//! Tests for SELECT: select lists, FROM clauses and joins, set
//! operations, CTEs, and the clauses that apply to a whole query.

mod common;
use common::*;

use oxide_mysql_core::ast::{
    Expr, JoinConstraint, JoinType, LockClause, ObjectName, Outfile, SelectInto, SelectOption,
    SetExpr, SetOperator, TableRef,
};

#[test]
fn select_columns_and_aliases() {
    let s = parse_select("SELECT id, email AS contact, total t FROM orders");
    assert_eq!(s.columns.len(), 3);
    assert_eq!(s.columns[1].alias.as_deref(), Some("contact"));
    assert_eq!(s.columns[2].alias.as_deref(), Some("t"));
    renders_as(
        "select id, email as contact, total t from orders",
        "SELECT id, email AS contact, total AS t FROM orders",
    );
}

#[test]
fn string_column_aliases() {
    let s = parse_select("SELECT total 'order total', email AS 'contact' FROM orders");
    assert_eq!(s.columns[0].alias.as_deref(), Some("order total"));
    assert_eq!(s.columns[1].alias.as_deref(), Some("contact"));
    renders_as(
        "SELECT total 'order total' FROM orders",
        "SELECT total AS `order total` FROM orders",
    );
    assert_eq!(parse_select("SELECT 'a' 'b'").columns[0].alias, None);
}

#[test]
fn select_without_from() {
    let s = parse_select("SELECT 1 + 1");
    assert!(s.from.is_empty());
    renders_as("SELECT 1 FROM DUAL", "SELECT 1");
}

#[test]
fn select_distinctrow_normalizes_to_distinct() {
    let s = parse_select("SELECT DISTINCTROW email FROM customers");
    assert!(s.distinct);
    renders_as(
        "SELECT DISTINCTROW email FROM customers",
        "SELECT DISTINCT email FROM customers",
    );
}

#[test]
fn select_options() {
    let s = parse_select("SELECT SQL_CALC_FOUND_ROWS STRAIGHT_JOIN id FROM orders");
    assert_eq!(
        s.options,
        vec![SelectOption::SqlCalcFoundRows, SelectOption::StraightJoin]
    );
    round_trip("SELECT SQL_CALC_FOUND_ROWS STRAIGHT_JOIN id FROM orders");
}

#[test]
fn from_schema_qualified_table() {
    let s = parse_select("SELECT * FROM shop.orders AS o");
    assert!(matches!(
        &s.from[0],
        TableRef::Table { name, alias: Some(a), .. }
            if *name == ObjectName::qualified("shop", "orders") && a == "o"
    ));
    round_trip("SELECT * FROM shop.orders AS o");
}

#[test]
fn from_backtick_quoted_reserved_name() {
    let s = parse_select("SELECT `select`.`from` FROM `select`");
    assert!(matches!(
        &s.from[0],
        TableRef::Table { name, .. } if name.name == "select"
    ));
    renders_as(
        "SELECT `select`.`from` FROM `select`",
        "SELECT `select`.`from` FROM `select`",
    );
}

#[test]
fn from_comma_separated_tables() {
    let s = parse_select("SELECT * FROM orders o, customers c WHERE o.customer_id = c.id");
    assert_eq!(s.from.len(), 2);
    round_trip("SELECT * FROM orders o, customers c WHERE o.customer_id = c.id");
}

#[test]
fn join_bare_renders_as_inner() {
    renders_as(
        "SELECT * FROM orders JOIN customers ON orders.customer_id = customers.id",
        "SELECT * FROM orders INNER JOIN customers ON orders.customer_id = customers.id",
    );
}

#[test]
fn join_left_outer_using() {
    let s = parse_select("SELECT * FROM orders LEFT OUTER JOIN items USING (order_id)");
    let TableRef::Join { join, .. } = &s.from[0] else {
        panic!("Expected join");
    };
    assert_eq!(join.join_type, JoinType::Left);
    assert_eq!(
        join.constraint,
        JoinConstraint::Using(vec![String::from("order_id")])
    );
    round_trip("SELECT * FROM orders LEFT OUTER JOIN items USING (order_id)");
}

#[test]
fn join_chain_is_left_deep() {
    let s = parse_select(
        "SELECT * FROM a INNER JOIN b ON a.id = b.a_id RIGHT JOIN c ON b.id = c.b_id CROSS JOIN d",
    );
    let TableRef::Join { left, join } = &s.from[0] else {
        panic!("Expected join");
    };
    assert_eq!(join.join_type, JoinType::Cross);
    assert!(matches!(
        left.as_ref(),
        TableRef::Join { join, .. } if join.join_type == JoinType::Right
    ));
}

#[test]
fn join_natural_has_no_constraint() {
    let s = parse_select("SELECT * FROM a NATURAL JOIN b");
    let TableRef::Join { join, .. } = &s.from[0] else {
        panic!("Expected join");
    };
    assert_eq!(join.join_type, JoinType::Natural);
    assert_eq!(join.constraint, JoinConstraint::None);
}

#[test]
fn derived_table_with_column_aliases() {
    let s = parse_select("SELECT d.x FROM (SELECT 1, 2) AS d (x, y)");
    assert!(matches!(
        &s.from[0],
        TableRef::Derived { alias: Some(a), columns, .. } if a == "d" && columns.len() == 2
    ));
    round_trip("SELECT d.x FROM (SELECT 1, 2) AS d (x, y)");
}

#[test]
fn index_hints() {
    round_trip("SELECT * FROM orders FORCE INDEX (idx_created) WHERE id > 10");
    renders_as(
        "SELECT * FROM orders USE KEY FOR JOIN (idx_a)",
        "SELECT * FROM orders USE INDEX FOR JOIN (idx_a)",
    );
}

#[test]
fn where_group_having_order_limit() {
    let q = parse_query(
        "SELECT customer_id, COUNT(*) AS n FROM orders WHERE total > 10 \
         GROUP BY customer_id HAVING COUNT(*) > 2 ORDER BY n DESC LIMIT 5",
    );
    let select = q.as_select().unwrap();
    assert!(select.where_clause.is_some());
    assert_eq!(select.group_by.len(), 1);
    assert!(select.having.is_some());
    assert_eq!(q.order_by.len(), 1);
    assert!(q.limit.is_some());
    round_trip(
        "SELECT customer_id, COUNT(*) AS n FROM orders WHERE total > 10 \
         GROUP BY customer_id HAVING COUNT(*) > 2 ORDER BY n DESC LIMIT 5",
    );
}

#[test]
fn limit_offset_comma_form_is_normalized() {
    renders_as(
        "SELECT id FROM orders LIMIT 20, 10",
        "SELECT id FROM orders LIMIT 10 OFFSET 20",
    );
}

#[test]
fn group_by_with_rollup() {
    let s = parse_select("SELECT a, SUM(b) FROM t GROUP BY a WITH ROLLUP");
    assert!(s.with_rollup);
    round_trip("SELECT a, SUM(b) FROM t GROUP BY a WITH ROLLUP");
}

#[test]
fn union_all_and_distinct() {
    let q = parse_query("SELECT a FROM t UNION ALL SELECT a FROM u UNION SELECT a FROM v");
    let SetExpr::SetOperation { op, left, .. } = &q.body else {
        panic!("Expected set operation");
    };
    assert_eq!(*op, SetOperator::Union);
    assert!(matches!(left.as_ref(), SetExpr::SetOperation { .. }));
    round_trip("SELECT a FROM t UNION ALL SELECT a FROM u UNION SELECT a FROM v");
}

#[test]
fn parenthesized_union_members() {
    let q = parse_query("(SELECT a FROM t ORDER BY a LIMIT 1) UNION (SELECT a FROM u) LIMIT 2");
    assert!(q.limit.is_some());
    let SetExpr::SetOperation { left, .. } = &q.body else {
        panic!("Expected set operation");
    };
    assert!(matches!(left.as_ref(), SetExpr::Query(inner) if inner.limit.is_some()));
    round_trip("(SELECT a FROM t ORDER BY a LIMIT 1) UNION (SELECT a FROM u) LIMIT 2");
}

#[test]
fn with_recursive_cte() {
    let sql = "WITH RECURSIVE seq (n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < 10) \
               SELECT n FROM seq";
    let q = parse_query(sql);
    let with = q.with.as_ref().unwrap();
    assert!(with.recursive);
    assert_eq!(with.ctes[0].columns, vec![String::from("n")]);
    round_trip(sql);
}

#[test]
fn select_into_variables() {
    let s = parse_select("SELECT id, total INTO @id, @total FROM orders LIMIT 1");
    assert_eq!(
        s.into,
        Some(SelectInto::Variables(vec![
            String::from("id"),
            String::from("total")
        ]))
    );
}

#[test]
fn select_into_outfile_format() {
    let sql = "SELECT id, total FROM orders INTO OUTFILE '/tmp/orders.csv' CHARACTER SET utf8mb4 \
               FIELDS TERMINATED BY ',' OPTIONALLY ENCLOSED BY '\"' ESCAPED BY '\\\\' \
               LINES STARTING BY '>' TERMINATED BY '\\n'";
    let s = parse_select(sql);
    let Some(SelectInto::Outfile(outfile)) = &s.into else {
        panic!("Expected INTO OUTFILE");
    };
    assert_eq!(outfile.file, "/tmp/orders.csv");
    assert_eq!(outfile.charset.as_deref(), Some("utf8mb4"));
    assert_eq!(outfile.fields_terminated_by.as_deref(), Some(","));
    assert_eq!(outfile.fields_enclosed_by.as_deref(), Some("\""));
    assert!(outfile.optionally_enclosed);
    assert_eq!(outfile.fields_escaped_by.as_deref(), Some("\\"));
    assert_eq!(outfile.lines_starting_by.as_deref(), Some(">"));
    assert_eq!(outfile.lines_terminated_by.as_deref(), Some("\n"));
    round_trip(sql);

    let s = parse_select("SELECT 1 INTO OUTFILE 'a.tsv' COLUMNS ENCLOSED BY ''");
    assert_eq!(
        s.into,
        Some(SelectInto::Outfile(Box::new(Outfile {
            fields_enclosed_by: Some(String::new()),
            ..Outfile::new("a.tsv")
        })))
    );
    assert!(parse_err("SELECT 1 INTO OUTFILE 'a' LINES").message.contains("STARTING"));
}

#[test]
fn values_and_table_statements() {
    let q = parse_query("VALUES ROW(1, 'a'), ROW(2, 'b') ORDER BY column_0 LIMIT 1");
    let SetExpr::Values(rows) = &q.body else {
        panic!("Expected VALUES");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], Expr::integer(1));
    round_trip("VALUES ROW(1, 'a'), ROW(2, 'b') ORDER BY column_0 LIMIT 1");

    let q = parse_query("TABLE shop.orders");
    assert_eq!(q.body, SetExpr::Table(ObjectName::qualified("shop", "orders")));
    round_trip("TABLE orders UNION TABLE archive ORDER BY id");
    round_trip("SELECT * FROM (VALUES ROW(1, 2)) AS v (a, b)");
    round_trip("SELECT a FROM t WHERE a IN (TABLE u)");
    assert!(parse_err("VALUES (1, 2)").message.contains("ROW"));
}

#[test]
fn locking_clauses() {
    let q = parse_query("SELECT * FROM orders WHERE id = 1 FOR UPDATE NOWAIT");
    assert!(matches!(q.locking, Some(LockClause::ForUpdate { .. })));
    round_trip("SELECT * FROM orders WHERE id = 1 FOR UPDATE NOWAIT");
    round_trip("SELECT * FROM orders FOR SHARE OF orders SKIP LOCKED");
    round_trip("SELECT * FROM orders LOCK IN SHARE MODE");
}

#[test]
fn window_functions() {
    round_trip(
        "SELECT id, ROW_NUMBER() OVER (PARTITION BY customer_id ORDER BY created_at) AS rn \
         FROM orders",
    );
    round_trip("SELECT SUM(total) OVER w FROM orders WINDOW w AS (ORDER BY id)");
}

#[test]
fn trailing_semicolon_is_accepted() {
    let s = parse_select("SELECT 1;");
    assert_eq!(s.columns.len(), 1);
}
