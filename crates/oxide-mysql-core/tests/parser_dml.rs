//! Tests for INSERT, REPLACE, UPDATE and DELETE.

mod common;
use common::*;

use oxide_mysql_core::ast::{Expr, InsertPriority, InsertSource, ObjectName, TableRef};
use oxide_mysql_core::StatementKind;

#[test]
fn insert_multi_row_values() {
    let i = parse_insert("INSERT INTO orders (id, total) VALUES (1, 9.5), (2, DEFAULT)");
    assert_eq!(i.columns, vec![String::from("id"), String::from("total")]);
    let InsertSource::Values(rows) = &i.source else {
        panic!("Expected VALUES");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], Expr::Default);
    round_trip("INSERT INTO orders (id, total) VALUES (1, 9.5), (2, DEFAULT)");
}

#[test]
fn insert_without_into_keyword() {
    let i = parse_insert("INSERT orders VALUE (1)");
    assert_eq!(i.table, ObjectName::new("orders"));
    renders_as("INSERT orders VALUE (1)", "INSERT INTO orders VALUES (1)");
}

#[test]
fn insert_modifiers() {
    let i = parse_insert("INSERT HIGH_PRIORITY IGNORE INTO orders (id) VALUES (1)");
    assert_eq!(i.priority, Some(InsertPriority::HighPriority));
    assert!(i.ignore);
    round_trip("INSERT HIGH_PRIORITY IGNORE INTO orders (id) VALUES (1)");
}

#[test]
fn insert_set_form() {
    let i = parse_insert("INSERT INTO orders SET id = 1, total = id * 2");
    assert!(matches!(&i.source, InsertSource::Set(a) if a.len() == 2));
    round_trip("INSERT INTO orders SET id = 1, total = id * 2");
}

#[test]
fn insert_select() {
    let i = parse_insert("INSERT INTO archive (id) SELECT id FROM orders WHERE total = 0");
    assert!(matches!(&i.source, InsertSource::Query(_)));
    round_trip("INSERT INTO archive (id) SELECT id FROM orders WHERE total = 0");
}

#[test]
fn insert_on_duplicate_key_update() {
    let sql = "INSERT INTO stock (sku, qty) VALUES ('a', 1) ON DUPLICATE KEY UPDATE qty = qty + 1";
    let i = parse_insert(sql);
    assert_eq!(i.on_duplicate_update.len(), 1);
    round_trip(sql);
}

#[test]
fn insert_row_alias() {
    let sql = "INSERT INTO stock (sku, qty) VALUES ('a', 1) AS incoming \
               ON DUPLICATE KEY UPDATE qty = stock.qty + incoming.qty";
    let i = parse_insert(sql);
    assert_eq!(i.row_alias.as_deref(), Some("incoming"));
    round_trip(sql);
}

#[test]
fn insert_placeholders_are_numbered() {
    let i = parse_insert("INSERT INTO orders (id, total) VALUES (?, ?)");
    let InsertSource::Values(rows) = &i.source else {
        panic!("Expected VALUES");
    };
    assert_eq!(rows[0][0], Expr::Parameter { position: 1 });
    assert_eq!(rows[0][1], Expr::Parameter { position: 2 });
}

#[test]
fn replace_statement() {
    let stmt = parse("REPLACE INTO orders (id) VALUES (1)");
    assert_eq!(stmt.kind(), StatementKind::Replace);
    round_trip("REPLACE INTO orders (id) VALUES (1)");
}

#[test]
fn update_single_table() {
    let u = parse_update(
        "UPDATE LOW_PRIORITY orders SET total = total * 1.1 WHERE id = 3 ORDER BY id LIMIT 1",
    );
    assert!(u.low_priority);
    assert_eq!(u.assignments.len(), 1);
    assert!(u.limit.is_some());
    round_trip("UPDATE LOW_PRIORITY orders SET total = total * 1.1 WHERE id = 3 ORDER BY id LIMIT 1");
}

#[test]
fn update_multi_table_join() {
    let sql = "UPDATE orders o INNER JOIN customers c ON o.customer_id = c.id \
               SET o.email = c.email WHERE c.id > 0";
    let u = parse_update(sql);
    assert!(matches!(&u.tables[0], TableRef::Join { .. }));
    round_trip(sql);
}

#[test]
fn update_multi_table_rejects_order_by() {
    let err = parse_err("UPDATE a, b SET a.x = b.x ORDER BY a.id");
    assert!(err.message.contains("multiple-table UPDATE"));
}

#[test]
fn delete_single_table() {
    let d = parse_delete("DELETE LOW_PRIORITY QUICK IGNORE FROM orders WHERE id < 10 LIMIT 5");
    assert!(d.low_priority && d.quick && d.ignore);
    assert!(d.targets.is_empty());
    round_trip("DELETE LOW_PRIORITY QUICK IGNORE FROM orders WHERE id < 10 LIMIT 5");
}

#[test]
fn delete_multi_table_forms() {
    let d = parse_delete("DELETE o, i FROM orders o JOIN items i ON i.order_id = o.id");
    assert_eq!(
        d.targets,
        vec![ObjectName::new("o"), ObjectName::new("i")]
    );
    round_trip("DELETE o, i FROM orders o JOIN items i ON i.order_id = o.id");

    let d = parse_delete("DELETE FROM o USING orders o JOIN items i ON i.order_id = o.id");
    assert_eq!(d.targets, vec![ObjectName::new("o")]);
    assert_eq!(d.using.len(), 1);
    round_trip("DELETE FROM o USING orders o JOIN items i ON i.order_id = o.id");
}

#[test]
fn delete_multi_table_rejects_limit() {
    let _ = parse_err("DELETE o FROM orders o JOIN items i ON 1 LIMIT 1");
}

#[test]
fn with_prefixed_update_and_delete() {
    let sql = "WITH stale AS (SELECT id FROM orders WHERE total = 0) \
               DELETE FROM orders WHERE id IN (SELECT id FROM stale)";
    let d = parse_delete(sql);
    assert_eq!(d.with.as_ref().map(|w| w.ctes.len()), Some(1));
    assert_eq!(parse(sql).kind(), StatementKind::Delete);
    round_trip(sql);

    let sql = "WITH totals AS (SELECT customer_id, SUM(total) AS s FROM orders GROUP BY customer_id) \
               UPDATE customers c JOIN totals t ON t.customer_id = c.id SET c.spent = t.s";
    let u = parse_update(sql);
    assert!(u.with.is_some());
    round_trip(sql);
}

#[test]
fn partition_selection() {
    let i = parse_insert("INSERT INTO orders PARTITION (p2024, p2025) (id) VALUES (1)");
    assert_eq!(i.partitions, vec![String::from("p2024"), String::from("p2025")]);
    round_trip("INSERT INTO orders PARTITION (p2024, p2025) (id) VALUES (1)");

    let d = parse_delete("DELETE FROM orders PARTITION (p0) WHERE id = 1");
    assert!(matches!(
        &d.from[0],
        TableRef::Table { partitions, .. } if partitions == &[String::from("p0")]
    ));
    round_trip("UPDATE orders PARTITION (p0) AS o SET o.total = 0");
    round_trip("SELECT * FROM orders PARTITION (p0, p1) AS o WHERE o.id > 1");
}

#[test]
fn insert_from_table_statement() {
    let i = parse_insert("INSERT INTO archive TABLE orders");
    assert!(matches!(i.source, InsertSource::Query(_)));
    renders_as("insert into archive table orders", "INSERT INTO archive TABLE orders");
}
