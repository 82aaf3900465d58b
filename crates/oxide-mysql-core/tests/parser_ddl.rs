//! Tests for data definition statements: CREATE/ALTER/DROP TABLE,
//! indexes, views, databases, TRUNCATE and RENAME.

mod common;
use common::*;

use oxide_mysql_core::{determine_statement_kind, ParserOptions, StatementKind};

use oxide_mysql_core::ast::{
    AlterTableOperation, ColumnOption, ColumnPosition, DataType, IndexKind, IntegerSize,
    KeyPart, ObjectName, OrderDirection, ReferentialAction, Statement, TableConstraint,
    ViewAlgorithm, ViewCheckOption, ViewDefiner, ViewSecurity,
};

const ORDERS_DDL: &str = "CREATE TABLE IF NOT EXISTS shop.orders (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
    customer_id INT NOT NULL,
    email VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin,
    total DECIMAL(10,2) DEFAULT 0.00 COMMENT 'gross amount',
    created_at TIMESTAMP(3) DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
    PRIMARY KEY (id),
    KEY idx_customer (customer_id, created_at DESC),
    CONSTRAINT fk_customer FOREIGN KEY (customer_id) REFERENCES customers (id)
        ON DELETE CASCADE ON UPDATE NO ACTION
) ENGINE=InnoDB AUTO_INCREMENT=1000 DEFAULT CHARSET=utf8mb4 COMMENT='orders'";

#[test]
fn create_table_full_definition() {
    let c = parse_create_table(ORDERS_DDL);
    assert!(c.if_not_exists);
    assert_eq!(c.name, ObjectName::qualified("shop", "orders"));
    assert_eq!(c.columns.len(), 5);
    assert_eq!(c.constraints.len(), 3);
    assert_eq!(c.options.len(), 4);

    let id = &c.columns[0];
    assert_eq!(
        id.data_type,
        DataType::Integer {
            size: IntegerSize::Big,
            width: None,
            unsigned: true,
            zerofill: false,
        }
    );
    assert_eq!(
        id.options,
        vec![ColumnOption::NotNull, ColumnOption::AutoIncrement]
    );
    assert!(c.columns[4]
        .options
        .iter()
        .any(|o| matches!(o, ColumnOption::OnUpdate(_))));
}

#[test]
fn create_table_constraints() {
    let c = parse_create_table(ORDERS_DDL);
    assert!(matches!(
        &c.constraints[0],
        TableConstraint::PrimaryKey { name: None, columns, .. } if columns.len() == 1
    ));
    let TableConstraint::Index { kind, name, columns, .. } = &c.constraints[1] else {
        panic!("Expected index");
    };
    assert_eq!(*kind, IndexKind::Plain);
    assert_eq!(name.as_deref(), Some("idx_customer"));
    assert_eq!(
        columns[1],
        KeyPart::Column {
            name: String::from("created_at"),
            length: None,
            direction: Some(OrderDirection::Desc),
        }
    );
    let TableConstraint::ForeignKey { name, reference, .. } = &c.constraints[2] else {
        panic!("Expected foreign key");
    };
    assert_eq!(name.as_deref(), Some("fk_customer"));
    assert_eq!(reference.on_delete, Some(ReferentialAction::Cascade));
    assert_eq!(reference.on_update, Some(ReferentialAction::NoAction));
}

#[test]
fn create_table_round_trip() {
    round_trip(ORDERS_DDL);
}

#[test]
fn create_table_normalizes_key_and_charset() {
    renders_as(
        "CREATE TABLE t (a INT, KEY (a)) DEFAULT CHARSET=latin1",
        "CREATE TABLE t (a INT, INDEX (a)) CHARACTER SET=latin1",
    );
}

#[test]
fn create_table_like_and_as_select() {
    let c = parse_create_table("CREATE TABLE copy LIKE orders");
    assert_eq!(c.like, Some(ObjectName::new("orders")));
    renders_as("CREATE TABLE copy LIKE orders", "CREATE TABLE copy LIKE orders");

    let c = parse_create_table("CREATE TABLE summary AS SELECT customer_id FROM orders");
    assert!(c.query.is_some());
    round_trip("CREATE TABLE summary AS SELECT customer_id FROM orders");
}

#[test]
fn create_table_generated_and_check() {
    let c = parse_create_table(
        "CREATE TABLE t (price INT, qty INT, total INT AS (price * qty) VIRTUAL, CHECK (qty >= 0))",
    );
    assert!(matches!(
        &c.columns[2].options[0],
        ColumnOption::Generated { stored: false, .. }
    ));
    assert!(matches!(&c.constraints[0], TableConstraint::Check { name: None, .. }));
    round_trip(
        "CREATE TABLE t (price INT, qty INT, total INT AS (price * qty) VIRTUAL, CHECK (qty >= 0))",
    );
}

#[test]
fn create_table_requires_definition() {
    let _ = parse_err("CREATE TABLE t");
    let _ = parse_err("CREATE TABLE t ()");
}

#[test]
fn create_table_enum_and_set_columns() {
    let c = parse_create_table("CREATE TABLE t (size ENUM('s', 'm', 'l') NOT NULL, flags SET('a', 'b'))");
    assert_eq!(
        c.columns[0].data_type,
        DataType::Enum(vec![String::from("s"), String::from("m"), String::from("l")])
    );
    round_trip("CREATE TABLE t (size ENUM('s', 'm', 'l') NOT NULL, flags SET('a', 'b'))");
}

#[test]
fn alter_table_operations() {
    let sql = "ALTER TABLE orders ADD COLUMN note TEXT AFTER total, DROP COLUMN email, \
               MODIFY total DECIMAL(12,2) NOT NULL FIRST, ADD UNIQUE KEY uq_note (note(20)), \
               DROP PRIMARY KEY, RENAME COLUMN note TO remark";
    let Statement::AlterTable(alter) = parse(sql) else {
        panic!("Expected ALTER TABLE");
    };
    assert_eq!(alter.operations.len(), 6);
    assert!(matches!(
        &alter.operations[0],
        AlterTableOperation::AddColumn { position: Some(ColumnPosition::After(c)), .. } if c == "total"
    ));
    assert_eq!(
        alter.operations[1],
        AlterTableOperation::DropColumn(String::from("email"))
    );
    assert!(matches!(
        &alter.operations[2],
        AlterTableOperation::ModifyColumn { position: Some(ColumnPosition::First), .. }
    ));
    assert_eq!(alter.operations[4], AlterTableOperation::DropPrimaryKey);
    round_trip(sql);
}

#[test]
fn alter_table_defaults_and_options() {
    let sql = "ALTER TABLE orders ALTER COLUMN total SET DEFAULT 0, ALTER total DROP DEFAULT, \
               ENGINE=InnoDB";
    let Statement::AlterTable(alter) = parse(sql) else {
        panic!("Expected ALTER TABLE");
    };
    assert!(matches!(&alter.operations[0], AlterTableOperation::SetDefault { .. }));
    assert_eq!(
        alter.operations[1],
        AlterTableOperation::DropDefault(String::from("total"))
    );
    assert!(matches!(&alter.operations[2], AlterTableOperation::Option(o) if o.name == "ENGINE"));
}

#[test]
fn alter_table_algorithm_and_lock() {
    let Statement::AlterTable(alter) =
        parse("ALTER TABLE orders ADD note TEXT, ALGORITHM=inplace, LOCK = NONE")
    else {
        panic!("Expected ALTER TABLE");
    };
    assert_eq!(alter.operations.len(), 3);
    assert_eq!(
        alter.operations[1],
        AlterTableOperation::Algorithm(String::from("INPLACE"))
    );
    assert_eq!(alter.operations[2], AlterTableOperation::Lock(String::from("NONE")));
    renders_as(
        "ALTER TABLE orders ALGORITHM INSTANT, DROP COLUMN note",
        "ALTER TABLE orders ALGORITHM=INSTANT, DROP COLUMN note",
    );
    renders_as(
        "ALTER TABLE orders LOCK=DEFAULT, ENGINE=InnoDB",
        "ALTER TABLE orders LOCK=DEFAULT, ENGINE=InnoDB",
    );
    round_trip("ALTER TABLE orders ADD COLUMN note TEXT, ALGORITHM=COPY, LOCK=SHARED");
}

#[test]
fn create_and_drop_index() {
    let Statement::CreateIndex(index) = parse("CREATE FULLTEXT INDEX ft_note ON orders (note)")
    else {
        panic!("Expected CREATE INDEX");
    };
    assert_eq!(index.kind, IndexKind::Fulltext);
    round_trip("CREATE FULLTEXT INDEX ft_note ON orders (note)");
    round_trip("CREATE UNIQUE INDEX uq_email ON customers (email(32) ASC)");
    renders_as("drop index uq_email on customers", "DROP INDEX uq_email ON customers");
}

#[test]
fn create_view_options() {
    let sql = "CREATE OR REPLACE ALGORITHM = TEMPTABLE VIEW big_orders (id, total) AS \
               SELECT id, total FROM orders WHERE total > 100 WITH CASCADED CHECK OPTION";
    let Statement::CreateView(view) = parse(sql) else {
        panic!("Expected CREATE VIEW");
    };
    assert!(view.or_replace);
    assert_eq!(view.algorithm, Some(ViewAlgorithm::Temptable));
    assert_eq!(view.check_option, Some(ViewCheckOption::Cascaded));
    round_trip(sql);
}

#[test]
fn mysqldump_view_header() {
    let sql = "/*!50001 CREATE ALGORITHM=UNDEFINED */\n\
               /*!50013 DEFINER=`root`@`localhost` SQL SECURITY DEFINER */\n\
               /*!50001 VIEW `v_orders` AS SELECT id FROM orders */";
    let Statement::CreateView(view) = parse(sql) else {
        panic!("Expected CREATE VIEW");
    };
    assert_eq!(view.algorithm, Some(ViewAlgorithm::Undefined));
    assert!(matches!(&view.definer, Some(ViewDefiner::User(user)) if user.name == "root"));
    assert_eq!(view.security, Some(ViewSecurity::Definer));
    renders_as(
        sql,
        "CREATE ALGORITHM = UNDEFINED DEFINER = 'root'@'localhost' SQL SECURITY DEFINER \
         VIEW v_orders AS SELECT id FROM orders",
    );
    round_trip(sql);
    assert_eq!(
        determine_statement_kind(sql, &ParserOptions::default()),
        StatementKind::CreateView
    );
}

#[test]
fn alter_view_and_database() {
    let sql = "ALTER ALGORITHM = MERGE DEFINER = CURRENT_USER VIEW v_orders (id) AS \
               SELECT id FROM orders WITH LOCAL CHECK OPTION";
    let Statement::AlterView(view) = parse(sql) else {
        panic!("Expected ALTER VIEW");
    };
    assert_eq!(view.definer, Some(ViewDefiner::CurrentUser));
    round_trip(sql);
    renders_as("alter view v as select 1", "ALTER VIEW v AS SELECT 1");

    renders_as(
        "ALTER DATABASE shop DEFAULT CHARACTER SET utf8mb4 COLLATE utf8mb4_bin",
        "ALTER DATABASE shop CHARACTER SET=utf8mb4 COLLATE=utf8mb4_bin",
    );
    round_trip("ALTER SCHEMA CHARACTER SET = latin1");
}

#[test]
fn drop_statements() {
    round_trip("DROP TABLE IF EXISTS a, shop.b RESTRICT");
    round_trip("DROP TEMPORARY TABLE tmp");
    round_trip("DROP VIEW IF EXISTS v");
    round_trip("DROP DATABASE IF EXISTS shop");
    round_trip("DROP PROCEDURE IF EXISTS refresh_totals");
    round_trip("DROP FUNCTION shop.net_total");
}

#[test]
fn create_database() {
    let Statement::CreateDatabase(db) = parse("CREATE DATABASE shop COLLATE utf8mb4_bin") else {
        panic!("Expected CREATE DATABASE");
    };
    assert_eq!(db.name, "shop");
    round_trip("CREATE SCHEMA IF NOT EXISTS shop DEFAULT CHARACTER SET utf8mb4");
}

#[test]
fn truncate_and_rename() {
    renders_as("TRUNCATE orders", "TRUNCATE TABLE orders");
    let Statement::RenameTable(rename) = parse("RENAME TABLE a TO b, shop.c TO shop.d") else {
        panic!("Expected RENAME TABLE");
    };
    assert_eq!(rename.renames.len(), 2);
    round_trip("RENAME TABLE a TO b, shop.c TO shop.d");
}
