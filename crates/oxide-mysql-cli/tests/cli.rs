//! Tests for the command functions against script files on disk.

use std::io::Write;
use std::path::Path;

use oxide_mysql_cli::{
    ast_json, check, format_script, parser_options, read_input, statement_kinds, CliError,
};
use oxide_mysql_core::StatementKind;
use tempfile::NamedTempFile;

const SCHEMA: &str = "\
/*!40101 SET NAMES utf8mb4 */;
CREATE TABLE orders (
    id INT NOT NULL AUTO_INCREMENT,
    total DECIMAL(10,2),
    PRIMARY KEY (id)
) ENGINE=InnoDB;
INSERT INTO orders (total) VALUES (9.99), (19.99);
";

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn read_missing_file() {
    let err = read_input(Path::new("/nonexistent/dump.sql")).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/dump.sql"));
}

#[test]
fn check_valid_dump() {
    let file = script(SCHEMA);
    let source = read_input(file.path()).unwrap();
    let report = check(&source, parser_options(None, None).unwrap());
    assert!(report.is_ok());
    assert_eq!(report.statements, 3);
}

#[test]
fn check_reports_line_of_each_error() {
    let file = script("SELECT 1;\nSELECT * FORM t;\nINSERT INTO t VALUES (1);\nDELETE t;\n");
    let source = read_input(file.path()).unwrap();
    let report = check(&source, parser_options(None, None).unwrap());
    assert_eq!(report.statements, 2);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(report.diagnostics[0].contains("--> 2:"), "{}", report.diagnostics[0]);
    assert!(report.diagnostics[1].contains("--> 4:"), "{}", report.diagnostics[1]);
}

#[test]
fn format_dump() {
    let file = script(SCHEMA);
    let source = read_input(file.path()).unwrap();
    let formatted = format_script(&source, parser_options(None, None).unwrap()).unwrap();
    let lines: Vec<&str> = formatted.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "SET NAMES utf8mb4;");
    assert!(lines[1].starts_with("CREATE TABLE orders (id INT NOT NULL AUTO_INCREMENT"));
    assert_eq!(lines[2], "INSERT INTO orders (total) VALUES (9.99), (19.99);");
}

#[test]
fn old_server_skips_versioned_statement() {
    let options = parser_options(None, Some("4.0")).unwrap();
    let formatted = format_script(SCHEMA, options).unwrap();
    assert_eq!(formatted.lines().count(), 2);
}

#[test]
fn formatted_output_parses_again() {
    let options = parser_options(None, None).unwrap();
    let once = format_script(SCHEMA, options).unwrap();
    let twice = format_script(&once, options).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn ansi_mode_from_option() {
    let options = parser_options(Some("ANSI"), None).unwrap();
    let formatted = format_script("SELECT \"a\" || 'b' FROM \"t\"", options).unwrap();
    assert_eq!(formatted, "SELECT a || 'b' FROM t;\n");
}

#[test]
fn ast_dump_is_a_json_array() {
    let json = ast_json(SCHEMA, parser_options(None, None).unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let statements = value.as_array().unwrap();
    assert_eq!(statements.len(), 3);
    assert!(statements[1].get("CreateTable").is_some());
    assert!(statements[2].get("Insert").is_some());
}

#[test]
fn kinds_of_dump() {
    let kinds: Vec<StatementKind> = statement_kinds(SCHEMA, parser_options(None, None).unwrap())
        .into_iter()
        .map(|s| s.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::SetNames,
            StatementKind::CreateTable,
            StatementKind::Insert
        ]
    );
}
