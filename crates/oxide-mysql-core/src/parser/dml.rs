//! INSERT, REPLACE, UPDATE and DELETE parsing.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Assignment, DeleteStatement, Expr, InsertPriority, InsertSource, InsertStatement, ObjectName,
    TableRef, UpdateStatement,
};
use crate::lexer::{Keyword, Span, TokenKind};

impl Parser<'_> {
    /// Parses an INSERT or REPLACE statement.
    pub(super) fn parse_insert(&mut self) -> Result<InsertStatement, ParseError> {
        let replace = self.check_keyword(Keyword::Replace);
        self.advance();

        let priority = match self.current.as_keyword() {
            Some(Keyword::LowPriority) => Some(InsertPriority::LowPriority),
            Some(Keyword::Delayed) => Some(InsertPriority::Delayed),
            Some(Keyword::HighPriority) if !replace => Some(InsertPriority::HighPriority),
            _ => None,
        };
        if priority.is_some() {
            self.advance();
        }
        let ignore = !replace && self.consume_keyword(Keyword::Ignore);
        self.consume_keyword(Keyword::Into);

        let table = self.parse_object_name()?;
        let partitions = self.parse_partition_names()?;

        let mut columns = vec![];
        let query_follows = matches!(
            self.peek(),
            TokenKind::Keyword(Keyword::Select | Keyword::With)
        );
        if self.check(&TokenKind::LeftParen) && !query_follows {
            self.advance();
            if !self.check(&TokenKind::RightParen) {
                columns = self.parse_identifier_list()?;
            }
            self.expect(&TokenKind::RightParen)?;
        }

        let source = match self.current.as_keyword() {
            Some(Keyword::Values | Keyword::Value) => {
                self.advance();
                InsertSource::Values(self.parse_values_rows()?)
            }
            Some(Keyword::Set) => {
                self.advance();
                InsertSource::Set(self.parse_assignments()?)
            }
            Some(Keyword::Select | Keyword::With | Keyword::Table) => {
                InsertSource::Query(Box::new(self.parse_query()?))
            }
            _ if self.check(&TokenKind::LeftParen) => {
                InsertSource::Query(Box::new(self.parse_query()?))
            }
            _ => return Err(self.error_expected("VALUES, SET or SELECT")),
        };

        let row_alias = if !matches!(source, InsertSource::Query(_))
            && self.consume_keyword(Keyword::As)
        {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        let on_duplicate_update = if self.consume_keyword(Keyword::On) {
            self.expect_keyword(Keyword::Duplicate)?;
            self.expect_keyword(Keyword::Key)?;
            self.expect_keyword(Keyword::Update)?;
            self.parse_assignments()?
        } else {
            vec![]
        };

        Ok(InsertStatement {
            replace,
            priority,
            ignore,
            table,
            partitions,
            columns,
            source,
            row_alias,
            on_duplicate_update,
        })
    }

    /// Parses `(…), (…)` after VALUES; each row may be written `ROW(…)`.
    fn parse_values_rows(&mut self) -> Result<Vec<Vec<Expr>>, ParseError> {
        let mut rows = vec![];
        loop {
            self.consume_keyword(Keyword::Row);
            self.expect(&TokenKind::LeftParen)?;
            let row = if self.check(&TokenKind::RightParen) {
                vec![]
            } else {
                self.parse_expression_list()?
            };
            self.expect(&TokenKind::RightParen)?;
            rows.push(row);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(rows)
    }

    /// Parses `col = expr, ...`.
    pub(super) fn parse_assignments(&mut self) -> Result<Vec<Assignment>, ParseError> {
        let mut assignments = vec![];
        loop {
            let column = self.parse_column_ref()?;
            self.expect(&TokenKind::Eq)?;
            let value = self.parse_expr()?;
            assignments.push(Assignment { column, value });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(assignments)
    }

    /// Parses an UPDATE statement (single or multiple table).
    pub(super) fn parse_update(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let low_priority = self.consume_keyword(Keyword::LowPriority);
        let ignore = self.consume_keyword(Keyword::Ignore);

        let tables = self.parse_table_refs()?;
        self.expect_keyword(Keyword::Set)?;
        let assignments = self.parse_assignments()?;

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let order_by = if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };
        let limit = self.parse_row_count_limit()?;

        if tables.len() > 1 && (!order_by.is_empty() || limit.is_some()) {
            return Err(ParseError::new(
                "ORDER BY and LIMIT are not allowed in a multiple-table UPDATE",
                self.previous.span,
            ));
        }

        Ok(UpdateStatement {
            with: None,
            low_priority,
            ignore,
            tables,
            assignments,
            where_clause,
            order_by,
            limit,
        })
    }

    /// Parses a DELETE statement.
    ///
    /// Three forms are accepted:
    /// - `DELETE FROM t [WHERE ...] [ORDER BY ...] [LIMIT n]`
    /// - `DELETE t1, t2 FROM table_refs [WHERE ...]`
    /// - `DELETE FROM t1, t2 USING table_refs [WHERE ...]`
    pub(super) fn parse_delete(&mut self) -> Result<DeleteStatement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        let low_priority = self.consume_keyword(Keyword::LowPriority);
        let quick = self.consume_keyword(Keyword::Quick);
        let ignore = self.consume_keyword(Keyword::Ignore);

        let mut targets = vec![];
        let mut from = vec![];
        let mut using = vec![];

        if self.consume_keyword(Keyword::From) {
            if self.is_delete_target_list() {
                targets = self.parse_delete_targets()?;
                self.expect_keyword(Keyword::Using)?;
                using = self.parse_table_refs()?;
            } else {
                from = self.parse_table_refs()?;
                if self.check_keyword(Keyword::Using) {
                    let span = self.current.span;
                    targets = from
                        .drain(..)
                        .map(|table| table_ref_name(table, span))
                        .collect::<Result<_, _>>()?;
                    self.advance();
                    using = self.parse_table_refs()?;
                }
            }
        } else {
            targets = self.parse_delete_targets()?;
            self.expect_keyword(Keyword::From)?;
            from = self.parse_table_refs()?;
        }

        let where_clause = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let order_by = if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            self.parse_order_by_list()?
        } else {
            vec![]
        };
        let limit = self.parse_row_count_limit()?;

        if !targets.is_empty() && (!order_by.is_empty() || limit.is_some()) {
            return Err(ParseError::new(
                "ORDER BY and LIMIT are not allowed in a multiple-table DELETE",
                self.previous.span,
            ));
        }

        Ok(DeleteStatement {
            with: None,
            low_priority,
            quick,
            ignore,
            targets,
            from,
            using,
            where_clause,
            order_by,
            limit,
        })
    }

    /// Returns true if the current token starts a `tbl.*` target.
    ///
    /// `db.tbl` is read as a table reference instead.
    fn is_delete_target_list(&self) -> bool {
        if self.current_identifier().is_none() {
            return false;
        }
        self.input
            .get(self.current.span.end..)
            .and_then(|rest| rest.trim_start().strip_prefix('.'))
            .is_some_and(|after| after.trim_start().starts_with('*'))
    }

    /// Parses `tbl[.*], ...`.
    fn parse_delete_targets(&mut self) -> Result<Vec<ObjectName>, ParseError> {
        let mut targets = vec![];
        loop {
            let first = self.expect_identifier()?;
            let name = if self.consume(&TokenKind::Dot) {
                if self.consume(&TokenKind::Star) {
                    ObjectName::new(first)
                } else {
                    let name = self.expect_qualified_part()?;
                    if self.consume(&TokenKind::Dot) {
                        self.expect(&TokenKind::Star)?;
                    }
                    ObjectName::qualified(first, name)
                }
            } else {
                ObjectName::new(first)
            };
            targets.push(name);
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(targets)
    }
}

/// Converts a plain table reference into its name.
fn table_ref_name(table: TableRef, span: Span) -> Result<ObjectName, ParseError> {
    match table {
        TableRef::Table {
            name,
            partitions,
            alias: None,
            index_hints,
        } if partitions.is_empty() && index_hints.is_empty() => Ok(name),
        other => Err(ParseError::new(
            format!("Expected a table name before USING, found {other}"),
            span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expr, Statement};

    fn parse(sql: &str) -> Statement {
        Parser::new(sql).parse_statement().unwrap()
    }

    fn parse_insert(sql: &str) -> InsertStatement {
        match parse(sql) {
            Statement::Insert(insert) => *insert,
            other => panic!("expected insert, got {other:?}"),
        }
    }

    fn parse_delete(sql: &str) -> DeleteStatement {
        match parse(sql) {
            Statement::Delete(delete) => *delete,
            other => panic!("expected delete, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_values() {
        let insert = parse_insert("INSERT INTO users (id, name) VALUES (1, 'a'), (2, DEFAULT)");
        assert!(!insert.replace);
        assert_eq!(insert.columns.len(), 2);
        let InsertSource::Values(rows) = &insert.source else {
            panic!("expected values");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], Expr::Default);
    }

    #[test]
    fn test_insert_without_into_and_with_modifiers() {
        let insert = parse_insert("INSERT LOW_PRIORITY IGNORE t VALUE ()");
        assert_eq!(insert.priority, Some(InsertPriority::LowPriority));
        assert!(insert.ignore);
        assert!(matches!(&insert.source, InsertSource::Values(rows) if rows[0].is_empty()));
    }

    #[test]
    fn test_insert_set() {
        let insert = parse_insert("INSERT INTO t SET a = 1, b = a + 1");
        assert!(matches!(&insert.source, InsertSource::Set(a) if a.len() == 2));
    }

    #[test]
    fn test_insert_select() {
        let insert = parse_insert("INSERT INTO t (a) SELECT x FROM u WHERE x > 0");
        assert!(matches!(insert.source, InsertSource::Query(_)));
        let insert = parse_insert("INSERT INTO t (SELECT x FROM u)");
        assert!(insert.columns.is_empty());
        assert!(matches!(insert.source, InsertSource::Query(_)));
    }

    #[test]
    fn test_insert_on_duplicate_key_update() {
        let insert = parse_insert(
            "INSERT INTO t (a, b) VALUES (1, 2) AS new ON DUPLICATE KEY UPDATE b = new.b",
        );
        assert_eq!(insert.row_alias.as_deref(), Some("new"));
        assert_eq!(insert.on_duplicate_update.len(), 1);
        assert_eq!(insert.on_duplicate_update[0].column.name, "b");
    }

    #[test]
    fn test_replace() {
        let insert = parse_insert("REPLACE INTO t VALUES (1)");
        assert!(insert.replace);
        assert!(!insert.ignore);
    }

    #[test]
    fn test_update() {
        let Statement::Update(update) =
            parse("UPDATE LOW_PRIORITY t SET a = 1, t.b = b + 1 WHERE id = 3 ORDER BY id LIMIT 1")
        else {
            panic!("expected update");
        };
        assert!(update.low_priority);
        assert_eq!(update.assignments.len(), 2);
        assert!(update.where_clause.is_some());
        assert_eq!(update.order_by.len(), 1);
        assert_eq!(update.limit, Some(Expr::integer(1)));
    }

    #[test]
    fn test_multi_table_update() {
        let Statement::Update(update) =
            parse("UPDATE a JOIN b ON a.id = b.id SET a.x = b.x WHERE b.y = 1")
        else {
            panic!("expected update");
        };
        assert_eq!(update.tables.len(), 1);
        assert!(matches!(update.tables[0], TableRef::Join { .. }));

        let err = Parser::new("UPDATE a, b SET a.x = 1 LIMIT 1")
            .parse_statement()
            .unwrap_err();
        assert!(err.message.contains("multiple-table UPDATE"));
    }

    #[test]
    fn test_single_table_delete() {
        let delete = parse_delete("DELETE QUICK FROM t WHERE id < 10 ORDER BY id LIMIT 5");
        assert!(delete.quick);
        assert!(!delete.is_multi_table());
        assert_eq!(delete.from.len(), 1);
        assert_eq!(delete.limit, Some(Expr::integer(5)));
    }

    #[test]
    fn test_multi_table_delete() {
        let delete = parse_delete("DELETE t1, t2.* FROM t1 JOIN t2 ON t1.id = t2.id WHERE t1.x = 1");
        assert!(delete.is_multi_table());
        assert_eq!(
            delete.targets,
            vec![ObjectName::new("t1"), ObjectName::new("t2")]
        );
        assert_eq!(delete.from.len(), 1);
    }

    #[test]
    fn test_delete_using() {
        let delete = parse_delete("DELETE FROM t1, t2 USING t1 JOIN t2 ON t1.id = t2.id");
        assert_eq!(delete.targets.len(), 2);
        assert_eq!(delete.using.len(), 1);
        assert!(delete.from.is_empty());

        let delete = parse_delete("DELETE FROM t1.* USING t1 JOIN t2 ON 1");
        assert_eq!(delete.targets, vec![ObjectName::new("t1")]);
    }

    #[test]
    fn test_multi_table_delete_rejects_limit() {
        assert!(
            Parser::new("DELETE t1 FROM t1 JOIN t2 ON 1 LIMIT 1")
                .parse_statement()
                .is_err()
        );
    }
}
