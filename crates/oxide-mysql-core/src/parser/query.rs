//! Query parsing: SELECT blocks, set operations, FROM clauses.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Cte, Expr, IndexHint, IndexHintAction, IndexHintScope, JoinClause, JoinConstraint, JoinType,
    Limit, LockClause, LockWait, NamedWindow, OrderBy, OrderDirection, Outfile, Query, Select,
    SelectColumn, SelectInto, SelectOption, SetExpr, SetOperator, SetQuantifier, Statement,
    TableRef, With,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a query: `[WITH ...] body [ORDER BY ...] [LIMIT ...] [locking]`.
    pub(super) fn parse_query(&mut self) -> Result<Query, ParseError> {
        self.nested(Self::parse_query_at)
    }

    fn parse_query_at(&mut self) -> Result<Query, ParseError> {
        let with = if self.check_keyword(Keyword::With) {
            Some(self.parse_with()?)
        } else {
            None
        };
        self.parse_query_after_with(with)
    }

    /// Parses `WITH ...` followed by a query, UPDATE or DELETE.
    pub(super) fn parse_with_statement(&mut self) -> Result<Statement, ParseError> {
        let with = self.parse_with()?;
        match self.current.as_keyword() {
            Some(Keyword::Update) => {
                let mut update = self.parse_update()?;
                update.with = Some(with);
                Ok(Statement::Update(Box::new(update)))
            }
            Some(Keyword::Delete) => {
                let mut delete = self.parse_delete()?;
                delete.with = Some(with);
                Ok(Statement::Delete(Box::new(delete)))
            }
            _ => {
                let query = self.nested(|parser| parser.parse_query_after_with(Some(with)))?;
                Ok(Statement::Query(Box::new(query)))
            }
        }
    }

    fn parse_query_after_with(&mut self, with: Option<With>) -> Result<Query, ParseError> {
        let body = self.parse_set_expr(1)?;
        let mut query = Query::from_body(body);
        query.with = with;

        if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            query.order_by = self.parse_order_by_list()?;
        }
        if self.consume_keyword(Keyword::Limit) {
            query.limit = Some(self.parse_limit()?);
        }
        self.parse_trailing_into(&mut query.body)?;
        query.locking = self.parse_locking_clause()?;
        self.parse_trailing_into(&mut query.body)?;

        Ok(query)
    }

    /// Parses set operations with precedence climbing. `INTERSECT` binds
    /// tighter than `UNION` and `EXCEPT`.
    fn parse_set_expr(&mut self, min_prec: u8) -> Result<SetExpr, ParseError> {
        let mut left = self.parse_query_primary()?;

        loop {
            let (op, prec) = match self.current.as_keyword() {
                Some(Keyword::Union) => (SetOperator::Union, 1),
                Some(Keyword::Except) => (SetOperator::Except, 1),
                Some(Keyword::Intersect) => (SetOperator::Intersect, 2),
                _ => break,
            };
            if prec < min_prec {
                break;
            }
            self.advance();

            let quantifier = if self.consume_keyword(Keyword::All) {
                Some(SetQuantifier::All)
            } else if self.consume_keyword(Keyword::Distinct) {
                Some(SetQuantifier::Distinct)
            } else {
                None
            };

            let right = self.parse_set_expr(prec + 1)?;
            left = SetExpr::SetOperation {
                op,
                quantifier,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_query_primary(&mut self) -> Result<SetExpr, ParseError> {
        if self.consume(&TokenKind::LeftParen) {
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(SetExpr::Query(Box::new(query)));
        }
        match self.current.as_keyword() {
            Some(Keyword::Select) => Ok(SetExpr::Select(Box::new(self.parse_select()?))),
            Some(Keyword::Values) => {
                self.advance();
                Ok(SetExpr::Values(self.parse_row_constructors()?))
            }
            Some(Keyword::Table) => {
                self.advance();
                Ok(SetExpr::Table(self.parse_object_name()?))
            }
            _ => Err(self.error_expected("SELECT")),
        }
    }

    /// Parses `ROW(...), ROW(...)` after a VALUES statement.
    fn parse_row_constructors(&mut self) -> Result<Vec<Vec<Expr>>, ParseError> {
        let mut rows = vec![];
        loop {
            self.expect_keyword(Keyword::Row)?;
            self.expect(&TokenKind::LeftParen)?;
            rows.push(self.parse_expression_list()?);
            self.expect(&TokenKind::RightParen)?;
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(rows)
    }

    pub(super) fn parse_with(&mut self) -> Result<With, ParseError> {
        self.expect_keyword(Keyword::With)?;
        let recursive = self.consume_keyword(Keyword::Recursive);

        let mut ctes = vec![];
        loop {
            let name = self.expect_identifier()?;
            let columns = if self.check(&TokenKind::LeftParen) {
                self.parse_parenthesized_identifiers()?
            } else {
                vec![]
            };
            self.expect_keyword(Keyword::As)?;
            self.expect(&TokenKind::LeftParen)?;
            let query = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            ctes.push(Cte {
                name,
                columns,
                query: Box::new(query),
            });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }

        Ok(With { recursive, ctes })
    }

    /// Parses a single query block.
    fn parse_select(&mut self) -> Result<Select, ParseError> {
        self.expect_keyword(Keyword::Select)?;
        let mut select = Select::new(vec![]);

        // Modifiers may appear in any order.
        loop {
            let option = match self.current.as_keyword() {
                Some(Keyword::All) => None,
                Some(Keyword::Distinct | Keyword::Distinctrow) => {
                    select.distinct = true;
                    None
                }
                Some(Keyword::HighPriority) => Some(SelectOption::HighPriority),
                Some(Keyword::StraightJoin) => Some(SelectOption::StraightJoin),
                Some(Keyword::SqlSmallResult) => Some(SelectOption::SqlSmallResult),
                Some(Keyword::SqlBigResult) => Some(SelectOption::SqlBigResult),
                Some(Keyword::SqlNoCache) => Some(SelectOption::SqlNoCache),
                Some(Keyword::SqlCalcFoundRows) => Some(SelectOption::SqlCalcFoundRows),
                _ => break,
            };
            self.advance();
            if let Some(option) = option {
                if !select.options.contains(&option) {
                    select.options.push(option);
                }
            }
        }

        select.columns = self.parse_select_columns()?;

        if self.check_keyword(Keyword::Into) {
            select.into = Some(self.parse_select_into()?);
        }

        if self.consume_keyword(Keyword::From) {
            if !self.consume_keyword(Keyword::Dual) {
                select.from = self.parse_table_refs()?;
            }
        }

        if self.consume_keyword(Keyword::Where) {
            select.where_clause = Some(self.parse_expr()?);
        }

        if self.consume_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            select.group_by = self.parse_expression_list()?;
            if self.check_keyword(Keyword::With) && self.peek_keyword(Keyword::Rollup) {
                self.advance();
                self.advance();
                select.with_rollup = true;
            }
        }

        if self.consume_keyword(Keyword::Having) {
            select.having = Some(self.parse_expr()?);
        }

        if self.consume_keyword(Keyword::Window) {
            loop {
                let name = self.expect_identifier()?;
                self.expect_keyword(Keyword::As)?;
                let spec = self.parse_window_spec()?;
                select.windows.push(NamedWindow { name, spec });
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }

        if select.into.is_none() && self.check_keyword(Keyword::Into) {
            select.into = Some(self.parse_select_into()?);
        }

        Ok(select)
    }

    fn parse_select_columns(&mut self) -> Result<Vec<SelectColumn>, ParseError> {
        let mut columns = vec![];
        loop {
            let expr = self.parse_expr()?;
            let alias = match &self.current.kind {
                _ if matches!(expr, Expr::Wildcard { .. }) => None,
                // A column alias may be a bare string.
                TokenKind::String(alias) => {
                    let alias = alias.clone();
                    self.advance();
                    Some(alias)
                }
                _ => self.parse_optional_alias()?,
            };
            columns.push(SelectColumn { expr, alias });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(columns)
    }

    /// Parses `INTO @var, ...`, `INTO OUTFILE 'f'` or `INTO DUMPFILE 'f'`.
    fn parse_select_into(&mut self) -> Result<SelectInto, ParseError> {
        self.expect_keyword(Keyword::Into)?;
        if self.consume_word("OUTFILE") {
            return Ok(SelectInto::Outfile(Box::new(self.parse_outfile()?)));
        }
        if self.consume_word("DUMPFILE") {
            return Ok(SelectInto::Dumpfile(self.expect_string()?));
        }

        let mut variables = vec![];
        loop {
            match &self.current.kind {
                TokenKind::UserVariable(name) => {
                    variables.push(name.clone());
                    self.advance();
                }
                _ => return Err(self.error_expected("user variable")),
            }
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(SelectInto::Variables(variables))
    }

    /// Parses `'file' [CHARACTER SET cs] [FIELDS ...] [LINES ...]` after
    /// `INTO OUTFILE`.
    fn parse_outfile(&mut self) -> Result<Outfile, ParseError> {
        let mut outfile = Outfile::new(self.expect_string()?);
        if self.consume_keyword(Keyword::Charset) {
            outfile.charset = Some(self.expect_name_or_string()?);
        } else if self.consume_keyword(Keyword::Character) {
            self.expect_keyword(Keyword::Set)?;
            outfile.charset = Some(self.expect_name_or_string()?);
        }

        if self.consume_keyword(Keyword::Fields) || self.consume_keyword(Keyword::Columns) {
            let mut any = false;
            loop {
                if self.consume_word("TERMINATED") {
                    self.expect_keyword(Keyword::By)?;
                    outfile.fields_terminated_by = Some(self.expect_string()?);
                } else if self.check_word("OPTIONALLY") || self.check_word("ENCLOSED") {
                    outfile.optionally_enclosed = self.consume_word("OPTIONALLY");
                    self.expect_word("ENCLOSED")?;
                    self.expect_keyword(Keyword::By)?;
                    outfile.fields_enclosed_by = Some(self.expect_string()?);
                } else if self.consume_word("ESCAPED") {
                    self.expect_keyword(Keyword::By)?;
                    outfile.fields_escaped_by = Some(self.expect_string()?);
                } else {
                    break;
                }
                any = true;
            }
            if !any {
                return Err(self.error_expected("TERMINATED, ENCLOSED or ESCAPED"));
            }
        }

        if self.consume_word("LINES") {
            let mut any = false;
            loop {
                if self.consume_word("STARTING") {
                    self.expect_keyword(Keyword::By)?;
                    outfile.lines_starting_by = Some(self.expect_string()?);
                } else if self.consume_word("TERMINATED") {
                    self.expect_keyword(Keyword::By)?;
                    outfile.lines_terminated_by = Some(self.expect_string()?);
                } else {
                    break;
                }
                any = true;
            }
            if !any {
                return Err(self.error_expected("STARTING or TERMINATED"));
            }
        }
        Ok(outfile)
    }

    /// Attaches an `INTO` written after the whole query block.
    fn parse_trailing_into(&mut self, body: &mut SetExpr) -> Result<(), ParseError> {
        if !self.check_keyword(Keyword::Into) {
            return Ok(());
        }
        match body {
            SetExpr::Select(select) if select.into.is_none() => {
                select.into = Some(self.parse_select_into()?);
                Ok(())
            }
            _ => Err(ParseError::new(
                "INTO is only allowed once, on a single query block",
                self.current.span,
            )),
        }
    }

    /// Parses a comma-separated list of order by items.
    pub(super) fn parse_order_by_list(&mut self) -> Result<Vec<OrderBy>, ParseError> {
        let mut items = vec![];
        loop {
            let expr = self.parse_expr()?;
            let direction = if self.consume_keyword(Keyword::Asc) {
                Some(OrderDirection::Asc)
            } else if self.consume_keyword(Keyword::Desc) {
                Some(OrderDirection::Desc)
            } else {
                None
            };
            items.push(OrderBy { expr, direction });
            if !self.consume(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Parses the operands of `LIMIT` (the keyword already consumed).
    ///
    /// `LIMIT offset, count` is normalized to `LIMIT count OFFSET offset`.
    fn parse_limit(&mut self) -> Result<Limit, ParseError> {
        let first = self.parse_expr()?;
        if self.consume(&TokenKind::Comma) {
            let count = self.parse_expr()?;
            return Ok(Limit {
                count,
                offset: Some(first),
            });
        }
        let offset = if self.consume_keyword(Keyword::Offset) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Limit {
            count: first,
            offset,
        })
    }

    /// Parses the row-count `LIMIT` of UPDATE and DELETE.
    pub(super) fn parse_row_count_limit(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.consume_keyword(Keyword::Limit) {
            Ok(Some(self.parse_expr()?))
        } else {
            Ok(None)
        }
    }

    fn parse_locking_clause(&mut self) -> Result<Option<LockClause>, ParseError> {
        if self.consume_keyword(Keyword::Lock) {
            self.expect_keyword(Keyword::In)?;
            self.expect_keyword(Keyword::Share)?;
            self.expect_keyword(Keyword::Mode)?;
            return Ok(Some(LockClause::LockInShareMode));
        }
        if !self.consume_keyword(Keyword::For) {
            return Ok(None);
        }

        let update = if self.consume_keyword(Keyword::Update) {
            true
        } else if self.consume_keyword(Keyword::Share) {
            false
        } else {
            return Err(self.error_expected("UPDATE or SHARE"));
        };
        let of = if self.consume_keyword(Keyword::Of) {
            self.parse_identifier_list()?
        } else {
            vec![]
        };
        let wait = if self.consume_word("NOWAIT") {
            Some(LockWait::NoWait)
        } else if self.consume_word("SKIP") {
            self.expect_word("LOCKED")?;
            Some(LockWait::SkipLocked)
        } else {
            None
        };

        Ok(Some(if update {
            LockClause::ForUpdate { of, wait }
        } else {
            LockClause::ForShare { of, wait }
        }))
    }

    /// Parses a comma-separated list of table references.
    pub(super) fn parse_table_refs(&mut self) -> Result<Vec<TableRef>, ParseError> {
        let mut tables = vec![self.parse_table_ref()?];
        while self.consume(&TokenKind::Comma) {
            tables.push(self.parse_table_ref()?);
        }
        Ok(tables)
    }

    /// Parses a table factor followed by any number of joins.
    pub(super) fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        let mut left = self.parse_table_factor()?;

        while let Some(join_type) = self.parse_join_type()? {
            let table = self.parse_table_factor()?;
            let constraint = if self.consume_keyword(Keyword::On) {
                JoinConstraint::On(self.parse_expr()?)
            } else if self.consume_keyword(Keyword::Using) {
                JoinConstraint::Using(self.parse_parenthesized_identifiers()?)
            } else {
                JoinConstraint::None
            };

            let needs_condition = matches!(join_type, JoinType::Left | JoinType::Right);
            if needs_condition && constraint == JoinConstraint::None {
                return Err(self.error_expected("ON or USING"));
            }

            left = TableRef::Join {
                left: Box::new(left),
                join: Box::new(JoinClause {
                    join_type,
                    table,
                    constraint,
                }),
            };
        }

        Ok(left)
    }

    fn parse_join_type(&mut self) -> Result<Option<JoinType>, ParseError> {
        let join_type = match self.current.as_keyword() {
            Some(Keyword::Join) => {
                self.advance();
                return Ok(Some(JoinType::Inner));
            }
            Some(Keyword::StraightJoin) => {
                self.advance();
                return Ok(Some(JoinType::Straight));
            }
            Some(Keyword::Inner) => {
                self.advance();
                JoinType::Inner
            }
            Some(Keyword::Cross) => {
                self.advance();
                JoinType::Cross
            }
            Some(Keyword::Left) => {
                self.advance();
                self.consume_keyword(Keyword::Outer);
                JoinType::Left
            }
            Some(Keyword::Right) => {
                self.advance();
                self.consume_keyword(Keyword::Outer);
                JoinType::Right
            }
            Some(Keyword::Natural) => {
                self.advance();
                if self.consume_keyword(Keyword::Left) {
                    self.consume_keyword(Keyword::Outer);
                    JoinType::NaturalLeft
                } else if self.consume_keyword(Keyword::Right) {
                    self.consume_keyword(Keyword::Outer);
                    JoinType::NaturalRight
                } else {
                    self.consume_keyword(Keyword::Inner);
                    JoinType::Natural
                }
            }
            _ => return Ok(None),
        };
        self.expect_keyword(Keyword::Join)?;
        Ok(Some(join_type))
    }

    /// Parses a table name, derived table or parenthesized join.
    fn parse_table_factor(&mut self) -> Result<TableRef, ParseError> {
        let lateral = self.check_word("LATERAL") && matches!(self.peek(), TokenKind::LeftParen);
        if lateral {
            self.advance();
        }

        if self.check(&TokenKind::LeftParen) {
            let derived = lateral || self.peek().starts_query();
            self.advance();

            if !derived {
                let inner = self.nested(Self::parse_table_ref)?;
                self.expect(&TokenKind::RightParen)?;
                return Ok(TableRef::Nested(Box::new(inner)));
            }

            let subquery = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            let alias = self.parse_optional_alias()?;
            let columns = if alias.is_some() && self.check(&TokenKind::LeftParen) {
                self.parse_parenthesized_identifiers()?
            } else {
                vec![]
            };
            return Ok(TableRef::Derived {
                lateral,
                subquery: Box::new(subquery),
                alias,
                columns,
            });
        }

        let name = self.parse_object_name()?;
        let partitions = self.parse_partition_names()?;
        let alias = self.parse_optional_alias()?;
        let mut index_hints = vec![];
        while let Some(hint) = self.parse_index_hint()? {
            index_hints.push(hint);
        }

        Ok(TableRef::Table {
            name,
            partitions,
            alias,
            index_hints,
        })
    }

    /// Parses `[PARTITION (p, ...)]` after a table name.
    pub(super) fn parse_partition_names(&mut self) -> Result<Vec<String>, ParseError> {
        if self.consume_keyword(Keyword::Partition) {
            self.parse_parenthesized_identifiers()
        } else {
            Ok(vec![])
        }
    }

    fn parse_index_hint(&mut self) -> Result<Option<IndexHint>, ParseError> {
        let action = match self.current.as_keyword() {
            Some(Keyword::Use) => IndexHintAction::Use,
            Some(Keyword::Ignore) => IndexHintAction::Ignore,
            Some(Keyword::Force) => IndexHintAction::Force,
            _ => return Ok(None),
        };
        if !matches!(
            self.peek(),
            TokenKind::Keyword(Keyword::Index | Keyword::Key)
        ) {
            return Ok(None);
        }
        self.advance();
        self.advance();

        let scope = if self.consume_keyword(Keyword::For) {
            if self.consume_keyword(Keyword::Join) {
                Some(IndexHintScope::Join)
            } else if self.consume_keyword(Keyword::Order) {
                self.expect_keyword(Keyword::By)?;
                Some(IndexHintScope::OrderBy)
            } else {
                self.expect_keyword(Keyword::Group)?;
                self.expect_keyword(Keyword::By)?;
                Some(IndexHintScope::GroupBy)
            }
        } else {
            None
        };

        self.expect(&TokenKind::LeftParen)?;
        let mut indexes = vec![];
        if !self.check(&TokenKind::RightParen) {
            loop {
                if self.consume_keyword(Keyword::Primary) {
                    indexes.push(String::from("PRIMARY"));
                } else {
                    indexes.push(self.expect_identifier()?);
                }
                if !self.consume(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(Some(IndexHint {
            action,
            scope,
            indexes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_query(sql: &str) -> Query {
        match Parser::new(sql).parse_statement() {
            Ok(Statement::Query(query)) => *query,
            other => panic!("expected query, got {other:?}"),
        }
    }

    fn parse_select(sql: &str) -> Select {
        match parse_query(sql).body {
            SetExpr::Select(select) => *select,
            other => panic!("expected select, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_select() {
        let select = parse_select("SELECT a, b AS c, d e FROM t");
        assert_eq!(select.columns.len(), 3);
        assert_eq!(select.columns[1].alias.as_deref(), Some("c"));
        assert_eq!(select.columns[2].alias.as_deref(), Some("e"));
        assert_eq!(select.from.len(), 1);
    }

    #[test]
    fn test_select_options_any_order() {
        let select = parse_select("SELECT SQL_NO_CACHE DISTINCT HIGH_PRIORITY a FROM t");
        assert!(select.distinct);
        assert_eq!(
            select.options,
            vec![SelectOption::SqlNoCache, SelectOption::HighPriority]
        );
    }

    #[test]
    fn test_from_dual() {
        let select = parse_select("SELECT 1 FROM DUAL");
        assert!(select.from.is_empty());
    }

    #[test]
    fn test_group_by_with_rollup_and_having() {
        let select =
            parse_select("SELECT a, COUNT(*) FROM t GROUP BY a WITH ROLLUP HAVING COUNT(*) > 1");
        assert_eq!(select.group_by.len(), 1);
        assert!(select.with_rollup);
        assert!(select.having.is_some());
    }

    #[test]
    fn test_named_window() {
        let select = parse_select("SELECT RANK() OVER w FROM t WINDOW w AS (ORDER BY a)");
        assert_eq!(select.windows.len(), 1);
        assert_eq!(select.windows[0].name, "w");
    }

    #[test]
    fn test_order_by_and_limit_forms() {
        let query = parse_query("SELECT a FROM t ORDER BY a DESC, b LIMIT 5, 10");
        assert_eq!(query.order_by.len(), 2);
        assert_eq!(query.order_by[0].direction, Some(OrderDirection::Desc));
        assert_eq!(query.order_by[1].direction, None);
        let limit = query.limit.unwrap();
        assert_eq!(limit.count, Expr::integer(10));
        assert_eq!(limit.offset, Some(Expr::integer(5)));

        let limit = parse_query("SELECT a FROM t LIMIT 10 OFFSET 5").limit.unwrap();
        assert_eq!(limit.count, Expr::integer(10));
        assert_eq!(limit.offset, Some(Expr::integer(5)));
    }

    #[test]
    fn test_joins() {
        let select = parse_select(
            "SELECT * FROM a JOIN b ON a.id = b.id LEFT OUTER JOIN c USING (id) CROSS JOIN d",
        );
        let TableRef::Join { left, join } = &select.from[0] else {
            panic!("expected join");
        };
        assert_eq!(join.join_type, JoinType::Cross);
        let TableRef::Join { join, .. } = left.as_ref() else {
            panic!("expected join");
        };
        assert_eq!(join.join_type, JoinType::Left);
        assert_eq!(join.constraint, JoinConstraint::Using(vec![String::from("id")]));
    }

    #[test]
    fn test_left_join_requires_condition() {
        assert!(Parser::new("SELECT * FROM a LEFT JOIN b").parse_statement().is_err());
    }

    #[test]
    fn test_natural_and_straight_join() {
        let select = parse_select("SELECT * FROM a NATURAL LEFT JOIN b STRAIGHT_JOIN c ON 1");
        let TableRef::Join { left, join } = &select.from[0] else {
            panic!("expected join");
        };
        assert_eq!(join.join_type, JoinType::Straight);
        assert!(matches!(
            left.as_ref(),
            TableRef::Join { join, .. } if join.join_type == JoinType::NaturalLeft
        ));
    }

    #[test]
    fn test_derived_and_nested_tables() {
        let select = parse_select("SELECT * FROM (SELECT 1 AS x) AS d (y), (a JOIN b ON 1)");
        assert!(matches!(
            &select.from[0],
            TableRef::Derived { columns, lateral: false, .. } if columns.len() == 1
        ));
        assert!(matches!(&select.from[1], TableRef::Nested(_)));

        let select = parse_select("SELECT * FROM t, LATERAL (SELECT t.a) AS l");
        assert!(matches!(&select.from[1], TableRef::Derived { lateral: true, .. }));
    }

    #[test]
    fn test_index_hints() {
        let select =
            parse_select("SELECT * FROM t USE INDEX (a, b) IGNORE KEY FOR ORDER BY (PRIMARY)");
        let TableRef::Table { index_hints, .. } = &select.from[0] else {
            panic!("expected table");
        };
        assert_eq!(index_hints.len(), 2);
        assert_eq!(index_hints[0].action, IndexHintAction::Use);
        assert_eq!(index_hints[1].scope, Some(IndexHintScope::OrderBy));
        assert_eq!(index_hints[1].indexes, vec![String::from("PRIMARY")]);
    }

    #[test]
    fn test_set_operation_precedence() {
        // INTERSECT binds tighter than UNION.
        let query = parse_query("SELECT 1 UNION ALL SELECT 2 INTERSECT SELECT 3");
        let SetExpr::SetOperation {
            op,
            quantifier,
            right,
            ..
        } = query.body
        else {
            panic!("expected set operation");
        };
        assert_eq!(op, SetOperator::Union);
        assert_eq!(quantifier, Some(SetQuantifier::All));
        assert!(matches!(
            *right,
            SetExpr::SetOperation {
                op: SetOperator::Intersect,
                ..
            }
        ));
    }

    #[test]
    fn test_set_operations_are_left_associative() {
        let query = parse_query("SELECT 1 UNION SELECT 2 EXCEPT SELECT 3");
        let SetExpr::SetOperation { op, left, .. } = query.body else {
            panic!("expected set operation");
        };
        assert_eq!(op, SetOperator::Except);
        assert!(matches!(
            *left,
            SetExpr::SetOperation {
                op: SetOperator::Union,
                ..
            }
        ));
    }

    #[test]
    fn test_parenthesized_query_with_order_by() {
        let query = parse_query("(SELECT a FROM t) UNION (SELECT a FROM u) ORDER BY a LIMIT 1");
        assert!(matches!(query.body, SetExpr::SetOperation { .. }));
        assert_eq!(query.order_by.len(), 1);
        assert!(query.limit.is_some());
    }

    #[test]
    fn test_with_clause() {
        let query = parse_query(
            "WITH RECURSIVE n (i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM n WHERE i < 5) \
             SELECT i FROM n",
        );
        let with = query.with.unwrap();
        assert!(with.recursive);
        assert_eq!(with.ctes[0].name, "n");
        assert_eq!(with.ctes[0].columns, vec![String::from("i")]);
    }

    #[test]
    fn test_locking_clauses() {
        let query = parse_query("SELECT * FROM t FOR UPDATE OF t SKIP LOCKED");
        assert_eq!(
            query.locking,
            Some(LockClause::ForUpdate {
                of: vec![String::from("t")],
                wait: Some(LockWait::SkipLocked),
            })
        );
        let query = parse_query("SELECT * FROM t LOCK IN SHARE MODE");
        assert_eq!(query.locking, Some(LockClause::LockInShareMode));
        let query = parse_query("SELECT * FROM t FOR SHARE NOWAIT");
        assert!(matches!(
            query.locking,
            Some(LockClause::ForShare {
                wait: Some(LockWait::NoWait),
                ..
            })
        ));
    }

    #[test]
    fn test_select_into_positions() {
        let select = parse_select("SELECT a, b INTO @x, @y FROM t");
        assert_eq!(
            select.into,
            Some(SelectInto::Variables(vec![String::from("x"), String::from("y")]))
        );

        let query = parse_query("SELECT a FROM t LIMIT 1 INTO OUTFILE '/tmp/a.csv'");
        let select = query.as_select().unwrap();
        assert_eq!(
            select.into,
            Some(SelectInto::Outfile(Box::new(Outfile::new("/tmp/a.csv"))))
        );

        assert!(
            Parser::new("SELECT a INTO @x FROM t INTO @y")
                .parse_statement()
                .is_err()
        );
    }
}
