//! Query expression AST types (SELECT, set operations, FROM clauses).

use core::fmt;

use super::expression::{Expr, ObjectName, WindowSpec};
use super::{comma_separated, ident, ident_list};
use crate::dialect::quote_string;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction, when written explicitly.
    pub direction: Option<OrderDirection>,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        Ok(())
    }
}

/// `LIMIT count [OFFSET offset]` (also `LIMIT offset, count`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Limit {
    /// Maximum number of rows.
    pub count: Expr,
    /// Rows to skip.
    pub offset: Option<Expr>,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {}", self.count)?;
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}

/// Row locking clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LockClause {
    /// `FOR UPDATE [OF tbl, ...]`
    ForUpdate {
        /// Tables to lock.
        of: Vec<String>,
        /// Waiting behaviour.
        wait: Option<LockWait>,
    },
    /// `FOR SHARE [OF tbl, ...]`
    ForShare {
        /// Tables to lock.
        of: Vec<String>,
        /// Waiting behaviour.
        wait: Option<LockWait>,
    },
    /// `LOCK IN SHARE MODE`
    LockInShareMode,
}

/// `NOWAIT` or `SKIP LOCKED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LockWait {
    NoWait,
    SkipLocked,
}

impl fmt::Display for LockClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mode, of, wait) = match self {
            Self::ForUpdate { of, wait } => ("FOR UPDATE", of, wait),
            Self::ForShare { of, wait } => ("FOR SHARE", of, wait),
            Self::LockInShareMode => return f.write_str("LOCK IN SHARE MODE"),
        };
        f.write_str(mode)?;
        if !of.is_empty() {
            write!(f, " OF {}", ident_list(of))?;
        }
        match wait {
            Some(LockWait::NoWait) => f.write_str(" NOWAIT"),
            Some(LockWait::SkipLocked) => f.write_str(" SKIP LOCKED"),
            None => Ok(()),
        }
    }
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cte {
    /// CTE name.
    pub name: String,
    /// Optional column list.
    pub columns: Vec<String>,
    /// The CTE body.
    pub query: Box<Query>,
}

/// A `WITH` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct With {
    /// `WITH RECURSIVE`
    pub recursive: bool,
    /// The CTEs, in order.
    pub ctes: Vec<Cte>,
}

impl fmt::Display for With {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WITH ")?;
        if self.recursive {
            f.write_str("RECURSIVE ")?;
        }
        for (i, cte) in self.ctes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ident(&cte.name))?;
            if !cte.columns.is_empty() {
                write!(f, " ({})", ident_list(&cte.columns))?;
            }
            write!(f, " AS ({})", cte.query)?;
        }
        Ok(())
    }
}

/// A complete query: an optional WITH clause, a body, and the clauses that
/// apply to the whole body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Query {
    /// WITH clause.
    pub with: Option<With>,
    /// The query body.
    pub body: SetExpr,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// Locking clause.
    pub locking: Option<LockClause>,
}

impl Query {
    /// Wraps a body with no outer clauses.
    #[must_use]
    pub const fn from_body(body: SetExpr) -> Self {
        Self {
            with: None,
            body,
            order_by: vec![],
            limit: None,
            locking: None,
        }
    }

    /// Returns the SELECT if the body is a single query block.
    #[must_use]
    pub fn as_select(&self) -> Option<&Select> {
        match &self.body {
            SetExpr::Select(select) => Some(select),
            _ => None,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", comma_separated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {limit}")?;
        }
        if let Some(locking) = &self.locking {
            write!(f, " {locking}")?;
        }
        Ok(())
    }
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        }
    }
}

/// `ALL` / `DISTINCT` after a set operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetQuantifier {
    All,
    Distinct,
}

/// The body of a query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetExpr {
    /// A single query block.
    Select(Box<Select>),
    /// A parenthesized query.
    Query(Box<Query>),
    /// `VALUES ROW(...), ...`
    Values(Vec<Vec<Expr>>),
    /// `TABLE t`
    Table(ObjectName),
    /// `left op right`.
    SetOperation {
        /// The operator.
        op: SetOperator,
        /// ALL / DISTINCT.
        quantifier: Option<SetQuantifier>,
        /// Left operand.
        left: Box<SetExpr>,
        /// Right operand.
        right: Box<SetExpr>,
    },
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{select}"),
            Self::Query(query) => write!(f, "({query})"),
            Self::Values(rows) => {
                f.write_str("VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "ROW({})", comma_separated(row))?;
                }
                Ok(())
            }
            Self::Table(name) => write!(f, "TABLE {name}"),
            Self::SetOperation {
                op,
                quantifier,
                left,
                right,
            } => {
                write!(f, "{left} {}", op.as_str())?;
                match quantifier {
                    Some(SetQuantifier::All) => f.write_str(" ALL")?,
                    Some(SetQuantifier::Distinct) => f.write_str(" DISTINCT")?,
                    None => {}
                }
                write!(f, " {right}")
            }
        }
    }
}

/// Query block modifiers placed after `SELECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SelectOption {
    HighPriority,
    StraightJoin,
    SqlSmallResult,
    SqlBigResult,
    SqlNoCache,
    SqlCalcFoundRows,
}

impl SelectOption {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HighPriority => "HIGH_PRIORITY",
            Self::StraightJoin => "STRAIGHT_JOIN",
            Self::SqlSmallResult => "SQL_SMALL_RESULT",
            Self::SqlBigResult => "SQL_BIG_RESULT",
            Self::SqlNoCache => "SQL_NO_CACHE",
            Self::SqlCalcFoundRows => "SQL_CALC_FOUND_ROWS",
        }
    }
}

/// A column in the SELECT list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectColumn {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl SelectColumn {
    /// Creates a new select column.
    #[must_use]
    pub const fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    /// Creates a select column with an alias.
    #[must_use]
    pub fn with_alias(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

impl fmt::Display for SelectColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", ident(alias))?;
        }
        Ok(())
    }
}

/// Target of `SELECT ... INTO`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SelectInto {
    /// `INTO @a, @b`
    Variables(Vec<String>),
    /// `INTO OUTFILE 'file' ...`
    Outfile(Box<Outfile>),
    /// `INTO DUMPFILE 'file'`
    Dumpfile(String),
}

impl fmt::Display for SelectInto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variables(vars) => {
                f.write_str("INTO ")?;
                for (i, var) in vars.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "@{}", ident(var))?;
                }
                Ok(())
            }
            Self::Outfile(outfile) => write!(f, "{outfile}"),
            Self::Dumpfile(file) => write!(f, "INTO DUMPFILE {}", quote_string(file)),
        }
    }
}

/// Target and format of `INTO OUTFILE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Outfile {
    /// File name.
    pub file: String,
    /// `CHARACTER SET name`
    pub charset: Option<String>,
    /// `FIELDS TERMINATED BY 'x'`
    pub fields_terminated_by: Option<String>,
    /// `FIELDS [OPTIONALLY] ENCLOSED BY 'x'`
    pub fields_enclosed_by: Option<String>,
    /// `OPTIONALLY` before `ENCLOSED BY`.
    pub optionally_enclosed: bool,
    /// `FIELDS ESCAPED BY 'x'`
    pub fields_escaped_by: Option<String>,
    /// `LINES STARTING BY 'x'`
    pub lines_starting_by: Option<String>,
    /// `LINES TERMINATED BY 'x'`
    pub lines_terminated_by: Option<String>,
}

impl Outfile {
    /// Creates a target with the server's default format.
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }
}

impl fmt::Display for Outfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INTO OUTFILE {}", quote_string(&self.file))?;
        if let Some(charset) = &self.charset {
            write!(f, " CHARACTER SET {}", ident(charset))?;
        }
        if self.fields_terminated_by.is_some()
            || self.fields_enclosed_by.is_some()
            || self.fields_escaped_by.is_some()
        {
            f.write_str(" FIELDS")?;
            if let Some(terminator) = &self.fields_terminated_by {
                write!(f, " TERMINATED BY {}", quote_string(terminator))?;
            }
            if let Some(enclosure) = &self.fields_enclosed_by {
                if self.optionally_enclosed {
                    f.write_str(" OPTIONALLY")?;
                }
                write!(f, " ENCLOSED BY {}", quote_string(enclosure))?;
            }
            if let Some(escape) = &self.fields_escaped_by {
                write!(f, " ESCAPED BY {}", quote_string(escape))?;
            }
        }
        if self.lines_starting_by.is_some() || self.lines_terminated_by.is_some() {
            f.write_str(" LINES")?;
            if let Some(prefix) = &self.lines_starting_by {
                write!(f, " STARTING BY {}", quote_string(prefix))?;
            }
            if let Some(terminator) = &self.lines_terminated_by {
                write!(f, " TERMINATED BY {}", quote_string(terminator))?;
            }
        }
        Ok(())
    }
}

/// A named window (`WINDOW w AS (...)`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamedWindow {
    /// Window name.
    pub name: String,
    /// Window specification.
    pub spec: WindowSpec,
}

/// A single SELECT query block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Select {
    /// `DISTINCT` / `DISTINCTROW`.
    pub distinct: bool,
    /// Query block modifiers.
    pub options: Vec<SelectOption>,
    /// The columns to select.
    pub columns: Vec<SelectColumn>,
    /// INTO clause.
    pub into: Option<SelectInto>,
    /// FROM clause; empty when absent or `FROM DUAL`.
    pub from: Vec<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// `WITH ROLLUP`
    pub with_rollup: bool,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// WINDOW clause.
    pub windows: Vec<NamedWindow>,
}

impl Select {
    /// Creates a query block selecting `columns` with no other clauses.
    #[must_use]
    pub const fn new(columns: Vec<SelectColumn>) -> Self {
        Self {
            distinct: false,
            options: vec![],
            columns,
            into: None,
            from: vec![],
            where_clause: None,
            group_by: vec![],
            with_rollup: false,
            having: None,
            windows: vec![],
        }
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        for option in &self.options {
            write!(f, "{} ", option.as_str())?;
        }
        write!(f, "{}", comma_separated(&self.columns))?;
        if let Some(into) = &self.into {
            write!(f, " {into}")?;
        }
        if !self.from.is_empty() {
            write!(f, " FROM {}", comma_separated(&self.from))?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", comma_separated(&self.group_by))?;
            if self.with_rollup {
                f.write_str(" WITH ROLLUP")?;
            }
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.windows.is_empty() {
            f.write_str(" WINDOW ")?;
            for (i, window) in self.windows.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{} AS ({})", ident(&window.name), window.spec)?;
            }
        }
        Ok(())
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinType {
    /// `[INNER] JOIN`
    Inner,
    /// `CROSS JOIN`
    Cross,
    /// `LEFT [OUTER] JOIN`
    Left,
    /// `RIGHT [OUTER] JOIN`
    Right,
    /// `STRAIGHT_JOIN`
    Straight,
    /// `NATURAL [INNER] JOIN`
    Natural,
    /// `NATURAL LEFT [OUTER] JOIN`
    NaturalLeft,
    /// `NATURAL RIGHT [OUTER] JOIN`
    NaturalRight,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Straight => "STRAIGHT_JOIN",
            Self::Natural => "NATURAL JOIN",
            Self::NaturalLeft => "NATURAL LEFT JOIN",
            Self::NaturalRight => "NATURAL RIGHT JOIN",
        }
    }
}

/// Join condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinConstraint {
    /// No condition.
    None,
    /// `ON expr`
    On(Expr),
    /// `USING (col, ...)`
    Using(Vec<String>),
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableRef,
    /// The join condition.
    pub constraint: JoinConstraint,
}

/// `USE`, `IGNORE` or `FORCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexHintAction {
    Use,
    Ignore,
    Force,
}

/// Scope of an index hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexHintScope {
    Join,
    OrderBy,
    GroupBy,
}

/// An index hint (`USE INDEX (idx)`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexHint {
    /// The hint action.
    pub action: IndexHintAction,
    /// `FOR JOIN`, `FOR ORDER BY` or `FOR GROUP BY`.
    pub scope: Option<IndexHintScope>,
    /// Index names.
    pub indexes: Vec<String>,
}

impl fmt::Display for IndexHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            IndexHintAction::Use => "USE",
            IndexHintAction::Ignore => "IGNORE",
            IndexHintAction::Force => "FORCE",
        };
        write!(f, "{action} INDEX")?;
        match self.scope {
            Some(IndexHintScope::Join) => f.write_str(" FOR JOIN")?,
            Some(IndexHintScope::OrderBy) => f.write_str(" FOR ORDER BY")?,
            Some(IndexHintScope::GroupBy) => f.write_str(" FOR GROUP BY")?,
            None => {}
        }
        write!(f, " ({})", ident_list(&self.indexes))
    }
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableRef {
    /// A table name.
    Table {
        /// Table name.
        name: ObjectName,
        /// `PARTITION (p, ...)`
        partitions: Vec<String>,
        /// Alias.
        alias: Option<String>,
        /// Index hints.
        index_hints: Vec<IndexHint>,
    },
    /// A derived table.
    Derived {
        /// `LATERAL`
        lateral: bool,
        /// The subquery.
        subquery: Box<Query>,
        /// Alias.
        alias: Option<String>,
        /// Column aliases.
        columns: Vec<String>,
    },
    /// A parenthesized table reference.
    Nested(Box<TableRef>),
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: ObjectName::new(name),
            partitions: vec![],
            alias: None,
            index_hints: vec![],
        }
    }

    /// Returns the alias, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Table { alias, .. } | Self::Derived { alias, .. } => alias.as_deref(),
            Self::Nested(_) | Self::Join { .. } => None,
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table {
                name,
                partitions,
                alias,
                index_hints,
            } => {
                write!(f, "{name}")?;
                if !partitions.is_empty() {
                    write!(f, " PARTITION ({})", ident_list(partitions))?;
                }
                if let Some(alias) = alias {
                    write!(f, " AS {}", ident(alias))?;
                }
                for hint in index_hints {
                    write!(f, " {hint}")?;
                }
                Ok(())
            }
            Self::Derived {
                lateral,
                subquery,
                alias,
                columns,
            } => {
                if *lateral {
                    f.write_str("LATERAL ")?;
                }
                write!(f, "({subquery})")?;
                if let Some(alias) = alias {
                    write!(f, " AS {}", ident(alias))?;
                }
                if !columns.is_empty() {
                    write!(f, " ({})", ident_list(columns))?;
                }
                Ok(())
            }
            Self::Nested(inner) => write!(f, "({inner})"),
            Self::Join { left, join } => {
                write!(f, "{left} {} {}", join.join_type.as_str(), join.table)?;
                match &join.constraint {
                    JoinConstraint::None => Ok(()),
                    JoinConstraint::On(expr) => write!(f, " ON {expr}"),
                    JoinConstraint::Using(columns) => {
                        write!(f, " USING ({})", ident_list(columns))
                    }
                }
            }
        }
    }
}
