//! Data manipulation statements: INSERT, REPLACE, UPDATE, DELETE.

use core::fmt;

use super::expression::{ColumnRef, Expr, ObjectName};
use super::query::{OrderBy, Query, TableRef, With};
use super::{comma_separated, ident, ident_list};

/// Scheduling modifier of INSERT and REPLACE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InsertPriority {
    LowPriority,
    Delayed,
    HighPriority,
}

impl InsertPriority {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LowPriority => "LOW_PRIORITY",
            Self::Delayed => "DELAYED",
            Self::HighPriority => "HIGH_PRIORITY",
        }
    }
}

/// An assignment (`col = expr`) in SET lists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    /// Target column.
    pub column: ColumnRef,
    /// Value expression.
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InsertSource {
    /// `VALUES (...), (...)` (also `VALUE`).
    Values(Vec<Vec<Expr>>),
    /// `SET col = expr, ...`
    Set(Vec<Assignment>),
    /// `SELECT ...` / `TABLE t`
    Query(Box<Query>),
}

/// An INSERT or REPLACE statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertStatement {
    /// `REPLACE` instead of `INSERT`.
    pub replace: bool,
    /// Scheduling modifier.
    pub priority: Option<InsertPriority>,
    /// `IGNORE`
    pub ignore: bool,
    /// Target table.
    pub table: ObjectName,
    /// `PARTITION (p, ...)`
    pub partitions: Vec<String>,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// Values to insert.
    pub source: InsertSource,
    /// Row alias (`AS new`), referenced from the update list.
    pub row_alias: Option<String>,
    /// `ON DUPLICATE KEY UPDATE` assignments.
    pub on_duplicate_update: Vec<Assignment>,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.replace { "REPLACE" } else { "INSERT" })?;
        if let Some(priority) = self.priority {
            write!(f, " {}", priority.as_str())?;
        }
        if self.ignore {
            f.write_str(" IGNORE")?;
        }
        write!(f, " INTO {}", self.table)?;
        if !self.partitions.is_empty() {
            write!(f, " PARTITION ({})", ident_list(&self.partitions))?;
        }
        if !self.columns.is_empty() {
            write!(f, " ({})", ident_list(&self.columns))?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({})", comma_separated(row))?;
                }
            }
            InsertSource::Set(assignments) => {
                write!(f, " SET {}", comma_separated(assignments))?;
            }
            InsertSource::Query(query) => write!(f, " {query}")?,
        }
        if let Some(alias) = &self.row_alias {
            write!(f, " AS {}", ident(alias))?;
        }
        if !self.on_duplicate_update.is_empty() {
            write!(
                f,
                " ON DUPLICATE KEY UPDATE {}",
                comma_separated(&self.on_duplicate_update)
            )?;
        }
        Ok(())
    }
}

/// An UPDATE statement (single or multiple table).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateStatement {
    /// Common table expressions.
    pub with: Option<With>,
    /// `LOW_PRIORITY`
    pub low_priority: bool,
    /// `IGNORE`
    pub ignore: bool,
    /// Table references; more than one (or a join) makes this a
    /// multiple-table update.
    pub tables: Vec<TableRef>,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// ORDER BY (single-table form only).
    pub order_by: Vec<OrderBy>,
    /// LIMIT row count (single-table form only).
    pub limit: Option<Expr>,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        f.write_str("UPDATE ")?;
        if self.low_priority {
            f.write_str("LOW_PRIORITY ")?;
        }
        if self.ignore {
            f.write_str("IGNORE ")?;
        }
        write!(
            f,
            "{} SET {}",
            comma_separated(&self.tables),
            comma_separated(&self.assignments)
        )?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", comma_separated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        Ok(())
    }
}

/// A DELETE statement.
///
/// Three forms are represented:
/// - `DELETE FROM t ...`: `targets` and `using` are empty, `from` holds `t`;
/// - `DELETE t1, t2 FROM refs ...`: `targets` and `from` are set;
/// - `DELETE FROM t1, t2 USING refs ...`: `targets` and `using` are set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteStatement {
    /// Common table expressions.
    pub with: Option<With>,
    /// `LOW_PRIORITY`
    pub low_priority: bool,
    /// `QUICK`
    pub quick: bool,
    /// `IGNORE`
    pub ignore: bool,
    /// Tables rows are deleted from (multiple-table forms).
    pub targets: Vec<ObjectName>,
    /// FROM table references.
    pub from: Vec<TableRef>,
    /// USING table references.
    pub using: Vec<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// ORDER BY (single-table form only).
    pub order_by: Vec<OrderBy>,
    /// LIMIT row count (single-table form only).
    pub limit: Option<Expr>,
}

impl DeleteStatement {
    /// Returns true for the multiple-table forms.
    #[must_use]
    pub fn is_multi_table(&self) -> bool {
        !self.targets.is_empty()
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        f.write_str("DELETE ")?;
        if self.low_priority {
            f.write_str("LOW_PRIORITY ")?;
        }
        if self.quick {
            f.write_str("QUICK ")?;
        }
        if self.ignore {
            f.write_str("IGNORE ")?;
        }
        if !self.using.is_empty() {
            write!(
                f,
                "FROM {} USING {}",
                comma_separated(&self.targets),
                comma_separated(&self.using)
            )?;
        } else if !self.targets.is_empty() {
            write!(
                f,
                "{} FROM {}",
                comma_separated(&self.targets),
                comma_separated(&self.from)
            )?;
        } else {
            write!(f, "FROM {}", comma_separated(&self.from))?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", comma_separated(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_display() {
        let insert = InsertStatement {
            replace: false,
            priority: None,
            ignore: true,
            table: ObjectName::new("users"),
            partitions: vec![],
            columns: vec![String::from("id"), String::from("name")],
            source: InsertSource::Values(vec![vec![Expr::integer(1), Expr::string("a")]]),
            row_alias: None,
            on_duplicate_update: vec![Assignment {
                column: ColumnRef::new("name"),
                value: Expr::string("b"),
            }],
        };
        assert_eq!(
            insert.to_string(),
            "INSERT IGNORE INTO users (id, name) VALUES (1, 'a') \
             ON DUPLICATE KEY UPDATE name = 'b'"
        );
    }

    #[test]
    fn test_delete_forms_display() {
        let mut delete = DeleteStatement {
            with: None,
            low_priority: false,
            quick: false,
            ignore: false,
            targets: vec![],
            from: vec![TableRef::table("t")],
            using: vec![],
            where_clause: None,
            order_by: vec![],
            limit: Some(Expr::integer(10)),
        };
        assert_eq!(delete.to_string(), "DELETE FROM t LIMIT 10");
        assert!(!delete.is_multi_table());

        delete.limit = None;
        delete.targets = vec![ObjectName::new("t")];
        assert_eq!(delete.to_string(), "DELETE t FROM t");

        delete.using = std::mem::take(&mut delete.from);
        assert_eq!(delete.to_string(), "DELETE FROM t USING t");
        assert!(delete.is_multi_table());
    }
}
