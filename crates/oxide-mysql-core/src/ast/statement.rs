//! The top-level statement type.

use core::fmt;

use super::admin::{
    AlterUserStatement, CallStatement, CreateUserStatement, DescribeStatement, DropUserStatement,
    ExplainFormat, GrantStatement, LockTablesStatement, PrepareSource, RevokeStatement,
    SetAssignment, SetNamesStatement, SetPasswordStatement, SetTransactionStatement,
    ShowStatement, TransactionMode, TruncateStatement,
};
use super::ddl::{
    AlterDatabaseStatement, AlterTableStatement, AlterViewStatement, CreateDatabaseStatement,
    CreateIndexStatement, CreateTableStatement, CreateViewStatement, DropDatabaseStatement,
    DropIndexStatement, DropRoutineStatement, DropTableStatement, DropViewStatement,
    RenameTableStatement,
};
use super::dml::{DeleteStatement, InsertStatement, UpdateStatement};
use super::query::Query;
use super::{comma_separated, ident};
use crate::dialect::quote_string;

/// The category of a statement.
///
/// Returned both by [`Statement::kind`] and by the lightweight sniffer
/// [`crate::determine_statement_kind`], which looks only at leading tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StatementKind {
    Select,
    Insert,
    Replace,
    Update,
    Delete,
    CreateDatabase,
    CreateTable,
    CreateIndex,
    CreateView,
    CreateUser,
    AlterDatabase,
    AlterTable,
    AlterView,
    AlterUser,
    DropDatabase,
    DropTable,
    DropIndex,
    DropView,
    DropUser,
    DropRoutine,
    Truncate,
    RenameTable,
    Grant,
    Revoke,
    StartTransaction,
    Commit,
    Rollback,
    Savepoint,
    ReleaseSavepoint,
    SetTransaction,
    Use,
    Show,
    Explain,
    Describe,
    Set,
    SetNames,
    SetPassword,
    LockTables,
    UnlockTables,
    Call,
    Prepare,
    Execute,
    Deallocate,
    /// Not recognized.
    Unknown,
}

impl StatementKind {
    /// Returns true for statements that return a result set.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::Show | Self::Explain | Self::Describe
        )
    }

    /// Returns true for data manipulation statements.
    #[must_use]
    pub const fn is_dml(&self) -> bool {
        matches!(
            self,
            Self::Insert | Self::Replace | Self::Update | Self::Delete
        )
    }

    /// Returns true for data definition statements.
    #[must_use]
    pub const fn is_ddl(&self) -> bool {
        matches!(
            self,
            Self::CreateDatabase
                | Self::CreateTable
                | Self::CreateIndex
                | Self::CreateView
                | Self::AlterDatabase
                | Self::AlterTable
                | Self::AlterView
                | Self::DropDatabase
                | Self::DropTable
                | Self::DropIndex
                | Self::DropView
                | Self::DropRoutine
                | Self::Truncate
                | Self::RenameTable
        )
    }
}

/// An SQL statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    /// SELECT, set operations, WITH ... SELECT.
    Query(Box<Query>),
    /// INSERT or REPLACE.
    Insert(Box<InsertStatement>),
    /// UPDATE.
    Update(Box<UpdateStatement>),
    /// DELETE.
    Delete(Box<DeleteStatement>),

    /// CREATE DATABASE.
    CreateDatabase(CreateDatabaseStatement),
    /// ALTER DATABASE.
    AlterDatabase(AlterDatabaseStatement),
    /// DROP DATABASE.
    DropDatabase(DropDatabaseStatement),
    /// CREATE TABLE.
    CreateTable(Box<CreateTableStatement>),
    /// ALTER TABLE.
    AlterTable(AlterTableStatement),
    /// DROP TABLE.
    DropTable(DropTableStatement),
    /// CREATE INDEX.
    CreateIndex(CreateIndexStatement),
    /// DROP INDEX.
    DropIndex(DropIndexStatement),
    /// CREATE VIEW.
    CreateView(Box<CreateViewStatement>),
    /// ALTER VIEW.
    AlterView(Box<AlterViewStatement>),
    /// DROP VIEW.
    DropView(DropViewStatement),
    /// TRUNCATE TABLE.
    Truncate(TruncateStatement),
    /// RENAME TABLE.
    RenameTable(RenameTableStatement),
    /// DROP PROCEDURE / FUNCTION.
    DropRoutine(DropRoutineStatement),

    /// CREATE USER.
    CreateUser(CreateUserStatement),
    /// ALTER USER.
    AlterUser(AlterUserStatement),
    /// DROP USER.
    DropUser(DropUserStatement),
    /// GRANT.
    Grant(GrantStatement),
    /// REVOKE.
    Revoke(RevokeStatement),

    /// START TRANSACTION / BEGIN.
    StartTransaction {
        /// Transaction characteristics.
        modes: Vec<TransactionMode>,
    },
    /// COMMIT.
    Commit,
    /// ROLLBACK [TO SAVEPOINT name].
    Rollback {
        /// Savepoint to roll back to.
        savepoint: Option<String>,
    },
    /// SAVEPOINT name.
    Savepoint(String),
    /// RELEASE SAVEPOINT name.
    ReleaseSavepoint(String),
    /// SET TRANSACTION.
    SetTransaction(SetTransactionStatement),

    /// USE db.
    Use(String),
    /// SHOW ...
    Show(ShowStatement),
    /// EXPLAIN statement.
    Explain {
        /// `FORMAT = ...`
        format: Option<ExplainFormat>,
        /// The explained statement.
        statement: Box<Statement>,
    },
    /// DESCRIBE tbl.
    Describe(DescribeStatement),
    /// SET variable assignments.
    Set(Vec<SetAssignment>),
    /// SET NAMES / SET CHARACTER SET.
    SetNames(SetNamesStatement),
    /// SET PASSWORD.
    SetPassword(SetPasswordStatement),
    /// LOCK TABLES.
    LockTables(LockTablesStatement),
    /// UNLOCK TABLES.
    UnlockTables,
    /// CALL.
    Call(CallStatement),
    /// PREPARE name FROM ...
    Prepare {
        /// Statement name.
        name: String,
        /// Statement text source.
        source: PrepareSource,
    },
    /// EXECUTE name [USING @a, ...].
    Execute {
        /// Statement name.
        name: String,
        /// User variables bound to the placeholders.
        using: Vec<String>,
    },
    /// DEALLOCATE PREPARE name.
    Deallocate(String),
}

impl Statement {
    /// Returns the statement's category.
    #[must_use]
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::Query(_) => StatementKind::Select,
            Self::Insert(insert) if insert.replace => StatementKind::Replace,
            Self::Insert(_) => StatementKind::Insert,
            Self::Update(_) => StatementKind::Update,
            Self::Delete(_) => StatementKind::Delete,
            Self::CreateDatabase(_) => StatementKind::CreateDatabase,
            Self::AlterDatabase(_) => StatementKind::AlterDatabase,
            Self::DropDatabase(_) => StatementKind::DropDatabase,
            Self::CreateTable(_) => StatementKind::CreateTable,
            Self::AlterTable(_) => StatementKind::AlterTable,
            Self::DropTable(_) => StatementKind::DropTable,
            Self::CreateIndex(_) => StatementKind::CreateIndex,
            Self::DropIndex(_) => StatementKind::DropIndex,
            Self::CreateView(_) => StatementKind::CreateView,
            Self::AlterView(_) => StatementKind::AlterView,
            Self::DropView(_) => StatementKind::DropView,
            Self::Truncate(_) => StatementKind::Truncate,
            Self::RenameTable(_) => StatementKind::RenameTable,
            Self::DropRoutine(_) => StatementKind::DropRoutine,
            Self::CreateUser(_) => StatementKind::CreateUser,
            Self::AlterUser(_) => StatementKind::AlterUser,
            Self::DropUser(_) => StatementKind::DropUser,
            Self::Grant(_) => StatementKind::Grant,
            Self::Revoke(_) => StatementKind::Revoke,
            Self::StartTransaction { .. } => StatementKind::StartTransaction,
            Self::Commit => StatementKind::Commit,
            Self::Rollback { .. } => StatementKind::Rollback,
            Self::Savepoint(_) => StatementKind::Savepoint,
            Self::ReleaseSavepoint(_) => StatementKind::ReleaseSavepoint,
            Self::SetTransaction(_) => StatementKind::SetTransaction,
            Self::Use(_) => StatementKind::Use,
            Self::Show(_) => StatementKind::Show,
            Self::Explain { .. } => StatementKind::Explain,
            Self::Describe(_) => StatementKind::Describe,
            Self::Set(_) => StatementKind::Set,
            Self::SetNames(_) => StatementKind::SetNames,
            Self::SetPassword(_) => StatementKind::SetPassword,
            Self::LockTables(_) => StatementKind::LockTables,
            Self::UnlockTables => StatementKind::UnlockTables,
            Self::Call(_) => StatementKind::Call,
            Self::Prepare { .. } => StatementKind::Prepare,
            Self::Execute { .. } => StatementKind::Execute,
            Self::Deallocate(_) => StatementKind::Deallocate,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => write!(f, "{query}"),
            Self::Insert(insert) => write!(f, "{insert}"),
            Self::Update(update) => write!(f, "{update}"),
            Self::Delete(delete) => write!(f, "{delete}"),
            Self::CreateDatabase(stmt) => write!(f, "{stmt}"),
            Self::AlterDatabase(stmt) => write!(f, "{stmt}"),
            Self::DropDatabase(stmt) => write!(f, "{stmt}"),
            Self::CreateTable(stmt) => write!(f, "{stmt}"),
            Self::AlterTable(stmt) => write!(f, "{stmt}"),
            Self::DropTable(stmt) => write!(f, "{stmt}"),
            Self::CreateIndex(stmt) => write!(f, "{stmt}"),
            Self::DropIndex(stmt) => write!(f, "{stmt}"),
            Self::CreateView(stmt) => write!(f, "{stmt}"),
            Self::AlterView(stmt) => write!(f, "{stmt}"),
            Self::DropView(stmt) => write!(f, "{stmt}"),
            Self::Truncate(stmt) => write!(f, "TRUNCATE TABLE {}", stmt.table),
            Self::RenameTable(stmt) => write!(f, "{stmt}"),
            Self::DropRoutine(stmt) => write!(f, "{stmt}"),
            Self::CreateUser(stmt) => write!(f, "{stmt}"),
            Self::AlterUser(stmt) => write!(f, "{stmt}"),
            Self::DropUser(stmt) => write!(f, "{stmt}"),
            Self::Grant(stmt) => write!(f, "{stmt}"),
            Self::Revoke(stmt) => write!(f, "{stmt}"),
            Self::StartTransaction { modes } => {
                f.write_str("START TRANSACTION")?;
                let modes: Vec<&str> = modes.iter().map(TransactionMode::as_str).collect();
                if !modes.is_empty() {
                    write!(f, " {}", modes.join(", "))?;
                }
                Ok(())
            }
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback { savepoint } => match savepoint {
                Some(name) => write!(f, "ROLLBACK TO SAVEPOINT {}", ident(name)),
                None => f.write_str("ROLLBACK"),
            },
            Self::Savepoint(name) => write!(f, "SAVEPOINT {}", ident(name)),
            Self::ReleaseSavepoint(name) => write!(f, "RELEASE SAVEPOINT {}", ident(name)),
            Self::SetTransaction(stmt) => write!(f, "{stmt}"),
            Self::Use(db) => write!(f, "USE {}", ident(db)),
            Self::Show(stmt) => write!(f, "{stmt}"),
            Self::Explain { format, statement } => {
                f.write_str("EXPLAIN ")?;
                if let Some(format) = format {
                    write!(f, "FORMAT = {} ", format.as_str())?;
                }
                write!(f, "{statement}")
            }
            Self::Describe(stmt) => write!(f, "{stmt}"),
            Self::Set(assignments) => write!(f, "SET {}", comma_separated(assignments)),
            Self::SetNames(stmt) => write!(f, "{stmt}"),
            Self::SetPassword(stmt) => write!(f, "{stmt}"),
            Self::LockTables(stmt) => write!(f, "LOCK TABLES {}", comma_separated(&stmt.locks)),
            Self::UnlockTables => f.write_str("UNLOCK TABLES"),
            Self::Call(call) => {
                write!(f, "CALL {}({})", call.name, comma_separated(&call.args))
            }
            Self::Prepare { name, source } => {
                write!(f, "PREPARE {} FROM ", ident(name))?;
                match source {
                    PrepareSource::String(text) => f.write_str(&quote_string(text)),
                    PrepareSource::Variable(var) => write!(f, "@{}", ident(var)),
                }
            }
            Self::Execute { name, using } => {
                write!(f, "EXECUTE {}", ident(name))?;
                if !using.is_empty() {
                    let vars: Vec<String> = using.iter().map(|v| format!("@{}", ident(v))).collect();
                    write!(f, " USING {}", vars.join(", "))?;
                }
                Ok(())
            }
            Self::Deallocate(name) => write!(f, "DEALLOCATE PREPARE {}", ident(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_categories() {
        assert!(StatementKind::Select.is_query());
        assert!(StatementKind::Show.is_query());
        assert!(!StatementKind::Insert.is_query());
        assert!(StatementKind::Replace.is_dml());
        assert!(StatementKind::Truncate.is_ddl());
        assert!(!StatementKind::Grant.is_ddl());
        assert!(StatementKind::AlterView.is_ddl());
        assert!(!StatementKind::AlterUser.is_ddl());
    }

    #[test]
    fn test_simple_statement_display() {
        assert_eq!(Statement::Commit.to_string(), "COMMIT");
        assert_eq!(
            Statement::Rollback {
                savepoint: Some(String::from("sp1"))
            }
            .to_string(),
            "ROLLBACK TO SAVEPOINT sp1"
        );
        assert_eq!(
            Statement::StartTransaction {
                modes: vec![TransactionMode::ReadOnly]
            }
            .to_string(),
            "START TRANSACTION READ ONLY"
        );
        assert_eq!(
            Statement::Execute {
                name: String::from("stmt"),
                using: vec![String::from("a"), String::from("b")],
            }
            .to_string(),
            "EXECUTE stmt USING @a, @b"
        );
    }

    #[test]
    fn test_kind_of_statement() {
        assert_eq!(Statement::Commit.kind(), StatementKind::Commit);
        assert_eq!(Statement::UnlockTables.kind(), StatementKind::UnlockTables);
        assert_eq!(
            Statement::Use(String::from("db")).kind(),
            StatementKind::Use
        );
    }
}
