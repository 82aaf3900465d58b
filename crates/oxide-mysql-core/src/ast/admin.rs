//! Account management, transaction control and utility statements.

use core::fmt;

use super::expression::{Expr, ObjectName, VariableScope};
use super::{comma_separated, ident};
use crate::dialect::quote_string;

/// An account name (`'user'@'host'`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UserName {
    /// User part.
    pub name: String,
    /// Host part; `None` means `'%'`.
    pub host: Option<String>,
}

impl UserName {
    /// Creates an account name without a host.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: None,
        }
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_string(&self.name))?;
        if let Some(host) = &self.host {
            write!(f, "@{}", quote_string(host))?;
        }
        Ok(())
    }
}

/// Authentication clause of `CREATE USER`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UserSpec {
    /// Account name.
    pub user: UserName,
    /// `IDENTIFIED WITH plugin`
    pub plugin: Option<String>,
    /// `IDENTIFIED [WITH plugin] BY 'password'`
    pub password: Option<String>,
}

impl fmt::Display for UserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user)?;
        if self.plugin.is_some() || self.password.is_some() {
            f.write_str(" IDENTIFIED")?;
        }
        if let Some(plugin) = &self.plugin {
            write!(f, " WITH {}", ident(plugin))?;
        }
        if let Some(password) = &self.password {
            write!(f, " BY {}", quote_string(password))?;
        }
        Ok(())
    }
}

/// `CREATE USER`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateUserStatement {
    /// `IF NOT EXISTS`
    pub if_not_exists: bool,
    /// Accounts to create.
    pub users: Vec<UserSpec>,
}

impl fmt::Display for CreateUserStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE USER ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", comma_separated(&self.users))
    }
}

/// `ALTER USER`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterUserStatement {
    /// `IF EXISTS`
    pub if_exists: bool,
    /// Accounts and their new authentication.
    pub users: Vec<UserSpec>,
}

impl fmt::Display for AlterUserStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ALTER USER ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", comma_separated(&self.users))
    }
}

/// `DROP USER`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropUserStatement {
    /// `IF EXISTS`
    pub if_exists: bool,
    /// Accounts to drop.
    pub users: Vec<UserName>,
}

impl fmt::Display for DropUserStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DROP USER ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", comma_separated(&self.users))
    }
}

/// A privilege in GRANT / REVOKE, e.g. `SELECT (col1, col2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Privilege {
    /// Privilege name in upper case; multi-word privileges are joined by a
    /// single space (`CREATE VIEW`). `ALL PRIVILEGES` is stored as `ALL`.
    pub name: String,
    /// Column list for column-level privileges.
    pub columns: Vec<String>,
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", super::ident_list(&self.columns))?;
        }
        Ok(())
    }
}

/// Object type qualifier of a privilege level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GrantObjectType {
    Table,
    Function,
    Procedure,
}

/// The `ON` part of GRANT / REVOKE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrivilegeLevel {
    /// `*`
    CurrentDatabase,
    /// `*.*`
    Global,
    /// `db.*`
    Database(String),
    /// `tbl` or `db.tbl`
    Object(ObjectName),
}

impl fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentDatabase => f.write_str("*"),
            Self::Global => f.write_str("*.*"),
            Self::Database(db) => write!(f, "{}.*", ident(db)),
            Self::Object(name) => write!(f, "{name}"),
        }
    }
}

/// Target of GRANT / REVOKE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GrantTarget {
    /// `TABLE`, `FUNCTION` or `PROCEDURE`.
    pub object_type: Option<GrantObjectType>,
    /// Privilege level.
    pub level: PrivilegeLevel,
}

impl fmt::Display for GrantTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.object_type {
            Some(GrantObjectType::Table) => f.write_str("TABLE ")?,
            Some(GrantObjectType::Function) => f.write_str("FUNCTION ")?,
            Some(GrantObjectType::Procedure) => f.write_str("PROCEDURE ")?,
            None => {}
        }
        write!(f, "{}", self.level)
    }
}

/// `GRANT privileges ON target TO users [WITH GRANT OPTION]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GrantStatement {
    /// Granted privileges.
    pub privileges: Vec<Privilege>,
    /// Privilege target.
    pub target: GrantTarget,
    /// Grantees.
    pub users: Vec<UserName>,
    /// `WITH GRANT OPTION`
    pub with_grant_option: bool,
}

impl fmt::Display for GrantStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GRANT {} ON {} TO {}",
            comma_separated(&self.privileges),
            self.target,
            comma_separated(&self.users)
        )?;
        if self.with_grant_option {
            f.write_str(" WITH GRANT OPTION")?;
        }
        Ok(())
    }
}

/// `REVOKE privileges ON target FROM users`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RevokeStatement {
    /// Revoked privileges.
    pub privileges: Vec<Privilege>,
    /// Privilege target.
    pub target: GrantTarget,
    /// Accounts.
    pub users: Vec<UserName>,
}

impl fmt::Display for RevokeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "REVOKE {} ON {} FROM {}",
            comma_separated(&self.privileges),
            self.target,
            comma_separated(&self.users)
        )
    }
}

/// Characteristics of `START TRANSACTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TransactionMode {
    WithConsistentSnapshot,
    ReadOnly,
    ReadWrite,
}

impl TransactionMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WithConsistentSnapshot => "WITH CONSISTENT SNAPSHOT",
            Self::ReadOnly => "READ ONLY",
            Self::ReadWrite => "READ WRITE",
        }
    }
}

/// Transaction isolation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IsolationLevel {
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

impl IsolationLevel {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReadUncommitted => "READ UNCOMMITTED",
            Self::ReadCommitted => "READ COMMITTED",
            Self::RepeatableRead => "REPEATABLE READ",
            Self::Serializable => "SERIALIZABLE",
        }
    }
}

/// `SET [GLOBAL | SESSION] TRANSACTION ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetTransactionStatement {
    /// Scope.
    pub scope: Option<VariableScope>,
    /// `ISOLATION LEVEL ...`
    pub isolation_level: Option<IsolationLevel>,
    /// `READ ONLY` / `READ WRITE` (only those two modes are valid here).
    pub access_mode: Option<TransactionMode>,
}

impl fmt::Display for SetTransactionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SET ")?;
        if let Some(scope) = self.scope {
            write!(f, "{} ", scope.as_str())?;
        }
        f.write_str("TRANSACTION")?;
        let mut parts: Vec<String> = Vec::new();
        if let Some(level) = self.isolation_level {
            parts.push(format!("ISOLATION LEVEL {}", level.as_str()));
        }
        if let Some(mode) = self.access_mode {
            parts.push(String::from(mode.as_str()));
        }
        write!(f, " {}", parts.join(", "))
    }
}

/// Filter of SHOW statements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ShowFilter {
    /// `LIKE 'pattern'`
    Like(String),
    /// `WHERE expr`
    Where(Expr),
}

impl fmt::Display for ShowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like(pattern) => write!(f, "LIKE {}", quote_string(pattern)),
            Self::Where(expr) => write!(f, "WHERE {expr}"),
        }
    }
}

/// The SHOW statements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ShowStatement {
    /// `SHOW DATABASES`
    Databases {
        /// Filter.
        filter: Option<ShowFilter>,
    },
    /// `SHOW [FULL] TABLES [FROM db]`
    Tables {
        /// `FULL`
        full: bool,
        /// Database.
        database: Option<String>,
        /// Filter.
        filter: Option<ShowFilter>,
    },
    /// `SHOW [FULL] COLUMNS FROM tbl [FROM db]`
    Columns {
        /// `FULL`
        full: bool,
        /// Table (a trailing `FROM db` becomes the schema).
        table: ObjectName,
        /// Filter.
        filter: Option<ShowFilter>,
    },
    /// `SHOW INDEX FROM tbl`
    Index {
        /// Table.
        table: ObjectName,
    },
    /// `SHOW CREATE TABLE tbl`
    CreateTable(ObjectName),
    /// `SHOW CREATE VIEW v`
    CreateView(ObjectName),
    /// `SHOW CREATE DATABASE db`
    CreateDatabase(String),
    /// `SHOW [scope] VARIABLES`
    Variables {
        /// Scope.
        scope: Option<VariableScope>,
        /// Filter.
        filter: Option<ShowFilter>,
    },
    /// `SHOW [scope] STATUS`
    Status {
        /// Scope.
        scope: Option<VariableScope>,
        /// Filter.
        filter: Option<ShowFilter>,
    },
    /// `SHOW [FULL] PROCESSLIST`
    Processlist {
        /// `FULL`
        full: bool,
    },
    /// `SHOW WARNINGS`
    Warnings,
    /// `SHOW ERRORS`
    Errors,
    /// `SHOW GRANTS [FOR user]`
    Grants {
        /// Account.
        user: Option<UserName>,
    },
    /// `SHOW COLLATION`
    Collation {
        /// Filter.
        filter: Option<ShowFilter>,
    },
    /// `SHOW CHARACTER SET`
    CharacterSet {
        /// Filter.
        filter: Option<ShowFilter>,
    },
}

fn write_filter(f: &mut fmt::Formatter<'_>, filter: Option<&ShowFilter>) -> fmt::Result {
    match filter {
        Some(filter) => write!(f, " {filter}"),
        None => Ok(()),
    }
}

fn write_scope(f: &mut fmt::Formatter<'_>, scope: Option<VariableScope>) -> fmt::Result {
    match scope {
        Some(scope) => write!(f, "{} ", scope.as_str()),
        None => Ok(()),
    }
}

impl fmt::Display for ShowStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SHOW ")?;
        match self {
            Self::Databases { filter } => {
                f.write_str("DATABASES")?;
                write_filter(f, filter.as_ref())
            }
            Self::Tables {
                full,
                database,
                filter,
            } => {
                if *full {
                    f.write_str("FULL ")?;
                }
                f.write_str("TABLES")?;
                if let Some(database) = database {
                    write!(f, " FROM {}", ident(database))?;
                }
                write_filter(f, filter.as_ref())
            }
            Self::Columns {
                full,
                table,
                filter,
            } => {
                if *full {
                    f.write_str("FULL ")?;
                }
                write!(f, "COLUMNS FROM {table}")?;
                write_filter(f, filter.as_ref())
            }
            Self::Index { table } => write!(f, "INDEX FROM {table}"),
            Self::CreateTable(name) => write!(f, "CREATE TABLE {name}"),
            Self::CreateView(name) => write!(f, "CREATE VIEW {name}"),
            Self::CreateDatabase(name) => write!(f, "CREATE DATABASE {}", ident(name)),
            Self::Variables { scope, filter } => {
                write_scope(f, *scope)?;
                f.write_str("VARIABLES")?;
                write_filter(f, filter.as_ref())
            }
            Self::Status { scope, filter } => {
                write_scope(f, *scope)?;
                f.write_str("STATUS")?;
                write_filter(f, filter.as_ref())
            }
            Self::Processlist { full } => {
                if *full {
                    f.write_str("FULL ")?;
                }
                f.write_str("PROCESSLIST")
            }
            Self::Warnings => f.write_str("WARNINGS"),
            Self::Errors => f.write_str("ERRORS"),
            Self::Grants { user } => {
                f.write_str("GRANTS")?;
                if let Some(user) = user {
                    write!(f, " FOR {user}")?;
                }
                Ok(())
            }
            Self::Collation { filter } => {
                f.write_str("COLLATION")?;
                write_filter(f, filter.as_ref())
            }
            Self::CharacterSet { filter } => {
                f.write_str("CHARACTER SET")?;
                write_filter(f, filter.as_ref())
            }
        }
    }
}

/// `EXPLAIN` output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExplainFormat {
    Traditional,
    Json,
    Tree,
}

impl ExplainFormat {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Traditional => "TRADITIONAL",
            Self::Json => "JSON",
            Self::Tree => "TREE",
        }
    }
}

/// Target of a SET assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetTarget {
    /// `@name`
    UserVariable(String),
    /// `[GLOBAL | SESSION | ...] name` or `@@[scope.]name`
    SystemVariable {
        /// Scope.
        scope: Option<VariableScope>,
        /// Variable name.
        name: String,
    },
}

impl fmt::Display for SetTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserVariable(name) => write!(f, "@{}", ident(name)),
            Self::SystemVariable {
                scope: Some(scope),
                name,
            } => write!(f, "@@{}.{name}", scope.as_str()),
            Self::SystemVariable { scope: None, name } => write!(f, "@@{name}"),
        }
    }
}

/// One assignment of a SET statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetAssignment {
    /// Assigned variable.
    pub target: SetTarget,
    /// Value.
    pub value: SetValue,
}

/// Right-hand side of a SET assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetValue {
    Expr(Expr),
    /// `ON`, `ALL` or `BINARY`, which are reserved words but valid
    /// system variable values.
    Keyword(String),
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expr(expr) => write!(f, "{expr}"),
            Self::Keyword(word) => f.write_str(word),
        }
    }
}

/// `SET PASSWORD [FOR user] = 'auth' [REPLACE 'current'] [RETAIN CURRENT PASSWORD]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetPasswordStatement {
    /// Target account; `None` means the current user.
    pub user: Option<UserName>,
    /// New password.
    pub password: Expr,
    /// Current password required by `REPLACE`.
    pub replace: Option<String>,
    /// `RETAIN CURRENT PASSWORD`
    pub retain_current: bool,
}

impl fmt::Display for SetPasswordStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SET PASSWORD")?;
        if let Some(user) = &self.user {
            write!(f, " FOR {user}")?;
        }
        write!(f, " = {}", self.password)?;
        if let Some(current) = &self.replace {
            write!(f, " REPLACE {}", quote_string(current))?;
        }
        if self.retain_current {
            f.write_str(" RETAIN CURRENT PASSWORD")?;
        }
        Ok(())
    }
}

impl fmt::Display for SetAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

/// `SET NAMES charset [COLLATE collation]` / `SET CHARACTER SET charset`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetNamesStatement {
    /// `CHARACTER SET` form rather than `NAMES`.
    pub character_set_form: bool,
    /// Character set; `None` means `DEFAULT`.
    pub charset: Option<String>,
    /// Collation (`NAMES` form only).
    pub collate: Option<String>,
}

impl fmt::Display for SetNamesStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.character_set_form {
            "SET CHARACTER SET "
        } else {
            "SET NAMES "
        })?;
        match &self.charset {
            Some(charset) => write!(f, "{}", ident(charset))?,
            None => f.write_str("DEFAULT")?,
        }
        if let Some(collate) = &self.collate {
            write!(f, " COLLATE {}", ident(collate))?;
        }
        Ok(())
    }
}

/// Lock type of `LOCK TABLES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableLockType {
    Read,
    ReadLocal,
    Write,
    LowPriorityWrite,
}

impl TableLockType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::ReadLocal => "READ LOCAL",
            Self::Write => "WRITE",
            Self::LowPriorityWrite => "LOW_PRIORITY WRITE",
        }
    }
}

/// One entry of `LOCK TABLES`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableLock {
    /// Locked table.
    pub table: ObjectName,
    /// Alias.
    pub alias: Option<String>,
    /// Lock type.
    pub lock_type: TableLockType,
}

impl fmt::Display for TableLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", ident(alias))?;
        }
        write!(f, " {}", self.lock_type.as_str())
    }
}

/// Source of `PREPARE name FROM ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PrepareSource {
    /// A string literal.
    String(String),
    /// A user variable holding the statement text.
    Variable(String),
}

/// `DESCRIBE tbl [col]` (also `DESC`, `EXPLAIN tbl`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DescribeStatement {
    /// Table.
    pub table: ObjectName,
    /// Column name or pattern.
    pub column: Option<String>,
}

impl fmt::Display for DescribeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DESCRIBE {}", self.table)?;
        if let Some(column) = &self.column {
            write!(f, " {}", ident(column))?;
        }
        Ok(())
    }
}

/// `LOCK TABLES` / `LOCK TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LockTablesStatement {
    /// Locks, in order.
    pub locks: Vec<TableLock>,
}

/// `CALL proc([args])`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallStatement {
    /// Procedure name.
    pub name: ObjectName,
    /// Arguments.
    pub args: Vec<Expr>,
}

/// `TRUNCATE [TABLE] tbl`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TruncateStatement {
    /// Table.
    pub table: ObjectName,
}
