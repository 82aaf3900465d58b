//! Data definition statements.

use core::fmt;

use super::admin::UserName;
use super::expression::{Expr, ObjectName};
use super::query::{OrderDirection, Query};
use super::types::DataType;
use super::{comma_separated, ident, ident_list};
use crate::dialect::quote_string;

/// Value of a table or database option.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OptionValue {
    /// A bare word (`InnoDB`, `DYNAMIC`).
    Ident(String),
    /// A quoted string.
    String(String),
    /// A number, as written.
    Number(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Option words such as DEFAULT or FIXED are written bare.
            Self::Ident(word)
                if !word.is_empty()
                    && word
                        .chars()
                        .all(|c| c.is_alphanumeric() || c == '_' || c == '$') =>
            {
                f.write_str(word)
            }
            Self::Ident(word) => f.write_str(&crate::dialect::quote_identifier(word)),
            Self::String(s) => f.write_str(&quote_string(s)),
            Self::Number(n) => f.write_str(n),
        }
    }
}

/// A table or database option (`ENGINE=InnoDB`, `CHARACTER SET=utf8mb4`).
///
/// `name` is upper case; `CHARSET` and `DEFAULT CHARSET` are stored as
/// `CHARACTER SET`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableOption {
    /// Option name.
    pub name: String,
    /// Option value.
    pub value: OptionValue,
}

impl TableOption {
    /// Creates an option.
    #[must_use]
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for TableOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Referential action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ReferentialAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// `REFERENCES tbl (cols) [ON DELETE ...] [ON UPDATE ...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ForeignKeyReference {
    /// Referenced table.
    pub table: ObjectName,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
}

impl fmt::Display for ForeignKeyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", ident_list(&self.columns))?;
        }
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {}", action.as_str())?;
        }
        if let Some(action) = self.on_update {
            write!(f, " ON UPDATE {}", action.as_str())?;
        }
        Ok(())
    }
}

/// A column attribute in a column definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnOption {
    /// `NULL`
    Null,
    /// `NOT NULL`
    NotNull,
    /// `DEFAULT expr`
    Default(Expr),
    /// `ON UPDATE expr`
    OnUpdate(Expr),
    /// `AUTO_INCREMENT`
    AutoIncrement,
    /// `[PRIMARY] KEY`
    PrimaryKey,
    /// `UNIQUE [KEY]`
    Unique,
    /// `COMMENT 'text'`
    Comment(String),
    /// `CHARACTER SET name`
    CharacterSet(String),
    /// `COLLATE name`
    Collate(String),
    /// `[GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]`
    Generated {
        /// Generation expression.
        expr: Expr,
        /// `STORED` rather than `VIRTUAL`.
        stored: bool,
    },
    /// `[CONSTRAINT name] CHECK (expr)`
    Check {
        /// Constraint name.
        name: Option<String>,
        /// Check expression.
        expr: Expr,
    },
    /// Inline `REFERENCES ...`.
    References(ForeignKeyReference),
    /// `VISIBLE`
    Visible,
    /// `INVISIBLE`
    Invisible,
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Default(expr) => write!(f, "DEFAULT {expr}"),
            Self::OnUpdate(expr) => write!(f, "ON UPDATE {expr}"),
            Self::AutoIncrement => f.write_str("AUTO_INCREMENT"),
            Self::PrimaryKey => f.write_str("PRIMARY KEY"),
            Self::Unique => f.write_str("UNIQUE"),
            Self::Comment(text) => write!(f, "COMMENT {}", quote_string(text)),
            Self::CharacterSet(name) => write!(f, "CHARACTER SET {}", ident(name)),
            Self::Collate(name) => write!(f, "COLLATE {}", ident(name)),
            Self::Generated { expr, stored } => {
                write!(
                    f,
                    "GENERATED ALWAYS AS ({expr}) {}",
                    if *stored { "STORED" } else { "VIRTUAL" }
                )
            }
            Self::Check { name, expr } => {
                if let Some(name) = name {
                    write!(f, "CONSTRAINT {} ", ident(name))?;
                }
                write!(f, "CHECK ({expr})")
            }
            Self::References(reference) => write!(f, "{reference}"),
            Self::Visible => f.write_str("VISIBLE"),
            Self::Invisible => f.write_str("INVISIBLE"),
        }
    }
}

/// A column definition for CREATE TABLE and ALTER TABLE.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Column attributes, in source order.
    pub options: Vec<ColumnOption>,
}

impl ColumnDef {
    /// Creates a new column definition without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            options: vec![],
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn option(mut self, option: ColumnOption) -> Self {
        self.options.push(option);
        self
    }

    /// Returns false if the column is declared `NOT NULL` or `PRIMARY KEY`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        !self
            .options
            .iter()
            .any(|o| matches!(o, ColumnOption::NotNull | ColumnOption::PrimaryKey))
    }

    /// Returns true if the column is declared `PRIMARY KEY`.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.options.contains(&ColumnOption::PrimaryKey)
    }

    /// Returns the `DEFAULT` expression, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&Expr> {
        self.options.iter().find_map(|o| match o {
            ColumnOption::Default(expr) => Some(expr),
            _ => None,
        })
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", ident(&self.name), self.data_type)?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// One part of an index key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KeyPart {
    /// `col[(length)] [ASC | DESC]`
    Column {
        /// Column name.
        name: String,
        /// Prefix length.
        length: Option<u32>,
        /// Direction.
        direction: Option<OrderDirection>,
    },
    /// Functional key part `(expr) [ASC | DESC]`.
    Expr {
        /// Indexed expression.
        expr: Expr,
        /// Direction.
        direction: Option<OrderDirection>,
    },
}

impl KeyPart {
    /// Creates a plain column key part.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            name: name.into(),
            length: None,
            direction: None,
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self {
            Self::Column {
                name,
                length,
                direction,
            } => {
                write!(f, "{}", ident(name))?;
                if let Some(length) = length {
                    write!(f, "({length})")?;
                }
                direction
            }
            Self::Expr { expr, direction } => {
                write!(f, "({expr})")?;
                direction
            }
        };
        if let Some(direction) = direction {
            write!(f, " {}", direction.as_str())?;
        }
        Ok(())
    }
}

/// Kind of secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexKind {
    /// Plain `INDEX` / `KEY`.
    Plain,
    /// `UNIQUE`
    Unique,
    /// `FULLTEXT`
    Fulltext,
    /// `SPATIAL`
    Spatial,
}

impl IndexKind {
    /// Returns the keyword placed before `INDEX`, if any.
    #[must_use]
    pub const fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Unique => Some("UNIQUE"),
            Self::Fulltext => Some("FULLTEXT"),
            Self::Spatial => Some("SPATIAL"),
        }
    }
}

/// Index storage type (`USING BTREE | HASH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IndexType {
    Btree,
    Hash,
}

impl IndexType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
        }
    }
}

/// A table-level constraint or index definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TableConstraint {
    /// `[CONSTRAINT name] PRIMARY KEY [USING type] (key_parts)`
    PrimaryKey {
        /// Constraint name.
        name: Option<String>,
        /// Index type.
        using: Option<IndexType>,
        /// Key parts.
        columns: Vec<KeyPart>,
    },
    /// `{INDEX | KEY | UNIQUE | FULLTEXT | SPATIAL} [name] [USING type] (key_parts)`
    Index {
        /// Index kind.
        kind: IndexKind,
        /// Index name.
        name: Option<String>,
        /// Index type.
        using: Option<IndexType>,
        /// Key parts.
        columns: Vec<KeyPart>,
    },
    /// `[CONSTRAINT name] FOREIGN KEY (cols) REFERENCES ...`
    ForeignKey {
        /// Constraint name.
        name: Option<String>,
        /// Referencing columns.
        columns: Vec<String>,
        /// Referenced table and actions.
        reference: ForeignKeyReference,
    },
    /// `[CONSTRAINT name] CHECK (expr)`
    Check {
        /// Constraint name.
        name: Option<String>,
        /// Check expression.
        expr: Expr,
    },
}

fn write_index_tail(
    f: &mut fmt::Formatter<'_>,
    name: Option<&String>,
    using: Option<IndexType>,
    columns: &[KeyPart],
) -> fmt::Result {
    if let Some(name) = name {
        write!(f, " {}", ident(name))?;
    }
    if let Some(using) = using {
        write!(f, " USING {}", using.as_str())?;
    }
    write!(f, " ({})", comma_separated(columns))
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey {
                name,
                using,
                columns,
            } => {
                if let Some(name) = name {
                    write!(f, "CONSTRAINT {} ", ident(name))?;
                }
                f.write_str("PRIMARY KEY")?;
                write_index_tail(f, None, *using, columns)
            }
            Self::Index {
                kind,
                name,
                using,
                columns,
            } => {
                if let Some(prefix) = kind.prefix() {
                    write!(f, "{prefix} ")?;
                }
                f.write_str("INDEX")?;
                write_index_tail(f, name.as_ref(), *using, columns)
            }
            Self::ForeignKey {
                name,
                columns,
                reference,
            } => {
                if let Some(name) = name {
                    write!(f, "CONSTRAINT {} ", ident(name))?;
                }
                write!(f, "FOREIGN KEY ({}) {reference}", ident_list(columns))
            }
            Self::Check { name, expr } => {
                if let Some(name) = name {
                    write!(f, "CONSTRAINT {} ", ident(name))?;
                }
                write!(f, "CHECK ({expr})")
            }
        }
    }
}

/// `CREATE {DATABASE | SCHEMA}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateDatabaseStatement {
    /// `IF NOT EXISTS`
    pub if_not_exists: bool,
    /// Database name.
    pub name: String,
    /// Character set, collation and encryption options.
    pub options: Vec<TableOption>,
}

impl fmt::Display for CreateDatabaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE DATABASE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", ident(&self.name))?;
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// `ALTER {DATABASE | SCHEMA}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterDatabaseStatement {
    /// Database name; `None` alters the default database.
    pub name: Option<String>,
    /// New options.
    pub options: Vec<TableOption>,
}

impl fmt::Display for AlterDatabaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ALTER DATABASE")?;
        if let Some(name) = &self.name {
            write!(f, " {}", ident(name))?;
        }
        for option in &self.options {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

/// `DROP {DATABASE | SCHEMA}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropDatabaseStatement {
    /// `IF EXISTS`
    pub if_exists: bool,
    /// Database name.
    pub name: String,
}

impl fmt::Display for DropDatabaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DROP DATABASE ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", ident(&self.name))
    }
}

/// `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateTableStatement {
    /// `TEMPORARY`
    pub temporary: bool,
    /// `IF NOT EXISTS`
    pub if_not_exists: bool,
    /// Table name.
    pub name: ObjectName,
    /// Column definitions.
    pub columns: Vec<ColumnDef>,
    /// Table constraints and indexes.
    pub constraints: Vec<TableConstraint>,
    /// Table options.
    pub options: Vec<TableOption>,
    /// `LIKE other_table`
    pub like: Option<ObjectName>,
    /// `[AS] SELECT ...`
    pub query: Option<Box<Query>>,
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(like) = &self.like {
            return write!(f, " LIKE {like}");
        }
        if !self.columns.is_empty() || !self.constraints.is_empty() {
            f.write_str(" (")?;
            let elements = self
                .columns
                .iter()
                .map(ToString::to_string)
                .chain(self.constraints.iter().map(ToString::to_string))
                .collect::<Vec<_>>();
            f.write_str(&elements.join(", "))?;
            f.write_str(")")?;
        }
        for option in &self.options {
            write!(f, " {option}")?;
        }
        if let Some(query) = &self.query {
            write!(f, " AS {query}")?;
        }
        Ok(())
    }
}

/// Position of an added or modified column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnPosition {
    /// `FIRST`
    First,
    /// `AFTER col`
    After(String),
}

impl fmt::Display for ColumnPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("FIRST"),
            Self::After(column) => write!(f, "AFTER {}", ident(column)),
        }
    }
}

/// A single `ALTER TABLE` operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AlterTableOperation {
    /// `ADD [COLUMN] col_def [FIRST | AFTER col]`
    AddColumn {
        /// New column.
        column: ColumnDef,
        /// Placement.
        position: Option<ColumnPosition>,
    },
    /// `ADD constraint`
    AddConstraint(TableConstraint),
    /// `DROP [COLUMN] col`
    DropColumn(String),
    /// `DROP {INDEX | KEY} name`
    DropIndex(String),
    /// `DROP PRIMARY KEY`
    DropPrimaryKey,
    /// `DROP FOREIGN KEY name`
    DropForeignKey(String),
    /// `DROP {CHECK | CONSTRAINT} name`
    DropConstraint(String),
    /// `MODIFY [COLUMN] col_def [FIRST | AFTER col]`
    ModifyColumn {
        /// New definition.
        column: ColumnDef,
        /// Placement.
        position: Option<ColumnPosition>,
    },
    /// `CHANGE [COLUMN] old col_def [FIRST | AFTER col]`
    ChangeColumn {
        /// Current column name.
        old_name: String,
        /// New definition.
        column: ColumnDef,
        /// Placement.
        position: Option<ColumnPosition>,
    },
    /// `RENAME COLUMN old TO new`
    RenameColumn {
        /// Current name.
        old_name: String,
        /// New name.
        new_name: String,
    },
    /// `RENAME {INDEX | KEY} old TO new`
    RenameIndex {
        /// Current name.
        old_name: String,
        /// New name.
        new_name: String,
    },
    /// `RENAME [TO | AS] new_table`
    RenameTable(ObjectName),
    /// `ALTER [COLUMN] col SET DEFAULT expr`
    SetDefault {
        /// Column name.
        column: String,
        /// New default.
        value: Expr,
    },
    /// `ALTER [COLUMN] col DROP DEFAULT`
    DropDefault(String),
    /// `CONVERT TO CHARACTER SET name [COLLATE name]`
    ConvertToCharset {
        /// Character set.
        charset: String,
        /// Collation.
        collate: Option<String>,
    },
    /// A table option (`ENGINE=InnoDB`).
    Option(TableOption),
    /// `ALGORITHM [=] {DEFAULT | INSTANT | INPLACE | COPY}`
    Algorithm(String),
    /// `LOCK [=] {DEFAULT | NONE | SHARED | EXCLUSIVE}`
    Lock(String),
}

fn write_position(f: &mut fmt::Formatter<'_>, position: Option<&ColumnPosition>) -> fmt::Result {
    match position {
        Some(position) => write!(f, " {position}"),
        None => Ok(()),
    }
}

impl fmt::Display for AlterTableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn { column, position } => {
                write!(f, "ADD COLUMN {column}")?;
                write_position(f, position.as_ref())
            }
            Self::AddConstraint(constraint) => write!(f, "ADD {constraint}"),
            Self::DropColumn(name) => write!(f, "DROP COLUMN {}", ident(name)),
            Self::DropIndex(name) => write!(f, "DROP INDEX {}", ident(name)),
            Self::DropPrimaryKey => f.write_str("DROP PRIMARY KEY"),
            Self::DropForeignKey(name) => write!(f, "DROP FOREIGN KEY {}", ident(name)),
            Self::DropConstraint(name) => write!(f, "DROP CONSTRAINT {}", ident(name)),
            Self::ModifyColumn { column, position } => {
                write!(f, "MODIFY COLUMN {column}")?;
                write_position(f, position.as_ref())
            }
            Self::ChangeColumn {
                old_name,
                column,
                position,
            } => {
                write!(f, "CHANGE COLUMN {} {column}", ident(old_name))?;
                write_position(f, position.as_ref())
            }
            Self::RenameColumn { old_name, new_name } => {
                write!(f, "RENAME COLUMN {} TO {}", ident(old_name), ident(new_name))
            }
            Self::RenameIndex { old_name, new_name } => {
                write!(f, "RENAME INDEX {} TO {}", ident(old_name), ident(new_name))
            }
            Self::RenameTable(name) => write!(f, "RENAME TO {name}"),
            Self::SetDefault { column, value } => {
                write!(f, "ALTER COLUMN {} SET DEFAULT {value}", ident(column))
            }
            Self::DropDefault(column) => write!(f, "ALTER COLUMN {} DROP DEFAULT", ident(column)),
            Self::ConvertToCharset { charset, collate } => {
                write!(f, "CONVERT TO CHARACTER SET {}", ident(charset))?;
                if let Some(collate) = collate {
                    write!(f, " COLLATE {}", ident(collate))?;
                }
                Ok(())
            }
            Self::Option(option) => write!(f, "{option}"),
            Self::Algorithm(algorithm) => write!(f, "ALGORITHM={algorithm}"),
            Self::Lock(lock) => write!(f, "LOCK={lock}"),
        }
    }
}

/// `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterTableStatement {
    /// Table name.
    pub name: ObjectName,
    /// Operations, in order.
    pub operations: Vec<AlterTableOperation>,
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ALTER TABLE {} {}",
            self.name,
            comma_separated(&self.operations)
        )
    }
}

/// `RESTRICT` / `CASCADE` on DROP statements (parsed, ignored by MySQL).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DropBehavior {
    Restrict,
    Cascade,
}

impl DropBehavior {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
        }
    }
}

/// `DROP [TEMPORARY] TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropTableStatement {
    /// `TEMPORARY`
    pub temporary: bool,
    /// `IF EXISTS`
    pub if_exists: bool,
    /// Tables to drop.
    pub names: Vec<ObjectName>,
    /// `RESTRICT` / `CASCADE`
    pub behavior: Option<DropBehavior>,
}

impl fmt::Display for DropTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DROP ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", comma_separated(&self.names))?;
        if let Some(behavior) = self.behavior {
            write!(f, " {}", behavior.as_str())?;
        }
        Ok(())
    }
}

/// `CREATE [UNIQUE | FULLTEXT | SPATIAL] INDEX`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateIndexStatement {
    /// Index kind.
    pub kind: IndexKind,
    /// Index name.
    pub name: String,
    /// Index type.
    pub using: Option<IndexType>,
    /// Indexed table.
    pub table: ObjectName,
    /// Key parts.
    pub columns: Vec<KeyPart>,
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if let Some(prefix) = self.kind.prefix() {
            write!(f, "{prefix} ")?;
        }
        write!(f, "INDEX {}", ident(&self.name))?;
        if let Some(using) = self.using {
            write!(f, " USING {}", using.as_str())?;
        }
        write!(f, " ON {} ({})", self.table, comma_separated(&self.columns))
    }
}

/// `DROP INDEX name ON tbl`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropIndexStatement {
    /// Index name.
    pub name: String,
    /// Table name.
    pub table: ObjectName,
}

impl fmt::Display for DropIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP INDEX {} ON {}", ident(&self.name), self.table)
    }
}

/// View algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ViewAlgorithm {
    Undefined,
    Merge,
    Temptable,
}

impl ViewAlgorithm {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "UNDEFINED",
            Self::Merge => "MERGE",
            Self::Temptable => "TEMPTABLE",
        }
    }
}

/// `WITH [CASCADED | LOCAL] CHECK OPTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ViewCheckOption {
    Cascaded,
    Local,
}

/// `DEFINER = ...` of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ViewDefiner {
    /// `DEFINER = 'user'@'host'`
    User(UserName),
    /// `DEFINER = CURRENT_USER`
    CurrentUser,
}

impl fmt::Display for ViewDefiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(user) => write!(f, "{user}"),
            Self::CurrentUser => f.write_str("CURRENT_USER"),
        }
    }
}

/// `SQL SECURITY {DEFINER | INVOKER}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ViewSecurity {
    Definer,
    Invoker,
}

impl ViewSecurity {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Definer => "DEFINER",
            Self::Invoker => "INVOKER",
        }
    }
}

/// Writes `[ALGORITHM = x] [DEFINER = u] [SQL SECURITY s] VIEW `.
fn write_view_head(
    f: &mut fmt::Formatter<'_>,
    algorithm: Option<ViewAlgorithm>,
    definer: Option<&ViewDefiner>,
    security: Option<ViewSecurity>,
) -> fmt::Result {
    if let Some(algorithm) = algorithm {
        write!(f, "ALGORITHM = {} ", algorithm.as_str())?;
    }
    if let Some(definer) = definer {
        write!(f, "DEFINER = {definer} ")?;
    }
    if let Some(security) = security {
        write!(f, "SQL SECURITY {} ", security.as_str())?;
    }
    f.write_str("VIEW ")
}

/// Writes `name [(cols)] AS query [WITH ... CHECK OPTION]`.
fn write_view_body(
    f: &mut fmt::Formatter<'_>,
    name: &ObjectName,
    columns: &[String],
    query: &Query,
    check_option: Option<ViewCheckOption>,
) -> fmt::Result {
    write!(f, "{name}")?;
    if !columns.is_empty() {
        write!(f, " ({})", ident_list(columns))?;
    }
    write!(f, " AS {query}")?;
    match check_option {
        Some(ViewCheckOption::Cascaded) => f.write_str(" WITH CASCADED CHECK OPTION"),
        Some(ViewCheckOption::Local) => f.write_str(" WITH LOCAL CHECK OPTION"),
        None => Ok(()),
    }
}

/// `CREATE [OR REPLACE] VIEW`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CreateViewStatement {
    /// `OR REPLACE`
    pub or_replace: bool,
    /// `ALGORITHM = ...`
    pub algorithm: Option<ViewAlgorithm>,
    /// `DEFINER = ...`
    pub definer: Option<ViewDefiner>,
    /// `SQL SECURITY ...`
    pub security: Option<ViewSecurity>,
    /// View name.
    pub name: ObjectName,
    /// Column names.
    pub columns: Vec<String>,
    /// View body.
    pub query: Box<Query>,
    /// Check option.
    pub check_option: Option<ViewCheckOption>,
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        write_view_head(f, self.algorithm, self.definer.as_ref(), self.security)?;
        write_view_body(f, &self.name, &self.columns, &self.query, self.check_option)
    }
}

/// `ALTER VIEW`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AlterViewStatement {
    /// `ALGORITHM = ...`
    pub algorithm: Option<ViewAlgorithm>,
    /// `DEFINER = ...`
    pub definer: Option<ViewDefiner>,
    /// `SQL SECURITY ...`
    pub security: Option<ViewSecurity>,
    /// View name.
    pub name: ObjectName,
    /// Column names.
    pub columns: Vec<String>,
    /// New view body.
    pub query: Box<Query>,
    /// Check option.
    pub check_option: Option<ViewCheckOption>,
}

impl fmt::Display for AlterViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ALTER ")?;
        write_view_head(f, self.algorithm, self.definer.as_ref(), self.security)?;
        write_view_body(f, &self.name, &self.columns, &self.query, self.check_option)
    }
}

/// `DROP VIEW`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropViewStatement {
    /// `IF EXISTS`
    pub if_exists: bool,
    /// Views to drop.
    pub names: Vec<ObjectName>,
    /// `RESTRICT` / `CASCADE`
    pub behavior: Option<DropBehavior>,
}

impl fmt::Display for DropViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DROP VIEW ")?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", comma_separated(&self.names))?;
        if let Some(behavior) = self.behavior {
            write!(f, " {}", behavior.as_str())?;
        }
        Ok(())
    }
}

/// `RENAME TABLE a TO b, c TO d`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenameTableStatement {
    /// `(from, to)` pairs.
    pub renames: Vec<(ObjectName, ObjectName)>,
}

impl fmt::Display for RenameTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RENAME TABLE ")?;
        for (i, (from, to)) in self.renames.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{from} TO {to}")?;
        }
        Ok(())
    }
}

/// Stored routine kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RoutineKind {
    Procedure,
    Function,
}

impl RoutineKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
        }
    }
}

/// `DROP {PROCEDURE | FUNCTION} [IF EXISTS] name`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropRoutineStatement {
    /// Routine kind.
    pub kind: RoutineKind,
    /// `IF EXISTS`
    pub if_exists: bool,
    /// Routine name.
    pub name: ObjectName,
}

impl fmt::Display for DropRoutineStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {} ", self.kind.as_str())?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::IntegerSize;

    fn int() -> DataType {
        DataType::Integer {
            size: IntegerSize::Int,
            width: None,
            unsigned: false,
            zerofill: false,
        }
    }

    #[test]
    fn test_column_def_helpers() {
        let col = ColumnDef::new("id", int())
            .option(ColumnOption::NotNull)
            .option(ColumnOption::AutoIncrement)
            .option(ColumnOption::Default(Expr::integer(0)));
        assert!(!col.is_nullable());
        assert!(!col.is_primary_key());
        assert_eq!(col.default_value(), Some(&Expr::integer(0)));
        assert_eq!(col.to_string(), "id INT NOT NULL AUTO_INCREMENT DEFAULT 0");
    }

    #[test]
    fn test_create_table_display() {
        let create = CreateTableStatement {
            temporary: false,
            if_not_exists: true,
            name: ObjectName::new("t"),
            columns: vec![ColumnDef::new("id", int())],
            constraints: vec![TableConstraint::PrimaryKey {
                name: None,
                using: None,
                columns: vec![KeyPart::column("id")],
            }],
            options: vec![TableOption::new(
                "ENGINE",
                OptionValue::Ident(String::from("InnoDB")),
            )],
            like: None,
            query: None,
        };
        assert_eq!(
            create.to_string(),
            "CREATE TABLE IF NOT EXISTS t (id INT, PRIMARY KEY (id)) ENGINE=InnoDB"
        );
    }

    #[test]
    fn test_index_constraint_display() {
        let index = TableConstraint::Index {
            kind: IndexKind::Unique,
            name: Some(String::from("uq_email")),
            using: Some(IndexType::Btree),
            columns: vec![KeyPart::Column {
                name: String::from("email"),
                length: Some(20),
                direction: Some(OrderDirection::Desc),
            }],
        };
        assert_eq!(
            index.to_string(),
            "UNIQUE INDEX uq_email USING BTREE (email(20) DESC)"
        );
    }

    #[test]
    fn test_foreign_key_display() {
        let fk = TableConstraint::ForeignKey {
            name: Some(String::from("fk_user")),
            columns: vec![String::from("user_id")],
            reference: ForeignKeyReference {
                table: ObjectName::new("users"),
                columns: vec![String::from("id")],
                on_delete: Some(ReferentialAction::Cascade),
                on_update: Some(ReferentialAction::SetNull),
            },
        };
        assert_eq!(
            fk.to_string(),
            "CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users (id) \
             ON DELETE CASCADE ON UPDATE SET NULL"
        );
    }

    #[test]
    fn test_alter_operations_display() {
        let op = AlterTableOperation::ChangeColumn {
            old_name: String::from("a"),
            column: ColumnDef::new("b", int()),
            position: Some(ColumnPosition::After(String::from("c"))),
        };
        assert_eq!(op.to_string(), "CHANGE COLUMN a b INT AFTER c");
        assert_eq!(
            AlterTableOperation::DropPrimaryKey.to_string(),
            "DROP PRIMARY KEY"
        );
    }
}
