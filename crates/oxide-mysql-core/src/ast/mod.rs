//! Abstract Syntax Tree (AST) types for MySQL statements.
//!
//! Every node implements [`core::fmt::Display`], rendering canonical MySQL
//! text: keywords in upper case, identifiers backtick-quoted only when
//! required, aliases always introduced with `AS`. Rendering a parsed
//! statement and parsing the result again yields the same text.

mod admin;
mod ddl;
mod dml;
mod expression;
mod query;
mod statement;
mod types;

use core::fmt;

pub use admin::{
    AlterUserStatement, CallStatement, CreateUserStatement, DescribeStatement, DropUserStatement,
    ExplainFormat, GrantObjectType, GrantStatement, GrantTarget, IsolationLevel,
    LockTablesStatement, PrepareSource, Privilege, PrivilegeLevel, RevokeStatement,
    SetAssignment, SetNamesStatement, SetPasswordStatement, SetTarget, SetTransactionStatement,
    SetValue, ShowFilter, ShowStatement, TableLock, TableLockType, TransactionMode,
    TruncateStatement, UserName, UserSpec,
};
pub use ddl::{
    AlterDatabaseStatement, AlterTableOperation, AlterTableStatement, AlterViewStatement,
    ColumnDef, ColumnOption, ColumnPosition, CreateDatabaseStatement, CreateIndexStatement,
    CreateTableStatement, CreateViewStatement, DropBehavior, DropDatabaseStatement,
    DropIndexStatement, DropRoutineStatement, DropTableStatement, DropViewStatement,
    ForeignKeyReference, IndexKind, IndexType, KeyPart, OptionValue, ReferentialAction,
    RenameTableStatement, RoutineKind, TableConstraint, TableOption, ViewAlgorithm,
    ViewCheckOption, ViewDefiner, ViewSecurity,
};
pub use dml::{
    Assignment, DeleteStatement, InsertPriority, InsertSource, InsertStatement, UpdateStatement,
};
pub use expression::{
    BinaryOp, ColumnRef, ConvertTarget, Expr, FrameBound, FrameUnits, FunctionCall,
    IntervalUnit, Literal, MatchMode, ObjectName, Quantifier, TrimSide, TruthValue, UnaryOp,
    VariableScope, WindowFrame, WindowOver, WindowSpec,
};
pub use query::{
    Cte, IndexHint, IndexHintAction, IndexHintScope, JoinClause, JoinConstraint, JoinType,
    Limit, LockClause, LockWait, NamedWindow, OrderBy, OrderDirection, Outfile, Query, Select,
    SelectColumn, SelectInto, SelectOption, SetExpr, SetOperator, SetQuantifier, TableRef, With,
};
pub use statement::{Statement, StatementKind};
pub use types::{DataType, GeometryKind, IntegerSize};

/// Displays items separated by `", "`.
pub(crate) struct CommaSeparated<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for CommaSeparated<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

pub(crate) const fn comma_separated<T>(items: &[T]) -> CommaSeparated<'_, T> {
    CommaSeparated(items)
}

/// Displays an identifier, quoted when needed.
pub(crate) struct Ident<'a>(&'a str);

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::dialect::quote_identifier(self.0))
    }
}

pub(crate) const fn ident(name: &str) -> Ident<'_> {
    Ident(name)
}

/// Displays a comma-separated identifier list.
pub(crate) struct IdentList<'a>(&'a [String]);

impl fmt::Display for IdentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ident(name))?;
        }
        Ok(())
    }
}

pub(crate) const fn ident_list(names: &[String]) -> IdentList<'_> {
    IdentList(names)
}
