//! Token types for the MySQL lexer.

use core::fmt;

use super::Span;

/// Declares the keyword table.
///
/// Each entry is `Variant => "TEXT", reserved;`. Reserved keywords can only
/// be used as identifiers when quoted with backticks.
macro_rules! define_keywords {
    ($($variant:ident => $text:literal, $reserved:literal;)*) => {
        /// MySQL keywords.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum Keyword {
            $(
                #[doc = $text]
                $variant,
            )*
        }

        impl Keyword {
            /// Every known keyword, in table order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the keyword as a string.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }

            /// Returns true if the keyword is reserved in MySQL 8.0.
            ///
            /// Non-reserved keywords are accepted wherever an identifier is
            /// expected.
            #[must_use]
            pub const fn is_reserved(&self) -> bool {
                match self {
                    $(Self::$variant => $reserved,)*
                }
            }
        }
    };
}

define_keywords! {
    Action => "ACTION", false;
    Add => "ADD", true;
    After => "AFTER", false;
    Against => "AGAINST", false;
    Algorithm => "ALGORITHM", false;
    All => "ALL", true;
    Alter => "ALTER", true;
    And => "AND", true;
    As => "AS", true;
    Asc => "ASC", true;
    AutoIncrement => "AUTO_INCREMENT", false;
    Begin => "BEGIN", false;
    Between => "BETWEEN", true;
    Bigint => "BIGINT", true;
    Binary => "BINARY", true;
    Bit => "BIT", false;
    Blob => "BLOB", true;
    Bool => "BOOL", false;
    Boolean => "BOOLEAN", false;
    Both => "BOTH", true;
    Btree => "BTREE", false;
    By => "BY", true;
    Call => "CALL", true;
    Cascade => "CASCADE", true;
    Cascaded => "CASCADED", false;
    Case => "CASE", true;
    Cast => "CAST", false;
    Change => "CHANGE", true;
    Char => "CHAR", true;
    Character => "CHARACTER", true;
    Charset => "CHARSET", false;
    Check => "CHECK", true;
    Collate => "COLLATE", true;
    Collation => "COLLATION", false;
    Column => "COLUMN", true;
    Columns => "COLUMNS", false;
    Comment => "COMMENT", false;
    Commit => "COMMIT", false;
    Committed => "COMMITTED", false;
    Consistent => "CONSISTENT", false;
    Constraint => "CONSTRAINT", true;
    Convert => "CONVERT", true;
    Create => "CREATE", true;
    Cross => "CROSS", true;
    Current => "CURRENT", false;
    CurrentDate => "CURRENT_DATE", true;
    CurrentTime => "CURRENT_TIME", true;
    CurrentTimestamp => "CURRENT_TIMESTAMP", true;
    CurrentUser => "CURRENT_USER", true;
    Database => "DATABASE", true;
    Databases => "DATABASES", true;
    Date => "DATE", false;
    Datetime => "DATETIME", false;
    Day => "DAY", false;
    DayHour => "DAY_HOUR", true;
    DayMicrosecond => "DAY_MICROSECOND", true;
    DayMinute => "DAY_MINUTE", true;
    DaySecond => "DAY_SECOND", true;
    Deallocate => "DEALLOCATE", false;
    Dec => "DEC", true;
    Decimal => "DECIMAL", true;
    Default => "DEFAULT", true;
    Delayed => "DELAYED", true;
    Delete => "DELETE", true;
    Desc => "DESC", true;
    Describe => "DESCRIBE", true;
    Distinct => "DISTINCT", true;
    Distinctrow => "DISTINCTROW", true;
    Div => "DIV", true;
    Double => "DOUBLE", true;
    Drop => "DROP", true;
    Dual => "DUAL", true;
    Duplicate => "DUPLICATE", false;
    Else => "ELSE", true;
    End => "END", false;
    Engine => "ENGINE", false;
    Enum => "ENUM", false;
    Errors => "ERRORS", false;
    Escape => "ESCAPE", false;
    Except => "EXCEPT", true;
    Execute => "EXECUTE", false;
    Exists => "EXISTS", true;
    Expansion => "EXPANSION", false;
    Explain => "EXPLAIN", true;
    Extract => "EXTRACT", false;
    False => "FALSE", true;
    Fields => "FIELDS", false;
    First => "FIRST", false;
    Fixed => "FIXED", false;
    Float => "FLOAT", true;
    Following => "FOLLOWING", false;
    For => "FOR", true;
    Force => "FORCE", true;
    Foreign => "FOREIGN", true;
    Format => "FORMAT", false;
    From => "FROM", true;
    Full => "FULL", false;
    Fulltext => "FULLTEXT", true;
    Function => "FUNCTION", false;
    Generated => "GENERATED", true;
    Geometry => "GEOMETRY", false;
    Geometrycollection => "GEOMETRYCOLLECTION", false;
    Global => "GLOBAL", false;
    Grant => "GRANT", true;
    Grants => "GRANTS", false;
    Group => "GROUP", true;
    Hash => "HASH", false;
    Having => "HAVING", true;
    HighPriority => "HIGH_PRIORITY", true;
    Hour => "HOUR", false;
    HourMicrosecond => "HOUR_MICROSECOND", true;
    HourMinute => "HOUR_MINUTE", true;
    HourSecond => "HOUR_SECOND", true;
    Identified => "IDENTIFIED", false;
    If => "IF", true;
    Ignore => "IGNORE", true;
    In => "IN", true;
    Index => "INDEX", true;
    Indexes => "INDEXES", false;
    Inner => "INNER", true;
    Insert => "INSERT", true;
    Int => "INT", true;
    Integer => "INTEGER", true;
    Intersect => "INTERSECT", true;
    Interval => "INTERVAL", true;
    Into => "INTO", true;
    Invisible => "INVISIBLE", false;
    Is => "IS", true;
    Isolation => "ISOLATION", false;
    Join => "JOIN", true;
    Json => "JSON", false;
    Key => "KEY", true;
    Keys => "KEYS", true;
    Language => "LANGUAGE", false;
    Last => "LAST", false;
    Leading => "LEADING", true;
    Left => "LEFT", true;
    Level => "LEVEL", false;
    Like => "LIKE", true;
    Limit => "LIMIT", true;
    Linestring => "LINESTRING", false;
    Local => "LOCAL", false;
    Lock => "LOCK", true;
    Longblob => "LONGBLOB", true;
    Longtext => "LONGTEXT", true;
    LowPriority => "LOW_PRIORITY", true;
    Match => "MATCH", true;
    Mediumblob => "MEDIUMBLOB", true;
    Mediumint => "MEDIUMINT", true;
    Mediumtext => "MEDIUMTEXT", true;
    Member => "MEMBER", false;
    Merge => "MERGE", false;
    Microsecond => "MICROSECOND", false;
    Minute => "MINUTE", false;
    MinuteMicrosecond => "MINUTE_MICROSECOND", true;
    MinuteSecond => "MINUTE_SECOND", true;
    Mod => "MOD", true;
    Mode => "MODE", false;
    Modify => "MODIFY", false;
    Month => "MONTH", false;
    Multilinestring => "MULTILINESTRING", false;
    Multipoint => "MULTIPOINT", false;
    Multipolygon => "MULTIPOLYGON", false;
    Names => "NAMES", false;
    Natural => "NATURAL", true;
    No => "NO", false;
    Not => "NOT", true;
    Null => "NULL", true;
    Numeric => "NUMERIC", true;
    Of => "OF", true;
    Offset => "OFFSET", false;
    On => "ON", true;
    Only => "ONLY", false;
    Option => "OPTION", true;
    Or => "OR", true;
    Order => "ORDER", true;
    Outer => "OUTER", true;
    Over => "OVER", true;
    Partition => "PARTITION", true;
    Password => "PASSWORD", false;
    Persist => "PERSIST", false;
    PersistOnly => "PERSIST_ONLY", false;
    Point => "POINT", false;
    Polygon => "POLYGON", false;
    Position => "POSITION", false;
    Preceding => "PRECEDING", false;
    Precision => "PRECISION", true;
    Prepare => "PREPARE", false;
    Primary => "PRIMARY", true;
    Privileges => "PRIVILEGES", false;
    Procedure => "PROCEDURE", true;
    Processlist => "PROCESSLIST", false;
    Quarter => "QUARTER", false;
    Query => "QUERY", false;
    Quick => "QUICK", false;
    Range => "RANGE", true;
    Read => "READ", true;
    Real => "REAL", true;
    Recursive => "RECURSIVE", true;
    References => "REFERENCES", true;
    Regexp => "REGEXP", true;
    Release => "RELEASE", true;
    Rename => "RENAME", true;
    Repeatable => "REPEATABLE", false;
    Replace => "REPLACE", true;
    Restrict => "RESTRICT", true;
    Revoke => "REVOKE", true;
    Right => "RIGHT", true;
    Rlike => "RLIKE", true;
    Rollback => "ROLLBACK", false;
    Rollup => "ROLLUP", false;
    Row => "ROW", true;
    RowFormat => "ROW_FORMAT", false;
    Rows => "ROWS", true;
    Savepoint => "SAVEPOINT", false;
    Schema => "SCHEMA", true;
    Schemas => "SCHEMAS", true;
    Second => "SECOND", false;
    SecondMicrosecond => "SECOND_MICROSECOND", true;
    Select => "SELECT", true;
    Separator => "SEPARATOR", true;
    Serial => "SERIAL", false;
    Serializable => "SERIALIZABLE", false;
    Session => "SESSION", false;
    Set => "SET", true;
    Share => "SHARE", false;
    Show => "SHOW", true;
    Signed => "SIGNED", false;
    Smallint => "SMALLINT", true;
    Snapshot => "SNAPSHOT", false;
    Spatial => "SPATIAL", true;
    SqlBigResult => "SQL_BIG_RESULT", true;
    SqlCalcFoundRows => "SQL_CALC_FOUND_ROWS", true;
    SqlNoCache => "SQL_NO_CACHE", false;
    SqlSmallResult => "SQL_SMALL_RESULT", true;
    Start => "START", false;
    Status => "STATUS", false;
    Stored => "STORED", true;
    StraightJoin => "STRAIGHT_JOIN", true;
    Table => "TABLE", true;
    Tables => "TABLES", false;
    Temporary => "TEMPORARY", false;
    Temptable => "TEMPTABLE", false;
    Text => "TEXT", false;
    Then => "THEN", true;
    Time => "TIME", false;
    Timestamp => "TIMESTAMP", false;
    Tinyblob => "TINYBLOB", true;
    Tinyint => "TINYINT", true;
    Tinytext => "TINYTEXT", true;
    To => "TO", true;
    Trailing => "TRAILING", true;
    Transaction => "TRANSACTION", false;
    True => "TRUE", true;
    Truncate => "TRUNCATE", false;
    Unbounded => "UNBOUNDED", false;
    Uncommitted => "UNCOMMITTED", false;
    Undefined => "UNDEFINED", false;
    Union => "UNION", true;
    Unique => "UNIQUE", true;
    Unknown => "UNKNOWN", false;
    Unlock => "UNLOCK", true;
    Unsigned => "UNSIGNED", true;
    Update => "UPDATE", true;
    Usage => "USAGE", true;
    Use => "USE", true;
    User => "USER", false;
    Using => "USING", true;
    Value => "VALUE", false;
    Values => "VALUES", true;
    Varbinary => "VARBINARY", true;
    Varchar => "VARCHAR", true;
    Variables => "VARIABLES", false;
    View => "VIEW", false;
    Virtual => "VIRTUAL", true;
    Visible => "VISIBLE", false;
    Warnings => "WARNINGS", false;
    Week => "WEEK", false;
    When => "WHEN", true;
    Where => "WHERE", true;
    Window => "WINDOW", true;
    With => "WITH", true;
    Work => "WORK", false;
    Write => "WRITE", true;
    Xor => "XOR", true;
    Year => "YEAR", false;
    YearMonth => "YEAR_MONTH", true;
    Zerofill => "ZEROFILL", true;
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42).
    Integer(u64),
    /// Exact decimal literal, kept as written (e.g., 3.14, or an integer
    /// too large for `u64`).
    Decimal(String),
    /// Approximate literal with an exponent (e.g., 1e10).
    Float(f64),
    /// String literal with escapes resolved.
    String(String),
    /// National string literal (N'...').
    NationalString(String),
    /// Hexadecimal literal digits (X'4D' or 0x4D).
    HexString(String),
    /// Bit literal digits (B'101' or 0b101).
    BitString(String),

    // Identifiers and keywords
    /// Unquoted identifier.
    Identifier(String),
    /// Backtick-quoted identifier, or double-quoted under `ANSI_QUOTES`.
    QuotedIdentifier(String),
    /// SQL keyword.
    Keyword(Keyword),
    /// User variable (`@name`), without the `@`.
    UserVariable(String),
    /// System variable (`@@name`, `@@global.name`), without the `@@`.
    SystemVariable(String),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ^
    Caret,
    /// =
    Eq,
    /// <=>
    NullSafeEq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// !
    Bang,
    /// &&
    DoubleAmpersand,
    /// ||
    DoublePipe,
    /// :=
    Assign,
    /// ->
    Arrow,
    /// ->>
    LongArrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ?
    Question,

    // Special
    /// End of input.
    Eof,
    /// Invalid/unknown token.
    Error(String),
}

impl TokenKind {
    /// Returns true for a statement keyword that does not also continue
    /// another statement when it starts a line.
    ///
    /// `SET`, `SELECT`, `UPDATE`, `DROP` and the like are left out: they
    /// open clauses of UPDATE, INSERT ... SELECT, `FOR UPDATE` or ALTER
    /// TABLE as well.
    #[must_use]
    pub const fn is_statement_boundary(&self) -> bool {
        matches!(
            self,
            Self::Keyword(
                Keyword::Insert
                    | Keyword::Create
                    | Keyword::Truncate
                    | Keyword::Grant
                    | Keyword::Revoke
                    | Keyword::Start
                    | Keyword::Begin
                    | Keyword::Commit
                    | Keyword::Rollback
                    | Keyword::Savepoint
                    | Keyword::Release
                    | Keyword::Show
                    | Keyword::Explain
                    | Keyword::Describe
                    | Keyword::Unlock
                    | Keyword::Call
                    | Keyword::Prepare
                    | Keyword::Execute
                    | Keyword::Deallocate
            )
        )
    }

    /// Returns true for a keyword that opens a query expression:
    /// `SELECT`, `WITH`, `VALUES` or `TABLE`.
    #[must_use]
    pub const fn starts_query(&self) -> bool {
        matches!(
            self,
            Self::Keyword(Keyword::Select | Keyword::With | Keyword::Values | Keyword::Table)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "integer {n}"),
            Self::Decimal(d) => write!(f, "number {d}"),
            Self::Float(v) => write!(f, "number {v}"),
            Self::String(s) | Self::NationalString(s) => write!(f, "string '{s}'"),
            Self::HexString(h) => write!(f, "hex literal 0x{h}"),
            Self::BitString(b) => write!(f, "bit literal 0b{b}"),
            Self::Identifier(name) => write!(f, "identifier {name}"),
            Self::QuotedIdentifier(name) => write!(f, "identifier `{name}`"),
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::UserVariable(name) => write!(f, "variable @{name}"),
            Self::SystemVariable(name) => write!(f, "variable @@{name}"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::Percent => f.write_str("'%'"),
            Self::Caret => f.write_str("'^'"),
            Self::Eq => f.write_str("'='"),
            Self::NullSafeEq => f.write_str("'<=>'"),
            Self::NotEq => f.write_str("'<>'"),
            Self::Lt => f.write_str("'<'"),
            Self::LtEq => f.write_str("'<='"),
            Self::Gt => f.write_str("'>'"),
            Self::GtEq => f.write_str("'>='"),
            Self::LeftShift => f.write_str("'<<'"),
            Self::RightShift => f.write_str("'>>'"),
            Self::BitAnd => f.write_str("'&'"),
            Self::BitOr => f.write_str("'|'"),
            Self::BitNot => f.write_str("'~'"),
            Self::Bang => f.write_str("'!'"),
            Self::DoubleAmpersand => f.write_str("'&&'"),
            Self::DoublePipe => f.write_str("'||'"),
            Self::Assign => f.write_str("':='"),
            Self::Arrow => f.write_str("'->'"),
            Self::LongArrow => f.write_str("'->>'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Dot => f.write_str("'.'"),
            Self::Question => f.write_str("'?'"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(message) => write!(f, "invalid token ({message})"),
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
