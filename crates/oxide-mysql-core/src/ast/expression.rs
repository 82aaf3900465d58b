//! Expression AST types.

use core::fmt;

use super::{Query, comma_separated, ident};
use crate::dialect::{quote_identifier, quote_string};
use crate::lexer::Span;

/// A possibly schema-qualified object name (`db.tbl`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ObjectName {
    /// Schema (database) name.
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
}

impl ObjectName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", ident(schema))?;
        }
        write!(f, "{}", ident(&self.name))
    }
}

/// A column reference, optionally qualified with a table (and schema).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnRef {
    /// Table name or alias.
    pub qualifier: Option<ObjectName>,
    /// Column name.
    pub name: String,
    /// Source span.
    pub span: Span,
}

impl ColumnRef {
    /// Creates an unqualified column reference without a source span.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
            span: Span::default(),
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(qualifier) = &self.qualifier {
            write!(f, "{qualifier}.")?;
        }
        write!(f, "{}", ident(&self.name))
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Literal {
    /// Integer literal.
    Integer(u64),
    /// Exact decimal literal, kept as written.
    Decimal(String),
    /// Approximate (floating point) literal.
    Float(f64),
    /// String literal.
    String(String),
    /// National string literal (`N'...'`).
    NationalString(String),
    /// String with a character set introducer (`_utf8mb4'...'`).
    IntroducedString {
        /// Character set name, without the leading underscore.
        charset: String,
        /// String value.
        value: String,
    },
    /// Hex or bit literal with a character set introducer (`_binary 0x41`).
    IntroducedBytes {
        /// Character set name, without the leading underscore.
        charset: String,
        /// A [`Literal::Hex`] or [`Literal::Bit`].
        bytes: Box<Literal>,
    },
    /// Hexadecimal literal digits.
    Hex(String),
    /// Bit literal digits.
    Bit(String),
    /// Boolean literal.
    Boolean(bool),
    /// `DATE '...'`.
    Date(String),
    /// `TIME '...'`.
    Time(String),
    /// `TIMESTAMP '...'`.
    Timestamp(String),
    /// NULL literal.
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(d) => f.write_str(d),
            Self::Float(v) => write!(f, "{v:e}"),
            Self::String(s) => f.write_str(&quote_string(s)),
            Self::NationalString(s) => write!(f, "N{}", quote_string(s)),
            Self::IntroducedString { charset, value } => {
                write!(f, "_{charset}{}", quote_string(value))
            }
            Self::IntroducedBytes { charset, bytes } => write!(f, "_{charset} {bytes}"),
            Self::Hex(digits) => write!(f, "0x{digits}"),
            Self::Bit(digits) => write!(f, "0b{digits}"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Date(s) => write!(f, "DATE {}", quote_string(s)),
            Self::Time(s) => write!(f, "TIME {}", quote_string(s)),
            Self::Timestamp(s) => write!(f, "TIMESTAMP {}", quote_string(s)),
            Self::Null => f.write_str("NULL"),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    /// Integer division (`DIV`).
    IntDiv,
    /// `%` or `MOD`.
    Mod,

    // Comparison
    Eq,
    /// `<=>`
    NullSafeEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
    Xor,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,

    /// `||` under `PIPES_AS_CONCAT`.
    Concat,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NullSafeEq => "<=>",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Concat => "||",
        }
    }

    /// Returns true for the comparison operators.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NullSafeEq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOp {
    /// Negation (-)
    Minus,
    /// Unary plus (+)
    Plus,
    /// Logical NOT
    Not,
    /// Logical NOT written as `!`
    Bang,
    /// Bitwise NOT (~)
    BitNot,
    /// `BINARY` string cast
    Binary,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Not => "NOT",
            Self::Bang => "!",
            Self::BitNot => "~",
            Self::Binary => "BINARY",
        }
    }
}

/// Units accepted by `INTERVAL`, `EXTRACT` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntervalUnit {
    Microsecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
    SecondMicrosecond,
    MinuteMicrosecond,
    MinuteSecond,
    HourMicrosecond,
    HourSecond,
    HourMinute,
    DayMicrosecond,
    DaySecond,
    DayMinute,
    DayHour,
    YearMonth,
}

impl IntervalUnit {
    /// Returns the SQL representation of the unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Microsecond => "MICROSECOND",
            Self::Second => "SECOND",
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Quarter => "QUARTER",
            Self::Year => "YEAR",
            Self::SecondMicrosecond => "SECOND_MICROSECOND",
            Self::MinuteMicrosecond => "MINUTE_MICROSECOND",
            Self::MinuteSecond => "MINUTE_SECOND",
            Self::HourMicrosecond => "HOUR_MICROSECOND",
            Self::HourSecond => "HOUR_SECOND",
            Self::HourMinute => "HOUR_MINUTE",
            Self::DayMicrosecond => "DAY_MICROSECOND",
            Self::DaySecond => "DAY_SECOND",
            Self::DayMinute => "DAY_MINUTE",
            Self::DayHour => "DAY_HOUR",
            Self::YearMonth => "YEAR_MONTH",
        }
    }
}

/// `TRIM` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrimSide {
    Both,
    Leading,
    Trailing,
}

impl TrimSide {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Both => "BOTH",
            Self::Leading => "LEADING",
            Self::Trailing => "TRAILING",
        }
    }
}

/// Truth value tested by `IS [NOT] TRUE|FALSE|UNKNOWN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TruthValue {
    True,
    False,
    Unknown,
}

impl TruthValue {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Quantifier of a subquery comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Quantifier {
    Any,
    Some,
    All,
}

impl Quantifier {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Some => "SOME",
            Self::All => "ALL",
        }
    }
}

/// Search modifier of `MATCH ... AGAINST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MatchMode {
    NaturalLanguage,
    NaturalLanguageWithQueryExpansion,
    Boolean,
    WithQueryExpansion,
}

impl MatchMode {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NaturalLanguage => "IN NATURAL LANGUAGE MODE",
            Self::NaturalLanguageWithQueryExpansion => {
                "IN NATURAL LANGUAGE MODE WITH QUERY EXPANSION"
            }
            Self::Boolean => "IN BOOLEAN MODE",
            Self::WithQueryExpansion => "WITH QUERY EXPANSION",
        }
    }
}

/// Scope of a system variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum VariableScope {
    Global,
    Session,
    Local,
    Persist,
    PersistOnly,
}

impl VariableScope {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::Session => "SESSION",
            Self::Local => "LOCAL",
            Self::Persist => "PERSIST",
            Self::PersistOnly => "PERSIST_ONLY",
        }
    }

    /// Parses a scope name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GLOBAL" => Some(Self::Global),
            "SESSION" => Some(Self::Session),
            "LOCAL" => Some(Self::Local),
            "PERSIST" => Some(Self::Persist),
            "PERSIST_ONLY" => Some(Self::PersistOnly),
            _ => None,
        }
    }
}

/// Target of `CONVERT(...)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConvertTarget {
    /// `CONVERT(expr, type [CHARACTER SET charset])`
    Type {
        /// Target type.
        data_type: super::DataType,
        /// Character set of a string target.
        charset: Option<String>,
    },
    /// `CONVERT(expr USING charset)`
    Charset(String),
}

/// `OVER` clause of a window function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WindowOver {
    /// `OVER name`
    Named(String),
    /// `OVER (...)`
    Spec(WindowSpec),
}

/// A window specification.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowSpec {
    /// Name of a window this specification refines.
    pub base: Option<String>,
    /// `PARTITION BY` expressions.
    pub partition_by: Vec<Expr>,
    /// `ORDER BY` items.
    pub order_by: Vec<super::OrderBy>,
    /// Frame clause.
    pub frame: Option<WindowFrame>,
}

/// Frame units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameUnits {
    Rows,
    Range,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameBound {
    CurrentRow,
    UnboundedPreceding,
    UnboundedFollowing,
    Preceding(Box<Expr>),
    Following(Box<Expr>),
}

/// A window frame (`ROWS BETWEEN ... AND ...`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrame {
    /// ROWS or RANGE.
    pub units: FrameUnits,
    /// Frame start.
    pub start: FrameBound,
    /// Frame end (only with `BETWEEN`).
    pub end: Option<FrameBound>,
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(base) = &self.base {
            parts.push(quote_identifier(base));
        }
        if !self.partition_by.is_empty() {
            parts.push(format!(
                "PARTITION BY {}",
                comma_separated(&self.partition_by)
            ));
        }
        if !self.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", comma_separated(&self.order_by)));
        }
        if let Some(frame) = &self.frame {
            parts.push(frame.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
            Self::Preceding(e) => write!(f, "{e} PRECEDING"),
            Self::Following(e) => write!(f, "{e} FOLLOWING"),
        }
    }
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = match self.units {
            FrameUnits::Rows => "ROWS",
            FrameUnits::Range => "RANGE",
        };
        match &self.end {
            Some(end) => write!(f, "{units} BETWEEN {} AND {end}", self.start),
            None => write!(f, "{units} {}", self.start),
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionCall {
    /// Schema of a stored function (`db.fn(...)`).
    pub schema: Option<String>,
    /// The function name, as written.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// `ORDER BY` inside `GROUP_CONCAT`.
    pub order_by: Vec<super::OrderBy>,
    /// `SEPARATOR` of `GROUP_CONCAT`.
    pub separator: Option<String>,
    /// Window specification.
    pub over: Option<WindowOver>,
}

impl FunctionCall {
    /// Creates a plain call `name(args)`.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            args,
            distinct: false,
            order_by: vec![],
            separator: None,
            over: None,
        }
    }

    /// Returns true for the SQL-standard niladic functions that MySQL
    /// accepts without parentheses.
    #[must_use]
    pub fn is_niladic_keyword(&self) -> bool {
        self.schema.is_none()
            && matches!(
                self.name.to_ascii_uppercase().as_str(),
                "CURRENT_DATE" | "CURRENT_TIME" | "CURRENT_TIMESTAMP" | "CURRENT_USER"
            )
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.{}", ident(schema), ident(&self.name))?;
        } else {
            f.write_str(&self.name)?;
        }
        let bare = self.args.is_empty() && self.is_niladic_keyword();
        if !bare {
            f.write_str("(")?;
            if self.distinct {
                f.write_str("DISTINCT ")?;
            }
            write!(f, "{}", comma_separated(&self.args))?;
            if !self.order_by.is_empty() {
                write!(f, " ORDER BY {}", comma_separated(&self.order_by))?;
            }
            if let Some(separator) = &self.separator {
                write!(f, " SEPARATOR {}", quote_string(separator))?;
            }
            f.write_str(")")?;
        }
        match &self.over {
            Some(WindowOver::Named(name)) => write!(f, " OVER {}", ident(name)),
            Some(WindowOver::Spec(spec)) => write!(f, " OVER ({spec})"),
            None => Ok(()),
        }
    }
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference.
    Column(ColumnRef),

    /// Wildcard (`*` or `t.*`).
    Wildcard {
        /// Table qualifier (optional).
        qualifier: Option<ObjectName>,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// A scalar subquery.
    Subquery(Box<Query>),

    /// `EXISTS (subquery)`.
    Exists(Box<Query>),

    /// `expr [NOT] IN (list)`.
    InList {
        /// The expression to check.
        expr: Box<Expr>,
        /// The list of values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// `expr [NOT] IN (subquery)`.
    InSubquery {
        /// The expression to check.
        expr: Box<Expr>,
        /// The subquery.
        subquery: Box<Query>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// `expr [NOT] LIKE pattern [ESCAPE escape]`.
    Like {
        /// The expression to match.
        expr: Box<Expr>,
        /// The pattern.
        pattern: Box<Expr>,
        /// Escape character.
        escape: Option<Box<Expr>>,
        /// Whether this is NOT LIKE.
        negated: bool,
    },

    /// `expr [NOT] REGEXP pattern` (also `RLIKE`).
    Regexp {
        /// The expression to match.
        expr: Box<Expr>,
        /// The pattern.
        pattern: Box<Expr>,
        /// Whether this is NOT REGEXP.
        negated: bool,
    },

    /// `expr op ANY|SOME|ALL (subquery)`.
    Quantified {
        /// Left operand.
        expr: Box<Expr>,
        /// Comparison operator.
        op: BinaryOp,
        /// ANY, SOME or ALL.
        quantifier: Quantifier,
        /// The subquery.
        subquery: Box<Query>,
    },

    /// `expr SOUNDS LIKE other`.
    SoundsLike {
        /// Left operand.
        expr: Box<Expr>,
        /// Right operand.
        other: Box<Expr>,
    },

    /// `expr MEMBER OF (json_array)`.
    MemberOf {
        /// The value to look for.
        expr: Box<Expr>,
        /// The JSON array.
        array: Box<Expr>,
    },

    /// `expr IS [NOT] NULL`.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// `expr IS [NOT] TRUE|FALSE|UNKNOWN`.
    IsTruth {
        /// The expression to check.
        expr: Box<Expr>,
        /// The truth value tested.
        value: TruthValue,
        /// Whether this is IS NOT.
        negated: bool,
    },

    /// CASE expression.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },

    /// `CAST(expr AS type [CHARACTER SET charset])`.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        data_type: super::DataType,
        /// Character set of a string target.
        charset: Option<String>,
    },

    /// `CONVERT(expr, type)` or `CONVERT(expr USING charset)`.
    Convert {
        /// Expression to convert.
        expr: Box<Expr>,
        /// Conversion target.
        target: ConvertTarget,
    },

    /// `INTERVAL expr unit`.
    Interval {
        /// Interval quantity.
        value: Box<Expr>,
        /// Interval unit.
        unit: IntervalUnit,
    },

    /// `EXTRACT(unit FROM expr)`.
    Extract {
        /// Unit to extract.
        unit: IntervalUnit,
        /// Source expression.
        expr: Box<Expr>,
    },

    /// `TRIM([side] [what] FROM expr)` or `TRIM(expr)`.
    Trim {
        /// BOTH, LEADING or TRAILING.
        side: Option<TrimSide>,
        /// Characters to remove.
        what: Option<Box<Expr>>,
        /// Source expression.
        expr: Box<Expr>,
    },

    /// `POSITION(needle IN haystack)`.
    Position {
        /// Substring to find.
        needle: Box<Expr>,
        /// String searched.
        haystack: Box<Expr>,
    },

    /// `SUBSTRING(expr FROM pos [FOR len])`.
    Substring {
        /// Source string.
        expr: Box<Expr>,
        /// Start position.
        from: Box<Expr>,
        /// Length.
        len: Option<Box<Expr>>,
    },

    /// `expr COLLATE collation`.
    Collate {
        /// The expression.
        expr: Box<Expr>,
        /// Collation name.
        collation: String,
    },

    /// Row constructor `(a, b, ...)` / `ROW(a, b, ...)`.
    Row(Vec<Expr>),

    /// Parenthesized expression.
    Paren(Box<Expr>),

    /// A `?` placeholder.
    Parameter {
        /// Position in the statement (1-based).
        position: usize,
    },

    /// `@name`
    UserVariable(String),

    /// `@@[scope.]name`
    SystemVariable {
        /// Explicit scope.
        scope: Option<VariableScope>,
        /// Variable name.
        name: String,
    },

    /// `@name := value`
    Assign {
        /// User variable name.
        variable: String,
        /// Assigned value.
        value: Box<Expr>,
    },

    /// `MATCH (columns) AGAINST (expr [mode])`.
    MatchAgainst {
        /// Full-text indexed columns.
        columns: Vec<ColumnRef>,
        /// Search expression.
        against: Box<Expr>,
        /// Search modifier.
        mode: Option<MatchMode>,
    },

    /// `expr -> path` / `expr ->> path`.
    JsonExtract {
        /// JSON column.
        expr: Box<Expr>,
        /// JSON path (a string literal).
        path: Box<Expr>,
        /// True for `->>` (unquoting).
        unquote: bool,
    },

    /// `DEFAULT` in VALUES lists and assignments.
    Default,
}

impl Expr {
    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::new(name))
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column(ColumnRef {
            qualifier: Some(ObjectName::new(table)),
            name: name.into(),
            span: Span::default(),
        })
    }

    /// Creates a new integer literal.
    #[must_use]
    pub const fn integer(value: u64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a NULL literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Strips any number of enclosing parentheses.
    #[must_use]
    pub fn unparenthesized(&self) -> &Self {
        match self {
            Self::Paren(inner) => inner.unparenthesized(),
            other => other,
        }
    }
}

const fn not_str(negated: bool) -> &'static str {
    if negated { "NOT " } else { "" }
}

fn write_cast_charset(f: &mut fmt::Formatter<'_>, charset: Option<&str>) -> fmt::Result {
    match charset {
        Some(charset) => write!(f, " CHARACTER SET {}", ident(charset)),
        None => Ok(()),
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Column(col) => write!(f, "{col}"),
            Self::Wildcard { qualifier } => match qualifier {
                Some(q) => write!(f, "{q}.*"),
                None => f.write_str("*"),
            },
            Self::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Unary { op, operand } => match op {
                UnaryOp::Not | UnaryOp::Binary => write!(f, "{} {operand}", op.as_str()),
                _ => write!(f, "{}{operand}", op.as_str()),
            },
            Self::Function(func) => write!(f, "{func}"),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::Exists(query) => write!(f, "EXISTS ({query})"),
            Self::InList {
                expr,
                list,
                negated,
            } => write!(f, "{expr} {}IN ({})", not_str(*negated), comma_separated(list)),
            Self::InSubquery {
                expr,
                subquery,
                negated,
            } => write!(f, "{expr} {}IN ({subquery})", not_str(*negated)),
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => write!(f, "{expr} {}BETWEEN {low} AND {high}", not_str(*negated)),
            Self::Like {
                expr,
                pattern,
                escape,
                negated,
            } => {
                write!(f, "{expr} {}LIKE {pattern}", not_str(*negated))?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {escape}")?;
                }
                Ok(())
            }
            Self::Regexp {
                expr,
                pattern,
                negated,
            } => write!(f, "{expr} {}REGEXP {pattern}", not_str(*negated)),
            Self::Quantified {
                expr,
                op,
                quantifier,
                subquery,
            } => write!(f, "{expr} {op} {} ({subquery})", quantifier.as_str()),
            Self::SoundsLike { expr, other } => write!(f, "{expr} SOUNDS LIKE {other}"),
            Self::MemberOf { expr, array } => write!(f, "{expr} MEMBER OF ({array})"),
            Self::IsNull { expr, negated } => write!(f, "{expr} IS {}NULL", not_str(*negated)),
            Self::IsTruth {
                expr,
                value,
                negated,
            } => write!(f, "{expr} IS {}{}", not_str(*negated), value.as_str()),
            Self::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for (when, then) in when_clauses {
                    write!(f, " WHEN {when} THEN {then}")?;
                }
                if let Some(else_clause) = else_clause {
                    write!(f, " ELSE {else_clause}")?;
                }
                f.write_str(" END")
            }
            Self::Cast {
                expr,
                data_type,
                charset,
            } => {
                write!(f, "CAST({expr} AS {data_type}")?;
                write_cast_charset(f, charset.as_deref())?;
                f.write_str(")")
            }
            Self::Convert { expr, target } => match target {
                ConvertTarget::Type { data_type, charset } => {
                    write!(f, "CONVERT({expr}, {data_type}")?;
                    write_cast_charset(f, charset.as_deref())?;
                    f.write_str(")")
                }
                ConvertTarget::Charset(charset) => {
                    write!(f, "CONVERT({expr} USING {})", ident(charset))
                }
            },
            Self::Interval { value, unit } => write!(f, "INTERVAL {value} {}", unit.as_str()),
            Self::Extract { unit, expr } => write!(f, "EXTRACT({} FROM {expr})", unit.as_str()),
            Self::Trim { side, what, expr } => {
                f.write_str("TRIM(")?;
                match (side, what) {
                    (None, None) => {}
                    (Some(side), None) => write!(f, "{} FROM ", side.as_str())?,
                    (None, Some(what)) => write!(f, "{what} FROM ")?,
                    (Some(side), Some(what)) => write!(f, "{} {what} FROM ", side.as_str())?,
                }
                write!(f, "{expr})")
            }
            Self::Position { needle, haystack } => write!(f, "POSITION({needle} IN {haystack})"),
            Self::Substring { expr, from, len } => {
                write!(f, "SUBSTRING({expr} FROM {from}")?;
                if let Some(len) = len {
                    write!(f, " FOR {len}")?;
                }
                f.write_str(")")
            }
            Self::Collate { expr, collation } => {
                write!(f, "{expr} COLLATE {}", ident(collation))
            }
            Self::Row(items) => write!(f, "({})", comma_separated(items)),
            Self::Paren(inner) => write!(f, "({inner})"),
            Self::Parameter { .. } => f.write_str("?"),
            Self::UserVariable(name) => write!(f, "@{}", ident(name)),
            Self::SystemVariable { scope, name } => match scope {
                Some(scope) => write!(f, "@@{}.{}", scope.as_str(), name),
                None => write!(f, "@@{name}"),
            },
            Self::Assign { variable, value } => write!(f, "@{} := {value}", ident(variable)),
            Self::MatchAgainst {
                columns,
                against,
                mode,
            } => {
                write!(f, "MATCH ({}) AGAINST ({against}", comma_separated(columns))?;
                if let Some(mode) = mode {
                    write!(f, " {}", mode.as_str())?;
                }
                f.write_str(")")
            }
            Self::JsonExtract {
                expr,
                path,
                unquote,
            } => write!(f, "{expr} {} {path}", if *unquote { "->>" } else { "->" }),
            Self::Default => f.write_str("DEFAULT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_builders() {
        let col = Expr::column("name");
        assert!(matches!(col, Expr::Column(ColumnRef { ref name, .. }) if name == "name"));

        let lit = Expr::integer(42);
        assert!(matches!(lit, Expr::Literal(Literal::Integer(42))));
    }

    #[test]
    fn test_expr_chaining_renders() {
        let expr = Expr::column("age")
            .binary(BinaryOp::Gt, Expr::integer(18))
            .and(Expr::qualified_column("u", "status").eq(Expr::string("active")));
        assert_eq!(expr.to_string(), "age > 18 AND u.`status` = 'active'");
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Float(1e10).to_string(), "1e10");
        assert_eq!(Literal::Hex(String::from("FF")).to_string(), "0xFF");
        assert_eq!(
            Literal::IntroducedString {
                charset: String::from("utf8mb4"),
                value: String::from("x"),
            }
            .to_string(),
            "_utf8mb4'x'"
        );
        assert_eq!(
            Literal::IntroducedBytes {
                charset: String::from("binary"),
                bytes: Box::new(Literal::Hex(String::from("41"))),
            }
            .to_string(),
            "_binary 0x41"
        );
        assert_eq!(Literal::Date(String::from("2024-01-31")).to_string(), "DATE '2024-01-31'");
    }

    #[test]
    fn test_niladic_function_renders_bare() {
        let now = FunctionCall::new("CURRENT_TIMESTAMP", vec![]);
        assert_eq!(now.to_string(), "CURRENT_TIMESTAMP");
        let call = FunctionCall::new("NOW", vec![]);
        assert_eq!(call.to_string(), "NOW()");
    }

    #[test]
    fn test_unparenthesized() {
        let expr = Expr::Paren(Box::new(Expr::Paren(Box::new(Expr::integer(1)))));
        assert_eq!(expr.unparenthesized(), &Expr::integer(1));
    }

    #[test]
    fn test_variable_scope_from_name() {
        assert_eq!(VariableScope::from_name("global"), Some(VariableScope::Global));
        assert_eq!(VariableScope::from_name("nope"), None);
    }
}
