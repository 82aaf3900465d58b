//! MySQL data type definitions.

use core::fmt;

use crate::dialect::quote_string;

/// Integer storage sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IntegerSize {
    /// 1 byte.
    Tiny,
    /// 2 bytes.
    Small,
    /// 3 bytes.
    Medium,
    /// 4 bytes.
    Int,
    /// 8 bytes.
    Big,
}

impl IntegerSize {
    /// Returns the SQL type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tiny => "TINYINT",
            Self::Small => "SMALLINT",
            Self::Medium => "MEDIUMINT",
            Self::Int => "INT",
            Self::Big => "BIGINT",
        }
    }
}

/// Spatial types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GeometryKind {
    Geometry,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// Returns the SQL type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Geometry => "GEOMETRY",
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

/// MySQL data types.
///
/// Synonyms are normalized: `INTEGER` is [`IntegerSize::Int`], `DEC`,
/// `NUMERIC` and `FIXED` are [`DataType::Decimal`], `REAL` and
/// `DOUBLE PRECISION` are [`DataType::Double`], `BOOL` is
/// [`DataType::Boolean`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DataType {
    // Numeric types
    /// `BIT[(M)]`
    Bit(Option<u32>),
    /// `BOOL` / `BOOLEAN` (an alias of `TINYINT(1)`).
    Boolean,
    /// `TINYINT`, `SMALLINT`, `MEDIUMINT`, `INT`, `BIGINT`.
    Integer {
        /// Storage size.
        size: IntegerSize,
        /// Display width (deprecated in 8.0).
        width: Option<u32>,
        /// `UNSIGNED`
        unsigned: bool,
        /// `ZEROFILL`
        zerofill: bool,
    },
    /// `DECIMAL[(M[,D])]`
    Decimal {
        /// Total number of digits.
        precision: Option<u32>,
        /// Digits after the decimal point.
        scale: Option<u32>,
        /// `UNSIGNED`
        unsigned: bool,
        /// `ZEROFILL`
        zerofill: bool,
    },
    /// `FLOAT[(M,D)]` or `FLOAT(p)`
    Float {
        /// Precision.
        precision: Option<u32>,
        /// Digits after the decimal point.
        scale: Option<u32>,
        /// `UNSIGNED`
        unsigned: bool,
        /// `ZEROFILL`
        zerofill: bool,
    },
    /// `DOUBLE[(M,D)]`
    Double {
        /// Precision.
        precision: Option<u32>,
        /// Digits after the decimal point.
        scale: Option<u32>,
        /// `UNSIGNED`
        unsigned: bool,
        /// `ZEROFILL`
        zerofill: bool,
    },
    /// `SERIAL` (`BIGINT UNSIGNED NOT NULL AUTO_INCREMENT UNIQUE`).
    Serial,

    // Date and time types
    /// `DATE`
    Date,
    /// `TIME[(fsp)]`
    Time(Option<u32>),
    /// `DATETIME[(fsp)]`
    Datetime(Option<u32>),
    /// `TIMESTAMP[(fsp)]`
    Timestamp(Option<u32>),
    /// `YEAR`
    Year,

    // String types
    /// `CHAR[(M)]`
    Char(Option<u32>),
    /// `VARCHAR(M)`
    Varchar(u32),
    /// `BINARY[(M)]`
    Binary(Option<u32>),
    /// `VARBINARY(M)`
    Varbinary(u32),
    /// `TINYTEXT`
    TinyText,
    /// `TEXT[(M)]`
    Text(Option<u32>),
    /// `MEDIUMTEXT`
    MediumText,
    /// `LONGTEXT`
    LongText,
    /// `TINYBLOB`
    TinyBlob,
    /// `BLOB[(M)]`
    Blob(Option<u32>),
    /// `MEDIUMBLOB`
    MediumBlob,
    /// `LONGBLOB`
    LongBlob,
    /// `ENUM('a', 'b', ...)`
    Enum(Vec<String>),
    /// `SET('a', 'b', ...)`
    Set(Vec<String>),

    /// `JSON`
    Json,
    /// Spatial types.
    Geometry(GeometryKind),

    // Cast-only targets
    /// `SIGNED [INTEGER]`
    Signed,
    /// `UNSIGNED [INTEGER]`
    Unsigned,

    /// A type name this crate does not model, kept as written.
    Custom(String),
}

impl DataType {
    /// Returns true for the integer, decimal and floating point types.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Bit(_)
                | Self::Boolean
                | Self::Integer { .. }
                | Self::Decimal { .. }
                | Self::Float { .. }
                | Self::Double { .. }
                | Self::Serial
                | Self::Signed
                | Self::Unsigned
        )
    }

    /// Returns true for the character and binary string types.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(
            self,
            Self::Char(_)
                | Self::Varchar(_)
                | Self::Binary(_)
                | Self::Varbinary(_)
                | Self::TinyText
                | Self::Text(_)
                | Self::MediumText
                | Self::LongText
                | Self::TinyBlob
                | Self::Blob(_)
                | Self::MediumBlob
                | Self::LongBlob
                | Self::Enum(_)
                | Self::Set(_)
        )
    }
}

fn write_length(f: &mut fmt::Formatter<'_>, name: &str, length: Option<u32>) -> fmt::Result {
    match length {
        Some(n) => write!(f, "{name}({n})"),
        None => f.write_str(name),
    }
}

fn write_numeric(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    precision: Option<u32>,
    scale: Option<u32>,
    unsigned: bool,
    zerofill: bool,
) -> fmt::Result {
    match (precision, scale) {
        (Some(p), Some(s)) => write!(f, "{name}({p}, {s})")?,
        (Some(p), None) => write!(f, "{name}({p})")?,
        _ => f.write_str(name)?,
    }
    if unsigned {
        f.write_str(" UNSIGNED")?;
    }
    if zerofill {
        f.write_str(" ZEROFILL")?;
    }
    Ok(())
}

fn write_values(f: &mut fmt::Formatter<'_>, name: &str, values: &[String]) -> fmt::Result {
    let values: Vec<String> = values.iter().map(|v| quote_string(v)).collect();
    write!(f, "{name}({})", values.join(", "))
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bit(len) => write_length(f, "BIT", *len),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Integer {
                size,
                width,
                unsigned,
                zerofill,
            } => write_numeric(f, size.as_str(), *width, None, *unsigned, *zerofill),
            Self::Decimal {
                precision,
                scale,
                unsigned,
                zerofill,
            } => write_numeric(f, "DECIMAL", *precision, *scale, *unsigned, *zerofill),
            Self::Float {
                precision,
                scale,
                unsigned,
                zerofill,
            } => write_numeric(f, "FLOAT", *precision, *scale, *unsigned, *zerofill),
            Self::Double {
                precision,
                scale,
                unsigned,
                zerofill,
            } => write_numeric(f, "DOUBLE", *precision, *scale, *unsigned, *zerofill),
            Self::Serial => f.write_str("SERIAL"),
            Self::Date => f.write_str("DATE"),
            Self::Time(fsp) => write_length(f, "TIME", *fsp),
            Self::Datetime(fsp) => write_length(f, "DATETIME", *fsp),
            Self::Timestamp(fsp) => write_length(f, "TIMESTAMP", *fsp),
            Self::Year => f.write_str("YEAR"),
            Self::Char(len) => write_length(f, "CHAR", *len),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
            Self::Binary(len) => write_length(f, "BINARY", *len),
            Self::Varbinary(len) => write!(f, "VARBINARY({len})"),
            Self::TinyText => f.write_str("TINYTEXT"),
            Self::Text(len) => write_length(f, "TEXT", *len),
            Self::MediumText => f.write_str("MEDIUMTEXT"),
            Self::LongText => f.write_str("LONGTEXT"),
            Self::TinyBlob => f.write_str("TINYBLOB"),
            Self::Blob(len) => write_length(f, "BLOB", *len),
            Self::MediumBlob => f.write_str("MEDIUMBLOB"),
            Self::LongBlob => f.write_str("LONGBLOB"),
            Self::Enum(values) => write_values(f, "ENUM", values),
            Self::Set(values) => write_values(f, "SET", values),
            Self::Json => f.write_str("JSON"),
            Self::Geometry(kind) => f.write_str(kind.as_str()),
            Self::Signed => f.write_str("SIGNED"),
            Self::Unsigned => f.write_str("UNSIGNED"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}
