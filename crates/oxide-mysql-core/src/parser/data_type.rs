//! Column type parsing.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{DataType, GeometryKind, IntegerSize};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a data type.
    pub(super) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let kw = match &self.current.kind {
            TokenKind::Keyword(kw) => *kw,
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => {
                return self.parse_custom_type();
            }
            _ => return Err(self.error_expected("data type")),
        };

        if let Some(size) = integer_size(kw) {
            self.advance();
            let width = self.parse_optional_length()?;
            let (unsigned, zerofill) = self.parse_numeric_attributes();
            return Ok(DataType::Integer {
                size,
                width,
                unsigned,
                zerofill,
            });
        }
        if let Some(kind) = geometry_kind(kw) {
            self.advance();
            return Ok(DataType::Geometry(kind));
        }

        self.advance();
        let data_type = match kw {
            Keyword::Bit => DataType::Bit(self.parse_optional_length()?),
            Keyword::Bool | Keyword::Boolean => DataType::Boolean,
            Keyword::Decimal | Keyword::Dec | Keyword::Numeric | Keyword::Fixed => {
                let (precision, scale) = self.parse_optional_precision()?;
                let (unsigned, zerofill) = self.parse_numeric_attributes();
                DataType::Decimal {
                    precision,
                    scale,
                    unsigned,
                    zerofill,
                }
            }
            Keyword::Float => {
                let (precision, scale) = self.parse_optional_precision()?;
                let (unsigned, zerofill) = self.parse_numeric_attributes();
                DataType::Float {
                    precision,
                    scale,
                    unsigned,
                    zerofill,
                }
            }
            Keyword::Double | Keyword::Real => {
                if kw == Keyword::Double {
                    self.consume_keyword(Keyword::Precision);
                }
                let (precision, scale) = self.parse_optional_precision()?;
                let (unsigned, zerofill) = self.parse_numeric_attributes();
                DataType::Double {
                    precision,
                    scale,
                    unsigned,
                    zerofill,
                }
            }
            Keyword::Serial => DataType::Serial,
            Keyword::Date => DataType::Date,
            Keyword::Time => DataType::Time(self.parse_optional_length()?),
            Keyword::Datetime => DataType::Datetime(self.parse_optional_length()?),
            Keyword::Timestamp => DataType::Timestamp(self.parse_optional_length()?),
            Keyword::Year => {
                // YEAR(4) is accepted; the display width is ignored.
                self.parse_optional_length()?;
                DataType::Year
            }
            Keyword::Char | Keyword::Character => {
                if kw == Keyword::Character && self.consume_word("VARYING") {
                    DataType::Varchar(self.parse_required_length()?)
                } else {
                    DataType::Char(self.parse_optional_length()?)
                }
            }
            Keyword::Varchar => DataType::Varchar(self.parse_required_length()?),
            Keyword::Binary => DataType::Binary(self.parse_optional_length()?),
            Keyword::Varbinary => DataType::Varbinary(self.parse_required_length()?),
            Keyword::Tinytext => DataType::TinyText,
            Keyword::Text => DataType::Text(self.parse_optional_length()?),
            Keyword::Mediumtext => DataType::MediumText,
            Keyword::Longtext => DataType::LongText,
            Keyword::Tinyblob => DataType::TinyBlob,
            Keyword::Blob => DataType::Blob(self.parse_optional_length()?),
            Keyword::Mediumblob => DataType::MediumBlob,
            Keyword::Longblob => DataType::LongBlob,
            Keyword::Enum => DataType::Enum(self.parse_value_list()?),
            Keyword::Set => DataType::Set(self.parse_value_list()?),
            Keyword::Json => DataType::Json,
            _ => {
                return Err(ParseError::unexpected(
                    "data type",
                    self.previous.kind.clone(),
                    self.previous.span,
                ));
            }
        };
        Ok(data_type)
    }

    /// Parses a type this crate does not model, keeping its text
    /// (including any parenthesized arguments) as written.
    fn parse_custom_type(&mut self) -> Result<DataType, ParseError> {
        let start = self.current.span.start;
        self.advance();
        if self.check(&TokenKind::LeftParen) {
            let mut depth = 0usize;
            loop {
                match &self.current.kind {
                    TokenKind::LeftParen => depth += 1,
                    TokenKind::RightParen => depth -= 1,
                    TokenKind::Eof => return Err(self.error_expected("')'")),
                    _ => {}
                }
                self.advance();
                if depth == 0 {
                    break;
                }
            }
        }
        let text = self
            .input
            .get(start..self.previous.span.end)
            .unwrap_or_default();
        Ok(DataType::Custom(String::from(text)))
    }

    /// Parses `[(n)]`.
    fn parse_optional_length(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.consume(&TokenKind::LeftParen) {
            return Ok(None);
        }
        let length = self.expect_u32()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(length))
    }

    /// Parses `(n)`.
    fn parse_required_length(&mut self) -> Result<u32, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let length = self.expect_u32()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(length)
    }

    /// Parses `[(precision[, scale])]`.
    fn parse_optional_precision(&mut self) -> Result<(Option<u32>, Option<u32>), ParseError> {
        if !self.consume(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        let precision = self.expect_u32()?;
        let scale = if self.consume(&TokenKind::Comma) {
            Some(self.expect_u32()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }

    /// Parses `[SIGNED | UNSIGNED] [ZEROFILL]` in any order.
    fn parse_numeric_attributes(&mut self) -> (bool, bool) {
        let mut unsigned = false;
        let mut zerofill = false;
        loop {
            if self.consume_keyword(Keyword::Unsigned) {
                unsigned = true;
            } else if self.consume_keyword(Keyword::Zerofill) {
                zerofill = true;
            } else if !self.consume_keyword(Keyword::Signed) {
                break;
            }
        }
        (unsigned, zerofill)
    }

    /// Parses `('a', 'b', ...)` for ENUM and SET.
    fn parse_value_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut values = vec![self.expect_string()?];
        while self.consume(&TokenKind::Comma) {
            values.push(self.expect_string()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(values)
    }
}

const fn integer_size(kw: Keyword) -> Option<IntegerSize> {
    match kw {
        Keyword::Tinyint => Some(IntegerSize::Tiny),
        Keyword::Smallint => Some(IntegerSize::Small),
        Keyword::Mediumint => Some(IntegerSize::Medium),
        Keyword::Int | Keyword::Integer => Some(IntegerSize::Int),
        Keyword::Bigint => Some(IntegerSize::Big),
        _ => None,
    }
}

const fn geometry_kind(kw: Keyword) -> Option<GeometryKind> {
    match kw {
        Keyword::Geometry => Some(GeometryKind::Geometry),
        Keyword::Point => Some(GeometryKind::Point),
        Keyword::Linestring => Some(GeometryKind::LineString),
        Keyword::Polygon => Some(GeometryKind::Polygon),
        Keyword::Multipoint => Some(GeometryKind::MultiPoint),
        Keyword::Multilinestring => Some(GeometryKind::MultiLineString),
        Keyword::Multipolygon => Some(GeometryKind::MultiPolygon),
        Keyword::Geometrycollection => Some(GeometryKind::GeometryCollection),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_type(sql: &str) -> DataType {
        Parser::new(sql).parse_data_type().unwrap()
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(
            data_type("INT(11) UNSIGNED ZEROFILL"),
            DataType::Integer {
                size: IntegerSize::Int,
                width: Some(11),
                unsigned: true,
                zerofill: true,
            }
        );
        assert_eq!(data_type("integer").to_string(), "INT");
        assert_eq!(data_type("BIGINT SIGNED").to_string(), "BIGINT");
    }

    #[test]
    fn test_fixed_and_floating_point() {
        assert_eq!(data_type("NUMERIC(10,2)").to_string(), "DECIMAL(10, 2)");
        assert_eq!(data_type("DOUBLE PRECISION").to_string(), "DOUBLE");
        assert_eq!(data_type("FLOAT(7, 3) UNSIGNED").to_string(), "FLOAT(7, 3) UNSIGNED");
    }

    #[test]
    fn test_string_types() {
        assert_eq!(data_type("VARCHAR(255)"), DataType::Varchar(255));
        assert_eq!(data_type("CHARACTER VARYING(10)"), DataType::Varchar(10));
        assert_eq!(data_type("CHAR"), DataType::Char(None));
        assert_eq!(data_type("TEXT(100)"), DataType::Text(Some(100)));
        assert_eq!(
            data_type("ENUM('small', 'large')"),
            DataType::Enum(vec![String::from("small"), String::from("large")])
        );
        assert!(Parser::new("VARCHAR").parse_data_type().is_err());
    }

    #[test]
    fn test_temporal_types() {
        assert_eq!(data_type("DATETIME(6)"), DataType::Datetime(Some(6)));
        assert_eq!(data_type("YEAR(4)"), DataType::Year);
        assert_eq!(data_type("TIME"), DataType::Time(None));
    }

    #[test]
    fn test_spatial_and_json() {
        assert_eq!(data_type("POINT"), DataType::Geometry(GeometryKind::Point));
        assert_eq!(data_type("JSON"), DataType::Json);
    }

    #[test]
    fn test_custom_type_keeps_text() {
        assert_eq!(
            data_type("VECTOR(3)"),
            DataType::Custom(String::from("VECTOR(3)"))
        );
        assert_eq!(data_type("uuid"), DataType::Custom(String::from("uuid")));
    }

    #[test]
    fn test_length_out_of_range() {
        let err = Parser::new("VARCHAR(99999999999)")
            .parse_data_type()
            .unwrap_err();
        assert!(err.message.starts_with("Number out of range"));
    }
}
