//! Expression parsing.

use super::error::ParseError;
use super::parser::Parser;
use super::pratt::{
    BETWEEN_BP, BIT_EXPR_BP, COMPARISON_BP, double_pipe_binding_power, infix_binding_power,
    prefix_binding_power, token_to_binary_op, token_to_unary_op,
};
use crate::ast::{
    ColumnRef, ConvertTarget, DataType, Expr, FrameBound, FrameUnits, FunctionCall, IntervalUnit,
    Literal, MatchMode, ObjectName, Quantifier, TrimSide, TruthValue, VariableScope, WindowFrame,
    WindowOver, WindowSpec,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a full expression.
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expression(0)
    }

    /// Parses an expression using Pratt parsing.
    pub(super) fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        self.nested(|parser| parser.parse_expression_at(min_bp))
    }

    fn parse_expression_at(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let Some((l_bp, r_bp)) = self.current_infix_binding_power() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            lhs = self.parse_infix(lhs, r_bp)?;
        }

        Ok(lhs)
    }

    /// Parses a comma-separated list of expressions.
    pub(super) fn parse_expression_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.consume(&TokenKind::Comma) {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    /// Binding power of the current token as an infix operator.
    fn current_infix_binding_power(&mut self) -> Option<(u8, u8)> {
        if self.check_keyword(Keyword::Not) {
            // NOT IN / NOT LIKE / NOT BETWEEN / NOT REGEXP
            return match self.peek() {
                TokenKind::Keyword(Keyword::In | Keyword::Like | Keyword::Regexp | Keyword::Rlike) => {
                    Some(COMPARISON_BP)
                }
                TokenKind::Keyword(Keyword::Between) => Some(BETWEEN_BP),
                _ => None,
            };
        }
        if self.check(&TokenKind::DoublePipe) {
            return Some(double_pipe_binding_power(self.options.sql_mode));
        }
        if self.check_word("SOUNDS") {
            return matches!(self.peek(), TokenKind::Keyword(Keyword::Like))
                .then_some(COMPARISON_BP);
        }
        infix_binding_power(&self.current.kind)
    }

    /// Parses the operator at the current token and its right operand.
    fn parse_infix(&mut self, lhs: Expr, r_bp: u8) -> Result<Expr, ParseError> {
        let negated = self.consume_keyword(Keyword::Not);

        match &self.current.kind {
            TokenKind::Keyword(Keyword::Is) => {
                self.advance();
                let negated = self.consume_keyword(Keyword::Not);
                let value = match &self.current.kind {
                    TokenKind::Keyword(Keyword::Null) => None,
                    TokenKind::Keyword(Keyword::True) => Some(TruthValue::True),
                    TokenKind::Keyword(Keyword::False) => Some(TruthValue::False),
                    TokenKind::Keyword(Keyword::Unknown) => Some(TruthValue::Unknown),
                    _ => return Err(self.error_expected("NULL, TRUE, FALSE or UNKNOWN")),
                };
                self.advance();
                Ok(match value {
                    None => Expr::IsNull {
                        expr: Box::new(lhs),
                        negated,
                    },
                    Some(value) => Expr::IsTruth {
                        expr: Box::new(lhs),
                        value,
                        negated,
                    },
                })
            }
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                if self.current.kind.starts_query() {
                    let subquery = self.parse_query()?;
                    self.expect(&TokenKind::RightParen)?;
                    return Ok(Expr::InSubquery {
                        expr: Box::new(lhs),
                        subquery: Box::new(subquery),
                        negated,
                    });
                }
                let list = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::InList {
                    expr: Box::new(lhs),
                    list,
                    negated,
                })
            }
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_expression(BIT_EXPR_BP)?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression(BIT_EXPR_BP)?;
                Ok(Expr::Between {
                    expr: Box::new(lhs),
                    low: Box::new(low),
                    high: Box::new(high),
                    negated,
                })
            }
            TokenKind::Keyword(Keyword::Like) => {
                self.advance();
                let pattern = self.parse_expression(r_bp)?;
                let escape = if self.consume_keyword(Keyword::Escape) {
                    Some(Box::new(self.parse_expression(r_bp)?))
                } else {
                    None
                };
                Ok(Expr::Like {
                    expr: Box::new(lhs),
                    pattern: Box::new(pattern),
                    escape,
                    negated,
                })
            }
            TokenKind::Keyword(Keyword::Regexp | Keyword::Rlike) => {
                self.advance();
                let pattern = self.parse_expression(r_bp)?;
                Ok(Expr::Regexp {
                    expr: Box::new(lhs),
                    pattern: Box::new(pattern),
                    negated,
                })
            }
            _ if negated => Err(self.error_expected("IN, LIKE, BETWEEN or REGEXP")),
            TokenKind::Identifier(word) if word.eq_ignore_ascii_case("SOUNDS") => {
                self.advance();
                self.expect_keyword(Keyword::Like)?;
                let other = self.parse_expression(r_bp)?;
                Ok(Expr::SoundsLike {
                    expr: Box::new(lhs),
                    other: Box::new(other),
                })
            }
            TokenKind::Keyword(Keyword::Member) => {
                self.advance();
                self.expect_keyword(Keyword::Of)?;
                self.expect(&TokenKind::LeftParen)?;
                let array = self.parse_expr()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::MemberOf {
                    expr: Box::new(lhs),
                    array: Box::new(array),
                })
            }
            TokenKind::Keyword(Keyword::Collate) => {
                self.advance();
                let collation = self.expect_name_or_string()?;
                Ok(Expr::Collate {
                    expr: Box::new(lhs),
                    collation,
                })
            }
            TokenKind::Arrow | TokenKind::LongArrow => {
                let unquote = self.check(&TokenKind::LongArrow);
                self.advance();
                let path = self.expect_string()?;
                Ok(Expr::JsonExtract {
                    expr: Box::new(lhs),
                    path: Box::new(Expr::string(path)),
                    unquote,
                })
            }
            TokenKind::Assign => {
                let Expr::UserVariable(variable) = lhs else {
                    return Err(ParseError::new(
                        "Only user variables can be assigned with :=",
                        self.current.span,
                    ));
                };
                self.advance();
                let value = self.parse_expression(r_bp)?;
                Ok(Expr::Assign {
                    variable,
                    value: Box::new(value),
                })
            }
            kind => {
                let Some(op) = token_to_binary_op(kind, self.options.sql_mode) else {
                    return Err(self.error_expected("operator"));
                };
                self.advance();
                if op.is_comparison() {
                    if let Some(quantifier) = self.parse_quantifier() {
                        self.expect(&TokenKind::LeftParen)?;
                        let subquery = self.parse_query()?;
                        self.expect(&TokenKind::RightParen)?;
                        return Ok(Expr::Quantified {
                            expr: Box::new(lhs),
                            op,
                            quantifier,
                            subquery: Box::new(subquery),
                        });
                    }
                }
                let rhs = self.parse_expression(r_bp)?;
                Ok(lhs.binary(op, rhs))
            }
        }
    }

    /// Consumes `ANY`, `SOME` or `ALL` when a parenthesis follows.
    fn parse_quantifier(&mut self) -> Option<Quantifier> {
        let quantifier = if self.check_keyword(Keyword::All) {
            Quantifier::All
        } else if self.check_word("ANY") {
            Quantifier::Any
        } else if self.check_word("SOME") {
            Quantifier::Some
        } else {
            return None;
        };
        if !matches!(self.peek(), TokenKind::LeftParen) {
            return None;
        }
        self.advance();
        Some(quantifier)
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if let Some(bp) = prefix_binding_power(&self.current.kind, self.options.sql_mode) {
            if let Some(op) = token_to_unary_op(&self.current.kind) {
                self.advance();
                let operand = self.parse_expression(bp)?;
                return Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                });
            }
        }

        self.parse_primary()
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current.clone();

        match &token.kind {
            // Literals
            TokenKind::Integer(n) => {
                self.advance();
                Ok(Expr::integer(*n))
            }
            TokenKind::Decimal(d) => {
                self.advance();
                Ok(Expr::Literal(Literal::Decimal(d.clone())))
            }
            TokenKind::Float(v) => {
                self.advance();
                Ok(Expr::Literal(Literal::Float(*v)))
            }
            TokenKind::String(s) => {
                let mut value = s.clone();
                self.advance();
                // Adjacent strings are concatenated: 'a' 'b' is 'ab'.
                while let TokenKind::String(next) = &self.current.kind {
                    value.push_str(next);
                    self.advance();
                }
                Ok(Expr::Literal(Literal::String(value)))
            }
            TokenKind::NationalString(s) => {
                self.advance();
                Ok(Expr::Literal(Literal::NationalString(s.clone())))
            }
            TokenKind::HexString(digits) => {
                self.advance();
                Ok(Expr::Literal(Literal::Hex(digits.clone())))
            }
            TokenKind::BitString(digits) => {
                self.advance();
                Ok(Expr::Literal(Literal::Bit(digits.clone())))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(false)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::null())
            }

            // Parameter placeholders
            TokenKind::Question => {
                self.advance();
                self.param_counter += 1;
                Ok(Expr::Parameter {
                    position: self.param_counter,
                })
            }

            // Variables
            TokenKind::UserVariable(name) => {
                self.advance();
                Ok(Expr::UserVariable(name.clone()))
            }
            TokenKind::SystemVariable(raw) => {
                self.advance();
                let (scope, name) = split_system_variable(raw);
                Ok(Expr::SystemVariable { scope, name })
            }

            // Wildcard
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Wildcard { qualifier: None })
            }

            TokenKind::LeftParen => self.parse_parenthesized_expr(),

            TokenKind::Keyword(Keyword::Case) => self.parse_case_expr(),
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let subquery = self.parse_query()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Exists(Box::new(subquery)))
            }
            TokenKind::Keyword(Keyword::Interval) => self.parse_interval_expr(),
            TokenKind::Keyword(Keyword::Match) => self.parse_match_expr(),
            TokenKind::Keyword(Keyword::Convert) => self.parse_convert_expr(),
            TokenKind::Keyword(Keyword::Default) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    return self.parse_function_call(None, String::from("DEFAULT"));
                }
                Ok(Expr::Default)
            }
            TokenKind::Keyword(Keyword::Row) if matches!(self.peek(), TokenKind::LeftParen) => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let items = self.parse_expression_list()?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Row(items))
            }
            TokenKind::Keyword(kw @ (Keyword::Date | Keyword::Time | Keyword::Timestamp))
                if matches!(self.peek(), TokenKind::String(_)) =>
            {
                let kw = *kw;
                self.advance();
                let value = self.expect_string()?;
                Ok(Expr::Literal(match kw {
                    Keyword::Date => Literal::Date(value),
                    Keyword::Time => Literal::Time(value),
                    _ => Literal::Timestamp(value),
                }))
            }
            TokenKind::Keyword(Keyword::Cast) if matches!(self.peek(), TokenKind::LeftParen) => {
                self.parse_cast_expr()
            }
            TokenKind::Keyword(Keyword::Extract) if matches!(self.peek(), TokenKind::LeftParen) => {
                self.parse_extract_expr()
            }
            TokenKind::Keyword(Keyword::Position)
                if matches!(self.peek(), TokenKind::LeftParen) =>
            {
                self.parse_position_expr()
            }

            // Charset introducer: _utf8mb4'text'
            TokenKind::Identifier(name)
                if name.len() > 1
                    && name.starts_with('_')
                    && matches!(
                        self.peek(),
                        TokenKind::String(_) | TokenKind::HexString(_) | TokenKind::BitString(_)
                    ) =>
            {
                let charset = String::from(&name[1..]);
                self.advance();
                let bytes = match &self.current.kind {
                    TokenKind::HexString(digits) => Literal::Hex(digits.clone()),
                    TokenKind::BitString(digits) => Literal::Bit(digits.clone()),
                    _ => {
                        let value = self.expect_string()?;
                        return Ok(Expr::Literal(Literal::IntroducedString { charset, value }));
                    }
                };
                self.advance();
                Ok(Expr::Literal(Literal::IntroducedBytes {
                    charset,
                    bytes: Box::new(bytes),
                }))
            }
            TokenKind::Identifier(name)
                if name.eq_ignore_ascii_case("TRIM")
                    && matches!(self.peek(), TokenKind::LeftParen) =>
            {
                self.parse_trim_expr()
            }
            TokenKind::Identifier(name)
                if is_substring_name(name) && matches!(self.peek(), TokenKind::LeftParen) =>
            {
                let name = name.clone();
                self.parse_substring_expr(name)
            }
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => {
                self.parse_identifier_expr()
            }

            TokenKind::Keyword(kw) => {
                let kw = *kw;
                if is_callable_keyword(kw) && matches!(self.peek(), TokenKind::LeftParen) {
                    self.advance();
                    return self.parse_function_call(None, String::from(kw.as_str()));
                }
                if is_niladic_keyword(kw) {
                    self.advance();
                    return Ok(Expr::Function(FunctionCall::new(kw.as_str(), vec![])));
                }
                if !kw.is_reserved() {
                    return self.parse_identifier_expr();
                }
                Err(self.error_expected("expression"))
            }

            _ => Err(self.error_expected("expression")),
        }
    }

    /// Parses `(expr)`, `(a, b)` or `(subquery)`.
    fn parse_parenthesized_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        if self.current.kind.starts_query() {
            let subquery = self.parse_query()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Subquery(Box::new(subquery)));
        }
        let mut items = self.parse_expression_list()?;
        self.expect(&TokenKind::RightParen)?;
        if items.len() == 1 {
            if let Some(expr) = items.pop() {
                return Ok(Expr::Paren(Box::new(expr)));
            }
        }
        Ok(Expr::Row(items))
    }

    /// Parses a column reference, qualified wildcard or function call that
    /// starts with an identifier.
    fn parse_identifier_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.current.span;
        let first = self.expect_identifier()?;

        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(None, first);
        }
        if !self.consume(&TokenKind::Dot) {
            return Ok(Expr::Column(ColumnRef {
                qualifier: None,
                name: first,
                span: start,
            }));
        }

        if self.consume(&TokenKind::Star) {
            return Ok(Expr::Wildcard {
                qualifier: Some(ObjectName::new(first)),
            });
        }
        let second = self.expect_qualified_part()?;
        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(Some(first), second);
        }
        if !self.consume(&TokenKind::Dot) {
            return Ok(Expr::Column(ColumnRef {
                qualifier: Some(ObjectName::new(first)),
                name: second,
                span: start.merge(self.previous.span),
            }));
        }

        if self.consume(&TokenKind::Star) {
            return Ok(Expr::Wildcard {
                qualifier: Some(ObjectName::qualified(first, second)),
            });
        }
        let third = self.expect_qualified_part()?;
        Ok(Expr::Column(ColumnRef {
            qualifier: Some(ObjectName::qualified(first, second)),
            name: third,
            span: start.merge(self.previous.span),
        }))
    }

    /// Parses `[[db.]tbl.]col`.
    pub(super) fn parse_column_ref(&mut self) -> Result<ColumnRef, ParseError> {
        let start = self.current.span;
        let first = self.expect_identifier()?;
        if !self.consume(&TokenKind::Dot) {
            return Ok(ColumnRef {
                qualifier: None,
                name: first,
                span: start,
            });
        }
        let second = self.expect_qualified_part()?;
        if !self.consume(&TokenKind::Dot) {
            return Ok(ColumnRef {
                qualifier: Some(ObjectName::new(first)),
                name: second,
                span: start.merge(self.previous.span),
            });
        }
        let third = self.expect_qualified_part()?;
        Ok(ColumnRef {
            qualifier: Some(ObjectName::qualified(first, second)),
            name: third,
            span: start.merge(self.previous.span),
        })
    }

    /// Parses the argument list and trailing `OVER` of a function call.
    fn parse_function_call(
        &mut self,
        schema: Option<String>,
        name: String,
    ) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let is_group_concat = schema.is_none() && name.eq_ignore_ascii_case("GROUP_CONCAT");
        let mut call = FunctionCall::new(name, vec![]);
        call.schema = schema;

        if !self.check(&TokenKind::RightParen) {
            if self.consume_keyword(Keyword::Distinct) {
                call.distinct = true;
            } else {
                self.consume_keyword(Keyword::All);
            }
            call.args = self.parse_expression_list()?;
            if is_group_concat {
                if self.consume_keyword(Keyword::Order) {
                    self.expect_keyword(Keyword::By)?;
                    call.order_by = self.parse_order_by_list()?;
                }
                if self.consume_keyword(Keyword::Separator) {
                    call.separator = Some(self.expect_string()?);
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;

        if self.consume_keyword(Keyword::Over) {
            call.over = Some(if self.check(&TokenKind::LeftParen) {
                WindowOver::Spec(self.parse_window_spec()?)
            } else {
                WindowOver::Named(self.expect_identifier()?)
            });
        }

        Ok(Expr::Function(call))
    }

    /// Parses `( [base] [PARTITION BY ...] [ORDER BY ...] [frame] )`.
    pub(super) fn parse_window_spec(&mut self) -> Result<WindowSpec, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut spec = WindowSpec::default();

        if let Some(base) = self.current_identifier() {
            self.advance();
            spec.base = Some(base);
        }
        if self.consume_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            spec.partition_by = self.parse_expression_list()?;
        }
        if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            spec.order_by = self.parse_order_by_list()?;
        }
        let units = if self.consume_keyword(Keyword::Rows) {
            Some(FrameUnits::Rows)
        } else if self.consume_keyword(Keyword::Range) {
            Some(FrameUnits::Range)
        } else {
            None
        };
        if let Some(units) = units {
            spec.frame = Some(if self.consume_keyword(Keyword::Between) {
                let start = self.parse_frame_bound()?;
                self.expect_keyword(Keyword::And)?;
                let end = self.parse_frame_bound()?;
                WindowFrame {
                    units,
                    start,
                    end: Some(end),
                }
            } else {
                WindowFrame {
                    units,
                    start: self.parse_frame_bound()?,
                    end: None,
                }
            });
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(spec)
    }

    fn parse_frame_bound(&mut self) -> Result<FrameBound, ParseError> {
        if self.consume_keyword(Keyword::Current) {
            self.expect_keyword(Keyword::Row)?;
            return Ok(FrameBound::CurrentRow);
        }
        if self.consume_keyword(Keyword::Unbounded) {
            if self.consume_keyword(Keyword::Preceding) {
                return Ok(FrameBound::UnboundedPreceding);
            }
            self.expect_keyword(Keyword::Following)?;
            return Ok(FrameBound::UnboundedFollowing);
        }
        let offset = Box::new(self.parse_expression(BIT_EXPR_BP)?);
        if self.consume_keyword(Keyword::Preceding) {
            return Ok(FrameBound::Preceding(offset));
        }
        self.expect_keyword(Keyword::Following)?;
        Ok(FrameBound::Following(offset))
    }

    fn parse_case_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;

        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut when_clauses = vec![];
        while self.consume_keyword(Keyword::When) {
            let condition = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expr()?;
            when_clauses.push((condition, result));
        }
        if when_clauses.is_empty() {
            return Err(self.error_expected("WHEN"));
        }

        let else_clause = if self.consume_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };

        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    fn parse_cast_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let data_type = self.parse_cast_type()?;
        let charset = self.parse_cast_charset(&data_type)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            data_type,
            charset,
        })
    }

    /// Parses `CHARACTER SET cs` / `CHARSET cs` after a string cast type.
    fn parse_cast_charset(&mut self, data_type: &DataType) -> Result<Option<String>, ParseError> {
        if !data_type.is_string() {
            return Ok(None);
        }
        if self.consume_keyword(Keyword::Character) {
            self.expect_keyword(Keyword::Set)?;
        } else if !self.consume_keyword(Keyword::Charset) {
            return Ok(None);
        }
        self.expect_name_or_string().map(Some)
    }

    /// Parses the target type of CAST and CONVERT.
    fn parse_cast_type(&mut self) -> Result<DataType, ParseError> {
        if self.consume_keyword(Keyword::Signed) {
            if !self.consume_keyword(Keyword::Int) {
                self.consume_keyword(Keyword::Integer);
            }
            return Ok(DataType::Signed);
        }
        if self.consume_keyword(Keyword::Unsigned) {
            if !self.consume_keyword(Keyword::Int) {
                self.consume_keyword(Keyword::Integer);
            }
            return Ok(DataType::Unsigned);
        }
        self.parse_data_type()
    }

    fn parse_convert_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Convert)?;
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;
        let target = if self.consume_keyword(Keyword::Using) {
            ConvertTarget::Charset(self.expect_name_or_string()?)
        } else {
            self.expect(&TokenKind::Comma)?;
            let data_type = self.parse_cast_type()?;
            let charset = self.parse_cast_charset(&data_type)?;
            ConvertTarget::Type { data_type, charset }
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Convert {
            expr: Box::new(expr),
            target,
        })
    }

    fn parse_extract_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Extract)?;
        self.expect(&TokenKind::LeftParen)?;
        let unit = self.parse_interval_unit()?;
        self.expect_keyword(Keyword::From)?;
        let expr = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Extract {
            unit,
            expr: Box::new(expr),
        })
    }

    fn parse_position_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Position)?;
        self.expect(&TokenKind::LeftParen)?;
        // Stop below IN so that it is read as the separator.
        let needle = self.parse_expression(BIT_EXPR_BP)?;
        self.expect_keyword(Keyword::In)?;
        let haystack = self.parse_expr()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Position {
            needle: Box::new(needle),
            haystack: Box::new(haystack),
        })
    }

    /// Parses `SUBSTRING(expr FROM pos [FOR len])`; the comma form stays a
    /// plain function call.
    fn parse_substring_expr(&mut self, name: String) -> Result<Expr, ParseError> {
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.parse_expr()?;

        if self.consume_keyword(Keyword::From) {
            let from = self.parse_expr()?;
            let len = if self.consume_keyword(Keyword::For) {
                Some(Box::new(self.parse_expr()?))
            } else {
                None
            };
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::Substring {
                expr: Box::new(expr),
                from: Box::new(from),
                len,
            });
        }

        let mut args = vec![expr];
        while self.consume(&TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Function(FunctionCall::new(name, args)))
    }

    fn parse_trim_expr(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        self.expect(&TokenKind::LeftParen)?;

        let side = if self.consume_keyword(Keyword::Both) {
            Some(TrimSide::Both)
        } else if self.consume_keyword(Keyword::Leading) {
            Some(TrimSide::Leading)
        } else if self.consume_keyword(Keyword::Trailing) {
            Some(TrimSide::Trailing)
        } else {
            None
        };

        let (what, expr) = if side.is_some() && self.consume_keyword(Keyword::From) {
            (None, self.parse_expr()?)
        } else {
            let first = self.parse_expr()?;
            if self.consume_keyword(Keyword::From) {
                (Some(Box::new(first)), self.parse_expr()?)
            } else if side.is_some() {
                return Err(self.error_expected("FROM"));
            } else {
                (None, first)
            }
        };

        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Trim {
            side,
            what,
            expr: Box::new(expr),
        })
    }

    /// Parses `INTERVAL expr unit`, or the `INTERVAL(n, n1, ...)` function.
    fn parse_interval_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Interval)?;

        let value = if self.check(&TokenKind::LeftParen) {
            self.advance();
            let mut items = self.parse_expression_list()?;
            self.expect(&TokenKind::RightParen)?;
            let is_unit = self.current.as_keyword().and_then(interval_unit).is_some();
            if items.len() > 1 || !is_unit {
                return Ok(Expr::Function(FunctionCall::new("INTERVAL", items)));
            }
            match items.pop() {
                Some(expr) => Expr::Paren(Box::new(expr)),
                None => return Err(self.error_expected("expression")),
            }
        } else {
            self.parse_expr()?
        };

        let unit = self.parse_interval_unit()?;
        Ok(Expr::Interval {
            value: Box::new(value),
            unit,
        })
    }

    /// Parses an interval unit keyword (`DAY`, `HOUR_MINUTE`, ...).
    pub(super) fn parse_interval_unit(&mut self) -> Result<IntervalUnit, ParseError> {
        match self.current.as_keyword().and_then(interval_unit) {
            Some(unit) => {
                self.advance();
                Ok(unit)
            }
            None => Err(self.error_expected("interval unit")),
        }
    }

    /// Parses `MATCH (cols) AGAINST (expr [modifier])`.
    fn parse_match_expr(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Match)?;
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = vec![self.parse_column_ref()?];
        while self.consume(&TokenKind::Comma) {
            columns.push(self.parse_column_ref()?);
        }
        self.expect(&TokenKind::RightParen)?;

        self.expect_keyword(Keyword::Against)?;
        self.expect(&TokenKind::LeftParen)?;
        let against = self.parse_expression(BIT_EXPR_BP)?;
        let mode = if self.consume_keyword(Keyword::In) {
            if self.consume_keyword(Keyword::Boolean) {
                self.expect_keyword(Keyword::Mode)?;
                Some(MatchMode::Boolean)
            } else {
                self.expect_keyword(Keyword::Natural)?;
                self.expect_keyword(Keyword::Language)?;
                self.expect_keyword(Keyword::Mode)?;
                if self.consume_keyword(Keyword::With) {
                    self.expect_keyword(Keyword::Query)?;
                    self.expect_keyword(Keyword::Expansion)?;
                    Some(MatchMode::NaturalLanguageWithQueryExpansion)
                } else {
                    Some(MatchMode::NaturalLanguage)
                }
            }
        } else if self.consume_keyword(Keyword::With) {
            self.expect_keyword(Keyword::Query)?;
            self.expect_keyword(Keyword::Expansion)?;
            Some(MatchMode::WithQueryExpansion)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;

        Ok(Expr::MatchAgainst {
            columns,
            against: Box::new(against),
            mode,
        })
    }
}

/// Splits `@@[scope.]name` text into its scope and name.
pub(super) fn split_system_variable(raw: &str) -> (Option<VariableScope>, String) {
    if let Some((prefix, name)) = raw.split_once('.') {
        if let Some(scope) = VariableScope::from_name(prefix) {
            return (Some(scope), String::from(name));
        }
    }
    (None, String::from(raw))
}

/// Maps a keyword to an interval unit.
pub(super) const fn interval_unit(kw: Keyword) -> Option<IntervalUnit> {
    match kw {
        Keyword::Microsecond => Some(IntervalUnit::Microsecond),
        Keyword::Second => Some(IntervalUnit::Second),
        Keyword::Minute => Some(IntervalUnit::Minute),
        Keyword::Hour => Some(IntervalUnit::Hour),
        Keyword::Day => Some(IntervalUnit::Day),
        Keyword::Week => Some(IntervalUnit::Week),
        Keyword::Month => Some(IntervalUnit::Month),
        Keyword::Quarter => Some(IntervalUnit::Quarter),
        Keyword::Year => Some(IntervalUnit::Year),
        Keyword::SecondMicrosecond => Some(IntervalUnit::SecondMicrosecond),
        Keyword::MinuteMicrosecond => Some(IntervalUnit::MinuteMicrosecond),
        Keyword::MinuteSecond => Some(IntervalUnit::MinuteSecond),
        Keyword::HourMicrosecond => Some(IntervalUnit::HourMicrosecond),
        Keyword::HourSecond => Some(IntervalUnit::HourSecond),
        Keyword::HourMinute => Some(IntervalUnit::HourMinute),
        Keyword::DayMicrosecond => Some(IntervalUnit::DayMicrosecond),
        Keyword::DaySecond => Some(IntervalUnit::DaySecond),
        Keyword::DayMinute => Some(IntervalUnit::DayMinute),
        Keyword::DayHour => Some(IntervalUnit::DayHour),
        Keyword::YearMonth => Some(IntervalUnit::YearMonth),
        _ => None,
    }
}

/// Keywords that may be used as function names.
const fn is_callable_keyword(kw: Keyword) -> bool {
    !kw.is_reserved()
        || matches!(
            kw,
            Keyword::If
                | Keyword::Left
                | Keyword::Right
                | Keyword::Replace
                | Keyword::Insert
                | Keyword::Mod
                | Keyword::Char
                | Keyword::Database
                | Keyword::Schema
                | Keyword::Values
                | Keyword::CurrentDate
                | Keyword::CurrentTime
                | Keyword::CurrentTimestamp
                | Keyword::CurrentUser
        )
}

fn is_substring_name(name: &str) -> bool {
    ["SUBSTRING", "SUBSTR", "MID"]
        .iter()
        .any(|candidate| name.eq_ignore_ascii_case(candidate))
}

/// Functions MySQL accepts without parentheses.
const fn is_niladic_keyword(kw: Keyword) -> bool {
    matches!(
        kw,
        Keyword::CurrentDate
            | Keyword::CurrentTime
            | Keyword::CurrentTimestamp
            | Keyword::CurrentUser
    )
}
