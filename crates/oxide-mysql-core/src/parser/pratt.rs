//! Pratt expression parser for MySQL operator precedence.
//!
//! Binding powers, loosest first:
//!
//! | bp     | operators                                              |
//! |--------|--------------------------------------------------------|
//! | 2, 1   | `:=` (right associative)                                |
//! | 3, 4   | `OR`, `\|\|`                                            |
//! | 5, 6   | `XOR`                                                   |
//! | 7, 8   | `AND`, `&&`                                             |
//! | 9      | prefix `NOT`                                            |
//! | 11, 12 | `BETWEEN`                                               |
//! | 13, 14 | comparisons, `IS`, `LIKE`, `REGEXP`, `IN`, `MEMBER OF`  |
//! | 15, 16 | `\|`                                                    |
//! | 17, 18 | `&`                                                     |
//! | 19, 20 | `<<`, `>>`                                              |
//! | 21, 22 | `+`, `-`                                                |
//! | 23, 24 | `*`, `/`, `DIV`, `%`, `MOD`                             |
//! | 25, 26 | `^`                                                     |
//! | 27     | prefix `-`, `+`, `~`                                    |
//! | 29     | prefix `!`                                              |
//! | 31     | `BINARY`, `COLLATE`                                     |
//! | 33     | `->`, `->>`                                             |

use crate::ast::{BinaryOp, UnaryOp};
use crate::dialect::SqlMode;
use crate::lexer::{Keyword, TokenKind};

/// Binding power of `BETWEEN`; its bounds are parsed one level tighter.
pub const BETWEEN_BP: (u8, u8) = (11, 12);

/// Binding power of the comparison-like predicates.
pub const COMPARISON_BP: (u8, u8) = (13, 14);

/// Minimum binding power of a bit expression (`|` and tighter).
pub const BIT_EXPR_BP: u8 = 15;

/// Binding power of postfix `COLLATE`.
pub const COLLATE_BP: u8 = 31;

/// Returns the prefix binding power for a token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind, sql_mode: SqlMode) -> Option<u8> {
    match kind {
        TokenKind::Keyword(Keyword::Not) => {
            if sql_mode.contains(SqlMode::HIGH_NOT_PRECEDENCE) {
                Some(29)
            } else {
                Some(9)
            }
        }
        TokenKind::Minus | TokenKind::Plus | TokenKind::BitNot => Some(27),
        TokenKind::Bang => Some(29),
        TokenKind::Keyword(Keyword::Binary) => Some(31),
        _ => None,
    }
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
/// - Right associative: left_bp > right_bp
///
/// Returns `None` if the token is not an infix operator. `NOT` is handled by
/// the parser, which needs to look at the following keyword.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Assign => Some((2, 1)),

        TokenKind::Keyword(Keyword::Or) | TokenKind::DoublePipe => Some((3, 4)),

        TokenKind::Keyword(Keyword::Xor) => Some((5, 6)),

        TokenKind::Keyword(Keyword::And) | TokenKind::DoubleAmpersand => Some((7, 8)),

        TokenKind::Keyword(Keyword::Between) => Some(BETWEEN_BP),

        TokenKind::Eq
        | TokenKind::NullSafeEq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(
            Keyword::Is
            | Keyword::Like
            | Keyword::Regexp
            | Keyword::Rlike
            | Keyword::In
            | Keyword::Member,
        ) => Some(COMPARISON_BP),

        TokenKind::BitOr => Some((15, 16)),

        TokenKind::BitAnd => Some((17, 18)),

        TokenKind::LeftShift | TokenKind::RightShift => Some((19, 20)),

        TokenKind::Plus | TokenKind::Minus => Some((21, 22)),

        TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::Keyword(Keyword::Div | Keyword::Mod) => Some((23, 24)),

        TokenKind::Caret => Some((25, 26)),

        TokenKind::Keyword(Keyword::Collate) => Some((COLLATE_BP, COLLATE_BP + 1)),

        TokenKind::Arrow | TokenKind::LongArrow => Some((33, 34)),

        _ => None,
    }
}

/// Binding power of `||`, which depends on `PIPES_AS_CONCAT`.
#[must_use]
pub const fn double_pipe_binding_power(sql_mode: SqlMode) -> (u8, u8) {
    if sql_mode.contains(SqlMode::PIPES_AS_CONCAT) {
        // Concatenation sits just above `^`.
        (25, 26)
    } else {
        (3, 4)
    }
}

/// Converts a token to a plain binary operator.
///
/// Predicates with their own syntax (`IS`, `IN`, `LIKE`, ...) are not
/// covered.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind, sql_mode: SqlMode) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Keyword(Keyword::Div) => Some(BinaryOp::IntDiv),
        TokenKind::Percent | TokenKind::Keyword(Keyword::Mod) => Some(BinaryOp::Mod),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NullSafeEq => Some(BinaryOp::NullSafeEq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::Keyword(Keyword::And) | TokenKind::DoubleAmpersand => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        TokenKind::DoublePipe => {
            if sql_mode.contains(SqlMode::PIPES_AS_CONCAT) {
                Some(BinaryOp::Concat)
            } else {
                Some(BinaryOp::Or)
            }
        }
        TokenKind::Keyword(Keyword::Xor) => Some(BinaryOp::Xor),
        TokenKind::BitAnd => Some(BinaryOp::BitAnd),
        TokenKind::BitOr => Some(BinaryOp::BitOr),
        TokenKind::Caret => Some(BinaryOp::BitXor),
        TokenKind::LeftShift => Some(BinaryOp::LeftShift),
        TokenKind::RightShift => Some(BinaryOp::RightShift),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Minus),
        TokenKind::Plus => Some(UnaryOp::Plus),
        TokenKind::Keyword(Keyword::Not) => Some(UnaryOp::Not),
        TokenKind::Bang => Some(UnaryOp::Bang),
        TokenKind::BitNot => Some(UnaryOp::BitNot),
        TokenKind::Keyword(Keyword::Binary) => Some(UnaryOp::Binary),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(kind: &TokenKind) -> (u8, u8) {
        infix_binding_power(kind).unwrap()
    }

    #[test]
    fn test_precedence_ordering() {
        let or = bp(&TokenKind::Keyword(Keyword::Or));
        let xor = bp(&TokenKind::Keyword(Keyword::Xor));
        let and = bp(&TokenKind::Keyword(Keyword::And));
        let eq = bp(&TokenKind::Eq);
        let bit_or = bp(&TokenKind::BitOr);
        let add = bp(&TokenKind::Plus);
        let mul = bp(&TokenKind::Star);
        let xor_bits = bp(&TokenKind::Caret);
        assert!(or.0 < xor.0);
        assert!(xor.0 < and.0);
        assert!(and.0 < eq.0);
        assert!(eq.0 < bit_or.0);
        assert!(bit_or.0 < add.0);
        assert!(add.0 < mul.0);
        assert!(mul.0 < xor_bits.0);
    }

    #[test]
    fn test_not_sits_between_and_and_comparison() {
        let not = prefix_binding_power(&TokenKind::Keyword(Keyword::Not), SqlMode::NONE).unwrap();
        assert!(not > bp(&TokenKind::Keyword(Keyword::And)).1);
        assert!(not < COMPARISON_BP.0);
    }

    #[test]
    fn test_high_not_precedence() {
        let not = TokenKind::Keyword(Keyword::Not);
        let high = prefix_binding_power(&not, SqlMode::HIGH_NOT_PRECEDENCE).unwrap();
        assert_eq!(Some(high), prefix_binding_power(&TokenKind::Bang, SqlMode::NONE));
        assert!(high > COMPARISON_BP.1);
    }

    #[test]
    fn test_associativity() {
        let (left, right) = bp(&TokenKind::Plus);
        assert!(left < right);
        let (left, right) = bp(&TokenKind::Assign);
        assert!(left > right);
    }

    #[test]
    fn test_between_bounds_bind_above_and() {
        assert!(BETWEEN_BP.0 > bp(&TokenKind::Keyword(Keyword::And)).1);
        assert!(BIT_EXPR_BP > COMPARISON_BP.1);
    }

    #[test]
    fn test_double_pipe_depends_on_mode() {
        assert_eq!(
            token_to_binary_op(&TokenKind::DoublePipe, SqlMode::NONE),
            Some(BinaryOp::Or)
        );
        assert_eq!(
            token_to_binary_op(&TokenKind::DoublePipe, SqlMode::PIPES_AS_CONCAT),
            Some(BinaryOp::Concat)
        );
        assert!(double_pipe_binding_power(SqlMode::PIPES_AS_CONCAT).0 > bp(&TokenKind::Star).0);
    }

    #[test]
    fn test_token_to_binary_op() {
        let none = SqlMode::NONE;
        assert_eq!(token_to_binary_op(&TokenKind::Plus, none), Some(BinaryOp::Add));
        assert_eq!(
            token_to_binary_op(&TokenKind::Keyword(Keyword::Div), none),
            Some(BinaryOp::IntDiv)
        );
        assert_eq!(
            token_to_binary_op(&TokenKind::DoubleAmpersand, none),
            Some(BinaryOp::And)
        );
        assert_eq!(token_to_binary_op(&TokenKind::LeftParen, none), None);
    }

    #[test]
    fn test_token_to_unary_op() {
        assert_eq!(token_to_unary_op(&TokenKind::Minus), Some(UnaryOp::Minus));
        assert_eq!(token_to_unary_op(&TokenKind::Bang), Some(UnaryOp::Bang));
        assert_eq!(
            token_to_unary_op(&TokenKind::Keyword(Keyword::Not)),
            Some(UnaryOp::Not)
        );
        assert_eq!(token_to_unary_op(&TokenKind::Star), None);
    }
}
