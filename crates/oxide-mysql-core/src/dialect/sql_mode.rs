//! MySQL `sql_mode` flags that change how statements are lexed and parsed.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};
use core::str::FromStr;

/// A set of `sql_mode` flags relevant to parsing.
///
/// Modes that only affect execution (e.g. `STRICT_TRANS_TABLES`) are
/// accepted by [`SqlMode::from_str`] and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SqlMode(u8);

impl SqlMode {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// `"..."` quotes identifiers instead of strings.
    pub const ANSI_QUOTES: Self = Self(1);
    /// `||` is string concatenation instead of logical OR.
    pub const PIPES_AS_CONCAT: Self = Self(1 << 1);
    /// Prefix `NOT` binds as tightly as `!`.
    pub const HIGH_NOT_PRECEDENCE: Self = Self(1 << 2);
    /// Backslash is an ordinary character inside strings.
    pub const NO_BACKSLASH_ESCAPES: Self = Self(1 << 3);
    /// Spaces are permitted between a function name and `(`.
    ///
    /// The parser always tolerates such spaces; the flag is tracked so that
    /// mode strings survive a round trip.
    pub const IGNORE_SPACE: Self = Self(1 << 4);

    const NAMES: [(Self, &'static str); 5] = [
        (Self::ANSI_QUOTES, "ANSI_QUOTES"),
        (Self::PIPES_AS_CONCAT, "PIPES_AS_CONCAT"),
        (Self::HIGH_NOT_PRECEDENCE, "HIGH_NOT_PRECEDENCE"),
        (Self::NO_BACKSLASH_ESCAPES, "NO_BACKSLASH_ESCAPES"),
        (Self::IGNORE_SPACE, "IGNORE_SPACE"),
    ];

    /// Returns true if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of both flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Parses a single mode name. Combination modes expand to their parts.
    fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "ANSI_QUOTES" => Self::ANSI_QUOTES,
            "PIPES_AS_CONCAT" => Self::PIPES_AS_CONCAT,
            "HIGH_NOT_PRECEDENCE" => Self::HIGH_NOT_PRECEDENCE,
            "NO_BACKSLASH_ESCAPES" => Self::NO_BACKSLASH_ESCAPES,
            "IGNORE_SPACE" => Self::IGNORE_SPACE,
            "ANSI" | "DB2" | "MAXDB" | "MSSQL" | "ORACLE" | "POSTGRESQL" => Self::ANSI_QUOTES
                .union(Self::PIPES_AS_CONCAT)
                .union(Self::IGNORE_SPACE),
            _ => Self::NONE,
        }
    }
}

impl BitOr for SqlMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for SqlMode {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl FromStr for SqlMode {
    type Err = core::convert::Infallible;

    /// Parses a comma-separated `sql_mode` value such as
    /// `"ANSI_QUOTES,STRICT_TRANS_TABLES"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .fold(Self::NONE, |mode, name| mode | Self::from_name(name)))
    }
}

impl fmt::Display for SqlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_modes() {
        let mode: SqlMode = "ansi_quotes".parse().unwrap();
        assert!(mode.contains(SqlMode::ANSI_QUOTES));
        assert!(!mode.contains(SqlMode::PIPES_AS_CONCAT));
    }

    #[test]
    fn test_parse_ignores_unknown_modes() {
        let mode: SqlMode = "STRICT_TRANS_TABLES, PIPES_AS_CONCAT,,NO_ZERO_DATE"
            .parse()
            .unwrap();
        assert_eq!(mode, SqlMode::PIPES_AS_CONCAT);
    }

    #[test]
    fn test_ansi_expands() {
        let mode: SqlMode = "ANSI".parse().unwrap();
        assert!(mode.contains(SqlMode::ANSI_QUOTES | SqlMode::PIPES_AS_CONCAT));
        assert!(mode.contains(SqlMode::IGNORE_SPACE));
        assert!(!mode.contains(SqlMode::HIGH_NOT_PRECEDENCE));
    }

    #[test]
    fn test_display_round_trips() {
        let mode = SqlMode::HIGH_NOT_PRECEDENCE | SqlMode::ANSI_QUOTES;
        assert_eq!(mode.to_string(), "ANSI_QUOTES,HIGH_NOT_PRECEDENCE");
        assert_eq!(mode.to_string().parse::<SqlMode>().unwrap(), mode);
        assert_eq!(SqlMode::NONE.to_string(), "");
        assert!(SqlMode::default().is_empty());
    }
}
