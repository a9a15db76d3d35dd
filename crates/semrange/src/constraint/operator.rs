//! Operator types for version conditions

use std::fmt;
use std::str::FromStr;

use crate::comparator::Comparator;
use crate::error::{ConstraintFormatError, VersionFormatError};
use crate::version::Version;

/// Comparison operators as written in constraint strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

impl Operator {
    /// Get the canonical string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// Get all accepted spellings, aliases included
    pub fn supported_operators() -> &'static [&'static str] {
        &["=", "==", "!=", "<", "<=", "=<", ">", ">=", "=>"]
    }

    /// Express `operator version` in canonical comparators.
    ///
    /// `<=` and `>` need the smallest larger version, which does not exist for
    /// a release with patch `u64::MAX`.
    pub fn comparators(&self, version: &Version) -> Result<Vec<Comparator>, VersionFormatError> {
        let comparator = match self {
            Operator::Equal => Comparator::equal(version),
            Operator::NotEqual => Comparator::not_equal(version),
            Operator::LessThan => Comparator::less_than(version),
            Operator::LessThanOrEqual => Comparator::less_than(&version.smallest_larger()?),
            Operator::GreaterThan => Comparator::at_least(&version.smallest_larger()?),
            Operator::GreaterThanOrEqual => Comparator::at_least(version),
        };
        Ok(vec![comparator])
    }
}

impl FromStr for Operator {
    type Err = ConstraintFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" | "==" => Ok(Operator::Equal),
            "!=" => Ok(Operator::NotEqual),
            "<" => Ok(Operator::LessThan),
            "<=" | "=<" => Ok(Operator::LessThanOrEqual),
            ">" => Ok(Operator::GreaterThan),
            ">=" | "=>" => Ok(Operator::GreaterThanOrEqual),
            _ => Err(ConstraintFormatError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
