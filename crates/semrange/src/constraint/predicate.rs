//! Predicate trait and the predicates shared by all formats

use std::fmt;

use super::Operator;
use crate::comparator::Comparator;
use crate::error::ConstraintFormatError;
use crate::version::Version;

/// A conjunction of comparators, as produced by one term of a constraint grammar.
///
/// The `Display` output is the term's canonical text in its format.
pub trait VersionPredicate: fmt::Debug + fmt::Display + Send + Sync {
    /// The comparators that must all hold. An empty list matches any version.
    fn comparators(&self) -> Vec<Comparator>;

    /// Clone this predicate into a boxed trait object
    fn clone_box(&self) -> Box<dyn VersionPredicate>;

    /// Check a version against this predicate alone, by precedence only
    fn matches(&self, version: &Version) -> bool {
        self.comparators().iter().all(|c| c.matches(version))
    }
}

impl Clone for Box<dyn VersionPredicate> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A predicate matching any version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyVersion;

impl VersionPredicate for AnyVersion {
    fn comparators(&self) -> Vec<Comparator> {
        Vec::new()
    }

    fn clone_box(&self) -> Box<dyn VersionPredicate> {
        Box::new(*self)
    }
}

impl fmt::Display for AnyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*")
    }
}

/// A single `operator version` term such as `>=1.2.3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    operator: Operator,
    version: Version,
    comparators: Vec<Comparator>,
}

impl Condition {
    /// Fails when the term has no comparator form, such as `<=1.0.18446744073709551615`
    pub fn new(operator: Operator, version: Version) -> Result<Self, ConstraintFormatError> {
        let comparators = operator.comparators(&version)?;
        Ok(Condition {
            operator,
            version,
            comparators,
        })
    }

    /// A condition no version satisfies, `<0.0.0-0`
    pub fn nothing() -> Self {
        let version = Version::min();
        Condition {
            operator: Operator::LessThan,
            comparators: vec![Comparator::less_than(&version)],
            version,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl VersionPredicate for Condition {
    fn comparators(&self) -> Vec<Comparator> {
        self.comparators.clone()
    }

    fn clone_box(&self) -> Box<dyn VersionPredicate> {
        Box::new(self.clone())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}
