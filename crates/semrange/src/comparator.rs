//! Canonical comparators every predicate is expressed in

use std::fmt;

use crate::version::Version;

/// The four canonical comparison kinds.
///
/// `<=v` and `>v` are not needed: they are `LT` and `GTE` of the smallest
/// version larger than `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparatorOp {
    Eq,
    Neq,
    Lt,
    Gte,
}

impl ComparatorOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparatorOp::Eq => "=",
            ComparatorOp::Neq => "!=",
            ComparatorOp::Lt => "<",
            ComparatorOp::Gte => ">=",
        }
    }
}

/// An operator paired with a reference version. The reference never carries build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparator {
    op: ComparatorOp,
    reference: Version,
}

impl Comparator {
    pub fn new(op: ComparatorOp, reference: &Version) -> Self {
        Comparator {
            op,
            reference: reference.without_build(),
        }
    }

    pub fn equal(reference: &Version) -> Self {
        Self::new(ComparatorOp::Eq, reference)
    }

    pub fn not_equal(reference: &Version) -> Self {
        Self::new(ComparatorOp::Neq, reference)
    }

    pub fn less_than(reference: &Version) -> Self {
        Self::new(ComparatorOp::Lt, reference)
    }

    pub fn at_least(reference: &Version) -> Self {
        Self::new(ComparatorOp::Gte, reference)
    }

    pub fn op(&self) -> ComparatorOp {
        self.op
    }

    pub fn reference(&self) -> &Version {
        &self.reference
    }

    /// Evaluate this comparator alone, by precedence only
    pub fn matches(&self, version: &Version) -> bool {
        let ordering = version.cmp(&self.reference);
        match self.op {
            ComparatorOp::Eq => ordering.is_eq(),
            ComparatorOp::Neq => ordering.is_ne(),
            ComparatorOp::Lt => ordering.is_lt(),
            ComparatorOp::Gte => ordering.is_ge(),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.as_str(), self.reference)
    }
}
