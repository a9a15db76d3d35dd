//! Parsed version constraints and the satisfaction check

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::version_range::normalize;
use super::{VersionPredicate, VersionRange};
use crate::error::ConstraintFormatError;
use crate::format::ConstraintFormat;
use crate::version::Version;

/// A version constraint: a disjunction of conjunctions of predicates.
///
/// The predicates are normalized into sorted, disjoint [`VersionRange`]s when
/// the constraint is built. Equality and hashing look only at those ranges and
/// the preferred version, so `>1.0` and `>=1.1.0-0` are equal while their
/// `Display` output differs.
#[derive(Debug, Clone)]
pub struct Constraint {
    predicates: Vec<Vec<Box<dyn VersionPredicate>>>,
    format: ConstraintFormat,
    preferred_version: Option<Version>,
    ranges: Vec<VersionRange>,
}

impl Constraint {
    /// Parse an NPM-style constraint
    pub fn parse(source: &str) -> Result<Self, ConstraintFormatError> {
        Self::parse_with(source, ConstraintFormat::default())
    }

    /// Parse a constraint written in the given format
    pub fn parse_with(source: &str, format: ConstraintFormat) -> Result<Self, ConstraintFormatError> {
        let parsed = format.parse(source)?;
        let constraint = Self::from_predicates(parsed.predicates, format, parsed.preferred_version)
            .map_err(|_| ConstraintFormatError::InvalidConstraint(source.to_string()))?;

        log::debug!(
            "Parsed {} constraint \"{}\" into {} branch(es), {} range(s)",
            format.name(),
            source,
            constraint.predicates.len(),
            constraint.ranges.len()
        );
        Ok(constraint)
    }

    pub fn try_parse(source: &str) -> Option<Self> {
        Self::parse(source).ok()
    }

    pub fn try_parse_with(source: &str, format: ConstraintFormat) -> Option<Self> {
        Self::parse_with(source, format).ok()
    }

    /// Build a constraint from predicates in disjunctive normal form.
    ///
    /// Fails when there are no branches, every branch is empty, or a version
    /// at the `u64` limit leaves a bound without a successor.
    pub fn from_predicates(
        predicates: Vec<Vec<Box<dyn VersionPredicate>>>,
        format: ConstraintFormat,
        preferred_version: Option<Version>,
    ) -> Result<Self, ConstraintFormatError> {
        if predicates.iter().all(Vec::is_empty) {
            let rendered = format.render(&predicates);
            return Err(ConstraintFormatError::InvalidConstraint(rendered));
        }

        let ranges = normalize(&predicates)?;
        Ok(Constraint {
            predicates,
            format,
            preferred_version,
            ranges,
        })
    }

    pub fn format(&self) -> ConstraintFormat {
        self.format
    }

    pub fn predicates(&self) -> &[Vec<Box<dyn VersionPredicate>>] {
        &self.predicates
    }

    /// The version to favour when several satisfy the constraint, such as Maven's soft requirement `1.0`
    pub fn preferred_version(&self) -> Option<&Version> {
        self.preferred_version.as_ref()
    }

    /// The normalized ranges: sorted by start, disjoint and non-adjacent
    pub fn ranges(&self) -> &[VersionRange] {
        &self.ranges
    }

    /// Check a version, excluding pre-releases unless a bound names the same `major.minor.patch`
    pub fn is_satisfied_by(&self, version: &Version) -> bool {
        self.is_satisfied_by_with(version, false)
    }

    /// Check a version.
    ///
    /// A pre-release inside a matching range only satisfies the constraint when
    /// `include_pre_release` is set, or when the range starts or ends at a
    /// pre-release of the same `major.minor.patch`: `1.2.3-beta` satisfies
    /// `>=1.2.3-alpha` but not `>=1.2.0`.
    pub fn is_satisfied_by_with(&self, version: &Version, include_pre_release: bool) -> bool {
        let Some(range) = self.find_range(version) else {
            return false;
        };

        if !version.is_pre_release() || include_pre_release {
            return true;
        }

        let normal = version.without_suffixes();
        [range.start_inclusive(), range.end_exclusive()]
            .into_iter()
            .flatten()
            .any(|bound| bound.is_pre_release() && bound.without_suffixes() == normal)
    }

    pub fn is_satisfied_by_all<'a, I>(&self, versions: I) -> bool
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().all(|v| self.is_satisfied_by(v))
    }

    pub fn is_satisfied_by_any<'a, I>(&self, versions: I) -> bool
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().any(|v| self.is_satisfied_by(v))
    }

    /// Pick the preferred version if it is among the satisfying candidates,
    /// otherwise the greatest satisfying candidate
    pub fn select<'a, I>(&self, candidates: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        let satisfying: Vec<&'a Version> = candidates
            .into_iter()
            .filter(|v| self.is_satisfied_by(v))
            .collect();

        if let Some(preferred) = &self.preferred_version {
            if let Some(found) = satisfying.iter().copied().find(|found| Version::cmp(found, preferred).is_eq()) {
                return Some(found);
            }
        }
        satisfying.into_iter().max()
    }

    /// Binary search over the sorted, disjoint ranges
    fn find_range(&self, version: &Version) -> Option<&VersionRange> {
        self.ranges
            .binary_search_by(|range| {
                if range.contains(version) {
                    Ordering::Equal
                } else if range.start_inclusive().map_or(false, |start| version < start) {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()
            .map(|index| &self.ranges[index])
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.ranges == other.ranges && self.preferred_version == other.preferred_version
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ranges.hash(state);
        self.preferred_version.hash(state);
    }
}

impl FromStr for Constraint {
    type Err = ConstraintFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Constraint::parse(s)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format.render(&self.predicates))
    }
}
