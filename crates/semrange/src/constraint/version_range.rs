//! Half-open version ranges and the DNF normalizer producing them

use std::cmp::Ordering;
use std::fmt;

use super::VersionPredicate;
use crate::comparator::{Comparator, ComparatorOp};
use crate::error::ConstraintFormatError;
use crate::version::Version;

/// The versions `v` with `start <= v < end`. A missing bound is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    start_inclusive: Option<Version>,
    end_exclusive: Option<Version>,
}

impl VersionRange {
    /// Create a range, failing unless `start < end`
    pub fn new(start_inclusive: Option<Version>, end_exclusive: Option<Version>) -> Result<Self, ConstraintFormatError> {
        if let (Some(start), Some(end)) = (&start_inclusive, &end_exclusive) {
            if start >= end {
                return Err(ConstraintFormatError::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }

        Ok(VersionRange {
            start_inclusive: start_inclusive.map(|v| v.without_build()),
            end_exclusive: end_exclusive.map(|v| v.without_build()),
        })
    }

    /// The range containing every version
    pub fn any() -> Self {
        VersionRange {
            start_inclusive: None,
            end_exclusive: None,
        }
    }

    /// The range containing no version, `<0.0.0-0`
    pub fn empty() -> Self {
        VersionRange {
            start_inclusive: None,
            end_exclusive: Some(Version::min()),
        }
    }

    pub fn start_inclusive(&self) -> Option<&Version> {
        self.start_inclusive.as_ref()
    }

    pub fn end_exclusive(&self) -> Option<&Version> {
        self.end_exclusive.as_ref()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.start_inclusive.as_ref().map_or(true, |start| start <= version)
            && self.end_exclusive.as_ref().map_or(true, |end| version < end)
    }

    pub fn intersects(&self, other: &VersionRange) -> bool {
        starts_before_end(self, other) && starts_before_end(other, self)
    }

    fn is_adjacent_to(&self, next: &VersionRange) -> bool {
        match (&self.end_exclusive, &next.start_inclusive) {
            (Some(end), Some(start)) => end.cmp(start).is_eq(),
            _ => false,
        }
    }
}

/// `a.start < b.end`, with missing bounds at infinity
fn starts_before_end(a: &VersionRange, b: &VersionRange) -> bool {
    match (&a.start_inclusive, &b.end_exclusive) {
        (Some(start), Some(end)) => start < end,
        _ => true,
    }
}

impl VersionPredicate for VersionRange {
    fn comparators(&self) -> Vec<Comparator> {
        let mut comparators = Vec::with_capacity(2);
        if let Some(start) = &self.start_inclusive {
            comparators.push(Comparator::at_least(start));
        }
        if let Some(end) = &self.end_exclusive {
            comparators.push(Comparator::less_than(end));
        }
        comparators
    }

    fn clone_box(&self) -> Box<dyn VersionPredicate> {
        Box::new(self.clone())
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.start_inclusive, &self.end_exclusive) {
            (None, None) => write!(f, "*"),
            (Some(start), None) => write!(f, ">={}", start),
            (None, Some(end)) => write!(f, "<{}", end),
            (Some(start), Some(end)) => write!(f, ">={} <{}", start, end),
        }
    }
}

/// Normalize a disjunction of conjunctions of predicates into sorted,
/// disjoint, non-adjacent ranges.
///
/// Unsatisfiable conjunctions are dropped. When nothing remains the result is
/// the single [`VersionRange::empty`] range. Fails when an `=` or `!=`
/// reference has no smallest larger version.
pub fn normalize(branches: &[Vec<Box<dyn VersionPredicate>>]) -> Result<Vec<VersionRange>, ConstraintFormatError> {
    normalize_comparators(
        branches
            .iter()
            .map(|branch| branch.iter().flat_map(|p| p.comparators()).collect()),
    )
}

pub(crate) fn normalize_comparators<I>(conjunctions: I) -> Result<Vec<VersionRange>, ConstraintFormatError>
where
    I: IntoIterator<Item = Vec<Comparator>>,
{
    let mut candidates: Vec<VersionRange> = Vec::new();
    for comparators in conjunctions {
        candidates.extend(conjunction_ranges(&comparators)?);
    }

    candidates.sort_by(compare_for_merge);

    let mut merged: Vec<VersionRange> = Vec::with_capacity(candidates.len());
    for next in candidates {
        if let Some(current) = merged.last_mut() {
            if current.intersects(&next) || current.is_adjacent_to(&next) {
                current.end_exclusive = match (current.end_exclusive.take(), next.end_exclusive) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    _ => None,
                };
                continue;
            }
        }
        merged.push(next);
    }

    if merged.is_empty() {
        merged.push(VersionRange::empty());
    }
    Ok(merged)
}

/// Ranges satisfying one conjunction, empty when it is unsatisfiable
fn conjunction_ranges(comparators: &[Comparator]) -> Result<Vec<VersionRange>, ConstraintFormatError> {
    let references = |op: ComparatorOp| {
        comparators
            .iter()
            .filter(move |c| c.op() == op)
            .map(|c| c.reference())
    };

    if let Some(clash) = references(ComparatorOp::Eq).find(|eq| references(ComparatorOp::Neq).any(|neq| neq == *eq)) {
        log::trace!("Dropping conjunction requiring both =={} and !={}", clash, clash);
        return Ok(Vec::new());
    }

    // A lower bound at the smallest version bounds nothing
    let lower = references(ComparatorOp::Gte)
        .chain(references(ComparatorOp::Eq))
        .max()
        .filter(|lower| **lower != Version::min())
        .cloned();
    let mut upper = references(ComparatorOp::Lt).min().cloned();
    for eq in references(ComparatorOp::Eq) {
        let end = eq.smallest_larger()?;
        if upper.as_ref().map_or(true, |current| end < *current) {
            upper = Some(end);
        }
    }

    if let Some(upper) = &upper {
        let floor = lower.clone().unwrap_or_else(Version::min);
        if &floor >= upper {
            log::trace!("Dropping empty conjunction [{}, {})", floor, upper);
            return Ok(Vec::new());
        }
    }

    let mut ranges = vec![VersionRange {
        start_inclusive: lower,
        end_exclusive: upper,
    }];

    for excluded in references(ComparatorOp::Neq) {
        let Some(index) = ranges.iter().position(|r| r.contains(excluded)) else {
            continue;
        };
        let range = ranges.remove(index);
        log::trace!("Splitting {} around !={}", range, excluded);

        let floor = range.start_inclusive.clone().unwrap_or_else(Version::min);
        if &floor < excluded {
            ranges.push(VersionRange {
                start_inclusive: range.start_inclusive.clone(),
                end_exclusive: Some(excluded.clone()),
            });
        }

        let resume = excluded.smallest_larger()?;
        if range.end_exclusive.as_ref().map_or(true, |end| &resume < end) {
            ranges.push(VersionRange {
                start_inclusive: Some(resume),
                end_exclusive: range.end_exclusive,
            });
        }
    }

    Ok(ranges)
}

/// Unbounded starts first, then by start; on equal starts unbounded ends first, then by end
fn compare_for_merge(a: &VersionRange, b: &VersionRange) -> Ordering {
    let starts = match (&a.start_inclusive, &b.start_inclusive) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(y),
    };
    starts.then_with(|| match (&a.end_exclusive, &b.end_exclusive) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(y),
    })
}
