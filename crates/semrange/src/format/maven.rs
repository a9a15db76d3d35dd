//! Maven version range grammar: `[1.0,2.0)`, `(,1.0],[1.2,)`, `[1.5]` and the soft requirement `1.0`

use std::fmt;

use super::descriptor::{DescriptorSyntax, VersionDescriptor};
use super::ParsedConstraint;
use crate::comparator::Comparator;
use crate::constraint::{VersionPredicate, VersionRange};
use crate::error::ConstraintFormatError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape {
    /// `1.0`: at least this version, preferring it
    Minimum(VersionDescriptor),
    /// `[1.0]`
    Exact(VersionDescriptor),
    /// `[1.0,2.0)`, `(,1.0]`, ...
    Interval {
        lower: Option<VersionDescriptor>,
        lower_inclusive: bool,
        upper: Option<VersionDescriptor>,
        upper_inclusive: bool,
    },
}

/// One Maven restriction, rendered back as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenPredicate {
    shape: Shape,
    range: VersionRange,
}

impl MavenPredicate {
    fn minimum(descriptor: VersionDescriptor) -> Result<Self, ConstraintFormatError> {
        let range = VersionRange::new(Some(descriptor.floor()), None)?;
        Ok(MavenPredicate {
            shape: Shape::Minimum(descriptor),
            range,
        })
    }

    fn exact(descriptor: VersionDescriptor) -> Result<Self, ConstraintFormatError> {
        let floor = descriptor.floor();
        let end = floor.smallest_larger()?;
        let range = VersionRange::new(Some(floor), Some(end))?;
        Ok(MavenPredicate {
            shape: Shape::Exact(descriptor),
            range,
        })
    }

    fn interval(
        source: &str,
        lower: Option<VersionDescriptor>,
        lower_inclusive: bool,
        upper: Option<VersionDescriptor>,
        upper_inclusive: bool,
    ) -> Result<Self, ConstraintFormatError> {
        if lower.is_none() && lower_inclusive {
            return Err(ConstraintFormatError::syntax(source, "interval with unspecified inclusive lower bound"));
        }
        if upper.is_none() && upper_inclusive {
            return Err(ConstraintFormatError::syntax(source, "interval with unspecified inclusive upper bound"));
        }

        let start = match &lower {
            Some(d) if lower_inclusive => Some(d.floor()),
            Some(d) => Some(d.floor().smallest_larger()?),
            None => None,
        };
        let end = match &upper {
            Some(d) if upper_inclusive => Some(d.floor().smallest_larger()?),
            Some(d) => Some(d.floor()),
            None => None,
        };

        Ok(MavenPredicate {
            range: VersionRange::new(start, end)?,
            shape: Shape::Interval {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            },
        })
    }

    /// The versions this restriction admits
    pub fn range(&self) -> &VersionRange {
        &self.range
    }
}

impl VersionPredicate for MavenPredicate {
    fn comparators(&self) -> Vec<Comparator> {
        self.range.comparators()
    }

    fn clone_box(&self) -> Box<dyn VersionPredicate> {
        Box::new(self.clone())
    }
}

impl fmt::Display for MavenPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            Shape::Minimum(descriptor) => write!(f, "{}", descriptor),
            Shape::Exact(descriptor) => write!(f, "[{}]", descriptor),
            Shape::Interval {
                lower,
                lower_inclusive,
                upper,
                upper_inclusive,
            } => {
                write!(f, "{}", if *lower_inclusive { "[" } else { "(" })?;
                if let Some(lower) = lower {
                    write!(f, "{}", lower)?;
                }
                write!(f, ",")?;
                if let Some(upper) = upper {
                    write!(f, "{}", upper)?;
                }
                write!(f, "{}", if *upper_inclusive { "]" } else { ")" })
            }
        }
    }
}

fn descriptor(source: &str) -> Result<VersionDescriptor, ConstraintFormatError> {
    VersionDescriptor::parse(source, DescriptorSyntax::Maven)
}

fn optional_descriptor(source: &str) -> Result<Option<VersionDescriptor>, ConstraintFormatError> {
    match source.trim() {
        "" => Ok(None),
        trimmed => descriptor(trimmed).map(Some),
    }
}

pub(super) fn parse(source: &str) -> Result<ParsedConstraint, ConstraintFormatError> {
    if source.trim().is_empty() {
        return Err(ConstraintFormatError::syntax(source, "constraint strings may not be blank"));
    }

    let mut parsed = ParsedConstraint::default();
    let mut pos = 0;
    let mut expecting_more = false;

    while let Some(c) = source[pos..].chars().next() {
        let opened_at = pos;
        pos += c.len_utf8();

        match c {
            '(' | '[' | ']' => {
                let Some(offset) = source[pos..].find(|ch| matches!(ch, ')' | ']' | '[')) else {
                    return Err(ConstraintFormatError::syntax(
                        source,
                        format!("unmatched opening character '{}' at index {}", c, opened_at),
                    ));
                };
                let end = pos + offset;
                let lower_inclusive = c == '[';
                let upper_inclusive = source[end..].starts_with(']');
                let restriction = &source[pos..end];

                let predicate = match restriction.split_once(',') {
                    Some((lower, upper)) => MavenPredicate::interval(
                        source,
                        optional_descriptor(lower)?,
                        lower_inclusive,
                        optional_descriptor(upper)?,
                        upper_inclusive,
                    )?,
                    None if lower_inclusive && upper_inclusive => MavenPredicate::exact(descriptor(restriction.trim())?)?,
                    None => {
                        return Err(ConstraintFormatError::syntax(
                            source,
                            format!("range with exclusive bound requires two version descriptors: {}", restriction),
                        ))
                    }
                };
                parsed.predicates.push(vec![Box::new(predicate)]);

                pos = end + 1;
                if !source[pos..].starts_with(',') {
                    expecting_more = false;
                    break;
                }
                pos += 1;
                expecting_more = true;
            }
            _ => {
                if expecting_more {
                    return Err(ConstraintFormatError::syntax(
                        source,
                        format!("expecting more version descriptors but got '{}' at index {}", c, opened_at),
                    ));
                }
                let soft = descriptor(source.trim())?;
                parsed.preferred_version = Some(soft.floor());
                parsed.predicates.push(vec![Box::new(MavenPredicate::minimum(soft)?)]);
                pos = source.len();
            }
        }
    }

    if expecting_more {
        return Err(ConstraintFormatError::syntax(
            source,
            "expecting more version descriptors but reached end of input",
        ));
    }
    if pos < source.len() {
        return Err(ConstraintFormatError::syntax(
            source,
            format!("unexpected trailing input at index {}", pos),
        ));
    }

    Ok(parsed)
}
