//! node-semver range grammar

use lazy_static::lazy_static;
use regex::Regex;

use super::descriptor::{DescriptorSyntax, VersionDescriptor};
use super::{NpmOptions, ParsedConstraint};
use crate::constraint::{AnyVersion, Condition, Operator, VersionPredicate, VersionRange};
use crate::error::ConstraintFormatError;
use crate::pre_release::PreRelease;
use crate::version::Version;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();

    static ref OR_RE: Regex = Regex::new(r"\s*\|\|\s*").unwrap();

    // A token made only of an operator and/or a `v`/`=` prefix is glued to the next one
    static ref OPERATOR_ONLY_RE: Regex = Regex::new(r"^(?:<=|>=|=<|=>|!=|~>|[<>=~^])?[v=]*$").unwrap();

    static ref PREDICATE_RE: Regex = Regex::new(r"^(?P<op><=|>=|=<|=>|!=|~>|~|\^|<|>|=)?(?P<descriptor>.*)$").unwrap();
}

type Predicates = Vec<Box<dyn VersionPredicate>>;

pub(super) fn parse(source: &str, options: NpmOptions) -> Result<ParsedConstraint, ConstraintFormatError> {
    let collapsed = WHITESPACE_RE.replace_all(source.trim(), " ");

    let predicates = split_branches(source, &collapsed)?
        .into_iter()
        .map(|branch| parse_branch(source, branch, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedConstraint {
        predicates,
        preferred_version: None,
    })
}

/// Split on `||`, then on a single `|` inside what remains.
///
/// A blank branch between `||` stays blank and reads as `*`; a blank side of
/// a single `|` is an error, so `1 ||| 2` and `1 | | 2` are rejected.
fn split_branches<'a>(source: &str, collapsed: &'a str) -> Result<Vec<&'a str>, ConstraintFormatError> {
    let mut branches = Vec::new();
    for piece in OR_RE.split(collapsed) {
        if !piece.contains('|') {
            branches.push(piece.trim());
            continue;
        }
        for alternative in piece.split('|') {
            let alternative = alternative.trim();
            if alternative.is_empty() {
                return Err(ConstraintFormatError::syntax(
                    source,
                    format!("empty alternative around '|' in \"{}\"", piece.trim()),
                ));
            }
            branches.push(alternative);
        }
    }
    Ok(branches)
}

fn parse_branch(source: &str, branch: &str, options: NpmOptions) -> Result<Predicates, ConstraintFormatError> {
    if branch.is_empty() {
        return Ok(vec![Box::new(AnyVersion)]);
    }

    let tokens = join_operator_tokens(branch);
    let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

    if let [low, "-", high] = words.as_slice() {
        let low = descriptor(low, options)?;
        let high = descriptor(high, options)?;
        return hyphen(&low, &high, options);
    }

    let mut predicates = Vec::new();
    for token in &tokens {
        predicates.extend(parse_predicate(source, token, options)?);
    }
    Ok(predicates)
}

/// Split on spaces, gluing `>=`, `~`, `v` and the like onto the operand that follows
fn join_operator_tokens(branch: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pending = String::new();

    for token in branch.split(' ') {
        pending.push_str(token);
        if OPERATOR_ONLY_RE.is_match(&pending) {
            continue;
        }
        tokens.push(std::mem::take(&mut pending));
    }
    if !pending.is_empty() {
        tokens.push(pending);
    }

    tokens
}

fn descriptor(source: &str, options: NpmOptions) -> Result<VersionDescriptor, ConstraintFormatError> {
    let syntax = if options.loose {
        DescriptorSyntax::NpmLoose
    } else {
        DescriptorSyntax::Npm
    };
    VersionDescriptor::parse(source, syntax)
}

fn parse_predicate(source: &str, token: &str, options: NpmOptions) -> Result<Predicates, ConstraintFormatError> {
    let caps = PREDICATE_RE
        .captures(token)
        .ok_or_else(|| ConstraintFormatError::InvalidConstraint(source.to_string()))?;
    let d = descriptor(&caps["descriptor"], options)?;

    match caps.name("op").map(|m| m.as_str()) {
        None | Some("=") => x_range(&d, options),
        Some("~") | Some("~>") => tilde(&d, options),
        Some("^") => caret(&d, options),
        Some("!=") => not_equal(source, &d),
        Some(op) => primitive(op.parse()?, &d, options),
    }
}

/// Inclusive lower bound of a range-shaped predicate, `None` when unbounded
fn lower_bound(d: &VersionDescriptor, options: NpmOptions) -> Option<Version> {
    if d.precision() == 0 {
        None
    } else if options.include_pre_release {
        Some(d.floor_with_pre_release(PreRelease::min()))
    } else {
        Some(d.floor())
    }
}

/// `[start, end)` as conditions, validating `start < end`
fn bounded(start: Option<Version>, end: Option<Version>) -> Result<Predicates, ConstraintFormatError> {
    let range = VersionRange::new(start, end)?;

    let mut predicates: Predicates = Vec::with_capacity(2);
    if let Some(start) = range.start_inclusive() {
        predicates.push(Box::new(Condition::new(Operator::GreaterThanOrEqual, start.clone())?));
    }
    if let Some(end) = range.end_exclusive() {
        predicates.push(Box::new(Condition::new(Operator::LessThan, end.clone())?));
    }
    if predicates.is_empty() {
        predicates.push(Box::new(AnyVersion));
    }
    Ok(predicates)
}

fn single(operator: Operator, version: Version) -> Result<Predicates, ConstraintFormatError> {
    Ok(vec![Box::new(Condition::new(operator, version)?)])
}

fn nothing() -> Result<Predicates, ConstraintFormatError> {
    Ok(vec![Box::new(Condition::nothing())])
}

fn any() -> Result<Predicates, ConstraintFormatError> {
    Ok(vec![Box::new(AnyVersion)])
}

/// `1.2.3`, `1.2`, `1.x`, `*` and their `=` forms
fn x_range(d: &VersionDescriptor, options: NpmOptions) -> Result<Predicates, ConstraintFormatError> {
    match d.precision() {
        0 => any(),
        1 => bounded(lower_bound(d, options), Some(d.next_major()?)),
        2 => bounded(lower_bound(d, options), Some(d.next_minor()?)),
        _ => single(Operator::Equal, d.floor()),
    }
}

/// `~1.2.3` allows patch-level changes, `~1` minor-level changes
fn tilde(d: &VersionDescriptor, options: NpmOptions) -> Result<Predicates, ConstraintFormatError> {
    match d.precision() {
        0 => any(),
        1 => bounded(lower_bound(d, options), Some(d.next_major()?)),
        _ => bounded(lower_bound(d, options), Some(d.next_minor()?)),
    }
}

/// `^1.2.3` allows changes that keep the left-most non-zero part
fn caret(d: &VersionDescriptor, options: NpmOptions) -> Result<Predicates, ConstraintFormatError> {
    let precision = d.precision();
    let end = if precision == 0 {
        return any();
    } else if d.major() != 0 || precision == 1 {
        d.next_major()?
    } else if d.minor() != 0 || precision == 2 {
        d.next_minor()?
    } else {
        d.next_patch()?
    };
    bounded(lower_bound(d, options), Some(end))
}

fn not_equal(source: &str, d: &VersionDescriptor) -> Result<Predicates, ConstraintFormatError> {
    if d.precision() == 0 {
        return nothing();
    }
    if d.has_wildcard() {
        return Err(ConstraintFormatError::syntax(
            source,
            format!("\"!={}\": != excludes one exact version and takes no wildcard", d),
        ));
    }
    single(Operator::NotEqual, d.floor())
}

/// `<`, `<=`, `>` and `>=` against a possibly partial version
fn primitive(operator: Operator, d: &VersionDescriptor, options: NpmOptions) -> Result<Predicates, ConstraintFormatError> {
    let precision = d.precision();
    let next_line = || {
        if precision == 1 {
            d.next_major()
        } else {
            d.next_minor()
        }
    };

    match operator {
        Operator::GreaterThanOrEqual if precision == 0 => any(),
        Operator::GreaterThanOrEqual if precision == 3 => single(operator, d.floor()),
        Operator::GreaterThanOrEqual => bounded(lower_bound(d, options), None),

        Operator::GreaterThan if precision == 0 => nothing(),
        Operator::GreaterThan if precision == 3 => single(operator, d.floor()),
        Operator::GreaterThan => single(Operator::GreaterThanOrEqual, next_line()?),

        Operator::LessThan if precision == 0 => nothing(),
        Operator::LessThan if precision == 3 => single(operator, d.floor()),
        Operator::LessThan => single(operator, d.floor_with_pre_release(PreRelease::min())),

        Operator::LessThanOrEqual if precision == 0 => any(),
        Operator::LessThanOrEqual if precision == 3 => single(operator, d.floor()),
        Operator::LessThanOrEqual => single(Operator::LessThan, next_line()?),

        Operator::Equal | Operator::NotEqual => Err(ConstraintFormatError::InvalidOperator(operator.to_string())),
    }
}

/// `1.2.3 - 2.3.4` is `>=1.2.3 <=2.3.4`; a partial upper end covers its whole line
fn hyphen(low: &VersionDescriptor, high: &VersionDescriptor, options: NpmOptions) -> Result<Predicates, ConstraintFormatError> {
    let start = lower_bound(low, options);
    let end = match high.precision() {
        0 => None,
        1 => Some(high.next_major()?),
        2 => Some(high.next_minor()?),
        _ => Some(high.floor().smallest_larger()?),
    };

    let mut predicates = bounded(start, end)?;
    if high.is_complete() {
        predicates.pop();
        predicates.push(Box::new(Condition::new(Operator::LessThanOrEqual, high.floor())?));
    }
    Ok(predicates)
}
