//! Minimal comparator grammar: `>=1.0.0 <2.0.0 || =3.1.4`

use lazy_static::lazy_static;
use regex::Regex;

use super::ParsedConstraint;
use crate::constraint::{AnyVersion, Condition, Operator, VersionPredicate};
use crate::error::ConstraintFormatError;
use crate::version::Version;

lazy_static! {
    static ref TERM_RE: Regex = Regex::new(r"^(?P<op><=|>=|!=|<|>|=)?(?P<version>\S+)$").unwrap();
}

pub(super) fn parse(source: &str) -> Result<ParsedConstraint, ConstraintFormatError> {
    if source.trim().is_empty() {
        return Err(ConstraintFormatError::syntax(source, "constraint strings may not be blank"));
    }

    let mut parsed = ParsedConstraint::default();
    for branch in source.split("||") {
        parsed.predicates.push(parse_branch(source, branch.trim())?);
    }
    Ok(parsed)
}

fn parse_branch(source: &str, branch: &str) -> Result<Vec<Box<dyn VersionPredicate>>, ConstraintFormatError> {
    if branch.is_empty() {
        return Err(ConstraintFormatError::syntax(source, "empty alternative"));
    }
    if branch == "*" {
        return Ok(vec![Box::new(AnyVersion)]);
    }

    branch
        .split_whitespace()
        .map(|term| -> Result<Box<dyn VersionPredicate>, ConstraintFormatError> {
            let caps = TERM_RE
                .captures(term)
                .ok_or_else(|| ConstraintFormatError::InvalidConstraint(source.to_string()))?;
            let operator = match caps.name("op") {
                Some(op) => op.as_str().parse()?,
                None => Operator::Equal,
            };
            let version = Version::parse(&caps["version"])?;
            Ok(Box::new(Condition::new(operator, version)?))
        })
        .collect()
}
