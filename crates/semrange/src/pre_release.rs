//! Pre-release identifiers of a semantic version

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::VersionFormatError;

/// Dot-separated pre-release identifiers, e.g. `alpha.1` or `rc.2.beta`.
///
/// Identifiers are either numeric (no leading zeros unless exactly `0`) or
/// alphanumeric with hyphens. Ordering follows SemVer 2.0.0 precedence:
/// numeric identifiers compare numerically and sort before alphanumeric ones,
/// alphanumeric identifiers compare in ASCII order, and a strict prefix sorts
/// before the longer sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreRelease {
    parts: Vec<String>,
}

impl PreRelease {
    /// Parse a pre-release string such as `alpha.1`
    pub fn parse(source: &str) -> Result<Self, VersionFormatError> {
        if source.trim().is_empty() {
            return Err(VersionFormatError::pre_release(source, "pre-release must not be blank"));
        }

        let mut parts = Vec::new();
        for part in source.split('.') {
            validate_identifier(source, part)?;
            parts.push(part.to_string());
        }

        Ok(PreRelease { parts })
    }

    /// The smallest possible pre-release, `0`
    pub fn min() -> Self {
        PreRelease {
            parts: vec!["0".to_string()],
        }
    }

    /// The identifiers in order
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The leading identifier, e.g. `alpha` for `alpha.1`
    pub fn identity(&self) -> &str {
        &self.parts[0]
    }

    /// Bump the last numeric identifier, or append `.0` when there is none.
    ///
    /// `alpha.1` becomes `alpha.2`, `1.beta` becomes `2.beta` and `alpha` becomes `alpha.0`.
    pub fn increment(&self) -> Self {
        let mut parts = self.parts.clone();

        let last_numeric = parts
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, part)| part.parse::<u64>().ok().and_then(|n| n.checked_add(1)).map(|n| (i, n)));

        match last_numeric {
            Some((i, next)) => parts[i] = next.to_string(),
            None => parts.push("0".to_string()),
        }

        PreRelease { parts }
    }

    /// The immediate successor in precedence order: this pre-release with `.0` appended
    pub(crate) fn smallest_larger(&self) -> Self {
        let mut parts = self.parts.clone();
        parts.push("0".to_string());
        PreRelease { parts }
    }
}

fn is_numeric(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

fn validate_identifier(source: &str, part: &str) -> Result<(), VersionFormatError> {
    if part.is_empty() {
        return Err(VersionFormatError::pre_release(source, "identifiers must not be empty"));
    }
    if !part.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(VersionFormatError::pre_release(
            source,
            format!("identifier \"{}\" contains characters outside [0-9A-Za-z-]", part),
        ));
    }
    if is_numeric(part) && part.len() > 1 && part.starts_with('0') {
        return Err(VersionFormatError::pre_release(
            source,
            format!("numeric identifier \"{}\" has a leading zero", part),
        ));
    }
    Ok(())
}

/// Numeric identifiers have no leading zeros, so a longer one is always larger.
fn compare_identifiers(a: &str, b: &str) -> Ordering {
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.parts.iter().zip(other.parts.iter()) {
            match compare_identifiers(a, b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.parts.len().cmp(&other.parts.len())
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for PreRelease {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreRelease::parse(s)
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parts.join("."))
    }
}
