//! Semver facade providing string-based version operations

use crate::constraint::Constraint;
use crate::version::Version;

/// String-in, string-out helpers over NPM constraints.
///
/// Versions are read leniently (`v1.2`, `1.0.0beta`). Versions or constraints
/// that fail to parse never match and are left out of results.
pub struct Semver;

impl Semver {
    /// Check if a version satisfies a constraint
    pub fn satisfies(version: &str, constraint: &str) -> bool {
        let Some(version) = Version::try_parse_loose(version) else {
            return false;
        };
        match Constraint::parse(constraint) {
            Ok(constraint) => constraint.is_satisfied_by(&version),
            Err(err) => {
                log::debug!("Ignoring invalid constraint \"{}\": {}", constraint, err);
                false
            }
        }
    }

    /// Return all versions that satisfy the given constraint, in input order
    pub fn satisfied_by(versions: &[&str], constraint: &str) -> Vec<String> {
        let Some(constraint) = Constraint::try_parse(constraint) else {
            return Vec::new();
        };

        versions
            .iter()
            .filter(|v| Version::try_parse_loose(v).is_some_and(|parsed| constraint.is_satisfied_by(&parsed)))
            .map(|v| v.to_string())
            .collect()
    }

    /// Return the highest version satisfying the constraint
    pub fn max_satisfying(versions: &[&str], constraint: &str) -> Option<String> {
        let constraint = Constraint::try_parse(constraint)?;

        versions
            .iter()
            .filter_map(|v| Version::try_parse_loose(v).map(|parsed| (parsed, *v)))
            .filter(|(parsed, _)| constraint.is_satisfied_by(parsed))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v.to_string())
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(Version, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((Version::try_parse_loose(v)?, i)))
            .collect();

        parsed.sort_by(|(a, _), (b, _)| if ascending { a.cmp(b) } else { b.cmp(a) });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }
}
