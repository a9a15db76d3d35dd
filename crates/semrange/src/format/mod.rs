//! Constraint grammars

pub mod descriptor;
mod maven;
mod npm;
mod simple;

pub use descriptor::{DescriptorSyntax, Part, VersionDescriptor};
pub use maven::MavenPredicate;

use crate::constraint::VersionPredicate;
use crate::error::ConstraintFormatError;
use crate::version::Version;

/// Options of the NPM grammar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NpmOptions {
    /// Accept leading zeros and pre-releases without a hyphen (`1.2.3beta`)
    pub loose: bool,
    /// Start ranges such as `1.x`, `^1.2.3` or `1.0 - 2.0` at the `-0`
    /// pre-release of their lower bound
    pub include_pre_release: bool,
}

impl NpmOptions {
    pub fn loose() -> Self {
        NpmOptions {
            loose: true,
            ..Default::default()
        }
    }

    pub fn include_pre_release() -> Self {
        NpmOptions {
            include_pre_release: true,
            ..Default::default()
        }
    }
}

/// The grammar a constraint string is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintFormat {
    /// node-semver ranges: `^1.2.3`, `~1.2`, `1.x || >=2.0.0 <3`, `1.0 - 2.0`
    Npm(NpmOptions),
    /// Maven version ranges: `[1.0,2.0)`, `(,1.0],[1.2,)`, soft requirement `1.0`
    Maven,
    /// Whitespace-separated `op version` terms over complete versions, joined by `||`
    Simple,
}

impl Default for ConstraintFormat {
    fn default() -> Self {
        ConstraintFormat::Npm(NpmOptions::default())
    }
}

/// Predicates in disjunctive normal form, as read by a grammar
#[derive(Debug, Clone, Default)]
pub struct ParsedConstraint {
    pub predicates: Vec<Vec<Box<dyn VersionPredicate>>>,
    /// The version to favour among satisfying candidates, if the grammar names one
    pub preferred_version: Option<Version>,
}

impl ConstraintFormat {
    pub fn parse(&self, source: &str) -> Result<ParsedConstraint, ConstraintFormatError> {
        match self {
            ConstraintFormat::Npm(options) => npm::parse(source, *options),
            ConstraintFormat::Maven => maven::parse(source),
            ConstraintFormat::Simple => simple::parse(source),
        }
    }

    /// Render predicates in this format's canonical text
    pub fn render(&self, predicates: &[Vec<Box<dyn VersionPredicate>>]) -> String {
        let (within, between) = match self {
            ConstraintFormat::Npm(_) | ConstraintFormat::Simple => (" ", " || "),
            ConstraintFormat::Maven => (",", ","),
        };

        predicates
            .iter()
            .map(|branch| {
                branch
                    .iter()
                    .map(|predicate| predicate.to_string())
                    .collect::<Vec<_>>()
                    .join(within)
            })
            .collect::<Vec<_>>()
            .join(between)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConstraintFormat::Npm(_) => "npm",
            ConstraintFormat::Maven => "maven",
            ConstraintFormat::Simple => "simple",
        }
    }
}
