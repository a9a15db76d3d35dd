//! Partial version descriptors shared by the NPM and Maven grammars.
//!
//! A descriptor is a possibly incomplete version such as `1`, `1.2.x` or
//! `1.2.3-rc.1`. Each grammar decides what the missing or wildcard parts mean.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ConstraintFormatError, VersionFormatError};
use crate::pre_release::PreRelease;
use crate::version::{bump, Version};

lazy_static! {
    static ref NPM_STRICT_RE: Regex = Regex::new(
        r"^[v=\s]*(?P<major>0|[1-9]\d*|[xX*])(?:\.(?P<minor>0|[1-9]\d*|[xX*])(?:\.(?P<patch>0|[1-9]\d*|[xX*])(?:-(?P<pre>[0-9A-Za-z.-]+))?(?:\+(?P<build>[0-9A-Za-z.-]+))?)?)?$"
    ).unwrap();

    static ref NPM_LOOSE_RE: Regex = Regex::new(
        r"^[v=\s]*(?P<major>\d+|[xX*])(?:\.(?P<minor>\d+|[xX*])(?:\.(?P<patch>\d+|[xX*])(?:-(?P<pre>[0-9A-Za-z.-]+)|(?P<pre_loose>[A-Za-z][0-9A-Za-z.-]*))?(?:\+(?P<build>[0-9A-Za-z.-]+))?)?)?$"
    ).unwrap();

    static ref MAVEN_RE: Regex = Regex::new(
        r"^(?P<major>0|[1-9]\d*)(?:\.(?P<minor>0|[1-9]\d*)(?:\.(?P<patch>0|[1-9]\d*)(?:-(?P<pre>[0-9A-Za-z.-]+))?)?)?$"
    ).unwrap();
}

/// Which textual rules a descriptor is read with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorSyntax {
    /// `v`/`=` prefixes, `x`/`X`/`*` wildcards, build metadata
    Npm,
    /// As [`DescriptorSyntax::Npm`], also leading zeros and `1.2.3beta`
    NpmLoose,
    /// Plain numbers with an optional pre-release, no wildcards
    Maven,
}

/// One numeric position of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Number(u64),
    Wildcard(char),
}

impl Part {
    fn number(&self) -> Option<u64> {
        match self {
            Part::Number(n) => Some(*n),
            Part::Wildcard(_) => None,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Number(n) => write!(f, "{}", n),
            Part::Wildcard(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
    major: Part,
    minor: Option<Part>,
    patch: Option<Part>,
    pre_release: Option<PreRelease>,
    build_metadata: Option<String>,
}

impl VersionDescriptor {
    pub fn parse(source: &str, syntax: DescriptorSyntax) -> Result<Self, ConstraintFormatError> {
        let pattern: &Regex = match syntax {
            DescriptorSyntax::Npm => &*NPM_STRICT_RE,
            DescriptorSyntax::NpmLoose => &*NPM_LOOSE_RE,
            DescriptorSyntax::Maven => &*MAVEN_RE,
        };

        let invalid = || ConstraintFormatError::InvalidDescriptor(source.to_string());
        let caps = pattern.captures(source).ok_or_else(invalid)?;

        let part = |name: &str| -> Result<Option<Part>, ConstraintFormatError> {
            let Some(m) = caps.name(name) else {
                return Ok(None);
            };
            match m.as_str() {
                "x" | "X" | "*" => Ok(Some(Part::Wildcard(m.as_str().chars().next().unwrap_or('*')))),
                digits => digits
                    .parse()
                    .map(|n| Some(Part::Number(n)))
                    .map_err(|_| ConstraintFormatError::InvalidDescriptor(source.to_string())),
            }
        };

        let pre_release = caps
            .name("pre")
            .or_else(|| caps.name("pre_loose"))
            .map(|m| PreRelease::parse(m.as_str()))
            .transpose()?;

        let build_metadata = caps.name("build").map(|m| m.as_str().to_string());
        if let Some(build) = &build_metadata {
            if build.split('.').any(str::is_empty) {
                return Err(invalid());
            }
        }

        Ok(VersionDescriptor {
            major: part("major")?.ok_or_else(invalid)?,
            minor: part("minor")?,
            patch: part("patch")?,
            pre_release,
            build_metadata,
        })
    }

    /// Number of leading concrete numbers: 0 for `*`, 1 for `1` or `1.x`, 2 for `1.2`, 3 for `1.2.3`
    pub fn precision(&self) -> usize {
        let parts = [Some(self.major), self.minor, self.patch];
        parts
            .iter()
            .take_while(|part| matches!(part, Some(Part::Number(_))))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.precision() == 3
    }

    /// Whether any position is written as `x`, `X` or `*`
    pub fn has_wildcard(&self) -> bool {
        [Some(self.major), self.minor, self.patch]
            .iter()
            .any(|part| matches!(part, Some(Part::Wildcard(_))))
    }

    pub fn major(&self) -> u64 {
        self.major.number().unwrap_or(0)
    }

    pub fn minor(&self) -> u64 {
        self.minor.and_then(|p| p.number()).unwrap_or(0)
    }

    pub fn patch(&self) -> u64 {
        self.patch.and_then(|p| p.number()).unwrap_or(0)
    }

    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre_release.as_ref()
    }

    /// The smallest version described, with wildcards and missing parts as zero.
    ///
    /// The pre-release is kept only for complete descriptors; build metadata is dropped.
    pub fn floor(&self) -> Version {
        let pre_release = if self.is_complete() { self.pre_release.clone() } else { None };
        Version::from_parts(self.major(), self.minor(), self.patch(), pre_release, None)
    }

    /// `floor()` with the given pre-release when it has none of its own
    pub(crate) fn floor_with_pre_release(&self, pre_release: PreRelease) -> Version {
        let floor = self.floor();
        match floor.pre_release() {
            Some(_) => floor,
            None => Version::from_parts(floor.major(), floor.minor(), floor.patch(), Some(pre_release), None),
        }
    }

    /// The first version past the described major line, `(M+1).0.0-0`
    pub(crate) fn next_major(&self) -> Result<Version, VersionFormatError> {
        Ok(Version::from_parts(bump(self.major())?, 0, 0, Some(PreRelease::min()), None))
    }

    /// The first version past the described minor line, `M.(m+1).0-0`
    pub(crate) fn next_minor(&self) -> Result<Version, VersionFormatError> {
        Ok(Version::from_parts(self.major(), bump(self.minor())?, 0, Some(PreRelease::min()), None))
    }

    /// The first version past the described patch, `M.m.(p+1)-0`
    pub(crate) fn next_patch(&self) -> Result<Version, VersionFormatError> {
        Ok(Version::from_parts(self.major(), self.minor(), bump(self.patch())?, Some(PreRelease::min()), None))
    }
}

impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = &self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = &self.patch {
            write!(f, ".{}", patch)?;
        }
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn npm(s: &str) -> VersionDescriptor {
        VersionDescriptor::parse(s, DescriptorSyntax::Npm).unwrap()
    }

    #[test]
    fn test_precision() {
        assert_eq!(npm("*").precision(), 0);
        assert_eq!(npm("x.1.2").precision(), 0);
        assert_eq!(npm("1").precision(), 1);
        assert_eq!(npm("1.x").precision(), 1);
        assert_eq!(npm("1.X.3").precision(), 1);
        assert_eq!(npm("1.2").precision(), 2);
        assert_eq!(npm("1.2.*").precision(), 2);
        assert_eq!(npm("1.2.3").precision(), 3);
        assert!(npm("1.2.3-rc.1").is_complete());
    }

    #[test]
    fn test_npm_prefixes() {
        assert_eq!(npm("v1.2.3").floor(), Version::new(1, 2, 3));
        assert_eq!(npm("=1.2.3").floor(), Version::new(1, 2, 3));
        assert_eq!(npm("v=  1.2").to_string(), "1.2");
    }

    #[test]
    fn test_npm_rejects() {
        for invalid in ["", "a", "1.2.3.4", "01.2.3", "1.2-rc", "1.2.3beta", "1.2.3-", "1.2.3+a..b", "1.2.3-01"] {
            assert!(
                VersionDescriptor::parse(invalid, DescriptorSyntax::Npm).is_err(),
                "{:?} should be rejected",
                invalid
            );
        }
    }

    #[test]
    fn test_npm_loose() {
        let d = VersionDescriptor::parse("01.2.3beta", DescriptorSyntax::NpmLoose).unwrap();
        assert_eq!(d.floor().to_string(), "1.2.3-beta");
    }

    #[test]
    fn test_maven() {
        let d = VersionDescriptor::parse("1.0-", DescriptorSyntax::Maven);
        assert!(d.is_err());
        assert!(VersionDescriptor::parse("1.x", DescriptorSyntax::Maven).is_err());
        assert!(VersionDescriptor::parse("v1.0", DescriptorSyntax::Maven).is_err());
        assert!(VersionDescriptor::parse("1.0.0+b", DescriptorSyntax::Maven).is_err());

        let d = VersionDescriptor::parse("1.0.0-SNAPSHOT", DescriptorSyntax::Maven).unwrap();
        assert_eq!(d.floor().to_string(), "1.0.0-SNAPSHOT");
        assert_eq!(d.to_string(), "1.0.0-SNAPSHOT");
    }

    #[test]
    fn test_floor_and_bounds() {
        let d = npm("1.2.x");
        assert_eq!(d.floor(), Version::new(1, 2, 0));
        assert_eq!(d.next_major().unwrap().to_string(), "2.0.0-0");
        assert_eq!(d.next_minor().unwrap().to_string(), "1.3.0-0");
        assert_eq!(d.next_patch().unwrap().to_string(), "1.2.1-0");
        assert_eq!(d.floor_with_pre_release(PreRelease::min()).to_string(), "1.2.0-0");

        let full = npm("1.2.3-beta+build");
        assert_eq!(full.floor().to_string(), "1.2.3-beta");
        assert_eq!(full.floor_with_pre_release(PreRelease::min()).to_string(), "1.2.3-beta");
    }

    #[test]
    fn test_next_line_at_component_limit() {
        assert!(npm("18446744073709551615").next_major().is_err());
        assert!(npm("1.18446744073709551615").next_minor().is_err());
        assert!(npm("1.2.18446744073709551615").next_patch().is_err());
        assert_eq!(npm("1.18446744073709551615").next_major().unwrap().to_string(), "2.0.0-0");
    }

    #[test]
    fn test_display_preserves_wildcards() {
        assert_eq!(npm("1.X.*").to_string(), "1.X.*");
        assert_eq!(npm("1.2.3-rc.1+b.2").to_string(), "1.2.3-rc.1+b.2");
        assert!(npm("1.x.3").has_wildcard());
        assert!(!npm("1.2").has_wildcard());
    }
}
