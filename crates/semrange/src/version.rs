//! Semantic version value type

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::constraint::Constraint;
use crate::error::VersionFormatError;
use crate::pre_release::PreRelease;

lazy_static! {
    static ref STRICT_VERSION_RE: Regex = Regex::new(
        r"^(?P<major>0|[1-9]\d*)\.(?P<minor>0|[1-9]\d*)\.(?P<patch>0|[1-9]\d*)(?:-(?P<pre>[0-9A-Za-z.-]+))?(?:\+(?P<build>[0-9A-Za-z.-]+))?$"
    ).unwrap();

    // Minor and patch are optional, a `v`/`=` prefix is allowed and a pre-release
    // starting with a letter may omit its hyphen (`1.0.0beta`).
    static ref LOOSE_VERSION_RE: Regex = Regex::new(
        r"^[v=\s]*(?P<major>0|[1-9]\d*)(?:\.(?P<minor>0|[1-9]\d*))?(?:\.(?P<patch>0|[1-9]\d*))?(?:-(?P<pre>[0-9A-Za-z.-]+)|(?P<pre_loose>[A-Za-z][0-9A-Za-z.-]*))?(?:\+(?P<build>[0-9A-Za-z.-]+))?$"
    ).unwrap();
}

/// Which component [`Version::inc`] should bump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inc {
    Major,
    Minor,
    Patch,
    PreRelease,
}

/// A semantic version `major.minor.patch(-pre_release)?(+build_metadata)?`.
///
/// Ordering and hashing ignore build metadata, equality does not: `1.0.0+a`
/// and `1.0.0+b` compare as [`Ordering::Equal`] and hash identically, yet are
/// not `==`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Option<PreRelease>,
    build_metadata: Option<String>,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Create a version, validating the pre-release and build metadata
    pub fn try_new(
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: Option<&str>,
        build_metadata: Option<&str>,
    ) -> Result<Self, VersionFormatError> {
        let pre_release = pre_release.map(PreRelease::parse).transpose()?;
        let build_metadata = build_metadata.map(parse_build_metadata).transpose()?;

        Ok(Version {
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        })
    }

    pub(crate) fn from_parts(
        major: u64,
        minor: u64,
        patch: u64,
        pre_release: Option<PreRelease>,
        build_metadata: Option<String>,
    ) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        }
    }

    /// The smallest version there is, `0.0.0-0`
    pub fn min() -> Self {
        Version::from_parts(0, 0, 0, Some(PreRelease::min()), None)
    }

    /// Parse a strict SemVer 2.0.0 version string
    pub fn parse(source: &str) -> Result<Self, VersionFormatError> {
        let caps = STRICT_VERSION_RE
            .captures(source)
            .ok_or_else(|| VersionFormatError::InvalidVersion(source.to_string()))?;

        Self::from_captures(source, &caps)
    }

    /// Parse a version leniently: `v1`, `=1.2`, `1.0.0beta` and surrounding whitespace are accepted
    pub fn parse_loose(source: &str) -> Result<Self, VersionFormatError> {
        let trimmed = source.trim();
        let caps = LOOSE_VERSION_RE
            .captures(trimmed)
            .ok_or_else(|| VersionFormatError::InvalidVersion(source.to_string()))?;

        Self::from_captures(source, &caps)
    }

    pub fn try_parse(source: &str) -> Option<Self> {
        Self::parse(source).ok()
    }

    pub fn try_parse_loose(source: &str) -> Option<Self> {
        Self::parse_loose(source).ok()
    }

    fn from_captures(source: &str, caps: &Captures<'_>) -> Result<Self, VersionFormatError> {
        let number = |name: &str| -> Result<u64, VersionFormatError> {
            match caps.name(name) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| VersionFormatError::ComponentOverflow(m.as_str().to_string())),
                None => Ok(0),
            }
        };

        let pre_release = caps
            .name("pre")
            .or_else(|| caps.name("pre_loose"))
            .map(|m| PreRelease::parse(m.as_str()))
            .transpose()?;
        let build_metadata = caps
            .name("build")
            .map(|m| parse_build_metadata(m.as_str()))
            .transpose()
            .map_err(|_| VersionFormatError::InvalidVersion(source.to_string()))?;

        Ok(Version {
            major: number("major")?,
            minor: number("minor")?,
            patch: number("patch")?,
            pre_release,
            build_metadata,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre_release.as_ref()
    }

    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }

    /// A stable version has a non-zero major and no pre-release
    pub fn is_stable(&self) -> bool {
        self.major > 0 && self.pre_release.is_none()
    }

    /// `major.minor.patch` with pre-release and build metadata removed
    pub fn without_suffixes(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }

    /// The next major version, `2.0.0` for `1.2.3`, optionally as a pre-release of it
    pub fn to_next_major(&self, pre_release: Option<&str>) -> Result<Version, VersionFormatError> {
        let pre_release = pre_release.map(PreRelease::parse).transpose()?;
        Ok(Version::from_parts(bump(self.major)?, 0, 0, pre_release, None))
    }

    /// The next minor version, `1.3.0` for `1.2.3`, optionally as a pre-release of it
    pub fn to_next_minor(&self, pre_release: Option<&str>) -> Result<Version, VersionFormatError> {
        let pre_release = pre_release.map(PreRelease::parse).transpose()?;
        Ok(Version::from_parts(self.major, bump(self.minor)?, 0, pre_release, None))
    }

    /// The next patch version.
    ///
    /// A pre-release without a requested pre-release only drops its suffix:
    /// `1.2.3-alpha` becomes `1.2.3`.
    pub fn to_next_patch(&self, pre_release: Option<&str>) -> Result<Version, VersionFormatError> {
        match pre_release {
            None if self.is_pre_release() => Ok(self.without_suffixes()),
            None => Ok(Version::new(self.major, self.minor, bump(self.patch)?)),
            Some(pre) => Ok(Version::from_parts(
                self.major,
                self.minor,
                bump(self.patch)?,
                Some(PreRelease::parse(pre)?),
                None,
            )),
        }
    }

    /// The next pre-release. The result is always greater than `self`.
    ///
    /// A release moves to the next patch with the requested pre-release (or `0`).
    /// A pre-release moves to the requested pre-release when that is greater,
    /// otherwise its own pre-release is incremented: `1.0.0-alpha.1` becomes
    /// `1.0.0-alpha.2`, or `1.0.0-beta` when `beta` is requested.
    pub fn to_next_pre_release(&self, pre_release: Option<&str>) -> Result<Version, VersionFormatError> {
        let requested = pre_release.map(PreRelease::parse).transpose()?;

        let next = match &self.pre_release {
            None => Version::from_parts(
                self.major,
                self.minor,
                bump(self.patch)?,
                Some(requested.unwrap_or_else(PreRelease::min)),
                None,
            ),
            Some(current) => {
                let pre = match requested {
                    Some(requested) if requested > *current => requested,
                    _ => current.increment(),
                };
                Version::from_parts(self.major, self.minor, self.patch, Some(pre), None)
            }
        };

        Ok(next)
    }

    /// Increment the given component
    pub fn inc(&self, by: Inc, pre_release: Option<&str>) -> Result<Version, VersionFormatError> {
        match by {
            Inc::Major => self.to_next_major(pre_release),
            Inc::Minor => self.to_next_minor(pre_release),
            Inc::Patch => self.to_next_patch(pre_release),
            Inc::PreRelease => self.to_next_pre_release(pre_release),
        }
    }

    /// The immediate successor in precedence order.
    ///
    /// `1.0.0` becomes `1.0.1-0` and `1.0.0-alpha` becomes `1.0.0-alpha.0`.
    /// Nothing sorts strictly between a version and its smallest larger version.
    /// Fails for a release whose patch is `u64::MAX`.
    pub fn smallest_larger(&self) -> Result<Version, VersionFormatError> {
        match &self.pre_release {
            None => Ok(Version::from_parts(
                self.major,
                self.minor,
                bump(self.patch)?,
                Some(PreRelease::min()),
                None,
            )),
            Some(pre) => Ok(Version::from_parts(
                self.major,
                self.minor,
                self.patch,
                Some(pre.smallest_larger()),
                None,
            )),
        }
    }

    /// Same version without build metadata
    pub(crate) fn without_build(&self) -> Version {
        Version::from_parts(self.major, self.minor, self.patch, self.pre_release.clone(), None)
    }

    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        constraint.is_satisfied_by(self)
    }

    pub fn satisfies_all<'a, I>(&self, constraints: I) -> bool
    where
        I: IntoIterator<Item = &'a Constraint>,
    {
        constraints.into_iter().all(|c| c.is_satisfied_by(self))
    }

    pub fn satisfies_any<'a, I>(&self, constraints: I) -> bool
    where
        I: IntoIterator<Item = &'a Constraint>,
    {
        constraints.into_iter().any(|c| c.is_satisfied_by(self))
    }
}

/// `component + 1`, or `ComponentOverflow` past `u64::MAX`
pub(crate) fn bump(component: u64) -> Result<u64, VersionFormatError> {
    component
        .checked_add(1)
        .ok_or_else(|| VersionFormatError::ComponentOverflow(format!("{} + 1", component)))
}

fn parse_build_metadata(source: &str) -> Result<String, VersionFormatError> {
    let valid = source
        .split('.')
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'));

    if valid {
        Ok(source.to_string())
    } else {
        Err(VersionFormatError::InvalidBuildMetadata(source.to_string()))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.pre_release.hash(state);
    }
}

impl FromStr for Version {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}
