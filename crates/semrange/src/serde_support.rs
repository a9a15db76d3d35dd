//! serde support, enabled with the `serde` feature.
//!
//! [`Version`] serializes as its strict string form and [`Constraint`] as its
//! canonical text, deserializing as an NPM constraint. The submodules plug other
//! readings into `#[serde(with = "...")]`.

use ::serde::de::Error as DeError;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constraint::Constraint;
use crate::format::ConstraintFormat;
use crate::version::Version;

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Version::parse(&source).map_err(DeError::custom)
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Constraint::parse(&source).map_err(DeError::custom)
    }
}

/// Versions read leniently (`v1.2`), written in strict form
pub mod loose_version {
    use super::*;

    pub fn serialize<S: Serializer>(version: &Version, serializer: S) -> Result<S::Ok, S::Error> {
        version.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Version, D::Error> {
        let source = String::deserialize(deserializer)?;
        Version::parse_loose(&source).map_err(DeError::custom)
    }
}

/// Constraints in Maven range syntax
pub mod maven_constraint {
    use super::*;

    pub fn serialize<S: Serializer>(constraint: &Constraint, serializer: S) -> Result<S::Ok, S::Error> {
        constraint.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Constraint, D::Error> {
        let source = String::deserialize(deserializer)?;
        Constraint::parse_with(&source, ConstraintFormat::Maven).map_err(DeError::custom)
    }
}
