//! Error types for version and constraint parsing

use thiserror::Error;

/// Error raised when a version, pre-release or build metadata string is malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionFormatError {
    #[error("Invalid version \"{0}\"")]
    InvalidVersion(String),
    #[error("Invalid pre-release \"{input}\": {reason}")]
    InvalidPreRelease { input: String, reason: String },
    #[error("Invalid build metadata \"{0}\"")]
    InvalidBuildMetadata(String),
    #[error("Version component \"{0}\" is out of range")]
    ComponentOverflow(String),
}

impl VersionFormatError {
    pub(crate) fn pre_release(input: &str, reason: impl Into<String>) -> Self {
        VersionFormatError::InvalidPreRelease {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error raised when a constraint string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintFormatError {
    #[error("Invalid constraint \"{0}\"")]
    InvalidConstraint(String),
    #[error("Invalid version descriptor \"{0}\"")]
    InvalidDescriptor(String),
    #[error("Invalid operator \"{0}\"")]
    InvalidOperator(String),
    #[error("Could not parse version constraint {constraint}: {reason}")]
    Syntax { constraint: String, reason: String },
    #[error("Invalid range: lower bound {start} is not below upper bound {end}")]
    InvalidRange { start: String, end: String },
    #[error(transparent)]
    Version(#[from] VersionFormatError),
}

impl ConstraintFormatError {
    pub(crate) fn syntax(constraint: &str, reason: impl Into<String>) -> Self {
        ConstraintFormatError::Syntax {
            constraint: constraint.to_string(),
            reason: reason.into(),
        }
    }
}
