//! Semantic versions and version range constraints
//!
//! This crate provides a SemVer 2.0.0 [`Version`] type and a [`Constraint`]
//! engine reading NPM ranges, Maven ranges and a minimal comparator grammar.
//! Every constraint is normalized into sorted, disjoint [`VersionRange`]s, which
//! makes satisfaction checks a binary search and gives constraints a semantic
//! equality.
//!
//! ```
//! use semrange::{Constraint, Version};
//!
//! let constraint = Constraint::parse("^1.2.3").unwrap();
//! assert!(constraint.is_satisfied_by(&Version::parse("1.8.1").unwrap()));
//! assert_eq!(constraint.to_string(), ">=1.2.3 <2.0.0-0");
//! ```

mod comparator;
pub mod constraint;
mod error;
pub mod format;
mod pre_release;
mod semver;
#[cfg(feature = "serde")]
pub mod serde_support;
mod version;

pub use comparator::{Comparator, ComparatorOp};
pub use constraint::{AnyVersion, Condition, Constraint, Operator, VersionPredicate, VersionRange};
pub use error::{ConstraintFormatError, VersionFormatError};
pub use format::{ConstraintFormat, NpmOptions, ParsedConstraint};
pub use pre_release::PreRelease;
pub use semver::Semver;
pub use version::{Inc, Version};
