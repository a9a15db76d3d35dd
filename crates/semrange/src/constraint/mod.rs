//! Constraint types for version matching

#[allow(clippy::module_inception)]
pub mod constraint;
mod operator;
mod predicate;
mod version_range;

pub use constraint::Constraint;
pub use operator::Operator;
pub use predicate::{AnyVersion, Condition, VersionPredicate};
pub use version_range::{normalize, VersionRange};
