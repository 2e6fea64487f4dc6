//! Version comparison primitives for dependency analysis.
//!
//! This crate provides the version model used by the Java artifact
//! ecosystem — a normalising parser, a total order over loose version
//! strings, and bracketed requirement expressions with a satisfaction
//! predicate — plus a smaller wildcard-equality semantic-version record
//! used elsewhere in dependency analysis.

pub mod maven;
pub mod semantic;

pub use maven::{Interval, RangeError, Version, VersionError, VersionRange};
pub use semantic::{Semantic, SemanticError};
