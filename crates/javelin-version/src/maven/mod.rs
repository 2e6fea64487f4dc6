//! Maven-style version algebra: normalising parser, total ordering, and
//! requirement expressions.

mod requirement;
mod version;

pub use requirement::{Interval, RangeError, VersionRange};
pub use version::{Version, VersionError};
