//! Dependency discovery for build descriptors.
//!
//! This crate hosts the collaborators around the version core: component
//! records, the `Finder` seam, POM descriptor decoding, a filesystem-walking
//! POM finder, and a remote repository client that verifies descriptor
//! integrity before decoding. Version strings discovered here are analysed
//! with `javelin-version`.

pub mod component;
pub mod error;
pub mod finder;
pub mod pom;
pub mod repository;

pub use component::{Class, Component, Kind};
pub use error::{Result, ScanError};
pub use finder::Finder;
pub use pom::{load_pom, Dependency, PomFinder, Project};
pub use repository::{sha1_hex, PomRepository, PomRepositoryConfig};
