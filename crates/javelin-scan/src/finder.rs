//! The discovery seam between build descriptors and version analysis.

use std::path::Path;

use crate::component::{Class, Component, Kind};
use crate::error::Result;

/// Discovers dependency declarations beneath a source root.
///
/// A finder walks the source root for the build descriptors it understands
/// and reports one component per declared dependency. Only the declared
/// version string flows onward into version analysis.
pub trait Finder {
    fn find(&self, src_root: &Path) -> Result<Vec<Component>>;

    /// The class of component this finder identifies.
    fn class(&self) -> Class;

    /// The kind of component this finder identifies.
    fn kind(&self) -> Kind;
}
