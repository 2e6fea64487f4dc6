//! Component records produced by dependency discovery.

use std::fmt;

use javelin_version::{Version, VersionError};

/// Broad classification of a discovered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Library,
    Runtime,
    Os,
}

impl Class {
    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Library => "library",
            Class::Runtime => "runtime",
            Class::Os => "os",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ecosystem a discovered component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Java,
    DotNet,
    JavaScript,
    Python,
    OsNative,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Java => "java",
            Kind::DotNet => "dotnet",
            Kind::JavaScript => "javascript",
            Kind::Python => "python",
            Kind::OsNative => "os-native",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency discovered in a build descriptor. The version is kept as the
/// raw declared string; only version analysis interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub class: Class,
    pub kind: Kind,
    pub id: String,
    pub version: String,
}

impl Component {
    /// Parse the declared version string under the Maven version model.
    pub fn maven_version(&self) -> Result<Version, VersionError> {
        Version::parse(&self.version)
    }
}
