//! POM build-descriptor decoding and the filesystem-walking finder.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::component::{Class, Component, Kind};
use crate::error::Result;
use crate::finder::Finder;

const POM_FILE: &str = "pom.xml";

/// The subset of a POM project descriptor that dependency discovery reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub model_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub packaging: String,
    pub description: String,
    pub url: String,
    pub name: String,
    pub licenses: Licenses,
    pub dependencies: Dependencies,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Licenses {
    #[serde(default, rename = "license")]
    pub licenses: Vec<License>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct License {
    pub name: String,
    pub url: String,
    pub distribution: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dependencies {
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<Dependency>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub scope: String,
    pub optional: bool,
}

/// Decode a POM file from disk.
pub fn load_pom(path: &Path) -> Result<Project> {
    let text = std::fs::read_to_string(path)?;
    Ok(quick_xml::de::from_str(&text)?)
}

/// Finds Java library dependencies by walking a source tree for `pom.xml`
/// files. Dependencies declared with `test` scope are not reported.
pub struct PomFinder;

impl Finder for PomFinder {
    fn find(&self, src_root: &Path) -> Result<Vec<Component>> {
        let mut components = Vec::new();
        for entry in WalkDir::new(src_root) {
            let entry = entry?;
            if !entry.file_type().is_file() || entry.file_name() != POM_FILE {
                continue;
            }
            debug!(path = %entry.path().display(), "reading build descriptor");
            let project = load_pom(entry.path())?;
            for dependency in &project.dependencies.dependencies {
                if dependency.scope == "test" {
                    continue;
                }
                components.push(Component {
                    class: Class::Library,
                    kind: Kind::Java,
                    id: format!("{}.{}", dependency.group_id, dependency.artifact_id),
                    version: dependency.version.clone(),
                });
            }
        }
        Ok(components)
    }

    fn class(&self) -> Class {
        Class::Library
    }

    fn kind(&self) -> Kind {
        Kind::Java
    }
}
