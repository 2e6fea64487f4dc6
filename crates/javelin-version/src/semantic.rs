//! Wildcard-aware semantic version records.
//!
//! A `(major, minor, patch)` triple where each component is either an
//! explicit integer or a wildcard. This model answers "could these two
//! versions describe the same release?" with component-wise wildcard
//! matching; it deliberately carries no ordering.

use thiserror::Error;

/// Error type for semantic version construction and parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("explicit {0} version not allowed with a generic {1} version")]
    Inconsistent(&'static str, &'static str),
    #[error("invalid {component} version \"{value}\"")]
    Parse {
        component: &'static str,
        value: String,
    },
}

/// A semantic version with per-component wildcards. A `None` component
/// matches any value in that position.
#[derive(Debug, Clone, Copy, Default)]
pub struct Semantic {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl Semantic {
    /// Build a semantic version from explicit components. A component may
    /// only be explicit when every higher-order component is explicit.
    pub fn new(
        major: Option<u64>,
        minor: Option<u64>,
        patch: Option<u64>,
    ) -> Result<Semantic, SemanticError> {
        if minor.is_some() && major.is_none() {
            return Err(SemanticError::Inconsistent("minor", "major"));
        }
        if patch.is_some() && (major.is_none() || minor.is_none()) {
            return Err(SemanticError::Inconsistent("patch", "major or minor"));
        }
        Ok(Semantic {
            major,
            minor,
            patch,
        })
    }

    /// Parse a dotted version string of up to three components, where an
    /// empty or `x` component is a wildcard.
    pub fn parse(input: &str) -> Result<Semantic, SemanticError> {
        let mut pieces = input.splitn(3, '.');
        let major = parse_component(pieces.next().unwrap_or(""), "major")?;
        let minor = parse_component(pieces.next().unwrap_or(""), "minor")?;
        let patch = parse_component(pieces.next().unwrap_or(""), "patch")?;
        Semantic::new(major, minor, patch)
    }

    pub fn major(&self) -> Option<u64> {
        self.major
    }

    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// Component-wise wildcard equality: explicit components must agree,
    /// a wildcard on either side matches anything in that position.
    ///
    /// Not exposed as `PartialEq` because the relation is not transitive
    /// (`1.2.3` and `9.9.9` both match `x.x.x` without matching each other).
    pub fn matches(&self, other: &Semantic) -> bool {
        component_matches(self.major, other.major)
            && component_matches(self.minor, other.minor)
            && component_matches(self.patch, other.patch)
    }
}

fn component_matches(a: Option<u64>, b: Option<u64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

fn parse_component(text: &str, component: &'static str) -> Result<Option<u64>, SemanticError> {
    if text.is_empty() || text == "x" {
        return Ok(None);
    }
    text.parse::<u64>()
        .map(Some)
        .map_err(|_| SemanticError::Parse {
            component,
            value: text.to_string(),
        })
}
