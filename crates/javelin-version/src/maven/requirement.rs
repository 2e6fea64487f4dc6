//! Version requirement expressions.
//!
//! A requirement is a disjunction of intervals in bracket notation:
//! `1.0` (soft pin), `[1.0]` (hard pin), `(,1.0]`, `[1.0,2.0)`, `[1.5,)`,
//! or a comma-separated union such as `(,1.0],[1.2,)`.

use std::str::FromStr;

use thiserror::Error;

use super::version::{Version, VersionError};

/// Error type for requirement parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid version requirement \"{0}\"")]
    Malformed(String),
    #[error("degenerate interval in version requirement \"{0}\"")]
    Degenerate(String),
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// One interval of a requirement, with optional bounds. An absent bound is
/// unbounded on that side.
#[derive(Debug, Clone)]
pub struct Interval {
    lower: Option<Version>,
    upper: Option<Version>,
    lower_inclusive: bool,
    upper_inclusive: bool,
}

impl Interval {
    pub fn lower(&self) -> Option<&Version> {
        self.lower.as_ref()
    }

    pub fn upper(&self) -> Option<&Version> {
        self.upper.as_ref()
    }

    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    /// Whether the version falls inside this interval.
    pub fn contains(&self, version: &Version) -> bool {
        let lower_ok = match &self.lower {
            None => true,
            Some(lower) => lower < version || (self.lower_inclusive && version == lower),
        };
        let upper_ok = match &self.upper {
            None => true,
            Some(upper) => version < upper || (self.upper_inclusive && version == upper),
        };
        lower_ok && upper_ok
    }
}

/// A parsed requirement: an ordered disjunction of intervals.
#[derive(Debug, Clone)]
pub struct VersionRange {
    intervals: Vec<Interval>,
}

impl VersionRange {
    /// Parse a requirement expression.
    pub fn parse(input: &str) -> Result<VersionRange, RangeError> {
        let brackets: Vec<(usize, char)> = input
            .char_indices()
            .filter(|&(_, c)| matches!(c, '[' | ']' | '(' | ')'))
            .collect();

        if brackets.is_empty() {
            // a bare version is a soft pin; a bare comma is not a range
            if input.contains(',') {
                return Err(RangeError::Malformed(input.to_string()));
            }
            let version = Version::parse(input)?;
            return Ok(VersionRange {
                intervals: vec![Interval {
                    lower: Some(version.clone()),
                    upper: Some(version),
                    lower_inclusive: true,
                    upper_inclusive: true,
                }],
            });
        }

        // no content outside the outermost brackets, and brackets pair up
        if brackets[0].0 != 0
            || brackets[brackets.len() - 1].0 != input.len() - 1
            || brackets.len() % 2 != 0
        {
            return Err(RangeError::Malformed(input.to_string()));
        }

        let mut intervals = Vec::new();
        let mut previous_close = None;
        for pair in brackets.chunks(2) {
            let (open_at, open) = pair[0];
            let (close_at, close) = pair[1];
            let lower_inclusive = match open {
                '[' => true,
                '(' => false,
                _ => return Err(RangeError::Malformed(input.to_string())),
            };
            let upper_inclusive = match close {
                ']' => true,
                ')' => false,
                _ => return Err(RangeError::Malformed(input.to_string())),
            };
            if let Some(at) = previous_close {
                if &input[at + 1..open_at] != "," {
                    return Err(RangeError::Malformed(input.to_string()));
                }
            }
            previous_close = Some(close_at);

            let body = &input[open_at + 1..close_at];
            let pieces: Vec<&str> = body.split(',').collect();
            let interval = match pieces.as_slice() {
                [single] => {
                    if single.is_empty() {
                        return Err(RangeError::Malformed(input.to_string()));
                    }
                    let version = Version::parse(single)?;
                    Interval {
                        lower: Some(version.clone()),
                        upper: Some(version),
                        lower_inclusive,
                        upper_inclusive,
                    }
                }
                [low, high] => Interval {
                    lower: if low.is_empty() {
                        None
                    } else {
                        Some(Version::parse(low)?)
                    },
                    upper: if high.is_empty() {
                        None
                    } else {
                        Some(Version::parse(high)?)
                    },
                    lower_inclusive,
                    upper_inclusive,
                },
                _ => return Err(RangeError::Malformed(input.to_string())),
            };

            if let (Some(lower), Some(upper)) = (&interval.lower, &interval.upper) {
                if upper < lower {
                    return Err(RangeError::Degenerate(input.to_string()));
                }
                if upper == lower && !(lower_inclusive && upper_inclusive) {
                    // a single point needs both brackets inclusive
                    return Err(RangeError::Degenerate(input.to_string()));
                }
            }
            intervals.push(interval);
        }

        Ok(VersionRange { intervals })
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Whether the version falls inside any interval of the disjunction.
    pub fn matches(&self, version: &Version) -> bool {
        self.intervals.iter().any(|interval| interval.contains(version))
    }
}

impl FromStr for VersionRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionRange::parse(s)
    }
}

impl Version {
    /// Whether this version satisfies the given requirement expression.
    ///
    /// Total over strings: an expression that fails to parse matches
    /// nothing.
    pub fn satisfies(&self, requirement: &str) -> bool {
        match VersionRange::parse(requirement) {
            Ok(range) => range.matches(self),
            Err(_) => false,
        }
    }
}
