//! Maven-style version parsing and comparison.
//!
//! Version strings are first rewritten into a canonical form whose only
//! separators are `.` and `-`, then tokenised into a major number plus a
//! sequence of separator-tagged fields. The ordering interleaves numeric and
//! qualifier fields and pads the shorter version for length parity, so
//! `1`, `1.0.0`, `1.ga` and `1-final` all compare equal.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref LETTER_THEN_DIGIT: Regex = Regex::new("([a-zA-Z])([0-9])").unwrap();
    static ref DIGIT_THEN_LETTER: Regex = Regex::new("([0-9])([a-zA-Z])").unwrap();
}

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("invalid version string \"{version}\": {reason}")]
    Malformed { version: String, reason: String },
}

impl VersionError {
    fn malformed(version: &str, reason: &str) -> Self {
        VersionError::Malformed {
            version: version.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The separator that preceded a field in the canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    Dot,
    Hyphen,
}

impl Separator {
    fn as_char(self) -> char {
        match self {
            Separator::Dot => '.',
            Separator::Hyphen => '-',
        }
    }
}

/// A post-major fragment of a version: separator kind, literal value, and the
/// numeric interpretation when the literal is a decimal integer.
#[derive(Debug, Clone)]
struct Field {
    separator: Separator,
    value: String,
    number: Option<u64>,
}

impl Field {
    /// Builds a field from a raw literal, trimming null suffixes. Returns
    /// `None` when the literal trims away entirely (zero-equivalent fields
    /// are dropped from the sequence).
    fn new(separator: Separator, literal: &str) -> Option<Field> {
        let trimmed = trim_null_suffix(literal);
        if trimmed.is_empty() {
            return None;
        }
        let number = trimmed.parse::<u64>().ok();
        Some(Field {
            separator,
            value: trimmed.to_string(),
            number,
        })
    }

    /// The synthetic field used to pad the shorter version: `0` after a dot,
    /// the empty qualifier after a hyphen.
    fn padding(separator: Separator) -> Field {
        match separator {
            Separator::Dot => Field {
                separator,
                value: "0".to_string(),
                number: Some(0),
            },
            Separator::Hyphen => Field {
                separator,
                value: String::new(),
                number: None,
            },
        }
    }
}

/// A parsed Maven-style version.
///
/// Ordering (`Ord`) and equality (`PartialEq`) implement the ecosystem's
/// comparison rules; the two relations use slightly different qualifier
/// tables but agree on every sequence the tokeniser can produce.
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    fields: Vec<Field>,
    normalized: String,
}

impl Version {
    /// Parse a version string.
    ///
    /// Accepts loose real-world inputs: alphanumeric runs are split at
    /// letter/digit boundaries, empty dot-segments read as `0`, and trailing
    /// null qualifiers (`0`, `final`, `ga`) are trimmed away.
    pub fn parse(input: &str) -> Result<Version, VersionError> {
        if input.is_empty() {
            return Err(VersionError::malformed(input, "empty version string"));
        }
        let normalized = normalize(input);

        let mut rest = normalized.as_str();
        let (major_text, mut separator) = match rest.find(['-', '.']) {
            Some(at) => {
                let sep = separator_at(rest, at);
                let text = &rest[..at];
                rest = &rest[at + 1..];
                (text, Some(sep))
            }
            None => {
                let text = rest;
                rest = "";
                (text, None)
            }
        };
        let major = major_text
            .parse::<u64>()
            .map_err(|_| VersionError::malformed(input, "major version is not a number"))?;

        let mut fields = Vec::new();
        while let Some(sep) = separator {
            let (literal, next) = match rest.find(['-', '.']) {
                Some(at) => {
                    let next_sep = separator_at(rest, at);
                    let literal = &rest[..at];
                    rest = &rest[at + 1..];
                    (literal, Some(next_sep))
                }
                None => {
                    let literal = rest;
                    rest = "";
                    (literal, None)
                }
            };
            if let Some(field) = Field::new(sep, literal) {
                fields.push(field);
            }
            separator = next;
        }

        Ok(Version {
            major,
            fields,
            normalized,
        })
    }

    /// The numeric portion before the first separator.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// The canonical string this version was tokenised from.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        for field in &self.fields {
            write!(f, "{}{}", field.separator.as_char(), field.value)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.major != other.major {
            return self.major.cmp(&other.major);
        }
        let len = self.fields.len().max(other.fields.len());
        for at in 0..len {
            let ordering = match (self.fields.get(at), other.fields.get(at)) {
                (Some(a), Some(b)) => compare_fields(a, b),
                (Some(a), None) => compare_fields(a, &Field::padding(a.separator)),
                (None, Some(b)) => compare_fields(&Field::padding(b.separator), b),
                (None, None) => unreachable!(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        if self.major != other.major {
            return false;
        }
        let len = self.fields.len().max(other.fields.len());
        for at in 0..len {
            let equal = match (self.fields.get(at), other.fields.get(at)) {
                (Some(a), Some(b)) => fields_equal(a, b),
                (Some(a), None) => fields_equal(a, &Field::padding(a.separator)),
                (None, Some(b)) => fields_equal(&Field::padding(b.separator), b),
                (None, None) => unreachable!(),
            };
            if !equal {
                return false;
            }
        }
        true
    }
}

impl Eq for Version {}

fn separator_at(text: &str, at: usize) -> Separator {
    if text.as_bytes()[at] == b'.' {
        Separator::Dot
    } else {
        Separator::Hyphen
    }
}

/// Rewrites a version string into its canonical form: empty dot-segments and
/// trailing hyphens read as `0`, and a `-` is inserted at every letter/digit
/// boundary.
fn normalize(input: &str) -> String {
    let segments: Vec<String> = input
        .split('.')
        .map(|segment| {
            let mut segment = segment.to_string();
            if segment.ends_with('-') {
                segment.push('0');
            }
            if segment.is_empty() {
                segment.push('0');
            }
            hyphenate_boundaries(&segment)
        })
        .collect();
    segments.join(".")
}

fn hyphenate_boundaries(segment: &str) -> String {
    let segment = LETTER_THEN_DIGIT.replace_all(segment, "${1}-${2}");
    DIGIT_THEN_LETTER.replace_all(&segment, "${1}-${2}").into_owned()
}

/// Trims one trailing null marker per step, in a fixed order. Applied once
/// per field as it is appended; a field reduced to the empty string is
/// dropped entirely.
fn trim_null_suffix(value: &str) -> &str {
    let value = value.strip_suffix('0').unwrap_or(value);
    let value = value.strip_suffix("final").unwrap_or(value);
    let value = value.strip_suffix("ga").unwrap_or(value);
    let value = value.strip_suffix('-').unwrap_or(value);
    value.strip_suffix('.').unwrap_or(value)
}

fn compare_fields(a: &Field, b: &Field) -> Ordering {
    if a.separator == b.separator {
        return match (a.number, b.number) {
            (Some(x), Some(y)) => x.cmp(&y),
            // numbers outrank qualifiers when the separator matches
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => ordering_key(&a.value).cmp(&ordering_key(&b.value)),
        };
    }
    // separator tie-break: ".qualifier" < "-qualifier" < "-number" < ".number"
    match (a.number.is_some(), b.number.is_some()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => match a.separator {
            Separator::Hyphen => Ordering::Less,
            Separator::Dot => Ordering::Greater,
        },
        (false, false) => match a.separator {
            Separator::Dot => Ordering::Less,
            Separator::Hyphen => Ordering::Greater,
        },
    }
}

fn fields_equal(a: &Field, b: &Field) -> bool {
    if a.separator != b.separator {
        return false;
    }
    match (a.number, b.number) {
        (Some(x), Some(y)) => x == y,
        (None, None) => equality_key(&a.value) == equality_key(&b.value),
        _ => false,
    }
}

/// Ranking table for qualifier-vs-qualifier ordering:
/// alpha < beta < milestone < rc < snapshot < "" == final == ga < sp,
/// with unknown qualifiers comparing as their lowercased literal.
fn ordering_key(value: &str) -> String {
    let lower = value.to_lowercase();
    match lower.as_str() {
        "alpha" | "a" => "1".to_string(),
        "beta" | "b" => "2".to_string(),
        "milestone" | "m" => "3".to_string(),
        "rc" | "cr" => "4".to_string(),
        "snapshot" => "5".to_string(),
        "" | "final" | "ga" => "6".to_string(),
        "sp" => "7".to_string(),
        _ => lower,
    }
}

/// Alias table for qualifier equality: long forms collapse onto their short
/// aliases, release markers onto the empty qualifier.
fn equality_key(value: &str) -> String {
    let lower = value.to_lowercase();
    match lower.as_str() {
        "alpha" => "a".to_string(),
        "beta" => "b".to_string(),
        "milestone" => "m".to_string(),
        "rc" => "cr".to_string(),
        "final" | "ga" => String::new(),
        _ => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_display() {
        let tests = [
            ("1.0.0", "1"),
            ("1.ga", "1"),
            ("1.final", "1"),
            ("1.0", "1"),
            ("1.", "1"),
            ("1-", "1"),
            ("1.0.0-foo.0.0", "1-foo"),
            ("1.0.0-0.0.0", "1"),
            ("1.0-alpha-1", "1-alpha-1"),
            ("1.0.1", "1.1"),
        ];
        for (input, expected) in tests {
            let version = Version::parse(input).unwrap();
            assert_eq!(version.to_string(), expected, "parsing {input}");
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("1-1.foo-bar1baz-.1"), "1-1.foo-bar-1-baz-0.1");
        assert_eq!(normalize("1.0-SNAPSHOT"), "1.0-SNAPSHOT");
        assert_eq!(normalize("1-"), "1-0");
        assert_eq!(normalize("1."), "1.0");
    }

    #[test]
    fn test_normalize_idempotent() {
        let corpus = [
            "1-1.foo-bar1baz-.1",
            "1.0.0",
            "1.0-alpha-1",
            "2.0.0.v200706041905-7C78EK9E_EkMNfNOd2d8qq",
            "1-",
            "1.",
            "2.3.0-v200706262000",
        ];
        for input in corpus {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "normalizing {input}");
        }
    }

    #[test]
    fn test_hyphenate_boundaries() {
        let tests = [
            ("foo1bar", "foo-1-bar"),
            ("foo-1bar", "foo-1-bar"),
            ("foo-1-bar", "foo-1-bar"),
            ("foo1", "foo-1"),
            ("1bar", "1-bar"),
            ("foo-1-bar2foo", "foo-1-bar-2-foo"),
            ("foo123bar", "foo-123-bar"),
            ("foo-123bar", "foo-123-bar"),
            ("foo-123-bar", "foo-123-bar"),
            ("foo123", "foo-123"),
            ("123bar", "123-bar"),
            ("foo-bar-1baz-0", "foo-bar-1-baz-0"),
        ];
        for (input, expected) in tests {
            assert_eq!(hyphenate_boundaries(input), expected, "hyphenating {input}");
        }
    }

    #[test]
    fn test_trim_null_suffix() {
        assert_eq!(trim_null_suffix("0"), "");
        assert_eq!(trim_null_suffix("final"), "");
        assert_eq!(trim_null_suffix("ga"), "");
        assert_eq!(trim_null_suffix("10"), "1");
        assert_eq!(trim_null_suffix("final0"), "");
        assert_eq!(trim_null_suffix("finalx"), "finalx");
        assert_eq!(trim_null_suffix("foo"), "foo");
    }

    #[test]
    fn test_parse_rejects_bad_major() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("alpha").is_err());
        assert!(Version::parse("alpha.1").is_err());
        assert!(Version::parse(" 1.0").is_err());
        assert!(Version::parse("99999999999999999999999").is_err());
    }

    #[test]
    fn test_ordering() {
        let tests = [
            ("1", "2"),
            ("1.5", "2"),
            ("1", "2.5"),
            ("1.0", "1.1"),
            ("1.1", "1.2"),
            ("1.0.0", "1.1"),
            ("1.1", "1.2.0"),
            ("1.1.2.alpha1", "1.1.2"),
            ("1.1.2.alpha1", "1.1.2.beta1"),
            ("1.1.2.beta1", "1.2"),
            ("1.0-alpha-1", "1.0"),
            ("1.0-alpha-1", "1.0-alpha-2"),
            ("1.0-alpha-2", "1.0-alpha-15"),
            ("1.0-alpha-1", "1.0-beta-1"),
            ("1.0-beta-1", "1.0-SNAPSHOT"),
            ("1.0-SNAPSHOT", "1.0"),
            ("1.0-alpha-1-SNAPSHOT", "1.0-alpha-1"),
            ("1.0", "1.0-1"),
            ("1.0-1", "1.0-2"),
            ("2.0", "2.0-1"),
            ("2.0.0", "2.0-1"),
            ("2.0-1", "2.0.1"),
            ("2.0.1-klm", "2.0.1-lmn"),
            ("2.0.1", "2.0.1-xyz"),
            ("2.0.1-xyz-1", "2.0.1-1-xyz"),
            ("2.0.1", "2.0.1-123"),
            ("2.0.1-xyz", "2.0.1-123"),
            ("1.2.3-10000000000", "1.2.3-10000000001"),
            ("1.2.3-1", "1.2.3-10000000001"),
            ("2.3.0-v200706262000", "2.3.0-v200706262130"),
            (
                "2.0.0.v200706041905-7C78EK9E_EkMNfNOd2d8qq",
                "2.0.0.v200706041906-7C78EK9E_EkMNfNOd2d8qq",
            ),
        ];
        for (lesser, greater) in tests {
            let a = Version::parse(lesser).unwrap();
            let b = Version::parse(greater).unwrap();
            assert!(a < b, "{lesser} should be less than {greater}");
            assert!(b > a, "{greater} should be greater than {lesser}");
            assert_ne!(a, b, "{lesser} should not equal {greater}");
        }
    }

    #[test]
    fn test_ordering_is_total() {
        let corpus = [
            "1", "1.0.0", "1.0-alpha-1", "1.0-SNAPSHOT", "1.0-1", "2.0-1", "2.0.1", "2.0.1-xyz",
        ];
        for left in corpus {
            for right in corpus {
                let a = Version::parse(left).unwrap();
                let b = Version::parse(right).unwrap();
                let less = a < b;
                let equal = a == b;
                let greater = a > b;
                assert_eq!(
                    u8::from(less) + u8::from(equal) + u8::from(greater),
                    1,
                    "exactly one relation must hold for {left} / {right}"
                );
            }
        }
    }

    #[test]
    fn test_equality() {
        let equal = [
            ("1.0.0", "1"),
            ("1.ga", "1.final"),
            ("1-ga", "1.0"),
            ("1.0-alpha", "1.0-a"),
            ("1-rc", "1-cr"),
            ("1-milestone", "1-m"),
            ("1-beta", "1-b"),
            ("1-SNAPSHOT", "1-snapshot"),
            ("1.0.1", "1.1"),
            ("1.0.0-foo.0.0", "1-foo"),
        ];
        for (left, right) in equal {
            let a = Version::parse(left).unwrap();
            let b = Version::parse(right).unwrap();
            assert_eq!(a, b, "{left} should equal {right}");
            assert_eq!(a.cmp(&b), Ordering::Equal);
        }

        let unequal = [("1-sp", "1"), ("1.1", "1-1"), ("1-snapshot", "1"), ("1", "2")];
        for (left, right) in unequal {
            let a = Version::parse(left).unwrap();
            let b = Version::parse(right).unwrap();
            assert_ne!(a, b, "{left} should not equal {right}");
        }
    }

    #[test]
    fn test_trailing_null_segments_collapse() {
        let bases = ["1", "1.2", "1.0-alpha-1", "2.0.1-xyz"];
        let nulls = ["0", "final", "ga", ""];
        for base in bases {
            let expected = Version::parse(base).unwrap();
            for null in nulls {
                for sep in ['.', '-'] {
                    let padded = format!("{base}{sep}{null}");
                    let version = Version::parse(&padded).unwrap();
                    assert_eq!(version, expected, "parsing {padded}");
                }
            }
        }
    }

    #[test]
    fn test_sort_is_permutation_independent() {
        let expected = [
            "1.0-alpha-1",
            "1.0-SNAPSHOT",
            "1.0.0",
            "1.0-1",
            "1.1",
            "2.0-1",
            "2.0.1",
            "2.0.1-123",
        ];
        let mut forward: Vec<Version> =
            expected.iter().map(|s| Version::parse(s).unwrap()).collect();
        let mut backward: Vec<Version> = expected
            .iter()
            .rev()
            .map(|s| Version::parse(s).unwrap())
            .collect();
        forward.sort();
        backward.sort();
        let rendered: Vec<String> = forward.iter().map(|v| v.to_string()).collect();
        let rendered_backward: Vec<String> = backward.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, rendered_backward);
        for (version, input) in forward.iter().zip(expected) {
            assert_eq!(version, &Version::parse(input).unwrap());
        }
    }

    #[test]
    fn test_display_reparses_to_equal_version() {
        let corpus = [
            "1.0.0",
            "1.0.0-foo.0.0",
            "1.0-alpha-1",
            "2.0.0.v200706041905-7C78EK9E_EkMNfNOd2d8qq",
            "1.0-SNAPSHOT",
            "2.0-1",
        ];
        for input in corpus {
            let version = Version::parse(input).unwrap();
            let reparsed = Version::parse(&version.to_string()).unwrap();
            assert_eq!(version, reparsed, "round-tripping {input}");
        }
    }

    #[test]
    fn test_numeric_overflow_falls_back_to_qualifier() {
        // wider than u64: compares as text, not as a number
        let a = Version::parse("1-99999999999999999999999").unwrap();
        let b = Version::parse("1-1").unwrap();
        assert!(a < b, "overflowed literal ranks as a qualifier below numbers");
    }
}
