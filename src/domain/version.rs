//! Module version values and their ordering
//!
//! Perl module versions are dot-separated and rarely follow strict semver:
//! `1.23`, `2.0.1`, `0.9901`, `1.23.01`, `1.0a1`. Versions are split into
//! numeric and textual segments and compared segment by segment, padding the
//! shorter version with zeros. Textual segments mark a pre-release and sort
//! below any numeric segment.

use crate::error::GuardError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9A-Za-z]+)*(-[0-9A-Za-z-]+(\.[0-9A-Za-z-]+)*)?$").unwrap()
});

static SEGMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[A-Za-z]+").unwrap());

/// A single comparable piece of a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Numeric segment (e.g., `23` in `1.23`)
    Numeric(u64),
    /// Textual pre-release marker (e.g., `a` in `1.0a1`)
    Text(String),
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
            (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Numeric(n) => write!(f, "{}", n),
            Segment::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A parsed module version
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    raw: String,
    segments: Vec<Segment>,
}

impl SemanticVersion {
    /// Parses a version string
    pub fn parse(input: &str) -> Result<Self, GuardError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(GuardError::invalid_version(input, "empty version"));
        }
        if !VERSION_PATTERN.is_match(trimmed) {
            return Err(GuardError::invalid_version(
                input,
                "expected dot-separated numeric segments",
            ));
        }

        let normalized = trimmed.replace('-', ".pre.");
        let mut segments = Vec::new();
        for token in SEGMENT_PATTERN.find_iter(&normalized) {
            let token = token.as_str();
            let segment = if token.as_bytes()[0].is_ascii_digit() {
                let value = token.parse::<u64>().map_err(|_| {
                    GuardError::invalid_version(input, format!("segment '{}' is too large", token))
                })?;
                Segment::Numeric(value)
            } else {
                Segment::Text(token.to_string())
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    /// Returns the version as it was written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the next significant release, used as the upper bound of `~>`
    ///
    /// Pre-release segments are dropped, then the last segment is dropped
    /// when more than one remains, then the new last segment is incremented:
    /// `2.2` bumps to `3`, `2.2.1` bumps to `2.3`.
    pub fn bump(&self) -> SemanticVersion {
        let mut numbers: Vec<u64> = self
            .segments
            .iter()
            .map_while(|s| match s {
                Segment::Numeric(n) => Some(*n),
                Segment::Text(_) => None,
            })
            .collect();

        if numbers.len() > 1 {
            numbers.pop();
        }
        if let Some(last) = numbers.last_mut() {
            *last = last.saturating_add(1);
        }

        let raw = numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".");
        SemanticVersion {
            raw,
            segments: numbers.into_iter().map(Segment::Numeric).collect(),
        }
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let zero = Segment::Numeric(0);
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let lhs = self.segments.get(i).unwrap_or(&zero);
            let rhs = other.segments.get(i).unwrap_or(&zero);
            match lhs.cmp(rhs) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let version = v("1.23");
        assert_eq!(
            version.segments(),
            &[Segment::Numeric(1), Segment::Numeric(23)]
        );
        assert_eq!(version.as_str(), "1.23");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(v("  2.0\n").as_str(), "2.0");
    }

    #[test]
    fn test_parse_letter_boundary_splits_segment() {
        let version = v("1.0a1");
        assert_eq!(
            version.segments(),
            &[
                Segment::Numeric(1),
                Segment::Numeric(0),
                Segment::Text("a".to_string()),
                Segment::Numeric(1),
            ]
        );
        assert!(version < v("1.0"));
    }

    #[test]
    fn test_parse_dash_is_prerelease() {
        let version = v("1.2-rc1");
        assert_eq!(version.segments()[2], Segment::Text("pre".to_string()));
        assert!(version < v("1.2"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SemanticVersion::parse("").is_err());
        assert!(SemanticVersion::parse("abc").is_err());
        assert!(SemanticVersion::parse("1..2").is_err());
        assert!(SemanticVersion::parse("1.2.").is_err());
        assert!(SemanticVersion::parse(".5").is_err());
        assert!(SemanticVersion::parse("1.5 extra").is_err());
    }

    #[test]
    fn test_parse_rejects_overflowing_segment() {
        let err = SemanticVersion::parse("1.99999999999999999999999").unwrap_err();
        assert!(matches!(err, GuardError::InvalidVersion { .. }));
    }

    #[test]
    fn test_trailing_zeros_are_equal() {
        assert_eq!(v("1.5"), v("1.5.0"));
        assert_eq!(v("2"), v("2.0.0.0"));
    }

    #[test]
    fn test_numeric_segment_ordering() {
        assert!(v("1.10") > v("1.9"));
        assert!(v("2.0") > v("1.99"));
        assert!(v("1.2.3") < v("1.2.4"));
        assert!(v("0.9901") > v("0.99"));
    }

    #[test]
    fn test_prerelease_sorts_before_release() {
        assert!(v("1.0a1") < v("1.0"));
        assert!(v("1.0.a") < v("1.0.b"));
        assert!(v("1.0b1") > v("0.9"));
    }

    #[test]
    fn test_bump() {
        assert_eq!(v("2.2").bump().as_str(), "3");
        assert_eq!(v("2.2.1").bump().as_str(), "2.3");
        assert_eq!(v("5").bump().as_str(), "6");
        assert_eq!(v("1.2.0a1").bump().as_str(), "1.3");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", v("1.23")), "1.23");
        assert_eq!(format!("{}", Segment::Text("rc".to_string())), "rc");
    }
}
