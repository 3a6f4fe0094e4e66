//! Dotted version parsing and ordering

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Error type for version parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionFormatError {
    #[error("Version string is empty")]
    Empty,
    #[error("Invalid version string \"{version}\": segment {position} is empty")]
    EmptySegment { version: String, position: usize },
    #[error("Invalid version string \"{version}\": unexpected character '{found}' in segment \"{segment}\"")]
    InvalidCharacter {
        version: String,
        segment: String,
        found: char,
    },
    #[error("Invalid version string \"{version}\": numeric segment \"{segment}\" is too large")]
    NumericOverflow { version: String, segment: String },
}

lazy_static! {
    // Either an all-digit segment or a qualifier token
    static ref SEGMENT_RE: Regex = Regex::new(r"^(?:(?P<numeric>[0-9]+)|(?P<literal>[A-Za-z0-9_+\-]+))$").unwrap();
}

/// One dot-separated segment of a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Component {
    /// Non-negative integer segment, leading zeros dropped
    Numeric(u64),
    /// Lowercased qualifier token such as `alpha` or `rc1`
    Literal(String),
}

impl Component {
    pub fn is_zero(&self) -> bool {
        matches!(self, Component::Numeric(0))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Numeric(n) => write!(f, "{}", n),
            Component::Literal(s) => f.write_str(s),
        }
    }
}

/// Position-wise ranking used by comparisons.
///
/// A missing component ranks as numeric zero. Qualifier tokens sit above zero
/// and below every positive number, so `1.2 == 1.2.0 < 1.2.a < 1.2.1`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Slot<'a> {
    Zero,
    Literal(&'a str),
    Positive(u64),
}

impl<'a> From<Option<&'a Component>> for Slot<'a> {
    fn from(component: Option<&'a Component>) -> Self {
        match component {
            None | Some(Component::Numeric(0)) => Slot::Zero,
            Some(Component::Numeric(n)) => Slot::Positive(*n),
            Some(Component::Literal(s)) => Slot::Literal(s),
        }
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        Slot::from(Some(self)).cmp(&Slot::from(Some(other)))
    }
}

/// A parsed, totally ordered version such as `1.2.23.0` or `2.0.beta`
#[derive(Debug, Clone)]
pub struct ComparableVersion {
    original: String,
    components: Vec<Component>,
}

impl ComparableVersion {
    /// Parse a dotted version string.
    ///
    /// Segments made only of digits become numeric components; anything else
    /// made of ASCII alphanumerics, `-`, `_` or `+` becomes a lowercased literal.
    pub fn parse(text: &str) -> Result<Self, VersionFormatError> {
        let version = text.trim();
        if version.is_empty() {
            return Err(VersionFormatError::Empty);
        }

        let mut components = Vec::with_capacity(4);
        for (i, segment) in version.split('.').enumerate() {
            if segment.is_empty() {
                return Err(VersionFormatError::EmptySegment {
                    version: version.to_string(),
                    position: i + 1,
                });
            }
            components.push(parse_segment(version, segment)?);
        }

        Ok(ComparableVersion {
            original: version.to_string(),
            components,
        })
    }

    /// The trimmed input this version was parsed from
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Components without insignificant trailing zeros, never empty
    fn significant(&self) -> &[Component] {
        let keep = self
            .components
            .iter()
            .rposition(|c| !c.is_zero())
            .map_or(1, |i| i + 1);
        &self.components[..keep]
    }

    /// Canonical components with trailing zeros stripped.
    ///
    /// `1.0.0.0` gives `["1"]` and `1.2.23.0` gives `["1", "2", "23"]`.
    pub fn to_strings(&self) -> Vec<String> {
        self.significant().iter().map(|c| c.to_string()).collect()
    }

    /// Canonical display form, the same text `Display` produces
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

fn parse_segment(version: &str, segment: &str) -> Result<Component, VersionFormatError> {
    let Some(caps) = SEGMENT_RE.captures(segment) else {
        let found = segment
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
            .unwrap_or(' ');
        return Err(VersionFormatError::InvalidCharacter {
            version: version.to_string(),
            segment: segment.to_string(),
            found,
        });
    };

    if let Some(digits) = caps.name("numeric") {
        return digits
            .as_str()
            .parse::<u64>()
            .map(Component::Numeric)
            .map_err(|_| VersionFormatError::NumericOverflow {
                version: version.to_string(),
                segment: segment.to_string(),
            });
    }

    Ok(Component::Literal(segment.to_ascii_lowercase()))
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = Slot::from(self.components.get(i));
            let b = Slot::from(other.components.get(i));
            match a.cmp(&b) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ComparableVersion {}

impl Hash for ComparableVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.significant().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for ComparableVersion {
    type Err = VersionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for ComparableVersion {
    type Error = VersionFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ComparableVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ComparableVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        ComparableVersion::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn v(s: &str) -> ComparableVersion {
        ComparableVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_components() {
        assert_eq!(
            v("1.2.23.0").components(),
            &[
                Component::Numeric(1),
                Component::Numeric(2),
                Component::Numeric(23),
                Component::Numeric(0),
            ]
        );
        assert_eq!(
            v("2.0.RC1").components(),
            &[
                Component::Numeric(2),
                Component::Numeric(0),
                Component::Literal("rc1".to_string()),
            ]
        );
        assert_eq!(v("007.010").components(), &[Component::Numeric(7), Component::Numeric(10)]);
        assert_eq!(v("  1.2 ").original(), "1.2");
    }

    #[test]
    fn test_parse_fails() {
        assert_eq!(ComparableVersion::parse(""), Err(VersionFormatError::Empty));
        assert_eq!(ComparableVersion::parse("   "), Err(VersionFormatError::Empty));
        assert_eq!(
            ComparableVersion::parse("1..2"),
            Err(VersionFormatError::EmptySegment {
                version: "1..2".to_string(),
                position: 2,
            })
        );
        assert!(matches!(
            ComparableVersion::parse(".1"),
            Err(VersionFormatError::EmptySegment { position: 1, .. })
        ));
        assert!(matches!(
            ComparableVersion::parse("1.2."),
            Err(VersionFormatError::EmptySegment { position: 3, .. })
        ));
        assert!(matches!(
            ComparableVersion::parse("1.2,3"),
            Err(VersionFormatError::InvalidCharacter { found: ',', .. })
        ));
        assert!(matches!(
            ComparableVersion::parse("1.2 3"),
            Err(VersionFormatError::InvalidCharacter { found: ' ', .. })
        ));
        assert!(matches!(
            ComparableVersion::parse("1.99999999999999999999999"),
            Err(VersionFormatError::NumericOverflow { .. })
        ));
    }

    #[test]
    fn test_to_strings() {
        assert_eq!(v("1.0.0.0").to_strings(), vec!["1"]);
        assert_eq!(v("1.2.23.0").to_strings(), vec!["1", "2", "23"]);
        assert_eq!(v("0.0").to_strings(), vec!["0"]);
        assert_eq!(v("1.0.beta.0").to_strings(), vec!["1", "0", "beta"]);
        assert_eq!(v("1.02.0").to_strings(), vec!["1", "2"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(v("1.0.0.0").to_string(), "1");
        assert_eq!(v("1.2.23.0").to_display_string(), "1.2.23");
        assert_eq!(v("3.1.Alpha").to_string(), "3.1.alpha");
    }

    #[test]
    fn test_numeric_comparison() {
        assert!(v("1.2") < v("1.10"));
        assert!(v("1.21") > v("1.2"));
        assert!(v("2.1") > v("1.21"));
        assert!(v("0.9") < v("1.0"));
        assert!(v("1.1.2") < v("1.2"));
    }

    #[test]
    fn test_missing_components() {
        assert_eq!(v("1.2").cmp(&v("1.2.0")), Ordering::Equal);
        assert_eq!(v("1"), v("1.0.0.0"));
        assert!(v("1.2") < v("1.2.0.1"));
        assert!(v("1.2") < v("1.2.a"));
        assert!(v("1.2.0") < v("1.2.a"));
    }

    #[test]
    fn test_literal_comparison() {
        assert!(v("1.0.alpha") < v("1.0.beta"));
        assert_eq!(v("1.0.RC"), v("1.0.rc"));
        // positive numbers outrank qualifiers
        assert!(v("1.0.1") > v("1.0.rc"));
        assert!(v("2.1") > v("2.rc"));
        // zero ranks below qualifiers, like a missing component
        assert!(v("2.0") < v("2.rc"));
        assert!(v("1.a") < v("1.1"));
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        let set: HashSet<ComparableVersion> = ["1.2", "1.2.0", "1.2.0.0", "1.3"]
            .iter()
            .map(|s| v(s))
            .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&v("1.3.0")));
    }

    #[test]
    fn test_from_str() {
        let parsed: ComparableVersion = "4.5.6".parse().unwrap();
        assert_eq!(parsed, v("4.5.6"));
        assert!(ComparableVersion::try_from("4..6").is_err());
    }
}
