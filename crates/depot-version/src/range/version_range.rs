//! VersionRange - union of bracketed intervals

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

use super::{BoundSide, Interval};
use crate::{ComparableVersion, VersionFormatError};

/// Error type for range parsing. Interval indexes are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeFormatError {
    #[error("Version range is empty")]
    Empty,
    #[error("Interval {index} of \"{range}\" is empty")]
    EmptyInterval { index: usize, range: String },
    #[error("Expected ',' after interval {index} of \"{range}\", found \"{found}\"")]
    MissingIntervalSeparator {
        index: usize,
        range: String,
        found: String,
    },
    #[error("Interval {index} \"{interval}\" has invalid opening bracket '{found}', expected '[' or '('")]
    InvalidOpeningBracket {
        index: usize,
        interval: String,
        found: char,
    },
    #[error("Interval {index} \"{interval}\" has invalid closing bracket '{found}', expected ']' or ')'")]
    InvalidClosingBracket {
        index: usize,
        interval: String,
        found: char,
    },
    #[error("Interval {index} \"{interval}\" must contain exactly one ',' between its bounds")]
    InvalidSeparator { index: usize, interval: String },
    #[error("Interval {index} \"{interval}\" has an invalid {side} bound: {source}")]
    InvalidBound {
        index: usize,
        interval: String,
        side: BoundSide,
        #[source]
        source: VersionFormatError,
    },
    #[error("Interval {index} \"{interval}\" has lower bound {lower} greater than upper bound {upper}")]
    InvertedBounds {
        index: usize,
        interval: String,
        lower: String,
        upper: String,
    },
}

impl RangeFormatError {
    /// The 1-based index of the offending interval, if the error concerns one
    pub fn interval_index(&self) -> Option<usize> {
        match self {
            RangeFormatError::Empty => None,
            RangeFormatError::EmptyInterval { index, .. }
            | RangeFormatError::MissingIntervalSeparator { index, .. }
            | RangeFormatError::InvalidOpeningBracket { index, .. }
            | RangeFormatError::InvalidClosingBracket { index, .. }
            | RangeFormatError::InvalidSeparator { index, .. }
            | RangeFormatError::InvalidBound { index, .. }
            | RangeFormatError::InvertedBounds { index, .. } => Some(*index),
        }
    }
}

/// Characters that end an interval group while splitting a range
const GROUP_CLOSERS: [char; 4] = [']', ')', '}', '>'];

/// A union of intervals such as `(,1.0],[1.2,)`
///
/// Equality and hashing look at the parsed intervals only, so `[1.2,)` and
/// `[1.2.0, )` are the same range.
#[derive(Debug, Clone)]
pub struct VersionRange {
    original: String,
    intervals: Vec<Interval>,
}

impl VersionRange {
    /// Parse a comma separated list of bracketed intervals.
    ///
    /// Commas inside a bracket pair separate the bounds of that interval;
    /// commas between bracket pairs separate intervals. Any malformed interval
    /// makes the whole range invalid.
    pub fn parse(text: &str) -> Result<Self, RangeFormatError> {
        let range = text.trim();
        if range.is_empty() {
            return Err(RangeFormatError::Empty);
        }

        let intervals = split_intervals(range)?
            .into_iter()
            .enumerate()
            .map(|(i, group)| Interval::parse_at(group, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        log::trace!("Parsed range \"{}\" into {} interval(s)", range, intervals.len());

        Ok(VersionRange {
            original: range.to_string(),
            intervals,
        })
    }

    /// The trimmed input this range was parsed from
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Intervals in input order
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Check if `version` satisfies at least one interval
    pub fn is_in_range(&self, version: &ComparableVersion) -> bool {
        self.intervals.iter().any(|interval| interval.contains(version))
    }
}

/// Split `range` into its bracket groups without interpreting them
fn split_intervals(range: &str) -> Result<Vec<&str>, RangeFormatError> {
    let mut groups = Vec::new();
    let mut rest = range;

    loop {
        let index = groups.len() + 1;
        rest = rest.trim_start();
        if rest.is_empty() || rest.starts_with(',') {
            return Err(RangeFormatError::EmptyInterval {
                index,
                range: range.to_string(),
            });
        }

        let end = rest
            .find(GROUP_CLOSERS)
            .map_or(rest.len(), |pos| pos + 1);
        groups.push(&rest[..end]);

        rest = rest[end..].trim_start();
        if rest.is_empty() {
            return Ok(groups);
        }

        match rest.strip_prefix(',') {
            Some(after) => rest = after,
            None => {
                return Err(RangeFormatError::MissingIntervalSeparator {
                    index,
                    range: range.to_string(),
                    found: rest.to_string(),
                })
            }
        }
    }
}

impl PartialEq for VersionRange {
    fn eq(&self, other: &Self) -> bool {
        self.intervals == other.intervals
    }
}

impl Eq for VersionRange {}

impl Hash for VersionRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.intervals.hash(state);
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", interval)?;
        }
        Ok(())
    }
}

impl FromStr for VersionRange {
    type Err = RangeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for VersionRange {
    type Error = RangeFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VersionRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for VersionRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        VersionRange::parse(&text).map_err(serde::de::Error::custom)
    }
}
