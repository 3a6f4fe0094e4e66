//! Interval - one bracketed lower/upper bound pair

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::{Bound, BoundSide, RangeFormatError};
use crate::ComparableVersion;

lazy_static! {
    static ref INTERVAL_RE: Regex = Regex::new(
        r"^(?P<open>[\[(])(?P<lower>[^,\[\]()]*),(?P<upper>[^,\[\]()]*)(?P<close>[\])])$"
    ).unwrap();
}

/// A single interval such as `[1.2,2.0)` or `(,1.0]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    lower: Bound,
    upper: Bound,
}

impl Interval {
    /// An interval with no limit on either side, written `[,]` or `(,)`
    pub fn all() -> Self {
        Interval {
            lower: Bound::unbounded(),
            upper: Bound::unbounded(),
        }
    }

    /// Parse a standalone interval
    pub fn parse(text: &str) -> Result<Self, RangeFormatError> {
        Self::parse_at(text, 1)
    }

    /// Parse the interval found at 1-based `index` of a range
    pub(crate) fn parse_at(text: &str, index: usize) -> Result<Self, RangeFormatError> {
        let interval = text.trim();
        let Some(caps) = INTERVAL_RE.captures(interval) else {
            return Err(diagnose(interval, index));
        };

        let lower = parse_bound(interval, index, &caps["lower"], &caps["open"] == "[", BoundSide::Lower)?;
        let upper = parse_bound(interval, index, &caps["upper"], &caps["close"] == "]", BoundSide::Upper)?;

        if let (Some(low), Some(high)) = (lower.version(), upper.version()) {
            if low > high {
                return Err(RangeFormatError::InvertedBounds {
                    index,
                    interval: interval.to_string(),
                    lower: low.to_string(),
                    upper: high.to_string(),
                });
            }
        }

        Ok(Interval { lower, upper })
    }

    pub fn lower(&self) -> &Bound {
        &self.lower
    }

    pub fn upper(&self) -> &Bound {
        &self.upper
    }

    /// Check if this interval places no limit on either side
    pub fn is_match_all(&self) -> bool {
        self.lower.is_unbounded() && self.upper.is_unbounded()
    }

    /// Check if `version` satisfies both bounds
    pub fn contains(&self, version: &ComparableVersion) -> bool {
        self.lower.admits(version, BoundSide::Lower) && self.upper.admits(version, BoundSide::Upper)
    }
}

fn parse_bound(
    interval: &str,
    index: usize,
    raw: &str,
    is_inclusive: bool,
    side: BoundSide,
) -> Result<Bound, RangeFormatError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Bound::unbounded());
    }

    ComparableVersion::parse(raw)
        .map(|version| Bound::new(Some(version), is_inclusive))
        .map_err(|source| RangeFormatError::InvalidBound {
            index,
            interval: interval.to_string(),
            side,
            source,
        })
}

/// Work out why `interval` did not match the interval grammar
fn diagnose(interval: &str, index: usize) -> RangeFormatError {
    let (Some(first), Some(last)) = (interval.chars().next(), interval.chars().next_back()) else {
        return RangeFormatError::EmptyInterval {
            index,
            range: interval.to_string(),
        };
    };

    if first != '[' && first != '(' {
        return RangeFormatError::InvalidOpeningBracket {
            index,
            interval: interval.to_string(),
            found: first,
        };
    }

    if interval.len() == 1 || (last != ']' && last != ')') {
        return RangeFormatError::InvalidClosingBracket {
            index,
            interval: interval.to_string(),
            found: last,
        };
    }

    let inner = &interval[1..interval.len() - 1];
    if let Some(found) = inner.chars().find(|c| matches!(c, '[' | ']' | '(' | ')')) {
        return if found == '[' || found == '(' {
            RangeFormatError::InvalidOpeningBracket {
                index,
                interval: interval.to_string(),
                found,
            }
        } else {
            RangeFormatError::InvalidClosingBracket {
                index,
                interval: interval.to_string(),
                found,
            }
        };
    }

    RangeFormatError::InvalidSeparator {
        index,
        interval: interval.to_string(),
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.lower.is_inclusive() { "[" } else { "(" })?;
        if let Some(version) = self.lower.version() {
            write!(f, "{}", version)?;
        }
        f.write_str(",")?;
        if let Some(version) = self.upper.version() {
            write!(f, "{}", version)?;
        }
        f.write_str(if self.upper.is_inclusive() { "]" } else { ")" })
    }
}
