//! Bound type for interval boundaries

use std::fmt;

use crate::ComparableVersion;

/// Which end of an interval a bound sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundSide {
    Lower,
    Upper,
}

impl BoundSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundSide::Lower => "lower",
            BoundSide::Upper => "upper",
        }
    }
}

impl fmt::Display for BoundSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a bound (lower or upper) of an interval
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    version: Option<ComparableVersion>,
    is_inclusive: bool,
}

impl Bound {
    /// Create a new bound; `None` means unbounded on this side.
    ///
    /// An unbounded side is never inclusive, so `[,1.0]` and `(,1.0]` build
    /// equal bounds.
    pub fn new(version: Option<ComparableVersion>, is_inclusive: bool) -> Self {
        let is_inclusive = is_inclusive && version.is_some();
        Bound {
            version,
            is_inclusive,
        }
    }

    /// A closed bound that admits `version` itself
    pub fn inclusive(version: ComparableVersion) -> Self {
        Self::new(Some(version), true)
    }

    /// An open bound that excludes `version` itself
    pub fn exclusive(version: ComparableVersion) -> Self {
        Self::new(Some(version), false)
    }

    /// No limit on this side
    pub fn unbounded() -> Self {
        Self::new(None, false)
    }

    /// Get the bounding version, `None` when unbounded
    pub fn version(&self) -> Option<&ComparableVersion> {
        self.version.as_ref()
    }

    pub fn is_inclusive(&self) -> bool {
        self.is_inclusive
    }

    pub fn is_unbounded(&self) -> bool {
        self.version.is_none()
    }

    /// Check whether `candidate` lies on the admitted side of this bound
    /// when it is used as the given side of an interval
    pub fn admits(&self, candidate: &ComparableVersion, side: BoundSide) -> bool {
        let Some(limit) = &self.version else {
            return true;
        };

        match side {
            BoundSide::Lower => candidate > limit || (self.is_inclusive && candidate == limit),
            BoundSide::Upper => candidate < limit || (self.is_inclusive && candidate == limit),
        }
    }
}
