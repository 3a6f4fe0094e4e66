//! Comparable versions and bracketed version ranges
//!
//! This crate parses dotted versions such as `1.2.23.0` into totally ordered
//! values and range specifications such as `(,1.0],[1.2,)` into a union of
//! intervals that candidate versions can be tested against.

pub mod range;
mod selector;
mod version;

pub use range::{Bound, BoundSide, Interval, RangeFormatError, VersionRange};
pub use selector::Versions;
pub use version::{ComparableVersion, Component, VersionFormatError};
