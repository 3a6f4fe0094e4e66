//! Range types for version matching

mod bound;
mod interval;
mod version_range;

pub use bound::{Bound, BoundSide};
pub use interval::Interval;
pub use version_range::{RangeFormatError, VersionRange};
