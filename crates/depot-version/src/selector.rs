//! Versions facade providing high-level selection operations

use std::cmp::Ordering;

use crate::{ComparableVersion, RangeFormatError, VersionRange};

/// Main facade for picking dependency versions out of repository listings
pub struct Versions;

impl Versions {
    /// Check if a version satisfies a range
    pub fn satisfies(version: &str, range: &str) -> bool {
        let range = match VersionRange::parse(range) {
            Ok(r) => r,
            Err(err) => {
                log::trace!("Ignoring unparsable range: {}", err);
                return false;
            }
        };

        Self::satisfies_parsed(version, &range)
    }

    /// Check a version against a pre-parsed range
    pub fn satisfies_parsed(version: &str, range: &VersionRange) -> bool {
        parse_candidate(version).is_some_and(|v| range.is_in_range(&v))
    }

    /// Parse a range once for repeated checks
    pub fn parse_range(range: &str) -> Result<VersionRange, RangeFormatError> {
        VersionRange::parse(range)
    }

    /// Return all versions that satisfy the given range, in input order
    pub fn satisfied_by(versions: &[&str], range: &str) -> Vec<String> {
        let range = match VersionRange::parse(range) {
            Ok(r) => r,
            Err(err) => {
                log::trace!("Ignoring unparsable range: {}", err);
                return Vec::new();
            }
        };

        versions
            .iter()
            .filter(|v| Self::satisfies_parsed(v, &range))
            .map(|v| v.to_string())
            .collect()
    }

    /// Pick the highest version inside `range`.
    ///
    /// Unparsable candidates are skipped. When several candidates compare
    /// equal (`1.2` and `1.2.0`) the first one listed wins.
    pub fn max_satisfying(versions: &[&str], range: &VersionRange) -> Option<String> {
        let mut best: Option<(ComparableVersion, &str)> = None;

        for raw in versions {
            let Some(candidate) = parse_candidate(raw) else {
                continue;
            };
            if !range.is_in_range(&candidate) {
                continue;
            }

            let replace = match &best {
                Some((current, _)) => candidate > *current,
                None => true,
            };
            if replace {
                best = Some((candidate, *raw));
            }
        }

        match best {
            Some((_, raw)) => {
                log::debug!("Selected {} for range {}", raw, range);
                Some(raw.to_string())
            }
            None => {
                log::debug!("No candidate out of {} satisfies range {}", versions.len(), range);
                None
            }
        }
    }

    /// Sort versions in ascending order
    pub fn sort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, true)
    }

    /// Sort versions in descending order (reverse sort)
    pub fn rsort(versions: &[&str]) -> Vec<String> {
        Self::usort(versions, false)
    }

    fn usort(versions: &[&str], ascending: bool) -> Vec<String> {
        let mut parsed: Vec<(ComparableVersion, usize)> = versions
            .iter()
            .enumerate()
            .filter_map(|(i, v)| Some((parse_candidate(v)?, i)))
            .collect();

        // Stable sort keeps equal versions in listing order
        parsed.sort_by(|(a, _), (b, _)| {
            let cmp = a.cmp(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        });

        parsed
            .into_iter()
            .map(|(_, i)| versions[i].to_string())
            .collect()
    }

    /// Order two version strings, `None` when either fails to parse
    pub fn compare(version1: &str, version2: &str) -> Option<Ordering> {
        Some(parse_candidate(version1)?.cmp(&parse_candidate(version2)?))
    }
}

fn parse_candidate(version: &str) -> Option<ComparableVersion> {
    match ComparableVersion::parse(version) {
        Ok(v) => Some(v),
        Err(err) => {
            log::trace!("Skipping candidate: {}", err);
            None
        }
    }
}
