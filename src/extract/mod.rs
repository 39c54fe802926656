//! Line heuristics that turn rendered page text into records.
//!
//! Both extractors are pure single passes over `text.lines()`. They never
//! fail: a line either matches or is skipped.

mod graduate;
mod placement;

use std::collections::HashSet;

pub use graduate::{extract_graduates, GraduateExtractor};
pub use placement::{extract_placements, parse_placement_line, ParsedPlacement, PlacementExtractor};

/// How repeated names are treated within one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Keep only the earliest record for each lowercased, trimmed name.
    FirstSeenByName,
    KeepAll,
}

impl DedupPolicy {
    pub(crate) fn apply<T>(self, records: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
        match self {
            DedupPolicy::KeepAll => records,
            DedupPolicy::FirstSeenByName => {
                let mut seen = HashSet::new();
                records
                    .into_iter()
                    .filter(|r| seen.insert(name(r).trim().to_lowercase()))
                    .collect()
            }
        }
    }
}

/// Length in characters, not bytes.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
