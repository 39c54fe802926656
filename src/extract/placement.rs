use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{char_len, DedupPolicy};
use crate::record::PlacementRecord;
use crate::source::SourceDescriptor;

const MIN_LINE_LEN: usize = 20;
const MAX_LINE_LEN: usize = 300;
const MIN_NAME_LEN: usize = 3;
const MAX_NAME_LEN: usize = 50;

/// A "name" containing one of these is an institutional header, not a person.
const NAME_NOISE: [&str; 5] = ["copyright", "university", "college", "school", "department"];

// Priority order matters: the first template that matches decides the line.
static TEMPLATES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Name: Position, Institution
        r"^([A-Z][a-zA-Z\s.'-]+?):\s*(.+?),\s*(.+)$",
        // Name: Position at Institution
        r"^([A-Z][a-zA-Z\s.'-]+?):\s*(.+?)\s+at\s+(.+)$",
        // Dr. Name is [a|an] Position at Institution
        r"^Dr\.\s*([A-Z][a-zA-Z\s.'-]+?)\s+is\s+(?:a\s+|an\s+)?(.+?)\s+at\s+(.+)$",
        // Name, Position, Institution
        r"^([A-Z][a-zA-Z\s.'-]+?),\s*(.+?),\s*([A-Z].+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("placement template is a valid regex"))
    .collect()
});

/// Name, position and institution captured from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPlacement {
    pub name: String,
    pub position: String,
    pub institution: String,
}

/// Pulls `Name: Position, Institution` style entries out of page text.
#[derive(Debug, Clone, Copy)]
pub struct PlacementExtractor {
    pub dedup: DedupPolicy,
}

impl Default for PlacementExtractor {
    fn default() -> Self {
        PlacementExtractor {
            dedup: DedupPolicy::FirstSeenByName,
        }
    }
}

impl PlacementExtractor {
    pub fn with_dedup(dedup: DedupPolicy) -> Self {
        PlacementExtractor { dedup }
    }

    pub fn extract(&self, raw_text: &str, source: &SourceDescriptor) -> Vec<PlacementRecord> {
        let placements: Vec<PlacementRecord> = raw_text
            .lines()
            .map(str::trim)
            .filter(|line| is_candidate(line))
            .filter_map(parse_placement_line)
            .map(|p| PlacementRecord::new(p.name, p.position, p.institution, source))
            .collect();

        let matched = placements.len();
        let unique = self.dedup.apply(placements, |p| p.name.as_str());
        debug!(
            url = %source.url,
            matched,
            unique = unique.len(),
            "placement lines extracted"
        );
        unique
    }
}

/// Extracts placements with the default first-seen-wins deduplication.
pub fn extract_placements(raw_text: &str, source: &SourceDescriptor) -> Vec<PlacementRecord> {
    PlacementExtractor::default().extract(raw_text, source)
}

fn is_candidate(line: &str) -> bool {
    let len = char_len(line);
    if !(MIN_LINE_LEN..=MAX_LINE_LEN).contains(&len) {
        return false;
    }
    line.contains(':') || line.to_lowercase().contains(" at ")
}

/// Applies the templates to a single line. The first matching template
/// decides; if its name capture is rejected the line yields nothing.
pub fn parse_placement_line(line: &str) -> Option<ParsedPlacement> {
    let line = line.trim();
    let caps = TEMPLATES.iter().find_map(|re| re.captures(line))?;

    let name = caps[1].trim().trim_end_matches(&[':', ','][..]).to_string();
    let position = caps[2].trim().trim_end_matches(',').to_string();
    let institution = caps[3].trim().trim_end_matches('.').to_string();

    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&char_len(&name)) {
        return None;
    }
    let lower = name.to_lowercase();
    if NAME_NOISE.iter().any(|noise| lower.contains(noise)) {
        return None;
    }

    Some(ParsedPlacement {
        name,
        position,
        institution,
    })
}
