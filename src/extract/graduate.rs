use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{char_len, DedupPolicy};
use crate::record::GraduateRecord;

const MIN_LINE_LEN: usize = 3;
const MAX_LINE_LEN: usize = 100;
const MIN_NAME_LEN: usize = 3;

/// Navigation and UI labels that only ever appear as a whole line.
const NAV_LABELS: [&str; 18] = [
    "youtube",
    "linkedin",
    "bluesky",
    "fr",
    "en",
    "events",
    "people",
    "research",
    "study",
    "contact us",
    "about us",
    "news",
    "press",
    "job market",
    "see candidates",
    "customize",
    "decline",
    "accept",
];

/// Fragments of longer navigation strings.
const NAV_FRAGMENTS: [&str; 14] = [
    "skip to",
    "cookie",
    "legal notice",
    "intranet",
    "working papers",
    "newsletter",
    "departments",
    "publications",
    "grants",
    "phd program",
    "master",
    "how to apply",
    "visiting",
    "courses",
];

static YEAR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^20[12][0-9]$").expect("year marker is a valid regex"));
static NAME_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-ZÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏ]").expect("name start is a valid regex")
});
static TRAILING_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]+\)\s*$").expect("trailing note is a valid regex"));
static NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("note is a valid regex"));

/// Collects graduate names listed under bare year headings.
#[derive(Debug, Clone, Copy)]
pub struct GraduateExtractor {
    pub dedup: DedupPolicy,
}

impl Default for GraduateExtractor {
    fn default() -> Self {
        GraduateExtractor {
            dedup: DedupPolicy::KeepAll,
        }
    }
}

impl GraduateExtractor {
    pub fn with_dedup(dedup: DedupPolicy) -> Self {
        GraduateExtractor { dedup }
    }

    pub fn extract(&self, raw_text: &str) -> Vec<GraduateRecord> {
        let mut graduates = Vec::new();
        let mut current_year: Option<u16> = None;

        for line in raw_text.lines().map(str::trim) {
            if line.is_empty() {
                continue;
            }
            if YEAR_MARKER.is_match(line) {
                current_year = line.parse().ok();
                continue;
            }
            let Some(year) = current_year else {
                continue;
            };
            if is_navigation(line) || !NAME_START.is_match(line) {
                continue;
            }
            if let Some(record) = parse_graduate_line(line, year) {
                graduates.push(record);
            }
        }

        let matched = graduates.len();
        let kept = self.dedup.apply(graduates, |g| g.name.as_str());
        debug!(matched, kept = kept.len(), "graduate lines extracted");
        kept
    }
}

/// Extracts graduates with the default keep-all policy.
pub fn extract_graduates(raw_text: &str) -> Vec<GraduateRecord> {
    GraduateExtractor::default().extract(raw_text)
}

fn is_navigation(line: &str) -> bool {
    if !(MIN_LINE_LEN..=MAX_LINE_LEN).contains(&char_len(line)) {
        return true;
    }
    let lower = line.to_lowercase();
    NAV_LABELS.contains(&lower.as_str()) || NAV_FRAGMENTS.iter().any(|f| lower.contains(f))
}

fn parse_graduate_line(line: &str, year: u16) -> Option<GraduateRecord> {
    let name = TRAILING_NOTE.replace(line, "").trim().to_string();
    if char_len(&name) < MIN_NAME_LEN || !name.contains(' ') {
        return None;
    }
    let note = NOTE.captures(line).map(|c| c[1].to_string());
    Some(GraduateRecord::new(name, year, note))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_heading_scopes_names() {
        let out = extract_graduates("2023\nJane Smith (AMSE 4th year PhD grant)\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Jane Smith");
        assert_eq!(out[0].graduation_year, 2023);
        assert_eq!(out[0].note.as_deref(), Some("AMSE 4th year PhD grant"));
        assert!(out[0].placement.position.is_none());
        assert!(out[0].advisor.is_none());
    }

    #[test]
    fn denylisted_label_keeps_year() {
        let out = extract_graduates("2024\nLinkedIn\nPaul Martin\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Paul Martin");
        assert_eq!(out[0].graduation_year, 2024);
    }

    #[test]
    fn names_before_any_year_are_ignored() {
        let out = extract_graduates("Paul Martin\n2021\nLéa Dubois\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Léa Dubois");
        assert_eq!(out[0].graduation_year, 2021);
    }

    #[test]
    fn accented_capital_starts_a_name() {
        let out = extract_graduates("2020\nÉmile Zola\n");
        assert_eq!(out[0].name, "Émile Zola");
    }

    #[test]
    fn years_outside_range_are_not_markers() {
        let out = extract_graduates("2030\nPaul Martin\n2009\nAnne Roy\n");
        assert!(out.is_empty());
    }

    #[test]
    fn fragments_and_single_words_are_skipped() {
        let text = "2022\nSkip to main content\nCookie settings\nMadonna\nHow To Apply now\nAnne Roy";
        let out = extract_graduates(text);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Anne Roy");
    }

    #[test]
    fn lowercase_lines_are_not_names() {
        assert!(extract_graduates("2022\nanne roy\n").is_empty());
    }

    #[test]
    fn note_is_captured_even_when_not_trailing() {
        let out = extract_graduates("2022\nAnne Roy (grant) Lyon\n");
        assert_eq!(out[0].name, "Anne Roy (grant) Lyon");
        assert_eq!(out[0].note.as_deref(), Some("grant"));
    }

    #[test]
    fn duplicates_survive_by_default() {
        let out = extract_graduates("2022\nAnne Roy\n2023\nAnne Roy\n");
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].graduation_year, 2023);

        let deduped =
            GraduateExtractor::with_dedup(DedupPolicy::FirstSeenByName).extract("2022\nAnne Roy\n2023\nAnne Roy\n");
        assert_eq!(deduped.len(), 1);
    }

    #[test]
    fn overlong_lines_are_skipped() {
        let line = format!("Anne {}", "R".repeat(96));
        assert!(extract_graduates(&format!("2022\n{line}\n")).is_empty());
    }
}
