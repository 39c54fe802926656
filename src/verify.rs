//! Quick check of whether a fetched page lists individual alumni at all,
//! used to vet candidate URLs before writing extraction rules for them.

use once_cell::sync::Lazy;
use regex::Regex;

const MIN_RELEVANT_LEN: usize = 30;
const MAX_RELEVANT_LINES: usize = 30;

const LINE_KEYWORDS: [&str; 27] = [
    "professor", "postdoc", "economist", "researcher", "analyst", "director", "manager", "fellow",
    "scientist", "phd", "dr.", "university", "college", "institute", "bank", "government",
    "placement", "position", "joined", "hired", "appointed", "2020", "2021", "2022", "2023",
    "2024", "2025",
];

const INDIVIDUAL_MARKERS: [&str; 6] = [
    "assistant professor",
    "associate professor",
    "postdoc",
    "economist at",
    "joined",
    "hired",
];

const PLACEMENT_TERMS: [&str; 15] = [
    "professor", "postdoc", "post-doc", "postdoctoral", "phd", "dr.", "graduate", "alumni",
    "alum", "placement", "placed", "position", "appointed", "joined", "hired",
];

const INSTITUTION_TERMS: [&str; 7] = [
    "university",
    "college",
    "institute",
    "hospital",
    "bank",
    "government",
    "research",
];

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"20[12][0-9]").expect("year is a valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAssessment {
    pub relevant_lines: Vec<String>,
    pub has_individual_data: bool,
    pub has_placement_terms: bool,
    pub has_institution_terms: bool,
    pub has_years: bool,
}

impl PageAssessment {
    /// Names a role, an institution, and a year somewhere on the page.
    pub fn is_valid(&self) -> bool {
        self.has_placement_terms && self.has_institution_terms && self.has_years
    }
}

pub fn assess(text: &str) -> PageAssessment {
    let lower = text.to_lowercase();

    let relevant_lines = text
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_RELEVANT_LEN)
        .filter(|line| {
            let l = line.to_lowercase();
            LINE_KEYWORDS.iter().any(|kw| l.contains(kw))
        })
        .take(MAX_RELEVANT_LINES)
        .map(str::to_string)
        .collect();

    PageAssessment {
        relevant_lines,
        has_individual_data: INDIVIDUAL_MARKERS.iter().any(|m| lower.contains(m)),
        has_placement_terms: PLACEMENT_TERMS.iter().any(|t| lower.contains(t)),
        has_institution_terms: INSTITUTION_TERMS.iter().any(|t| lower.contains(t)),
        has_years: YEAR.is_match(text),
    }
}
