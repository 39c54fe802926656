//! Human-readable console summaries. Not a machine contract.

use std::collections::BTreeMap;

use crate::record::{GraduateDocument, GraduateRecord, PlacementRecord};
use crate::verify::PageAssessment;

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn print_placement_summary(placements: &[PlacementRecord]) {
    println!("\n{}", rule());
    println!("TOTAL: {} placements extracted", placements.len());
    println!("{}", rule());

    println!("\nSample entries:");
    for p in placements.iter().take(10) {
        println!("  - {}: {} @ {}", p.name, p.position, p.institution);
        println!(
            "    (from {} in {} at {})",
            p.source_degree, p.source_program, p.source_institution
        );
    }
}

/// Graduate counts keyed by year, newest first when iterated in reverse.
pub fn graduates_by_year(graduates: &[GraduateRecord]) -> BTreeMap<u16, usize> {
    let mut years = BTreeMap::new();
    for g in graduates {
        *years.entry(g.graduation_year).or_insert(0) += 1;
    }
    years
}

pub fn print_graduate_summary(doc: &GraduateDocument) {
    println!("\nExtracted {} graduates", doc.graduates.len());

    println!("\nBy year:");
    for (year, count) in graduates_by_year(&doc.graduates).iter().rev() {
        println!("  {year}: {count} graduates");
    }

    println!("\nSample entries:");
    for g in doc.graduates.iter().take(5) {
        println!("  - {} ({})", g.name, g.graduation_year);
    }
}

pub fn print_assessment(label: &str, url: &str, assessment: &PageAssessment) {
    println!("\n{}", rule());
    println!("PROGRAM: {label}");
    println!("URL: {url}");
    println!("{}", rule());

    for line in assessment_lines(assessment) {
        println!("{line}");
    }
}

fn assessment_lines(assessment: &PageAssessment) -> Vec<String> {
    let mut lines = Vec::new();
    if assessment.relevant_lines.is_empty() {
        lines.push("\nNO PLACEMENT DATA FOUND".to_string());
    } else {
        lines.push("\nRELEVANT CONTENT (alumni/placement info):".to_string());
        lines.push("-".repeat(50));
        for line in &assessment.relevant_lines {
            lines.push(format!("  {}", line.chars().take(120).collect::<String>()));
        }
    }
    lines.push(format!("\nHAS INDIVIDUAL ALUMNI DATA: {}", assessment.has_individual_data));
    lines.push(format!("Has placement terms: {}", assessment.has_placement_terms));
    lines.push(format!("Has institution terms: {}", assessment.has_institution_terms));
    lines.push(format!("Has years: {}", assessment.has_years));
    lines
}

/// First `max_chars` characters of `text`, for previews.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_year() {
        let grads = vec![
            GraduateRecord::new("Anne Roy".into(), 2022, None),
            GraduateRecord::new("Paul Martin".into(), 2023, None),
            GraduateRecord::new("Léa Dubois".into(), 2023, None),
        ];
        let years = graduates_by_year(&grads);
        assert_eq!(years.get(&2023), Some(&2));
        assert_eq!(years.keys().next_back(), Some(&2023));
    }

    #[test]
    fn assessment_shows_every_validity_flag() {
        let assessment = PageAssessment {
            has_placement_terms: true,
            has_institution_terms: false,
            has_years: true,
            ..PageAssessment::default()
        };
        assert!(!assessment.is_valid());

        let lines = assessment_lines(&assessment);
        assert_eq!(lines[0], "\nNO PLACEMENT DATA FOUND");
        assert!(lines.contains(&"Has placement terms: true".to_string()));
        assert!(lines.contains(&"Has institution terms: false".to_string()));
        assert!(lines.contains(&"Has years: true".to_string()));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("Éléonore", 3), "Élé");
        assert_eq!(preview("short", 3000), "short");
    }
}
