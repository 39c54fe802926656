use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::source::SourceDescriptor;

/// A person with an immediate outcome, as found on a placement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub name: String,
    pub position: String,
    pub institution: String,
    pub source_program: String,
    pub source_degree: String,
    pub source_institution: String,
    pub source_institution_id: String,
    pub program_id: String,
    pub source_url: String,
}

impl PlacementRecord {
    pub fn new(name: String, position: String, institution: String, source: &SourceDescriptor) -> Self {
        PlacementRecord {
            name,
            position,
            institution,
            source_program: source.program_name.clone(),
            source_degree: source.degree.clone(),
            source_institution: source.institution_name.clone(),
            source_institution_id: source.institution_id.clone(),
            program_id: source.program_id.clone(),
            source_url: source.url.clone(),
        }
    }
}

/// Placement fields left empty for manual review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduatePlacement {
    pub position: Option<String>,
    pub institution: Option<String>,
    pub institution_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduateRecord {
    pub name: String,
    pub graduation_year: u16,
    pub note: Option<String>,
    pub placement: GraduatePlacement,
    pub advisor: Option<String>,
    pub thesis_title: Option<String>,
}

impl GraduateRecord {
    pub fn new(name: String, graduation_year: u16, note: Option<String>) -> Self {
        GraduateRecord {
            name,
            graduation_year,
            note,
            placement: GraduatePlacement::default(),
            advisor: None,
            thesis_title: None,
        }
    }
}

/// Output document of a year-scoped graduate extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduateDocument {
    pub source: SourceDescriptor,
    pub extraction_date: NaiveDate,
    pub graduates: Vec<GraduateRecord>,
}

impl GraduateDocument {
    pub fn new(source: SourceDescriptor, graduates: Vec<GraduateRecord>) -> Self {
        GraduateDocument {
            source,
            extraction_date: Utc::now().date_naive(),
            graduates,
        }
    }
}
