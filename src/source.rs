use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Environment variable pointing at a JSON array of sources to use instead
/// of the built-in list.
pub const SOURCES_ENV: &str = "PLACEMENT_SOURCES";

/// Static metadata for one scrape target. Copied by value onto every record
/// it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub url: String,
    pub program_name: String,
    pub degree: String,
    #[serde(rename = "institution")]
    pub institution_name: String,
    pub institution_id: String,
    pub program_id: String,
}

impl SourceDescriptor {
    fn new(
        url: &str,
        program_name: &str,
        institution_name: &str,
        institution_id: &str,
        program_id: &str,
    ) -> Self {
        SourceDescriptor {
            url: url.to_string(),
            program_name: program_name.to_string(),
            degree: "PhD".to_string(),
            institution_name: institution_name.to_string(),
            institution_id: institution_id.to_string(),
            program_id: program_id.to_string(),
        }
    }

    /// Filesystem-friendly `<institution>-<program>` slug.
    pub fn slug(&self) -> String {
        format!(
            "{}-{}",
            slugify(&self.institution_name),
            slugify(&self.program_name)
        )
    }
}

fn slugify(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

const AMERICAN_UNIVERSITY: &str = "American University";
const AMERICAN_UNIVERSITY_ID: &str = "7b2afcb2-8f90-4981-92bc-eb3a5f15515a";

pub fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new(
            "https://www.american.edu/cas/economics/phd/job-market-candidates.cfm",
            "Economics",
            AMERICAN_UNIVERSITY,
            AMERICAN_UNIVERSITY_ID,
            "4e8f2e8b-6806-4602-8405-2050f3e8793b",
        ),
        SourceDescriptor::new(
            "https://www.american.edu/soc/communication-studies/phd/achievements-and-placements.cfm",
            "Communication",
            AMERICAN_UNIVERSITY,
            AMERICAN_UNIVERSITY_ID,
            "552124a7-c5ec-480d-807a-92cd26583a7e",
        ),
        SourceDescriptor::new(
            "https://www.american.edu/cas/psychology/clinical-research/alums.cfm",
            "Clinical Psychology",
            AMERICAN_UNIVERSITY,
            AMERICAN_UNIVERSITY_ID,
            "1e0f49da-a0fe-4802-95ec-d79ada0bef1b",
        ),
        SourceDescriptor::new(
            "https://www.american.edu/sis/phd/achievements-placements.cfm",
            "International Relations",
            AMERICAN_UNIVERSITY,
            AMERICAN_UNIVERSITY_ID,
            "64c32c73-7530-4cb3-8e0c-f1518c30bafd",
        ),
        SourceDescriptor::new(
            "https://www.amse-aixmarseille.fr/en/study/phd/phd-placement",
            "Economics",
            "Aix-Marseille University",
            "eb322b5c-965a-45fe-8dbf-3635ea1fa972",
            "9e18f0a1-8b9e-4195-b2ca-0d6528e4027d",
        ),
    ]
}

/// The source list for this run: the file named by [`SOURCES_ENV`] when set,
/// otherwise [`default_sources`].
pub fn configured_sources() -> Result<Vec<SourceDescriptor>, ConfigError> {
    match env::var_os(SOURCES_ENV) {
        Some(path) => load_sources(Path::new(&path)),
        None => Ok(default_sources()),
    }
}

pub fn load_sources(path: &Path) -> Result<Vec<SourceDescriptor>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: PathBuf::from(path),
        source,
    })?;
    let sources: Vec<SourceDescriptor> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })?;

    for s in &sources {
        Url::parse(&s.url).map_err(|source| ConfigError::InvalidUrl {
            url: s.url.clone(),
            source,
        })?;
    }
    Ok(sources)
}

/// Finds the configured source whose URL matches `url`, ignoring a trailing
/// slash.
pub fn find_source<'a>(
    sources: &'a [SourceDescriptor],
    url: &str,
) -> Result<&'a SourceDescriptor, ConfigError> {
    let wanted = url.trim_end_matches('/');
    sources
        .iter()
        .find(|s| s.url.trim_end_matches('/') == wanted)
        .ok_or_else(|| ConfigError::UnknownSource(url.to_string()))
}
