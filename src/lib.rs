//! Placement scraping for PhD program pages.
//!
//! Pages are fetched as rendered text ([`fetch`]), run through the line
//! heuristics in [`extract`], and written out as JSON for manual review
//! ([`output`]).

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod source;
pub mod verify;

pub use config::FetchConfig;
pub use error::{ConfigError, FetchError, OutputError};
pub use extract::{
    extract_graduates, extract_placements, DedupPolicy, GraduateExtractor, PlacementExtractor,
};
pub use fetch::{BlockDetector, FetchMode, FetchOutcome, Fetcher, PageTextProvider};
pub use record::{GraduateDocument, GraduatePlacement, GraduateRecord, PlacementRecord};
pub use source::SourceDescriptor;
