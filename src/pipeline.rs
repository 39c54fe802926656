use tracing::{info, warn};

use crate::extract::{GraduateExtractor, PlacementExtractor};
use crate::fetch::PageTextProvider;
use crate::record::{GraduateDocument, PlacementRecord};
use crate::source::SourceDescriptor;

/// Fetches and extracts each source in turn. A source whose fetch fails
/// contributes nothing; the batch keeps going.
pub fn collect_placements<P: PageTextProvider + ?Sized>(
    provider: &P,
    sources: &[SourceDescriptor],
    extractor: &PlacementExtractor,
) -> Vec<PlacementRecord> {
    let mut all = Vec::new();

    for source in sources {
        println!("\nExtracting from: {}", source.url);
        let placements = match provider.page_text(&source.url) {
            Ok(text) => extractor.extract(&text, source),
            Err(e) => {
                warn!(url = %source.url, error = %e, "fetch failed, skipping source");
                println!("  Error: {e}");
                continue;
            }
        };
        println!("  Found {} unique placements", placements.len());
        all.extend(placements);
    }

    info!(sources = sources.len(), placements = all.len(), "placement batch finished");
    all
}

/// Fetches one source and runs the year-scoped graduate extractor over it.
/// A failed fetch yields a document with no graduates.
pub fn collect_graduates<P: PageTextProvider + ?Sized>(
    provider: &P,
    source: &SourceDescriptor,
    extractor: &GraduateExtractor,
) -> GraduateDocument {
    println!("Fetching: {}", source.url);
    let graduates = match provider.page_text(&source.url) {
        Ok(text) => {
            println!("Content length: {} chars", text.chars().count());
            extractor.extract(&text)
        }
        Err(e) => {
            warn!(url = %source.url, error = %e, "fetch failed");
            println!("  Error: {e}");
            Vec::new()
        }
    };
    GraduateDocument::new(source.clone(), graduates)
}
