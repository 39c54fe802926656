use anyhow::{Context, Result};
use clap::Parser;

use placement_scraper::output::{OutputFile, PLACEMENTS_FILE};
use placement_scraper::pipeline::collect_placements;
use placement_scraper::{logging, report, source, FetchConfig, FetchMode, Fetcher, PlacementExtractor};

/// Extract placement lines from every configured source into one JSON file.
#[derive(Parser)]
#[command(name = "extract_placements", version)]
struct Cli {
    #[arg(value_enum, default_value_t = FetchMode::Auto)]
    mode: FetchMode,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let sources = source::configured_sources().context("failed to load sources")?;
    let out = OutputFile::create(PLACEMENTS_FILE)?;
    let fetcher = Fetcher::from_config(cli.mode, &FetchConfig::from_env())
        .context("failed to set up fetcher")?;

    let placements = collect_placements(&fetcher, &sources, &PlacementExtractor::default());
    report::print_placement_summary(&placements);

    let path = out.write_json(&placements)?;
    println!("\nSaved to {}", path.display());
    Ok(())
}
