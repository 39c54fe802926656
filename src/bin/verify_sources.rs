use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use placement_scraper::verify::{assess, PageAssessment};
use placement_scraper::{logging, report, source, FetchConfig, FetchMode, Fetcher, PageTextProvider};

/// Check which configured sources actually list individual placements.
#[derive(Parser)]
#[command(name = "verify_sources", version)]
struct Cli {
    #[arg(value_enum, default_value_t = FetchMode::Auto)]
    mode: FetchMode,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let sources = source::configured_sources().context("failed to load sources")?;
    let fetcher = Fetcher::from_config(cli.mode, &FetchConfig::from_env())
        .context("failed to set up fetcher")?;

    let mut results = Vec::with_capacity(sources.len());
    for s in &sources {
        let label = format!("{} {} {}", s.institution_name, s.program_name, s.degree);
        let assessment = match fetcher.page_text(&s.url) {
            Ok(text) => assess(&text),
            Err(e) => {
                warn!(url = %s.url, error = %e, "fetch failed");
                println!("\nERROR: {label}: {e}");
                PageAssessment::default()
            }
        };
        report::print_assessment(&label, &s.url, &assessment);
        results.push((label, &s.url, assessment.is_valid()));
    }

    println!("\n{}", report::rule());
    println!("SUMMARY");
    println!("{}", report::rule());
    for (label, url, valid) in results {
        let status = if valid { "VALID" } else { "INVALID" };
        println!("{status}: {label}");
        println!("         {url}");
    }
    Ok(())
}
