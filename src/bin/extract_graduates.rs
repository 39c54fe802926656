use anyhow::{Context, Result};
use clap::Parser;

use placement_scraper::output::{graduates_file_name, OutputFile};
use placement_scraper::pipeline::collect_graduates;
use placement_scraper::{logging, report, source, FetchConfig, FetchMode, Fetcher, GraduateExtractor};

const DEFAULT_URL: &str = "https://www.amse-aixmarseille.fr/en/study/phd/phd-placement";

/// Extract graduates listed under year headings for one configured source.
#[derive(Parser)]
#[command(name = "extract_graduates", version)]
struct Cli {
    /// URL of a configured source.
    #[arg(default_value = DEFAULT_URL)]
    url: String,

    #[arg(value_enum, default_value_t = FetchMode::Auto)]
    mode: FetchMode,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let sources = source::configured_sources().context("failed to load sources")?;
    let target = source::find_source(&sources, &cli.url)?;
    let out = OutputFile::create(graduates_file_name(target))?;
    let fetcher = Fetcher::from_config(cli.mode, &FetchConfig::from_env())
        .context("failed to set up fetcher")?;

    let doc = collect_graduates(&fetcher, target, &GraduateExtractor::default());
    let path = out.write_json(&doc)?;
    println!("Saved to {}", path.display());

    report::print_graduate_summary(&doc);
    Ok(())
}
