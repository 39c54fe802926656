use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

use placement_scraper::output::{OutputFile, RAW_CONTENT_FILE};
use placement_scraper::report::preview;
use placement_scraper::{logging, FetchConfig, FetchMode, Fetcher, PageTextProvider};

const DEFAULT_URL: &str = "https://www.american.edu/cas/economics/phd/job-market-candidates.cfm";
const PREVIEW_CHARS: usize = 3000;

/// Fetch one page's rendered text and save it for inspection.
#[derive(Parser)]
#[command(name = "placement_scraper", version)]
struct Cli {
    /// Page to fetch.
    #[arg(default_value = DEFAULT_URL)]
    url: String,

    /// auto: expand, falling back to stealth; stealth: hardened HTTP only;
    /// expand: headless browser with section expansion.
    #[arg(value_enum, default_value_t = FetchMode::Auto)]
    mode: FetchMode,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    Url::parse(&cli.url).with_context(|| format!("invalid url {:?}", cli.url))?;

    let out = OutputFile::create(RAW_CONTENT_FILE)?;
    let fetcher = Fetcher::from_config(cli.mode, &FetchConfig::from_env())
        .context("failed to set up fetcher")?;

    println!("Fetching ({}): {}", fetcher.mode(), cli.url);
    let text = fetcher
        .page_text(&cli.url)
        .with_context(|| format!("failed to fetch {}", cli.url))?;

    let path = out.write_text(&text)?;
    println!("Saved to {} ({} chars)", path.display(), text.chars().count());
    println!("\n{}", "=".repeat(70));
    println!("{}", preview(&text, PREVIEW_CHARS));
    println!("\n... (truncated)");

    Ok(())
}
