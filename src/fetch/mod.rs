//! Page-text providers.
//!
//! Two headless Chromium strategies produce rendered text for a URL: one
//! with automation fingerprints masked ([`StealthFetcher`]) and one that
//! expands collapsed sections ([`ExpandFetcher`]). [`Fetcher`] picks between them by
//! [`FetchMode`].

mod browser;
mod expand;
mod render;
mod stealth;

use std::fmt;

use tracing::{info, warn};

use crate::config::FetchConfig;
use crate::error::FetchError;

pub use expand::{choose_rendered_text, expand_all_target, ExpandFetcher};
pub use render::html_to_text;
pub use stealth::StealthFetcher;

/// Anything that can turn a URL into rendered page text.
pub trait PageTextProvider {
    fn page_text(&self, url: &str) -> Result<String, FetchError>;
}

/// One way of fetching a page.
pub trait FetchStrategy {
    fn name(&self) -> &'static str;
    fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FetchMode {
    /// Expand first, fall back to stealth when blocked or failing.
    #[default]
    Auto,
    Stealth,
    Expand,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FetchMode::Auto => "auto",
            FetchMode::Stealth => "stealth",
            FetchMode::Expand => "expand",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    ChallengeMarker(String),
    TooShort { len: usize, min: usize },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::ChallengeMarker(m) => write!(f, "challenge marker {m:?}"),
            BlockReason::TooShort { len, min } => write!(f, "only {len} chars (< {min})"),
        }
    }
}

/// Heuristic for "this page is an anti-bot wall, not the content".
#[derive(Debug, Clone)]
pub struct BlockDetector {
    pub markers: Vec<String>,
    pub min_len: usize,
}

impl Default for BlockDetector {
    fn default() -> Self {
        BlockDetector {
            markers: vec!["cloudflare".to_string(), "verify you are human".to_string()],
            min_len: 500,
        }
    }
}

impl BlockDetector {
    pub fn inspect(&self, text: &str) -> Option<BlockReason> {
        let lower = text.to_lowercase();
        if let Some(marker) = self.markers.iter().find(|m| lower.contains(m.as_str())) {
            return Some(BlockReason::ChallengeMarker(marker.clone()));
        }
        let len = text.chars().count();
        if len < self.min_len {
            return Some(BlockReason::TooShort {
                len,
                min: self.min_len,
            });
        }
        None
    }
}

/// Result of one strategy attempt, classified for fallback decisions.
#[derive(Debug)]
pub enum FetchOutcome {
    Page(String),
    Blocked { text: String, reason: BlockReason },
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn classify(result: Result<String, FetchError>, detector: &BlockDetector) -> Self {
        match result {
            Err(e) => FetchOutcome::Failed(e),
            Ok(text) => match detector.inspect(&text) {
                Some(reason) => FetchOutcome::Blocked { text, reason },
                None => FetchOutcome::Page(text),
            },
        }
    }
}

/// Mode-driven provider over a stealth and an expand strategy.
pub struct Fetcher<S = StealthFetcher, E = ExpandFetcher> {
    mode: FetchMode,
    stealth: S,
    expand: E,
    detector: BlockDetector,
}

impl Fetcher {
    pub fn from_config(mode: FetchMode, config: &FetchConfig) -> Result<Self, FetchError> {
        Ok(Fetcher::new(
            mode,
            StealthFetcher::new(config.clone())?,
            ExpandFetcher::new(config.clone())?,
        ))
    }
}

impl<S: FetchStrategy, E: FetchStrategy> Fetcher<S, E> {
    pub fn new(mode: FetchMode, stealth: S, expand: E) -> Self {
        Fetcher {
            mode,
            stealth,
            expand,
            detector: BlockDetector::default(),
        }
    }

    pub fn with_detector(mut self, detector: BlockDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    fn fetch_auto(&self, url: &str) -> Result<String, FetchError> {
        let first = self.attempt(&self.expand, url);
        match FetchOutcome::classify(first, &self.detector) {
            FetchOutcome::Page(text) => Ok(text),
            FetchOutcome::Blocked { text, reason } => {
                let chars = text.chars().count();
                warn!(url, %reason, chars, "{} fetch looks blocked, retrying with {}", self.expand.name(), self.stealth.name());
                self.attempt(&self.stealth, url)
            }
            FetchOutcome::Failed(e) => {
                warn!(url, error = %e, "{} fetch failed, trying {}", self.expand.name(), self.stealth.name());
                self.attempt(&self.stealth, url)
            }
        }
    }

    fn attempt(&self, strategy: &dyn FetchStrategy, url: &str) -> Result<String, FetchError> {
        info!(url, strategy = strategy.name(), "fetching");
        strategy.fetch_text(url)
    }
}

impl<S: FetchStrategy, E: FetchStrategy> PageTextProvider for Fetcher<S, E> {
    fn page_text(&self, url: &str) -> Result<String, FetchError> {
        match self.mode {
            FetchMode::Stealth => self.attempt(&self.stealth, url),
            FetchMode::Expand => self.attempt(&self.expand, url),
            FetchMode::Auto => self.fetch_auto(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Stub {
        name: &'static str,
        reply: fn() -> Result<String, FetchError>,
        calls: Cell<usize>,
    }

    impl Stub {
        fn new(name: &'static str, reply: fn() -> Result<String, FetchError>) -> Self {
            Stub {
                name,
                reply,
                calls: Cell::new(0),
            }
        }
    }

    impl FetchStrategy for Stub {
        fn name(&self) -> &'static str {
            self.name
        }

        fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
            self.calls.set(self.calls.get() + 1);
            (self.reply)()
        }
    }

    fn long_page() -> Result<String, FetchError> {
        Ok("placement text ".repeat(50))
    }

    fn stealth_page() -> Result<String, FetchError> {
        Ok("stealth".to_string())
    }

    fn challenge() -> Result<String, FetchError> {
        Ok(format!("Verify you are human {}", "x".repeat(600)))
    }

    fn broken() -> Result<String, FetchError> {
        Err(FetchError::Browser("crashed".into()))
    }

    #[test]
    fn auto_keeps_good_expand_result() {
        let f = Fetcher::new(FetchMode::Auto, Stub::new("stealth", stealth_page), Stub::new("expand", long_page));
        assert!(f.page_text("https://example.edu").unwrap().starts_with("placement"));
        assert_eq!(f.stealth.calls.get(), 0);
    }

    #[test]
    fn auto_falls_back_on_challenge_or_error() {
        let f = Fetcher::new(FetchMode::Auto, Stub::new("stealth", stealth_page), Stub::new("expand", challenge));
        assert_eq!(f.page_text("https://example.edu").unwrap(), "stealth");

        let f = Fetcher::new(FetchMode::Auto, Stub::new("stealth", stealth_page), Stub::new("expand", broken));
        assert_eq!(f.page_text("https://example.edu").unwrap(), "stealth");
        assert_eq!(f.stealth.calls.get(), 1);
    }

    #[test]
    fn auto_falls_back_on_short_page_unless_threshold_lowered() {
        let f = Fetcher::new(FetchMode::Auto, Stub::new("stealth", stealth_page), Stub::new("expand", stealth_page));
        f.page_text("https://example.edu").unwrap();
        assert_eq!(f.stealth.calls.get(), 1);

        let f = Fetcher::new(FetchMode::Auto, Stub::new("stealth", long_page), Stub::new("expand", stealth_page))
            .with_detector(BlockDetector {
                markers: vec![],
                min_len: 0,
            });
        assert_eq!(f.page_text("https://example.edu").unwrap(), "stealth");
        assert_eq!(f.stealth.calls.get(), 0);
    }

    #[test]
    fn explicit_modes_do_not_fall_back() {
        let f = Fetcher::new(FetchMode::Expand, Stub::new("stealth", stealth_page), Stub::new("expand", broken));
        assert!(f.page_text("https://example.edu").is_err());
        assert_eq!(f.stealth.calls.get(), 0);

        let f = Fetcher::new(FetchMode::Stealth, Stub::new("stealth", challenge), Stub::new("expand", long_page));
        assert!(f.page_text("https://example.edu").unwrap().starts_with("Verify"));
        assert_eq!(f.expand.calls.get(), 0);
    }

    #[test]
    fn detector_reports_reason() {
        let d = BlockDetector::default();
        assert_eq!(
            d.inspect("Checking your browser - Cloudflare"),
            Some(BlockReason::ChallengeMarker("cloudflare".into()))
        );
        assert_eq!(
            d.inspect("short"),
            Some(BlockReason::TooShort { len: 5, min: 500 })
        );
        assert_eq!(d.inspect(&"a".repeat(500)), None);
    }

    #[test]
    fn mode_parses_through_clap_only() {
        use clap::ValueEnum;

        assert_eq!(FetchMode::from_str("Expand", true), Ok(FetchMode::Expand));
        assert!(FetchMode::from_str("scrape", true).is_err());
        assert_eq!(FetchMode::default().to_string(), "auto");
    }

    #[test]
    fn blocked_outcome_keeps_the_text() {
        let outcome = FetchOutcome::classify(Ok("tiny".to_string()), &BlockDetector::default());
        match outcome {
            FetchOutcome::Blocked { text, reason } => {
                assert_eq!(text, "tiny");
                assert_eq!(reason, BlockReason::TooShort { len: 4, min: 500 });
            }
            other => panic!("expected blocked, got {other:?}"),
        }
    }
}
