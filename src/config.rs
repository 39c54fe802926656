use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const TIMEOUT_ENV: &str = "PLACEMENT_FETCH_TIMEOUT_SECS";
pub const CHROMIUM_ENV: &str = "CHROMIUM_PATH";

const MIN_TIMEOUT_SECS: u64 = 30;
const MAX_TIMEOUT_SECS: u64 = 60;

pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Timing and browser settings shared by both fetch strategies.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    /// Pause after navigation before touching the page.
    pub settle_delay: Duration,
    pub expand_all_delay: Duration,
    pub toggle_delay: Duration,
    pub final_delay: Duration,
    pub max_toggles: usize,
    /// `textContent` wins over `innerText` when it is longer by more than this factor.
    pub hidden_content_ratio: f64,
    pub user_agent: String,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout: Duration::from_secs(MAX_TIMEOUT_SECS),
            settle_delay: Duration::from_secs(3),
            expand_all_delay: Duration::from_secs(2),
            toggle_delay: Duration::from_millis(300),
            final_delay: Duration::from_secs(1),
            max_toggles: 20,
            hidden_content_ratio: 1.5,
            user_agent: CHROME_USER_AGENT.to_string(),
            chrome_executable: None,
        }
    }
}

impl FetchConfig {
    /// Defaults, overridden by `PLACEMENT_FETCH_TIMEOUT_SECS` and `CHROMIUM_PATH`.
    pub fn from_env() -> Self {
        let mut config = FetchConfig::default();

        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(clamp_timeout(secs)),
                Err(e) => warn!("ignoring {TIMEOUT_ENV}={raw:?}: {e}"),
            }
        }

        if let Some(path) = env::var_os(CHROMIUM_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                config.chrome_executable = Some(path);
            } else {
                warn!("{CHROMIUM_ENV} points to non-existent file: {}", path.display());
            }
        }

        config
    }
}

fn clamp_timeout(secs: u64) -> u64 {
    let clamped = secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
    if clamped != secs {
        warn!("fetch timeout {secs}s out of range, using {clamped}s");
    }
    clamped
}
