use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::config::FetchConfig;
use crate::error::FetchError;

/// One headless Chromium per fetch, driven on a private current-thread
/// runtime so callers stay blocking.
pub(crate) struct BrowserSession {
    config: FetchConfig,
    runtime: Runtime,
}

impl BrowserSession {
    pub(crate) fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(BrowserSession { config, runtime })
    }

    pub(crate) fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Launches a browser, hands `render` a blank page and returns its text.
    ///
    /// The timeout covers `render` only. The browser is closed and the
    /// handler task aborted on every path, including timeouts.
    pub(crate) fn run<F, Fut>(&self, url: &str, render: F) -> Result<String, FetchError>
    where
        F: FnOnce(Page) -> Fut,
        Fut: Future<Output = Result<String, FetchError>>,
    {
        self.runtime.block_on(async {
            let (mut browser, handler_task) = self.launch().await?;

            let result = bounded(url, self.config.timeout, async {
                let page = browser.new_page("about:blank").await.map_err(browser_error)?;
                render(page).await
            })
            .await;

            if let Err(e) = browser.close().await {
                debug!("browser close failed: {e}");
            }
            handler_task.abort();
            result
        })
    }

    async fn launch(&self) -> Result<(Browser, JoinHandle<()>), FetchError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(self.config.timeout)
            .window_size(1920, 1080)
            .arg(format!("--user-agent={}", self.config.user_agent))
            .arg("--lang=en-US")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox");
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder
            .build()
            .map_err(|e| FetchError::Browser(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(browser_error)?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    trace!("browser handler: {e}");
                }
            }
        });

        Ok((browser, handler_task))
    }
}

/// `work` cut off after `limit`. Always returns, so the caller's cleanup runs.
async fn bounded<T>(
    url: &str,
    limit: Duration,
    work: impl Future<Output = Result<T, FetchError>>,
) -> Result<T, FetchError> {
    match timeout(limit, work).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            url: url.to_string(),
            secs: limit.as_secs(),
        }),
    }
}

pub(crate) fn browser_error(e: impl Display) -> FetchError {
    FetchError::Browser(e.to_string())
}
