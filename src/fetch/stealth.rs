use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::Page;
use tokio::time::sleep;
use tracing::debug;

use super::browser::{browser_error, BrowserSession};
use super::{render::html_to_text, FetchStrategy};
use crate::config::FetchConfig;
use crate::error::FetchError;

/// Navigator patches installed before any page script runs.
const STEALTH_SCRIPT: &str = r#"
Object.defineProperty(navigator, 'webdriver', { get: () => false });
Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en'] });
Object.defineProperty(navigator, 'plugins', {
    get: () => [
        { name: 'Chrome PDF Plugin', filename: 'internal-pdf-viewer', description: 'Portable Document Format' },
        { name: 'Chrome PDF Viewer', filename: 'mhjfbmdgcfjbbpaeojofohoefgiehjai', description: '' },
        { name: 'Native Client', filename: 'internal-nacl-plugin', description: '' },
    ],
});
window.chrome = window.chrome || { runtime: {} };
"#;

/// Headless Chromium with automation fingerprints masked. No clicking: the
/// page is read as it renders.
pub struct StealthFetcher {
    browser: BrowserSession,
}

impl StealthFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        Ok(StealthFetcher {
            browser: BrowserSession::new(config)?,
        })
    }

    async fn render(&self, page: Page, url: &str) -> Result<String, FetchError> {
        page.execute(AddScriptToEvaluateOnNewDocumentParams {
            source: STEALTH_SCRIPT.to_string(),
            include_command_line_api: None,
            world_name: None,
            run_immediately: None,
        })
        .await
        .map_err(browser_error)?;

        page.goto(url).await.map_err(browser_error)?;
        page.wait_for_navigation().await.map_err(browser_error)?;
        sleep(self.browser.config().settle_delay).await;

        // Serialized live DOM, so script-inserted content is included.
        let html = page.content().await.map_err(browser_error)?;
        debug!(url, bytes = html.len(), "stealth fetch rendered page");
        Ok(html_to_text(&html))
    }
}

impl FetchStrategy for StealthFetcher {
    fn name(&self) -> &'static str {
        "stealth"
    }

    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.browser.run(url, |page| self.render(page, url))
    }
}
