use chromiumoxide::page::Page;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tokio::time::sleep;
use tracing::{debug, info, trace};

use super::browser::{browser_error, BrowserSession};
use super::FetchStrategy;
use crate::config::FetchConfig;
use crate::error::FetchError;

const COLLAPSED_SELECTOR: &str = r#"[aria-expanded="false"]"#;

const EXPAND_ALL_LABEL: &str = "expand all";

/// Searched in order; real controls before generic containers.
const EXPAND_ALL_TIERS: [&str; 2] = [r#"button, a, [role="button"]"#, "span, div"];

static TIER_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    EXPAND_ALL_TIERS
        .iter()
        .map(|tier| Selector::parse(tier).expect("static selector"))
        .collect()
});

/// Clicks the innermost visible control labelled "Expand all", tier by tier;
/// evaluates to whether a click happened. Same rule as [`expand_all_target`].
static EXPAND_ALL_SCRIPT: Lazy<String> = Lazy::new(|| {
    format!(
        r#"
(() => {{
    const wanted = {label};
    const labelled = (el) => (el.textContent || '').trim().toLowerCase() === wanted;
    for (const tier of {tiers}) {{
        const hits = Array.from(document.querySelectorAll(tier)).filter(labelled);
        const target = hits.find((el) =>
            el.offsetParent !== null && !hits.some((other) => other !== el && el.contains(other)));
        if (target) {{
            target.click();
            return true;
        }}
    }}
    return false;
}})()
"#,
        label = serde_json::json!(EXPAND_ALL_LABEL),
        tiers = serde_json::json!(EXPAND_ALL_TIERS),
    )
});

/// Headless Chromium session that opens collapsed sections before reading
/// the page text.
pub struct ExpandFetcher {
    browser: BrowserSession,
}

impl ExpandFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        Ok(ExpandFetcher {
            browser: BrowserSession::new(config)?,
        })
    }

    async fn render(&self, page: Page, url: &str) -> Result<String, FetchError> {
        let config = self.browser.config();
        page.goto(url).await.map_err(browser_error)?;
        page.wait_for_navigation().await.map_err(browser_error)?;
        sleep(config.settle_delay).await;

        match click_expand_all(&page).await {
            Ok(true) => {
                info!(url, "clicked 'Expand all'");
                sleep(config.expand_all_delay).await;
            }
            Ok(false) => {}
            Err(e) => debug!(url, "expand-all click failed: {e}"),
        }

        self.open_collapsed(&page).await;
        sleep(config.final_delay).await;

        let inner_text = page
            .find_element("body")
            .await
            .map_err(browser_error)?
            .inner_text()
            .await
            .map_err(browser_error)?
            .unwrap_or_default();
        let text_content: String = page
            .evaluate("document.body.textContent")
            .await
            .map_err(browser_error)?
            .into_value()
            .map_err(browser_error)?;

        let (text, hidden) =
            choose_rendered_text(inner_text, text_content, config.hidden_content_ratio);
        if hidden {
            info!(url, chars = text.chars().count(), "hidden content detected, using textContent");
        }
        Ok(text)
    }

    async fn open_collapsed(&self, page: &Page) {
        let toggles = match page.find_elements(COLLAPSED_SELECTOR).await {
            Ok(toggles) => toggles,
            Err(e) => {
                debug!("collapsed-section lookup failed: {e}");
                return;
            }
        };
        if toggles.is_empty() {
            return;
        }

        info!(count = toggles.len(), "expanding collapsed sections");
        for toggle in toggles.iter().take(self.browser.config().max_toggles) {
            match toggle.click().await {
                Ok(_) => sleep(self.browser.config().toggle_delay).await,
                Err(e) => trace!("toggle click failed: {e}"),
            }
        }
    }
}

impl FetchStrategy for ExpandFetcher {
    fn name(&self) -> &'static str {
        "expand"
    }

    fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.browser.run(url, |page| self.render(page, url))
    }
}

/// Skips the click script when the rendered DOM has no candidate at all.
async fn click_expand_all(page: &Page) -> Result<bool, FetchError> {
    let html = page.content().await.map_err(browser_error)?;
    match expand_all_target(&Html::parse_document(&html)) {
        Some(target) => trace!(tag = target.value().name(), "expand-all control found"),
        None => return Ok(false),
    }

    page.evaluate(EXPAND_ALL_SCRIPT.as_str())
        .await
        .map_err(browser_error)?
        .into_value()
        .map_err(browser_error)
}

/// The element an "Expand all" click should land on.
///
/// Buttons and links are searched before spans and divs. Within a tier, an
/// element that contains another labelled match is skipped, so a wrapper
/// never shadows the control inside it. Visibility is only known in the
/// browser and is checked there.
pub fn expand_all_target(document: &Html) -> Option<ElementRef<'_>> {
    TIER_SELECTORS.iter().find_map(|selector| {
        let hits: Vec<ElementRef> = document
            .select(selector)
            .filter(|el| has_expand_all_label(el))
            .collect();
        hits.iter().copied().find(|el| {
            !hits
                .iter()
                .any(|other| other.id() != el.id() && other.ancestors().any(|a| a.id() == el.id()))
        })
    })
}

fn has_expand_all_label(el: &ElementRef) -> bool {
    el.text().collect::<String>().trim().to_lowercase() == EXPAND_ALL_LABEL
}

/// Prefers the full `textContent` over the visible `innerText` when it is
/// longer by more than `ratio`, which means collapsed content stayed hidden.
/// The flag reports which one was picked.
pub fn choose_rendered_text(inner_text: String, text_content: String, ratio: f64) -> (String, bool) {
    let visible = inner_text.chars().count() as f64;
    let full = text_content.chars().count() as f64;
    if full > visible * ratio {
        (text_content, true)
    } else {
        (inner_text, false)
    }
}
