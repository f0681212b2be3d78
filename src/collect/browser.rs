// src/collect/browser.rs
// =============================================================================
// Renders a page in headless Chrome and reads the href of every <a> element.
//
// One BrowserSession is created at startup and reused for the whole run.
// Dropping it closes the tab, and the Chrome process goes away with the
// last Browser handle - this happens on every exit path, errors included.
//
// headless_chrome is a blocking API. We call it through
// tokio::task::block_in_place, which requires the multi-thread runtime
// that #[tokio::main] gives us.
// =============================================================================

use super::AnchorSource;
use anyhow::{anyhow, Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

// Lists every <a> element and reports its resolved href property, or null
// when the attribute is missing. SVG anchors expose href as an object, so
// for those we fall back to the raw attribute.
//
// Serialized to a JSON string because evaluate() only returns primitives
// by value.
const ANCHOR_SCRIPT: &str = r#"JSON.stringify(
    Array.from(document.getElementsByTagName("a"), (a) => {
        if (!a.hasAttribute("href")) return null;
        return typeof a.href === "string" ? a.href : a.getAttribute("href");
    })
)"#;

/// How to launch Chrome.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Explicit Chrome binary; None lets headless_chrome search for one.
    pub chrome_path: Option<PathBuf>,
    /// Upper bound on navigation and page load.
    pub navigation_timeout: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            navigation_timeout: Duration::from_secs(30),
        }
    }
}

/// A headless Chrome instance with one open tab.
pub struct BrowserSession {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl BrowserSession {
    // Launches Chrome in headless mode
    //
    // The sandbox is disabled inside containers, where Chrome usually can't
    // set it up (detected via /.dockerenv or LINK_AUDIT_CONTAINER).
    pub fn launch(config: &BrowserConfig) -> Result<Self> {
        let sandbox = !is_container();
        info!(
            "Launching headless Chrome (sandbox: {}, path: {})",
            sandbox,
            config
                .chrome_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "auto".to_string())
        );

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(sandbox)
            .path(config.chrome_path.clone())
            .build()
            .map_err(|e| anyhow!("Failed to build Chrome launch options: {}", e))?;

        let browser = Browser::new(options)
            .map_err(|e| anyhow!("Failed to launch headless Chrome: {}", e))?;

        let tab = browser
            .new_tab()
            .map_err(|e| anyhow!("Failed to create browser tab: {}", e))?;
        tab.set_default_timeout(config.navigation_timeout);

        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    fn read_anchor_hrefs(&self, page_url: &str) -> Result<Vec<Option<String>>> {
        info!("Navigating to {}", page_url);

        self.tab
            .navigate_to(page_url)
            .map_err(|e| anyhow!("Failed to navigate to {}: {}", page_url, e))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| anyhow!("Page failed to load for {}: {}", page_url, e))?;

        let result = self
            .tab
            .evaluate(ANCHOR_SCRIPT, false)
            .map_err(|e| anyhow!("Failed to read anchors on {}: {}", page_url, e))?;

        let hrefs = decode_anchor_payload(result.value)
            .with_context(|| format!("Unexpected anchor list from {}", page_url))?;

        debug!("Found {} anchor element(s) on {}", hrefs.len(), page_url);
        Ok(hrefs)
    }
}

impl AnchorSource for BrowserSession {
    async fn anchor_hrefs(&self, page_url: &str) -> Result<Vec<Option<String>>> {
        tokio::task::block_in_place(|| self.read_anchor_hrefs(page_url))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // The browser may already be gone (idle timeout, crash); nothing to do then
        if let Err(e) = self.tab.close(false) {
            debug!("Closing browser tab failed: {}", e);
        }
    }
}

fn is_container() -> bool {
    std::env::var("LINK_AUDIT_CONTAINER").is_ok() || Path::new("/.dockerenv").exists()
}

// Turns the anchor script's return value back into a list
fn decode_anchor_payload(value: Option<serde_json::Value>) -> Result<Vec<Option<String>>> {
    match value {
        Some(serde_json::Value::String(json)) => {
            serde_json::from_str(&json).context("anchor list is not a JSON array of strings")
        }
        other => Err(anyhow!("expected a JSON string, got {:?}", other)),
    }
}
