// src/collect/static_page.rs
// =============================================================================
// Collects anchors without a browser: GET the page, parse the HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative hrefs against the page
// URL, so the links we report are absolute - the same thing a browser's
// anchor.href property gives back.
//
// JavaScript never runs here, so pages that build their links client-side
// will look emptier than they do in the browser source.
// =============================================================================

use super::AnchorSource;
use anyhow::{anyhow, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Fetches pages over plain HTTP.
pub struct StaticPage {
    client: Client,
}

impl StaticPage {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }

    // Fetches a web page and returns its HTML content
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch {}: {}", url, e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch {}: HTTP {}", url, response.status()));
        }

        let html = response.text().await?;
        Ok(html)
    }
}

impl AnchorSource for StaticPage {
    async fn anchor_hrefs(&self, page_url: &str) -> Result<Vec<Option<String>>> {
        info!("Fetching {}", page_url);
        let html = self.fetch_page(page_url).await?;
        let hrefs = extract_anchor_hrefs(&html, page_url)?;
        debug!("Found {} anchor element(s) on {}", hrefs.len(), page_url);
        Ok(hrefs)
    }
}

// Lists the href of every <a> element in the HTML
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page (for resolving relative links)
//
// Returns one entry per anchor, in document order:
//   Some(absolute_url) when the href resolves against base_url
//   Some(raw_href) when it doesn't (or base_url itself is invalid)
//   None when the anchor has no href
//
// Example:
//   html = "<a href='/docs'>Docs</a><a name='top'></a>"
//   base_url = "https://example.com"
//   result = [Some("https://example.com/docs"), None]
pub fn extract_anchor_hrefs(html: &str, base_url: &str) -> Result<Vec<Option<String>>> {
    let document = Html::parse_document(html);

    // Every <a>, with or without href, so the caller sees hrefless anchors too
    let selector = Selector::parse("a").map_err(|e| anyhow!("Invalid selector: {}", e))?;

    let base = Url::parse(base_url).ok();

    let hrefs = document
        .select(&selector)
        .map(|element| {
            element
                .value()
                .attr("href")
                .map(|href| resolve_url(base.as_ref(), href))
        })
        .collect();

    Ok(hrefs)
}

// Resolves a possibly-relative href against the page URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> "https://example.com/docs"
//   href = "../other" -> "https://example.com/other"
//   href = "https://other.com" -> "https://other.com/"
//   href = "" -> "https://example.com/page"
fn resolve_url(base: Option<&Url>, href: &str) -> String {
    let href = href.trim();
    match base {
        Some(base) => match base.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => href.to_string(),
        },
        None => href.to_string(),
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why keep unresolvable hrefs instead of dropping them?
//    - The collector decides what to skip, not the source
//    - An href like "http://[broken" is still a link on the page
//    - The checker will report it as unreachable, which is what it is
//
// 2. Why does an empty href become the page URL?
//    - That's what browsers do: <a href=""> links to the current page
//    - Keeping the browser and static sources in agreement means the
//      same page gives the same report either way
// -----------------------------------------------------------------------------
