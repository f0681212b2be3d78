// src/collect/mod.rs
// =============================================================================
// This module collects the links on a single page.
//
// Submodules:
// - browser: renders the page in headless Chrome and reads its anchors
// - static_page: fetches raw HTML with reqwest and parses it with scraper
//
// Both are "anchor sources": they hand back the href of every <a> element.
// This file turns that list into a deduplicated set of normalized links.
//
// Rust concepts:
// - Traits: A shared interface both sources implement
// - HashSet: Deduplication by exact string equality
// - Enums with data: PageSource picks a source at runtime
// =============================================================================

mod browser;
mod static_page;

pub use browser::{BrowserConfig, BrowserSession};
pub use static_page::{extract_anchor_hrefs, StaticPage};

use crate::normalize::normalize;
use anyhow::Result;
use std::collections::HashSet;
use tracing::debug;

// Something that can list the anchors of a page
//
// One entry per <a> element, in document order.
// None means the element has no href attribute at all.
#[allow(async_fn_in_trait)]
pub trait AnchorSource {
    async fn anchor_hrefs(&self, page_url: &str) -> Result<Vec<Option<String>>>;
}

/// The unique normalized links found on one page.
///
/// Iteration order is whatever the underlying `HashSet` gives us.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkSet {
    links: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `href` and adds it. Returns false if it was already present.
    pub fn insert(&mut self, href: &str) -> bool {
        self.links.insert(normalize(href).to_string())
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }

    /// Freezes the set into a list.
    ///
    /// The driver prints and checks this list, so "bad links" come out in
    /// the same relative order as the discovered links.
    pub fn into_vec(self) -> Vec<String> {
        self.links.into_iter().collect()
    }
}

// Collects all unique, normalized links on the page at page_url
//
// Anchors without an href (or with an empty one) are skipped silently.
// Errors from the source (navigation failed, page didn't load) propagate.
pub async fn collect_links<S: AnchorSource>(source: &S, page_url: &str) -> Result<LinkSet> {
    let hrefs = source.anchor_hrefs(page_url).await?;
    let anchor_count = hrefs.len();

    let mut links = LinkSet::new();
    for href in hrefs.into_iter().flatten() {
        if !href.is_empty() {
            links.insert(&href);
        }
    }

    debug!(
        "{} anchor(s) on {} gave {} unique link(s)",
        anchor_count,
        page_url,
        links.len()
    );

    Ok(links)
}

// The source chosen on the command line
//
// An enum instead of a Box<dyn AnchorSource> because the trait uses
// async fn, which isn't object safe.
pub enum PageSource {
    Browser(BrowserSession),
    Static(StaticPage),
}

impl AnchorSource for PageSource {
    async fn anchor_hrefs(&self, page_url: &str) -> Result<Vec<Option<String>>> {
        match self {
            PageSource::Browser(session) => session.anchor_hrefs(page_url).await,
            PageSource::Static(page) => page.anchor_hrefs(page_url).await,
        }
    }
}
