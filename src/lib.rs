// src/lib.rs
// =============================================================================
// link-audit: find the unreachable links on one web page.
//
// The pipeline, in order:
// 1. collect  - load the page and read every <a href>
// 2. normalize - strip ?query and #fragment, deduplicate
// 3. checker  - HEAD each link, classify reachable / unreachable
// 4. report   - print the links, then the bad ones
//
// main.rs parses arguments and calls run_audit(); the integration tests
// call it too, with the static source pointed at a mock server.
// =============================================================================

pub mod checker;
pub mod cli;
pub mod collect;
pub mod config;
pub mod logging;
pub mod normalize;
pub mod report;

use anyhow::Result;
use checker::Prober;
use collect::{AnchorSource, BrowserSession, PageSource, StaticPage};
use config::{AuditConfig, SourceKind};
use report::AuditReport;
use std::io::Write;
use tracing::info;

pub use normalize::normalize;

// Starts whichever anchor source the config asks for
//
// The browser session lives as long as the returned value; dropping it
// shuts Chrome down.
pub fn open_source(config: &AuditConfig) -> Result<PageSource> {
    match config.source {
        SourceKind::Browser => {
            let session = BrowserSession::launch(&config.browser)?;
            Ok(PageSource::Browser(session))
        }
        SourceKind::Static => {
            let page = StaticPage::new(config.browser.navigation_timeout)?;
            Ok(PageSource::Static(page))
        }
    }
}

// Runs one audit and writes the report to out
//
// In plain mode the link list is written (and flushed) before the first
// probe goes out, so a long check still shows what was found.
pub async fn run_audit<S, W>(source: &S, config: &AuditConfig, out: &mut W) -> Result<AuditReport>
where
    S: AnchorSource,
    W: Write,
{
    let links = collect::collect_links(source, &config.page_url).await?.into_vec();
    info!("Found {} unique link(s) on {}", links.len(), config.page_url);

    if !config.json {
        report::write_links(out, &links)?;
        out.flush()?;
    }

    let prober = Prober::new(&config.probe)?;
    let probes = checker::probe_all(&prober, &links, config.concurrency).await;
    let report = AuditReport::new(config.page_url.clone(), links, probes);

    info!(
        "{} of {} link(s) unreachable",
        report.bad_links.len(),
        report.links.len()
    );

    if config.json {
        report::write_json(out, &report)?;
    } else {
        report::write_bad_links(out, &report.bad_links)?;
    }
    out.flush()?;

    Ok(report)
}
