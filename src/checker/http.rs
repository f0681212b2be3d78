// src/checker/http.rs
// =============================================================================
// This module checks if URLs are reachable by making HTTP HEAD requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Sorts every outcome into reachable / unreachable - no probe error
//   ever escapes, whether it's a timeout, a refused connection, a bad
//   URL or a TLS failure
// - Checks one link at a time by default, or up to N at once on request,
//   always reporting results in input order
//
// Rust concepts:
// - async/await: For network I/O
// - Enums: To represent the different probe outcomes
// - Streams: For running a bounded number of probes concurrently
// =============================================================================

use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffered()
use reqwest::{redirect, Client};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Settings for the HTTP client shared by every probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

// What happened when we probed a link
//
// #[derive(Serialize)] lets us write it out as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Status below 400 (2xx, or a 3xx as answered - redirects aren't followed)
    Ok { status: u16 },
    /// 4xx or 5xx
    HttpError { status: u16 },
    /// No response within the timeout
    Timeout,
    /// Connection refused, reset, DNS failure...
    ConnectFailed,
    /// The request couldn't even be built (relative URL, mailto:, garbage)
    InvalidUrl,
    /// Anything reqwest reports that doesn't fit above
    Other { message: String },
}

// The result of probing a single link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Probe {
    /// The URL that was checked
    pub url: String,
    #[serde(flatten)] // Merges the outcome fields into the probe object
    pub outcome: ProbeOutcome,
}

impl Probe {
    /// Only an HTTP response with an ok status counts as reachable.
    pub fn is_reachable(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Ok { .. })
    }
}

/// Issues HEAD requests through one shared, pooled client.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
}

impl Prober {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;
        Ok(Self { client })
    }

    // Probes a single link
    //
    // Never fails: every error is folded into the returned outcome.
    pub async fn probe(&self, url: &str) -> Probe {
        let outcome = match self.client.head(url).send().await {
            Ok(response) => classify_status(response.status().as_u16()),
            Err(e) => classify_error(&e),
        };

        debug!("HEAD {} -> {:?}", url, outcome);

        Probe {
            url: url.to_string(),
            outcome,
        }
    }

    pub async fn is_reachable(&self, url: &str) -> bool {
        self.probe(url).await.is_reachable()
    }
}

// Probes every URL, returning results in input order
//
// concurrency = 1 means strictly sequential: one request in flight, in the
// order given. Higher values allow that many requests at once, but
// .buffered() (unlike .buffer_unordered()) still yields them in order.
pub async fn probe_all(prober: &Prober, urls: &[String], concurrency: usize) -> Vec<Probe> {
    let concurrency = concurrency.max(1);

    if concurrency == 1 {
        let mut probes = Vec::with_capacity(urls.len());
        for url in urls {
            probes.push(prober.probe(url).await);
        }
        return probes;
    }

    stream::iter(urls.iter().map(|url| prober.probe(url)))
        .buffered(concurrency)
        .collect()
        .await
}

// Returns the URLs that are not reachable, in input order
pub async fn find_unreachable(
    prober: &Prober,
    urls: &[String],
    concurrency: usize,
) -> Vec<String> {
    unreachable_urls(probe_all(prober, urls, concurrency).await)
}

// Keeps the URLs of the failed probes
pub fn unreachable_urls(probes: impl IntoIterator<Item = Probe>) -> Vec<String> {
    probes
        .into_iter()
        .filter(|p| !p.is_reachable())
        .map(|p| p.url)
        .collect()
}

// Maps a response status to an outcome
//
// "ok" means anything below 400. The redirect policy is none(), so a 3xx
// is judged as-is: a 301 counts as reachable wherever it points.
fn classify_status(status: u16) -> ProbeOutcome {
    if status < 400 {
        ProbeOutcome::Ok { status }
    } else {
        ProbeOutcome::HttpError { status }
    }
}

// Categorizes the error types reqwest can give us
//
// Order matters: a timeout during connect reports both is_timeout() and
// is_connect(), and we'd rather call that a timeout.
fn classify_error(error: &reqwest::Error) -> ProbeOutcome {
    if error.is_timeout() {
        ProbeOutcome::Timeout
    } else if error.is_connect() {
        ProbeOutcome::ConnectFailed
    } else if error.is_builder() {
        ProbeOutcome::InvalidUrl
    } else {
        ProbeOutcome::Other {
            message: error.to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why HEAD and not GET?
//    - HEAD asks for headers only, so no page body gets downloaded
//    - Some servers answer HEAD with 405 Method Not Allowed; we report
//      those as bad links, same as any other 4xx
//
// 2. Why share one Client?
//    - Client keeps a connection pool internally
//    - Links on one page often share a host, so connections get reused
//    - Cloning a Client is cheap (it's an Arc inside)
//
// 3. buffered vs buffer_unordered:
//    - buffered(N) runs up to N futures and yields results in input order
//    - buffer_unordered(N) yields them as they finish
//    - The bad-link list must follow discovery order, so it's buffered
// -----------------------------------------------------------------------------
