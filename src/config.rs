// src/config.rs
// =============================================================================
// Turns parsed command-line arguments into a validated run configuration.
//
// clap only checks that values have the right type. Anything that needs a
// closer look - is the URL really http(s), is the timeout non-zero - is
// checked here, once, before a browser gets launched.
// =============================================================================

use crate::checker::ProbeConfig;
use crate::cli::Cli;
use crate::collect::BrowserConfig;
use anyhow::{anyhow, bail, Result};
use std::time::Duration;
use url::Url;

/// Upper bound for --concurrency.
pub const MAX_CONCURRENCY: usize = 64;

/// How the page's anchors are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Browser,
    Static,
}

/// Everything one run needs to know.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub page_url: String,
    pub source: SourceKind,
    pub json: bool,
    pub strict: bool,
    pub concurrency: usize,
    pub probe: ProbeConfig,
    pub browser: BrowserConfig,
}

impl AuditConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let page = Url::parse(&cli.url).map_err(|e| anyhow!("Invalid URL '{}': {}", cli.url, e))?;
        if page.scheme() != "http" && page.scheme() != "https" {
            bail!("Unsupported URL scheme '{}': expected http or https", page.scheme());
        }

        if cli.concurrency == 0 || cli.concurrency > MAX_CONCURRENCY {
            bail!(
                "--concurrency must be between 1 and {}, got {}",
                MAX_CONCURRENCY,
                cli.concurrency
            );
        }
        if cli.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }
        if cli.nav_timeout == 0 {
            bail!("--nav-timeout must be at least 1 second");
        }

        let source = if cli.static_html {
            SourceKind::Static
        } else {
            SourceKind::Browser
        };

        Ok(Self {
            // Navigate to exactly what the user typed
            page_url: cli.url.clone(),
            source,
            json: cli.json,
            strict: cli.strict,
            concurrency: cli.concurrency,
            probe: ProbeConfig {
                timeout: Duration::from_secs(cli.timeout),
            },
            browser: BrowserConfig {
                chrome_path: cli.chrome_path.clone(),
                navigation_timeout: Duration::from_secs(cli.nav_timeout),
            },
        })
    }
}
