// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There is exactly one positional argument, the page URL. If it's missing
// (or there's more than one), clap prints the usage line and exits with
// status 2 before anything else runs.
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "link-audit",
    version,
    about = "Find the unreachable links on a single web page",
    long_about = "link-audit renders a page in headless Chrome, collects the target of every <a> \
                  element, strips query strings and fragments, and sends a HEAD request to each \
                  unique link. Links that fail or answer with a 4xx/5xx status are listed under \
                  \"Bad Links:\"."
)]
pub struct Cli {
    /// Page to audit (e.g., https://example.com)
    pub url: String,

    /// Fetch the raw HTML with a plain GET instead of rendering it in Chrome
    ///
    /// Faster and needs no browser, but links added by JavaScript are missed.
    #[arg(long = "static")]
    pub static_html: bool,

    /// Output results in JSON format instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when at least one bad link is found
    #[arg(long)]
    pub strict: bool,

    /// Maximum number of HEAD requests in flight (1 = one at a time)
    #[arg(long, env = "LINK_AUDIT_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// Per-request timeout for HEAD probes, in seconds
    #[arg(long, env = "LINK_AUDIT_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Timeout for loading the page in the browser, in seconds
    #[arg(long, default_value_t = 30)]
    pub nav_timeout: u64,

    /// Path to the Chrome/Chromium binary (searched for when not given)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// More log output on stderr (-v = info, -vv = debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
