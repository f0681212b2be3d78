// src/report.rs
// =============================================================================
// Formats the audit results for stdout.
//
// Plain format (exact, line-oriented):
//   one line per discovered link
//   a blank line
//   Bad Links:
//   one line per unreachable link
//
// The JSON format carries the same lists plus the outcome of every probe.
// =============================================================================

use crate::checker::{unreachable_urls, Probe};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// Everything one run found.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// The page that was audited
    pub page: String,
    /// Unique normalized links, in the order they were checked
    pub links: Vec<String>,
    /// The links that failed, in the same relative order
    pub bad_links: Vec<String>,
    /// One entry per link
    pub probes: Vec<Probe>,
}

impl AuditReport {
    pub fn new(page: impl Into<String>, links: Vec<String>, probes: Vec<Probe>) -> Self {
        let bad_links = unreachable_urls(probes.iter().cloned());
        Self {
            page: page.into(),
            links,
            bad_links,
            probes,
        }
    }

    pub fn has_bad_links(&self) -> bool {
        !self.bad_links.is_empty()
    }
}

// Prints the discovered links as they are found, before any probe runs
pub fn write_links<W: Write>(out: &mut W, links: &[String]) -> Result<()> {
    for link in links {
        writeln!(out, "{}", link)?;
    }
    Ok(())
}

// Prints the bad-link section that follows the link list
pub fn write_bad_links<W: Write>(out: &mut W, bad_links: &[String]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Bad Links:")?;
    for link in bad_links {
        writeln!(out, "{}", link)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, report: &AuditReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
