// src/checker/mod.rs
// =============================================================================
// This module contains the link reachability checks.
//
// Submodules:
// - http: HEAD probes and their classification
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers can write `checker::find_unreachable()`.
// =============================================================================

mod http;

pub use http::{
    find_unreachable, probe_all, unreachable_urls, Probe, ProbeConfig, ProbeOutcome, Prober,
};
