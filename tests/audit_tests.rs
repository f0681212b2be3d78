//! End-to-end audits using the static source against a mock site.

mod common;

use clap::Parser;
use common::wiremock_helpers::{closed_port_url, mount_head, mount_page};
use link_audit::cli::Cli;
use link_audit::collect::{collect_links, StaticPage};
use link_audit::config::AuditConfig;
use link_audit::run_audit;
use std::collections::HashSet;
use std::process::Command;
use std::time::Duration;
use wiremock::MockServer;

// Two good links (one of them repeated with a query and a fragment), one
// link to a closed port, and an anchor with no href at all.
async fn mock_site() -> (MockServer, String) {
    let server = MockServer::start().await;
    let dead = closed_port_url();

    let html = format!(
        r##"<html><body>
            <a href="/docs?page=2">Docs</a>
            <a href="/docs#install">Install</a>
            <a href="{uri}/about">About</a>
            <a href="{dead}">Dead</a>
            <a name="footer">no href</a>
        </body></html>"##,
        uri = server.uri(),
        dead = dead,
    );

    mount_page(&server, "/", &html).await;
    mount_head(&server, "/docs", 200).await;
    mount_head(&server, "/about", 200).await;

    (server, dead)
}

fn static_config(page_url: &str, extra: &[&str]) -> AuditConfig {
    let mut argv = vec!["link-audit", "--static", "--concurrency", "1", "--timeout", "5"];
    argv.extend_from_slice(extra);
    argv.push(page_url);
    AuditConfig::from_cli(&Cli::try_parse_from(argv).unwrap()).unwrap()
}

#[tokio::test]
async fn test_collect_links_from_static_page() {
    let (server, dead) = mock_site().await;
    let source = StaticPage::new(Duration::from_secs(5)).unwrap();

    let links = collect_links(&source, &format!("{}/", server.uri())).await.unwrap();

    let expected: HashSet<String> = [
        format!("{}/docs", server.uri()),
        format!("{}/about", server.uri()),
        dead,
    ]
    .into_iter()
    .collect();
    assert_eq!(links.iter().map(str::to_string).collect::<HashSet<_>>(), expected);
}

#[tokio::test]
async fn test_plain_report() {
    let (server, dead) = mock_site().await;
    let page = format!("{}/", server.uri());
    let config = static_config(&page, &[]);
    let source = StaticPage::new(Duration::from_secs(5)).unwrap();

    let mut out = Vec::new();
    let report = run_audit(&source, &config, &mut out).await.unwrap();
    let stdout = String::from_utf8(out).unwrap();

    let (found, bad) = stdout
        .split_once("\n\nBad Links:\n")
        .expect("report has a Bad Links section");

    let found: HashSet<&str> = found.lines().collect();
    assert_eq!(found.len(), 3);
    assert!(found.contains(format!("{}/docs", server.uri()).as_str()));
    assert!(found.contains(dead.as_str()));

    assert_eq!(bad, format!("{}\n", dead));
    assert_eq!(report.bad_links, vec![dead]);
}

#[tokio::test]
async fn test_json_report() {
    let (server, dead) = mock_site().await;
    let page = format!("{}/", server.uri());
    let config = static_config(&page, &["--json"]);
    let source = StaticPage::new(Duration::from_secs(5)).unwrap();

    let mut out = Vec::new();
    run_audit(&source, &config, &mut out).await.unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["page"], page.as_str());
    assert_eq!(value["links"].as_array().unwrap().len(), 3);
    assert_eq!(value["bad_links"], serde_json::json!([dead]));
    assert_eq!(value["probes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_page_fetch_failure_is_an_error() {
    let server = MockServer::start().await; // nothing mounted: every GET is a 404
    let page = format!("{}/", server.uri());
    let config = static_config(&page, &[]);
    let source = StaticPage::new(Duration::from_secs(5)).unwrap();

    let mut out = Vec::new();
    let err = run_audit(&source, &config, &mut out).await.unwrap_err();
    assert!(err.to_string().contains("Failed to fetch"));
    assert!(out.is_empty());
}

// Runs the built binary via CARGO_BIN_EXE
fn run_link_audit(args: Vec<String>) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_link-audit");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run link-audit binary")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_static_run() {
    let (server, dead) = mock_site().await;
    let args = vec![
        "--static".to_string(),
        "--concurrency".to_string(),
        "1".to_string(),
        format!("{}/", server.uri()),
    ];

    let output = tokio::task::spawn_blocking(move || run_link_audit(args)).await.unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.ends_with(&format!("\nBad Links:\n{}\n", dead)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_strict_exits_one() {
    let (server, _dead) = mock_site().await;
    let args = vec![
        "--static".to_string(),
        "--strict".to_string(),
        "--concurrency".to_string(),
        "1".to_string(),
        format!("{}/", server.uri()),
    ];

    let output = tokio::task::spawn_blocking(move || run_link_audit(args)).await.unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_binary_without_url_prints_usage() {
    let output = run_link_audit(Vec::new());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Usage: link-audit"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_binary_rejects_invalid_url() {
    let output = run_link_audit(vec!["--static".to_string(), "example.com".to_string()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("Invalid URL"));
}
