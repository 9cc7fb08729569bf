//! Exit status tests for the pagecrawl binary

use std::process::{Command, Output};
use tempfile::TempDir;

fn pagecrawl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pagecrawl"))
        .args(args)
        .output()
        .expect("Failed to run pagecrawl")
}

/// A local port that was bound once and is closed again
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("No local address").port()
}

#[test]
fn test_missing_arguments_exit_1() {
    let output = pagecrawl(&["https://example.com"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_too_many_arguments_exit_1() {
    let output = pagecrawl(&["https://example.com", "2", "10", "extra"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_non_numeric_limit_exits_0() {
    let output = pagecrawl(&["https://example.com", "abc", "10"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(!output.stderr.is_empty());
}

#[test]
fn test_invalid_configuration_exits_0() {
    let output = pagecrawl(&["https://example.com", "0", "10"]);
    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error in configuration"), "stderr: {}", stderr);
}

#[test]
fn test_report_write_failure_exits_0() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = dir.path().join("missing-dir").join("r.csv");
    let seed = format!("http://127.0.0.1:{}/", closed_port());

    let output = pagecrawl(&[
        seed.as_str(),
        "2",
        "10",
        "--output",
        report.to_str().expect("Non-UTF-8 temp path"),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error writing CSV report"), "stderr: {}", stderr);
}

#[test]
fn test_failed_pages_still_write_report() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let report = dir.path().join("report.csv");
    let seed = format!("http://127.0.0.1:{}/", closed_port());

    let output = pagecrawl(&[
        seed.as_str(),
        "2",
        "10",
        "-q",
        "--output",
        report.to_str().expect("Non-UTF-8 temp path"),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let content = std::fs::read_to_string(&report).expect("Report missing");
    assert_eq!(
        content,
        "page_url,h1,first_paragraph,outgoing_link_urls,image_urls\n"
    );
}
