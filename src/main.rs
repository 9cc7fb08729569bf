//! Pagecrawl main entry point
//!
//! This is the command-line interface for the Pagecrawl single-host crawler.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use pagecrawl::config::{resolve_config, CliOverrides};
use pagecrawl::crawler::run_crawl;
use pagecrawl::output::{print_statistics, write_csv_report};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Pagecrawl: a single-host concurrent web crawler
///
/// Crawls every page reachable from BASE_URL on the same host and writes
/// the title, first paragraph, links and images of each page to a CSV report.
#[derive(Parser, Debug)]
#[command(name = "pagecrawl")]
#[command(version)]
#[command(about = "A single-host concurrent web crawler", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// URL to start crawling from; only pages on its host are crawled
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Maximum number of pages fetched at the same time
    #[arg(value_name = "MAX_CONCURRENCY")]
    max_concurrency: usize,

    /// Maximum number of pages crawled
    #[arg(value_name = "MAX_PAGES")]
    max_pages: usize,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path of the CSV report (default: report.csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(usage_exit_code(e.kind()));
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    // Past argument parsing, failures are reported but still exit 0
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
    }
}

/// Exit status for a command line that clap rejected or answered itself
///
/// Only a wrong argument count is a usage failure; a limit that is not a
/// number is reported like any other run error.
fn usage_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => 0,
        _ => 1,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        seed_url: cli.base_url,
        max_concurrency: cli.max_concurrency,
        max_pages: cli.max_pages,
        report_path: cli.output,
    };
    let config =
        resolve_config(cli.config.as_deref(), overrides).context("error in configuration")?;

    if !cli.quiet {
        println!("starting crawl of: {}", config.crawler.seed_url);
    }

    let outcome = run_crawl(&config).await.context("error starting crawl")?;

    if !cli.quiet {
        print_statistics(&outcome.statistics);
    }

    let report_path = Path::new(&config.output.report_path);
    write_csv_report(&outcome.pages, report_path)
        .with_context(|| format!("error writing CSV report to {}", report_path.display()))?;

    if !cli.quiet {
        println!("CSV report written to {}", report_path.display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pagecrawl=info,warn"),
            1 => EnvFilter::new("pagecrawl=debug,info"),
            2 => EnvFilter::new("pagecrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
