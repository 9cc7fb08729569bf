//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML content extraction
//! - Global concurrency limiting
//! - Completion tracking for recursively spawned work
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod limiter;
mod parser;
mod tracker;

pub use coordinator::{run_crawl, CrawlOutcome, Crawler, Rejection, VisitOutcome};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use limiter::{ConcurrencyLimiter, LimiterPermit};
pub use parser::extract_page;
pub use tracker::{WorkGuard, WorkTracker};
