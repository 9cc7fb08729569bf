//! Configuration module for Pagecrawl
//!
//! This module handles loading an optional TOML configuration file, merging
//! the command line arguments on top of it, and validating the result.
//!
//! # Example
//!
//! ```no_run
//! use pagecrawl::config::{resolve_config, CliOverrides};
//! use std::path::Path;
//!
//! let overrides = CliOverrides {
//!     seed_url: "https://example.com".to_string(),
//!     max_concurrency: 4,
//!     max_pages: 50,
//!     report_path: None,
//! };
//! let config = resolve_config(Some(Path::new("crawl.toml")), overrides).unwrap();
//! println!("Crawling with {} workers", config.crawler.max_concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, resolve_config, CliOverrides};
pub use validation::validate;
