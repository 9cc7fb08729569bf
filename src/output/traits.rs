//! Output handler traits and types
//!
//! This module defines the trait interface for report writers and the
//! errors they can raise.

use crate::state::PageRecord;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Column headers shared by every tabular report
pub const REPORT_HEADER: [&str; 5] = [
    "page_url",
    "h1",
    "first_paragraph",
    "outgoing_link_urls",
    "image_urls",
];

/// Separator used to join link and image lists into one cell
pub const LIST_SEPARATOR: &str = ";";

/// Trait for report sinks
///
/// A writer receives the complete set of recorded pages once the crawl has
/// finished; nothing mutates the records while it runs.
pub trait ReportWriter {
    /// Writes every record to the sink
    fn write(&mut self, records: &HashMap<String, PageRecord>) -> OutputResult<()>;
}

/// Formats one record as a report row, keyed by its canonical URL
pub fn report_row(key: &str, record: &PageRecord) -> [String; 5] {
    [
        key.to_string(),
        record.title.clone(),
        record.summary.clone(),
        record.outgoing_links.join(LIST_SEPARATOR),
        record.image_urls.join(LIST_SEPARATOR),
    ]
}
