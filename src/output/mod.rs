//! Output module for generating crawl reports
//!
//! This module handles:
//! - Writing recorded pages to a CSV report
//! - Summarizing and printing crawl statistics

mod csv_report;
pub mod stats;
mod traits;

pub use csv_report::{write_csv_report, CsvReportWriter};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{report_row, OutputError, OutputResult, ReportWriter, LIST_SEPARATOR, REPORT_HEADER};
