//! CSV report generation
//!
//! Writes one header row followed by one row per recorded page. Rows are
//! sorted by canonical URL so repeated runs over the same site diff cleanly.

use crate::output::traits::{report_row, OutputResult, ReportWriter, REPORT_HEADER};
use crate::state::PageRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// [`ReportWriter`] producing CSV on any `io::Write`
pub struct CsvReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvReportWriter<File> {
    /// Creates (or truncates) the file at `path`
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvReportWriter<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::output::OutputError::Write(e.to_string()))
    }
}

impl<W: Write> ReportWriter for CsvReportWriter<W> {
    fn write(&mut self, records: &HashMap<String, PageRecord>) -> OutputResult<()> {
        self.writer.write_record(REPORT_HEADER)?;

        let mut keys: Vec<&String> = records.keys().collect();
        keys.sort();

        for key in keys {
            self.writer.write_record(report_row(key, &records[key]))?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the records to a CSV file at `path`, overwriting it
///
/// # Arguments
///
/// * `records` - Recorded pages keyed by canonical URL
/// * `path` - Destination file
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_csv_report(records: &HashMap<String, PageRecord>, path: &Path) -> OutputResult<()> {
    let mut writer = CsvReportWriter::create(path)?;
    writer.write(records)
}
