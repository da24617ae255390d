//! CSV export of simulator reports.
//!
//! The output has one header row and one row per report line:
//!
//! ```csv
//! label,monthly_value,percent_of_revenue
//! Revenue,30000.00,100.0
//! Variable costs,5000.00,16.7
//! ```
//!
//! Simulated reports carry a fourth `change_pct` column. Money is written
//! with two decimal places and percentages with one.

use std::io::Write;
use std::path::Path;

use profit_core::{Report, ReportKind};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportWriteError {
    #[error("cannot create '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<std::io::Error> for ReportWriteError {
    fn from(err: std::io::Error) -> Self {
        ReportWriteError::Csv(csv::Error::from(err))
    }
}

/// Writer for report CSV files.
pub struct ReportWriter;

impl ReportWriter {
    /// Writes `report`, rounded for presentation, to any writer.
    pub fn write<W: Write>(
        writer: W,
        report: &Report,
    ) -> Result<(), ReportWriteError> {
        let with_change = report.kind == ReportKind::Simulated;
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["label", "monthly_value", "percent_of_revenue"];
        if with_change {
            header.push("change_pct");
        }
        csv_writer.write_record(&header)?;

        for row in report.rounded().rows {
            let mut record = vec![
                row.label.to_string(),
                format!("{:.2}", row.monthly_value),
                format!("{:.1}", row.percent_of_revenue),
            ];
            if with_change {
                record.push(
                    row.change_pct
                        .map(|pct| format!("{pct:.1}"))
                        .unwrap_or_default(),
                );
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes `report` to a new file at `path`, replacing any existing file.
    pub fn write_file(
        path: &Path,
        report: &Report,
    ) -> Result<(), ReportWriteError> {
        let file = std::fs::File::create(path).map_err(|source| ReportWriteError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::write(file, report)?;
        debug!(path = %path.display(), rows = report.rows.len(), "report written");
        Ok(())
    }

    /// Writes `report` to an in-memory string.
    pub fn render(report: &Report) -> Result<String, ReportWriteError> {
        let mut buffer = Vec::new();
        Self::write(&mut buffer, report)?;
        // The csv writer only emits the UTF-8 text it was given.
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
