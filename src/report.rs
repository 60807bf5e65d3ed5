//! Report rendering: console table and CSV file.

use crate::summary::TrialSummary;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Receives each trial's summary as soon as it is aggregated.
///
/// The driver is generic over this seam so tests can capture summaries
/// without touching stdout.
pub trait TrialReporter {
    /// Called once per completed trial, in trial order.
    ///
    /// # Errors
    ///
    /// Returns an error if the summary could not be written out; the
    /// driver treats that as fatal.
    fn trial_completed(&mut self, summary: &TrialSummary) -> io::Result<()>;
}

/// Prints an aligned table to stdout, one row per trial.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    header_printed: bool,
}

impl ConsoleReporter {
    /// Create a reporter; the header is printed before the first row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrialReporter for ConsoleReporter {
    fn trial_completed(&mut self, summary: &TrialSummary) -> io::Result<()> {
        if !self.header_printed {
            println!("{}", console_header());
            self.header_printed = true;
        }
        println!("{}", console_row(summary));
        Ok(())
    }
}

/// Column header of the console table, with a separator line.
#[must_use]
pub fn console_header() -> String {
    format!(
        "{:<9} {:<22} {:<12} {:<9} {:<10}\n{}",
        "Clients",
        "Isolation Level",
        "Successful",
        "Failed",
        "Avg (ms)",
        "-".repeat(66)
    )
}

/// One aligned console row for a summary.
#[must_use]
pub fn console_row(summary: &TrialSummary) -> String {
    format!(
        "{:<9} {:<22} {:<12} {:<9} {:<10}",
        summary.clients,
        summary.isolation_label,
        summary.success_count,
        summary.failure_count,
        summary.avg_latency.as_millis()
    )
}

/// CSV header row.
#[must_use]
pub const fn csv_header() -> &'static str {
    "clients,isolation_level,successful,failed,avg_ms"
}

/// One CSV data row for a summary. Labels contain no delimiter, so no
/// quoting is needed.
#[must_use]
pub fn csv_row(summary: &TrialSummary) -> String {
    format!(
        "{},{},{},{},{}",
        summary.clients,
        summary.isolation_label,
        summary.success_count,
        summary.failure_count,
        summary.avg_latency.as_millis()
    )
}

/// Write the CSV report: header row plus one data row per summary, in
/// trial order. Called after all trials complete.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written. Already
/// computed summaries stay valid in memory.
pub fn write_csv<P: AsRef<Path>>(path: P, summaries: &[TrialSummary]) -> io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "{}", csv_header())?;
    for summary in summaries {
        writeln!(file, "{}", csv_row(summary))?;
    }
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_summary() -> TrialSummary {
        TrialSummary {
            clients: 20,
            isolation_label: "SERIALIZABLE",
            success_count: 14,
            failure_count: 6,
            avg_latency: Duration::from_millis(12),
        }
    }

    #[test]
    fn csv_row_lists_all_columns_in_header_order() {
        assert_eq!(csv_header().split(',').count(), 5);
        assert_eq!(csv_row(&sample_summary()), "20,SERIALIZABLE,14,6,12");
    }

    #[test]
    fn console_row_contains_every_field() {
        let row = console_row(&sample_summary());
        for needle in ["20", "SERIALIZABLE", "14", "6", "12"] {
            assert!(row.contains(needle), "missing {needle} in {row:?}");
        }
    }

    #[test]
    fn console_header_aligns_with_rows() {
        let header = console_header();
        assert!(header.contains("Isolation Level"));
        assert!(header.lines().count() == 2);
    }
}
