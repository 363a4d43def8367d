//! The harvest batch job
//!
//! scrape -> dedupe -> CSV -> (optional) spreadsheet report

use crate::aggregate::{author_counts, tag_counts};
use crate::config::Config;
use crate::crawler::scrape;
use crate::output::{write_csv, write_report, OutputResult, RunStatistics};
use crate::quote::dedupe;
use crate::HarvestError;
use chrono::Utc;
use std::path::Path;

/// Runs one complete harvest
///
/// The CSV is always written when any record was collected; the report only
/// when `excel` is set. Nothing is written when no records were collected.
/// A report target held open by another program is logged as a warning and
/// flagged in the statistics instead of failing the run.
///
/// # Returns
///
/// * `Ok(RunStatistics)` - The run finished, possibly with a partial result set
/// * `Err(HarvestError)` - Setup or a non-recoverable write failed
pub async fn run(config: &Config, excel: bool) -> Result<RunStatistics, HarvestError> {
    let started_at = Utc::now();

    let outcome = scrape(config).await?;
    let raw_records = outcome.records.len();

    let unique = dedupe(outcome.records);
    let authors = author_counts(&unique);
    let tags = tag_counts(&unique);

    if outcome.stop_reason.is_warning() {
        tracing::warn!(
            "Collected {} records ({} unique) from {} pages before stopping early: {}",
            raw_records,
            unique.len(),
            outcome.pages_fetched,
            outcome.stop_reason
        );
    } else {
        tracing::info!(
            "Collected {} records ({} unique) from {} pages; stopped: {}",
            raw_records,
            unique.len(),
            outcome.pages_fetched,
            outcome.stop_reason
        );
    }

    let mut stats = RunStatistics {
        started_at,
        finished_at: started_at,
        pages_fetched: outcome.pages_fetched,
        raw_records,
        unique_records: unique.len(),
        unique_authors: authors.len(),
        unique_tags: tags.len(),
        stop_reason: outcome.stop_reason,
        files_written: Vec::new(),
        report_locked: false,
    };

    if unique.is_empty() {
        tracing::info!("No data collected, nothing written");
        stats.finished_at = Utc::now();
        return Ok(stats);
    }

    write_csv(&unique, &config.output.csv_path)?;
    stats.files_written.push(config.output.csv_path.clone());

    if excel {
        let result = write_report(&unique, &authors, &tags, &config.output.report_path);
        settle_report(result, &config.output.report_path, &mut stats)?;
    }

    stats.finished_at = Utc::now();
    Ok(stats)
}

/// Folds the report write result into the run statistics
///
/// A locked target is only a warning; any other failure is returned.
fn settle_report(
    result: OutputResult<()>,
    path: &Path,
    stats: &mut RunStatistics,
) -> Result<(), HarvestError> {
    match result {
        Ok(()) => {
            stats.files_written.push(path.to_path_buf());
            Ok(())
        }
        Err(e) if e.is_file_locked() => {
            tracing::warn!("{}", e);
            stats.report_locked = true;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::StopReason;
    use crate::output::OutputError;
    use std::io;
    use std::path::PathBuf;

    fn empty_stats() -> RunStatistics {
        let now = Utc::now();
        RunStatistics {
            started_at: now,
            finished_at: now,
            pages_fetched: 1,
            raw_records: 1,
            unique_records: 1,
            unique_authors: 1,
            unique_tags: 0,
            stop_reason: StopReason::NoNextPage,
            files_written: vec![PathBuf::from("out/quotes.csv")],
            report_locked: false,
        }
    }

    #[test]
    fn test_saved_report_is_listed() {
        let mut stats = empty_stats();
        let path = Path::new("out/quotes_report.xlsx");

        settle_report(Ok(()), path, &mut stats).unwrap();

        assert!(!stats.report_locked);
        assert_eq!(stats.files_written.len(), 2);
        assert_eq!(stats.files_written[1], PathBuf::from("out/quotes_report.xlsx"));
    }

    #[test]
    fn test_locked_report_is_not_fatal() {
        let mut stats = empty_stats();
        let path = Path::new("out/quotes_report.xlsx");
        let locked = Err(OutputError::FileLocked {
            path: path.to_path_buf(),
        });

        settle_report(locked, path, &mut stats).unwrap();

        assert!(stats.report_locked);
        assert_eq!(stats.files_written, vec![PathBuf::from("out/quotes.csv")]);
    }

    #[test]
    fn test_other_report_failure_is_returned() {
        let mut stats = empty_stats();
        let path = Path::new("out/quotes_report.xlsx");
        let failed = Err(OutputError::Io(io::Error::new(io::ErrorKind::Other, "disk full")));

        let result = settle_report(failed, path, &mut stats);

        assert!(matches!(result, Err(HarvestError::Output(_))));
        assert!(!stats.report_locked);
    }
}
