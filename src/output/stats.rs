//! Run statistics
//!
//! Collected by the pipeline and printed by the CLI once a run finishes.

use crate::crawler::StopReason;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary of one harvest run
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,

    /// Number of listing pages fetched successfully
    pub pages_fetched: u32,

    /// Records extracted, duplicates included
    pub raw_records: usize,

    /// Records left after deduplication
    pub unique_records: usize,

    /// Number of distinct authors among unique records
    pub unique_authors: usize,

    /// Number of distinct tags among unique records
    pub unique_tags: usize,

    /// Why pagination ended
    pub stop_reason: StopReason,

    /// Files written this run
    pub files_written: Vec<PathBuf>,

    /// Report skipped because the target was open elsewhere
    pub report_locked: bool,
}

impl RunStatistics {
    /// Records removed by deduplication
    pub fn duplicates_removed(&self) -> usize {
        self.raw_records.saturating_sub(self.unique_records)
    }

    /// Wall-clock duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Finished: {}", stats.finished_at.to_rfc3339());
    println!("  Duration: {:.1}s", stats.duration_seconds());
    println!("  Stopped because: {}", stats.stop_reason);
    if stats.stop_reason.is_warning() {
        println!("  Results may be incomplete.");
    }
    println!();

    println!("Records:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Extracted: {}", stats.raw_records);
    println!(
        "  Unique: {} ({} duplicates removed)",
        stats.unique_records,
        stats.duplicates_removed()
    );
    println!("  Authors: {}", stats.unique_authors);
    println!("  Tags: {}", stats.unique_tags);
    println!();

    if !stats.files_written.is_empty() {
        println!("Files:");
        for path in &stats.files_written {
            println!("  - {}", path.display());
        }
        println!();
    }

    if stats.report_locked {
        println!("Report was not saved because the file is open in another program.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_run_statistics() {
        let started_at = Utc::now();
        let stats = RunStatistics {
            started_at,
            finished_at: started_at + Duration::milliseconds(2500),
            pages_fetched: 10,
            raw_records: 100,
            unique_records: 97,
            unique_authors: 50,
            unique_tags: 40,
            stop_reason: StopReason::NoNextPage,
            files_written: vec![],
            report_locked: false,
        };

        assert_eq!(stats.duplicates_removed(), 3);
        assert!((stats.duration_seconds() - 2.5).abs() < 0.001);
    }
}
