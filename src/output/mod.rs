//! Output module for writing harvest results
//!
//! This module handles:
//! - The CSV export of unique records
//! - The three-sheet spreadsheet report
//! - Run statistics

mod csv_output;
mod error;
mod report;
pub mod stats;

pub use csv_output::{read_csv, write_csv, CSV_HEADERS};
pub use error::{is_locked_error, OutputError, OutputResult};
pub use report::{write_report, AUTHORS_SHEET, QUOTES_SHEET, TAGS_SHEET};
pub use stats::{print_statistics, RunStatistics};
