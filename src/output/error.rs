//! Errors that can occur during output operations

use rust_xlsxwriter::XlsxError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Windows `ERROR_SHARING_VIOLATION`
const SHARING_VIOLATION: i32 = 32;

/// Windows `ERROR_LOCK_VIOLATION`
const LOCK_VIOLATION: i32 = 33;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// The target file is held open by another program
    #[error(
        "{} is open in another program and cannot be saved. Close it (e.g. in Excel) and run again.",
        .path.display()
    )]
    FileLocked { path: PathBuf },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl OutputError {
    /// Whether the caller can recover by asking the user to close the file
    pub fn is_file_locked(&self) -> bool {
        matches!(self, OutputError::FileLocked { .. })
    }

    /// Maps a workbook save failure, singling out a locked target file
    pub fn from_save_error(err: XlsxError, path: &Path) -> Self {
        match err {
            XlsxError::IoError(io_err) if is_locked_error(&io_err) => OutputError::FileLocked {
                path: path.to_path_buf(),
            },
            other => OutputError::Xlsx(other),
        }
    }
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Whether an I/O error means another process holds the file
pub fn is_locked_error(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    cfg!(windows)
        && matches!(
            err.raw_os_error(),
            Some(SHARING_VIOLATION) | Some(LOCK_VIOLATION)
        )
}
