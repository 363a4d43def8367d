//! CSV export of the unique record set
//!
//! Files are UTF-8 with a leading byte-order mark so spreadsheet programs
//! pick the right encoding for non-ASCII quotes and author names.

use crate::output::error::OutputResult;
use crate::quote::QuoteRecord;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Column order of the export
pub const CSV_HEADERS: [&str; 3] = ["text", "author", "tags"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes records to `path`, creating parent directories as needed
///
/// One header row followed by one row per record in the given order. Fields
/// containing delimiters, quotes, or newlines are quoted.
pub fn write_csv(records: &[QuoteRecord], path: &Path) -> OutputResult<()> {
    ensure_parent_dir(path)?;

    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.write_record([&record.text, &record.author, &record.tags])?;
    }
    writer.flush()?;

    tracing::info!("CSV saved: {} ({} rows)", path.display(), records.len());
    Ok(())
}

/// Reads records back from a file written by [`write_csv`]
pub fn read_csv(path: &Path) -> OutputResult<Vec<QuoteRecord>> {
    let bytes = fs::read(path)?;
    let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = csv::Reader::from_reader(content);
    let records = reader
        .deserialize::<QuoteRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub(crate) fn ensure_parent_dir(path: &Path) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
