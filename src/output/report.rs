//! Spreadsheet report generation
//!
//! The workbook holds three sheets: every unique quote, counts by author, and
//! counts by tag. Each table starts at B3 under a merged title in row 2, with
//! a shaded header row and bordered cells.

use crate::aggregate::CountRow;
use crate::output::csv_output::ensure_parent_dir;
use crate::output::error::{OutputError, OutputResult};
use crate::quote::QuoteRecord;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

pub const QUOTES_SHEET: &str = "Quotes";
pub const AUTHORS_SHEET: &str = "Counts by Author";
pub const TAGS_SHEET: &str = "Counts by Tag";

const QUOTE_HEADERS: [&str; 3] = ["text", "author", "tags"];
const AUTHOR_HEADERS: [&str; 2] = ["author", "count"];
const TAG_HEADERS: [&str; 2] = ["tag", "count"];

const MIN_COLUMN_WIDTH: usize = 12;
const MAX_COLUMN_WIDTH: usize = 40;
const COLUMN_PADDING: usize = 2;

const HEADER_FILL: u32 = 0xCCFFCC;
const TITLE_ROW_HEIGHT: f64 = 22.0;

const TITLE_ROW: u32 = 1;
const HEADER_ROW: u32 = 2;
const FIRST_COL: u16 = 1;

/// A cell value in a report table
#[derive(Debug, Clone, Copy)]
enum Cell<'a> {
    Text(&'a str),
    Count(usize),
}

impl Cell<'_> {
    fn display_width(&self) -> usize {
        match self {
            Cell::Text(text) => text.chars().count(),
            Cell::Count(count) => count.to_string().len(),
        }
    }
}

/// One titled table destined for its own sheet
struct SheetTable<'a> {
    name: &'a str,
    headers: &'a [&'a str],
    rows: Vec<Vec<Cell<'a>>>,
}

impl<'a> SheetTable<'a> {
    fn quotes(records: &'a [QuoteRecord]) -> Self {
        Self {
            name: QUOTES_SHEET,
            headers: &QUOTE_HEADERS,
            rows: records
                .iter()
                .map(|r| {
                    vec![
                        Cell::Text(&r.text),
                        Cell::Text(&r.author),
                        Cell::Text(&r.tags),
                    ]
                })
                .collect(),
        }
    }

    fn counts(name: &'a str, headers: &'a [&'a str], counts: &'a [CountRow]) -> Self {
        Self {
            name,
            headers,
            rows: counts
                .iter()
                .map(|c| vec![Cell::Text(&c.key), Cell::Count(c.count)])
                .collect(),
        }
    }

    /// Column widths in characters, header included, clamped to the floor and cap
    fn column_widths(&self) -> Vec<usize> {
        (0..self.headers.len())
            .map(|col| {
                let longest = std::iter::once(self.headers[col].chars().count())
                    .chain(self.rows.iter().map(|row| row[col].display_width()))
                    .max()
                    .unwrap_or(0);
                column_width(longest)
            })
            .collect()
    }
}

/// Width for a column whose longest cell has `longest` characters
fn column_width(longest: usize) -> usize {
    (longest + COLUMN_PADDING).min(MAX_COLUMN_WIDTH).max(MIN_COLUMN_WIDTH)
}

/// Formats shared by every sheet
struct ReportFormats {
    title: Format,
    header: Format,
    cell: Format,
}

impl ReportFormats {
    fn new() -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(14)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_shrink(),
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(Color::RGB(HEADER_FILL))
                .set_border(FormatBorder::Thin)
                .set_border_bottom(FormatBorder::Double)
                .set_border_color(Color::Black),
            cell: Format::new()
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::Black),
        }
    }
}

/// Writes the three-sheet report to `path`
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(OutputError::FileLocked)` - Another program holds the file open
/// * `Err(OutputError)` - Any other write or formatting failure
pub fn write_report(
    records: &[QuoteRecord],
    author_counts: &[CountRow],
    tag_counts: &[CountRow],
    path: &Path,
) -> OutputResult<()> {
    ensure_parent_dir(path)?;

    let formats = ReportFormats::new();
    let tables = [
        SheetTable::quotes(records),
        SheetTable::counts(AUTHORS_SHEET, &AUTHOR_HEADERS, author_counts),
        SheetTable::counts(TAGS_SHEET, &TAG_HEADERS, tag_counts),
    ];

    let mut workbook = Workbook::new();
    for table in &tables {
        let worksheet = workbook.add_worksheet();
        write_table(worksheet, table, &formats)?;
    }

    workbook
        .save(path)
        .map_err(|e| OutputError::from_save_error(e, path))?;

    tracing::info!("Report saved: {}", path.display());
    Ok(())
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &SheetTable<'_>,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    worksheet.set_name(table.name)?;

    let last_col = FIRST_COL + table.headers.len() as u16 - 1;
    worksheet.set_row_height(TITLE_ROW, TITLE_ROW_HEIGHT)?;
    worksheet.merge_range(
        TITLE_ROW,
        FIRST_COL,
        TITLE_ROW,
        last_col,
        table.name,
        &formats.title,
    )?;

    for (offset, header) in table.headers.iter().enumerate() {
        let col = FIRST_COL + offset as u16;
        worksheet.write_string_with_format(HEADER_ROW, col, *header, &formats.header)?;
    }

    for (row_offset, row) in table.rows.iter().enumerate() {
        let row_num = HEADER_ROW + 1 + row_offset as u32;
        for (offset, cell) in row.iter().enumerate() {
            let col = FIRST_COL + offset as u16;
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string_with_format(row_num, col, *text, &formats.cell)?;
                }
                Cell::Count(count) => {
                    worksheet.write_number_with_format(
                        row_num,
                        col,
                        *count as f64,
                        &formats.cell,
                    )?;
                }
            }
        }
    }

    for (offset, width) in table.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(FIRST_COL + offset as u16, width as f64)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{author_counts, tag_counts};
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> Vec<QuoteRecord> {
        vec![
            QuoteRecord::new("A short one", "Einstein", "life, love"),
            QuoteRecord::new("x".repeat(120), "Einstein", "love"),
            QuoteRecord::new("Keep going", "Twain", ""),
        ]
    }

    #[test]
    fn test_column_width_bounds() {
        assert_eq!(column_width(0), MIN_COLUMN_WIDTH);
        assert_eq!(column_width(5), MIN_COLUMN_WIDTH);
        assert_eq!(column_width(20), 22);
        assert_eq!(column_width(500), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_column_widths_include_header() {
        let records = sample();
        let table = SheetTable::quotes(&records);
        assert_eq!(table.column_widths(), vec![40, 12, 12]);

        let counts = vec![CountRow::new("a-rather-long-author-name", 3)];
        let table = SheetTable::counts(AUTHORS_SHEET, &AUTHOR_HEADERS, &counts);
        assert_eq!(table.column_widths(), vec![27, 12]);
    }

    #[test]
    fn test_display_width_counts_chars() {
        assert_eq!(Cell::Text("Émile").display_width(), 5);
        assert_eq!(Cell::Count(1234).display_width(), 4);
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("quotes_report.xlsx");
        let records = sample();

        write_report(
            &records,
            &author_counts(&records),
            &tag_counts(&records),
            &path,
        )
        .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_write_report_with_no_tags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quotes_report.xlsx");
        let records = vec![QuoteRecord::new("untagged", "Nobody", "")];

        write_report(&records, &author_counts(&records), &[], &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_target_propagates() {
        let dir = tempdir().unwrap();
        // A directory where the file should be cannot be saved over
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();

        let result = write_report(&sample(), &[], &[], &path);
        assert!(result.is_err());
        #[cfg(unix)]
        assert!(!result.unwrap_err().is_file_locked());
    }
}
