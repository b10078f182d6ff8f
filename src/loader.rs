use calamine::{Data, Reader, Xlsx, open_workbook};
use csv::ReaderBuilder;
use std::path::Path;
use thiserror::Error;

use crate::record::{RawCell, RawTable};

/// Spreadsheet formats accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    /// Comma-separated text with a header row
    Csv,

    /// Excel 2007+ workbook; only the first worksheet is read
    Xlsx,
}

impl UploadFormat {
    /// Detect the format from a file name's extension (case-insensitive)
    ///
    /// # Examples
    /// ```
    /// use score_dashboard::loader::UploadFormat;
    ///
    /// assert_eq!(UploadFormat::from_filename("marks.CSV"), Some(UploadFormat::Csv));
    /// assert_eq!(UploadFormat::from_filename("marks.xls"), None);
    /// ```
    pub fn from_filename(filename: impl AsRef<Path>) -> Option<UploadFormat> {
        let extension = filename
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("csv") => Some(UploadFormat::Csv),
            Some("xlsx") => Some(UploadFormat::Xlsx),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("No sheets found in Excel file")]
    NoWorksheet,

    #[error("No columns to parse from file")]
    Empty,
}

/// Read a saved upload into a raw table
///
/// The first row is taken as the header row. Rows shorter than the header
/// are padded with empty cells.
///
/// # Errors
/// * [`LoadError`] when the file cannot be opened or decoded, or has no header row
pub fn load_table(path: impl AsRef<Path>, format: UploadFormat) -> Result<RawTable, LoadError> {
    match format {
        UploadFormat::Csv => from_csv(path),
        UploadFormat::Xlsx => from_excel(path),
    }
}

/// Load a CSV file
///
/// Fields are decoded as UTF-8; a byte-order mark before the first header
/// is ignored. Every non-blank field is kept as text.
pub fn from_csv(path: impl AsRef<Path>) -> Result<RawTable, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Empty);
    }

    let mut table = RawTable::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(text_cell).collect());
    }

    Ok(table)
}

/// Load the first worksheet of an XLSX workbook
///
/// Numeric cells stay numeric so scores never round-trip through text.
pub fn from_excel(path: impl AsRef<Path>) -> Result<RawTable, LoadError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::NoWorksheet)??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_text).collect(),
        None => return Err(LoadError::Empty),
    };

    let mut table = RawTable::new(headers);
    for row in rows {
        table.push_row(row.iter().map(excel_cell).collect());
    }

    Ok(table)
}

fn text_cell(field: &str) -> RawCell {
    if field.trim().is_empty() {
        RawCell::Empty
    } else {
        RawCell::Text(field.to_string())
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn excel_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => text_cell(s),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        // Dates and error values never coerce to a score
        _ => RawCell::Empty,
    }
}
