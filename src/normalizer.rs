use thiserror::Error;

use crate::columns::{CanonicalField, ColumnMap};
use crate::record::{RawCell, RawTable, Record, RecordSet};

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("Missing required columns: {}", join_labels(.0))]
    MissingColumns(Vec<CanonicalField>),
}

fn join_labels(fields: &[CanonicalField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of cleaning one table
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub records: RecordSet,

    /// Rows discarded for a missing name or a non-numeric score
    pub dropped: usize,
}

/// Turn a raw table into records
///
/// Column resolution happens first, so a table missing a canonical column
/// fails before any cell is coerced. Rows whose name is blank or a null
/// marker such as `N/A`, or whose scores do not coerce to finite numbers,
/// are dropped and counted.
///
/// # Errors
/// * [`NormalizeError::MissingColumns`] naming every absent canonical field
///
/// # Examples
/// ```
/// use score_dashboard::normalizer::normalize;
/// use score_dashboard::record::{RawCell, RawTable};
///
/// let mut table = RawTable::new(vec!["Name".into(), "Pre Summative".into(), "Post Summative".into()]);
/// table.push_row(vec![RawCell::Text("A".into()), RawCell::Text("40".into()), RawCell::Number(55.0)]);
/// table.push_row(vec![RawCell::Text("B".into()), RawCell::Text("abc".into()), RawCell::Number(60.0)]);
///
/// let out = normalize(&table).unwrap();
/// assert_eq!(out.records.len(), 1);
/// assert_eq!(out.dropped, 1);
/// ```
pub fn normalize(table: &RawTable) -> Result<Normalized, NormalizeError> {
    let columns = ColumnMap::resolve(&table.headers).map_err(NormalizeError::MissingColumns)?;

    let mut records = RecordSet::with_capacity(table.rows.len());
    let mut dropped = 0;

    for row in &table.rows {
        match to_record(row, &columns) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    Ok(Normalized { records, dropped })
}

fn to_record(row: &[RawCell], columns: &ColumnMap) -> Option<Record> {
    let name = coerce_name(row.get(columns.name)?)?;
    let pre_score = coerce_score(row.get(columns.pre_summative)?)?;
    let post_score = coerce_score(row.get(columns.post_summative)?)?;
    Some(Record {
        name,
        pre_score,
        post_score,
    })
}

/// Numeric coercion of a score cell; `None` is the missing marker
pub fn coerce_score(cell: &RawCell) -> Option<f64> {
    let value = match cell {
        RawCell::Number(n) => *n,
        RawCell::Text(text) => text.trim().parse::<f64>().ok()?,
        RawCell::Empty => return None,
    };
    value.is_finite().then_some(value)
}

/// Cell texts that spreadsheet exports use for "no value"
const NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Name of a subject; blank cells and null markers count as missing
pub fn coerce_name(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Text(text) => {
            let trimmed = text.trim();
            let missing = trimmed.is_empty() || NULL_MARKERS.contains(&trimmed);
            (!missing).then(|| trimmed.to_string())
        }
        RawCell::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(format!("{}", *n as i64)),
        RawCell::Number(n) if n.is_finite() => Some(n.to_string()),
        RawCell::Number(_) | RawCell::Empty => None,
    }
}
