use serde::Serialize;

/// Scores strictly below this mark flag a record as weak on the dashboard
pub const WEAK_THRESHOLD: f64 = 50.0;

/// One student's normalized scores
///
/// Serializes with the column labels the dashboard reads
/// (`Name`, `Pre_Summative`, `Post_Summative`). Both scores are always finite.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Pre_Summative")]
    pub pre_score: f64,
    #[serde(rename = "Post_Summative")]
    pub post_score: f64,
}

/// Ordered records in file row order
pub type RecordSet = Vec<Record>;

impl Record {
    pub fn new(name: impl Into<String>, pre_score: f64, post_score: f64) -> Self {
        Record {
            name: name.into(),
            pre_score,
            post_score,
        }
    }

    /// Either score falls below [`WEAK_THRESHOLD`]
    pub fn is_weak(&self) -> bool {
        self.pre_score < WEAK_THRESHOLD || self.post_score < WEAK_THRESHOLD
    }
}

/// A single cell as read from an uploaded file
#[derive(Clone, Debug, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

/// Header row plus data rows, before any column mapping
///
/// Every row has exactly `headers.len()` cells; short rows are padded
/// with [`RawCell::Empty`] and extra cells are dropped when pushed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        RawTable {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, mut row: Vec<RawCell>) {
        row.resize(self.headers.len(), RawCell::Empty);
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_dashboard_keys() {
        let json = serde_json::to_value(Record::new("Asha", 40.0, 55.5)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Name": "Asha", "Pre_Summative": 40.0, "Post_Summative": 55.5})
        );
    }

    #[test]
    fn weak_when_either_score_below_threshold() {
        assert!(Record::new("a", 49.9, 90.0).is_weak());
        assert!(Record::new("b", 90.0, 10.0).is_weak());
        assert!(!Record::new("c", 50.0, 50.0).is_weak());
        assert!(!Record::new("d", 72.0, 88.0).is_weak());
    }

    #[test]
    fn push_row_pads_and_truncates() {
        let mut table = RawTable::new(vec!["a".into(), "b".into()]);
        table.push_row(vec![RawCell::Text("x".into())]);
        table.push_row(vec![
            RawCell::Number(1.0),
            RawCell::Number(2.0),
            RawCell::Number(3.0),
        ]);
        assert_eq!(table.rows[0], vec![RawCell::Text("x".into()), RawCell::Empty]);
        assert_eq!(table.rows[1], vec![RawCell::Number(1.0), RawCell::Number(2.0)]);
    }
}
