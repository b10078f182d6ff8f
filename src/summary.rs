use serde::Serialize;

use crate::record::Record;

/// Aggregate view of a record set, mirroring what the dashboard charts
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub count: usize,

    /// Mean pre score; `None` for an empty set
    pub average_pre: Option<f64>,

    /// Mean post score; `None` for an empty set
    pub average_post: Option<f64>,

    /// Names of weak records in record order
    pub weak: Vec<String>,
}

impl Summary {
    pub fn of(records: &[Record]) -> Summary {
        let count = records.len();
        let mean = |score: fn(&Record) -> f64| {
            (count > 0).then(|| records.iter().map(score).sum::<f64>() / count as f64)
        };

        Summary {
            count,
            average_pre: mean(|r| r.pre_score),
            average_post: mean(|r| r.post_score),
            weak: records
                .iter()
                .filter(|r| r.is_weak())
                .map(|r| r.name.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_averages() {
        let summary = Summary::of(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_pre, None);
        assert_eq!(summary.average_post, None);
        assert!(summary.weak.is_empty());
    }

    #[test]
    fn averages_and_weak_names() {
        let records = vec![
            Record::new("A", 40.0, 55.0),
            Record::new("B", 80.0, 90.0),
            Record::new("C", 60.0, 49.0),
        ];
        let summary = Summary::of(&records);
        assert_eq!(summary.count, 3);
        assert!((summary.average_pre.unwrap() - 60.0).abs() < 1e-9);
        assert!((summary.average_post.unwrap() - 194.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.weak, vec!["A", "C"]);
    }
}
