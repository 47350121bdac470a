// src/sheets/views/charts.rs
//! Chart bucket aggregation shared by every view.

use serde::Serialize;

use crate::sheets::dates::parse_sheet_date;
use crate::sheets::definitions::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

impl Bucket {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

fn bump(buckets: &mut Vec<Bucket>, label: &str) {
    match buckets.iter_mut().find(|b| b.label == label) {
        Some(b) => b.count += 1,
        None => buckets.push(Bucket::new(label, 1)),
    }
}

/// Counts per distinct value of `column`, first-seen order. Empty cells count
/// under `fallback`.
pub fn count_by(records: &[&Record], column: &str, fallback: &str) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    for r in records {
        let v = r.value(column);
        bump(&mut buckets, if v.is_empty() { fallback } else { v });
    }
    buckets
}

/// Largest bucket first; ties keep first-seen order.
pub fn sorted_desc(mut buckets: Vec<Bucket>) -> Vec<Bucket> {
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

/// Counts per raw date string, ordered by the parsed date. Empty and `-` cells
/// are skipped; unparseable labels sort first.
pub fn trend_by_date(records: &[&Record], column: &str) -> Vec<Bucket> {
    let mut buckets = Vec::new();
    for r in records {
        if let Some(raw) = r.present(column) {
            bump(&mut buckets, raw);
        }
    }
    buckets.sort_by_key(|b| parse_sheet_date(&b.label));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn record(column: &str, value: &str) -> Record {
        let mut cells = IndexMap::new();
        cells.insert(column.to_string(), value.to_string());
        Record::new(String::new(), cells)
    }

    #[test]
    fn test_count_by_uses_fallback() {
        let records = [record("Owner", "A"), record("Owner", ""), record("Owner", "A")];
        let refs: Vec<&Record> = records.iter().collect();
        assert_eq!(
            count_by(&refs, "Owner", "Unassigned"),
            vec![Bucket::new("A", 2), Bucket::new("Unassigned", 1)]
        );
    }

    #[test]
    fn test_trend_sorted_by_parsed_date() {
        let records = [
            record("Worked Date", "03-Feb-24"),
            record("Worked Date", "-"),
            record("Worked Date", "28-Jan-24"),
            record("Worked Date", "03-Feb-24"),
            record("Worked Date", "soon"),
        ];
        let refs: Vec<&Record> = records.iter().collect();
        assert_eq!(
            trend_by_date(&refs, "Worked Date"),
            vec![
                Bucket::new("soon", 1),
                Bucket::new("28-Jan-24", 1),
                Bucket::new("03-Feb-24", 2),
            ]
        );
    }

    #[test]
    fn test_sorted_desc_is_stable() {
        let sorted = sorted_desc(vec![Bucket::new("a", 1), Bucket::new("b", 3), Bucket::new("c", 1)]);
        let labels: Vec<&str> = sorted.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
    }
}
