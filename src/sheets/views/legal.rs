// src/sheets/views/legal.rs

use serde::Serialize;

use super::charts::{count_by, sorted_desc, trend_by_date, Bucket};
use crate::sheets::badges::{record_status, StatusBadge};
use crate::sheets::definitions::{Domain, Record};

/// Columns shown by the legal table, fixed by the sheet layout.
pub const LEGAL_COLUMNS: &[&str] = &[
    "Worked Date",
    "HOD Name",
    "Type",
    "Intimation Date BS Conflict/PWIM Team",
    "Reply By (Date) BS Conflict Team",
    "TAT BS Conflilct",
    "Subject",
    "Thread Status",
];

// Header spelling matches the sheet.
const TAT_COLUMN: &str = "TAT BS Conflilct";

#[derive(Debug, Clone, Serialize)]
pub struct LegalView {
    pub total: usize,
    pub closed: usize,
    pub wip: usize,
    pub avg_tat: f64,
    pub type_mix: Vec<Bucket>,
    pub trend: Vec<Bucket>,
}

impl LegalView {
    pub fn build(records: &[&Record]) -> Self {
        let badge = |r: &&Record| record_status(Domain::Legal, r);
        Self {
            total: records.len(),
            closed: records.iter().filter(|r| badge(r) == StatusBadge::Closed).count(),
            wip: records.iter().filter(|r| badge(r) == StatusBadge::Wip).count(),
            avg_tat: average_tat(records),
            type_mix: sorted_desc(count_by(records, "Type", "Other")),
            trend: trend_by_date(records, Domain::Legal.date_column()),
        }
    }
}

/// Numeric prefix of a cell as a float ("2.5d" is 2.5).
pub fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let end = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Mean of non-negative TAT values. An empty cell counts as 0; unparseable
/// cells are left out.
fn average_tat(records: &[&Record]) -> f64 {
    let tats: Vec<f64> = records
        .iter()
        .filter_map(|r| {
            let raw = r.value(TAT_COLUMN);
            leading_float(if raw.trim().is_empty() { "0" } else { raw })
        })
        .filter(|t| *t >= 0.0)
        .collect();
    if tats.is_empty() {
        0.0
    } else {
        tats.iter().sum::<f64>() / tats.len() as f64
    }
}
