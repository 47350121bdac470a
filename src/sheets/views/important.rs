// src/sheets/views/important.rs

use chrono::NaiveDate;
use serde::Serialize;

use super::charts::{count_by, Bucket};
use crate::sheets::badges::{record_status, StatusBadge};
use crate::sheets::dates::parse_sheet_date;
use crate::sheets::definitions::{Domain, Record};
use crate::sheets::filters::distinct_values;

/// Columns shown by the priority-thread table, fixed by the sheet layout.
pub const IMPORTANT_COLUMNS: &[&str] = &[
    "S. No.",
    "Threads Subject",
    "Tasks to be done",
    "Start Date",
    "Team",
    "Owner",
    "Status",
    "EDD - Closure",
    "Remarks",
];

const EDD_COLUMN: &str = "EDD - Closure";

#[derive(Debug, Clone, Serialize)]
pub struct ImportantView {
    pub total: usize,
    pub closed: usize,
    pub wip: usize,
    pub overdue: usize,
    pub team_mix: Vec<Bucket>,
    pub status_mix: Vec<Bucket>,
    pub overdue_ids: Vec<String>,
}

/// Due today or earlier and not closed.
pub fn is_overdue(record: &Record, today: NaiveDate) -> bool {
    let past_due = parse_sheet_date(record.value(EDD_COLUMN)).is_some_and(|edd| edd <= today);
    past_due && record_status(Domain::Important, record) != StatusBadge::Closed
}

impl ImportantView {
    pub fn build(records: &[&Record], today: NaiveDate) -> Self {
        let badge = |r: &&Record| record_status(Domain::Important, r);
        let overdue_ids: Vec<String> = records
            .iter()
            .filter(|r| is_overdue(r, today))
            .map(|r| r.id.clone())
            .collect();
        Self {
            total: records.len(),
            closed: records.iter().filter(|r| badge(r) == StatusBadge::Closed).count(),
            wip: records.iter().filter(|r| badge(r) == StatusBadge::Wip).count(),
            overdue: overdue_ids.len(),
            team_mix: count_by(records, "Team", "Unknown"),
            status_mix: count_by(records, Domain::Important.status_column(), "Unknown"),
            overdue_ids,
        }
    }
}

/// Option lists for the team, owner and status selectors, taken from the
/// unfiltered data.
#[derive(Debug, Clone, Serialize)]
pub struct ImportantFilterOptions {
    pub teams: Vec<String>,
    pub owners: Vec<String>,
    pub statuses: Vec<String>,
}

impl ImportantFilterOptions {
    pub fn from_records(records: &[&Record]) -> Self {
        let collect = |column: &str| {
            distinct_values(records, column)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        Self {
            teams: collect("Team"),
            owners: collect("Owner"),
            statuses: collect("Status"),
        }
    }
}
