// src/sheets/views/social.rs

use serde::Serialize;

use super::charts::{count_by, trend_by_date, Bucket};
use crate::sheets::badges::{record_status, StatusBadge};
use crate::sheets::definitions::{Domain, Record};

const TAT_BUCKETS: [(&str, i64); 4] = [
    ("0-5 Days", 5),
    ("6-10 Days", 10),
    ("11-20 Days", 20),
    ("21+ Days", i64::MAX),
];

#[derive(Debug, Clone, Serialize)]
pub struct SocialView {
    pub total: usize,
    pub closed: usize,
    pub wip: usize,
    pub status_mix: Vec<Bucket>,
    pub trend: Vec<Bucket>,
    pub tat_buckets: Vec<Bucket>,
}

impl SocialView {
    pub fn build(records: &[&Record]) -> Self {
        let badge = |r: &&Record| record_status(Domain::SocialMedia, r);
        Self {
            total: records.len(),
            closed: records.iter().filter(|r| badge(r) == StatusBadge::Closed).count(),
            wip: records.iter().filter(|r| badge(r) == StatusBadge::Wip).count(),
            status_mix: count_by(records, Domain::SocialMedia.status_column(), "Unknown"),
            trend: trend_by_date(records, Domain::SocialMedia.date_column()),
            tat_buckets: tat_buckets(records),
        }
    }
}

/// Integer prefix of a cell ("12 days" is 12); anything else is 0.
pub fn leading_int(raw: &str) -> i64 {
    let s = raw.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let digits: String = digits.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

fn tat_buckets(records: &[&Record]) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = TAT_BUCKETS.iter().map(|(l, _)| Bucket::new(*l, 0)).collect();
    for r in records {
        let tat = leading_int(r.value("TAT"));
        if let Some(idx) = TAT_BUCKETS.iter().position(|(_, max)| tat <= *max) {
            buckets[idx].count += 1;
        }
    }
    buckets
}
