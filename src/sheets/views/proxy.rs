// src/sheets/views/proxy.rs

use serde::Serialize;

use super::charts::{count_by, trend_by_date, Bucket};
use crate::sheets::definitions::{Domain, Record};
use crate::sheets::filters::distinct_values;

#[derive(Debug, Clone, Serialize)]
pub struct ProxyView {
    pub total: usize,
    pub intro_verified: usize,
    pub associates: usize,
    pub owner_mix: Vec<Bucket>,
    pub status_mix: Vec<Bucket>,
    pub intro_mix: Vec<Bucket>,
    pub trend: Vec<Bucket>,
}

fn intro_found(r: &Record) -> bool {
    r.value("Introduction Found").trim().eq_ignore_ascii_case("yes")
}

impl ProxyView {
    pub fn build(records: &[&Record]) -> Self {
        let mut intro_mix: Vec<Bucket> = Vec::new();
        for r in records {
            let label = if intro_found(r) { "Found" } else { "Not Found" };
            match intro_mix.iter_mut().find(|b| b.label == label) {
                Some(b) => b.count += 1,
                None => intro_mix.push(Bucket::new(label, 1)),
            }
        }
        Self {
            total: records.len(),
            intro_verified: records.iter().filter(|r| intro_found(r)).count(),
            associates: distinct_values(records, "Owner").len(),
            owner_mix: count_by(records, "Owner", "Unassigned"),
            status_mix: count_by(records, Domain::Proxy.status_column(), "Unknown"),
            intro_mix,
            trend: trend_by_date(records, Domain::Proxy.date_column()),
        }
    }
}
