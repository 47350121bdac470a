// src/ai/payload.rs
//! Compact request payload: row counts plus a small sample per domain.

use indexmap::IndexMap;
use serde::Serialize;

use crate::sheets::definitions::{Domain, Record};
use crate::sheets::views::global::resolved_count;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DomainDigest {
    pub count: usize,
    pub resolved: usize,
    /// First rows of the filtered data, non-empty cells only.
    pub sample: Vec<IndexMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    pub date_range: String,
    pub social: DomainDigest,
    pub proxy: DomainDigest,
    pub legal: DomainDigest,
    pub important: DomainDigest,
}

fn sample_row(record: &Record) -> IndexMap<String, String> {
    record
        .cells
        .iter()
        .filter(|(_, v)| !v.trim().is_empty() && v.trim() != "-")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

pub fn digest(domain: Domain, records: &[&Record], sample_size: usize) -> DomainDigest {
    DomainDigest {
        count: records.len(),
        resolved: resolved_count(domain, records),
        sample: records.iter().take(sample_size).map(|r| sample_row(r)).collect(),
    }
}

impl SummaryPayload {
    /// `filtered` yields the filtered records for a domain.
    pub fn build<'a, F>(date_range: String, sample_size: usize, filtered: F) -> Self
    where
        F: Fn(Domain) -> Vec<&'a Record>,
    {
        let d = |domain: Domain| digest(domain, &filtered(domain), sample_size);
        Self {
            date_range,
            social: d(Domain::SocialMedia),
            proxy: d(Domain::Proxy),
            legal: d(Domain::Legal),
            important: d(Domain::Important),
        }
    }
}
