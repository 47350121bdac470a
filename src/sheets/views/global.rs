// src/sheets/views/global.rs
//! Cross-domain totals for the executive summary view.

use serde::Serialize;

use super::charts::Bucket;
use crate::sheets::badges::{record_status, StatusBadge};
use crate::sheets::definitions::{Domain, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainComparison {
    pub domain: Domain,
    pub resolved: usize,
    pub wip: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalView {
    pub total_items: usize,
    pub total_closed: usize,
    /// Rounded percentage of closed items, 0 when there are none.
    pub resolution_rate: u32,
    pub volume_distribution: Vec<Bucket>,
    pub resolution_comparison: Vec<DomainComparison>,
}

pub fn resolved_count(domain: Domain, records: &[&Record]) -> usize {
    records
        .iter()
        .filter(|r| record_status(domain, r).is_closed())
        .count()
}

/// Social counts explicit WIP tickets; other domains count everything not closed.
fn wip_count(domain: Domain, records: &[&Record]) -> usize {
    match domain {
        Domain::SocialMedia => records
            .iter()
            .filter(|r| record_status(domain, r) == StatusBadge::Wip)
            .count(),
        _ => records.len() - resolved_count(domain, records),
    }
}

impl GlobalView {
    /// `domains` holds the filtered records of each domain.
    pub fn build(domains: &[(Domain, Vec<&Record>)]) -> Self {
        let total_items: usize = domains.iter().map(|(_, r)| r.len()).sum();
        let resolution_comparison: Vec<DomainComparison> = domains
            .iter()
            .map(|(domain, records)| DomainComparison {
                domain: *domain,
                resolved: resolved_count(*domain, records),
                wip: wip_count(*domain, records),
            })
            .collect();
        let total_closed: usize = resolution_comparison.iter().map(|c| c.resolved).sum();
        let resolution_rate = if total_items > 0 {
            ((total_closed as f64 / total_items as f64) * 100.0).round() as u32
        } else {
            0
        };
        Self {
            total_items,
            total_closed,
            resolution_rate,
            volume_distribution: domains
                .iter()
                .map(|(d, r)| Bucket::new(d.label(), r.len()))
                .collect(),
            resolution_comparison,
        }
    }
}
