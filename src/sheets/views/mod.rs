// src/sheets/views/mod.rs
//! Derived view data: stats, chart buckets and table columns. Pure
//! recomputations over the latest parsed sheets.

pub mod charts;
pub mod global;
pub mod important;
pub mod legal;
pub mod proxy;
pub mod social;

use chrono::NaiveDate;
use serde::Serialize;

use super::definitions::{Domain, ParsedSheet, Record};

pub use charts::Bucket;
pub use global::GlobalView;
pub use important::{ImportantFilterOptions, ImportantView, IMPORTANT_COLUMNS};
pub use legal::{LegalView, LEGAL_COLUMNS};
pub use proxy::ProxyView;
pub use social::SocialView;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DomainView {
    Social(SocialView),
    Proxy(ProxyView),
    Legal(LegalView),
    Important(ImportantView),
}

impl DomainView {
    pub fn build(domain: Domain, filtered: &[&Record], today: NaiveDate) -> Self {
        match domain {
            Domain::SocialMedia => DomainView::Social(SocialView::build(filtered)),
            Domain::Proxy => DomainView::Proxy(ProxyView::build(filtered)),
            Domain::Legal => DomainView::Legal(LegalView::build(filtered)),
            Domain::Important => DomainView::Important(ImportantView::build(filtered, today)),
        }
    }
}

/// Table columns for a domain. Legal and priority-thread tables use their
/// fixed layouts; the others follow the sheet's own headers.
pub fn display_columns(domain: Domain, sheet: &ParsedSheet) -> Vec<String> {
    match domain {
        Domain::Legal => LEGAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        Domain::Important => IMPORTANT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        Domain::SocialMedia | Domain::Proxy => {
            sheet.known_headers().into_iter().map(str::to_string).collect()
        }
    }
}
