// src/sheets/definitions.rs

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Columns probed, in order, for a human-meaningful row key.
pub const ROW_KEY_COLUMNS: &[&str] = &[
    "Ticket ID",
    "Ticket Id",
    "S no.",
    "S. No.",
    "Subject",
    "Threads Subject",
];

/// One parsed data row: an ordered column-name to cell-value mapping plus the
/// synthesized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub cells: IndexMap<String, String>,
}

impl Record {
    pub fn new(id: String, cells: IndexMap<String, String>) -> Self {
        Self { id, cells }
    }

    /// Cell value for `column`, `None` when the column is not part of the sheet.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Cell value for `column`, empty string when missing.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Cell value with the sheet's "no value" markers (`""`, `-`) mapped to `None`.
    pub fn present(&self, column: &str) -> Option<&str> {
        match self.get(column).map(str::trim) {
            None | Some("") | Some("-") => None,
            Some(v) => Some(v),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.values().map(String::as_str)
    }
}

/// Header list and records produced by one parse. Replaced wholesale on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl ParsedSheet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Headers usable as labels; positional placeholders (empty names) are dropped.
    pub fn known_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .map(String::as_str)
            .filter(|h| !h.is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The four business domains, each backed by one spreadsheet tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[value(name = "social")]
    SocialMedia,
    Proxy,
    Legal,
    Important,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::SocialMedia,
        Domain::Proxy,
        Domain::Legal,
        Domain::Important,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Domain::SocialMedia => "Social Media",
            Domain::Proxy => "Proxy",
            Domain::Legal => "Legal",
            Domain::Important => "Important Threads",
        }
    }

    /// Column driving date-range filtering and trend buckets.
    pub fn date_column(self) -> &'static str {
        match self {
            Domain::SocialMedia | Domain::Proxy => "Acknowledgement Date",
            Domain::Legal => "Worked Date",
            Domain::Important => "Start Date",
        }
    }

    pub fn status_column(self) -> &'static str {
        match self {
            Domain::SocialMedia => "Ticket Status",
            Domain::Proxy | Domain::Important => "Status",
            Domain::Legal => "Thread Status",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
