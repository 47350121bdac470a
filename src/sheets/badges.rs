// src/sheets/badges.rs
//! Status badge classification and cell display hints.

use serde::Serialize;

use super::definitions::{Domain, Record};

const LEGAL_CLOSED: &[&str] = &["closed", "resolved", "done", "solved"];
const LEGAL_WIP: &[&str] = &["wip", "in progress", "pending", "working"];
const IMPORTANT_CLOSED: &[&str] = &["closed", "resolved", "done", "completed"];
const IMPORTANT_WIP: &[&str] = &["wip", "in progress", "working"];
const IMPORTANT_PENDING: &[&str] = &["pending", "to do"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusBadge {
    Closed,
    Wip,
    Pending,
    Other,
    Empty,
}

impl StatusBadge {
    pub fn is_closed(self) -> bool {
        self == StatusBadge::Closed
    }
}

pub fn classify_status(domain: Domain, raw: &str) -> StatusBadge {
    let value = raw.trim();
    if value.is_empty() || value == "-" {
        return StatusBadge::Empty;
    }
    let lower = value.to_lowercase();
    let lower = lower.as_str();
    match domain {
        // Social tickets use exact labels.
        Domain::SocialMedia => match value {
            "Closed" => StatusBadge::Closed,
            "WIP" => StatusBadge::Wip,
            _ => StatusBadge::Other,
        },
        Domain::Proxy => {
            if lower == "solved" {
                StatusBadge::Closed
            } else {
                StatusBadge::Wip
            }
        }
        Domain::Legal => {
            if LEGAL_CLOSED.contains(&lower) {
                StatusBadge::Closed
            } else if LEGAL_WIP.contains(&lower) {
                StatusBadge::Wip
            } else {
                StatusBadge::Other
            }
        }
        Domain::Important => {
            if IMPORTANT_CLOSED.contains(&lower) {
                StatusBadge::Closed
            } else if IMPORTANT_WIP.contains(&lower) {
                StatusBadge::Wip
            } else if IMPORTANT_PENDING.contains(&lower) {
                StatusBadge::Pending
            } else {
                StatusBadge::Other
            }
        }
    }
}

/// Badge for a record's status column in its domain.
pub fn record_status(domain: Domain, record: &Record) -> StatusBadge {
    classify_status(domain, record.value(domain.status_column()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellDisplay<'a> {
    Placeholder,
    Link(&'a str),
    Text(&'a str),
}

pub fn cell_display(value: &str) -> CellDisplay<'_> {
    let v = value.trim();
    if v.is_empty() || v == "-" {
        CellDisplay::Placeholder
    } else if v.starts_with("http") {
        CellDisplay::Link(v)
    } else {
        CellDisplay::Text(v)
    }
}

impl std::fmt::Display for CellDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellDisplay::Placeholder => f.write_str("—"),
            CellDisplay::Link(url) => write!(f, "View <{}>", url),
            CellDisplay::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_sets() {
        assert_eq!(classify_status(Domain::Legal, "Resolved"), StatusBadge::Closed);
        assert_eq!(classify_status(Domain::Legal, "pending"), StatusBadge::Wip);
        assert_eq!(classify_status(Domain::Legal, "On hold"), StatusBadge::Other);
        assert_eq!(classify_status(Domain::Legal, "-"), StatusBadge::Empty);
    }

    #[test]
    fn test_important_pending_is_separate() {
        assert_eq!(classify_status(Domain::Important, "To Do"), StatusBadge::Pending);
        assert_eq!(classify_status(Domain::Important, "completed"), StatusBadge::Closed);
        assert_eq!(classify_status(Domain::Important, "solved"), StatusBadge::Other);
    }

    #[test]
    fn test_social_is_exact() {
        assert_eq!(classify_status(Domain::SocialMedia, "Closed"), StatusBadge::Closed);
        assert_eq!(classify_status(Domain::SocialMedia, "closed"), StatusBadge::Other);
        assert_eq!(classify_status(Domain::SocialMedia, "WIP"), StatusBadge::Wip);
    }

    #[test]
    fn test_proxy_anything_unsolved_is_wip() {
        assert_eq!(classify_status(Domain::Proxy, "SOLVED"), StatusBadge::Closed);
        assert_eq!(classify_status(Domain::Proxy, "Awaiting docs"), StatusBadge::Wip);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(cell_display(" - "), CellDisplay::Placeholder);
        assert_eq!(cell_display("https://x.test/doc"), CellDisplay::Link("https://x.test/doc"));
        assert_eq!(cell_display("Asha").to_string(), "Asha");
    }
}
