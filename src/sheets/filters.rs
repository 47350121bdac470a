// src/sheets/filters.rs

use chrono::{Datelike, Duration, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use super::dates::parse_sheet_date;
use super::definitions::{Domain, Record};

/// Date window applied to a domain's primary date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Last7Days,
    Last30Days,
    ThisMonth,
    /// Both ends inclusive; an open end is unbounded.
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateRange {
    /// Rows without a parseable date only pass the `All` window.
    pub fn matches(&self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        let Some(date) = date else {
            return matches!(self, DateRange::All);
        };
        match *self {
            DateRange::All => true,
            DateRange::Today => date == today,
            DateRange::Last7Days => date >= today - Duration::days(7),
            DateRange::Last30Days => date >= today - Duration::days(30),
            DateRange::ThisMonth => date.month() == today.month() && date.year() == today.year(),
            DateRange::Custom { start, end } => {
                start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            DateRange::All => "Full History".to_string(),
            DateRange::Today => "Today".to_string(),
            DateRange::Last7Days => "Last 7 Days".to_string(),
            DateRange::Last30Days => "Last 30 Days".to_string(),
            DateRange::ThisMonth => "Current Month".to_string(),
            DateRange::Custom { start, end } => format!(
                "Custom Range ({} to {})",
                start.map(|d| d.to_string()).unwrap_or_else(|| "start".to_string()),
                end.map(|d| d.to_string()).unwrap_or_else(|| "now".to_string())
            ),
        }
    }
}

/// Source tabs inside the social-media view, keyed off the `Source` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
pub enum SocialSource {
    #[default]
    All,
    SocialMedia,
    Board,
    Other,
}

impl SocialSource {
    pub fn matches(self, source: &str) -> bool {
        let s = source.to_lowercase();
        let social = s.contains("social media");
        let board = s.contains("board");
        match self {
            SocialSource::All => true,
            SocialSource::SocialMedia => social,
            SocialSource::Board => board && !social,
            SocialSource::Other => !social && !board,
        }
    }
}

/// Lowercases and folds diacritics so "Resolución" matches "resolucion".
pub fn fold_for_search(s: &str) -> String {
    s.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Every filter a view can apply. `None` on an equality filter means "All".
/// Team, owner and status only apply to priority threads.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub search: Option<String>,
    pub range: DateRange,
    pub source: SocialSource,
    pub team: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    /// Executive-summary windows: rolling ranges stop at today and undated
    /// rows only pass `All`, for every domain.
    pub summary_window: bool,
}

impl RecordFilter {
    /// Date-only filter used by the executive summary.
    pub fn for_summary(range: DateRange) -> Self {
        Self {
            range,
            summary_window: true,
            ..Default::default()
        }
    }

    fn matches_date(&self, domain: Domain, record: &Record, today: NaiveDate) -> bool {
        let date = parse_sheet_date(record.value(domain.date_column()));
        if self.summary_window {
            let rolling = matches!(self.range, DateRange::Last7Days | DateRange::Last30Days);
            if rolling && date.is_some_and(|d| d > today) {
                return false;
            }
            return self.range.matches(date, today);
        }
        // Social tickets without a usable acknowledgement date stay visible.
        if date.is_none() && domain == Domain::SocialMedia {
            return true;
        }
        self.range.matches(date, today)
    }

    pub fn matches(&self, domain: Domain, record: &Record, today: NaiveDate) -> bool {
        if let Some(query) = self.search.as_deref().filter(|q| !q.is_empty()) {
            let needle = fold_for_search(query);
            if !record.values().any(|v| fold_for_search(v).contains(&needle)) {
                return false;
            }
        }
        if domain == Domain::SocialMedia && !self.source.matches(record.value("Source")) {
            return false;
        }
        if domain == Domain::Important {
            let equal = |column: &str, wanted: &Option<String>| {
                wanted.as_deref().map_or(true, |w| record.value(column) == w)
            };
            if !equal("Team", &self.team)
                || !equal("Owner", &self.owner)
                || !equal(domain.status_column(), &self.status)
            {
                return false;
            }
        }
        self.matches_date(domain, record, today)
    }

    /// Filters and, for the social-media view, orders by serial number.
    pub fn apply<'a>(&self, domain: Domain, records: &'a [Record], today: NaiveDate) -> Vec<&'a Record> {
        let mut out: Vec<&Record> = records
            .iter()
            .filter(|r| self.matches(domain, r, today))
            .collect();
        if domain == Domain::SocialMedia {
            out.sort_by_key(|r| serial_number(r.value("S no.")));
        }
        out
    }
}

/// Digits of a serial cell as a number; no digits sorts as 0.
pub fn serial_number(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Distinct non-empty values of `column` in first-seen order.
pub fn distinct_values<'a>(records: &[&'a Record], column: &str) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for r in records {
        let v = r.value(column);
        if !v.is_empty() && !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}
