// src/sheets/dates.rs
//! Shared date parsing for sheet cells. Every view goes through
//! `parse_sheet_date`, so a change in the spreadsheet's date format only
//! needs to be handled here.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// Parses a sheet date. Accepts `DD-MMM-YY`, `DD-MMM-YYYY`, `DD-MM-YYYY` and a
/// handful of locale formats. Empty cells and `-` are `None`.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    parse_dashed(s).or_else(|| parse_locale(s))
}

fn parse_dashed(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('-').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let day: u32 = day.parse().ok()?;
    let month = month_number(month)?;
    let year: i32 = match year.len() {
        2 => 2000 + year.parse::<i32>().ok()?,
        4 => year.parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let prefix: String = token.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}

/// chrono's `%Y` accepts any digit count, so "3/9/24" would read as year 3 or
/// 24. Those years must have four digits; short years go to `%y`, which always
/// means 20YY.
fn checked_year(fmt: &str, date: NaiveDate) -> Option<NaiveDate> {
    if fmt.contains("%Y") && date.year() < 1000 {
        return None;
    }
    if fmt.contains("%y") && date.year() < 2000 {
        return date.with_year(date.year() + 100);
    }
    Some(date)
}

fn parse_locale(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDate::parse_from_str(s, fmt)
                .ok()
                .and_then(|d| checked_year(fmt, d))
        })
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|fmt| {
                NaiveDateTime::parse_from_str(s, fmt)
                    .ok()
                    .and_then(|dt| checked_year(fmt, dt.date()))
            })
        })
}
