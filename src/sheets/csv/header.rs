// src/sheets/csv/header.rs

use super::field_splitter::{split_fields, strip_enclosing_quotes};

/// Canonical column names for the first logical line. Order is preserved and
/// empty names stay in place as positional placeholders.
pub fn normalize_headers(first_line: &str) -> Vec<String> {
    split_fields(first_line)
        .iter()
        .enumerate()
        .map(|(idx, cell)| normalize_header_cell(cell, idx == 0))
        .collect()
}

pub fn normalize_header_cell(cell: &str, first: bool) -> String {
    let cell = if first {
        cell.trim_start_matches('\u{FEFF}')
    } else {
        cell
    };
    strip_enclosing_quotes(cell.trim())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bom_quotes_and_newlines_collapse() {
        let headers = normalize_headers("\u{FEFF}\" Mail Thread \n \",Owner");
        assert_eq!(headers, vec!["Mail Thread", "Owner"]);
    }

    #[test]
    fn test_internal_whitespace_runs_collapse() {
        assert_eq!(
            normalize_header_cell("Reply By  (Date)\r\n BS   Conflict Team", false),
            "Reply By (Date) BS Conflict Team"
        );
    }

    #[test]
    fn test_empty_headers_keep_their_position() {
        assert_eq!(normalize_headers("S no.,,Name"), vec!["S no.", "", "Name"]);
    }

    #[test]
    fn test_single_quoted_header() {
        assert_eq!(normalize_headers("'Status'"), vec!["Status"]);
    }

    #[test]
    fn test_bom_only_stripped_from_first_cell() {
        let headers = normalize_headers("a,\u{FEFF}b");
        assert_eq!(headers[1], "\u{FEFF}b");
    }
}
