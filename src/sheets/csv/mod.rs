// src/sheets/csv/mod.rs
//! CSV ingestion pipeline: logical line splitting, field splitting, header
//! normalization and row materialization. Cell values are always untyped text.

pub mod field_splitter;
pub mod header;
pub mod line_splitter;
pub mod materializer;

#[cfg(test)]
mod tests;

use tracing::debug;

use super::definitions::ParsedSheet;

pub use field_splitter::split_row;
pub use header::normalize_headers;
pub use line_splitter::split_logical_lines;
pub use materializer::materialize_row;

/// Parses CSV text exported from one sheet tab. Malformed rows are normalized,
/// never rejected; empty input yields an empty sheet.
pub fn parse_csv(text: &str, sheet_id: &str) -> ParsedSheet {
    let lines = split_logical_lines(text);
    let Some((first, rest)) = lines.split_first() else {
        debug!("CSV for sheet '{}' has no lines. Returning empty sheet.", sheet_id);
        return ParsedSheet::empty();
    };

    let headers = normalize_headers(first);
    let records = rest
        .iter()
        .enumerate()
        .map(|(idx, line)| materialize_row(&split_row(line), &headers, idx + 1, sheet_id))
        .collect::<Vec<_>>();

    debug!(
        "Parsed sheet '{}': {} columns, {} records",
        sheet_id,
        headers.len(),
        records.len()
    );
    ParsedSheet { headers, records }
}
