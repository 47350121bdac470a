// src/sheets/csv/materializer.rs

use indexmap::IndexMap;

use crate::sheets::definitions::{Record, ROW_KEY_COLUMNS};

/// Zips one data row against the header list.
///
/// Missing trailing cells become empty strings and empty header names are
/// skipped, so every record of a parse has the same key set. Never fails.
pub fn materialize_row(
    fields: &[String],
    headers: &[String],
    ordinal: usize,
    sheet_id: &str,
) -> Record {
    let mut cells = IndexMap::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        if header.is_empty() {
            continue;
        }
        let value = fields.get(idx).cloned().unwrap_or_default();
        cells.insert(header.clone(), value);
    }
    let id = synthesize_id(&cells, ordinal, sheet_id);
    Record::new(id, cells)
}

/// `sheet:<sheetId>:<ordinal>:<humanKey>`; the ordinal keeps ids unique when
/// human keys collide or are absent.
pub fn synthesize_id(cells: &IndexMap<String, String>, ordinal: usize, sheet_id: &str) -> String {
    let human_key = ROW_KEY_COLUMNS
        .iter()
        .filter_map(|col| cells.get(*col))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("row-{}", ordinal));
    format!("sheet:{}:{}:{}", sheet_id, ordinal, human_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_short_row_padded_with_empty_strings() {
        let headers = strings(&["S no.", "Name", "Owner"]);
        let record = materialize_row(&strings(&["7"]), &headers, 1, "0");
        assert_eq!(record.value("S no."), "7");
        assert_eq!(record.get("Name"), Some(""));
        assert_eq!(record.get("Owner"), Some(""));
    }

    #[test]
    fn test_extra_fields_ignored_and_empty_headers_skipped() {
        let headers = strings(&["A", "", "C"]);
        let record = materialize_row(&strings(&["1", "hidden", "3", "extra"]), &headers, 2, "g");
        assert_eq!(record.cells.len(), 2);
        assert_eq!(record.value("C"), "3");
    }

    #[test]
    fn test_id_prefers_ticket_then_serial_then_subject() {
        let headers = strings(&["Subject", "S no.", "Ticket ID"]);
        let r = materialize_row(&strings(&["Notice", "4", "T-9"]), &headers, 3, "856039892");
        assert_eq!(r.id, "sheet:856039892:3:T-9");

        let r = materialize_row(&strings(&["Notice", "4", ""]), &headers, 3, "856039892");
        assert_eq!(r.id, "sheet:856039892:3:4");

        let r = materialize_row(&strings(&["Notice"]), &headers, 3, "856039892");
        assert_eq!(r.id, "sheet:856039892:3:Notice");
    }

    #[test]
    fn test_id_falls_back_to_ordinal() {
        let headers = strings(&["Owner"]);
        let r = materialize_row(&strings(&["Asha"]), &headers, 5, "0");
        assert_eq!(r.id, "sheet:0:5:row-5");
    }
}
