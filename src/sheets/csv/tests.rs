// src/sheets/csv/tests.rs
//! End-to-end tests for the ingestion pipeline

use std::collections::HashSet;

use super::*;

#[test]
fn test_scenario_quoted_name() {
    let sheet = parse_csv("S no.,Name\n1,\"Doe, John\"\n2,Lee", "0");
    assert_eq!(sheet.headers, vec!["S no.", "Name"]);
    assert_eq!(sheet.records.len(), 2);
    assert_eq!(sheet.records[0].value("S no."), "1");
    assert_eq!(sheet.records[0].value("Name"), "Doe, John");
    assert_eq!(sheet.records[1].value("S no."), "2");
    assert_eq!(sheet.records[1].value("Name"), "Lee");
    assert_eq!(sheet.records[0].cells.len(), 2);
}

#[test]
fn test_empty_text_yields_empty_sheet() {
    let sheet = parse_csv("", "0");
    assert!(sheet.headers.is_empty());
    assert!(sheet.records.is_empty());
}

#[test]
fn test_record_count_and_key_set() {
    let csv = "A,B,C\n1,2,3\n4,5\n\n6,7,8,9\n";
    let sheet = parse_csv(csv, "g");
    assert_eq!(sheet.records.len(), 3);
    for record in &sheet.records {
        let keys: Vec<&str> = record.cells.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }
    assert_eq!(sheet.records[1].value("C"), "");
    assert_eq!(sheet.records[2].value("C"), "8");
}

#[test]
fn test_round_trip_through_csv_writer() {
    let original = "Note: a, \"b\"\nsecond line";
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(["Ticket ID", "Remarks"]).expect("header");
    writer.write_record(["T-1", original]).expect("row");
    let encoded = String::from_utf8(writer.into_inner().expect("flush")).expect("utf8");

    let sheet = parse_csv(&encoded, "0");
    assert_eq!(sheet.records.len(), 1);
    assert_eq!(sheet.records[0].value("Remarks"), original);
}

#[test]
fn test_parse_is_idempotent() {
    let csv = "Ticket ID,Owner\nT-1,Asha\nT-2,\"Ravi \"\"R\"\"\"\n";
    let first = parse_csv(csv, "856039892");
    let second = parse_csv(csv, "856039892");
    assert_eq!(first, second);
}

#[test]
fn test_ids_unique_when_human_keys_collide() {
    let csv = "Ticket ID,Owner\nT-1,a\nT-1,b\n,c\n,d\n";
    let sheet = parse_csv(csv, "0");
    let ids: HashSet<&str> = sheet.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), sheet.records.len());
    assert_eq!(sheet.records[0].id, "sheet:0:1:T-1");
    assert_eq!(sheet.records[1].id, "sheet:0:2:T-1");
    assert_eq!(sheet.records[2].id, "sheet:0:3:row-3");
}

#[test]
fn test_header_normalization_with_bom() {
    let sheet = parse_csv("\u{FEFF}\" Mail Thread \n \",Status\nx,Open\n", "0");
    assert_eq!(sheet.headers, vec!["Mail Thread", "Status"]);
    assert_eq!(sheet.records[0].value("Mail Thread"), "x");
}

#[test]
fn test_short_row_does_not_misalign_columns() {
    let sheet = parse_csv("A,B,C\n1,2\n3,4,5\n", "0");
    assert_eq!(sheet.records[0].value("A"), "1");
    assert_eq!(sheet.records[0].value("B"), "2");
    assert_eq!(sheet.records[0].value("C"), "");
    assert_eq!(sheet.records[1].value("C"), "5");
}

#[test]
fn test_embedded_newline_field_kept_in_one_record() {
    let sheet = parse_csv("S no.,Remarks\r\n1,\"line one\r\nline two\"\r\n2,ok\r\n", "0");
    assert_eq!(sheet.records.len(), 2);
    assert_eq!(sheet.records[0].value("Remarks"), "line one\r\nline two");
}
