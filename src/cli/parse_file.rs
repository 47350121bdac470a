// src/cli/parse_file.rs
use std::path::Path;

use super::CliError;
use crate::sheets::csv::parse_csv;

pub fn run(file: &Path, sheet_id: &str, json: bool) -> Result<(), CliError> {
    let text = std::fs::read_to_string(file)?;
    let sheet = parse_csv(&text, sheet_id);

    if json {
        println!("{}", serde_json::to_string_pretty(&sheet)?);
        return Ok(());
    }

    println!("Parsed: {}\n", file.display());
    println!("=== Headers ({}) ===\n", sheet.headers.len());
    for (idx, header) in sheet.headers.iter().enumerate() {
        let shown = if header.is_empty() { "(unnamed)" } else { header.as_str() };
        println!("  {:<4} {}", idx, shown);
    }

    println!("\n=== Records ({}) ===\n", sheet.records.len());
    for record in &sheet.records {
        let filled = record.values().filter(|v| !v.trim().is_empty()).count();
        println!("  {:<48} {} cells", record.id, filled);
    }
    Ok(())
}
