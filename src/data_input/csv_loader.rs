// src/data_input/csv_loader.rs

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data_input::observations::ObservationTable;

/// Parses a benchmark CSV file into an observation table.
///
/// The file must carry a header row containing `value_column` (numeric
/// measurement) and `group_column` (category label). Column positions are
/// resolved by name so the file may carry any number of extra columns.
/// Rows whose measurement cell does not parse as a finite number are skipped
/// with a warning.
pub fn parse_observation_file(
    input_file_path: &Path,
    value_column: &str,
    group_column: &str,
) -> Result<ObservationTable, Box<dyn Error>> {
    let file = File::open(input_file_path).map_err(|e| {
        format!(
            "could not open '{}': {e}. Run with --generate to create a benchmark file first.",
            input_file_path.display()
        )
    })?;
    parse_observation_records(BufReader::new(file), value_column, group_column)
}

/// Reader-based variant of [`parse_observation_file`], used directly by tests.
pub fn parse_observation_records(
    reader: impl Read,
    value_column: &str,
    group_column: &str,
) -> Result<ObservationTable, Box<dyn Error>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header_record = csv_reader.headers()?.clone();
    println!("Headers found in CSV: {:?}", header_record);

    let value_idx = header_record
        .iter()
        .position(|h| h == value_column)
        .ok_or_else(|| format!("measurement column '{value_column}' not found in CSV header"))?;
    let group_idx = header_record
        .iter()
        .position(|h| h == group_column)
        .ok_or_else(|| format!("group column '{group_column}' not found in CSV header"))?;

    let mut table = ObservationTable::new();
    let mut skipped_rows = 0usize;

    for (row_index, record_result) in csv_reader.records().enumerate() {
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                eprintln!("Warning: Skipping row {} due to CSV read error: {}", row_index + 1, e);
                skipped_rows += 1;
                continue;
            }
        };

        let value = record
            .get(value_idx)
            .and_then(|cell| cell.parse::<f64>().ok())
            .filter(|v| v.is_finite());
        let label = record.get(group_idx).filter(|cell| !cell.is_empty());

        match (value, label) {
            (Some(value), Some(label)) => table.push(value, label),
            _ => {
                eprintln!(
                    "Warning: Skipping row {} due to missing or invalid '{}'/'{}' cell",
                    row_index + 1,
                    value_column,
                    group_column
                );
                skipped_rows += 1;
            }
        }
    }

    println!(
        "Finished reading {} observation rows ({} skipped).",
        table.len(),
        skipped_rows
    );
    Ok(table)
}
