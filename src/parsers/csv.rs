use std::path::Path;

use csv::ReaderBuilder;

use crate::models::AppError;

/// Split CSV text into rows of cells.
///
/// Quoted fields may hold commas, newlines and doubled quotes. `\n`, `\r\n` and a
/// bare `\r` all end a row, and rows may have any number of cells.
pub fn tokenize_csv(text: &str) -> Result<Vec<Vec<String>>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader
        .records()
        .map(|result| result.map(|rec| rec.iter().map(|cell| cell.to_string()).collect()))
    {
        let row: Vec<String> =
            record.map_err(|err| AppError::parse(format!("failed to parse CSV: {err}")))?;
        rows.push(row);
    }

    Ok(rows)
}

pub fn read_csv_file(path: &Path) -> Result<Vec<Vec<String>>, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("failed to read {}: {err}", path.display())))?;
    tokenize_csv(&text)
}
