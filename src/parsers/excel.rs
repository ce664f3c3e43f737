use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};

use crate::models::AppError;

/// Rows of the first worksheet of an exported workbook, cells stringified
pub fn read_workbook_file(path: &Path) -> Result<Vec<Vec<String>>, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| AppError::parse(format!("failed to open workbook: {err}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::parse("workbook has no worksheet"))?
        .map_err(|err| AppError::parse(format!("failed to read worksheet: {err}")))?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(data_type_to_string).collect())
        .collect();

    Ok(rows)
}

fn data_type_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => {
            if f.fract().abs() < f64::EPSILON {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        DataType::Int(v) => v.to_string(),
        DataType::Bool(v) => v.to_string(),
        DataType::Error(_) => String::new(),
        _ => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cells_keep_coordinates_precise() {
        assert_eq!(data_type_to_string(&DataType::Float(45.81)), "45.81");
        assert_eq!(data_type_to_string(&DataType::Float(3.0)), "3");
        assert_eq!(data_type_to_string(&DataType::Int(12)), "12");
        assert_eq!(data_type_to_string(&DataType::String("  Como ".to_string())), "Como");
        assert_eq!(data_type_to_string(&DataType::Empty), "");
    }

    #[test]
    fn test_unreadable_workbook_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let err = read_workbook_file(&path).unwrap_err();
        assert_eq!(err.kind, crate::models::ErrorKind::Parse);
    }
}
