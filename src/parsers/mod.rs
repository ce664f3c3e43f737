mod builder;
mod csv;
mod excel;

use std::path::Path;

use crate::models::{AppError, Place};
use crate::utils::category::CategoryTable;
use crate::utils::header::HeaderAliases;

pub use builder::{build_place, build_places, row_to_map, PlaceRow};
pub use self::csv::tokenize_csv;

/// Header and category tables shared by every parse pass
#[derive(Clone, Debug, Default)]
pub struct PlaceParser {
    pub aliases: HeaderAliases,
    pub categories: CategoryTable,
}

impl PlaceParser {
    pub fn new(aliases: HeaderAliases, categories: CategoryTable) -> Self {
        Self {
            aliases,
            categories,
        }
    }

    pub fn parse_csv(&self, text: &str) -> Result<Vec<Place>, AppError> {
        let rows = tokenize_csv(text)?;
        Ok(self.parse_rows(rows))
    }

    pub fn parse_rows(&self, rows: Vec<Vec<String>>) -> Vec<Place> {
        build_places(rows, &self.aliases, &self.categories)
    }

    /// Parse a local sheet export, picking the reader from the file extension
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Place>, AppError> {
        if !path.exists() {
            return Err(AppError::io(format!("file not found: {}", path.display())));
        }

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .ok_or_else(|| AppError::unsupported("could not determine the file extension"))?;

        let rows = match ext.as_str() {
            "csv" => self::csv::read_csv_file(path)?,
            "xlsx" | "xlsm" | "xls" | "ods" => excel::read_workbook_file(path)?,
            other => {
                return Err(AppError::unsupported(format!(
                    "unsupported file type: {other}"
                )))
            }
        };

        Ok(self.parse_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorKind;

    #[test]
    fn test_parse_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.CSV");
        std::fs::write(&path, "Nome,Città,Categoria\nGelateria Lucia,Bari,gelateria\n").unwrap();

        let places = PlaceParser::default().parse_file(&path).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].slug, "gelateria-lucia-bari");
    }

    #[test]
    fn test_parse_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let parser = PlaceParser::default();

        let missing = parser.parse_file(&dir.path().join("missing.csv")).unwrap_err();
        assert_eq!(missing.kind, ErrorKind::Io);

        let path = dir.path().join("places.txt");
        std::fs::write(&path, "name\nx\n").unwrap();
        let unsupported = parser.parse_file(&path).unwrap_err();
        assert_eq!(unsupported.kind, ErrorKind::Unsupported);

        let path = dir.path().join("places");
        std::fs::write(&path, "name\nx\n").unwrap();
        assert_eq!(parser.parse_file(&path).unwrap_err().kind, ErrorKind::Unsupported);
    }
}
