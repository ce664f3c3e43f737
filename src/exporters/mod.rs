pub mod csv;

use crate::models::{AppError, ExportFormat, Place};

/// Render places in the requested output format
pub fn export_places(places: &[Place], format: ExportFormat) -> Result<String, AppError> {
    match format {
        ExportFormat::Csv => csv::export_csv(places),
        ExportFormat::Json => export_json(places),
    }
}

pub fn export_json(places: &[Place]) -> Result<String, AppError> {
    serde_json::to_string_pretty(places)
        .map_err(|e| AppError::parse(format!("JSON encode error: {}", e)))
}
