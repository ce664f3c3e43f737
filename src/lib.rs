pub mod config;
pub mod exporters;
pub mod fetch;
pub mod matchers;
pub mod models;
pub mod parsers;
pub mod storage;
pub mod utils;

use std::path::Path;

use models::{AppError, Place};
use parsers::PlaceParser;

pub use config::AppConfig;
pub use fetch::PlaceFetcher;

/// Fetch a published sheet and build its places with the built-in tables
///
/// # Arguments
/// * `url` - CSV export URL of the sheet
///
/// # Returns
/// Places in sheet order, or an error when the sheet could not be downloaded
pub async fn fetch_places(url: &str) -> Result<Vec<Place>, AppError> {
    let client = reqwest::Client::builder()
        .build()
        .map_err(|err| AppError::network(format!("failed to build HTTP client: {err}")))?;
    PlaceFetcher::new(client, PlaceParser::default())
        .fetch_places(url)
        .await
}

/// Build places from CSV text with the built-in tables
pub fn parse_places_csv(text: &str) -> Result<Vec<Place>, AppError> {
    PlaceParser::default().parse_csv(text)
}

/// Build places from a local `.csv` or workbook export
///
/// # Arguments
/// * `path` - file to read; the extension selects the reader
pub fn parse_place_file(path: &Path) -> Result<Vec<Place>, AppError> {
    PlaceParser::default().parse_file(path)
}
