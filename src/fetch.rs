use reqwest::Client;

use crate::models::{AppError, Place};
use crate::parsers::PlaceParser;

/// Downloads a published sheet and runs it through the place parser
#[derive(Clone, Debug)]
pub struct PlaceFetcher {
    client: Client,
    parser: PlaceParser,
}

impl PlaceFetcher {
    pub fn new(client: Client, parser: PlaceParser) -> Self {
        Self { client, parser }
    }

    /// Fetch the CSV at `url` and build its places.
    ///
    /// Only transport and HTTP failures are errors; they are logged before being
    /// returned so callers can offer a retry.
    pub async fn fetch_places(&self, url: &str) -> Result<Vec<Place>, AppError> {
        let result = async {
            let text = fetch_sheet_text(&self.client, url).await?;
            self.parser.parse_csv(&text)
        }
        .await;

        match result {
            Ok(places) => {
                tracing::info!(url, places = places.len(), "loaded places from sheet");
                Ok(places)
            }
            Err(err) => {
                tracing::error!(url, kind = ?err.kind, "failed to load places: {err}");
                Err(err)
            }
        }
    }
}

/// GET the sheet body as text; a non-success status is a `Sheet` error
pub async fn fetch_sheet_text(client: &Client, url: &str) -> Result<String, AppError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|err| AppError::network(format!("could not reach sheet at {url}: {err}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(AppError::sheet(format!(
            "could not read sheet (HTTP {status}) at {url}"
        )));
    }

    resp.text()
        .await
        .map_err(|err| AppError::network(format!("could not read sheet body from {url}: {err}")))
}
