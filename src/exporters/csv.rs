use csv::WriterBuilder;

use crate::models::{AppError, Place};

pub const CSV_HEADERS: [&str; 13] = [
    "id",
    "slug",
    "name",
    "city",
    "country",
    "category",
    "status",
    "address",
    "description",
    "image",
    "lat",
    "lng",
    "tp_codes",
];

/// CSV export with a UTF-8 BOM so spreadsheet apps pick the right encoding
pub fn export_csv(places: &[Place]) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| AppError::io(format!("CSV write error: {}", e)))?;

    for place in places {
        let tp_codes = place
            .tp_codes
            .as_ref()
            .map(|codes| {
                codes
                    .iter()
                    .map(|code| code.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default();

        let record = [
            place.id.clone(),
            place.slug.clone(),
            place.name.clone(),
            place.city.clone(),
            place.country.clone(),
            place.category.as_str().to_string(),
            place.status.clone(),
            place.address.clone(),
            place.description.clone(),
            place.image.clone().unwrap_or_default(),
            place.lat.map(|v| v.to_string()).unwrap_or_default(),
            place.lng.map(|v| v.to_string()).unwrap_or_default(),
            tp_codes,
        ];

        writer
            .write_record(&record)
            .map_err(|e| AppError::io(format!("CSV write error: {}", e)))?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| AppError::io(format!("CSV buffer error: {}", e)))?;

    let csv_string =
        String::from_utf8(data).map_err(|e| AppError::parse(format!("UTF-8 conversion error: {}", e)))?;

    Ok(format!("\u{FEFF}{}", csv_string))
}
