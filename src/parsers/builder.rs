use std::collections::{HashMap, HashSet};

use crate::models::{Category, Place, PlaceField};
use crate::utils::category::CategoryTable;
use crate::utils::header::HeaderAliases;
use crate::utils::text::{clean_coordinate, normalize_image_path, parse_tp_codes, slugify};

/// One data row keyed by normalized header
pub type PlaceRow = HashMap<String, String>;

/// Build places from a tokenized table whose first row is the header.
///
/// Tables without at least one data row give an empty list. Blank rows are skipped,
/// and data problems degrade single fields instead of failing the pass.
pub fn build_places(
    rows: Vec<Vec<String>>,
    aliases: &HeaderAliases,
    categories: &CategoryTable,
) -> Vec<Place> {
    if rows.len() < 2 {
        return Vec::new();
    }

    let mut rows = rows.into_iter();
    let header = match rows.next() {
        Some(header) => aliases.normalize_headers(&header),
        None => return Vec::new(),
    };

    let mut places = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut skipped = 0usize;

    for (index, row) in rows.enumerate() {
        if is_blank_row(&row) {
            skipped += 1;
            continue;
        }

        let place = build_place(&row_to_map(&header, &row), index, categories);

        // duplicates are reported, never altered
        if !seen_ids.insert(place.id.clone()) {
            tracing::warn!(id = %place.id, row = index, "duplicate place id");
        }

        places.push(place);
    }

    tracing::debug!(places = places.len(), skipped, "built places from sheet");
    places
}

/// Pair header keys with trimmed cells; missing cells read as empty.
///
/// When two columns normalize to the same key, the first non-empty value wins.
pub fn row_to_map(header: &[String], row: &[String]) -> PlaceRow {
    let mut map = PlaceRow::with_capacity(header.len());
    for (idx, key) in header.iter().enumerate() {
        let value = row.get(idx).map(|cell| cell.trim()).unwrap_or_default();
        match map.get(key) {
            Some(existing) if !existing.is_empty() => {}
            _ => {
                map.insert(key.clone(), value.to_string());
            }
        }
    }
    map
}

/// Build one place; never fails, malformed fields become empty or `None`.
pub fn build_place(row: &PlaceRow, index: usize, categories: &CategoryTable) -> Place {
    let field = |key: PlaceField| -> String {
        row.get(key.as_str()).cloned().unwrap_or_default()
    };

    let name = field(PlaceField::Name);
    let city = field(PlaceField::City);
    let derived_slug = slugify(&format!("{name} {city}"));

    let explicit_id = field(PlaceField::Id);
    let id = if !explicit_id.is_empty() {
        explicit_id
    } else if !derived_slug.is_empty() {
        derived_slug.clone()
    } else {
        format!("row-{index}")
    };

    let slug = if derived_slug.is_empty() {
        id.clone()
    } else {
        derived_slug
    };

    let raw_category = field(PlaceField::Category);
    let category = categories.normalize(&raw_category);
    if category == Category::Other
        && !raw_category.is_empty()
        && raw_category.to_lowercase() != "other"
    {
        tracing::warn!(id = %id, category = %raw_category, "unrecognized category, using other");
    }

    let (lat, lng) = match (
        clean_coordinate(&field(PlaceField::Lat)),
        clean_coordinate(&field(PlaceField::Lng)),
    ) {
        (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
        (None, None) => (None, None),
        _ => {
            tracing::debug!(id = %id, "dropping coordinate without its pair");
            (None, None)
        }
    };

    Place {
        id,
        slug,
        name,
        city,
        country: field(PlaceField::Country),
        description: field(PlaceField::Description),
        address: field(PlaceField::Address),
        image: normalize_image_path(&field(PlaceField::Image)),
        status: field(PlaceField::Status).to_lowercase(),
        category,
        lat,
        lng,
        tp_codes: parse_tp_codes(&field(PlaceField::TpCodes)),
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
