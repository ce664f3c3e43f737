use std::collections::HashMap;

use crate::models::PlaceField;
use crate::utils::text::normalize_label;

/// Built-in Italian/English header variants per canonical field
const DEFAULT_HEADER_ALIASES: &[(PlaceField, &[&str])] = &[
    (
        PlaceField::Id,
        &["id", "codice", "code", "identificativo", "place id", "place_id", "uid"],
    ),
    (
        PlaceField::Name,
        &[
            "name",
            "nome",
            "nome del luogo",
            "nome luogo",
            "luogo",
            "place",
            "place name",
            "titolo",
            "title",
        ],
    ),
    (
        PlaceField::City,
        &["city", "città", "comune", "località", "town"],
    ),
    (PlaceField::Country, &["country", "paese", "nazione", "nation"]),
    (
        PlaceField::Description,
        &["description", "descrizione", "desc", "descrizione breve", "about"],
    ),
    (
        PlaceField::Image,
        &[
            "image",
            "immagine",
            "foto",
            "photo",
            "img",
            "picture",
            "image url",
            "image_url",
            "url immagine",
        ],
    ),
    (
        PlaceField::Status,
        &["status", "stato", "stato pubblicazione", "pubblicazione", "publish status"],
    ),
    (
        PlaceField::Category,
        &["category", "categoria", "tipo", "tipologia", "type"],
    ),
    (PlaceField::Address, &["address", "indirizzo", "via"]),
    (PlaceField::Lat, &["lat", "latitude", "latitudine"]),
    (
        PlaceField::Lng,
        &["lng", "lon", "long", "longitude", "longitudine"],
    ),
    (
        PlaceField::TpCodes,
        &[
            "tp_codes",
            "tp codes",
            "tp",
            "traveller path",
            "traveler path",
            "traveller path codes",
            "codici tp",
            "percorso viaggiatore",
        ],
    ),
];

/// Normalize a header cell for lookup (BOM removed, folded, lowercased, whitespace collapsed)
pub fn normalize_header(raw: &str) -> String {
    let without_bom = raw.trim_start_matches('\u{FEFF}');
    normalize_label(without_bom)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Header synonym table mapping normalized header text to a canonical field
#[derive(Clone, Debug)]
pub struct HeaderAliases {
    lookup: HashMap<String, PlaceField>,
}

impl Default for HeaderAliases {
    fn default() -> Self {
        let table = DEFAULT_HEADER_ALIASES
            .iter()
            .map(|(field, aliases)| (*field, aliases.iter().map(|a| a.to_string()).collect()))
            .collect();
        Self::from_table(table)
    }
}

impl HeaderAliases {
    /// Build from a field -> aliases table; each canonical key always maps to itself.
    pub fn from_table(table: HashMap<PlaceField, Vec<String>>) -> Self {
        let mut lookup = HashMap::new();
        for field in PlaceField::ALL {
            lookup.insert(field.as_str().to_string(), field);
        }

        // sorted so the first writer on a shared alias is stable
        let mut entries: Vec<_> = table.into_iter().collect();
        entries.sort_by_key(|(field, _)| field.as_str());
        for (field, aliases) in entries {
            for alias in aliases {
                let key = normalize_header(&alias);
                if key.is_empty() {
                    continue;
                }
                lookup.entry(key).or_insert(field);
            }
        }

        Self { lookup }
    }

    pub fn resolve(&self, raw: &str) -> Option<PlaceField> {
        self.lookup.get(&normalize_header(raw)).copied()
    }

    /// Map a raw header row to canonical keys; unknown headers pass through unchanged.
    pub fn normalize_headers(&self, headers: &[String]) -> Vec<String> {
        headers
            .iter()
            .map(|header| match self.resolve(header) {
                Some(field) => field.as_str().to_string(),
                None => header.clone(),
            })
            .collect()
    }
}
