use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of place categories used by the map filters
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    Pizza,
    Cafe,
    Cocktails,
    Gelato,
    Bakery,
    LateNightEats,
    FreeBeaches,
    Lidi,
    RentARide,
    Culture,
    Attractions,
    LocalLife,
    Adventure,
    Nightlife,
    Shopping,
    Refuge,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 18] = [
        Category::Restaurant,
        Category::Pizza,
        Category::Cafe,
        Category::Cocktails,
        Category::Gelato,
        Category::Bakery,
        Category::LateNightEats,
        Category::FreeBeaches,
        Category::Lidi,
        Category::RentARide,
        Category::Culture,
        Category::Attractions,
        Category::LocalLife,
        Category::Adventure,
        Category::Nightlife,
        Category::Shopping,
        Category::Refuge,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Pizza => "pizza",
            Category::Cafe => "cafe",
            Category::Cocktails => "cocktails",
            Category::Gelato => "gelato",
            Category::Bakery => "bakery",
            Category::LateNightEats => "late_night_eats",
            Category::FreeBeaches => "free_beaches",
            Category::Lidi => "lidi",
            Category::RentARide => "rent_a_ride",
            Category::Culture => "culture",
            Category::Attractions => "attractions",
            Category::LocalLife => "local_life",
            Category::Adventure => "adventure",
            Category::Nightlife => "nightlife",
            Category::Shopping => "shopping",
            Category::Refuge => "refuge",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// Exact canonical key only; free text goes through the category normalizer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| AppError::config(format!("unknown category key: {s}")))
    }
}

/// Canonical column keys understood by the place builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceField {
    Id,
    Name,
    City,
    Country,
    Description,
    Image,
    Status,
    Category,
    Address,
    Lat,
    Lng,
    TpCodes,
}

impl PlaceField {
    pub const ALL: [PlaceField; 12] = [
        PlaceField::Id,
        PlaceField::Name,
        PlaceField::City,
        PlaceField::Country,
        PlaceField::Description,
        PlaceField::Image,
        PlaceField::Status,
        PlaceField::Category,
        PlaceField::Address,
        PlaceField::Lat,
        PlaceField::Lng,
        PlaceField::TpCodes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceField::Id => "id",
            PlaceField::Name => "name",
            PlaceField::City => "city",
            PlaceField::Country => "country",
            PlaceField::Description => "description",
            PlaceField::Image => "image",
            PlaceField::Status => "status",
            PlaceField::Category => "category",
            PlaceField::Address => "address",
            PlaceField::Lat => "lat",
            PlaceField::Lng => "lng",
            PlaceField::TpCodes => "tp_codes",
        }
    }
}

/// One point of interest built from a spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub address: String,
    pub image: Option<String>,
    pub status: String,
    pub category: Category,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Codes outside the `i32` range are dropped while parsing
    pub tp_codes: Option<Vec<i32>>,
}

impl Place {
    pub fn is_published(&self) -> bool {
        self.status == "published"
    }

    /// Coordinates usable for a map marker: both present and inside WGS84 bounds.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng))
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) =>
            {
                Some((lat, lng))
            }
            _ => None,
        }
    }

    /// Text value of a filterable field, `None` for unknown field names.
    pub fn field_value(&self, field: &str) -> Option<String> {
        let normalized = field.trim().to_lowercase();
        let value = match normalized.as_str() {
            "id" => self.id.clone(),
            "slug" => self.slug.clone(),
            "name" => self.name.clone(),
            "city" => self.city.clone(),
            "country" => self.country.clone(),
            "description" => self.description.clone(),
            "address" => self.address.clone(),
            "status" => self.status.clone(),
            "category" => self.category.as_str().to_string(),
            "image" => self.image.clone().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCondition {
    pub field: String,
    pub match_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(AppError::unsupported(format!(
                "unsupported export format: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure before an HTTP status was received
    Network,
    /// Non-success HTTP status from the sheet endpoint
    Sheet,
    Parse,
    Io,
    Config,
    Unsupported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn sheet(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Sheet, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn place_at(lat: Option<f64>, lng: Option<f64>) -> Place {
        Place {
            id: "x".to_string(),
            slug: "x".to_string(),
            name: String::new(),
            city: String::new(),
            country: String::new(),
            description: String::new(),
            address: String::new(),
            image: None,
            status: String::new(),
            category: Category::Other,
            lat,
            lng,
            tp_codes: None,
        }
    }

    #[test]
    fn test_category_keys_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("ristorante".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_key() {
        let json = serde_json::to_string(&Category::LateNightEats).unwrap();
        assert_eq!(json, "\"late_night_eats\"");
    }

    #[test]
    fn test_coordinates_require_both_values_in_range() {
        assert_eq!(place_at(Some(45.0), Some(9.0)).coordinates(), Some((45.0, 9.0)));
        assert_eq!(place_at(Some(45.0), None).coordinates(), None);
        assert_eq!(place_at(Some(450.0), Some(9.0)).coordinates(), None);
        assert_eq!(place_at(Some(45.0), Some(-181.0)).coordinates(), None);
    }

    #[test]
    fn test_field_value() {
        let mut place = place_at(None, None);
        place.city = "Como".to_string();
        assert_eq!(place.field_value("City"), Some("Como".to_string()));
        assert_eq!(place.field_value("category"), Some("other".to_string()));
        assert_eq!(place.field_value("unknown"), None);
    }
}
