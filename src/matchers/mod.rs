mod helpers;
mod traveller_path;

use crate::models::{Category, Place, PlaceCondition};

pub use helpers::{condition_matches, value_matches, wildcard_match};
pub use traveller_path::{rank_by_traveller_path, traveller_path_score};

/// Places satisfying every condition; an empty condition list keeps all
pub fn filter_places(places: &[Place], conditions: &[PlaceCondition]) -> Vec<Place> {
    places
        .iter()
        .filter(|place| {
            conditions
                .iter()
                .all(|condition| condition_matches(place, condition))
        })
        .cloned()
        .collect()
}

pub fn published(places: &[Place]) -> Vec<Place> {
    places.iter().filter(|p| p.is_published()).cloned().collect()
}

pub fn in_category(places: &[Place], category: Category) -> Vec<Place> {
    places
        .iter()
        .filter(|p| p.category == category)
        .cloned()
        .collect()
}

/// Parse `field:match_type:value`; the value may itself contain `:`
pub fn parse_condition(raw: &str) -> Option<PlaceCondition> {
    let mut parts = raw.splitn(3, ':');
    let field = parts.next()?.trim();
    let match_type = parts.next()?.trim();
    let value = parts.next()?;
    if field.is_empty() {
        return None;
    }

    Some(PlaceCondition {
        field: field.to_string(),
        match_type: match_type.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, city: &str, status: &str, category: Category) -> Place {
        Place {
            id: id.to_string(),
            slug: id.to_string(),
            name: id.to_string(),
            city: city.to_string(),
            country: "Italia".to_string(),
            description: String::new(),
            address: String::new(),
            image: None,
            status: status.to_string(),
            category,
            lat: None,
            lng: None,
            tp_codes: None,
        }
    }

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_filter_places() {
        let places = vec![
            place("a", "Como", "published", Category::Restaurant),
            place("b", "Como", "draft", Category::Cafe),
            place("c", "Bari", "published", Category::Restaurant),
        ];

        let conditions = vec![
            parse_condition("city:equals:como").unwrap(),
            parse_condition("category:equals:restaurant").unwrap(),
        ];
        assert_eq!(ids(&filter_places(&places, &conditions)), vec!["a"]);
        assert_eq!(ids(&filter_places(&places, &[])), vec!["a", "b", "c"]);

        let unknown_field = vec![parse_condition("rating:equals:5").unwrap()];
        assert!(filter_places(&places, &unknown_field).is_empty());

        assert_eq!(ids(&published(&places)), vec!["a", "c"]);
        assert_eq!(ids(&in_category(&places, Category::Cafe)), vec!["b"]);
    }

    #[test]
    fn test_parse_condition() {
        let condition = parse_condition("image:starts_with:https://cdn").unwrap();
        assert_eq!(condition.field, "image");
        assert_eq!(condition.match_type, "starts_with");
        assert_eq!(condition.value, "https://cdn");

        assert!(parse_condition("city:equals").is_none());
        assert!(parse_condition(":equals:x").is_none());
    }
}
