use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Category;
use crate::utils::text::{fold_diacritics, normalize_label};

/// Known aliases matched as whole labels
const DEFAULT_SYNONYMS: &[(Category, &[&str])] = &[
    (
        Category::Restaurant,
        &[
            "ristorante",
            "ristoranti",
            "ristorazione",
            "trattoria",
            "osteria",
            "taverna",
            "restaurants",
            "dining",
            "food",
            "cucina",
            "dove mangiare",
        ],
    ),
    (
        Category::Pizza,
        &["pizzeria", "pizzerie", "pizze", "pizza al taglio", "pizzas"],
    ),
    (
        Category::Cafe,
        &[
            "caffe",
            "caffetteria",
            "bar",
            "coffee",
            "coffee shop",
            "colazione",
            "breakfast",
            "cafes",
        ],
    ),
    (
        Category::Cocktails,
        &[
            "cocktail",
            "cocktail bar",
            "aperitivo",
            "aperitivi",
            "wine bar",
            "enoteca",
            "pub",
            "drinks",
        ],
    ),
    (
        Category::Gelato,
        &["gelateria", "gelaterie", "gelati", "ice cream", "granita"],
    ),
    (
        Category::Bakery,
        &["panificio", "panetteria", "forno", "pasticceria", "pastry", "bakeries"],
    ),
    (
        Category::LateNightEats,
        &[
            "late night eats",
            "late night",
            "late-night eats",
            "cibo notturno",
            "night food",
            "after hours",
        ],
    ),
    (
        Category::FreeBeaches,
        &[
            "free beaches",
            "free beach",
            "spiaggia libera",
            "spiagge libere",
            "spiaggia",
            "spiagge",
            "beach",
            "beaches",
        ],
    ),
    (
        Category::Lidi,
        &[
            "lido",
            "stabilimento balneare",
            "stabilimenti balneari",
            "beach club",
            "bagni",
            "spiaggia attrezzata",
        ],
    ),
    (
        Category::RentARide,
        &[
            "rent a ride",
            "rent-a-ride",
            "noleggio",
            "noleggi",
            "rental",
            "rentals",
            "bike rental",
            "noleggio bici",
            "noleggio scooter",
            "noleggio barche",
        ],
    ),
    (
        Category::Culture,
        &[
            "cultura",
            "museo",
            "musei",
            "museum",
            "teatro",
            "theatre",
            "arte",
            "art",
            "galleria",
            "gallery",
            "storia",
            "history",
            "chiesa",
            "church",
        ],
    ),
    (
        Category::Attractions,
        &[
            "attrazioni",
            "attrazione",
            "attraction",
            "monumento",
            "monumenti",
            "sightseeing",
            "da vedere",
            "belvedere",
            "viewpoint",
            "landmark",
        ],
    ),
    (
        Category::LocalLife,
        &[
            "local life",
            "vita locale",
            "mercato",
            "mercati",
            "market",
            "piazza",
            "quartiere",
            "esperienze locali",
        ],
    ),
    (
        Category::Adventure,
        &[
            "avventura",
            "avventure",
            "trekking",
            "hiking",
            "escursione",
            "escursioni",
            "sport",
            "diving",
            "immersioni",
            "kayak",
            "arrampicata",
            "climbing",
        ],
    ),
    (
        Category::Nightlife,
        &[
            "vita notturna",
            "night life",
            "discoteca",
            "disco",
            "club",
            "nightclub",
            "locale notturno",
            "party",
        ],
    ),
    (
        Category::Shopping,
        &[
            "negozi",
            "negozio",
            "shop",
            "shops",
            "boutique",
            "mercatino",
            "souvenir",
            "artigianato",
        ],
    ),
    (
        Category::Refuge,
        &["rifugio", "rifugi", "mountain hut", "baita", "bivacco"],
    ),
];

/// Substring rules, checked in order; specific labels come before generic ones
const DEFAULT_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::LateNightEats, &["late night", "notturn", "24h", "h24"]),
    (Category::Pizza, &["pizz"]),
    (Category::Gelato, &["gelat", "ice cream", "granit"]),
    (
        Category::Bakery,
        &["panific", "panett", "forno", "pasticc", "bakery", "pastry", "cornett"],
    ),
    (
        Category::Cocktails,
        &["cocktail", "aperitiv", "wine bar", "enotec", " pub ", "birrer", "brewery", "lounge"],
    ),
    (
        Category::Lidi,
        &["lido", "lidi", "stabiliment", "beach club", "bagni", "attrezzat"],
    ),
    (Category::FreeBeaches, &["spiagg", "beach", "caletta", "scogli"]),
    (
        Category::RentARide,
        &["noleggi", "rent a", "rental", "bike", "scooter", "boat", "barca", "barche"],
    ),
    (
        Category::Refuge,
        &["rifugi", "baita", "bivacc", "mountain hut"],
    ),
    (
        Category::Nightlife,
        &["discotec", "disco ", "nightclub", "night club", "nightlife", "vita notturna", "locale notturno"],
    ),
    (
        Category::Restaurant,
        &[
            "ristor",
            "trattori",
            "osteri",
            "restaurant",
            "taverna",
            "bistro",
            "cucina",
            "sushi",
            "agriturismo",
            "braceria",
        ],
    ),
    (
        Category::Cafe,
        &["caff", "cafe", "coffee", " bar ", "colazion", "breakfast", "tea room"],
    ),
    (
        Category::Culture,
        &[
            "muse",
            "teatr",
            "theat",
            "galler",
            "cultur",
            "chies",
            "church",
            "basilic",
            "duomo",
            "cattedral",
            "archeolog",
        ],
    ),
    (
        Category::Attractions,
        &[
            "attrazion",
            "attraction",
            "monument",
            "panoram",
            "belvedere",
            "viewpoint",
            "castell",
            "castle",
            "giardin",
            "garden",
            "faro",
            "lighthouse",
        ],
    ),
    (
        Category::Adventure,
        &[
            "avventur",
            "adventure",
            "trekking",
            "hiking",
            "escursion",
            "sentier",
            "trail",
            "kayak",
            "diving",
            "immersion",
            "arrampicat",
            "climbing",
            "snorkel",
            "surf",
            "rafting",
            "golf",
        ],
    ),
    (
        Category::LocalLife,
        &["mercat", "market", "local", "piazz", "quartier", "sagra"],
    ),
    (
        Category::Shopping,
        &["shop", "negozi", "boutique", "souvenir", "artigian", "outlet", "fashion"],
    ),
];

/// Ordered substring rule as stored in `category_table.json`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// On-disk shape of the category dictionary
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CategoryTableFile {
    #[serde(default)]
    pub synonyms: HashMap<Category, Vec<String>>,
    #[serde(default)]
    pub keywords: Vec<KeywordRule>,
}

/// Free-text label -> category key resolution table
#[derive(Clone, Debug)]
pub struct CategoryTable {
    synonyms: HashMap<String, Category>,
    keywords: Vec<(Category, Vec<String>)>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        let synonyms = DEFAULT_SYNONYMS
            .iter()
            .map(|(category, labels)| (*category, labels.iter().map(|l| l.to_string()).collect()))
            .collect();
        let keywords = DEFAULT_KEYWORDS
            .iter()
            .map(|(category, words)| KeywordRule {
                category: *category,
                keywords: words.iter().map(|w| w.to_string()).collect(),
            })
            .collect();

        Self::from_file(CategoryTableFile { synonyms, keywords })
    }
}

impl CategoryTable {
    pub fn from_file(file: CategoryTableFile) -> Self {
        let mut entries: Vec<_> = file.synonyms.into_iter().collect();
        entries.sort_by_key(|(category, _)| *category);

        let mut synonyms = HashMap::new();
        for (category, labels) in entries {
            for label in labels {
                let key = normalize_label(&label);
                if key.is_empty() {
                    continue;
                }
                synonyms.entry(key).or_insert(category);
            }
        }

        // keywords keep their leading/trailing spaces (" bar "); punctuation folds like labels
        let keywords = file
            .keywords
            .into_iter()
            .map(|rule| {
                let words = rule
                    .keywords
                    .iter()
                    .map(|word| {
                        fold_diacritics(word)
                            .to_lowercase()
                            .chars()
                            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
                            .collect::<String>()
                    })
                    .filter(|word| !word.trim().is_empty())
                    .collect();
                (rule.category, words)
            })
            .collect();

        Self { synonyms, keywords }
    }

    /// Resolve a label: canonical key, then synonym, then keyword containment, else `other`.
    pub fn normalize(&self, raw: &str) -> Category {
        let label = normalize_label(raw);
        if label.is_empty() {
            return Category::Other;
        }

        if let Some(category) = Category::ALL.iter().find(|c| c.as_str() == label) {
            return *category;
        }

        if let Some(category) = self.synonyms.get(&label) {
            return *category;
        }

        // punctuation becomes a space so " bar " also matches "bar/caffe" and "pub,"
        let words_only: String = label
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let padded = format!(" {words_only} ");
        for (category, words) in &self.keywords {
            if words.iter().any(|word| padded.contains(word.as_str())) {
                return *category;
            }
        }

        Category::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_keys_are_idempotent() {
        let table = CategoryTable::default();
        for category in Category::ALL {
            assert_eq!(table.normalize(category.as_str()), category);
        }
    }

    #[test]
    fn test_synonyms() {
        let table = CategoryTable::default();
        assert_eq!(table.normalize("ristorante"), Category::Restaurant);
        assert_eq!(table.normalize("  Caffè "), Category::Cafe);
        assert_eq!(table.normalize("Bar"), Category::Cafe);
        assert_eq!(table.normalize("Cocktail Bar"), Category::Cocktails);
        assert_eq!(table.normalize("Spiaggia Libera"), Category::FreeBeaches);
        assert_eq!(table.normalize("Stabilimento balneare"), Category::Lidi);
        assert_eq!(table.normalize("Late Night Eats"), Category::LateNightEats);
        assert_eq!(table.normalize("Rifugio"), Category::Refuge);
    }

    #[test]
    fn test_keyword_containment() {
        let table = CategoryTable::default();
        assert_eq!(table.normalize("Ristorante del Porto"), Category::Restaurant);
        assert_eq!(table.normalize("Ristorante Pizzeria"), Category::Pizza);
        assert_eq!(table.normalize("Gelateria Artigianale"), Category::Gelato);
        assert_eq!(table.normalize("Lido delle Sirene"), Category::Lidi);
        assert_eq!(table.normalize("Beach Club Paradiso"), Category::Lidi);
        assert_eq!(table.normalize("Noleggio bici e scooter"), Category::RentARide);
        assert_eq!(table.normalize("Museo Civico"), Category::Culture);
        assert_eq!(table.normalize("Musée d'Orsay"), Category::Culture);
        assert_eq!(table.normalize("Bar Centrale"), Category::Cafe);
        assert_eq!(table.normalize("Disco"), Category::Nightlife);
        assert_eq!(table.normalize("Irish Pub"), Category::Cocktails);
        assert_eq!(table.normalize("Bar/Tabacchi"), Category::Cafe);
    }

    #[test]
    fn test_short_keywords_match_whole_words_only() {
        let table = CategoryTable::default();
        assert_eq!(table.normalize("Spiaggia pubblica"), Category::FreeBeaches);
        assert_eq!(table.normalize("Giardino pubblico"), Category::Attractions);
        assert_eq!(table.normalize("Chiesa barocca"), Category::Culture);
        assert_eq!(table.normalize("Museo del Barocco"), Category::Culture);
        assert_eq!(table.normalize("Golf Club"), Category::Adventure);
        assert_eq!(table.normalize("Night Club Paradiso"), Category::Nightlife);
    }

    #[test]
    fn test_exact_match_wins_over_keyword() {
        let table = CategoryTable::default();
        // "cocktail bar" would hit the cafe "bar" keyword if keywords ran first
        assert_eq!(table.normalize("cocktail bar"), Category::Cocktails);
        assert_eq!(table.normalize("beach club"), Category::Lidi);
    }

    #[test]
    fn test_unknown_and_empty_fall_back_to_other() {
        let table = CategoryTable::default();
        assert_eq!(table.normalize(""), Category::Other);
        assert_eq!(table.normalize("   "), Category::Other);
        assert_eq!(table.normalize("Xyzzy"), Category::Other);
        assert_eq!(table.normalize("東京"), Category::Other);
    }

    #[test]
    fn test_normalize_is_total() {
        let table = CategoryTable::default();
        let samples = ["", "\u{0301}", "🍕", "PIZZA!!", "a,b,c", "\n\t", "ÆØÅ", "other"];
        for sample in samples {
            let category = table.normalize(sample);
            assert!(Category::ALL.contains(&category));
        }
    }

    #[test]
    fn test_custom_table_from_file() {
        let json = r#"{
            "synonyms": { "refuge": ["Hütte"] },
            "keywords": [ { "category": "adventure", "keywords": ["ferrata"] } ]
        }"#;
        let file: CategoryTableFile = serde_json::from_str(json).unwrap();
        let table = CategoryTable::from_file(file);
        assert_eq!(table.normalize("hutte"), Category::Refuge);
        assert_eq!(table.normalize("Via Ferrata del Lago"), Category::Adventure);
        assert_eq!(table.normalize("ristorante"), Category::Other);
        assert_eq!(table.normalize("restaurant"), Category::Restaurant);
    }
}
