use std::env;
use std::path::PathBuf;

use crate::models::AppError;
use crate::parsers::PlaceParser;
use crate::storage::dictionary::{load_category_table, load_header_aliases};

pub const ENV_SHEET_URL: &str = "GOLOCAL_SHEET_URL";
pub const ENV_DICTIONARY_DIR: &str = "GOLOCAL_DICTIONARY_DIR";
pub const ENV_STORE_PATH: &str = "GOLOCAL_STORE_PATH";
pub const ENV_LOG_FILTER: &str = "RUST_LOG";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub sheet_url: Option<String>,
    pub dictionary_dir: Option<PathBuf>,
    pub store_path: PathBuf,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sheet_url: None,
            dictionary_dir: None,
            store_path: default_store_path(),
            log_filter: "info".into(),
        }
    }
}

fn default_store_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("golocal").join("store.json"),
        None => PathBuf::from("golocal-store.json"),
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns; blank values are ignored
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut c = AppConfig::default();
        if let Some(v) = get(ENV_SHEET_URL) { c.sheet_url = Some(v); }
        if let Some(v) = get(ENV_DICTIONARY_DIR) { c.dictionary_dir = Some(PathBuf::from(v)); }
        if let Some(v) = get(ENV_STORE_PATH) { c.store_path = PathBuf::from(v); }
        if let Some(v) = get(ENV_LOG_FILTER) { c.log_filter = v; }
        c
    }

    /// Parser with the header and category tables this config points at
    pub fn place_parser(&self) -> Result<PlaceParser, AppError> {
        let dir = self.dictionary_dir.as_deref();
        Ok(PlaceParser::new(
            load_header_aliases(dir)?,
            load_category_table(dir)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let c = AppConfig::from_lookup(|_| None);
        assert_eq!(c.sheet_url, None);
        assert_eq!(c.dictionary_dir, None);
        assert_eq!(c.log_filter, "info");
        assert!(c.store_path.ends_with("store.json") || c.store_path.ends_with("golocal-store.json"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_SHEET_URL, "https://example.com/sheet.csv"),
            (ENV_DICTIONARY_DIR, "/etc/golocal"),
            (ENV_STORE_PATH, "/tmp/store.json"),
            (ENV_LOG_FILTER, "  "),
        ]);
        let c = AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(c.sheet_url.as_deref(), Some("https://example.com/sheet.csv"));
        assert_eq!(c.dictionary_dir, Some(PathBuf::from("/etc/golocal")));
        assert_eq!(c.store_path, PathBuf::from("/tmp/store.json"));
        assert_eq!(c.log_filter, "info");
    }

    #[test]
    fn test_place_parser_uses_dictionary_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("header_aliases.json"),
            r#"{"name": ["Struttura"]}"#,
        )
        .unwrap();

        let config = AppConfig {
            dictionary_dir: Some(dir.path().to_path_buf()),
            ..AppConfig::default()
        };
        let places = config
            .place_parser()
            .unwrap()
            .parse_csv("Struttura,city\nRifugio Alpe,Bormio\n")
            .unwrap();
        assert_eq!(places[0].name, "Rifugio Alpe");
    }
}
