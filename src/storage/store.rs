use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::models::AppError;

/// Persisted key-value store holding JSON values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, AppError>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), AppError>;

    fn remove(&mut self, key: &str) -> Result<(), AppError>;

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|err| AppError::parse(format!("stored value '{key}' is invalid: {err}"))),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), AppError>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value)
            .map_err(|err| AppError::parse(format!("failed to encode '{key}': {err}")))?;
        self.set(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|err| {
                AppError::io(format!("failed to read store {}: {err}", path.display()))
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|err| {
                    AppError::parse(format!("store {} is not a JSON object: {err}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::io(format!("failed to create store directory: {err}"))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| AppError::parse(format!("failed to encode store: {err}")))?;

        fs::write(&self.path, content).map_err(|err| {
            AppError::io(format!("failed to write store {}: {err}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), AppError> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorKind;

    #[test]
    fn test_memory_store_json_round_trip() {
        let mut store = MemoryStore::new();
        store.set_json("codes", &vec![1, 2, 3]).unwrap();
        let codes: Option<Vec<i32>> = store.get_json("codes").unwrap();
        assert_eq!(codes, Some(vec![1, 2, 3]));

        store.remove("codes").unwrap();
        assert_eq!(store.get("codes").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set_json("favorites", &vec!["poi-1".to_string()]).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let favorites: Option<Vec<String>> = reopened.get_json("favorites").unwrap();
        assert_eq!(favorites, Some(vec!["poi-1".to_string()]));
    }

    #[test]
    fn test_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = JsonFileStore::open(&path).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
    }

    #[test]
    fn test_wrong_shape_is_reported() {
        let mut store = MemoryStore::new();
        store.set("favorites", Value::from(3)).unwrap();
        let result: Result<Option<Vec<String>>, AppError> = store.get_json("favorites");
        assert!(result.is_err());
    }
}
