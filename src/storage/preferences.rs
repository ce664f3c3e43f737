use crate::models::{AppError, Place};

use super::store::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";
pub const TRAVELLER_PATH_KEY: &str = "traveller_path";

/// Favorited place ids, kept in the order they were added
pub struct Favorites<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn ids(&self) -> Result<Vec<String>, AppError> {
        Ok(self.store.get_json(FAVORITES_KEY)?.unwrap_or_default())
    }

    pub fn contains(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.ids()?.iter().any(|fav| fav == id))
    }

    /// Returns `false` when the id was already a favorite
    pub fn add(&mut self, id: &str) -> Result<bool, AppError> {
        let mut ids = self.ids()?;
        if ids.iter().any(|fav| fav == id) {
            return Ok(false);
        }
        ids.push(id.to_string());
        self.store.set_json(FAVORITES_KEY, &ids)?;
        Ok(true)
    }

    /// Returns `false` when the id was not a favorite
    pub fn remove(&mut self, id: &str) -> Result<bool, AppError> {
        let mut ids = self.ids()?;
        let before = ids.len();
        ids.retain(|fav| fav != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.store.set_json(FAVORITES_KEY, &ids)?;
        Ok(true)
    }

    /// Flip the favorite flag; returns whether the id is now a favorite
    pub fn toggle(&mut self, id: &str) -> Result<bool, AppError> {
        if self.remove(id)? {
            Ok(false)
        } else {
            self.add(id)
        }
    }

    /// Favorited places in favorite order; ids no longer in the sheet are skipped
    pub fn resolve(&self, places: &[Place]) -> Result<Vec<Place>, AppError> {
        let ids = self.ids()?;
        Ok(ids
            .iter()
            .filter_map(|id| places.iter().find(|place| &place.id == id))
            .cloned()
            .collect())
    }
}

pub fn load_traveller_path<S: KeyValueStore>(store: &S) -> Result<Vec<i32>, AppError> {
    Ok(store.get_json(TRAVELLER_PATH_KEY)?.unwrap_or_default())
}

pub fn save_traveller_path<S: KeyValueStore>(store: &mut S, answers: &[i32]) -> Result<(), AppError> {
    store.set_json(TRAVELLER_PATH_KEY, &answers)
}
