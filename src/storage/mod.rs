pub mod dictionary;
pub mod preferences;
pub mod store;

pub use preferences::Favorites;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
