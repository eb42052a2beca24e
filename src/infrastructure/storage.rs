// src/infrastructure/storage.rs
use crate::application::review_store::{default_reviews, ReviewRepository};
use crate::domain::{DomainError, Review};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

/// String-keyed slot storage, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError>;
}

/// Key-value slots kept as one JSON object in a file.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, DomainError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            DomainError::Storage(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            DomainError::Storage(format!("Failed to parse {}: {e}", self.path.display()))
        })
    }

    fn write_all(&self, slots: &BTreeMap<String, String>) -> Result<(), DomainError> {
        let storage_err =
            |e: std::io::Error| DomainError::Storage(format!("{}: {e}", self.path.display()));

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(storage_err)?;

        let json = serde_json::to_string_pretty(slots)
            .map_err(|e| DomainError::Storage(format!("Failed to serialize slots: {e}")))?;

        // Written beside the target, then renamed over it
        let mut tmp = NamedTempFile::new_in(&dir).map_err(storage_err)?;
        tmp.write_all(json.as_bytes()).map_err(storage_err)?;
        tmp.persist(&self.path)
            .map_err(|e| storage_err(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        // An unreadable file is replaced rather than blocking every write
        let mut slots = self.read_all().unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable storage file");
            BTreeMap::new()
        });
        slots.insert(key.to_string(), value.to_string());
        self.write_all(&slots)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    slots: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Review list persisted as a JSON snapshot under a single key.
#[derive(Debug)]
pub struct LocalStorageRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LocalStorageRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> ReviewRepository for LocalStorageRepository<S> {
    #[instrument(level = "debug", skip(self), fields(key = %self.key))]
    fn load_reviews(&mut self) -> Vec<Review> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Nothing stored yet, using bundled reviews");
                return default_reviews();
            }
            Err(e) => {
                warn!(error = %e, "Unable to read reviews from storage.");
                return default_reviews();
            }
        };

        match serde_json::from_str::<Vec<Review>>(&raw) {
            Ok(reviews) if !reviews.is_empty() => reviews,
            Ok(_) => default_reviews(),
            Err(e) => {
                warn!(error = %e, "Unable to read reviews from storage.");
                default_reviews()
            }
        }
    }

    #[instrument(level = "debug", skip(self, reviews), fields(key = %self.key, count = reviews.len()))]
    fn save_reviews(&mut self, reviews: &[Review]) -> Result<(), DomainError> {
        let json = serde_json::to_string(reviews)
            .map_err(|e| DomainError::Storage(format!("Failed to serialize reviews: {e}")))?;
        self.store.set(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STORAGE_KEY;
    use crate::util::testing::review;
    use tempfile::TempDir;

    #[test]
    fn given_empty_store_when_loading_then_returns_defaults() {
        let mut repo = LocalStorageRepository::new(MemoryKeyValueStore::new(), STORAGE_KEY);

        let reviews = repo.load_reviews();

        assert_eq!(reviews.len(), 5);
        assert_eq!(reviews[0].restaurant, "Luna Pasta Lab");
    }

    #[test]
    fn given_corrupt_json_when_loading_then_returns_defaults() {
        let store = MemoryKeyValueStore::new().with_slot(STORAGE_KEY, "{not json");
        let mut repo = LocalStorageRepository::new(store, STORAGE_KEY);

        assert_eq!(repo.load_reviews().len(), 5);
    }

    #[test]
    fn given_non_array_json_when_loading_then_returns_defaults() {
        let store = MemoryKeyValueStore::new().with_slot(STORAGE_KEY, r#"{"reviews": []}"#);
        let mut repo = LocalStorageRepository::new(store, STORAGE_KEY);

        assert_eq!(repo.load_reviews().len(), 5);
    }

    #[test]
    fn given_empty_array_when_loading_then_returns_defaults() {
        let store = MemoryKeyValueStore::new().with_slot(STORAGE_KEY, "[]");
        let mut repo = LocalStorageRepository::new(store, STORAGE_KEY);

        assert_eq!(repo.load_reviews().len(), 5);
    }

    #[test]
    fn given_saved_list_when_loading_then_returns_it_in_order() {
        let reviews = vec![
            review("B", "Dish B", "Thai", 2, "2026-01-02T00:00:00Z"),
            review("A", "Dish A", "Thai", 5, "2026-01-01T00:00:00Z"),
        ];
        let mut repo = LocalStorageRepository::new(MemoryKeyValueStore::new(), STORAGE_KEY);

        repo.save_reviews(&reviews).unwrap();

        assert_eq!(repo.load_reviews(), reviews);
    }

    #[test]
    fn given_file_store_when_setting_then_keeps_other_slots() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");
        let mut store = FileKeyValueStore::new(&path);

        store.set("theme", "dark").unwrap();
        store.set(STORAGE_KEY, "[]").unwrap();

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("missing").unwrap(), None);
    }

    #[test]
    fn given_unreadable_file_store_when_loading_reviews_then_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "garbage").unwrap();
        let mut repo = LocalStorageRepository::new(FileKeyValueStore::new(&path), STORAGE_KEY);

        assert!(repo.store().get(STORAGE_KEY).is_err());
        assert_eq!(repo.load_reviews().len(), 5);
    }

    #[test]
    fn given_corrupt_file_store_when_setting_then_rewrites_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = FileKeyValueStore::new(&path);

        store.set(STORAGE_KEY, "[]").unwrap();

        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }
}
