//! The persistent store: canonical in-memory collection plus its durable mirror.

use crate::board::models::{check_invariants, Category};
use crate::error::{Error, Result};
use crate::traits::{KeyValueStorage, SeedSource};

/// Storage key the collection is serialised under.
pub const DEFAULT_STORAGE_KEY: &str = "tasksData";

/// Owns the category collection and writes it through to durable storage.
#[derive(Debug)]
pub struct BoardStore<S> {
    storage: S,
    key: String,
    categories: Vec<Category>,
}

impl<S> BoardStore<S> {
    /// Create an empty store persisting under [`DEFAULT_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create an empty store persisting under `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into(), categories: Vec::new() }
    }

    /// The current collection.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The storage key in use.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the in-memory collection without writing it out.
    pub(crate) fn set(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }
}

impl<S: KeyValueStorage> BoardStore<S> {
    /// Read the collection from durable storage, or from `seed` when storage
    /// holds no snapshot.
    ///
    /// The in-memory collection is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`] if storage cannot be read, the seed cannot be
    /// fetched, or the chosen document is not a well-formed collection.
    pub fn load(&self, seed: &dyn SeedSource) -> Result<Vec<Category>> {
        let stored = self
            .storage
            .get_item(&self.key)
            .map_err(|e| Error::Load(format!("Failed to read stored tasks: {e}")))?;

        let (raw, origin) = match stored {
            Some(raw) => (raw, format!("storage key {}", self.key)),
            None => (seed.fetch()?, seed.describe()),
        };

        let categories: Vec<Category> = serde_json::from_str(&raw)
            .map_err(|e| Error::Load(format!("Malformed task data from {origin}: {e}")))?;

        tracing::info!(source = %origin, categories = categories.len(), "loaded task data");
        for violation in check_invariants(&categories) {
            tracing::warn!(source = %origin, %violation, "loaded task data is inconsistent");
        }
        Ok(categories)
    }

    /// Serialise the whole collection to durable storage.
    ///
    /// Failures are logged and otherwise ignored; the in-memory collection
    /// stays authoritative.
    pub fn persist(&self) {
        let result = serde_json::to_string(&self.categories)
            .map_err(Error::from)
            .and_then(|json| self.storage.set_item(&self.key, &json));
        if let Err(e) = result {
            tracing::warn!(key = %self.key, error = %e, "failed to persist task data");
        }
    }

    /// Replace the collection wholesale and persist it.
    pub fn replace_all(&mut self, categories: Vec<Category>) {
        self.set(categories);
        self.persist();
    }

    /// Remove the durable snapshot so the next load falls back to the seed.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::models::fixtures::category;
    use crate::seed::StaticSeed;
    use crate::storage::{MemoryStorage, SqliteStorage};
    use tempfile::TempDir;

    struct Unreachable;

    impl SeedSource for Unreachable {
        fn fetch(&self) -> Result<String> {
            Err(Error::Load("Failed to fetch tasks".to_string()))
        }

        fn describe(&self) -> String {
            "unreachable".to_string()
        }
    }

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }

        fn remove_item(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_prefers_stored_snapshot() {
        let stored = serde_json::to_string(&vec![category(1, "Stored", &[])]).unwrap();
        let store = BoardStore::new(MemoryStorage::with_item(DEFAULT_STORAGE_KEY, &stored));

        let loaded = store.load(&Unreachable).unwrap();
        assert_eq!(loaded[0].name, "Stored");
    }

    #[test]
    fn test_load_falls_back_to_seed() {
        let store = BoardStore::new(MemoryStorage::new());
        let seed = StaticSeed(r#"[{"id":1,"name":"Seed","category_order":1,"tasks":[]}]"#.into());

        let loaded = store.load(&seed).unwrap();
        assert_eq!(loaded[0].name, "Seed");
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_load_does_not_persist_seed() {
        let store = BoardStore::new(MemoryStorage::new());
        store.load(&StaticSeed("[]".into())).unwrap();
        assert_eq!(store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_load_unreachable_seed() {
        let store = BoardStore::new(MemoryStorage::new());
        let err = store.load(&Unreachable).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch tasks");
    }

    #[test]
    fn test_load_malformed_seed() {
        let store = BoardStore::new(MemoryStorage::new());
        let err = store.load(&StaticSeed(r#"{"not":"a list"}"#.into())).unwrap_err();
        assert!(matches!(err, Error::Load(msg) if msg.starts_with("Malformed task data")));
    }

    #[test]
    fn test_load_malformed_snapshot() {
        let store = BoardStore::new(MemoryStorage::with_item(DEFAULT_STORAGE_KEY, "not json"));
        assert!(matches!(store.load(&StaticSeed("[]".into())), Err(Error::Load(_))));
    }

    #[test]
    fn test_load_storage_read_failure() {
        let store = BoardStore::new(FailingStorage);
        assert!(matches!(store.load(&StaticSeed("[]".into())), Err(Error::Load(_))));
    }

    #[test]
    fn test_replace_all_persists() {
        let mut store = BoardStore::new(MemoryStorage::new());
        store.replace_all(vec![category(2, "Home", &[1])]);

        let raw = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let back: Vec<Category> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, store.categories());
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let mut store = BoardStore::new(FailingStorage);
        store.replace_all(vec![category(1, "Work", &[])]);
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn test_custom_key() {
        let mut store = BoardStore::with_key(MemoryStorage::new(), "other");
        store.replace_all(Vec::new());
        assert_eq!(store.key(), "other");
        assert!(store.storage().get_item("other").unwrap().is_some());
        assert!(store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_clear_makes_next_load_use_seed() {
        let mut store = BoardStore::new(MemoryStorage::new());
        store.replace_all(vec![category(1, "Old", &[])]);
        store.clear().unwrap();

        let loaded = store.load(&StaticSeed("[]".into())).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_sqlite_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("board.sqlite3");
        let original = vec![category(1, "Work", &[1, 2]), category(3, "Home", &[])];

        let mut store = BoardStore::new(SqliteStorage::new(&path).unwrap());
        store.replace_all(original.clone());

        let reopened = BoardStore::new(SqliteStorage::new(&path).unwrap());
        assert_eq!(reopened.load(&Unreachable).unwrap(), original);
    }
}
