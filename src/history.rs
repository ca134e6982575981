//! Recent-search history.
//!
//! History lives in a string key/value store under a single key holding a
//! JSON array of query strings, newest first.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{AppError, Result};

/// Storage key for the recent-search list.
pub const HISTORY_KEY: &str = "recentSearches";

/// Default number of entries kept.
pub const DEFAULT_MAX_ENTRIES: usize = 5;

/// Minimal string key/value persistence.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the removal cannot be persisted.
    fn clear(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> Result<()> {
        (**self).clear(key)
    }
}

/// In-memory store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::History("memory store lock poisoned".into()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::History("memory store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten on every change.
///
/// A missing or unreadable file behaves as an empty store.
///
/// Every call does blocking file I/O. Async callers should go through
/// [`crate::SearchService`], which moves history writes onto the blocking
/// pool.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> HashMap<String, String> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable history file");
            HashMap::new()
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(entries).map_err(|e| AppError::History(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AppError::History("file store lock poisoned".into()))?;
        let mut entries = self.load();
        f(&mut entries);
        self.persist(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().ok()?;
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn clear(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// Most-recent-first list of distinct search queries.
///
/// Updates are serialised so concurrent `add` calls never drop each
/// other's entries.
#[derive(Debug)]
pub struct RecentSearches<S> {
    store: S,
    max_entries: usize,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> RecentSearches<S> {
    pub fn new(store: S) -> Self {
        Self::with_max_entries(store, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(store: S, max_entries: usize) -> Self {
        Self {
            store,
            max_entries,
            write_lock: Mutex::new(()),
        }
    }

    /// Stored entries, newest first.
    pub fn list(&self) -> Vec<String> {
        let Some(raw) = self.store.get(HISTORY_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "recent searches corrupt, treating as empty");
            Vec::new()
        })
    }

    /// Record `query` as the newest entry.
    ///
    /// Blank input is ignored. An equal existing entry is moved to the front
    /// instead of duplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the new list.
    pub fn add(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Ok(());
        }
        let _guard = self.lock_writes()?;
        let mut entries = self.list();
        entries.retain(|e| e != query);
        entries.insert(0, query.to_owned());
        entries.truncate(self.max_entries);

        let raw = serde_json::to_string(&entries).map_err(|e| AppError::History(e.to_string()))?;
        self.store.set(HISTORY_KEY, &raw)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot persist the removal.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock_writes()?;
        self.store.clear(HISTORY_KEY)
    }

    fn lock_writes(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::History("recent searches lock poisoned".into()))
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
