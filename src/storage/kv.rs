//! Key-value persistence medium
//!
//! Both stores persist a single JSON blob under a fixed key and rewrite it
//! wholesale after every mutation. The medium only needs whole-value reads,
//! writes and deletes.

use crate::storage::error::{StorageError, StorageResult};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key holding the serialized LogStore
pub const LOGS_KEY: &str = "cyclistMacroLogs";

/// Key holding the serialized Goals
pub const GOALS_KEY: &str = "cyclistMacroGoals";

/// Durable storage addressed by string keys
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the blob stored under `key`
    fn put(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).put(key, value)
    }
}

/// Load and deserialize the blob under `key`. A missing key yields `None`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get(key)? {
        Some(content) => serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::serialization(key, e)),
        None => Ok(None),
    }
}

/// Serialize `value` and write it under `key`
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> StorageResult<()> {
    let content = serde_json::to_string(value).map_err(|e| StorageError::serialization(key, e))?;
    store.put(key, &content)
}

/// One file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Root directory for all blobs
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to the file backing `key`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        // Write to a sibling and rename so readers never see a partial blob
        let path = self.key_path(key);
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::trace!(key, bytes = value.len(), "Wrote blob");
        Ok(())
    }
}

/// In-process store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
