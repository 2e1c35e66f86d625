//! Key-value storage media

use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs, io,
    path::PathBuf,
    sync::Mutex,
};

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("failed to access storage file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file holds something other than a map of string values.
    #[error("storage file {path} is not a map of string values")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A writer panicked while holding the in-memory lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value store that persists between runs.
///
/// Values are always read and written whole; there is no field-level access.
pub trait StorageMedium: Debug + Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying medium cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-process storage medium.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// An empty medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a medium pre-seeded with a single entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = FxHashMap::default();

        entries.insert(key.into(), value.into());

        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl StorageMedium for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_poisoned| StorageError::Poisoned)?;

        entries.insert(key.to_string(), value);

        Ok(())
    }
}

/// Storage medium backed by a JSON object file of string values.
///
/// The whole file is read on every `get` and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// A medium backed by the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StorageMedium for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_entries()?;

        Ok(entries.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;

        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let contents = serde_json::to_string_pretty(&entries).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, contents).map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), key, "wrote storage entry");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn memory_storage_returns_none_for_missing_key() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("missing")?, None);

        Ok(())
    }

    #[test]
    fn memory_storage_overwrites_values() -> TestResult {
        let storage = MemoryStorage::with_entry("key", "first");

        storage.set("key", "second".to_string())?;

        assert_eq!(storage.get("key")?.as_deref(), Some("second"));

        Ok(())
    }

    #[test]
    fn file_storage_missing_file_reads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("storage.json"));

        assert_eq!(storage.get("anything")?, None);

        Ok(())
    }

    #[test]
    fn file_storage_persists_across_instances() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("storage.json");

        FileStorage::new(&path).set("a", "1".to_string())?;
        FileStorage::new(&path).set("b", "2".to_string())?;

        let reopened = FileStorage::new(&path);

        assert_eq!(reopened.get("a")?.as_deref(), Some("1"));
        assert_eq!(reopened.get("b")?.as_deref(), Some("2"));

        Ok(())
    }

    #[test]
    fn file_storage_rejects_non_map_contents() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("storage.json");

        fs::write(&path, "[1, 2, 3]")?;

        let result = FileStorage::new(&path).get("a");

        assert!(
            matches!(result, Err(StorageError::Corrupt { .. })),
            "expected Corrupt, got {result:?}"
        );

        Ok(())
    }
}
