//! Key-value storage backends for progress records.
//!
//! The [`Storage`] trait has the shape of browser local storage: string keys,
//! string values, single-record overwrite, last write wins.

use super::error::StorageError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// String key-value storage.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str {
        "storage"
    }
}

/// One recorded `set_item` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageWrite {
    pub key: String,
    pub value: String,
}

#[derive(Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    writes: Vec<StorageWrite>,
    log_disabled: bool,
    failing: bool,
}

/// In-process storage. Clones share the same map.
///
/// Every successful write is also appended to a write log, so callers can
/// assert on how often a key was persisted. Long-lived owners that never read
/// the log should use [`MemoryStorage::without_write_log`]. Switching the
/// storage to failing mode makes every call return [`StorageError::Unavailable`].
///
/// # Example
///
/// ```rust
/// use onboardx::progress::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new();
/// let handle = storage.clone();
///
/// storage.set_item("k", "v").unwrap();
/// assert_eq!(handle.item("k").as_deref(), Some("v"));
/// assert_eq!(handle.writes().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that keeps only the current items; `writes` stays empty.
    pub fn without_write_log() -> Self {
        let storage = Self::default();
        storage.inner.lock().log_disabled = true;
        storage
    }

    /// Seed a raw value without recording a write.
    pub fn with_item(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.lock().items.insert(key.into(), value.into());
        self
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().failing = failing;
    }

    /// Raw value currently held for `key`, bypassing failing mode.
    pub fn item(&self, key: &str) -> Option<String> {
        self.inner.lock().items.get(key).cloned()
    }

    /// Every successful `set_item` so far, oldest first.
    pub fn writes(&self) -> Vec<StorageWrite> {
        self.inner.lock().writes.clone()
    }

    pub fn writes_for(&self, key: &str) -> Vec<String> {
        self.inner
            .lock()
            .writes
            .iter()
            .filter(|w| w.key == key)
            .map(|w| w.value.clone())
            .collect()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.lock();
        if inner.failing {
            return Err(StorageError::Unavailable("memory storage disabled".into()));
        }
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        if inner.failing {
            return Err(StorageError::Unavailable("memory storage disabled".into()));
        }
        inner.items.insert(key.to_string(), value.to_string());
        if !inner.log_disabled {
            inner.writes.push(StorageWrite {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.lock();
        if inner.failing {
            return Err(StorageError::Unavailable("memory storage disabled".into()));
        }
        inner.items.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// One JSON file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write never leaves a half-written record behind.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Platform data directory, e.g. `~/.local/share/onboardx` on Linux.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("onboardx"))
    }

    pub fn at_default_location() -> Result<Self, StorageError> {
        Self::default_dir()
            .map(Self::new)
            .ok_or_else(|| StorageError::Unavailable("no local data directory".into()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. The key is percent-encoded, so distinct keys
    /// never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), "wrote progress record");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
