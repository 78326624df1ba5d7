//! Resumable tour progress.
//!
//! A single small record per tour is persisted under a fixed storage key:
//!
//! ```json
//! {"currentStep": 2, "completed": false}
//! ```
//!
//! Persistence is best-effort. A missing, unreadable, or invalid record loads
//! as "no progress", and a failed write is logged and dropped. The in-memory
//! session stays authoritative for the current page either way.

use serde::{Deserialize, Serialize};

pub mod error;
pub mod storage;

pub use error::{ProgressError, StorageError};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageWrite};

/// Durable record of how far the user got.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub current_step: usize,
    pub completed: bool,
}

impl ProgressRecord {
    /// In-progress record at `step`.
    pub fn at(step: usize) -> Self {
        Self {
            current_step: step,
            completed: false,
        }
    }

    /// Completed record pinned to the final step.
    pub fn finished(last_index: usize) -> Self {
        Self {
            current_step: last_index,
            completed: true,
        }
    }

    /// Check the record against a catalog of `step_count` steps.
    pub fn validate(&self, step_count: usize) -> Result<(), ProgressError> {
        if self.current_step >= step_count {
            return Err(ProgressError::OutOfRange {
                step: self.current_step,
                len: step_count,
            });
        }
        Ok(())
    }

    /// True when opening the launcher should resume at this record.
    pub fn is_resumable(&self) -> bool {
        !self.completed
    }
}

/// Loads and saves the progress record of one tour.
///
/// # Example
///
/// ```rust
/// use onboardx::progress::{MemoryStorage, ProgressRecord, ProgressStore};
///
/// let store = ProgressStore::new(MemoryStorage::new(), "tour_state", 5);
/// assert_eq!(store.load(), None);
///
/// store.save(&ProgressRecord::at(3));
/// assert_eq!(store.load(), Some(ProgressRecord::at(3)));
/// ```
pub struct ProgressStore {
    storage: Box<dyn Storage>,
    key: String,
    step_count: usize,
}

impl ProgressStore {
    pub fn new(
        storage: impl Storage + 'static,
        key: impl Into<String>,
        step_count: usize,
    ) -> Self {
        Self::from_boxed(Box::new(storage), key, step_count)
    }

    pub fn from_boxed(
        storage: Box<dyn Storage>,
        key: impl Into<String>,
        step_count: usize,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            step_count,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Read and validate the stored record.
    ///
    /// `Ok(None)` means nothing (or only whitespace) is stored.
    pub fn try_load(&self) -> Result<Option<ProgressRecord>, ProgressError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let record: ProgressRecord =
            serde_json::from_str(&raw).map_err(|e| ProgressError::Malformed(e.to_string()))?;
        record.validate(self.step_count)?;
        Ok(Some(record))
    }

    /// Best-effort load: every failure reads as "no progress".
    pub fn load(&self) -> Option<ProgressRecord> {
        match self.try_load() {
            Ok(record) => record,
            Err(e) if e.is_invalid_payload() => {
                tracing::debug!(key = %self.key, error = %e, "ignoring invalid progress record");
                None
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    backend = self.storage.name(),
                    error = %e,
                    "progress storage unreadable, starting fresh"
                );
                None
            }
        }
    }

    /// Validate and overwrite the stored record.
    pub fn try_save(&self, record: &ProgressRecord) -> Result<(), ProgressError> {
        record.validate(self.step_count)?;
        let json = serde_json::to_string(record)
            .map_err(|e| ProgressError::Serialization(e.to_string()))?;
        self.storage.set_item(&self.key, &json)?;
        Ok(())
    }

    /// Best-effort save: failures are logged and dropped.
    pub fn save(&self, record: &ProgressRecord) {
        if let Err(e) = self.try_save(record) {
            tracing::warn!(
                key = %self.key,
                backend = self.storage.name(),
                error = %e,
                "failed to persist tour progress"
            );
        }
    }

    /// Best-effort removal of the stored record.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to clear tour progress");
        }
    }
}
