//! Progress persistence error types.

use thiserror::Error;

/// Failures of the underlying key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage cannot be reached at all (disabled, quota exceeded, no home dir)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading or saving a progress record.
///
/// Only surfaced by the `try_*` methods of
/// [`ProgressStore`](super::ProgressStore); the plain methods swallow them.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Payload is not JSON, has a missing field, or a field of the wrong type
    #[error("Malformed progress record: {0}")]
    Malformed(String),

    /// Step index does not fit the catalog
    #[error("Step {step} is outside a catalog of {len} steps")]
    OutOfRange { step: usize, len: usize },

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl ProgressError {
    /// Corrupt or stale data, as opposed to storage that could not be reached.
    pub fn is_invalid_payload(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::OutOfRange { .. })
    }
}
