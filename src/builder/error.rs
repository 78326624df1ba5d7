//! Build errors for the tour builder.

use crate::core::CatalogError;
use thiserror::Error;

/// Errors that can occur when building a tour machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No steps specified. Call .steps(..) or .catalog(..) before .build()")]
    MissingSteps,

    #[error("Invalid step catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Tour id must not be blank")]
    BlankTourId,

    #[error("Storage key must not be blank")]
    BlankStorageKey,
}
