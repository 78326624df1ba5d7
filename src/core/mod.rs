//! Core tour types and logic.
//!
//! This module contains the pure data of the tour:
//! - The step catalog
//! - The in-memory session and its UI mode
//! - Guard predicates for transition control
//! - Immutable history tracking
//!
//! Nothing here touches storage or analytics sinks.

mod catalog;
mod guard;
mod history;
mod session;

pub use catalog::{CatalogError, StepCatalog, TourStep};
pub use guard::Guard;
pub use history::{ModeTransition, SessionHistory};
pub use session::{TourMode, TourSession};
