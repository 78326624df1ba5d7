//! Step catalog: the fixed, ordered sequence of tour steps.
//!
//! A catalog is validated once at construction and never mutated afterwards.
//! Position in the catalog is the step index used everywhere else in the crate.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// One unit of guided content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourStep {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// Heading shown on the step card
    pub title: String,
    /// Body copy shown under the heading
    pub body: String,
}

impl TourStep {
    /// A step with the given copy. Ids must be unique within a catalog.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Errors raised while validating a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Tour catalog must contain at least one step")]
    Empty,

    #[error("Duplicate step id '{0}'")]
    DuplicateId(String),

    #[error("Step at index {index} has a blank id")]
    BlankId { index: usize },
}

/// Read-only ordered list of tour steps, length >= 1.
///
/// # Example
///
/// ```rust
/// use onboardx::core::{StepCatalog, TourStep};
///
/// let catalog = StepCatalog::new(vec![
///     TourStep::new("welcome", "Welcome", "Hello there"),
///     TourStep::new("finish", "Done", "That's it"),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.last_index(), 1);
/// assert_eq!(catalog.get(0).map(|s| s.id.as_str()), Some("welcome"));
/// assert!(catalog.get(2).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepCatalog {
    steps: Vec<TourStep>,
}

impl StepCatalog {
    /// Validate and freeze a list of steps.
    pub fn new(steps: Vec<TourStep>) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            if step.id.trim().is_empty() {
                return Err(CatalogError::BlankId { index });
            }
            if !seen.insert(step.id.as_str()) {
                return Err(CatalogError::DuplicateId(step.id.clone()));
            }
        }

        Ok(Self { steps })
    }

    /// Bounds-checked lookup by index.
    pub fn get(&self, index: usize) -> Option<&TourStep> {
        self.steps.get(index)
    }

    /// Position of the step with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// Number of steps; never zero.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed catalog; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step, where `next` completes the tour.
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Clamp an arbitrary index into `[0, len - 1]`.
    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// Step at `index`, or the last step when `index` is past the end.
    pub fn clamped(&self, index: usize) -> &TourStep {
        // Non-empty by construction.
        &self.steps[self.clamp(index)]
    }

    /// Steps in display order.
    pub fn iter(&self) -> impl Iterator<Item = &TourStep> {
        self.steps.iter()
    }
}

impl<'de> Deserialize<'de> for StepCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let steps = Vec::<TourStep>::deserialize(deserializer)?;
        StepCatalog::new(steps).map_err(serde::de::Error::custom)
    }
}
