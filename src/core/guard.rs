//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions that decide whether an operation may run
//! from the current mode. They carry no side effects, so the UI can ask them
//! ahead of time which affordances to enable.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use onboardx::core::{Guard, TourMode};
///
/// let only_active = Guard::new(|mode: &TourMode| matches!(mode, TourMode::Active(_)));
///
/// assert!(only_active.check(&TourMode::Active(0)));
/// assert!(!only_active.check(&TourMode::Closed));
/// ```
pub struct Guard<S> {
    predicate: Arc<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that never blocks.
    pub fn always() -> Self
    where
        S: 'static,
    {
        Guard::new(|_| true)
    }

    /// Check if the guard allows transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    /// Both guards must pass.
    pub fn and(self, other: Guard<S>) -> Self
    where
        S: 'static,
    {
        Guard::new(move |s| self.check(s) && other.check(s))
    }
}

impl<S> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
