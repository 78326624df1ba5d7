//! Session transition history.
//!
//! Provides immutable tracking of mode changes over the lifetime of a session.
//! Only operations that actually changed the session are recorded.

use super::session::TourMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied operation.
///
/// # Example
///
/// ```rust
/// use onboardx::core::{ModeTransition, TourMode};
/// use chrono::Utc;
///
/// let transition = ModeTransition {
///     action: "start".to_string(),
///     from: TourMode::IntroShown,
///     to: TourMode::Active(0),
///     timestamp: Utc::now(),
/// };
/// assert!(transition.changed_mode());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeTransition {
    /// Name of the operation that caused the transition
    pub action: String,
    /// Mode before the operation
    pub from: TourMode,
    /// Mode after the operation
    pub to: TourMode,
    /// When the operation was applied
    pub timestamp: DateTime<Utc>,
}

impl ModeTransition {
    /// False when the operation left the mode untouched, e.g. a seek to the
    /// step already on screen.
    pub fn changed_mode(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of applied operations.
///
/// `record` returns a new history with the transition appended; `push`
/// appends in place. A bounded history keeps only the most recent `limit`
/// transitions, so the path and visited steps describe that window.
///
/// # Example
///
/// ```rust
/// use onboardx::core::{ModeTransition, SessionHistory, TourMode};
/// use chrono::Utc;
///
/// let history = SessionHistory::new().record(ModeTransition {
///     action: "open_launcher".to_string(),
///     from: TourMode::Closed,
///     to: TourMode::IntroShown,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&TourMode::Closed, &TourMode::IntroShown]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    transitions: Vec<ModeTransition>,
    #[serde(skip)]
    limit: Option<usize>,
}

impl SessionHistory {
    /// Unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// History that retains at most `limit` transitions.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: Vec::with_capacity(limit),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: ModeTransition) -> Self {
        let mut history = self.clone();
        history.push(transition);
        history
    }

    /// Append a transition in place, dropping the oldest past the limit.
    pub fn push(&mut self, transition: ModeTransition) {
        self.transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = self.transitions.len().saturating_sub(limit);
            self.transitions.drain(..excess);
        }
    }

    /// Modes traversed: the first `from`, then every `to`.
    pub fn get_path(&self) -> Vec<&TourMode> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Distinct steps the user has seen, in first-visit order.
    pub fn visited_steps(&self) -> Vec<usize> {
        let mut seen = Vec::new();
        for mode in self.get_path() {
            match mode.active_step() {
                Some(index) if !seen.contains(&index) => seen.push(index),
                _ => {}
            }
        }
        seen
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let elapsed = last.timestamp.signed_duration_since(first.timestamp);
            elapsed.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[ModeTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
