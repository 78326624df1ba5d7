//! In-memory tour session.
//!
//! A session lives for one page load. It is created from persisted progress,
//! mutated only through the state machine, and discarded on teardown.

use serde::{Deserialize, Serialize};
use std::fmt;

/// UI mode of the tour.
///
/// # Example
///
/// ```rust
/// use onboardx::core::TourMode;
///
/// assert_eq!(TourMode::Active(2).name(), "Active");
/// assert_eq!(TourMode::Active(2).active_step(), Some(2));
/// assert!(!TourMode::Closed.is_open());
/// assert!(TourMode::IntroShown.is_open());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "step", rename_all = "snake_case")]
pub enum TourMode {
    /// Only the launcher is visible
    Closed,
    /// The intro card is offered, no step shown yet
    IntroShown,
    /// A step card is on screen
    Active(usize),
}

impl TourMode {
    /// Name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Closed => "Closed",
            Self::IntroShown => "IntroShown",
            Self::Active(_) => "Active",
        }
    }

    /// True when any tour surface other than the launcher is visible.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Step index shown on the card, or `None` while no step is visible.
    pub fn active_step(&self) -> Option<usize> {
        match self {
            Self::Active(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for TourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active(index) => write!(f, "Active({index})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Per-page-load tour state.
///
/// `current_step` is always a valid catalog index. `has_progress` mirrors
/// whether a non-completed progress record exists for the tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourSession {
    pub mode: TourMode,
    pub current_step: usize,
    pub has_progress: bool,
}

impl TourSession {
    /// Fresh session: closed, step 0, nothing to resume.
    pub fn fresh() -> Self {
        Self {
            mode: TourMode::Closed,
            current_step: 0,
            has_progress: false,
        }
    }

    /// Closed session that will resume at `step` when the launcher is opened.
    pub fn resumable(step: usize) -> Self {
        Self {
            mode: TourMode::Closed,
            current_step: step,
            has_progress: true,
        }
    }
}

impl Default for TourSession {
    fn default() -> Self {
        Self::fresh()
    }
}
