//! Render-ready view of a tour session.
//!
//! The UI layer subscribes to this snapshot and draws it; it never decides
//! transitions itself.

use crate::core::{StepCatalog, TourMode, TourSession, TourStep};

/// Everything a step card needs to render.
#[derive(Clone, Debug, PartialEq)]
pub struct TourView<'a> {
    pub mode: TourMode,
    /// Step under `current_step`, shown when active
    pub step: &'a TourStep,
    /// 1-based position for "Step 2 of 5"
    pub position: usize,
    pub total: usize,
    /// `(position / total) * 100`
    pub progress_percent: f32,
    pub is_last_step: bool,
    pub can_go_back: bool,
    /// "Next", or "Finish" on the last step
    pub primary_label: &'static str,
    /// Launcher should offer to resume
    pub has_progress: bool,
}

impl<'a> TourView<'a> {
    pub fn of(session: &TourSession, catalog: &'a StepCatalog) -> Self {
        let index = catalog.clamp(session.current_step);
        let total = catalog.len();
        let is_last_step = index == catalog.last_index();
        let step = catalog.clamped(index);

        Self {
            mode: session.mode,
            step,
            position: index + 1,
            total,
            progress_percent: (index + 1) as f32 / total as f32 * 100.0,
            is_last_step,
            can_go_back: index > 0,
            primary_label: if is_last_step { "Finish" } else { "Next" },
            has_progress: session.has_progress,
        }
    }

    /// Whether the step card should be on screen.
    pub fn shows_step(&self) -> bool {
        matches!(self.mode, TourMode::Active(_))
    }

    pub fn shows_intro(&self) -> bool {
        matches!(self.mode, TourMode::IntroShown)
    }

    /// "Step 2 of 5"
    pub fn counter_label(&self) -> String {
        format!("Step {} of {}", self.position, self.total)
    }
}
