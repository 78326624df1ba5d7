//! Tour machine: the imperative shell around [`transition`].

use crate::analytics::Emitter;
use crate::core::{ModeTransition, SessionHistory, StepCatalog, TourMode, TourSession, TourStep};
use crate::effects::transition::{initial_session, transition, Effect, TourAction, TransitionError};
use crate::progress::ProgressStore;
use crate::view::TourView;
use chrono::Utc;
use uuid::Uuid;

/// Most recent transitions kept in [`TourMachine::history`].
pub const HISTORY_LIMIT: usize = 256;

/// Outcome of one operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The action was applied; holds the resulting mode
    Transitioned(TourMode),

    /// The action was not valid for the current session; nothing changed
    Ignored(TransitionError),
}

impl StepResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Transitioned(_))
    }
}

/// One tour session bound to its progress store and analytics emitter.
///
/// Progress is loaded once at construction. Every applied operation updates
/// the in-memory session first, then persists and emits in the order the
/// transition dictates.
pub struct TourMachine {
    catalog: StepCatalog,
    session: TourSession,
    store: ProgressStore,
    emitter: Emitter,
    history: SessionHistory,
    session_id: Uuid,
}

impl TourMachine {
    /// Create a machine, restoring resumable progress from `store`.
    pub fn new(catalog: StepCatalog, store: ProgressStore, emitter: Emitter) -> Self {
        let session = initial_session(store.load(), catalog.len());
        let session_id = Uuid::new_v4();

        tracing::debug!(
            session = %session_id,
            tour_id = emitter.tour_id(),
            resumable = session.has_progress,
            step = session.current_step,
            "tour session initialized"
        );

        Self {
            catalog,
            session,
            store,
            emitter,
            history: SessionHistory::bounded(HISTORY_LIMIT),
            session_id,
        }
    }

    /// Current in-memory session.
    pub fn session(&self) -> &TourSession {
        &self.session
    }

    /// Current UI mode.
    pub fn mode(&self) -> TourMode {
        self.session.mode
    }

    /// Index of the step the tour is on, or will resume at.
    pub fn current_step(&self) -> usize {
        self.session.current_step
    }

    /// True when opening the launcher resumes instead of showing the intro.
    pub fn has_progress(&self) -> bool {
        self.session.has_progress
    }

    /// Steps of this tour.
    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    /// Step under `current_step`.
    pub fn step(&self) -> Option<&TourStep> {
        self.catalog.get(self.session.current_step)
    }

    /// Applied actions of this page load, capped at [`HISTORY_LIMIT`].
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Progress store the machine persists to.
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Emitter the machine reports through.
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Random id correlating this machine's log records.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether `action` would be applied right now (pure).
    pub fn can(&self, action: TourAction) -> bool {
        transition(&self.session, action, self.catalog.len()).is_ok()
    }

    /// Render-ready snapshot of the current session.
    pub fn view(&self) -> TourView<'_> {
        TourView::of(&self.session, &self.catalog)
    }

    /// Apply an action. Invalid actions are ignored, never fatal.
    pub fn dispatch(&mut self, action: TourAction) -> StepResult {
        let applied = match transition(&self.session, action, self.catalog.len()) {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(
                    session = %self.session_id,
                    action = action.name(),
                    mode = %self.session.mode,
                    reason = %e,
                    "tour action ignored"
                );
                return StepResult::Ignored(e);
            }
        };

        self.session = applied.to;
        self.history.push(ModeTransition {
            action: action.name().to_string(),
            from: applied.from.mode,
            to: applied.to.mode,
            timestamp: Utc::now(),
        });

        for effect in &applied.effects {
            self.apply(effect);
        }

        tracing::debug!(
            session = %self.session_id,
            action = action.name(),
            from = %applied.from.mode,
            to = %applied.to.mode,
            "tour action applied"
        );

        StepResult::Transitioned(self.session.mode)
    }

    fn apply(&self, effect: &Effect) {
        match effect {
            Effect::Persist(record) => self.store.save(record),
            Effect::Emit { event, step } => self.emitter.emit(*event, Some(*step)),
        }
    }

    /// The launcher was activated: resume saved progress or show the intro.
    pub fn open_launcher(&mut self) -> StepResult {
        self.dispatch(TourAction::OpenLauncher)
    }

    /// Begin the tour at step 0 from the intro.
    pub fn start(&mut self) -> StepResult {
        self.dispatch(TourAction::Start)
    }

    /// Complete the current step; completing the last step finishes the tour.
    pub fn next(&mut self) -> StepResult {
        self.dispatch(TourAction::Next)
    }

    /// Return to the previous step. Ignored on the first step.
    pub fn back(&mut self) -> StepResult {
        self.dispatch(TourAction::Back)
    }

    /// Leave the tour, keeping it resumable.
    pub fn skip(&mut self) -> StepResult {
        self.dispatch(TourAction::Skip)
    }

    /// Close the step card, keeping the tour resumable.
    pub fn close(&mut self) -> StepResult {
        self.dispatch(TourAction::Close)
    }

    /// Decline the intro. Nothing is persisted or emitted.
    pub fn dismiss_intro(&mut self) -> StepResult {
        self.dispatch(TourAction::DismissIntro)
    }

    /// Jump to `step` while active; out-of-range targets are ignored.
    pub fn seek(&mut self, step: usize) -> StepResult {
        self.dispatch(TourAction::Seek(step))
    }

    /// Forget persisted progress and return to a fresh, closed session.
    pub fn restart(&mut self) {
        self.store.clear();
        let from = self.session.mode;
        self.session = TourSession::fresh();
        self.history.push(ModeTransition {
            action: "restart".to_string(),
            from,
            to: self.session.mode,
            timestamp: Utc::now(),
        });
        tracing::debug!(session = %self.session_id, "tour progress reset");
    }
}
