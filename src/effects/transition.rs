//! Pure tour transitions.
//!
//! [`transition`] maps a session and an action to the next session plus the
//! ordered list of side effects the shell must perform. It never touches
//! storage or sinks, so every rule can be tested without either.

use crate::analytics::EventType;
use crate::core::{Guard, TourMode, TourSession};
use crate::progress::ProgressRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User or host input to the tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "step", rename_all = "snake_case")]
pub enum TourAction {
    /// The launcher bubble was activated
    OpenLauncher,
    Start,
    Next,
    Back,
    Skip,
    Close,
    DismissIntro,
    /// Programmatic jump to a step
    Seek(usize),
}

impl TourAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenLauncher => "open_launcher",
            Self::Start => "start",
            Self::Next => "next",
            Self::Back => "back",
            Self::Skip => "skip",
            Self::Close => "close",
            Self::DismissIntro => "dismiss_intro",
            Self::Seek(_) => "seek",
        }
    }

    /// Modes from which this action may run.
    pub fn precondition(&self) -> Guard<TourMode> {
        match self {
            Self::OpenLauncher => Guard::new(|m: &TourMode| !m.is_open()),
            Self::Start | Self::DismissIntro => {
                Guard::new(|m: &TourMode| matches!(m, TourMode::IntroShown))
            }
            Self::Next | Self::Back | Self::Skip | Self::Close | Self::Seek(_) => {
                Guard::new(|m: &TourMode| m.active_step().is_some())
            }
        }
    }
}

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Persist(ProgressRecord),
    Emit { event: EventType, step: usize },
}

impl Effect {
    fn emit(event: EventType, step: usize) -> Self {
        Self::Emit { event, step }
    }
}

/// Why an action was not applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("'{action}' is not available while {mode}")]
    NotAvailable {
        action: &'static str,
        mode: TourMode,
    },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Step {requested} is outside a tour of {len} steps")]
    OutOfRange { requested: usize, len: usize },
}

/// Result of a successful transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: TourSession,
    pub to: TourSession,
    /// Effects in the order they must be applied
    pub effects: Vec<Effect>,
}

/// Session a fresh page load starts from.
///
/// Only a valid, non-completed record is resumable; anything else starts
/// over at step 0.
pub fn initial_session(record: Option<ProgressRecord>, step_count: usize) -> TourSession {
    match record {
        Some(r) if r.is_resumable() && r.current_step < step_count => {
            TourSession::resumable(r.current_step)
        }
        _ => TourSession::fresh(),
    }
}

/// Compute the next session and its effects.
pub fn transition(
    session: &TourSession,
    action: TourAction,
    step_count: usize,
) -> Result<Transition, TransitionError> {
    if step_count == 0 {
        return Err(TransitionError::OutOfRange {
            requested: session.current_step,
            len: 0,
        });
    }

    if !action.precondition().check(&session.mode) {
        return Err(TransitionError::NotAvailable {
            action: action.name(),
            mode: session.mode,
        });
    }

    let last = step_count - 1;
    // Guards above ensure Active for step-level actions; clamp keeps a
    // hand-built inconsistent session in bounds.
    let active = session
        .mode
        .active_step()
        .unwrap_or(session.current_step)
        .min(last);

    let (to, effects) = match action {
        TourAction::OpenLauncher if session.has_progress => {
            let step = session.current_step.min(last);
            (
                TourSession {
                    mode: TourMode::Active(step),
                    current_step: step,
                    has_progress: true,
                },
                vec![
                    Effect::emit(EventType::TourResumed, step),
                    Effect::emit(EventType::StepStarted, step),
                ],
            )
        }
        TourAction::OpenLauncher => (
            TourSession {
                mode: TourMode::IntroShown,
                ..*session
            },
            Vec::new(),
        ),
        TourAction::Start => (
            TourSession {
                mode: TourMode::Active(0),
                current_step: 0,
                has_progress: true,
            },
            vec![
                Effect::Persist(ProgressRecord::at(0)),
                Effect::emit(EventType::TourStarted, 0),
                Effect::emit(EventType::StepStarted, 0),
            ],
        ),
        TourAction::Next if active == last => (
            TourSession {
                mode: TourMode::Closed,
                current_step: last,
                has_progress: false,
            },
            vec![
                Effect::emit(EventType::StepCompleted, active),
                Effect::emit(EventType::TourCompleted, active),
                Effect::Persist(ProgressRecord::finished(last)),
            ],
        ),
        TourAction::Next => {
            let next = active + 1;
            (
                TourSession {
                    mode: TourMode::Active(next),
                    current_step: next,
                    has_progress: true,
                },
                vec![
                    Effect::emit(EventType::StepCompleted, active),
                    Effect::emit(EventType::StepStarted, next),
                    Effect::Persist(ProgressRecord::at(next)),
                ],
            )
        }
        TourAction::Back => {
            if active == 0 {
                return Err(TransitionError::AtFirstStep);
            }
            let previous = active - 1;
            (
                TourSession {
                    mode: TourMode::Active(previous),
                    current_step: previous,
                    has_progress: true,
                },
                vec![
                    Effect::emit(EventType::StepStarted, previous),
                    Effect::Persist(ProgressRecord::at(previous)),
                ],
            )
        }
        TourAction::Skip | TourAction::Close => {
            let event = if action == TourAction::Skip {
                EventType::TourSkipped
            } else {
                EventType::TourClosed
            };
            (
                TourSession {
                    mode: TourMode::Closed,
                    current_step: active,
                    has_progress: true,
                },
                vec![
                    Effect::emit(event, active),
                    Effect::Persist(ProgressRecord::at(active)),
                ],
            )
        }
        TourAction::DismissIntro => (
            TourSession {
                mode: TourMode::Closed,
                ..*session
            },
            Vec::new(),
        ),
        TourAction::Seek(target) => {
            if target >= step_count {
                return Err(TransitionError::OutOfRange {
                    requested: target,
                    len: step_count,
                });
            }
            (
                TourSession {
                    mode: TourMode::Active(target),
                    current_step: target,
                    has_progress: true,
                },
                vec![
                    Effect::emit(EventType::StepStarted, target),
                    Effect::Persist(ProgressRecord::at(target)),
                ],
            )
        }
    };

    Ok(Transition {
        from: *session,
        to,
        effects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: usize = 5;

    fn active(step: usize) -> TourSession {
        TourSession {
            mode: TourMode::Active(step),
            current_step: step,
            has_progress: true,
        }
    }

    fn intro() -> TourSession {
        TourSession {
            mode: TourMode::IntroShown,
            ..TourSession::fresh()
        }
    }

    #[test]
    fn initial_session_resumes_open_record() {
        let session = initial_session(Some(ProgressRecord::at(3)), STEPS);
        assert_eq!(session, TourSession::resumable(3));
    }

    #[test]
    fn initial_session_ignores_completed_record() {
        let session = initial_session(Some(ProgressRecord::finished(4)), STEPS);
        assert_eq!(session, TourSession::fresh());
    }

    #[test]
    fn initial_session_ignores_out_of_range_record() {
        let session = initial_session(Some(ProgressRecord::at(9)), STEPS);
        assert_eq!(session, TourSession::fresh());
    }

    #[test]
    fn launcher_without_progress_shows_intro() {
        let t = transition(&TourSession::fresh(), TourAction::OpenLauncher, STEPS).unwrap();
        assert_eq!(t.to.mode, TourMode::IntroShown);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn launcher_with_progress_resumes() {
        let t = transition(&TourSession::resumable(2), TourAction::OpenLauncher, STEPS).unwrap();

        assert_eq!(t.to.mode, TourMode::Active(2));
        assert_eq!(
            t.effects,
            vec![
                Effect::emit(EventType::TourResumed, 2),
                Effect::emit(EventType::StepStarted, 2),
            ]
        );
    }

    #[test]
    fn launcher_is_ignored_while_open() {
        for session in [intro(), active(1)] {
            let result = transition(&session, TourAction::OpenLauncher, STEPS);
            assert!(matches!(result, Err(TransitionError::NotAvailable { .. })));
        }
    }

    #[test]
    fn start_resets_to_first_step() {
        let session = TourSession {
            mode: TourMode::IntroShown,
            current_step: 3,
            has_progress: false,
        };
        let t = transition(&session, TourAction::Start, STEPS).unwrap();

        assert_eq!(t.to, active(0));
        assert_eq!(
            t.effects,
            vec![
                Effect::Persist(ProgressRecord::at(0)),
                Effect::emit(EventType::TourStarted, 0),
                Effect::emit(EventType::StepStarted, 0),
            ]
        );
    }

    #[test]
    fn start_requires_intro() {
        let result = transition(&TourSession::fresh(), TourAction::Start, STEPS);
        assert_eq!(
            result,
            Err(TransitionError::NotAvailable {
                action: "start",
                mode: TourMode::Closed
            })
        );
    }

    #[test]
    fn next_advances_mid_tour() {
        let t = transition(&active(1), TourAction::Next, STEPS).unwrap();

        assert_eq!(t.to, active(2));
        assert_eq!(
            t.effects,
            vec![
                Effect::emit(EventType::StepCompleted, 1),
                Effect::emit(EventType::StepStarted, 2),
                Effect::Persist(ProgressRecord::at(2)),
            ]
        );
    }

    #[test]
    fn next_on_last_step_completes() {
        let t = transition(&active(4), TourAction::Next, STEPS).unwrap();

        assert_eq!(t.to.mode, TourMode::Closed);
        assert!(!t.to.has_progress);
        assert_eq!(
            t.effects,
            vec![
                Effect::emit(EventType::StepCompleted, 4),
                Effect::emit(EventType::TourCompleted, 4),
                Effect::Persist(ProgressRecord::finished(4)),
            ]
        );
    }

    #[test]
    fn next_requires_active() {
        let closed = TourSession::fresh();
        assert!(transition(&closed, TourAction::Next, STEPS).is_err());
        assert!(transition(&intro(), TourAction::Next, STEPS).is_err());
    }

    #[test]
    fn back_moves_to_previous_step() {
        let t = transition(&active(3), TourAction::Back, STEPS).unwrap();

        assert_eq!(t.to, active(2));
        assert_eq!(
            t.effects,
            vec![
                Effect::emit(EventType::StepStarted, 2),
                Effect::Persist(ProgressRecord::at(2)),
            ]
        );
    }

    #[test]
    fn back_on_first_step_is_rejected() {
        assert_eq!(
            transition(&active(0), TourAction::Back, STEPS),
            Err(TransitionError::AtFirstStep)
        );
    }

    #[test]
    fn skip_and_close_keep_progress() {
        for (action, event) in [
            (TourAction::Skip, EventType::TourSkipped),
            (TourAction::Close, EventType::TourClosed),
        ] {
            let t = transition(&active(2), action, STEPS).unwrap();
            let expected = vec![
                Effect::emit(event, 2),
                Effect::Persist(ProgressRecord::at(2)),
            ];

            assert_eq!(t.to, TourSession::resumable(2));
            assert_eq!(t.effects, expected);
        }
    }

    #[test]
    fn dismiss_intro_has_no_effects() {
        let t = transition(&intro(), TourAction::DismissIntro, STEPS).unwrap();
        assert_eq!(t.to, TourSession::fresh());
        assert!(t.effects.is_empty());
    }

    #[test]
    fn seek_within_range() {
        let t = transition(&active(0), TourAction::Seek(3), STEPS).unwrap();
        assert_eq!(t.to, active(3));
        assert_eq!(
            t.effects,
            vec![
                Effect::emit(EventType::StepStarted, 3),
                Effect::Persist(ProgressRecord::at(3)),
            ]
        );
    }

    #[test]
    fn seek_out_of_range_is_rejected() {
        assert_eq!(
            transition(&active(0), TourAction::Seek(5), STEPS),
            Err(TransitionError::OutOfRange {
                requested: 5,
                len: 5
            })
        );
    }

    #[test]
    fn inconsistent_active_index_is_clamped() {
        let session = TourSession {
            mode: TourMode::Active(42),
            current_step: 42,
            has_progress: true,
        };
        let t = transition(&session, TourAction::Close, STEPS).unwrap();
        assert_eq!(t.to.current_step, 4);
    }

    #[test]
    fn empty_tour_rejects_everything() {
        let result = transition(&TourSession::fresh(), TourAction::OpenLauncher, 0);
        let err = result.unwrap_err();
        assert!(matches!(err, TransitionError::OutOfRange { len: 0, .. }));
    }

    #[test]
    fn action_serializes_with_tag() {
        let json = serde_json::to_string(&TourAction::Seek(2)).unwrap();
        assert_eq!(json, r#"{"action":"seek","step":2}"#);
        let json = serde_json::to_string(&TourAction::Next).unwrap();
        assert_eq!(json, r#"{"action":"next"}"#);
    }
}
