//! Tour state machine.
//!
//! The machine is split in two:
//!
//! - [`transition`] is the pure core. It takes the current session and an
//!   action and returns the next session plus a list of [`Effect`]s.
//! - [`TourMachine`] is the imperative shell. It owns the session, applies
//!   effects against the progress store and analytics emitter, and records
//!   history.
//!
//! All operations are synchronous and run to completion. None of them can
//! fail the caller: an action that is invalid for the current mode comes back
//! as [`StepResult::Ignored`].

mod machine;
mod transition;

pub use machine::{StepResult, TourMachine, HISTORY_LIMIT};
pub use transition::{initial_session, transition, Effect, TourAction, Transition, TransitionError};
