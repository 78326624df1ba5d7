//! Lifecycle and analytics events.
//!
//! Every state transition reports what happened through an [`Emitter`], which
//! resolves the step, stamps the event, and fans it out to the configured
//! sinks. Sinks cannot fail the caller.

use crate::core::StepCatalog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};

mod sink;

pub use sink::{CallbackSink, ChannelSink, EventSink, LogSink, MemorySink, SinkError};

/// Kinds of tour events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    TourStarted,
    TourResumed,
    TourCompleted,
    TourSkipped,
    TourClosed,
    StepStarted,
    StepCompleted,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TourStarted => "tour_started",
            Self::TourResumed => "tour_resumed",
            Self::TourCompleted => "tour_completed",
            Self::TourSkipped => "tour_skipped",
            Self::TourClosed => "tour_closed",
            Self::StepStarted => "step_started",
            Self::StepCompleted => "step_completed",
        }
    }
}

/// Structured event handed to sinks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub tour_id: String,
    pub step_id: Option<String>,
    /// Always within `[0, len - 1]`
    pub step_index: usize,
    pub event_type: EventType,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Builds events for one tour and delivers them to every sink.
///
/// # Example
///
/// ```rust
/// use onboardx::analytics::{Emitter, EventType, MemorySink};
/// use onboardx::core::{StepCatalog, TourStep};
///
/// let catalog = StepCatalog::new(vec![
///     TourStep::new("a", "A", "first"),
///     TourStep::new("b", "B", "second"),
/// ])
/// .unwrap();
/// let sink = MemorySink::new();
/// let emitter = Emitter::new("welcome-tour", "demo-user", &catalog).with_sink(sink.clone());
///
/// emitter.emit(EventType::StepStarted, Some(9));
///
/// let event = &sink.events()[0];
/// assert_eq!(event.step_index, 1);
/// assert_eq!(event.step_id.as_deref(), Some("b"));
/// ```
pub struct Emitter {
    tour_id: String,
    user_id: String,
    step_ids: Vec<String>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Emitter {
    /// Emitter with no sinks attached.
    pub fn new(
        tour_id: impl Into<String>,
        user_id: impl Into<String>,
        catalog: &StepCatalog,
    ) -> Self {
        Self {
            tour_id: tour_id.into(),
            user_id: user_id.into(),
            step_ids: catalog.iter().map(|s| s.id.clone()).collect(),
            sinks: Vec::new(),
        }
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn tour_id(&self) -> &str {
        &self.tour_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Resolve an event without delivering it.
    ///
    /// A missing index means step 0; any index is clamped into the catalog.
    pub fn event(&self, event_type: EventType, step_index: Option<usize>) -> AnalyticsEvent {
        let last = self.step_ids.len().saturating_sub(1);
        let index = step_index.unwrap_or(0).min(last);

        AnalyticsEvent {
            tour_id: self.tour_id.clone(),
            step_id: self.step_ids.get(index).cloned(),
            step_index: index,
            event_type,
            user_id: self.user_id.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Deliver an event to every sink. Failures stay here.
    pub fn emit(&self, event_type: EventType, step_index: Option<usize>) {
        let event = self.event(event_type, step_index);

        for sink in &self.sinks {
            let outcome = catch_unwind(AssertUnwindSafe(|| sink.deliver(&event)))
                .unwrap_or(Err(SinkError::Panicked));

            if let Err(e) = outcome {
                tracing::warn!(
                    sink = sink.name(),
                    event_type = event.event_type.as_str(),
                    error = %e,
                    "analytics sink failed"
                );
            }
        }
    }
}
