//! Embeddable widget adapter.
//!
//! A host page hands over its steps and an optional event callback and gets
//! back a handle that owns one tour. The widget shares the tour machine with
//! the in-app tour but keeps progress in memory only and reports a reduced
//! event set to the host.
//!
//! # Example
//!
//! ```rust
//! use onboardx::core::{TourMode, TourStep};
//! use onboardx::widget::{self, WidgetConfig, WidgetEvent};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&seen);
//!
//! let config = WidgetConfig::new(vec![
//!     TourStep::new("hi", "Hi", "Let's do a quick tour."),
//!     TourStep::new("end", "Done", "Enjoy!"),
//! ])
//! .on_event(move |e: &WidgetEvent| log.lock().unwrap().push(e.clone()));
//!
//! let mut handle = widget::init(config).unwrap();
//! assert_eq!(handle.mode(), TourMode::IntroShown);
//!
//! handle.start();
//! handle.next();
//! handle.next();
//! assert!(seen.lock().unwrap().contains(&WidgetEvent::TourCompleted));
//! handle.dispose();
//! ```

use crate::analytics::{AnalyticsEvent, EventSink, EventType, SinkError};
use crate::builder::{BuildError, TourBuilder};
use crate::core::{TourMode, TourStep};
use crate::effects::{StepResult, TourAction, TourMachine};
use crate::progress::MemoryStorage;
use crate::view::TourView;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use uuid::Uuid;

pub const WIDGET_TOUR_ID: &str = "onboardx-widget";
const WIDGET_STORAGE_KEY: &str = "onboardx_widget_state";

/// Events reported to the host page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// Fired once from `init`; Unix time in milliseconds
    WidgetLoaded { timestamp: i64 },
    TourStarted { step: usize },
    StepStarted { step: usize },
    TourCompleted,
}

impl WidgetEvent {
    /// Reduce a full analytics event; types outside the widget set map to `None`.
    pub fn from_analytics(event: &AnalyticsEvent) -> Option<Self> {
        let step = event.step_index;
        match event.event_type {
            EventType::TourStarted => Some(Self::TourStarted { step }),
            EventType::StepStarted => Some(Self::StepStarted { step }),
            EventType::TourCompleted => Some(Self::TourCompleted),
            _ => None,
        }
    }
}

pub type WidgetCallback = Arc<dyn Fn(&WidgetEvent) + Send + Sync>;

/// What the host page provides.
#[derive(Clone)]
pub struct WidgetConfig {
    pub steps: Vec<TourStep>,
    pub on_event: Option<WidgetCallback>,
}

impl WidgetConfig {
    pub fn new(steps: Vec<TourStep>) -> Self {
        Self {
            steps,
            on_event: None,
        }
    }

    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(&WidgetEvent) + Send + Sync + 'static,
    {
        self.on_event = Some(Arc::new(callback));
        self
    }
}

struct WidgetSink {
    callback: WidgetCallback,
}

impl EventSink for WidgetSink {
    fn deliver(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        if let Some(widget_event) = WidgetEvent::from_analytics(event) {
            (self.callback)(&widget_event);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "widget"
    }
}

/// Handle to one mounted widget. Dropping or disposing it tears the tour down.
pub struct WidgetHandle {
    id: Uuid,
    machine: TourMachine,
}

/// Mount a widget: validate the steps, announce `widget_loaded`, open the intro.
pub fn init(config: WidgetConfig) -> Result<WidgetHandle, BuildError> {
    let mut builder = TourBuilder::new()
        .steps(config.steps)
        .tour_id(WIDGET_TOUR_ID)
        .storage_key(WIDGET_STORAGE_KEY)
        .storage(MemoryStorage::without_write_log())
        .log_events(false);

    if let Some(callback) = &config.on_event {
        builder = builder.sink(WidgetSink {
            callback: Arc::clone(callback),
        });
    }

    let mut machine = builder.build()?;
    let id = Uuid::new_v4();

    if let Some(callback) = &config.on_event {
        let loaded = WidgetEvent::WidgetLoaded {
            timestamp: Utc::now().timestamp_millis(),
        };
        if catch_unwind(AssertUnwindSafe(|| callback(&loaded))).is_err() {
            tracing::warn!(widget = %id, "widget event callback panicked");
        }
    }

    machine.open_launcher();
    tracing::debug!(widget = %id, steps = machine.catalog().len(), "widget mounted");

    Ok(WidgetHandle { id, machine })
}

impl WidgetHandle {
    /// Identifier used in this widget's log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> TourMode {
        self.machine.mode()
    }

    /// Snapshot for rendering the current card.
    pub fn view(&self) -> TourView<'_> {
        self.machine.view()
    }

    /// The underlying machine, for history and catalog access.
    pub fn machine(&self) -> &TourMachine {
        &self.machine
    }

    /// Apply any action. Invalid ones come back as `StepResult::Ignored`
    /// and leave the widget untouched.
    pub fn dispatch(&mut self, action: TourAction) -> StepResult {
        self.machine.dispatch(action)
    }

    /// The floating bubble was clicked.
    pub fn open_launcher(&mut self) -> StepResult {
        self.machine.open_launcher()
    }

    /// "Start tour" on the intro card.
    pub fn start(&mut self) -> StepResult {
        self.machine.start()
    }

    /// Advance, or finish on the last step.
    pub fn next(&mut self) -> StepResult {
        self.machine.next()
    }

    pub fn back(&mut self) -> StepResult {
        self.machine.back()
    }

    pub fn skip(&mut self) -> StepResult {
        self.machine.skip()
    }

    pub fn close(&mut self) -> StepResult {
        self.machine.close()
    }

    /// "Maybe later" on the intro card.
    pub fn dismiss_intro(&mut self) -> StepResult {
        self.machine.dismiss_intro()
    }

    /// Unmount the widget.
    pub fn dispose(self) {
        tracing::debug!(widget = %self.id, "widget disposed");
    }
}
