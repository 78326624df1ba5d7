//! Analytics sinks.
//!
//! A sink receives fully resolved events. Delivery is fire-and-forget: the
//! [`Emitter`](super::Emitter) logs a failing sink and moves on.

use super::AnalyticsEvent;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Event rejected: {0}")]
    Rejected(String),

    #[error("Sink receiver disconnected")]
    Disconnected,

    #[error("Sink panicked while delivering event")]
    Panicked,
}

/// Destination for analytics events.
pub trait EventSink: Send + Sync {
    fn deliver(&self, event: &AnalyticsEvent) -> Result<(), SinkError>;

    fn name(&self) -> &str;
}

/// Default sink: one structured `tracing` record per event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn deliver(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        tracing::info!(
            target: "onboardx::analytics",
            tour_id = %event.tour_id,
            step_id = event.step_id.as_deref().unwrap_or("-"),
            step_index = event.step_index,
            event_type = event.event_type.as_str(),
            user_id = %event.user_id,
            timestamp = %event.timestamp.to_rfc3339(),
            "[OnboardX analytics]"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

type Callback = Box<dyn Fn(&AnalyticsEvent) -> Result<(), SinkError> + Send + Sync>;

/// Forwards events to a host-supplied closure.
pub struct CallbackSink {
    callback: Callback,
}

impl CallbackSink {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&AnalyticsEvent) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(move |event| {
                callback(event);
                Ok(())
            }),
        }
    }

    /// Closure that can report its own failure.
    pub fn fallible<F>(callback: F) -> Self
    where
        F: Fn(&AnalyticsEvent) -> Result<(), SinkError> + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl EventSink for CallbackSink {
    fn deliver(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        (self.callback)(event)
    }

    fn name(&self) -> &str {
        "callback"
    }
}

/// Records every event. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    /// `(event_type, step_index)` pairs in delivery order.
    pub fn trace(&self) -> Vec<(super::EventType, usize)> {
        self.events
            .lock()
            .iter()
            .map(|e| (e.event_type, e.step_index))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for MemorySink {
    fn deliver(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Hands events to another thread, e.g. a remote analytics uploader.
///
/// Never blocks the caller: a full bounded queue drops the event.
pub struct ChannelSink {
    sender: Sender<AnalyticsEvent>,
}

impl ChannelSink {
    pub fn unbounded() -> (Self, Receiver<AnalyticsEvent>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    pub fn bounded(capacity: usize) -> (Self, Receiver<AnalyticsEvent>) {
        let (sender, receiver) = bounded(capacity);
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelSink {
    fn deliver(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        match self.sender.try_send(event.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SinkError::Rejected("queue full".into())),
            Err(TrySendError::Disconnected(_)) => Err(SinkError::Disconnected),
        }
    }

    fn name(&self) -> &str {
        "channel"
    }
}
