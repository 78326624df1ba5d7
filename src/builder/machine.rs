//! Builder for constructing tour machines.

use crate::analytics::{Emitter, EventSink, LogSink};
use crate::builder::error::BuildError;
use crate::config::TourConfig;
use crate::core::{StepCatalog, TourStep};
use crate::effects::TourMachine;
use crate::progress::{FileStorage, MemoryStorage, ProgressStore, Storage};

/// Builder for constructing a [`TourMachine`] with a fluent API.
///
/// Without an explicit storage backend the builder persists to files under
/// `config.storage_dir`, or the platform data directory, and falls back to
/// in-memory storage when neither exists.
pub struct TourBuilder {
    steps: Option<Vec<TourStep>>,
    catalog: Option<StepCatalog>,
    config: TourConfig,
    storage: Option<Box<dyn Storage>>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl TourBuilder {
    pub fn new() -> Self {
        Self {
            steps: None,
            catalog: None,
            config: TourConfig::default(),
            storage: None,
            sinks: Vec::new(),
        }
    }

    /// Set the steps (required unless `.catalog()` is used).
    pub fn steps(mut self, steps: Vec<TourStep>) -> Self {
        self.steps = Some(steps);
        self.catalog = None;
        self
    }

    /// Use an already validated catalog.
    pub fn catalog(mut self, catalog: StepCatalog) -> Self {
        self.catalog = Some(catalog);
        self.steps = None;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TourConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tour_id(mut self, tour_id: impl Into<String>) -> Self {
        self.config.tour_id = tour_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.config.user_id = user_id.into();
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Toggle the tracing analytics sink.
    pub fn log_events(mut self, enabled: bool) -> Self {
        self.config.log_events = enabled;
        self
    }

    /// Set the storage backend for progress records.
    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Add an analytics sink.
    pub fn sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Build the machine, loading any resumable progress.
    pub fn build(self) -> Result<TourMachine, BuildError> {
        let catalog = match (self.catalog, self.steps) {
            (Some(catalog), _) => catalog,
            (None, Some(steps)) => StepCatalog::new(steps)?,
            (None, None) => return Err(BuildError::MissingSteps),
        };

        if self.config.tour_id.trim().is_empty() {
            return Err(BuildError::BlankTourId);
        }
        if self.config.storage_key.trim().is_empty() {
            return Err(BuildError::BlankStorageKey);
        }

        let storage = match self.storage {
            Some(storage) => storage,
            None => default_storage(&self.config),
        };
        let store = ProgressStore::from_boxed(storage, &self.config.storage_key, catalog.len());

        let mut emitter = Emitter::new(&self.config.tour_id, &self.config.user_id, &catalog);
        if self.config.log_events {
            emitter.add_sink(Box::new(LogSink));
        }
        for sink in self.sinks {
            emitter.add_sink(sink);
        }

        Ok(TourMachine::new(catalog, store, emitter))
    }
}

impl Default for TourBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_storage(config: &TourConfig) -> Box<dyn Storage> {
    if let Some(dir) = &config.storage_dir {
        return Box::new(FileStorage::new(dir));
    }
    match FileStorage::at_default_location() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "no durable storage, tour progress will not survive restarts"
            );
            Box::new(MemoryStorage::without_write_log())
        }
    }
}
