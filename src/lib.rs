//! OnboardX: a product-onboarding tour state machine
//!
//! OnboardX walks a user through a fixed sequence of guided steps, remembers
//! how far they got, and reports every transition as an analytics event.
//! Rendering is left to the host; this crate owns the rules.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - **Core**: step catalog, session, guards, and history ([`core`])
//! - **Transitions**: a pure function from session + action to new session +
//!   effects ([`effects::transition`])
//! - **Shell**: [`TourMachine`] applies effects against a best-effort
//!   [`progress`] store and an [`analytics`] emitter
//!
//! # Example
//!
//! ```rust
//! use onboardx::analytics::{EventType, MemorySink};
//! use onboardx::core::TourMode;
//! use onboardx::presets;
//! use onboardx::progress::MemoryStorage;
//!
//! let storage = MemoryStorage::new();
//! let events = MemorySink::new();
//!
//! let mut tour = presets::welcome_tour()
//!     .storage(storage.clone())
//!     .sink(events.clone())
//!     .build()
//!     .unwrap();
//!
//! tour.open_launcher();
//! tour.start();
//! tour.next();
//! tour.close();
//! assert_eq!(tour.mode(), TourMode::Closed);
//!
//! // A new page load resumes where the user left off.
//! let mut reloaded = presets::welcome_tour().storage(storage).build().unwrap();
//! reloaded.open_launcher();
//! assert_eq!(reloaded.mode(), TourMode::Active(1));
//!
//! assert_eq!(events.events()[0].event_type, EventType::TourStarted);
//! ```

pub mod analytics;
pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod presets;
pub mod progress;
pub mod view;
pub mod widget;

// Re-export commonly used types
pub use analytics::{AnalyticsEvent, Emitter, EventSink, EventType};
pub use builder::{BuildError, TourBuilder};
pub use config::TourConfig;
pub use core::{StepCatalog, TourMode, TourSession, TourStep};
pub use effects::{StepResult, TourAction, TourMachine};
pub use progress::{ProgressRecord, ProgressStore};
pub use view::TourView;
