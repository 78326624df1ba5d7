//! Builder API for ergonomic tour construction.
//!
//! # Example
//!
//! ```
//! use onboardx::builder::TourBuilder;
//! use onboardx::core::{TourMode, TourStep};
//! use onboardx::progress::MemoryStorage;
//!
//! let mut tour = TourBuilder::new()
//!     .steps(vec![
//!         TourStep::new("hello", "Hello", "Welcome aboard"),
//!         TourStep::new("bye", "Bye", "All done"),
//!     ])
//!     .storage(MemoryStorage::new())
//!     .build()
//!     .unwrap();
//!
//! tour.open_launcher();
//! tour.start();
//! assert_eq!(tour.mode(), TourMode::Active(0));
//! ```

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::TourBuilder;
