//! Tour configuration.
//!
//! Configuration is plain JSON; every field is optional and falls back to the
//! defaults of the built-in welcome tour.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TOUR_ID: &str = "welcome-tour";
pub const DEFAULT_USER_ID: &str = "demo-user";
pub const DEFAULT_STORAGE_KEY: &str = "onboardx_tour_state";

pub const ENV_TOUR_ID: &str = "ONBOARDX_TOUR_ID";
pub const ENV_USER_ID: &str = "ONBOARDX_USER_ID";
pub const ENV_STORAGE_DIR: &str = "ONBOARDX_STORAGE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Identity, storage, and logging settings for one tour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    /// Identifier stamped on every analytics event
    pub tour_id: String,

    /// User the events are attributed to
    pub user_id: String,

    /// Storage key of the persisted progress record
    pub storage_key: String,

    /// Directory for file-backed progress; platform data dir when unset
    pub storage_dir: Option<PathBuf>,

    /// Attach the tracing analytics sink
    pub log_events: bool,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            tour_id: DEFAULT_TOUR_ID.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: None,
            log_events: true,
        }
    }
}

impl TourConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded tour config");
        Ok(config)
    }

    /// Apply `ONBOARDX_*` environment variables on top of this config.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup; blank values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(tour_id) = get(ENV_TOUR_ID) {
            self.tour_id = tour_id;
        }
        if let Some(user_id) = get(ENV_USER_ID) {
            self.user_id = user_id;
        }
        if let Some(dir) = get(ENV_STORAGE_DIR) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        self
    }
}
