//! Client configuration model.
//!
//! Every field has a default so a missing or partial `config.toml` is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_FINALIZE_MESSAGE: &str = "Submit my application";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HeadlampConfig {
    /// Base URL the `/chat` and `/applications` paths are appended to.
    pub api_base_url: String,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub request_timeout_secs: Option<u64>,
    pub poll: PollConfig,
    pub draft: DraftConfig,
}

impl Default for HeadlampConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: None,
            poll: PollConfig::default(),
            draft: DraftConfig::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 800,
            timeout_ms: 8000,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// What happens to the draft under review when the finalize request fails.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DraftRetention {
    /// Close the review whatever the outcome.
    #[default]
    DiscardAlways,
    /// Hand the draft back after a failed request so it can be retried.
    KeepOnFailure,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DraftConfig {
    pub retention: DraftRetention,
    /// Text of the user turn that accompanies a finalized draft.
    pub finalize_message: String,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            retention: DraftRetention::default(),
            finalize_message: DEFAULT_FINALIZE_MESSAGE.to_string(),
        }
    }
}
