//! Configuration service implementation.
//!
//! Loads [`HeadlampConfig`] from `config.toml` in the Headlamp config
//! directory. A missing file yields the defaults; `HEADLAMP_API_URL`
//! overrides the base URL from the file.

use crate::paths::HeadlampPaths;
use crate::storage::AtomicTomlFile;
use headlamp_core::config::HeadlampConfig;
use headlamp_core::error::{HeadlampError, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const API_URL_ENV: &str = "HEADLAMP_API_URL";

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        Ok(Self {
            path: HeadlampPaths::new(base_path).config_file()?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file only, without environment overrides.
    pub fn load_file(&self) -> Result<HeadlampConfig> {
        let file = AtomicTomlFile::<HeadlampConfig>::new(self.path.clone());
        let config = file.load().map_err(|e| {
            HeadlampError::config(format!(
                "Failed to load configuration at {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(config.unwrap_or_default())
    }

    /// Reads the file and applies environment overrides.
    pub fn load(&self) -> Result<HeadlampConfig> {
        apply_overrides(self.load_file()?, env::var(API_URL_ENV).ok())
    }
}

/// Applies the `HEADLAMP_API_URL` value, if any, and validates the result.
/// A blank value is ignored.
fn apply_overrides(mut config: HeadlampConfig, api_url: Option<String>) -> Result<HeadlampConfig> {
    if let Some(url) = api_url.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
        tracing::info!("{API_URL_ENV} set, using API base URL: {url}");
        config.api_base_url = url.to_string();
    }
    if config.poll.interval_ms == 0 {
        return Err(HeadlampError::config("poll.interval_ms must be greater than zero"));
    }
    Ok(config)
}
