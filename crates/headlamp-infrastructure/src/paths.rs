//! Unified path management for Headlamp files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/headlamp/          # Config directory
//! ├── config.toml              # Client configuration
//! └── identity.toml            # Persisted anonymous user id
//!
//! ~/.local/share/headlamp/     # Data directory
//! └── logs/
//!     └── headlamp.log
//! ```
//!
//! When a base directory is given (tests, `--home`), both trees live
//! directly under it instead.

use headlamp_core::error::{HeadlampError, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "headlamp";

#[derive(Debug, Clone, Default)]
pub struct HeadlampPaths {
    base: Option<PathBuf>,
}

impl HeadlampPaths {
    /// Creates a resolver. `None` uses the platform directories.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| HeadlampError::config("Cannot find config directory"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| HeadlampError::config("Cannot find data directory"))
    }

    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn identity_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("identity.toml"))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_roots_every_path() {
        let base = PathBuf::from("/tmp/headlamp-test");
        let paths = HeadlampPaths::new(Some(&base));
        assert_eq!(paths.config_file().unwrap(), base.join("config.toml"));
        assert_eq!(paths.identity_file().unwrap(), base.join("identity.toml"));
        assert_eq!(paths.log_dir().unwrap(), base.join("logs"));
    }
}
