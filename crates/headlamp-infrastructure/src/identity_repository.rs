//! File-backed storage for the anonymous user id.
//!
//! The id lives in `identity.toml` as `user_id = "..."`.

use crate::paths::HeadlampPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use headlamp_core::error::{HeadlampError, Result};
use headlamp_core::session::IdentityRepository;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdentityRecord {
    user_id: String,
}

#[derive(Clone)]
pub struct FileIdentityRepository {
    file: Arc<AtomicTomlFile<IdentityRecord>>,
}

impl FileIdentityRepository {
    /// Uses `identity.toml` under the Headlamp config directory.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = HeadlampPaths::new(base_path).identity_file()?;
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicTomlFile<IdentityRecord>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(&file))
            .await
            .map_err(|e| HeadlampError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl IdentityRepository for FileIdentityRepository {
    async fn load(&self) -> Result<Option<String>> {
        let record = self.blocking(|file| file.load()).await?;
        Ok(record
            .map(|record| record.user_id)
            .filter(|id| !id.trim().is_empty()))
    }

    async fn save(&self, user_id: &str) -> Result<()> {
        let record = IdentityRecord {
            user_id: user_id.to_string(),
        };
        self.blocking(move |file| file.save(&record)).await?;
        tracing::debug!(path = %self.path().display(), "Persisted user identity");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| file.remove()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_without_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileIdentityRepository::new(Some(temp_dir.path())).unwrap();
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileIdentityRepository::new(Some(temp_dir.path())).unwrap();

        repo.save("user-42").await.unwrap();
        assert_eq!(repo.load().await.unwrap().as_deref(), Some("user-42"));

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("user_id = \"user-42\""));

        repo.clear().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), None);
    }
}
