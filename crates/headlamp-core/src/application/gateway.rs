use super::model::SubmittedApplication;
use crate::error::Result;
use async_trait::async_trait;

/// The remote applications listing backend.
#[async_trait]
pub trait ApplicationsGateway: Send + Sync {
    /// Lists the applications submitted under `user_id`.
    ///
    /// A 404 or any other non-success status is "no data" and must be
    /// returned as an empty list. Only transport failures and unparseable
    /// bodies are errors.
    async fn list(&self, user_id: &str) -> Result<Vec<SubmittedApplication>>;
}
