use super::wire::{ChatRequest, ChatResponse};
use crate::error::Result;
use async_trait::async_trait;

/// The remote chat backend.
///
/// Implementations must report a non-success HTTP status, a transport
/// failure and an unparseable body all as errors; the caller treats them
/// identically.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse>;
}
