use super::endpoint;
use async_trait::async_trait;
use headlamp_core::chat::{ChatGateway, ChatRequest, ChatResponse};
use headlamp_core::error::{HeadlampError, Result};
use reqwest::Client;

/// `POST {base}/chat` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatGateway {
    client: Client,
    base_url: String,
}

impl HttpChatGateway {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = endpoint(&self.base_url, "chat");
        tracing::debug!(
            %url,
            has_user_id = request.user_id.is_some(),
            has_draft = request.application_draft.is_some(),
            "POST chat"
        );

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            return Err(HeadlampError::api(status, text));
        }

        let body = resp.text().await?;
        let response: ChatResponse = serde_json::from_str(&body)?;
        Ok(response)
    }
}
