use super::endpoint;
use async_trait::async_trait;
use headlamp_core::application::{ApplicationsGateway, SubmittedApplication};
use headlamp_core::error::Result;
use reqwest::Client;

/// `GET {base}/applications?user_id=...` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApplicationsGateway {
    client: Client,
    base_url: String,
}

impl HttpApplicationsGateway {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ApplicationsGateway for HttpApplicationsGateway {
    async fn list(&self, user_id: &str) -> Result<Vec<SubmittedApplication>> {
        let url = endpoint(&self.base_url, "applications");
        let resp = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // 404 and every other failure status mean "nothing to show"
            tracing::debug!(status = status.as_u16(), "Listing unavailable, treating as empty");
            return Ok(Vec::new());
        }

        let body = resp.text().await?;
        let applications: Vec<SubmittedApplication> = serde_json::from_str(&body)?;
        Ok(applications)
    }
}
