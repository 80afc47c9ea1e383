//! `reqwest` adapters for the Headlamp backend.

mod applications_gateway;
mod chat_gateway;

pub use applications_gateway::HttpApplicationsGateway;
pub use chat_gateway::HttpChatGateway;

use headlamp_core::config::HeadlampConfig;
use headlamp_core::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Builds the shared HTTP client from configuration.
pub fn build_client(config: &HeadlampConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Joins a base URL and an endpoint path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("http://localhost:8000/api", "/chat"),
            "http://localhost:8000/api/chat"
        );
        assert_eq!(
            endpoint("http://localhost:8000/api/", "applications"),
            "http://localhost:8000/api/applications"
        );
    }
}
