use anyhow::Result;
use headlamp_application::{ApplicationsView, ChatSession};
use headlamp_core::application::ApplicationsGateway;
use headlamp_core::chat::ChatGateway;
use headlamp_core::config::HeadlampConfig;
use headlamp_core::session::IdentityRepository;
use headlamp_infrastructure::http::build_client;
use headlamp_infrastructure::{
    ConfigService, FileIdentityRepository, HeadlampPaths, HttpApplicationsGateway, HttpChatGateway,
};
use std::path::Path;
use std::sync::Arc;

pub const LOG_FILE: &str = "headlamp.log";

/// Everything a command needs, wired once at startup.
pub struct AppContext {
    pub paths: HeadlampPaths,
    pub config: HeadlampConfig,
    pub identity_repository: Arc<FileIdentityRepository>,
    chat_gateway: Arc<dyn ChatGateway>,
    applications_gateway: Arc<dyn ApplicationsGateway>,
}

impl AppContext {
    pub fn load(home: Option<&Path>) -> Result<Self> {
        let paths = HeadlampPaths::new(home);
        let config = ConfigService::new(home)?.load()?;
        let client = build_client(&config)?;

        Ok(Self {
            identity_repository: Arc::new(FileIdentityRepository::new(home)?),
            chat_gateway: Arc::new(HttpChatGateway::new(
                client.clone(),
                config.api_base_url.clone(),
            )),
            applications_gateway: Arc::new(HttpApplicationsGateway::new(
                client,
                config.api_base_url.clone(),
            )),
            paths,
            config,
        })
    }

    pub async fn start_session(&self) -> ChatSession {
        let repository: Arc<dyn IdentityRepository> = self.identity_repository.clone();
        ChatSession::start(
            Arc::clone(&self.chat_gateway),
            repository,
            self.config.draft.clone(),
        )
        .await
    }

    pub fn applications_view(&self, user_id: Option<String>) -> ApplicationsView {
        ApplicationsView::new(
            Arc::clone(&self.applications_gateway),
            user_id,
            self.config.poll.clone(),
        )
    }
}
