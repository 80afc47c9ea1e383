//! Infrastructure adapters for the Headlamp client.
//!
//! HTTP gateways for the chat and applications endpoints, file-backed
//! identity storage, configuration loading and platform paths.

pub mod config_service;
pub mod http;
pub mod identity_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http::{HttpApplicationsGateway, HttpChatGateway};
pub use crate::identity_repository::FileIdentityRepository;
pub use crate::paths::HeadlampPaths;
