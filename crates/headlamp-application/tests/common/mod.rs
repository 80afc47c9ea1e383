#![allow(dead_code)]

use async_trait::async_trait;
use headlamp_core::application::{ApplicationsGateway, SubmittedApplication};
use headlamp_core::chat::{ChatGateway, ChatRequest, ChatResponse, OrganizationRef, WireDraft};
use headlamp_core::draft::{ApplicationDraft, BackendApplicationDraft};
use headlamp_core::session::IdentityRepository;
use headlamp_core::{HeadlampError, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// Mock ChatGateway: replays scripted replies and records every request
pub struct MockChatGateway {
    replies: Mutex<VecDeque<Result<ChatResponse>>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl MockChatGateway {
    pub fn new(replies: Vec<Result<ChatResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Every request blocks until `gate` is notified.
    pub fn gated(replies: Vec<Result<ChatResponse>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatGateway for MockChatGateway {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HeadlampError::transport("no scripted reply")))
    }
}

// Mock IdentityRepository backed by memory
#[derive(Default)]
pub struct MockIdentityRepository {
    stored: Mutex<Option<String>>,
    saves: AtomicUsize,
    fail_load: bool,
    fail_save: bool,
}

impl MockIdentityRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_identity(user_id: &str) -> Self {
        Self {
            stored: Mutex::new(Some(user_id.to_string())),
            ..Self::default()
        }
    }

    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.stored.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityRepository for MockIdentityRepository {
    async fn load(&self) -> Result<Option<String>> {
        if self.fail_load {
            return Err(HeadlampError::Io {
                message: "permission denied".to_string(),
            });
        }
        Ok(self.stored())
    }

    async fn save(&self, user_id: &str) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_save {
            return Err(HeadlampError::Io {
                message: "disk full".to_string(),
            });
        }
        *self.stored.lock().unwrap() = Some(user_id.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

// Mock ApplicationsGateway: pops scripted listings, repeating the last one
pub struct MockApplicationsGateway {
    listings: Mutex<VecDeque<Result<Vec<SubmittedApplication>>>>,
    calls: AtomicUsize,
    hang: bool,
}

impl MockApplicationsGateway {
    pub fn new(listings: Vec<Result<Vec<SubmittedApplication>>>) -> Self {
        Self {
            listings: Mutex::new(listings.into()),
            calls: AtomicUsize::new(0),
            hang: false,
        }
    }

    /// Every request stays in flight forever.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApplicationsGateway for MockApplicationsGateway {
    async fn list(&self, _user_id: &str) -> Result<Vec<SubmittedApplication>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        let mut listings = self.listings.lock().unwrap();
        if listings.len() > 1 {
            listings.pop_front().unwrap()
        } else {
            listings.front().cloned().unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}

pub fn app(id: &str) -> SubmittedApplication {
    SubmittedApplication {
        id: id.to_string(),
        user_id: Some("u-1".to_string()),
        organization_id: 1,
        urgent: false,
        content: None,
        submitted_at: "2025-03-01T10:00:00".to_string(),
        opened_at: None,
        accepted_at: None,
        denied_at: None,
    }
}

pub fn apps(ids: &[&str]) -> Vec<SubmittedApplication> {
    ids.iter().map(|id| app(id)).collect()
}

pub fn ids(applications: &[SubmittedApplication]) -> Vec<&str> {
    applications.iter().map(|a| a.id.as_str()).collect()
}

pub fn reply(user_id: &str, message: &str) -> Result<ChatResponse> {
    Ok(ChatResponse {
        user_id: Some(user_id.to_string()),
        message: message.to_string(),
        orgs: None,
        application_draft: None,
    })
}

pub fn organizations() -> Vec<OrganizationRef> {
    vec![
        OrganizationRef::new(1, "Harbor Shelter", "Emergency beds"),
        OrganizationRef::new(2, "Eastside Pantry", "Weekly groceries"),
        OrganizationRef::new(3, "Tenant Legal Aid", "Eviction defense"),
    ]
}

pub fn reply_with_orgs(user_id: &str, message: &str) -> Result<ChatResponse> {
    let mut response = reply(user_id, message)?;
    response.orgs = Some(organizations());
    Ok(response)
}

pub fn backend_draft() -> BackendApplicationDraft {
    BackendApplicationDraft {
        name: "Jordan Reyes".to_string(),
        phone: "555-0142".to_string(),
        email: None,
        summary: "Lost housing after a rent increase".to_string(),
        organizations: organizations(),
    }
}

pub fn draft() -> ApplicationDraft {
    ApplicationDraft::from(backend_draft())
}

pub fn reply_with_draft(user_id: &str) -> Result<ChatResponse> {
    let mut response = reply(user_id, "Here is a draft for you to review")?;
    response.application_draft = Some(WireDraft::Structured(backend_draft()));
    Ok(response)
}
