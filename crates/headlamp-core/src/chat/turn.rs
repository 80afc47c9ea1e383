//! Conversation turn types.

use super::organization::OrganizationRef;
use crate::draft::ApplicationDraft;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the person seeking help.
    User,
    /// Reply produced by the backend agent.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the visible conversation.
///
/// Turns are immutable once appended to a session. Fields are private so a
/// turn obtained from the history cannot be edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    id: String,
    role: Role,
    content: String,
    organizations: Option<Vec<OrganizationRef>>,
    draft: Option<ApplicationDraft>,
    /// Timestamp when the turn was created (ISO 8601 format).
    created_at: String,
}

impl ConversationTurn {
    /// Creates a user turn carrying only text.
    pub fn user(content: impl Into<String>) -> Self {
        Self::build(Role::User, content.into(), None, None)
    }

    /// Creates an assistant turn.
    ///
    /// An empty organization list is stored as `None` so callers only need
    /// to check one condition before rendering organization cards.
    pub fn assistant(
        content: impl Into<String>,
        organizations: Option<Vec<OrganizationRef>>,
        draft: Option<ApplicationDraft>,
    ) -> Self {
        let organizations = organizations.filter(|orgs| !orgs.is_empty());
        Self::build(Role::Assistant, content.into(), organizations, draft)
    }

    fn build(
        role: Role,
        content: String,
        organizations: Option<Vec<OrganizationRef>>,
        draft: Option<ApplicationDraft>,
    ) -> Self {
        Self {
            // v7 ids are time-ordered, which is all the ordering we need
            id: uuid::Uuid::now_v7().to_string(),
            role,
            content,
            organizations,
            draft,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn organizations(&self) -> Option<&[OrganizationRef]> {
        self.organizations.as_deref()
    }

    pub fn draft(&self) -> Option<&ApplicationDraft> {
        self.draft.as_ref()
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }
}
