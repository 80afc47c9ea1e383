use crate::chat::OrganizationRef;
use serde::{Deserialize, Serialize};

/// Draft as exchanged with the backend.
///
/// Older backend revisions named the organization list `orgs`; both keys
/// are accepted on input, only `organizations` is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendApplicationDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, alias = "orgs")]
    pub organizations: Vec<OrganizationRef>,
}

/// Draft as attached to an assistant turn and opened for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub summary: String,
    /// Organizations the backend offered for this application.
    pub orgs: Vec<OrganizationRef>,
}

impl From<BackendApplicationDraft> for ApplicationDraft {
    fn from(draft: BackendApplicationDraft) -> Self {
        Self {
            name: draft.name,
            phone: draft.phone,
            email: draft.email.filter(|email| !email.trim().is_empty()),
            summary: draft.summary,
            orgs: draft.organizations,
        }
    }
}
