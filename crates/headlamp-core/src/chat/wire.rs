//! Request/response schemas of the `POST /chat` endpoint.
//!
//! These types mirror the backend's JSON exactly (including its camelCase
//! keys). Everything the backend may leave out is an explicit `Option`, and
//! absent options are omitted on the way out rather than sent as `null`.

use super::organization::OrganizationRef;
use crate::draft::{ApplicationDraft, BackendApplicationDraft};
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub message: String,
    /// Organizations the user picked from the cards of a previous reply.
    #[serde(rename = "clickedOrgIds", skip_serializing_if = "Option::is_none")]
    pub clicked_org_ids: Option<Vec<i64>>,
    /// A finalized draft being submitted.
    #[serde(rename = "applicationDraft", skip_serializing_if = "Option::is_none")]
    pub application_draft: Option<BackendApplicationDraft>,
    /// Organizations the finalized draft should be sent to.
    #[serde(rename = "doApply", skip_serializing_if = "Option::is_none")]
    pub do_apply: Option<Vec<i64>>,
}

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub user_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub orgs: Option<Vec<OrganizationRef>>,
    #[serde(rename = "applicationDraft", default)]
    pub application_draft: Option<WireDraft>,
}

/// The draft attached to a chat response.
///
/// Backend revisions have sent either a structured draft (with the
/// organization list under `organizations` or `orgs`) or a bare string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WireDraft {
    Structured(BackendApplicationDraft),
    Text(String),
}

impl ChatResponse {
    /// Maps the attached draft into the shape the review flow edits.
    ///
    /// A bare-string draft has no organizations to apply to, so it cannot be
    /// reviewed and yields `None`.
    pub fn reviewable_draft(&self) -> Option<ApplicationDraft> {
        match &self.application_draft {
            Some(WireDraft::Structured(draft)) => Some(ApplicationDraft::from(draft.clone())),
            Some(WireDraft::Text(text)) => {
                tracing::warn!(
                    len = text.len(),
                    "Ignoring unstructured application draft from backend"
                );
                None
            }
            None => None,
        }
    }
}
