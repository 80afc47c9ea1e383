use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a submitted application, derived from its timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Submitted,
    Opened,
    Accepted,
    Denied,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::Opened => "Opened",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Denied => "Denied",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record from `GET /applications`.
///
/// Timestamps are kept as the backend sent them; the backend does not
/// guarantee an offset, so parsing is left to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedApplication {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub organization_id: i64,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub content: Option<String>,
    pub submitted_at: String,
    #[serde(default)]
    pub opened_at: Option<String>,
    #[serde(default)]
    pub accepted_at: Option<String>,
    #[serde(default)]
    pub denied_at: Option<String>,
}

impl SubmittedApplication {
    /// Most terminal state first: Denied, Accepted, Opened, Submitted.
    pub fn status(&self) -> ApplicationStatus {
        let present = |ts: &Option<String>| ts.as_deref().is_some_and(|s| !s.trim().is_empty());
        if present(&self.denied_at) {
            ApplicationStatus::Denied
        } else if present(&self.accepted_at) {
            ApplicationStatus::Accepted
        } else if present(&self.opened_at) {
            ApplicationStatus::Opened
        } else {
            ApplicationStatus::Submitted
        }
    }
}
