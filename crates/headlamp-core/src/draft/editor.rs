//! Working copy of a draft while the user reviews it.

use super::model::{ApplicationDraft, BackendApplicationDraft};
use crate::chat::OrganizationRef;
use crate::error::{HeadlampError, Result};
use std::fmt;

/// The first reason a draft cannot be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIssue {
    ConsentMissing,
    NoOrganizationSelected,
    RequiredFieldMissing,
}

impl fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DraftIssue::ConsentMissing => "Please review the consent agreement",
            DraftIssue::NoOrganizationSelected => {
                "Please select at least one organization to apply to."
            }
            DraftIssue::RequiredFieldMissing => "Please complete all required fields",
        };
        f.write_str(text)
    }
}

/// A validated draft ready to be sent with the finalize request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSubmission {
    pub draft: BackendApplicationDraft,
    /// Ids of the organizations to apply to (`doApply`).
    pub apply_to: Vec<i64>,
}

/// Editable copy of an [`ApplicationDraft`].
///
/// Every offered organization starts selected. The selection can only ever
/// contain ids from the originating draft.
#[derive(Debug, Clone)]
pub struct DraftEditor {
    offered: Vec<OrganizationRef>,
    selected: Vec<i64>,
    name: String,
    phone: String,
    email: Option<String>,
    summary: String,
    consent: bool,
}

impl DraftEditor {
    pub fn open(draft: &ApplicationDraft) -> Self {
        Self {
            offered: draft.orgs.clone(),
            selected: draft.orgs.iter().map(|org| org.id).collect(),
            name: draft.name.clone(),
            phone: draft.phone.clone(),
            email: draft.email.clone(),
            summary: draft.summary.clone(),
            consent: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn has_consent(&self) -> bool {
        self.consent
    }

    pub fn offered(&self) -> &[OrganizationRef] {
        &self.offered
    }

    /// Selected ids in the order they were (re)selected.
    pub fn selected_ids(&self) -> &[i64] {
        &self.selected
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email.filter(|email| !email.trim().is_empty());
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.consent = consent;
    }

    /// Flips membership of `id` in the selection and returns whether it is
    /// selected afterwards.
    ///
    /// A re-selected id goes to the end of the selection; the others keep
    /// their relative order. Ids the draft never offered are rejected.
    pub fn toggle_organization(&mut self, id: i64) -> Result<bool> {
        if !self.offered.iter().any(|org| org.id == id) {
            return Err(HeadlampError::validation(format!(
                "organization {id} was not offered for this application"
            )));
        }
        if let Some(pos) = self.selected.iter().position(|&selected| selected == id) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(id);
            Ok(true)
        }
    }

    pub fn validation_issue(&self) -> Option<DraftIssue> {
        if !self.consent {
            return Some(DraftIssue::ConsentMissing);
        }
        if self.selected.is_empty() {
            return Some(DraftIssue::NoOrganizationSelected);
        }
        let blank = |value: &str| value.trim().is_empty();
        if blank(&self.name) || blank(&self.phone) || blank(&self.summary) {
            return Some(DraftIssue::RequiredFieldMissing);
        }
        None
    }

    pub fn is_submittable(&self) -> bool {
        self.validation_issue().is_none()
    }

    /// Selected organizations in the order the backend offered them.
    pub fn selected_organizations(&self) -> Vec<OrganizationRef> {
        self.offered
            .iter()
            .filter(|org| self.selected.contains(&org.id))
            .cloned()
            .collect()
    }

    /// Translates the working copy back into the backend shape.
    ///
    /// Fails with a validation error when the draft is not submittable.
    pub fn to_submission(&self) -> Result<DraftSubmission> {
        if let Some(issue) = self.validation_issue() {
            return Err(HeadlampError::validation(issue.to_string()));
        }
        let organizations = self.selected_organizations();
        let apply_to = organizations.iter().map(|org| org.id).collect();
        Ok(DraftSubmission {
            draft: BackendApplicationDraft {
                name: self.name.trim().to_string(),
                phone: self.phone.trim().to_string(),
                email: self.email.clone(),
                summary: self.summary.trim().to_string(),
                organizations,
            },
            apply_to,
        })
    }
}
