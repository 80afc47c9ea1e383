//! Application draft domain module.
//!
//! Two schemas exist for the same concept: the backend's
//! [`BackendApplicationDraft`] and the review shape [`ApplicationDraft`].
//! The only inbound mapping is `From<BackendApplicationDraft>`; the only
//! outbound mapping is [`DraftEditor::to_submission`].

mod editor;
mod model;

pub use editor::{DraftEditor, DraftIssue, DraftSubmission};
pub use model::{ApplicationDraft, BackendApplicationDraft};
