//! Conversational session: the message dispatcher and draft submission flow.
//!
//! A `ChatSession` is constructed once per conversation and shared by
//! reference with whatever drives it. At most one chat request is in flight
//! at a time: the pending flag is checked and set under one lock
//! acquisition, with no await in between.

use headlamp_core::chat::{ChatGateway, ChatRequest, ConversationTurn, OrganizationRef, Role};
use headlamp_core::config::{DraftConfig, DraftRetention};
use headlamp_core::draft::{ApplicationDraft, DraftEditor, DraftIssue, DraftSubmission};
use headlamp_core::session::{IdentityAssignment, IdentityRepository, SessionIdentity, SessionStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Error text shown to the user for any failed chat request.
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Extra data carried by a send.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Organizations picked from the cards of an earlier reply.
    pub clicked_org_ids: Option<Vec<i64>>,
    /// A finalized draft and the organizations to apply to.
    pub submission: Option<DraftSubmission>,
}

impl SendOptions {
    pub fn clicked(ids: Vec<i64>) -> Self {
        Self {
            clicked_org_ids: Some(ids),
            submission: None,
        }
    }

    pub fn finalize(submission: DraftSubmission) -> Self {
        Self {
            clicked_org_ids: None,
            submission: Some(submission),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The reply was appended as an assistant turn.
    Delivered,
    /// The request failed; the user turn stays and the session error is set.
    Failed,
    /// Text was empty after trimming. Nothing happened.
    SkippedEmpty,
    /// Another send was in flight. Nothing happened.
    SkippedBusy,
}

/// Result of [`ChatSession::submit_draft`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The draft failed validation and was not sent.
    Invalid { editor: DraftEditor, issue: DraftIssue },
    /// The backend accepted the finalize request; a new application record
    /// is expected to appear in the listing.
    Submitted,
    /// The finalize request was skipped or failed. `retained` holds the
    /// draft when the retention policy keeps it for a retry.
    NotSubmitted {
        outcome: SendOutcome,
        retained: Option<DraftEditor>,
    },
}

struct SessionState {
    store: SessionStore,
    identity: SessionIdentity,
    /// Bumped by `reset` so replies to requests from before the reset are dropped.
    generation: u64,
}

pub struct ChatSession {
    gateway: Arc<dyn ChatGateway>,
    identity_repository: Arc<dyn IdentityRepository>,
    draft_config: DraftConfig,
    state: Mutex<SessionState>,
}

impl ChatSession {
    /// Starts a session, reading the persisted identity once.
    ///
    /// A storage failure is logged and the session starts anonymous.
    pub async fn start(
        gateway: Arc<dyn ChatGateway>,
        identity_repository: Arc<dyn IdentityRepository>,
        draft_config: DraftConfig,
    ) -> Self {
        let user_id = match identity_repository.load().await {
            Ok(user_id) => user_id,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted identity, starting anonymous");
                None
            }
        };
        tracing::info!(has_identity = user_id.is_some(), "Chat session started");

        Self {
            gateway,
            identity_repository,
            draft_config,
            state: Mutex::new(SessionState {
                store: SessionStore::new(),
                identity: SessionIdentity::new(user_id),
                generation: 0,
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn history(&self) -> Vec<ConversationTurn> {
        self.lock_state().store.history().to_vec()
    }

    pub fn len(&self) -> usize {
        self.lock_state().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().store.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.lock_state().store.is_pending()
    }

    pub fn error(&self) -> Option<String> {
        self.lock_state().store.error().map(str::to_string)
    }

    pub fn user_id(&self) -> Option<String> {
        self.lock_state().identity.user_id().map(str::to_string)
    }

    /// The draft attached to the most recent assistant turn, if it has one.
    pub fn latest_draft(&self) -> Option<ApplicationDraft> {
        let state = self.lock_state();
        state
            .store
            .history()
            .iter()
            .rev()
            .find(|turn| turn.role() == Role::Assistant)
            .and_then(|turn| turn.draft().cloned())
    }

    /// Every organization offered so far, first offer wins on duplicate ids.
    pub fn offered_organizations(&self) -> Vec<OrganizationRef> {
        let state = self.lock_state();
        let mut offered: Vec<OrganizationRef> = Vec::new();
        for org in state
            .store
            .history()
            .iter()
            .filter_map(|turn| turn.organizations())
            .flatten()
        {
            if !offered.iter().any(|known| known.id == org.id) {
                offered.push(org.clone());
            }
        }
        offered
    }

    /// Clears the conversation. The identity is kept.
    pub fn reset(&self) {
        let mut state = self.lock_state();
        state.store.reset();
        state.generation += 1;
        tracing::info!("Conversation reset");
    }

    /// Sends one user turn and waits for the reply.
    ///
    /// The user turn is appended before the request is issued and is never
    /// removed, even if the request fails.
    pub async fn send(&self, text: &str, options: SendOptions) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::SkippedEmpty;
        }

        let (request, generation) = {
            let mut state = self.lock_state();
            if state.store.is_pending() {
                tracing::debug!("Send skipped, another request is in flight");
                return SendOutcome::SkippedBusy;
            }
            state.store.set_error(None);
            state.store.append(ConversationTurn::user(message));
            state.store.set_pending(true);

            let (application_draft, do_apply) = match options.submission {
                Some(submission) => (Some(submission.draft), Some(submission.apply_to)),
                None => (None, None),
            };
            let request = ChatRequest {
                user_id: state.identity.user_id().map(str::to_string),
                message: message.to_string(),
                clicked_org_ids: options.clicked_org_ids,
                application_draft,
                do_apply,
            };
            (request, state.generation)
        };

        let guard = PendingGuard {
            session: self,
            generation,
            armed: true,
        };
        tracing::debug!(
            turns = self.len(),
            finalize = request.application_draft.is_some(),
            "Sending chat message"
        );
        let result = self.gateway.send(&request).await;

        let mut newly_assigned = None;
        let outcome = {
            let mut state = self.lock_state();
            let outcome = match result {
                Ok(response) => {
                    if let Some(offered) = response.user_id.as_deref() {
                        match state.identity.offer(offered) {
                            IdentityAssignment::Assigned => {
                                tracing::info!(user_id = offered, "Identity assigned by backend");
                                newly_assigned = Some(offered.to_string());
                            }
                            IdentityAssignment::Conflict { kept, offered } => {
                                tracing::warn!(%kept, %offered, "Backend offered a different identity, keeping the persisted one");
                            }
                            IdentityAssignment::Unchanged => {}
                        }
                    }
                    if state.generation == generation {
                        let draft = response.reviewable_draft();
                        state.store.append(ConversationTurn::assistant(
                            response.message,
                            response.orgs,
                            draft,
                        ));
                        SendOutcome::Delivered
                    } else {
                        tracing::debug!("Dropping reply to a request sent before reset");
                        SendOutcome::Failed
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Chat request failed");
                    if state.generation == generation {
                        state.store.set_error(Some(SEND_FAILED_MESSAGE.to_string()));
                    }
                    SendOutcome::Failed
                }
            };
            if state.generation == generation {
                state.store.set_pending(false);
            }
            outcome
        };
        guard.disarm();

        if let Some(user_id) = newly_assigned {
            if let Err(e) = self.identity_repository.save(&user_id).await {
                tracing::warn!(error = %e, "Failed to persist identity, keeping it for this session only");
            }
        }

        outcome
    }

    /// Validates and submits a reviewed draft.
    ///
    /// Nothing is sent when validation fails. Otherwise the finalize request
    /// goes through [`ChatSession::send`], and the draft is discarded or handed
    /// back according to the configured retention policy.
    pub async fn submit_draft(&self, editor: DraftEditor) -> SubmitOutcome {
        if let Some(issue) = editor.validation_issue() {
            return SubmitOutcome::Invalid { editor, issue };
        }
        let submission = match editor.to_submission() {
            Ok(submission) => submission,
            Err(e) => {
                tracing::warn!(error = %e, "Draft could not be converted for submission");
                return SubmitOutcome::Invalid {
                    editor,
                    issue: DraftIssue::RequiredFieldMissing,
                };
            }
        };
        tracing::info!(
            organizations = submission.apply_to.len(),
            "Submitting application draft"
        );

        let message = self.draft_config.finalize_message.clone();
        let outcome = self.send(&message, SendOptions::finalize(submission)).await;
        if outcome == SendOutcome::Delivered {
            return SubmitOutcome::Submitted;
        }

        let retained = match self.draft_config.retention {
            DraftRetention::DiscardAlways => None,
            DraftRetention::KeepOnFailure => Some(editor),
        };
        SubmitOutcome::NotSubmitted { outcome, retained }
    }
}

/// Clears the pending flag if a send future is dropped mid-request.
struct PendingGuard<'a> {
    session: &'a ChatSession,
    generation: u64,
    armed: bool,
}

impl PendingGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.session.lock_state();
        if state.generation == self.generation {
            state.store.set_pending(false);
        }
    }
}
