use headlamp_core::application::{PollPhase, SubmittedApplication};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub(crate) struct ListingState {
    pub(crate) displayed: Vec<SubmittedApplication>,
    pub(crate) last_successful: Option<Vec<SubmittedApplication>>,
    pub(crate) phase: Option<PollPhase>,
}

impl ListingState {
    pub(crate) fn record_success(&mut self, applications: Vec<SubmittedApplication>) {
        self.displayed = applications.clone();
        self.last_successful = Some(applications);
    }
}

/// Point-in-time copy of what the applications view displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub applications: Vec<SubmittedApplication>,
    /// Phase of the most recent polling session, `None` if none has run.
    pub phase: Option<PollPhase>,
}

impl ListingSnapshot {
    pub fn is_polling(&self) -> bool {
        self.phase == Some(PollPhase::Polling)
    }
}

/// Displayed listing shared between a view and its poller.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    inner: Arc<Mutex<ListingState>>,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let state = self.lock();
        ListingSnapshot {
            applications: state.displayed.clone(),
            phase: state.phase,
        }
    }

    pub fn last_successful(&self) -> Option<Vec<SubmittedApplication>> {
        self.lock().last_successful.clone()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ListingState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
