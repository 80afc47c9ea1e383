//! Background task that waits for a submitted application to show up in
//! the listing.
//!
//! Each successful fetch replaces the displayed listing. The task stops on
//! the first new id, when the deadline passes, or when its handle is
//! cancelled or dropped. Failed fetches are logged and retried on the next
//! tick.

use crate::listing::Listing;
use headlamp_core::application::{
    ApplicationsGateway, PollPhase, PollStep, PollTracker, SubmittedApplication,
};
use headlamp_core::config::PollConfig;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// New records appeared; `applications` is the listing that contained them.
    Found {
        new_ids: Vec<String>,
        applications: Vec<SubmittedApplication>,
    },
    /// The deadline passed; `applications` is the last successful listing.
    TimedOut {
        applications: Vec<SubmittedApplication>,
    },
    Cancelled,
}

#[derive(Clone)]
pub struct SubmissionPoller {
    gateway: Arc<dyn ApplicationsGateway>,
    config: PollConfig,
}

impl SubmissionPoller {
    pub fn new(gateway: Arc<dyn ApplicationsGateway>, config: PollConfig) -> Self {
        Self { gateway, config }
    }

    /// Spawns a polling session for `user_id` that writes into `listing`.
    ///
    /// The baseline is taken from `listing`'s last successful fetch and the
    /// phase is `Polling` by the time this returns. Must be called inside a
    /// tokio runtime.
    pub fn start(&self, user_id: impl Into<String>, listing: Listing) -> PollHandle {
        let token = CancellationToken::new();
        let tracker = {
            let mut state = listing.lock();
            state.phase = Some(PollPhase::Polling);
            PollTracker::new(state.last_successful.as_deref(), self.config.timeout())
        };
        tracing::info!(
            baseline = tracker.has_baseline(),
            timeout_ms = self.config.timeout_ms,
            "Submission polling started"
        );

        let task = tokio::spawn(run(
            Arc::clone(&self.gateway),
            user_id.into(),
            self.config.clone(),
            tracker,
            listing.clone(),
            token.clone(),
        ));
        PollHandle {
            token,
            task,
            listing,
        }
    }
}

/// Owner of a running polling session. Dropping it cancels the session.
pub struct PollHandle {
    token: CancellationToken,
    task: JoinHandle<PollOutcome>,
    listing: Listing,
}

impl PollHandle {
    /// Stops the session. Once this returns the task will not touch the
    /// listing again.
    pub fn cancel(&self) {
        self.token.cancel();
        // Waits out a mutation that is already under way.
        let mut state = self.listing.lock();
        if state.phase == Some(PollPhase::Polling) {
            state.phase = Some(PollPhase::Cancelled);
            tracing::info!("Submission polling cancelled");
        }
    }

    /// Waits for the session to end. Dropping this future cancels it.
    pub async fn wait(mut self) -> PollOutcome {
        match (&mut self.task).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(error = %e, "Polling task ended abnormally");
                PollOutcome::Cancelled
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            self.cancel();
        }
    }
}

async fn run(
    gateway: Arc<dyn ApplicationsGateway>,
    user_id: String,
    config: PollConfig,
    mut tracker: PollTracker,
    listing: Listing,
    token: CancellationToken,
) -> PollOutcome {
    let started = Instant::now();
    let deadline = started + config.timeout();

    loop {
        // `None` means the deadline passed while the fetch was in flight.
        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => return PollOutcome::Cancelled,
            _ = sleep_until(deadline) => None,
            result = gateway.list(&user_id) => Some(result),
        };

        if let Some(outcome) = apply_tick(&listing, &token, &mut tracker, fetched, started) {
            return outcome;
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        tokio::select! {
            biased;
            _ = token.cancelled() => return PollOutcome::Cancelled,
            _ = sleep(config.interval().min(remaining)) => {}
        }
    }
}

/// Applies one fetch result to the listing under its lock. Returns the
/// outcome once the session has ended.
fn apply_tick(
    listing: &Listing,
    token: &CancellationToken,
    tracker: &mut PollTracker,
    fetched: Option<headlamp_core::Result<Vec<SubmittedApplication>>>,
    started: Instant,
) -> Option<PollOutcome> {
    let mut state = listing.lock();
    if token.is_cancelled() {
        return Some(PollOutcome::Cancelled);
    }

    match fetched {
        Some(Ok(applications)) => match tracker.observe(&applications) {
            PollStep::Found(new_ids) => {
                tracing::info!(
                    new_ids = ?new_ids,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Submitted application found"
                );
                state.record_success(applications.clone());
                state.phase = Some(PollPhase::Found);
                return Some(PollOutcome::Found {
                    new_ids,
                    applications,
                });
            }
            step => {
                tracing::debug!(step = ?step, count = applications.len(), "Poll tick");
                state.record_success(applications);
            }
        },
        Some(Err(e)) => {
            tracing::debug!(error = %e, "Poll tick failed, retrying");
        }
        None => {}
    }

    if tracker.check_deadline(started.elapsed()) {
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Submission polling timed out"
        );
        state.phase = Some(PollPhase::TimedOut);
        return Some(PollOutcome::TimedOut {
            applications: state.displayed.clone(),
        });
    }
    None
}
