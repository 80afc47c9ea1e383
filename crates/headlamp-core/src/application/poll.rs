//! State machine for confirming that a submission reached the backend.
//!
//! The backend does not return the id of the record a submission creates,
//! so the client compares listing snapshots against a baseline. The
//! baseline is the last successful listing the caller already holds; when
//! there is none, the first successful fetch of the polling session becomes
//! the baseline and is never itself checked for new records. A record that
//! lands before that first fetch is therefore absorbed into the baseline
//! and the session ends in `TimedOut`.
//!
//! Timing is supplied by the caller so the machine stays pure.

use super::model::SubmittedApplication;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Polling,
    Found,
    TimedOut,
    Cancelled,
}

impl PollPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollPhase::Polling)
    }
}

/// Result of feeding one successful fetch to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// No baseline existed; this fetch became the baseline.
    BaselineCaptured,
    /// Nothing new yet.
    Unchanged,
    /// These ids were absent from the baseline.
    Found(Vec<String>),
    /// The tracker already reached a terminal phase.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PollTracker {
    baseline: Option<HashSet<String>>,
    timeout: Duration,
    phase: PollPhase,
}

impl PollTracker {
    pub fn new(known: Option<&[SubmittedApplication]>, timeout: Duration) -> Self {
        Self {
            baseline: known.map(|apps| apps.iter().map(|app| app.id.clone()).collect()),
            timeout,
            phase: PollPhase::Polling,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn observe(&mut self, fetched: &[SubmittedApplication]) -> PollStep {
        if self.phase.is_terminal() {
            return PollStep::Ignored;
        }
        let Some(baseline) = &self.baseline else {
            self.baseline = Some(fetched.iter().map(|app| app.id.clone()).collect());
            return PollStep::BaselineCaptured;
        };
        let new_ids: Vec<String> = fetched
            .iter()
            .filter(|app| !baseline.contains(&app.id))
            .map(|app| app.id.clone())
            .collect();
        if new_ids.is_empty() {
            PollStep::Unchanged
        } else {
            self.phase = PollPhase::Found;
            PollStep::Found(new_ids)
        }
    }

    /// Moves to `TimedOut` once `elapsed` has reached the timeout.
    ///
    /// Returns `true` if this call performed the transition.
    pub fn check_deadline(&mut self, elapsed: Duration) -> bool {
        if self.phase == PollPhase::Polling && elapsed >= self.timeout {
            self.phase = PollPhase::TimedOut;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.phase == PollPhase::Polling {
            self.phase = PollPhase::Cancelled;
        }
    }
}
