use crate::listing::{Listing, ListingSnapshot};
use crate::submission_poller::{PollHandle, SubmissionPoller};
use headlamp_core::application::{ApplicationsGateway, SubmittedApplication};
use headlamp_core::config::PollConfig;
use std::sync::Arc;

/// The user's submitted applications, as one screen would show them.
///
/// Fetch failures never surface as errors here: the listing degrades to
/// empty and the cause is logged.
pub struct ApplicationsView {
    gateway: Arc<dyn ApplicationsGateway>,
    user_id: Option<String>,
    poller: SubmissionPoller,
    listing: Listing,
}

impl ApplicationsView {
    pub fn new(
        gateway: Arc<dyn ApplicationsGateway>,
        user_id: Option<String>,
        poll: PollConfig,
    ) -> Self {
        let poller = SubmissionPoller::new(Arc::clone(&gateway), poll);
        Self {
            gateway,
            user_id: user_id.filter(|id| !id.trim().is_empty()),
            poller,
            listing: Listing::new(),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        self.listing.snapshot()
    }

    /// Fetches the listing and displays it.
    ///
    /// Without an identity nothing is requested. On failure the displayed
    /// list is emptied and the last successful listing is kept as the
    /// polling baseline.
    pub async fn load(&self) -> Vec<SubmittedApplication> {
        let Some(user_id) = self.user_id.as_deref() else {
            tracing::debug!("No identity, skipping applications fetch");
            self.listing.lock().displayed.clear();
            return Vec::new();
        };

        match self.gateway.list(user_id).await {
            Ok(applications) => {
                tracing::debug!(count = applications.len(), "Applications loaded");
                self.listing.lock().record_success(applications.clone());
                applications
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load applications, showing none");
                self.listing.lock().displayed.clear();
                Vec::new()
            }
        }
    }

    /// Starts watching for a newly submitted application.
    ///
    /// Returns `None` when there is no identity to list applications for.
    pub fn start_polling(&self) -> Option<PollHandle> {
        let user_id = self.user_id.as_deref()?;
        Some(self.poller.start(user_id, self.listing.clone()))
    }
}
