//! Application layer for Headlamp.
//!
//! Use cases that coordinate the domain types in `headlamp-core` with the
//! gateways and repositories supplied by the caller:
//!
//! - [`ChatSession`]: sends user turns, merges replies, submits drafts
//! - [`ApplicationsView`]: the applications listing and its confirmation poller

pub mod applications_view;
pub mod chat_session;
pub mod listing;
pub mod submission_poller;

pub use applications_view::ApplicationsView;
pub use chat_session::{ChatSession, SEND_FAILED_MESSAGE, SendOptions, SendOutcome, SubmitOutcome};
pub use listing::{Listing, ListingSnapshot};
pub use submission_poller::{PollHandle, PollOutcome, SubmissionPoller};
