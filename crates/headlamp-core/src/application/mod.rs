//! Submitted application domain module.
//!
//! # Module Structure
//!
//! - `model`: Records returned by the listing endpoint and their derived status
//! - `gateway`: Trait for the remote applications listing backend
//! - `poll`: State machine detecting a newly created record

mod gateway;
mod model;
mod poll;

pub use gateway::ApplicationsGateway;
pub use model::{ApplicationStatus, SubmittedApplication};
pub use poll::{PollPhase, PollStep, PollTracker};
