//! Domain layer for the Headlamp intake client.
//!
//! This crate holds the conversation model, the two application-draft
//! schemas and the mapping between them, the session store, the anonymous
//! session identity, submitted applications, and the polling state machine
//! used to confirm a submission. It performs no I/O; network and storage
//! collaborators are expressed as traits implemented by
//! `headlamp-infrastructure`.

pub mod application;
pub mod chat;
pub mod config;
pub mod draft;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::{HeadlampError, Result};
