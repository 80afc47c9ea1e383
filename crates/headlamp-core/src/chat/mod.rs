//! Chat domain module.
//!
//! # Module Structure
//!
//! - `turn`: Conversation turn types (`Role`, `ConversationTurn`)
//! - `organization`: Backend-sourced organization references
//! - `wire`: Request/response schemas of the `POST /chat` endpoint
//! - `gateway`: Trait for the remote chat backend

mod gateway;
mod organization;
mod turn;
pub mod wire;

pub use gateway::ChatGateway;
pub use organization::OrganizationRef;
pub use turn::{ConversationTurn, Role};
pub use wire::{ChatRequest, ChatResponse, WireDraft};
