//! Session domain module.
//!
//! # Module Structure
//!
//! - `store`: Ordered conversation history plus in-flight status (`SessionStore`)
//! - `identity`: Anonymous server-assigned identity (`SessionIdentity`) and its
//!   persistence interface (`IdentityRepository`)

mod identity;
mod store;

pub use identity::{IdentityAssignment, IdentityRepository, SessionIdentity};
pub use store::SessionStore;
