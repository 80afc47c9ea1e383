use crate::error::Result;
use async_trait::async_trait;

/// Outcome of offering a server-assigned id to a [`SessionIdentity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityAssignment {
    /// The identity was empty and now holds the offered id.
    Assigned,
    /// The identity already holds the offered id.
    Unchanged,
    /// The identity holds a different id, which is kept.
    Conflict { kept: String, offered: String },
}

/// The anonymous identity the backend assigns on the first reply.
///
/// Set at most once; later offers never overwrite it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    user_id: Option<String>,
}

impl SessionIdentity {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|id| !id.trim().is_empty()),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.user_id.is_some()
    }

    /// Offers a server-assigned id. Blank ids are ignored.
    pub fn offer(&mut self, offered: &str) -> IdentityAssignment {
        if offered.trim().is_empty() {
            return IdentityAssignment::Unchanged;
        }
        match &self.user_id {
            None => {
                self.user_id = Some(offered.to_string());
                IdentityAssignment::Assigned
            }
            Some(current) if current == offered => IdentityAssignment::Unchanged,
            Some(current) => IdentityAssignment::Conflict {
                kept: current.clone(),
                offered: offered.to_string(),
            },
        }
    }
}

/// Persistent storage for the anonymous identity.
///
/// Read once when a session starts and written at most once per session.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Returns the persisted id, or `None` if nothing has been stored.
    async fn load(&self) -> Result<Option<String>>;

    async fn save(&self, user_id: &str) -> Result<()>;

    /// Removes the persisted id.
    async fn clear(&self) -> Result<()>;
}
