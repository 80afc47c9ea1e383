use serde::{Deserialize, Serialize};

/// A partner organization suggested by the backend.
///
/// Ids are unique within a single response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl OrganizationRef {
    pub fn new(id: i64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}
