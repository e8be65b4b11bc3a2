//! Identity records.

use serde::{Deserialize, Serialize};

/// Fixed email used for the synthesized API-key identity.
pub const API_KEY_PLACEHOLDER_EMAIL: &str = "api-key@local";

/// Permission set granted to API-key sessions without server confirmation.
const API_KEY_PLACEHOLDER_PERMISSIONS: &[&str] =
    &["delete:user", "create:asset", "edit:asset", "create:report"];

/// The identity record associated with an authenticated session.
///
/// For bearer sessions this is fetched from the profile endpoint and
/// owned by the session controller; for API-key sessions a static
/// elevated placeholder is synthesized locally instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account email address.
    pub email: String,
    /// Granted permissions, in the order the backend reports them.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Identity {
    /// Create an identity record.
    pub fn new(email: impl Into<String>, permissions: Vec<String>) -> Self {
        Self {
            email: email.into(),
            permissions,
        }
    }

    /// The synthesized identity for API-key sessions.
    ///
    /// API-key holders are treated as fully privileged without server
    /// confirmation; no profile fetch happens for this credential kind.
    pub fn api_key_placeholder() -> Self {
        Self {
            email: API_KEY_PLACEHOLDER_EMAIL.to_string(),
            permissions: API_KEY_PLACEHOLDER_PERMISSIONS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    /// Check whether a permission was granted.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// Derive a display role from the permission set.
    pub fn role(&self) -> &'static str {
        if self.has_permission("delete:user") {
            "Project Admin"
        } else if self.has_permission("create:asset") {
            "Project Manager"
        } else if self.has_permission("edit:asset") {
            "Engineer"
        } else {
            "Viewer"
        }
    }
}
