//! Session state snapshot.

use credo_core::{CredentialKind, Identity, LoginMode};

/// A point-in-time view of the session.
///
/// Snapshots are committed atomically by the controller; readers always
/// observe the last-committed state, never a partial transition.
///
/// Invariant: `is_authenticated()` is true if and only if
/// `credential_kind() != CredentialKind::None`, and a bearer session
/// always carries a fetched identity while an API-key session carries
/// the synthesized placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub(crate) is_authenticated: bool,
    pub(crate) identity: Option<Identity>,
    pub(crate) credential_kind: CredentialKind,
    pub(crate) login_mode: LoginMode,
    pub(crate) loading: bool,
    pub(crate) last_error: Option<String>,
}

impl SessionSnapshot {
    /// Whether a credential is active and its identity resolved.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// The identity of the authenticated session, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Which credential kind is active.
    pub fn credential_kind(&self) -> CredentialKind {
        self.credential_kind
    }

    /// The login method the UI currently intends to use.
    pub fn login_mode(&self) -> LoginMode {
        self.login_mode
    }

    /// Whether an operation with a network suspension point is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Human-readable message from the last failed operation, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            is_authenticated: false,
            identity: None,
            credential_kind: CredentialKind::None,
            login_mode: LoginMode::Password,
            loading: false,
            last_error: None,
        }
    }
}
