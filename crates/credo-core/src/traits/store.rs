//! Credential storage trait.

use crate::credential::{ApiKey, BearerToken, Credential, CredentialKind};

/// Mutually exclusive storage for the active credential.
///
/// Exactly one of bearer token / API key may be stored at any time:
/// setting one kind atomically evicts the other. Writes complete
/// synchronously, so a read in the same task observes them.
///
/// Implementations own no business logic; validation, expiry checks,
/// and lifecycle decisions belong to the session controller.
pub trait CredentialStore: Send + Sync {
    /// Store a bearer token, evicting any stored API key.
    fn set_bearer(&self, token: &BearerToken);

    /// Store an API key, evicting any stored bearer token.
    fn set_api_key(&self, key: &ApiKey);

    /// The stored bearer token, if any.
    fn bearer(&self) -> Option<BearerToken>;

    /// The stored API key, if any.
    fn api_key(&self) -> Option<ApiKey>;

    /// Evict both slots.
    fn clear_all(&self);

    /// Which credential kind is present.
    ///
    /// Bearer takes precedence if both slots are somehow populated
    /// (cannot happen through this API, but external stores can be
    /// edited by hand; the answer is deterministic either way).
    fn current_kind(&self) -> CredentialKind {
        if self.bearer().is_some() {
            CredentialKind::Bearer
        } else if self.api_key().is_some() {
            CredentialKind::ApiKey
        } else {
            CredentialKind::None
        }
    }

    /// The stored credential as a tagged value, if any.
    fn current(&self) -> Option<Credential> {
        if let Some(token) = self.bearer() {
            Some(Credential::Bearer(token))
        } else {
            self.api_key().map(Credential::ApiKey)
        }
    }
}
