//! Profile loader trait.

use async_trait::async_trait;

use crate::Result;
use crate::credential::BearerToken;
use crate::identity::Identity;

/// Resolves a bearer token into the identity record it belongs to.
///
/// Implementations call the backend's profile endpoint. Failures are
/// never retried by callers; a failed fetch invalidates the token.
#[async_trait]
pub trait ProfileLoader: Send + Sync {
    /// Fetch the identity for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns a credential error when the token is rejected or no
    /// profile exists for it, and a transport error when the backend
    /// is unreachable.
    async fn fetch_profile(&self, token: &BearerToken) -> Result<Identity>;
}
