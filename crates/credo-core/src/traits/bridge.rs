//! Identity-provider bridge trait.

use async_trait::async_trait;

use crate::credential::BearerToken;
use crate::error::ExchangeError;

/// Performs the authorization-code exchange with the external identity
/// provider and normalizes the response into a bearer token.
///
/// Extracting the code from the redirect is the caller's job (see
/// [`crate::provider::extract_code`]); the bridge only exchanges it.
#[async_trait]
pub trait ProviderBridge: Send + Sync {
    /// Exchange an authorization code for a bearer token.
    ///
    /// # Errors
    ///
    /// Fails with [`ExchangeError`] when the remote call rejects, when
    /// no code is supplied, or when the response omits the access token.
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<BearerToken, ExchangeError>;
}
