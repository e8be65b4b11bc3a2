//! Backend auth API, implementing the core collaborator seams.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use credo_core::{
    ApiKey, ApiUrl, BearerToken, CredentialError, Error, ExchangeError, Identity, ProfileLoader,
    ProviderBridge, Result, TransportError,
};

use crate::client::RestClient;
use crate::endpoints::{
    API_KEY_HEADER, API_KEY_PROBE, CodeExchangeRequest, DataEnvelope, LOGIN, LoginRequest,
    PROFILE, PROVIDER_CALLBACK, TokenGrant,
};

/// The backend's authentication surface.
///
/// One instance serves as both the profile loader and the provider
/// bridge for a session controller, and additionally offers password
/// login and the API-key probe.
#[derive(Debug, Clone)]
pub struct AuthApi {
    client: RestClient,
    project_id: Option<String>,
}

impl AuthApi {
    /// Create an API client for the given base URL.
    pub fn new(base: ApiUrl) -> Self {
        Self {
            client: RestClient::new(base),
            project_id: None,
        }
    }

    /// Attach a tenant/project identifier to login and exchange calls.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Returns the base URL this API client talks to.
    pub fn base(&self) -> &ApiUrl {
        self.client.base()
    }

    /// Log in with email and password, returning the issued bearer token.
    ///
    /// # Errors
    ///
    /// A 2xx response without an `accessToken` field is a malformed
    /// response, distinct from a transport failure or rejection.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login_password(&self, email: &str, password: &str) -> Result<BearerToken> {
        let request = LoginRequest {
            email,
            password,
            project_id: self.project_id.as_deref(),
        };

        let envelope: DataEnvelope<TokenGrant> = self.client.post_json(LOGIN, &request).await?;

        let token = envelope
            .data
            .and_then(|grant| grant.access_token)
            .ok_or(Error::MalformedResponse {
                field: "accessToken",
            })?;

        debug!("password login issued a bearer token");
        Ok(BearerToken::new(token))
    }

    /// Check whether the backend accepts an API key.
    ///
    /// Probes a protected endpoint with the key attached; any failure,
    /// transport included, reads as "not accepted".
    #[instrument(skip(self, key))]
    pub async fn probe_api_key(&self, key: &ApiKey) -> bool {
        match self
            .client
            .get_status_with_header(API_KEY_PROBE, API_KEY_HEADER, key.as_str())
            .await
        {
            Ok(status) => (200..300).contains(&status),
            Err(err) => {
                warn!(error = %err, "api-key probe failed");
                false
            }
        }
    }
}

#[async_trait]
impl ProfileLoader for AuthApi {
    #[instrument(skip(self, token))]
    async fn fetch_profile(&self, token: &BearerToken) -> Result<Identity> {
        let fetched: Result<DataEnvelope<Identity>> =
            self.client.get_authed(PROFILE, token.as_str()).await;

        match fetched {
            Ok(envelope) => envelope
                .data
                .ok_or(Error::Credential(CredentialError::MissingProfile)),
            Err(Error::Transport(TransportError::Status(status)))
                if status.is_unauthorized() =>
            {
                Err(CredentialError::Rejected {
                    status: status.status,
                }
                .into())
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl ProviderBridge for AuthApi {
    #[instrument(skip(self, code))]
    async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> std::result::Result<BearerToken, ExchangeError> {
        if code.is_empty() {
            return Err(ExchangeError::MissingCode);
        }

        let request = CodeExchangeRequest {
            code,
            redirect_uri,
            project_id: self.project_id.as_deref(),
        };

        let envelope: DataEnvelope<TokenGrant> = self
            .client
            .post_json(PROVIDER_CALLBACK, &request)
            .await
            .map_err(|err| ExchangeError::Remote {
                message: err.to_string(),
            })?;

        envelope
            .data
            .and_then(|grant| grant.access_token)
            .map(BearerToken::new)
            .ok_or(ExchangeError::MissingAccessToken)
    }
}
