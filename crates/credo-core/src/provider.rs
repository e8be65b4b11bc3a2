//! Identity-provider redirect helpers.
//!
//! The authorization-code exchange itself is the bridge's job; these
//! helpers cover the two pure steps around it: building the outbound
//! authorization URL, and pulling the returned code (or error) out of
//! the redirect the provider sends back.

use url::Url;

use crate::error::ExchangeError;

/// Default scope requested from the identity provider.
pub const DEFAULT_SCOPE: &str = "openid profile email User.Read";

/// Settings for the external identity provider's authorize endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// The provider's authorize endpoint.
    pub authorize_endpoint: Url,
    /// OAuth client identifier.
    pub client_id: String,
    /// Where the provider redirects back to.
    pub redirect_uri: String,
    /// Requested scopes, space separated.
    pub scope: String,
}

impl ProviderConfig {
    /// Configuration for a Microsoft identity platform tenant.
    pub fn microsoft(
        tenant: &str,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Result<Self, ExchangeError> {
        let endpoint = format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/authorize",
            tenant
        );
        let authorize_endpoint = Url::parse(&endpoint).map_err(|e| ExchangeError::Remote {
            message: format!("invalid authorize endpoint: {}", e),
        })?;

        Ok(Self {
            authorize_endpoint,
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
        })
    }
}

/// Build the authorization URL the user agent is sent to.
///
/// `state` is a caller-generated random value appended for CSRF
/// protection. The returned state is not verified anywhere on the way
/// back; see DESIGN.md.
pub fn authorization_url(config: &ProviderConfig, state: &str) -> Url {
    let mut url = config.authorize_endpoint.clone();
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_mode", "fragment")
        .append_pair("scope", &config.scope)
        .append_pair("state", state);
    url
}

/// Extract the authorization code from a provider redirect.
///
/// The provider may place `code` (or `error`/`error_description`) in
/// either the query string or the fragment; both locations are checked,
/// query first. A returned error parameter wins over a returned code.
pub fn extract_code(redirect: &Url) -> Result<String, ExchangeError> {
    let query = collect_params(redirect.query());
    let fragment = collect_params(redirect.fragment());

    let lookup = |key: &str| {
        query
            .iter()
            .chain(fragment.iter())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    if let Some(error) = lookup("error") {
        return Err(ExchangeError::Provider {
            error,
            description: lookup("error_description"),
        });
    }

    lookup("code").ok_or(ExchangeError::MissingCode)
}

fn collect_params(raw: Option<&str>) -> Vec<(String, String)> {
    match raw {
        Some(raw) => url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        None => Vec::new(),
    }
}
