//! Credential types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A bearer token presented on each request to prove identity.
///
/// Observed as a three-segment dot-delimited structure with an embedded
/// expiration claim; treated as opaque everywhere except the token clock.
///
/// # Security
///
/// Never logged or displayed in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Create a new bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing requests. Never log this value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the token is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide token value in Debug output
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken").field(&"[REDACTED]").finish()
    }
}

/// A static credential string granting elevated access without
/// per-request identity resolution.
///
/// # Security
///
/// Never logged or displayed in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key value for use in request headers.
    ///
    /// # Security
    ///
    /// Use only when constructing requests. Never log this value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide key value in Debug output
impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

/// The active credential, at most one of which exists at any time.
///
/// Credentials are replaced wholesale on login and destroyed on logout,
/// on a 401 from any API call, or on detected expiration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A bearer token with an embedded expiration claim.
    Bearer(BearerToken),
    /// A static elevated-access key.
    ApiKey(ApiKey),
}

impl Credential {
    /// Returns which kind of credential this is.
    pub fn kind(&self) -> CredentialKind {
        match self {
            Credential::Bearer(_) => CredentialKind::Bearer,
            Credential::ApiKey(_) => CredentialKind::ApiKey,
        }
    }
}

/// Which credential kind is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    /// No credential is stored.
    None,
    /// A bearer token is stored.
    Bearer,
    /// An API key is stored.
    ApiKey,
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKind::None => write!(f, "none"),
            CredentialKind::Bearer => write!(f, "bearer"),
            CredentialKind::ApiKey => write!(f, "apikey"),
        }
    }
}

/// The login method the UI currently intends to use.
///
/// This is presentation intent, independent of which credential kind is
/// actually resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    /// Username/password issuing a bearer token.
    Password,
    /// Static API key.
    ApiKey,
    /// External identity-provider authorization-code flow.
    Provider,
}

impl fmt::Display for LoginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginMode::Password => write!(f, "password"),
            LoginMode::ApiKey => write!(f, "apikey"),
            LoginMode::Provider => write!(f, "provider"),
        }
    }
}
