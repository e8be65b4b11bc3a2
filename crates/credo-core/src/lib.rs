//! credo-core - Core types and traits for the credo session manager.

pub mod api_url;
pub mod clock;
pub mod credential;
pub mod error;
pub mod identity;
pub mod provider;
pub mod traits;

pub use api_url::ApiUrl;
pub use credential::{ApiKey, BearerToken, Credential, CredentialKind, LoginMode};
pub use error::{
    CredentialError, Error, ExchangeError, InvalidInputError, StatusError, TransportError,
};
pub use identity::Identity;
pub use provider::ProviderConfig;
pub use traits::{CredentialStore, ProfileLoader, ProviderBridge};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
