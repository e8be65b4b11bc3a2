//! Environment-driven configuration.

use std::env;

use anyhow::{Context, Result};

use credo_core::ApiUrl;
use credo_core::provider::ProviderConfig;

/// Default backend base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3009/v1";

/// Backend configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL.
    pub api_url: ApiUrl,
    /// Optional tenant/project identifier attached to login calls.
    pub project_id: Option<String>,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `CREDO_API_URL` defaults to the local development backend;
    /// `CREDO_PROJECT_ID` is optional.
    pub fn from_env() -> Result<Self> {
        let raw = env::var("CREDO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = ApiUrl::new(&raw).context("Invalid CREDO_API_URL")?;

        let project_id = env::var("CREDO_PROJECT_ID").ok().filter(|v| !v.is_empty());

        Ok(Self {
            api_url,
            project_id,
        })
    }
}

/// Read the identity-provider settings from the environment.
///
/// Requires `CREDO_PROVIDER_CLIENT_ID` and `CREDO_PROVIDER_REDIRECT_URI`;
/// `CREDO_PROVIDER_TENANT` defaults to the multi-tenant endpoint.
pub fn provider_from_env() -> Result<ProviderConfig> {
    let tenant = env::var("CREDO_PROVIDER_TENANT").unwrap_or_else(|_| "common".to_string());
    let client_id = env::var("CREDO_PROVIDER_CLIENT_ID")
        .context("CREDO_PROVIDER_CLIENT_ID is not set")?;
    let redirect_uri = env::var("CREDO_PROVIDER_REDIRECT_URI")
        .context("CREDO_PROVIDER_REDIRECT_URI is not set")?;

    ProviderConfig::microsoft(&tenant, client_id, redirect_uri)
        .context("Invalid identity-provider configuration")
}

/// The redirect URI registered with the identity provider.
pub fn redirect_uri_from_env() -> Result<String> {
    env::var("CREDO_PROVIDER_REDIRECT_URI").context("CREDO_PROVIDER_REDIRECT_URI is not set")
}
