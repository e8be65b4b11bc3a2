//! Error types for the credo libraries.
//!
//! This module provides a unified error type with explicit variants for
//! transport, credential, response-shape, and code-exchange failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for credo operations.
///
/// Each variant corresponds to one failure class, so callers can decide
/// whether a failure invalidates the stored credential, should be shown
/// to the user, or is a plain connectivity problem.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, non-2xx status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The stored credential was rejected by the backend.
    #[error("invalid credential: {0}")]
    Credential(#[from] CredentialError),

    /// A successful response was missing an expected field.
    #[error("malformed response: missing field '{field}'")]
    MalformedResponse {
        /// Name of the absent field.
        field: &'static str,
    },

    /// The identity-provider code exchange failed.
    #[error("exchange failed: {0}")]
    Exchange(#[from] ExchangeError),

    /// Input validation errors (invalid URLs, provider settings).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error (request building, body decoding).
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The server answered with a non-2xx status.
    #[error("{0}")]
    Status(StatusError),
}

/// Credential rejection errors from the profile endpoint.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The backend rejected the bearer token outright.
    #[error("token rejected with status {status}")]
    Rejected { status: u16 },

    /// The backend answered 2xx but returned no identity record.
    #[error("no profile for the presented token")]
    MissingProfile,
}

/// A non-2xx response with whatever detail the server supplied.
#[derive(Debug)]
pub struct StatusError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub code: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusError {}

impl StatusError {
    /// Create a new status error.
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }

    /// Check if this response invalidates the presented credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Failures of the identity-provider authorization-code exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// No authorization code was supplied or found on the redirect.
    #[error("no authorization code supplied")]
    MissingCode,

    /// The provider redirected back with an error parameter.
    #[error("provider error: {error}{}", .description.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    Provider {
        error: String,
        description: Option<String>,
    },

    /// The exchange succeeded at the HTTP level but no access token came back.
    #[error("no access token in exchange response")]
    MissingAccessToken,

    /// The exchange call itself failed (transport or server rejection).
    #[error("{message}")]
    Remote { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid provider redirect URL.
    #[error("invalid redirect URL '{value}': {reason}")]
    RedirectUrl { value: String, reason: String },
}
