//! Typed REST client.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use credo_core::{ApiUrl, Error, StatusError, TransportError};

use crate::endpoints::ErrorBody;

/// HTTP client for the backend REST surface.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl RestClient {
    /// Create a new client for the given base URL.
    pub fn new(base: ApiUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("credo/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Make an authenticated GET request.
    #[instrument(skip(self, token), fields(base = %self.base))]
    pub async fn get_authed<R>(&self, path: &str, token: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "GET");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers(token))
            .send()
            .await
            .map_err(map_transport)?;

        self.handle_response(response).await
    }

    /// Make an unauthenticated POST request with a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;

        self.handle_response(response).await
    }

    /// Make a GET request carrying a custom header, returning only the
    /// status code. Used to probe whether a credential is accepted.
    #[instrument(skip(self, value), fields(base = %self.base))]
    pub async fn get_status_with_header(
        &self,
        path: &str,
        header: &'static str,
        value: &str,
    ) -> Result<u16, Error> {
        let url = self.base.endpoint(path);
        debug!(path, header, "GET (status probe)");

        let header_value = HeaderValue::from_str(value).map_err(|_| {
            Error::Transport(TransportError::Http {
                message: format!("invalid characters in {} header", header),
            })
        })?;

        let response = self
            .client
            .get(&url)
            .header(header, header_value)
            .send()
            .await
            .map_err(map_transport)?;

        Ok(response.status().as_u16())
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        if let Ok(value) = HeaderValue::from_str(&auth_value) {
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Handle a response, parsing the body or the error payload.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(map_transport)?;
            Ok(body)
        } else {
            Err(Error::Transport(TransportError::Status(
                self.parse_error_response(response).await,
            )))
        }
    }

    /// Parse an error response, tolerating non-JSON bodies.
    async fn parse_error_response(&self, response: reqwest::Response) -> StatusError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => StatusError::new(status, body.error, body.message),
            Err(_) => StatusError::new(status, None, None),
        }
    }
}

/// Classify a reqwest error into the transport taxonomy.
fn map_transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
