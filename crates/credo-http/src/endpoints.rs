//! Endpoint paths and request/response wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// GET: the identity record for the presented bearer token.
pub const PROFILE: &str = "/auth/profile";

/// POST: password login issuing a bearer token.
pub const LOGIN: &str = "/auth/login";

/// POST: identity-provider authorization-code exchange.
pub const PROVIDER_CALLBACK: &str = "/auth/azure/callback";

/// GET: protected endpoint used to probe whether an API key is accepted.
pub const API_KEY_PROBE: &str = "/users";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for password login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<&'a str>,
}

/// Request body for the authorization-code exchange.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExchangeRequest<'a> {
    pub code: &'a str,
    pub redirect_uri: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<&'a str>,
}

/// The backend wraps every payload in a `data` envelope; an absent
/// `data` on a 2xx is meaningful and handled per endpoint.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Option<T>,
}

/// Token-issuing response payload.
///
/// `accessToken` is optional here so its absence can be reported as a
/// malformed response, distinct from a transport failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub access_token: Option<String>,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_uses_camel_case_and_omits_absent_project() {
        let request = LoginRequest {
            email: "alice@example.com",
            password: "secret",
            project_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email": "alice@example.com", "password": "secret"})
        );

        let with_project = LoginRequest {
            email: "alice@example.com",
            password: "secret",
            project_id: Some("proj-1"),
        };
        let json = serde_json::to_value(&with_project).unwrap();
        assert_eq!(json["projectId"], "proj-1");
    }

    #[test]
    fn code_exchange_request_renames_redirect_uri() {
        let request = CodeExchangeRequest {
            code: "abc",
            redirect_uri: "https://app.example.com/cb",
            project_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["redirectUri"], "https://app.example.com/cb");
    }

    #[test]
    fn token_grant_tolerates_missing_access_token() {
        let grant: TokenGrant = serde_json::from_str("{}").unwrap();
        assert!(grant.access_token.is_none());

        let grant: TokenGrant =
            serde_json::from_str(r#"{"accessToken":"jwt1"}"#).unwrap();
        assert_eq!(grant.access_token.as_deref(), Some("jwt1"));
    }
}
