//! Mock backend tests for the credo-http client.
//!
//! These use wiremock to simulate the backend and exercise every wire
//! contract without network access or real credentials.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use credo_core::{
    ApiKey, ApiUrl, BearerToken, CredentialError, Error, ExchangeError, ProfileLoader,
    ProviderBridge, TransportError,
};
use credo_http::AuthApi;

/// Helper to build an API URL pointing at a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

// ============================================================================
// Profile Fetch
// ============================================================================

#[tokio::test]
async fn profile_fetch_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "email": "alice@example.com",
                "permissions": ["edit:asset", "create:asset"]
            }
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let identity = api
        .fetch_profile(&BearerToken::new("token-1"))
        .await
        .unwrap();

    assert_eq!(identity.email, "alice@example.com");
    assert_eq!(identity.permissions, vec!["edit:asset", "create:asset"]);
}

#[tokio::test]
async fn profile_fetch_rejected_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let result = api.fetch_profile(&BearerToken::new("stale-token")).await;

    assert!(matches!(
        result,
        Err(Error::Credential(CredentialError::Rejected { status: 401 }))
    ));
}

#[tokio::test]
async fn profile_fetch_missing_data_is_no_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let result = api.fetch_profile(&BearerToken::new("token-1")).await;

    assert!(matches!(
        result,
        Err(Error::Credential(CredentialError::MissingProfile))
    ));
}

#[tokio::test]
async fn profile_fetch_server_error_is_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let err = api
        .fetch_profile(&BearerToken::new("token-1"))
        .await
        .unwrap_err();

    // Non-JSON error bodies still classify with their status.
    assert!(err.to_string().contains("500"));
    assert!(matches!(
        err,
        Error::Transport(TransportError::Status(_))
    ));
}

// ============================================================================
// Password Login
// ============================================================================

#[tokio::test]
async fn password_login_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "accessToken": "issued-token" }
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let token = api
        .login_password("alice@example.com", "secret123")
        .await
        .unwrap();

    assert_eq!(token.as_str(), "issued-token");
}

#[tokio::test]
async fn password_login_sends_project_id_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "secret123",
            "projectId": "proj-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "accessToken": "issued-token" }
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server)).with_project_id("proj-1");
    assert!(api.login_password("alice@example.com", "secret123").await.is_ok());
}

#[tokio::test]
async fn password_login_missing_token_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let result = api.login_password("alice@example.com", "secret123").await;

    assert!(matches!(
        result,
        Err(Error::MalformedResponse { field: "accessToken" })
    ));
}

#[tokio::test]
async fn password_login_rejection_carries_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let err = api
        .login_password("alice@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Invalid email or password"));
}

// ============================================================================
// Code Exchange
// ============================================================================

#[tokio::test]
async fn exchange_code_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/azure/callback"))
        .and(body_json(json!({
            "code": "abc123",
            "redirectUri": "https://app.example.com/auth/callback"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "accessToken": "jwt1" }
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let token = api
        .exchange_code("abc123", "https://app.example.com/auth/callback")
        .await
        .unwrap();

    assert_eq!(token.as_str(), "jwt1");
}

#[tokio::test]
async fn exchange_code_rejects_empty_code_without_calling_out() {
    let server = MockServer::start().await;

    let api = AuthApi::new(mock_api_url(&server));
    let result = api
        .exchange_code("", "https://app.example.com/auth/callback")
        .await;

    assert!(matches!(result, Err(ExchangeError::MissingCode)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn exchange_code_missing_token_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/azure/callback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let result = api
        .exchange_code("abc123", "https://app.example.com/auth/callback")
        .await;

    assert!(matches!(result, Err(ExchangeError::MissingAccessToken)));
}

#[tokio::test]
async fn exchange_code_remote_rejection_carries_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/azure/callback"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "invalid authorization code"
        })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    let err = api
        .exchange_code("expired-code", "https://app.example.com/auth/callback")
        .await
        .unwrap_err();

    match err {
        ExchangeError::Remote { message } => {
            assert!(message.contains("invalid authorization code"))
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

// ============================================================================
// API-Key Probe
// ============================================================================

#[tokio::test]
async fn probe_accepts_valid_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("x-api-key", "valid-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    assert!(api.probe_api_key(&ApiKey::new("valid-key")).await);
}

#[tokio::test]
async fn probe_rejects_refused_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = AuthApi::new(mock_api_url(&server));
    assert!(!api.probe_api_key(&ApiKey::new("bad-key")).await);
}
