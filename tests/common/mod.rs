//! Common test utilities for integration tests.
//!
//! Builds an [`AuthenticatedClient`] wired to a wiremock server with the
//! production reqwest transport, plus fixtures for the auth endpoints.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let store = stored_session();
//! let client = client_for(&server, &store);
//! ```

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use eventmap::adapters::ReqwestHttpClient;
use eventmap::auth::AuthenticatedClient;
use eventmap::config::ClientConfig;
use eventmap::traits::CredentialStore;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REFRESH_PATH: &str = "/auth/token/refresh/";
pub const EVENTS_PATH: &str = "/events/";

/// Client against `server` using the given store and a 2s timeout.
pub fn client_for<S>(server: &MockServer, store: &S) -> AuthenticatedClient
where
    S: CredentialStore + Clone + 'static,
{
    client_with_timeout(server, store, Duration::from_secs(2))
}

/// Client against `server` over an already shared store.
#[allow(dead_code)]
pub fn client_with_store(server: &MockServer, store: Arc<dyn CredentialStore>) -> AuthenticatedClient {
    let config = ClientConfig::new().with_base_url(server.uri());
    let http = ReqwestHttpClient::with_timeout(config.timeout).expect("build reqwest client");
    AuthenticatedClient::new(config, Arc::new(http), store)
}

#[allow(dead_code)]
pub fn client_with_timeout<S>(
    server: &MockServer,
    store: &S,
    timeout: Duration,
) -> AuthenticatedClient
where
    S: CredentialStore + Clone + 'static,
{
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_timeout(timeout);
    let http = ReqwestHttpClient::with_timeout(timeout).expect("build reqwest client");
    AuthenticatedClient::new(config, Arc::new(http), Arc::new(store.clone()))
}

/// `POST /auth/token/refresh/`, any body.
#[allow(dead_code)]
pub fn refresh_endpoint() -> MockBuilder {
    Mock::given(method("POST")).and(path(REFRESH_PATH))
}

/// Refresh endpoint accepting `refresh` and answering with `access`.
#[allow(dead_code)]
pub fn refresh_ok(refresh: &str, access: &str) -> Mock {
    refresh_endpoint()
        .and(body_json(serde_json::json!({ "refresh": refresh })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access": access })))
}

/// Refresh endpoint rejecting every refresh token.
#[allow(dead_code)]
pub fn refresh_rejected() -> Mock {
    refresh_endpoint().respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "detail": "Token is invalid or expired",
        "code": "token_not_valid"
    })))
}

/// One event as the server serializes it.
#[allow(dead_code)]
pub fn event_json(id: u64, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "Music and food",
        "host": "alice",
        "latitude": 37.7749,
        "longitude": -122.4194,
        "location_text": "Mission St",
        "date_time": "2025-08-10T18:00:00Z",
        "ticket_capacity": 40
    })
}

/// The 401 body the server sends for an expired access token.
#[allow(dead_code)]
pub fn expired_token_response() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "detail": "Given token not valid for any token type",
        "code": "token_not_valid"
    }))
}

/// `Authorization` headers of every request the server saw on `route`.
#[allow(dead_code)]
pub async fn authorizations_on(server: &MockServer, route: &str) -> Vec<Option<String>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .map(|request| {
            request
                .headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .collect()
}
