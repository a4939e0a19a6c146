//! The session survives across client instances when backed by the file store.

mod common;

use common::*;
use eventmap::adapters::FileCredentialStore;
use eventmap::auth::LoginCredentials;
use eventmap::traits::CredentialStore;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn file_store(dir: &TempDir) -> Arc<FileCredentialStore> {
    Arc::new(FileCredentialStore::with_path(dir.path().join("credentials.json")))
}

#[tokio::test]
async fn test_login_survives_new_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access": "A1", "refresh": "R1"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();

    let first = client_with_store(&server, file_store(&dir));
    first
        .session()
        .login(&LoginCredentials::new("a@b.com", "pw"))
        .await
        .unwrap();
    drop(first);

    // A fresh client (as in a new process) picks the session up from disk.
    let second = client_with_store(&server, file_store(&dir));
    assert!(second.session().is_authenticated().await);
    assert_eq!(second.get(EVENTS_PATH).await.unwrap().status, 200);
}

#[tokio::test]
async fn test_refresh_and_logout_are_persisted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(expired_token_response())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    refresh_ok("R1", "A2").expect(1).mount(&server).await;

    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    store.set(TokenKey::Access, "A1").await.unwrap();
    store.set(TokenKey::Refresh, "R1").await.unwrap();
    drop(store);
    let store = file_store(&dir);

    let client = client_with_store(&server, store);
    assert_eq!(client.get(EVENTS_PATH).await.unwrap().status, 200);

    let reopened = file_store(&dir);
    assert_eq!(reopened.get(TokenKey::Access).await.unwrap().as_deref(), Some("A2"));
    assert_eq!(reopened.get(TokenKey::Refresh).await.unwrap().as_deref(), Some("R1"));

    client.session().logout().await.unwrap();

    let reopened = file_store(&dir);
    assert_eq!(reopened.get(TokenKey::Access).await.unwrap(), None);
    assert_eq!(reopened.get(TokenKey::Refresh).await.unwrap(), None);
}
