//! Mock implementations for test fixtures.
//!
//! Re-exports the in-crate test doubles and adds session fixtures.

pub use eventmap::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
pub use eventmap::traits::TokenKey;

/// A store holding `access="A1"`, `refresh="R1"`.
pub fn stored_session() -> InMemoryCredentials {
    InMemoryCredentials::with_tokens("A1", "R1")
}

/// A store holding an access token but no refresh token.
#[allow(dead_code)]
pub fn access_only(access: &str) -> InMemoryCredentials {
    let store = InMemoryCredentials::new();
    store.set_token(TokenKey::Access, Some(access));
    store
}

/// Asserts that both tokens are present or both absent.
#[allow(dead_code)]
pub fn assert_pair_consistent(store: &InMemoryCredentials) {
    let access = store.token(TokenKey::Access);
    let refresh = store.token(TokenKey::Refresh);
    assert_eq!(
        access.is_some(),
        refresh.is_some(),
        "half a session left in the store: access={:?} refresh={:?}",
        access,
        refresh
    );
}
