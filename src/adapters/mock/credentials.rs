//! In-memory credential store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{CredentialStore, CredentialsError, TokenKey};

/// In-memory credential store.
///
/// Clones share the same storage. Each operation can be told to fail so
/// tests can exercise storage error paths.
///
/// # Example
///
/// ```ignore
/// use eventmap::adapters::mock::InMemoryCredentials;
/// use eventmap::traits::TokenKey;
///
/// let store = InMemoryCredentials::with_tokens("A1", "R1");
/// assert_eq!(store.token(TokenKey::Access), Some("A1".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    values: Arc<Mutex<HashMap<TokenKey, String>>>,
    /// Key whose `set` should fail
    fail_set: Arc<Mutex<Option<TokenKey>>>,
    load_should_fail: Arc<Mutex<bool>>,
    remove_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryCredentials {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a token pair.
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.set_token(TokenKey::Access, Some(access));
        store.set_token(TokenKey::Refresh, Some(refresh));
        store
    }

    /// Read a key synchronously (for assertions).
    pub fn token(&self, key: TokenKey) -> Option<String> {
        self.values.lock().unwrap().get(&key).cloned()
    }

    /// Write or remove a key synchronously (for test setup).
    pub fn set_token(&self, key: TokenKey, value: Option<&str>) {
        let mut values = self.values.lock().unwrap();
        match value {
            Some(v) => {
                values.insert(key, v.to_string());
            }
            None => {
                values.remove(&key);
            }
        }
    }

    /// True when neither token is stored.
    pub fn is_empty(&self) -> bool {
        self.values.lock().unwrap().is_empty()
    }

    /// Make `set` fail for the given key.
    pub fn fail_set_for(&self, key: Option<TokenKey>) {
        *self.fail_set.lock().unwrap() = key;
    }

    /// Configure whether `get` should fail.
    pub fn set_load_should_fail(&self, should_fail: bool) {
        *self.load_should_fail.lock().unwrap() = should_fail;
    }

    /// Configure whether `remove` should fail.
    pub fn set_remove_should_fail(&self, should_fail: bool) {
        *self.remove_should_fail.lock().unwrap() = should_fail;
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentials {
    async fn get(&self, key: TokenKey) -> Result<Option<String>, CredentialsError> {
        if *self.load_should_fail.lock().unwrap() {
            return Err(CredentialsError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.token(key))
    }

    async fn set(&self, key: TokenKey, value: &str) -> Result<(), CredentialsError> {
        if *self.fail_set.lock().unwrap() == Some(key) {
            return Err(CredentialsError::SaveFailed("Mock save failure".to_string()));
        }
        self.set_token(key, Some(value));
        Ok(())
    }

    async fn remove(&self, key: TokenKey) -> Result<(), CredentialsError> {
        if *self.remove_should_fail.lock().unwrap() {
            return Err(CredentialsError::ClearFailed("Mock clear failure".to_string()));
        }
        self.set_token(key, None);
        Ok(())
    }
}
