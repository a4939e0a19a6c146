//! Credential store trait abstraction.
//!
//! Durable key/value storage for the two session tokens. Pure storage:
//! no pairing rules or locking live here, see [`crate::auth::TokenStore`].

use async_trait::async_trait;
use std::fmt;

/// The keys a credential store must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    /// Short-lived bearer token.
    Access,
    /// Longer-lived token exchanged for new access tokens.
    Refresh,
}

impl TokenKey {
    /// Storage key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKey::Access => "accessToken",
            TokenKey::Refresh => "refreshToken",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential store operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialsError {
    /// Failed to read a key
    LoadFailed(String),
    /// Failed to write a key
    SaveFailed(String),
    /// Failed to remove a key
    ClearFailed(String),
    /// IO error
    Io(String),
    /// Serialization/deserialization error
    Serialization(String),
    /// Other error
    Other(String),
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
            CredentialsError::Io(msg) => write!(f, "IO error: {}", msg),
            CredentialsError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            CredentialsError::Other(msg) => write!(f, "Credentials error: {}", msg),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Trait for credential storage.
///
/// Every operation may suspend. Implementations include the file-backed
/// store and an in-memory store for tests.
///
/// # Example
///
/// ```ignore
/// use eventmap::traits::{CredentialStore, TokenKey};
///
/// async fn current_access<S: CredentialStore>(store: &S) -> Option<String> {
///     store.get(TokenKey::Access).await.ok().flatten()
/// }
/// ```
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read a key.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key is stored
    /// - `Ok(None)` if it is absent
    /// - `Err(error)` if the read failed
    async fn get(&self, key: TokenKey) -> Result<Option<String>, CredentialsError>;

    /// Write a key, overwriting any previous value.
    async fn set(&self, key: TokenKey, value: &str) -> Result<(), CredentialsError>;

    /// Remove a key. Removing an absent key succeeds.
    async fn remove(&self, key: TokenKey) -> Result<(), CredentialsError>;
}
