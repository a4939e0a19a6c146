//! Session-aware wrapper around a [`CredentialStore`].
//!
//! The raw store only knows about independent keys. `TokenStore` adds the
//! pairing rule: the access and refresh tokens are written and cleared
//! together, and a reader never sees one updated while the other is stale.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::traits::{CredentialStore, CredentialsError, TokenKey};

/// An access/refresh token pair as returned by login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Snapshot of what the store currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl StoredTokens {
    /// Both tokens present.
    pub fn is_complete(&self) -> bool {
        self.access.is_some() && self.refresh.is_some()
    }

    /// Neither token present.
    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

/// Token storage shared by the authenticators and the session manager.
pub struct TokenStore {
    inner: Arc<dyn CredentialStore>,
    /// Readers take it shared; pair writes and clears take it exclusive.
    lock: RwLock<()>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore").finish_non_exhaustive()
    }
}

impl TokenStore {
    pub fn new(inner: Arc<dyn CredentialStore>) -> Self {
        Self {
            inner,
            lock: RwLock::new(()),
        }
    }

    /// Current access token.
    pub async fn access_token(&self) -> Result<Option<String>, CredentialsError> {
        let _guard = self.lock.read().await;
        self.inner.get(TokenKey::Access).await
    }

    /// Current refresh token.
    pub async fn refresh_token(&self) -> Result<Option<String>, CredentialsError> {
        let _guard = self.lock.read().await;
        self.inner.get(TokenKey::Refresh).await
    }

    /// Both tokens, read under one guard.
    pub async fn tokens(&self) -> Result<StoredTokens, CredentialsError> {
        let _guard = self.lock.read().await;
        Ok(StoredTokens {
            access: self.inner.get(TokenKey::Access).await?,
            refresh: self.inner.get(TokenKey::Refresh).await?,
        })
    }

    /// Persist a full pair. On failure nothing is left behind.
    pub async fn save_pair(&self, pair: &TokenPair) -> Result<(), CredentialsError> {
        let _guard = self.lock.write().await;

        let written = async {
            self.inner.set(TokenKey::Access, &pair.access).await?;
            self.inner.set(TokenKey::Refresh, &pair.refresh).await
        }
        .await;

        if let Err(err) = written {
            warn!("Failed to persist token pair, rolling back: {}", err);
            if let Err(rollback) = self.remove_both().await {
                warn!("Rollback after failed pair write also failed: {}", rollback);
            }
            return Err(err);
        }

        debug!("Token pair persisted");
        Ok(())
    }

    /// Replace the access token after a refresh that spent `spent_refresh`.
    ///
    /// The refresh token is not rotated. Returns `false` without writing when
    /// the stored refresh token is no longer `spent_refresh`: the session was
    /// ended or replaced by a login while the exchange ran, and its access
    /// token must not be paired with another session's refresh token.
    pub async fn replace_access(
        &self,
        spent_refresh: &str,
        access: &str,
    ) -> Result<bool, CredentialsError> {
        let _guard = self.lock.write().await;

        if self.inner.get(TokenKey::Refresh).await?.as_deref() != Some(spent_refresh) {
            debug!("Session changed during refresh; discarding new access token");
            return Ok(false);
        }

        self.inner.set(TokenKey::Access, access).await?;
        Ok(true)
    }

    /// Clear the session only if it is still the one holding `refresh`.
    /// A session stored by a later login is left alone.
    pub async fn clear_session(&self, refresh: &str) -> Result<bool, CredentialsError> {
        let _guard = self.lock.write().await;

        if self.inner.get(TokenKey::Refresh).await?.as_deref() != Some(refresh) {
            return Ok(false);
        }

        self.remove_both().await?;
        Ok(true)
    }

    /// Remove both tokens. Succeeds when nothing is stored.
    pub async fn clear(&self) -> Result<(), CredentialsError> {
        let _guard = self.lock.write().await;
        self.remove_both().await
    }

    /// Tries both removals even if the first fails; reports the first error.
    async fn remove_both(&self) -> Result<(), CredentialsError> {
        let access = self.inner.remove(TokenKey::Access).await;
        let refresh = self.inner.remove(TokenKey::Refresh).await;
        access.and(refresh)
    }
}
