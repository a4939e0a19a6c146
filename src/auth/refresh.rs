//! Access token refresh with coalescing.
//!
//! At most one refresh exchange is in flight at a time. A caller that hits
//! a 401 while another caller's refresh is still running joins that refresh
//! and receives the same outcome instead of spending the refresh token again.
//! A caller whose rejected token has already been superseded gets the stored
//! token back without any exchange.

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::token_store::TokenStore;
use crate::error::RefreshError;
use crate::traits::{HttpClient, HttpRequest};

/// Result of one refresh exchange: the new access token.
pub type RefreshOutcome = Result<String, RefreshError>;

type InFlight = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Body of `POST /auth/token/refresh/` on success.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    #[serde(default)]
    access: Option<String>,
}

/// Owns the single "refresh in flight" slot.
pub struct RefreshCoordinator {
    http: Arc<dyn HttpClient>,
    tokens: Arc<TokenStore>,
    refresh_url: String,
    /// Held only while deciding whether to join, reuse, or start.
    in_flight: Mutex<Option<InFlight>>,
    started: AtomicU64,
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("refresh_url", &self.refresh_url)
            .field("started", &self.refreshes_started())
            .finish_non_exhaustive()
    }
}

impl RefreshCoordinator {
    pub fn new(
        http: Arc<dyn HttpClient>,
        tokens: Arc<TokenStore>,
        refresh_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            tokens,
            refresh_url: refresh_url.into(),
            in_flight: Mutex::new(None),
            started: AtomicU64::new(0),
        }
    }

    /// Obtain an access token to replace `rejected`.
    ///
    /// Joins the exchange already in flight if there is one. Otherwise, if
    /// the store already holds a different access token (a refresh finished
    /// after the rejected request went out), that token is returned and no
    /// exchange happens. Otherwise a new exchange starts.
    ///
    /// On exchange failure the session whose refresh token failed has already
    /// been cleared by the time this returns, exactly once per exchange however
    /// many callers joined it.
    pub async fn refresh(&self, rejected: Option<&str>) -> RefreshOutcome {
        let exchange = {
            let mut slot = self.in_flight.lock().await;
            let running = slot.as_ref().filter(|fut| fut.peek().is_none()).cloned();

            match running {
                Some(running) => {
                    debug!("Joining in-flight token refresh");
                    running
                }
                None => {
                    if let Some(current) = self.superseding_token(rejected).await? {
                        debug!("Access token already replaced, skipping refresh");
                        return Ok(current);
                    }

                    self.started.fetch_add(1, Ordering::Relaxed);
                    let fut = run_refresh(
                        Arc::clone(&self.http),
                        Arc::clone(&self.tokens),
                        self.refresh_url.clone(),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(fut.clone());
                    fut
                }
            }
        };

        exchange.await
    }

    /// Number of refresh exchanges started so far.
    pub fn refreshes_started(&self) -> u64 {
        self.started.load(Ordering::Relaxed)
    }

    async fn superseding_token(&self, rejected: Option<&str>) -> Result<Option<String>, RefreshError> {
        let stored = self.tokens.tokens().await?;
        Ok(match (stored.access, stored.refresh) {
            (Some(access), Some(_)) if rejected != Some(access.as_str()) => Some(access),
            _ => None,
        })
    }
}

async fn run_refresh(
    http: Arc<dyn HttpClient>,
    tokens: Arc<TokenStore>,
    refresh_url: String,
) -> RefreshOutcome {
    let spent = match tokens.refresh_token().await {
        Ok(Some(refresh)) => refresh,
        Ok(None) => {
            warn!("No refresh token available, ending session");
            clear_all(&tokens).await;
            return Err(RefreshError::MissingRefreshToken);
        }
        Err(e) => {
            let err = RefreshError::from(e);
            error!(code = err.error_code(), "Token refresh failed: {}", err);
            clear_all(&tokens).await;
            return Err(err);
        }
    };

    let outcome = exchange(http.as_ref(), &tokens, &refresh_url, &spent).await;

    match &outcome {
        Ok(_) => info!("Access token refreshed"),
        Err(RefreshError::MissingRefreshToken) => {
            warn!("Session ended while refreshing");
        }
        Err(err) => error!(code = err.error_code(), "Token refresh failed: {}", err),
    }

    if outcome.is_err() {
        // Only the session whose refresh token failed is torn down.
        match tokens.clear_session(&spent).await {
            Ok(false) => debug!("Session changed during refresh, nothing to clear"),
            Ok(true) => {}
            Err(e) => warn!("Failed to clear session after refresh failure: {}", e),
        }
    }

    outcome
}

async fn clear_all(tokens: &TokenStore) {
    if let Err(e) = tokens.clear().await {
        warn!("Failed to clear session after refresh failure: {}", e);
    }
}

async fn exchange(
    http: &dyn HttpClient,
    tokens: &TokenStore,
    refresh_url: &str,
    refresh: &str,
) -> RefreshOutcome {
    debug!("Sending refresh token to {}", refresh_url);
    let body = serde_json::json!({ "refresh": refresh }).to_string();
    let response = http.send(&HttpRequest::post(refresh_url, body).json()).await?;

    if !response.is_success() {
        return Err(RefreshError::Rejected {
            status: response.status,
            message: response.text_lossy(),
        });
    }

    let parsed: RefreshResponse = response
        .json()
        .map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;
    let access = parsed
        .access
        .filter(|token| !token.is_empty())
        .ok_or_else(|| RefreshError::InvalidResponse("missing access token".to_string()))?;

    if tokens.replace_access(refresh, &access).await? {
        return Ok(access);
    }

    // Logged out, or logged in again, while the exchange was running. A new
    // session's own access token is what the retry should carry.
    let current = tokens.tokens().await?;
    match (current.access, current.refresh) {
        (Some(access), Some(_)) => {
            debug!("New session stored during refresh, using its access token");
            Ok(access)
        }
        _ => Err(RefreshError::MissingRefreshToken),
    }
}
