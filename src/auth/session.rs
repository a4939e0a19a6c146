//! Login and logout.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::token_store::{TokenPair, TokenStore};
use crate::error::{ApiError, ApiResult, AuthError, NetworkError};
use crate::traits::{HttpClient, HttpRequest};

/// Credentials submitted to the login endpoint.
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    #[serde(rename = "email")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl LoginCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Response from `POST /auth/login/`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    refresh: Option<String>,
}

impl LoginResponse {
    fn into_pair(self) -> Option<TokenPair> {
        match (self.access, self.refresh) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                Some(TokenPair { access, refresh })
            }
            _ => None,
        }
    }
}

/// Establishes and ends sessions.
#[derive(Clone)]
pub struct SessionManager {
    http: Arc<dyn HttpClient>,
    tokens: Arc<TokenStore>,
    login_url: String,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("login_url", &self.login_url)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(
        http: Arc<dyn HttpClient>,
        tokens: Arc<TokenStore>,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            tokens,
            login_url: login_url.into(),
        }
    }

    /// Exchange credentials for a token pair and persist it.
    ///
    /// The login request bypasses authorization entirely: no bearer header is
    /// attached and a 401 here is a rejected login, not a refresh trigger.
    /// On any failure nothing is written.
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<TokenPair> {
        let body =
            serde_json::to_string(credentials).map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self
            .http
            .send(&HttpRequest::post(&self.login_url, body).json())
            .await?;

        if !response.is_success() {
            warn!(status = response.status, "Login rejected");
            return Err(AuthError::LoginRejected {
                status: response.status,
                message: response.text_lossy(),
            }
            .into());
        }

        let pair = response
            .json::<LoginResponse>()
            .ok()
            .and_then(LoginResponse::into_pair)
            .ok_or_else(|| NetworkError::InvalidResponse {
                message: "login response missing access or refresh token".to_string(),
            })?;

        self.tokens.save_pair(&pair).await?;
        info!("Logged in as {}", credentials.identifier);
        Ok(pair)
    }

    /// Remove both tokens. Safe to call with no session.
    pub async fn logout(&self) -> ApiResult<()> {
        self.tokens.clear().await?;
        info!("Logged out");
        Ok(())
    }

    /// True when a refresh token is stored.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.tokens.refresh_token().await, Ok(Some(_)))
    }
}
