//! Errors raised by the token refresh exchange.

use thiserror::Error;

use crate::traits::{CredentialsError, HttpError};

/// Why a refresh did not produce a new access token.
///
/// Cloneable because a single refresh outcome is handed to every request
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefreshError {
    /// No refresh token is stored; no network call was made.
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// The server refused the refresh token.
    #[error("Refresh rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The refresh call never got a response.
    #[error("Refresh request failed: {0}")]
    Transport(HttpError),

    /// The server answered 2xx without a usable access token.
    #[error("Invalid refresh response: {0}")]
    InvalidResponse(String),

    /// The new access token could not be read or persisted.
    #[error("Refresh storage error: {0}")]
    Storage(CredentialsError),
}

impl RefreshError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            RefreshError::MissingRefreshToken => "E_REFRESH_MISSING",
            RefreshError::Rejected { .. } => "E_REFRESH_REJECTED",
            RefreshError::Transport(_) => "E_REFRESH_TRANSPORT",
            RefreshError::InvalidResponse(_) => "E_REFRESH_INVALID",
            RefreshError::Storage(_) => "E_REFRESH_STORAGE",
        }
    }
}

impl From<HttpError> for RefreshError {
    fn from(e: HttpError) -> Self {
        RefreshError::Transport(e)
    }
}

impl From<CredentialsError> for RefreshError {
    fn from(e: CredentialsError) -> Self {
        RefreshError::Storage(e)
    }
}
