//! Unified error type returned by the client.

use thiserror::Error;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::network::NetworkError;
use super::refresh::RefreshError;
use crate::models::ValidationError;
use crate::traits::{CredentialsError, HttpError};

/// Every failure an API call can surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failures and non-auth error statuses.
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Authorization failures that could not be recovered.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The credential store failed.
    #[error("Credential store error: {0}")]
    Storage(#[from] CredentialsError),

    /// A request payload failed local checks and was never sent.
    #[error("Invalid request: {0}")]
    Invalid(#[from] ValidationError),

    /// A request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Network(NetworkError::Transport(_)) => ErrorCategory::Network,
            ApiError::Network(NetworkError::HttpStatus { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            ApiError::Network(_) => ErrorCategory::Client,
            ApiError::Auth(AuthError::RefreshFailed(RefreshError::Transport(_))) => {
                ErrorCategory::Network
            }
            ApiError::Auth(AuthError::LoginRejected { status, .. }) if *status >= 500 => {
                ErrorCategory::Server
            }
            ApiError::Auth(_) => ErrorCategory::Auth,
            ApiError::Storage(_) => ErrorCategory::Storage,
            ApiError::Invalid(_) | ApiError::Encode(_) => ErrorCategory::Client,
        }
    }

    /// Check if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Check if the user must sign in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            ApiError::Auth(err) => err.requires_reauth(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(err) => err.user_message(),
            ApiError::Auth(err) => err.user_message(),
            ApiError::Storage(_) => {
                "Could not access your saved session. Please sign in again.".to_string()
            }
            ApiError::Invalid(err) => err.to_string(),
            ApiError::Encode(_) => "Could not prepare the request.".to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network(err) => err.error_code(),
            ApiError::Auth(err) => err.error_code(),
            ApiError::Storage(_) => "E_STORAGE",
            ApiError::Invalid(_) => "E_INVALID_REQUEST",
            ApiError::Encode(_) => "E_ENCODE",
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Network(NetworkError::Transport(e))
    }
}

impl From<RefreshError> for ApiError {
    fn from(e: RefreshError) -> Self {
        ApiError::Auth(AuthError::RefreshFailed(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_category() {
        let err: ApiError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
        assert!(!err.requires_reauth());
    }

    #[test]
    fn test_status_categories() {
        let server: ApiError = NetworkError::HttpStatus {
            status: 502,
            message: "Bad Gateway".to_string(),
        }
        .into();
        let client: ApiError = NetworkError::HttpStatus {
            status: 400,
            message: "Bad Request".to_string(),
        }
        .into();
        assert_eq!(server.category(), ErrorCategory::Server);
        assert_eq!(client.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_refresh_failure_requires_reauth() {
        let err: ApiError = RefreshError::Rejected {
            status: 401,
            message: "invalid".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Auth);
        assert!(err.requires_reauth());
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_AUTH_REFRESH_FAIL");
    }

    #[test]
    fn test_storage_error() {
        let err: ApiError = CredentialsError::Io("disk full".to_string()).into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_transparent_display() {
        let err: ApiError = AuthError::NotAuthenticated.into();
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[test]
    fn test_encode_is_client_side() {
        let err = ApiError::Encode("key must be a string".to_string());
        assert_eq!(err.category(), ErrorCategory::Client);
        assert_eq!(err.error_code(), "E_ENCODE");
        assert!(!err.is_retryable());
        assert!(!err.user_message().contains("server"));
    }
}
