//! Network-related error types.

use std::fmt;

use crate::traits::{HttpError, Response};

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// The request never got a response (connect failure, timeout, DNS).
    Transport(HttpError),

    /// The server answered with a non-2xx status unrelated to auth.
    HttpStatus { status: u16, message: String },

    /// A 2xx body could not be decoded.
    InvalidResponse { message: String },
}

impl NetworkError {
    /// Build an `HttpStatus` error from a response.
    pub fn from_response(response: &Response) -> Self {
        NetworkError::HttpStatus {
            status: response.status,
            message: response.text_lossy(),
        }
    }

    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Transport(err) => matches!(
                err,
                HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_)
            ),
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::Transport(HttpError::Timeout(_)) => {
                "The request timed out. The server may be slow or unreachable.".to_string()
            }
            NetworkError::Transport(_) => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was invalid. Please check the form and try again.".to_string(),
                403 => "Access denied. You don't have permission for this action.".to_string(),
                404 => "The requested resource was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!(
                    "The server returned an error (HTTP {}). Please try again.",
                    status
                ),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::Transport(HttpError::Timeout(_)) => "E_NET_TIMEOUT",
            NetworkError::Transport(HttpError::ConnectionFailed(_)) => "E_NET_CONN",
            NetworkError::Transport(_) => "E_NET_OTHER",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Transport(err) => write!(f, "{}", err),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
        }
    }
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HttpError> for NetworkError {
    fn from(e: HttpError) -> Self {
        NetworkError::Transport(e)
    }
}
