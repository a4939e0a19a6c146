//! Authentication-related error types.

use std::fmt;

use super::refresh::RefreshError;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The server rejected the presented credential and it could not be
    /// renewed: either the request was already retried once, or no refresh
    /// token was stored. Carries the server's 401 response.
    Unauthorized { status: u16, message: String },

    /// The refresh exchange failed; the session has been torn down.
    RefreshFailed(RefreshError),

    /// The login endpoint refused the supplied credentials.
    LoginRejected { status: u16, message: String },

    /// No session is stored.
    NotAuthenticated,
}

impl AuthError {
    /// Check if this error is resolved by signing in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthorized { .. }
                | AuthError::RefreshFailed(_)
                | AuthError::NotAuthenticated
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Unauthorized { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::RefreshFailed(_) => {
                "Failed to renew your session. Please sign in again.".to_string()
            }
            AuthError::LoginRejected { status, .. } => match *status {
                400 | 401 => "Invalid email or password.".to_string(),
                _ => format!("Sign in failed (HTTP {}). Please try again.", status),
            },
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthorized { .. } => "E_AUTH_UNAUTHORIZED",
            AuthError::RefreshFailed(_) => "E_AUTH_REFRESH_FAIL",
            AuthError::LoginRejected { .. } => "E_AUTH_LOGIN",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Unauthorized { status, message } => {
                write!(f, "Unauthorized ({}): {}", status, message)
            }
            AuthError::RefreshFailed(err) => write!(f, "Token refresh failed: {}", err),
            AuthError::LoginRejected { status, message } => {
                write!(f, "Login rejected ({}): {}", status, message)
            }
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::RefreshFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RefreshError> for AuthError {
    fn from(e: RefreshError) -> Self {
        AuthError::RefreshFailed(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_requires_reauth() {
        let err = AuthError::Unauthorized {
            status: 401,
            message: "Token expired".to_string(),
        };
        assert!(err.requires_reauth());
        assert_eq!(err.error_code(), "E_AUTH_UNAUTHORIZED");
        assert!(err.user_message().contains("sign in"));
    }

    #[test]
    fn test_refresh_failed_keeps_source() {
        use std::error::Error;

        let err: AuthError = RefreshError::Rejected {
            status: 401,
            message: "bad refresh".to_string(),
        }
        .into();
        assert!(err.requires_reauth());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("bad refresh"));
    }

    #[test]
    fn test_login_rejected_is_not_reauth() {
        let err = AuthError::LoginRejected {
            status: 401,
            message: "No active account".to_string(),
        };
        assert!(!err.requires_reauth());
        assert_eq!(err.user_message(), "Invalid email or password.");
    }

    #[test]
    fn test_not_authenticated() {
        let err = AuthError::NotAuthenticated;
        assert!(err.requires_reauth());
        assert_eq!(err.to_string(), "Not authenticated");
    }
}
