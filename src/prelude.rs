//! Prelude module for convenient imports.
//!
//! ```ignore
//! use eventmap::prelude::*;
//! ```

// Client and session
pub use crate::api::EventsApi;
pub use crate::auth::{AuthenticatedClient, LoginCredentials, RequestContext, TokenPair};
pub use crate::config::ClientConfig;

// Model types
pub use crate::models::{Event, NewEvent};

// Errors
pub use crate::error::{ApiError, ApiResult, AuthError, ErrorCategory, NetworkError, RefreshError};

// Traits
pub use crate::traits::{CredentialStore, HttpClient, HttpRequest, Response, TokenKey};
