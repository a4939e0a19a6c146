//! Error handling for the API client.
//!
//! - **Domain errors**: [`NetworkError`], [`AuthError`], [`RefreshError`]
//! - **Unified error**: [`ApiError`] consolidates them for callers
//! - **Categories**: [`ErrorCategory`] drives retry and re-auth decisions
//! - **Result alias**: [`ApiResult<T>`]
//!
//! | Failure | Surfaced as | Session |
//! |---------|-------------|---------|
//! | Transport (timeout, DNS, refused) | `Network(Transport)` | untouched |
//! | 401 after the one retry | `Auth(Unauthorized)` | untouched |
//! | 401 with no refresh token | `Auth(Unauthorized)` | cleared |
//! | Refresh rejected | `Auth(RefreshFailed)` | cleared |
//! | Other 4xx/5xx | `Network(HttpStatus)` | untouched |

mod api_error;
mod auth;
mod category;
mod network;
mod refresh;
mod result;

pub use api_error::ApiError;
pub use auth::AuthError;
pub use category::ErrorCategory;
pub use network::NetworkError;
pub use refresh::RefreshError;
pub use result::ApiResult;
