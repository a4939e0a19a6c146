//! Result type alias for API operations.

use super::api_error::ApiError;

/// Type alias for Results using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
