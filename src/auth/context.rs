//! Per-call request state.

use std::fmt;
use tracing::debug;

use crate::traits::HttpRequest;

/// Where a single call is in the authenticate/refresh/retry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    /// Issued, no response yet.
    Pending,
    /// First response was not a 401.
    Succeeded,
    /// First response was a 401; the retry marker is now set.
    AuthFailedFirst,
    /// Waiting on a refresh (started here or joined).
    Refreshing,
    /// The retried request got a non-401 response.
    RetriedSucceeded,
    /// The retried request got a 401 again.
    RetriedFailed,
    /// A 401 arrived but no refresh token was stored.
    NoRefreshToken,
    /// The refresh exchange failed.
    RefreshFailed,
}

impl ExchangeState {
    /// True once the call has resolved.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExchangeState::Succeeded
                | ExchangeState::RetriedSucceeded
                | ExchangeState::RetriedFailed
                | ExchangeState::NoRefreshToken
                | ExchangeState::RefreshFailed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeState::Pending => "PENDING",
            ExchangeState::Succeeded => "SUCCEEDED",
            ExchangeState::AuthFailedFirst => "AUTH_FAILED_FIRST",
            ExchangeState::Refreshing => "REFRESHING",
            ExchangeState::RetriedSucceeded => "RETRIED_SUCCEEDED",
            ExchangeState::RetriedFailed => "RETRIED_FAILED",
            ExchangeState::NoRefreshToken => "NO_REFRESH_TOKEN",
            ExchangeState::RefreshFailed => "REFRESH_FAILED",
        }
    }
}

impl fmt::Display for ExchangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound call: the request, its single-use retry marker, and the
/// state it has reached.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request: HttpRequest,
    retried: bool,
    /// Token produced by the refresh that preceded the retry.
    refreshed_token: Option<String>,
    state: ExchangeState,
}

impl RequestContext {
    pub fn new(request: HttpRequest) -> Self {
        Self {
            request,
            retried: false,
            refreshed_token: None,
            state: ExchangeState::Pending,
        }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub(crate) fn request_mut(&mut self) -> &mut HttpRequest {
        &mut self.request
    }

    /// Whether the one permitted retry has been claimed.
    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Claim the retry. Returns `false` if it was already claimed.
    pub fn mark_retried(&mut self) -> bool {
        if self.retried {
            return false;
        }
        self.retried = true;
        true
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub(crate) fn transition(&mut self, next: ExchangeState) {
        debug!(
            method = %self.request.method,
            url = %self.request.url,
            "{} -> {}",
            self.state,
            next
        );
        self.state = next;
    }

    pub fn refreshed_token(&self) -> Option<&str> {
        self.refreshed_token.as_deref()
    }

    /// Record the token to use for the retry and put it on the request.
    pub(crate) fn apply_refreshed_token(&mut self, token: String) {
        self.request.set_bearer(&token);
        self.refreshed_token = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_marker_flips_once() {
        let mut ctx = RequestContext::new(HttpRequest::get("https://example.com/events/"));
        assert!(!ctx.is_retried());

        assert!(ctx.mark_retried());
        assert!(ctx.is_retried());

        assert!(!ctx.mark_retried());
        assert!(ctx.is_retried());
    }

    #[test]
    fn test_initial_state() {
        let ctx = RequestContext::new(HttpRequest::get("https://example.com/events/"));
        assert_eq!(ctx.state(), ExchangeState::Pending);
        assert!(!ctx.state().is_terminal());
        assert!(ctx.refreshed_token().is_none());
    }

    #[test]
    fn test_apply_refreshed_token() {
        let mut ctx = RequestContext::new(HttpRequest::get("https://example.com/events/"));
        ctx.request_mut().set_bearer("A1");

        ctx.apply_refreshed_token("A2".to_string());

        assert_eq!(ctx.request().authorization(), Some("Bearer A2"));
        assert_eq!(ctx.refreshed_token(), Some("A2"));
    }

    #[test]
    fn test_terminal_states() {
        assert!(ExchangeState::Succeeded.is_terminal());
        assert!(ExchangeState::RetriedFailed.is_terminal());
        assert!(ExchangeState::RefreshFailed.is_terminal());
        assert!(!ExchangeState::Refreshing.is_terminal());
        assert!(!ExchangeState::AuthFailedFirst.is_terminal());
        assert_eq!(ExchangeState::NoRefreshToken.to_string(), "NO_REFRESH_TOKEN");
    }
}
