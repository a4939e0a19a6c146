//! Client configuration.
//!
//! The base address is external configuration; the library never reads the
//! environment on its own. The binary calls [`ClientConfig::from_env`].

use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "EVENTMAP_API_URL";

/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "EVENTMAP_TIMEOUT_SECS";

/// Configuration for the authenticated API client.
///
/// # Example
///
/// ```ignore
/// use eventmap::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://api.example.com")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST service, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. Expiry is a transport failure, never an auth one.
    pub timeout: Duration,
    /// Login endpoint path.
    pub login_path: String,
    /// Token refresh endpoint path.
    pub refresh_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            login_path: "/auth/login/".to_string(),
            refresh_path: "/auth/token/refresh/".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `EVENTMAP_API_URL` and `EVENTMAP_TIMEOUT_SECS`,
    /// falling back to defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, secs),
            }
        }

        config
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for a path on the service.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL of the login endpoint.
    pub fn login_url(&self) -> String {
        self.url(&self.login_path)
    }

    /// Absolute URL of the refresh endpoint.
    pub fn refresh_url(&self) -> String {
        self.url(&self.refresh_path)
    }
}
