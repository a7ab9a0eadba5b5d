//! Configuration types for telegram-client.

use std::fmt;
use std::time::Duration;

/// Default Bot API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default long-poll timeout for `getUpdates`.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to the Bot API.
#[derive(Clone)]
pub struct ClientConfig {
    /// Bot token issued by BotFather.
    pub token: String,
    /// Base URL of the API (e.g., "https://api.telegram.org").
    pub api_base: String,
    /// How long the server may hold a `getUpdates` request open.
    pub poll_timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration for the public API.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
        }
    }

    /// Use a different API server (self-hosted Bot API, test double).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    /// Get the URL for a Bot API method.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// HTTP timeout; must outlast a long poll.
    pub fn request_timeout(&self) -> Duration {
        self.poll_timeout.saturating_add(Duration::from_secs(10))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"[redacted]")
            .field("api_base", &self.api_base)
            .field("poll_timeout", &self.poll_timeout)
            .finish()
    }
}
