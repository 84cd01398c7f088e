//! Client configuration.
//!
//! Values are fixed at compile time; `OTDASH_API_BASE_URL` overrides the API base.

use chrono::TimeDelta;

const DEFAULT_API_BASE_URL: &str = "/api";

/// Settings shared by the session manager, the endpoints and the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to. May be relative in the browser.
    pub api_base_url: String,
    /// Minimum gap between two pending-notification fetches.
    pub notification_throttle: TimeDelta,
    /// How many pending items the notification dropdown asks for.
    pub pending_notification_limit: u32,
    /// Page size used to load every employee into a select.
    pub lookup_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("OTDASH_API_BASE_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            notification_throttle: TimeDelta::milliseconds(800),
            pending_notification_limit: 8,
            lookup_limit: 5000,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}
