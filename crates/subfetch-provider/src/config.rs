//! Configuration for the provider client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.opensubtitles.com/api/v1";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`OpenSubtitlesClient`](crate::OpenSubtitlesClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// REST endpoint, without a trailing path
    pub base_url: String,

    /// Consumer API key; required to build a client
    pub api_key: Option<String>,

    /// User agent sent with every request
    pub user_agent: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    /// Create configuration from environment variables
    ///
    /// Reads `SUBFETCH_API_URL`, `SUBFETCH_API_KEY`, `SUBFETCH_USER_AGENT`
    /// and `SUBFETCH_TIMEOUT` (seconds). Unset or unparsable values fall back
    /// to the defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SUBFETCH_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var("SUBFETCH_API_KEY").ok(),
            user_agent: std::env::var("SUBFETCH_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
            timeout: Duration::from_secs(
                std::env::var("SUBFETCH_TIMEOUT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the REST endpoint
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// API key, if set to something other than whitespace
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn default_user_agent() -> String {
    format!("subfetch v{}", env!("CARGO_PKG_VERSION"))
}
