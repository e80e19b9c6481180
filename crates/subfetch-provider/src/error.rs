//! Error types for provider operations

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the subtitle provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Client settings are missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// API key or token rejected
    #[error("Authentication failed ({status}): {message}")]
    Authentication {
        /// Status returned by the provider
        status: StatusCode,
        /// Provider message, if any
        message: String,
    },

    /// Daily download quota used up
    #[error("Download limit exceeded: {0}")]
    DownloadLimitExceeded(String),

    /// Provider asked the client to slow down
    #[error("Too many requests")]
    TooManyRequests,

    /// Provider temporarily offline
    #[error("Service unavailable")]
    ServiceUnavailable,

    /// Any other unsuccessful response
    #[error("Provider error ({status}): {message}")]
    Provider {
        /// Status returned by the provider
        status: StatusCode,
        /// Provider message, if any
        message: String,
    },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;
