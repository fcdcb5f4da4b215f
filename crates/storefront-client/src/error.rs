//! # Client Error Types
//!
//! Error types for configuration and catalog fetches.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Fetch       │  │     Internal            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  FetchFailed    │  │  HttpClient             │ │
//! │  │  InvalidUrl     │  │  (transport,    │  │  ChannelClosed          │ │
//! │  │  ConfigLoad/Save│  │   status, body) │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed fetch has one kind only. Its message is what ends up in the
//! catalog state's `error` field.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Fetch Errors
    // =========================================================================
    /// Transport failure, non-2xx status, or an undecodable body.
    #[error("{0}")]
    FetchFailed(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// The HTTP client could not be built (TLS backend, bad user agent).
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// A background task's channel closed.
    #[error("Channel closed: {0}")]
    ChannelClosed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return ClientError::HttpClient(err.to_string());
        }
        if let Some(status) = err.status() {
            return ClientError::FetchFailed(format!(
                "Request failed with status code {}",
                status.as_u16()
            ));
        }
        if err.is_timeout() {
            return ClientError::FetchFailed("Request timed out".to_string());
        }
        ClientError::FetchFailed(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// True when the same request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::FetchFailed(_))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::FetchFailed("timeout".into()).is_retryable());
        assert!(!ClientError::InvalidConfig("bad".into()).is_retryable());
        assert!(!ClientError::HttpClient("tls".into()).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(ClientError::InvalidUrl("x".into()).is_config_error());
        assert!(!ClientError::FetchFailed("x".into()).is_config_error());
    }

    #[test]
    fn test_fetch_failed_message_is_bare() {
        let err = ClientError::FetchFailed("Request failed with status code 404".into());
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }

    #[test]
    fn test_url_parse_error_converts() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
