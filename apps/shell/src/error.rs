//! # Shell Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "add 4"                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Command::parse ── ValidationError ──────────────┐                      │
//! │     │                                            │                      │
//! │     ▼                                            ▼                      │
//! │  execute ──────── CoreError (NotAuthenticated) ─► ApiError ─► terminal  │
//! │     │                                            ▲                      │
//! │     ▼                                            │                      │
//! │  Storefront ───── ClientError (config, client) ──┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch failures do not come through here: they land in the catalog
//! state's `error` and are rendered with the product list.

use serde::Serialize;
use storefront_client::ClientError;
use storefront_core::{CoreError, ValidationError};

/// What the user sees when a command fails.
///
/// ```json
/// { "code": "NOT_AUTHENTICATED", "message": "You need to sign in first" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not on the current page
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Action needs a signed-in user
    NotAuthenticated,

    /// Product has no stock
    OutOfStock,

    /// Checkout refused (empty cart)
    CheckoutError,

    /// Catalog API unreachable or misbehaving
    FetchError,

    /// Bad configuration
    ConfigError,

    /// Unrecognized command word
    UnknownCommand,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn unknown_command(word: &str) -> Self {
        ApiError::new(
            ErrorCode::UnknownCommand,
            format!("Unknown command '{}'. Type `help` for the list.", word),
        )
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAuthenticated => ApiError::new(
                ErrorCode::NotAuthenticated,
                "You need to sign in first. Use `login <username>`.",
            ),
            CoreError::EmptyCart => ApiError::new(ErrorCode::CheckoutError, err.to_string()),
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::OutOfStock { .. } => ApiError::new(ErrorCode::OutOfStock, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        if err.is_config_error() {
            return ApiError::new(ErrorCode::ConfigError, err.to_string());
        }
        match err {
            ClientError::FetchFailed(message) => ApiError::new(ErrorCode::FetchError, message),
            other => {
                tracing::error!("Client error: {}", other);
                ApiError::internal(other.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        assert_eq!(
            ApiError::from(CoreError::NotAuthenticated).code,
            ErrorCode::NotAuthenticated
        );
        assert_eq!(ApiError::from(CoreError::EmptyCart).code, ErrorCode::CheckoutError);

        let err = ApiError::from(CoreError::ProductNotFound(12));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 12");
    }

    #[test]
    fn test_client_error_codes() {
        let err = ApiError::from(ClientError::InvalidUrl("x".into()));
        assert_eq!(err.code, ErrorCode::ConfigError);

        let err = ApiError::from(ClientError::FetchFailed("offline".into()));
        assert_eq!(err.code, ErrorCode::FetchError);
        assert_eq!(err.message, "offline");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("page must be between 1 and 3");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "page must be between 1 and 3");
    }

    #[test]
    fn test_display() {
        let err = ApiError::unknown_command("buy");
        assert!(err.to_string().starts_with("[UnknownCommand]"));
    }
}
