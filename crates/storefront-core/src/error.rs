//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - Checkout / UI gate failures                     │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront-client errors (separate crate)                              │
//! │  └── ClientError      - Config and fetch failures                       │
//! │                                                                         │
//! │  Shell errors (in app)                                                  │
//! │  └── ApiError         - What the user sees (coded)                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → terminal                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart and catalog reducers never fail: their inputs are clamped instead.
//! Errors here come from the gates around them (sign-in, stock, checkout).

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Storefront domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An action that needs a session was attempted while signed out.
    ///
    /// ## When This Occurs
    /// - Add to cart without signing in
    /// - Opening or placing checkout without signing in
    ///
    /// The UI answers this by redirecting to sign-in.
    #[error("You need to sign in first")]
    NotAuthenticated,

    /// Checkout was placed with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// Product is not on the currently loaded catalog page.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product has no stock left.
    #[error("{title} is out of stock")]
    OutOfStock { id: ProductId, title: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before an action is dispatched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a non-numeric id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
