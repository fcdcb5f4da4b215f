//! # Validation Module
//!
//! Input sanitization for the storefront UI boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell command parsing                                         │
//! │  ├── Typed arguments (ids, numbers)                                     │
//! │  └── THIS MODULE: length limits, required fields                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Reducers                                                      │
//! │  ├── Clamp instead of fail (quantity ≥ 0, page ≥ 1)                     │
//! │  └── Never return errors                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog API                                                   │
//! │  └── URL encoding of path segments and query parameters                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{clamp_quantity, validate_search_query};
//!
//! assert_eq!(validate_search_query("  phone ").unwrap(), "phone");
//! assert_eq!(clamp_quantity(-3), 0);
//! ```

use crate::error::ValidationError;
use crate::types::ProductId;
use crate::ALL_CATEGORIES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest search text sent to the catalog API.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Longest username accepted at sign-in.
pub const MAX_USERNAME_LENGTH: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (clears the search filter)
/// - Surrounding whitespace is trimmed, so `"   "` clears the filter too
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(query.to_string())
}

/// Normalizes a category pick.
///
/// An empty pick means "all categories".
pub fn normalize_category(category: &str) -> String {
    let category = category.trim();
    if category.is_empty() {
        ALL_CATEGORIES.to_string()
    } else {
        category.to_string()
    }
}

/// Validates a sign-in username.
///
/// ## Rules
/// - Must not be empty
/// - Maximum 50 characters
pub fn validate_username(username: &str) -> ValidationResult<String> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LENGTH,
        });
    }

    Ok(username.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a product id typed by the user.
pub fn parse_product_id(raw: &str) -> ValidationResult<ProductId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    raw.parse::<ProductId>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: format!("'{}' is not a number", raw),
        })
}

/// Clamps a requested cart quantity to `0..=u32::MAX`.
///
/// ## Cart Workflow
/// ```text
/// qty - 1 button on a line with quantity 1
///      │
///      ▼
/// clamp_quantity(0) ──► 0 ──► line removed
///
/// typed quantity -5 ──► clamp_quantity(-5) ──► 0 ──► line removed
/// ```
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(0, u32::MAX as i64) as u32
}

/// Clamps a requested page number to be at least 1.
pub fn clamp_page(requested: i64) -> u32 {
    requested.clamp(1, u32::MAX as i64) as u32
}

// =============================================================================
// Unit Tests
// =============================================================================
