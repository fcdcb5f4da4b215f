//! # storefront-core: Pure State for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the three state
//! slices and their reducers as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (terminal UI)                          │   │
//! │  │   search box ──► category pick ──► page click ──► add to cart   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Action                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-client (effects)                        │   │
//! │  │    dispatch ──► query changed? ──► fetch ──► dispatch result    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   auth    │  │   store   │  │   │
//! │  │   │  query    │  │  items    │  │  session  │  │ dispatch  │  │   │
//! │  │   │  results  │  │  totals   │  │           │  │ selectors │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO TIMERS • PURE TRANSITIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, categories)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Products slice: query state, fetch results, pagination
//! - [`cart`] - Cart slice: items and recomputed totals
//! - [`auth`] - Auth slice: signed-in user
//! - [`store`] - State container with a single `dispatch` entry point
//! - [`checkout`] - Checkout summary and order placement
//! - [`error`] - Domain error types
//! - [`validation`] - Input sanitization for the UI boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::CartAction;
//! use storefront_core::money::Money;
//! use storefront_core::store::{Action, Store};
//! use storefront_core::types::ProductSnapshot;
//!
//! let mut store = Store::new();
//! let lamp = ProductSnapshot {
//!     id: 7,
//!     title: "Desk Lamp".into(),
//!     price: Money::from_cents(1000),
//!     thumbnail: String::new(),
//!     brand: "Lumen".into(),
//! };
//!
//! store.dispatch(Action::Cart(CartAction::Add(lamp.clone())));
//! store.dispatch(Action::Cart(CartAction::Add(lamp)));
//!
//! assert_eq!(store.cart.total_items(), 2);
//! assert_eq!(store.cart.total_price().cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products requested per catalog page.
///
/// Every listing endpoint is called with `limit=PAGE_SIZE` and
/// `skip=(page - 1) * PAGE_SIZE`.
pub const PAGE_SIZE: u32 = 12;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Idle time before typed search text is committed to the query (ms).
pub const SEARCH_DEBOUNCE_MS: u64 = 700;

/// Numbered page links shown at once by the pagination control.
pub const MAX_VISIBLE_PAGES: u32 = 5;
