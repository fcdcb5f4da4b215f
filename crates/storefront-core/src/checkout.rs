//! # Checkout
//!
//! Order summary and placement. There is no payment processor: a placed
//! order always succeeds once the gates pass.
//!
//! ## Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store::place_order()                              │
//! │                                                                         │
//! │  1. Signed in?      ──no──► CoreError::NotAuthenticated (go sign in)    │
//! │  2. Cart non-empty? ──no──► CoreError::EmptyCart                        │
//! │  3. Summary snapshot of the cart                                        │
//! │  4. OrderConfirmation { order_id: UUID v4, placed_at: now, summary }    │
//! │  5. CartAction::Clear                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthState, User};
use crate::cart::CartState;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::CartItem;

/// What the checkout page shows.
///
/// Shipping is always free and no tax is charged, so `total == subtotal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl CheckoutSummary {
    pub fn from_cart(cart: &CartState) -> Self {
        let subtotal = cart.total_price();
        let shipping = Money::zero();
        let tax = Money::zero();

        CheckoutSummary {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub summary: CheckoutSummary,
}

impl OrderConfirmation {
    pub fn new(summary: CheckoutSummary) -> Self {
        OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            summary,
        }
    }
}

/// Returns the signed-in user or `NotAuthenticated`.
pub fn require_session(auth: &AuthState) -> CoreResult<&User> {
    auth.user().ok_or(CoreError::NotAuthenticated)
}

/// Checks both placement gates and returns the summary to place.
pub fn prepare_order(auth: &AuthState, cart: &CartState) -> CoreResult<CheckoutSummary> {
    require_session(auth)?;

    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    Ok(CheckoutSummary::from_cart(cart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthAction;
    use crate::cart::CartAction;
    use crate::types::ProductSnapshot;

    fn cart_with_one() -> CartState {
        let mut cart = CartState::new();
        cart.apply(CartAction::Add(ProductSnapshot {
            id: 1,
            title: "Mascara".into(),
            price: Money::from_cents(999),
            thumbnail: String::new(),
            brand: "Essence".into(),
        }));
        cart
    }

    #[test]
    fn test_summary_is_free_of_shipping_and_tax() {
        let summary = CheckoutSummary::from_cart(&cart_with_one());
        assert_eq!(summary.subtotal.cents(), 999);
        assert!(summary.shipping.is_zero());
        assert!(summary.tax.is_zero());
        assert_eq!(summary.total, summary.subtotal);
        assert_eq!(summary.total_items, 1);
    }

    #[test]
    fn test_prepare_order_gates() {
        let mut auth = AuthState::new();
        let cart = cart_with_one();

        assert!(matches!(
            prepare_order(&auth, &cart),
            Err(CoreError::NotAuthenticated)
        ));

        auth.apply(AuthAction::sign_in("emilys"));
        assert!(matches!(
            prepare_order(&auth, &CartState::new()),
            Err(CoreError::EmptyCart)
        ));

        let summary = prepare_order(&auth, &cart).unwrap();
        assert_eq!(summary.items.len(), 1);
    }

    #[test]
    fn test_confirmations_get_distinct_ids() {
        let summary = CheckoutSummary::from_cart(&cart_with_one());
        let a = OrderConfirmation::new(summary.clone());
        let b = OrderConfirmation::new(summary);
        assert_ne!(a.order_id, b.order_id);
    }
}
