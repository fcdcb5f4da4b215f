//! # Store
//!
//! The state container: three slices behind one `dispatch` entry point.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Action::Catalog(..) ──► CatalogState::apply                            │
//! │  Action::Cart(..)    ──► CartState::apply                               │
//! │  Action::Auth(..)    ──► AuthState::apply                               │
//! │                                                                         │
//! │  Slices never call each other. Anything that needs two slices (the     │
//! │  add-to-cart gate, checkout) is a selector or method here.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::auth::{AuthAction, AuthState};
use crate::cart::{CartAction, CartState};
use crate::catalog::{CatalogAction, CatalogState, Transition};
use crate::checkout::{self, CheckoutSummary, OrderConfirmation};
use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId, ProductSnapshot};

/// Every named transition, tagged with the slice that owns it.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Catalog(CatalogAction),
    Cart(CartAction),
    Auth(AuthAction),
}

impl From<CatalogAction> for Action {
    fn from(action: CatalogAction) -> Self {
        Action::Catalog(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

/// Storefront state.
///
/// Slice fields are public for reading; their own fields are private, so
/// `dispatch` remains the only way to change anything.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub auth: AuthState,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes an action to its slice.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Transition {
        match action.into() {
            Action::Catalog(action) => self.catalog.apply(action),
            Action::Cart(action) => self.cart.apply(action),
            Action::Auth(action) => self.auth.apply(action),
        }
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// A product on the currently loaded page.
    pub fn find_product(&self, id: ProductId) -> CoreResult<&Product> {
        self.catalog.product(id).ok_or(CoreError::ProductNotFound(id))
    }

    /// Signed in and the product is in stock.
    pub fn can_add_to_cart(&self, product: &Product) -> bool {
        self.auth.is_authenticated() && product.in_stock()
    }

    /// Adds a product from the current page, applying the session and
    /// stock gates first.
    pub fn add_to_cart(&mut self, id: ProductId) -> CoreResult<Transition> {
        checkout::require_session(&self.auth)?;

        let product = self.find_product(id)?;
        if !product.in_stock() {
            return Err(CoreError::OutOfStock {
                id,
                title: product.title.clone(),
            });
        }

        let snapshot = ProductSnapshot::from(product);
        Ok(self.dispatch(CartAction::Add(snapshot)))
    }

    /// The checkout page view. Requires a session.
    pub fn checkout_summary(&self) -> CoreResult<CheckoutSummary> {
        checkout::require_session(&self.auth)?;
        Ok(CheckoutSummary::from_cart(&self.cart))
    }

    /// Places the order and clears the cart.
    pub fn place_order(&mut self) -> CoreResult<OrderConfirmation> {
        let summary = checkout::prepare_order(&self.auth, &self.cart)?;
        let confirmation = OrderConfirmation::new(summary);
        self.dispatch(CartAction::Clear);
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RequestId;
    use crate::money::Money;
    use crate::types::ProductPage;

    fn product(id: ProductId, stock: u32) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            price: Money::from_cents(2500),
            discount_percentage: 10.0,
            rating: 3.5,
            stock,
            brand: "Brand".to_string(),
            category: "beauty".to_string(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    fn loaded_store() -> Store {
        let mut store = Store::new();
        let request = RequestId::new(1);
        store.dispatch(CatalogAction::FetchStarted { request });
        store.dispatch(CatalogAction::FetchSucceeded {
            request,
            page: ProductPage {
                products: vec![product(1, 5), product(2, 0)],
                total: 2,
                skip: 0,
                limit: 12,
            },
        });
        store
    }

    #[test]
    fn test_dispatch_routes_to_slices() {
        let mut store = Store::new();
        store.dispatch(Action::Catalog(CatalogAction::SetCategory("beauty".into())));
        store.dispatch(AuthAction::sign_in("emilys"));

        assert_eq!(store.catalog.query().category, "beauty");
        assert!(store.auth.is_authenticated());
        assert!(store.cart.is_empty());
    }

    #[test]
    fn test_add_to_cart_requires_session() {
        let mut store = loaded_store();
        assert!(matches!(
            store.add_to_cart(1),
            Err(CoreError::NotAuthenticated)
        ));
        assert!(store.cart.is_empty());
    }

    #[test]
    fn test_add_to_cart_checks_stock_and_presence() {
        let mut store = loaded_store();
        store.dispatch(AuthAction::sign_in("emilys"));

        assert!(matches!(
            store.add_to_cart(2),
            Err(CoreError::OutOfStock { id: 2, .. })
        ));
        assert!(matches!(
            store.add_to_cart(77),
            Err(CoreError::ProductNotFound(77))
        ));

        store.add_to_cart(1).unwrap();
        // Cart uses the list price, not the discounted one.
        assert_eq!(store.cart.total_price().cents(), 2500);
    }

    #[test]
    fn test_can_add_to_cart() {
        let mut store = loaded_store();
        let in_stock = product(1, 5);
        assert!(!store.can_add_to_cart(&in_stock));

        store.dispatch(AuthAction::sign_in("emilys"));
        assert!(store.can_add_to_cart(&in_stock));
        assert!(!store.can_add_to_cart(&product(2, 0)));
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut store = loaded_store();
        store.dispatch(AuthAction::sign_in("emilys"));
        store.add_to_cart(1).unwrap();
        store.add_to_cart(1).unwrap();

        let confirmation = store.place_order().unwrap();
        assert_eq!(confirmation.summary.total_items, 2);
        assert_eq!(confirmation.summary.total.cents(), 5000);
        assert!(store.cart.is_empty());

        assert!(matches!(store.place_order(), Err(CoreError::EmptyCart)));
    }

    #[test]
    fn test_checkout_summary_requires_session() {
        let store = loaded_store();
        assert!(matches!(
            store.checkout_summary(),
            Err(CoreError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_store_serializes_for_state_dump() {
        let store = loaded_store();
        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["catalog"]["totalProducts"], 2);
        assert_eq!(json["cart"]["totalItems"], 0);
    }
}
