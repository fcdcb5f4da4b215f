//! # Cart Slice
//!
//! Cart contents and their derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action             CartAction                 State Change          │
//! │  ─────────             ──────────                 ────────────          │
//! │                                                                         │
//! │  Add to cart ────────► Add(snapshot) ───────────► qty += 1 / push       │
//! │                                                                         │
//! │  + / − buttons ──────► UpdateQuantity{id, n} ───► qty = n (0 removes)   │
//! │                                                                         │
//! │  Remove ─────────────► Remove(id) ──────────────► items.retain(..)      │
//! │                                                                         │
//! │  Order placed ───────► Clear ───────────────────► items.clear()         │
//! │                                                                         │
//! │  After EVERY action: total_items / total_price recomputed from items    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No cart operation can fail. Unknown ids are ignored and negative
//! quantities clamp to zero.

use serde::{Deserialize, Serialize};

use crate::catalog::Transition;
use crate::money::Money;
use crate::types::{CartItem, ProductId, ProductSnapshot};
use crate::validation::clamp_quantity;

/// Named transitions of the cart slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a product.
    Add(ProductSnapshot),

    /// Delete a line.
    Remove(ProductId),

    /// Set a line's quantity. Clamped to ≥ 0; zero deletes the line.
    UpdateQuantity { id: ProductId, quantity: i64 },

    /// Empty the cart.
    Clear,
}

/// The cart slice.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Every item has `quantity >= 1`
/// - `total_items` and `total_price` always match `items`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    total_items: u64,
    total_price: Money,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action and recomputes the totals.
    pub fn apply(&mut self, action: CartAction) -> Transition {
        let before = self.items.clone();

        match action {
            CartAction::Add(snapshot) => {
                match self.items.iter_mut().find(|i| i.id == snapshot.id) {
                    Some(item) => item.quantity = item.quantity.saturating_add(1),
                    None => self.items.push(CartItem::from_snapshot(snapshot)),
                }
            }
            CartAction::Remove(id) => {
                self.items.retain(|i| i.id != id);
            }
            CartAction::UpdateQuantity { id, quantity } => {
                let quantity = clamp_quantity(quantity);
                if quantity == 0 {
                    self.items.retain(|i| i.id != id);
                } else if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
                    item.quantity = quantity;
                }
            }
            CartAction::Clear => {
                self.items.clear();
            }
        }

        self.recompute();

        if self.items == before {
            Transition::Unchanged
        } else {
            Transition::Changed
        }
    }

    /// Quantity + 1 for an existing line.
    pub fn increment(&mut self, id: ProductId) -> Transition {
        match self.quantity_of(id) {
            Some(quantity) => self.apply(CartAction::UpdateQuantity {
                id,
                quantity: quantity as i64 + 1,
            }),
            None => Transition::Unchanged,
        }
    }

    /// Quantity − 1 for an existing line; a line at 1 is removed.
    pub fn decrement(&mut self, id: ProductId) -> Transition {
        match self.quantity_of(id) {
            Some(quantity) => self.apply(CartAction::UpdateQuantity {
                id,
                quantity: quantity as i64 - 1,
            }),
            None => Transition::Unchanged,
        }
    }

    fn recompute(&mut self) {
        self.total_items = self.items.iter().map(|i| i.quantity as u64).sum();
        self.total_price = self.items.iter().map(CartItem::line_total).sum();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of quantities (the cart badge count).
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of price × quantity.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.item(id).map(|i| i.quantity)
    }
}
