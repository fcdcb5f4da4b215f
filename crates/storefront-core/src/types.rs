//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ ProductSnapshot │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │──►│  id             │       │
//! │  │  price (Money)  │   │  title, price   │   │  quantity ≥ 1   │       │
//! │  │  discount %     │   │  thumbnail      │   │  line_total()   │       │
//! │  │  stock, rating  │   │  brand          │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ProductPage    │   │  RawCategory    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  products[≤12]  │   │  "beauty"       │──► normalize ──► "beauty"  │
//! │  │  total          │   │  {slug, name}   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are read-only: they come from the catalog API and are replaced
//! wholesale on every fetch.

use serde::{Deserialize, Serialize};

use crate::money::{self, Money};

/// Catalog identifier shared by products and cart items.
pub type ProductId = u64;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1294 bps = 12.94% (the API sends `"discountPercentage": 12.94`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points, capped at 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > 10_000 {
            DiscountRate(10_000)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a discount rate from a percentage as the API reports it.
    ///
    /// Negative or non-finite percentages are treated as no discount.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return DiscountRate::zero();
        }
        DiscountRate::from_bps((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product record as served by the catalog API.
///
/// Fields the API may omit for some products (`brand`, `description`,
/// `images`) default to empty values so one sparse record cannot fail a
/// whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// List price, converted from the API's decimal number.
    #[serde(with = "money::as_decimal")]
    pub price: Money,

    /// Discount as a percentage (e.g. `12.94`).
    #[serde(default)]
    pub discount_percentage: f64,

    /// Average rating, 0.0 - 5.0.
    #[serde(default)]
    pub rating: f64,

    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub brand: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    #[inline]
    pub fn discount_rate(&self) -> DiscountRate {
        DiscountRate::from_percentage(self.discount_percentage)
    }

    /// Price after discount: `price × (1 − discountPercentage / 100)`,
    /// rounded to the cent.
    pub fn discounted_price(&self) -> Money {
        self.price.apply_discount(self.discount_rate())
    }

    /// True when the card should show a discount badge and strike price.
    pub fn has_discount(&self) -> bool {
        !self.discount_rate().is_zero()
    }

    /// Out-of-stock products cannot be added to the cart.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Number of filled stars for the rating (floor, at most 5).
    pub fn full_stars(&self) -> u8 {
        if !self.rating.is_finite() || self.rating <= 0.0 {
            return 0;
        }
        self.rating.floor().min(5.0) as u8
    }
}

/// One page of results from a catalog listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,

    /// Total matching products across all pages.
    pub total: u64,

    #[serde(default)]
    pub skip: u64,

    #[serde(default)]
    pub limit: u64,
}

// =============================================================================
// Cart Types
// =============================================================================

/// The product fields captured when it is added to the cart.
///
/// The cart keeps its own copy so the displayed line does not change when
/// a later catalog fetch replaces the product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub thumbnail: String,
    pub brand: String,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        ProductSnapshot {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            brand: product.brand.clone(),
        }
    }
}

/// An item in the shopping cart.
///
/// ## Invariants
/// - At most one `CartItem` per `id` in a cart
/// - `quantity >= 1` (an item whose quantity reaches zero is removed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub thumbnail: String,
    pub brand: String,
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart line with quantity 1.
    pub fn from_snapshot(snapshot: ProductSnapshot) -> Self {
        CartItem {
            id: snapshot.id,
            title: snapshot.title,
            price: snapshot.price,
            thumbnail: snapshot.thumbnail,
            brand: snapshot.brand,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

// =============================================================================
// Categories
// =============================================================================

/// A category descriptor as the category endpoint returns it.
///
/// Older API versions return plain strings, newer ones return objects:
/// ```json
/// ["beauty", {"slug": "furniture", "name": "Furniture", "url": "..."}]
/// ```
/// Descriptor fields are kept as raw JSON so a numeric `slug` still names
/// the category. Anything else is captured by `Other` so an odd entry
/// cannot fail the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    Name(String),
    Descriptor {
        #[serde(default)]
        slug: Option<serde_json::Value>,
        #[serde(default)]
        name: Option<serde_json::Value>,
    },
    Other(serde_json::Value),
}

impl RawCategory {
    /// Reduces a descriptor to its display string.
    ///
    /// Preference: `slug`, then `name`, then the plain string. Empty
    /// strings, zero, `false` and `null` count as missing.
    pub fn normalize(&self) -> Option<String> {
        fn label(value: &Option<serde_json::Value>) -> Option<String> {
            use serde_json::Value;

            match value.as_ref()? {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
                Value::Bool(true) => Some("true".to_string()),
                _ => None,
            }
        }

        match self {
            RawCategory::Name(name) if !name.is_empty() => Some(name.clone()),
            RawCategory::Name(_) => None,
            RawCategory::Descriptor { slug, name } => label(slug).or_else(|| label(name)),
            RawCategory::Other(_) => None,
        }
    }
}

/// Normalizes a raw category list into plain display strings, dropping
/// entries that carry no usable name.
pub fn normalize_categories(raw: &[RawCategory]) -> Vec<String> {
    raw.iter().filter_map(RawCategory::normalize).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> Product {
        serde_json::from_str(
            r#"{
                "id": 1,
                "title": "iPhone 9",
                "description": "An apple mobile",
                "price": 549,
                "discountPercentage": 12.96,
                "rating": 4.69,
                "stock": 94,
                "brand": "Apple",
                "category": "smartphones",
                "thumbnail": "https://cdn.dummyjson.com/1/thumbnail.jpg",
                "images": ["https://cdn.dummyjson.com/1/1.jpg"],
                "tags": ["ignored"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_product_deserializes_api_shape() {
        let product = phone();
        assert_eq!(product.id, 1);
        assert_eq!(product.price.cents(), 54900);
        assert_eq!(product.discount_rate().bps(), 1296);
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_sparse_product_uses_defaults() {
        let product: Product =
            serde_json::from_str(r#"{"id": 5, "title": "Apple", "price": 1.99}"#).unwrap();
        assert_eq!(product.brand, "");
        assert!(product.images.is_empty());
        assert!(!product.in_stock());
    }

    #[test]
    fn test_discounted_price() {
        let product = phone();
        // 54900 × 12.96% = 7115.04 → 7115 off
        assert_eq!(product.discounted_price().cents(), 47785);
        assert!(product.has_discount());
    }

    #[test]
    fn test_full_stars() {
        let mut product = phone();
        assert_eq!(product.full_stars(), 4);
        product.rating = 7.2;
        assert_eq!(product.full_stars(), 5);
        product.rating = -1.0;
        assert_eq!(product.full_stars(), 0);
    }

    #[test]
    fn test_discount_rate_bounds() {
        assert_eq!(DiscountRate::from_percentage(-5.0), DiscountRate::zero());
        assert_eq!(DiscountRate::from_percentage(250.0).bps(), 10_000);
        assert_eq!(DiscountRate::from_bps(17_000).bps(), 10_000);
    }

    #[test]
    fn test_cart_item_from_product() {
        let item = CartItem::from_snapshot(ProductSnapshot::from(&phone()));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price.cents(), 54900);
        assert_eq!(item.brand, "Apple");
    }

    #[test]
    fn test_normalize_mixed_categories() {
        let raw: Vec<RawCategory> =
            serde_json::from_str(r#"[{"slug": "beauty"}, "furniture"]"#).unwrap();
        assert_eq!(normalize_categories(&raw), vec!["beauty", "furniture"]);
    }

    #[test]
    fn test_normalize_prefers_slug_then_name() {
        let raw: Vec<RawCategory> = serde_json::from_str(
            r#"[
                {"slug": "home-decoration", "name": "Home Decoration", "url": "x"},
                {"slug": "", "name": "Groceries"},
                {"url": "only-a-url"},
                42,
                ""
            ]"#,
        )
        .unwrap();
        assert_eq!(
            normalize_categories(&raw),
            vec!["home-decoration", "Groceries"]
        );
    }

    #[test]
    fn test_normalize_non_string_fields() {
        let raw: Vec<RawCategory> = serde_json::from_str(
            r#"[
                {"slug": 5},
                {"slug": 0, "name": "Tops"},
                {"slug": null, "name": ["nested"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(normalize_categories(&raw), vec!["5", "Tops"]);
    }
}
