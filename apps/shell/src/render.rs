//! # Rendering
//!
//! Plain-text views of the store: the product grid, pagination, cart,
//! checkout and receipt.

use storefront_core::catalog::{CatalogState, PageLink};
use storefront_core::checkout::{CheckoutSummary, OrderConfirmation};
use storefront_core::store::Store;
use storefront_core::types::{CartItem, Product};
use storefront_core::ALL_CATEGORIES;

const RULE: &str = "------------------------------------------------------------";

pub const HELP: &str = "\
Browse
  products              show the current page
  search <text>         search products (empty text clears)
  category <name|all>   filter by category
  categories            list categories
  page <n> | next | prev
  clear                 reset search, category and page
  show <id>             product details
  retry                 fetch the unfiltered listing again

Cart (sign-in required)
  add <id>              add one to the cart
  inc <id> | dec <id>   change quantity by one
  qty <id> <n>          set quantity (0 removes)
  remove <id>
  cart                  show the cart

Checkout
  checkout              order summary
  place-order           place the order

Session
  login <username> | logout | whoami

Other
  state                 dump the store as JSON
  help | quit";

/// First letter upper-cased, as the category picker shows names.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn stars(product: &Product) -> String {
    let full = product.full_stars() as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// One line per product, as a card would show it.
pub fn product_line(product: &Product) -> String {
    let price = if product.has_discount() {
        format!(
            "{} (was {}, -{}%)",
            product.discounted_price(),
            product.price,
            product.discount_rate().percentage()
        )
    } else {
        product.price.to_string()
    };

    let stock = if product.in_stock() {
        format!("In Stock ({})", product.stock)
    } else {
        "Out of Stock".to_string()
    };

    format!(
        "  #{:<4} {}  [{}]  {} ({})  {}  {}",
        product.id,
        product.title,
        product.brand,
        stars(product),
        product.rating,
        price,
        stock
    )
}

pub fn product_detail(product: &Product) -> String {
    let mut lines = vec![
        format!("#{} {}", product.id, product.title),
        RULE.to_string(),
        format!("Brand:    {}", product.brand),
        format!("Category: {}", product.category),
        format!("Rating:   {} ({})", stars(product), product.rating),
        format!("Price:    {}", product.discounted_price()),
    ];
    if product.has_discount() {
        lines.push(format!(
            "          was {} (-{}%)",
            product.price,
            product.discount_rate().percentage()
        ));
    }
    lines.push(if product.in_stock() {
        format!("Stock:    {}", product.stock)
    } else {
        "Stock:    Out of Stock".to_string()
    });
    if !product.description.is_empty() {
        lines.push(String::new());
        lines.push(product.description.clone());
    }
    lines.join("\n")
}

/// `< Previous  1 2 [3] 4 5 ... 17  Next >`
pub fn pagination(catalog: &CatalogState) -> String {
    let current = catalog.query().page;
    let links: Vec<String> = catalog
        .page_links()
        .into_iter()
        .map(|link| match link {
            PageLink::Page(n) if n == current => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "...".to_string(),
        })
        .collect();

    let prev = if catalog.has_previous() { "< Previous" } else { "  " };
    let next = if catalog.has_next() { "Next >" } else { "" };
    format!("{}  {}  {}", prev, links.join(" "), next)
        .trim_end()
        .to_string()
}

/// The home page: filters, then error / loading / grid + pagination.
pub fn catalog(store: &Store) -> String {
    let catalog = &store.catalog;
    let query = catalog.query();

    let category = if query.category == ALL_CATEGORIES {
        "All Categories".to_string()
    } else {
        capitalize(&query.category)
    };
    let mut lines = vec![format!(
        "Category: {}   Search: \"{}\"   Cart: {} item(s)",
        category,
        query.search,
        store.cart.total_items()
    )];
    lines.push(RULE.to_string());

    if let Some(error) = catalog.error() {
        lines.push("Error loading products".to_string());
        lines.push(format!("  {}", error));
        lines.push("Type `retry` to try again.".to_string());
        return lines.join("\n");
    }

    if catalog.is_loading() {
        lines.push("Loading products...".to_string());
        return lines.join("\n");
    }

    if catalog.products().is_empty() {
        lines.push("No products found.".to_string());
    } else {
        lines.extend(catalog.products().iter().map(product_line));
    }

    if catalog.shows_pagination() {
        lines.push(RULE.to_string());
        lines.push(format!(
            "Page {} of {} ({} products)",
            query.page,
            catalog.total_pages(),
            catalog.total_products()
        ));
        lines.push(pagination(catalog));
    }

    lines.join("\n")
}

pub fn categories(catalog: &CatalogState) -> String {
    let mut lines = vec![format!("  {:<24} All Categories", ALL_CATEGORIES)];
    lines.extend(
        catalog
            .categories()
            .iter()
            .map(|name| format!("  {:<24} {}", name, capitalize(name))),
    );
    lines.join("\n")
}

fn cart_line(item: &CartItem) -> String {
    format!(
        "  #{:<4} {} [{}]  {} x {} = {}",
        item.id,
        item.title,
        item.brand,
        item.price,
        item.quantity,
        item.line_total()
    )
}

pub fn cart(store: &Store) -> String {
    if store.cart.is_empty() {
        return "Your cart is empty. Add some products to proceed with checkout.".to_string();
    }

    let mut lines = vec![format!("Cart Items ({})", store.cart.total_items())];
    lines.push(RULE.to_string());
    lines.extend(store.cart.items().iter().map(cart_line));
    lines.push(RULE.to_string());
    lines.push(format!("Total: {}", store.cart.total_price()));
    lines.join("\n")
}

pub fn checkout(summary: &CheckoutSummary) -> String {
    if summary.is_empty() {
        return "Your cart is empty. Add some products to proceed with checkout.".to_string();
    }

    let mut lines = vec!["Checkout".to_string(), RULE.to_string()];
    lines.extend(summary.items.iter().map(cart_line));
    lines.push(RULE.to_string());
    lines.push("Order Summary".to_string());
    lines.push(format!("  Items ({}): {}", summary.total_items, summary.subtotal));
    lines.push(if summary.shipping.is_zero() {
        "  Shipping: Free".to_string()
    } else {
        format!("  Shipping: {}", summary.shipping)
    });
    lines.push(format!("  Tax: {}", summary.tax));
    lines.push(format!("  Total: {}", summary.total));
    lines.push(String::new());
    lines.push("Type `place-order` to place the order.".to_string());
    lines.join("\n")
}

pub fn confirmation(order: &OrderConfirmation) -> String {
    [
        "Order placed successfully! Thank you for your purchase.".to_string(),
        format!("  Order:  {}", order.order_id),
        format!("  Placed: {}", order.placed_at.format("%Y-%m-%d %H:%M:%S UTC")),
        format!(
            "  Total:  {} for {} item(s)",
            order.summary.total, order.summary.total_items
        ),
    ]
    .join("\n")
}
