//! # Cart Commands
//!
//! All cart commands need a signed-in user. Without one the user is sent
//! to `login`, the way the web storefront redirects to its sign-in page.
//!
//! Changing a line that is not in the cart leaves the cart alone and is not
//! an error; the reply just says nothing changed.

use storefront_core::cart::CartAction;
use storefront_core::checkout::require_session;
use storefront_core::ProductId;

use crate::error::ApiError;
use crate::render;
use crate::state::ShellState;

fn ensure_signed_in(state: &ShellState) -> Result<(), ApiError> {
    state
        .storefront
        .with_store(|s| require_session(&s.auth).map(|_| ()))?;
    Ok(())
}

/// `Some(reply)` when `id` has no cart line and there is nothing to do.
fn missing_line(state: &ShellState, id: ProductId) -> Result<Option<String>, ApiError> {
    ensure_signed_in(state)?;
    if state.storefront.with_store(|s| s.cart.item(id).is_some()) {
        return Ok(None);
    }
    Ok(Some(format!("Product #{} is not in the cart. Nothing changed.", id)))
}

fn cart_view(state: &ShellState) -> String {
    state.storefront.with_store(render::cart)
}

pub fn add(state: &ShellState, id: ProductId) -> Result<String, ApiError> {
    state.storefront.add_to_cart(id)?;

    Ok(state.storefront.with_store(|s| {
        let title = s.cart.item(id).map(|i| i.title.as_str()).unwrap_or_default();
        format!(
            "Added {} to cart. Cart: {} item(s), {}",
            title,
            s.cart.total_items(),
            s.cart.total_price()
        )
    }))
}

pub fn increment(state: &ShellState, id: ProductId) -> Result<String, ApiError> {
    if let Some(reply) = missing_line(state, id)? {
        return Ok(reply);
    }
    state.storefront.increment(id);
    Ok(cart_view(state))
}

pub fn decrement(state: &ShellState, id: ProductId) -> Result<String, ApiError> {
    if let Some(reply) = missing_line(state, id)? {
        return Ok(reply);
    }
    state.storefront.decrement(id);
    Ok(cart_view(state))
}

pub async fn set_quantity(
    state: &ShellState,
    id: ProductId,
    quantity: i64,
) -> Result<String, ApiError> {
    if let Some(reply) = missing_line(state, id)? {
        return Ok(reply);
    }
    state
        .storefront
        .dispatch(CartAction::UpdateQuantity { id, quantity })
        .await;
    Ok(cart_view(state))
}

pub async fn remove(state: &ShellState, id: ProductId) -> Result<String, ApiError> {
    if let Some(reply) = missing_line(state, id)? {
        return Ok(reply);
    }
    state.storefront.dispatch(CartAction::Remove(id)).await;
    Ok(cart_view(state))
}

pub fn show(state: &ShellState) -> Result<String, ApiError> {
    ensure_signed_in(state)?;
    Ok(cart_view(state))
}
