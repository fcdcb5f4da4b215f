//! # Checkout Commands
//!
//! No payment step: placing the order prints a receipt, empties the cart
//! and goes back to browsing.

use tracing::info;

use crate::error::ApiError;
use crate::render;
use crate::state::ShellState;

pub fn summary(state: &ShellState) -> Result<String, ApiError> {
    let summary = state.storefront.checkout_summary()?;
    Ok(render::checkout(&summary))
}

pub fn place_order(state: &ShellState) -> Result<String, ApiError> {
    let order = state.storefront.place_order()?;
    info!(order_id = %order.order_id, "Returning to catalog");

    Ok(format!(
        "{}\n\n{}",
        render::confirmation(&order),
        state.storefront.with_store(render::catalog)
    ))
}
