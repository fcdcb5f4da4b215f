//! # Catalog Commands
//!
//! Browsing: the product grid, filters, pagination and product details.
//!
//! Every query change goes through `Storefront::dispatch`, which fetches
//! before returning, so the rendered page is already the new one.
//! `search` is the exception: it only queues text for the debouncer and
//! the prompt loop renders once the query actually changes.

use storefront_core::catalog::CatalogAction;
use storefront_core::{ProductId, ValidationError};

use crate::error::ApiError;
use crate::render;
use crate::state::ShellState;

pub fn products(state: &ShellState) -> String {
    state.storefront.with_store(render::catalog)
}

pub fn search(state: &ShellState, text: &str) -> Result<String, ApiError> {
    state.queue_search(text)?;
    Ok(if text.is_empty() {
        "Clearing search...".to_string()
    } else {
        format!("Searching for \"{}\"...", text)
    })
}

pub async fn category(state: &ShellState, name: String) -> String {
    state
        .storefront
        .dispatch(CatalogAction::SetCategory(name))
        .await;
    products(state)
}

pub fn categories(state: &ShellState) -> String {
    state
        .storefront
        .with_store(|store| render::categories(&store.catalog))
}

/// Jumps to a page that the pagination control would offer.
pub async fn page(state: &ShellState, page: u32) -> Result<String, ApiError> {
    let total_pages = state.storefront.with_store(|s| s.catalog.total_pages());
    if total_pages > 0 && page > total_pages {
        return Err(ValidationError::OutOfRange {
            field: "page".to_string(),
            min: 1,
            max: total_pages as i64,
        }
        .into());
    }

    state.storefront.dispatch(CatalogAction::SetPage(page)).await;
    Ok(products(state))
}

pub async fn next(state: &ShellState) -> Result<String, ApiError> {
    let (has_next, current) = state
        .storefront
        .with_store(|s| (s.catalog.has_next(), s.catalog.query().page));
    if !has_next {
        return Err(ApiError::validation("Already on the last page"));
    }
    page(state, current + 1).await
}

pub async fn previous(state: &ShellState) -> Result<String, ApiError> {
    let (has_previous, current) = state
        .storefront
        .with_store(|s| (s.catalog.has_previous(), s.catalog.query().page));
    if !has_previous {
        return Err(ApiError::validation("Already on the first page"));
    }
    page(state, current - 1).await
}

pub async fn clear(state: &ShellState) -> String {
    state.storefront.dispatch(CatalogAction::ClearFilters).await;
    products(state)
}

pub fn show(state: &ShellState, id: ProductId) -> Result<String, ApiError> {
    state.storefront.with_store(|store| -> Result<String, ApiError> {
        let product = store.find_product(id)?;
        Ok(render::product_detail(product))
    })
}

pub async fn retry(state: &ShellState) -> String {
    state.storefront.retry().await;
    products(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_category_filters_and_resets_page() {
        let (state, _search) = testing::shell().await;
        page(&state, 2).await.unwrap();

        let view = category(&state, "furniture".into()).await;
        assert!(view.contains("Category: Furniture"));
        assert!(view.contains("furniture item 21"));
        state.storefront.with_store(|s| {
            assert_eq!(s.catalog.query().page, 1);
            assert_eq!(s.catalog.total_products(), 10);
        });
    }

    #[tokio::test]
    async fn test_paging() {
        let (state, _search) = testing::shell().await;

        let view = next(&state).await.unwrap();
        assert!(view.contains("beauty item 13"));
        assert!(view.contains("Page 2 of 3"));

        let view = previous(&state).await.unwrap();
        assert!(view.contains("Page 1 of 3"));

        assert!(previous(&state).await.is_err());

        let err = page(&state, 9).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("between 1 and 3"));
    }

    #[tokio::test]
    async fn test_show_product() {
        let (state, _search) = testing::shell().await;
        assert!(show(&state, 3).unwrap().contains("beauty item 3"));
        assert_eq!(show(&state, 99).unwrap_err().code, ErrorCode::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_is_debounced() {
        let (state, mut committed) = testing::shell().await;

        assert_eq!(search(&state, "item 2").unwrap(), "Searching for \"item 2\"...");
        // The query only changes once the debouncer lets the text through.
        assert_eq!(state.storefront.with_store(|s| s.catalog.query().search.clone()), "");
        assert_eq!(committed.recv().await.unwrap(), "item 2");
    }

    #[tokio::test]
    async fn test_categories_listing() {
        let (state, _search) = testing::shell().await;
        let view = categories(&state);
        assert!(view.contains("All Categories"));
        assert!(view.contains("Furniture"));
    }
}
