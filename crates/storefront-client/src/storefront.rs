//! # Storefront Controller
//!
//! Owns the [`Store`] and the [`CatalogApi`], and performs the fetches that
//! query changes call for.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dispatch(SetPage(3))                                                   │
//! │     │                                                                   │
//! │     ├─ lock ─► store.dispatch(..) ─► query changed? ─ unlock            │
//! │     │                                    │                              │
//! │     │                                   yes                             │
//! │     ▼                                    ▼                              │
//! │  refresh()                                                              │
//! │     ├─ lock ─► request = next generation, FetchStarted ─ unlock         │
//! │     ├─ api.fetch_products(query).await      (no lock held)              │
//! │     └─ lock ─► FetchSucceeded / FetchFailed (stale ones dropped) ─ unlock│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The mutex is never held across an `.await`. Overlapping fetches are
//! allowed; the generation check makes the last issued one win.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use storefront_core::catalog::{CatalogAction, CatalogQuery, RequestId, Transition};
use storefront_core::checkout::{CheckoutSummary, OrderConfirmation};
use storefront_core::store::{Action, Store};
use storefront_core::{CoreResult, ProductId};

use crate::api::{CatalogApi, HttpCatalogApi};
use crate::config::ClientConfig;
use crate::error::ClientResult;

struct Shared {
    store: Store,
    generation: u64,
}

/// Cheaply cloneable handle to one storefront session.
#[derive(Clone)]
pub struct Storefront {
    shared: Arc<Mutex<Shared>>,
    api: Arc<dyn CatalogApi>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront").finish_non_exhaustive()
    }
}

impl Storefront {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Storefront {
            shared: Arc::new(Mutex::new(Shared {
                store: Store::new(),
                generation: 0,
            })),
            api,
        }
    }

    /// Builds a storefront talking HTTP to the configured API.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let api = HttpCatalogApi::new(config)?;
        info!(base_url = %api.base_url(), "Catalog API configured");
        Ok(Self::new(Arc::new(api)))
    }

    fn with_shared<R>(&self, f: impl FnOnce(&mut Shared) -> R) -> R {
        // Every reducer leaves the store consistent, so a poisoned lock is still usable.
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut shared)
    }

    /// Read access to the current state.
    pub fn with_store<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        self.with_shared(|shared| f(&shared.store))
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Store {
        self.with_store(Store::clone)
    }

    // =========================================================================
    // Dispatch & Fetch
    // =========================================================================

    /// Applies an action, then fetches if the catalog query changed.
    pub async fn dispatch(&self, action: impl Into<Action>) -> Transition {
        let action = action.into();
        let (transition, query_changed) = self.with_shared(|shared| {
            let before = shared.store.catalog.query().clone();
            let transition = shared.store.dispatch(action);
            (transition, shared.store.catalog.query() != &before)
        });

        if query_changed {
            self.refresh().await;
        }

        transition
    }

    /// Fetches the products for the current query.
    ///
    /// Returns the transition of the completion: `Changed`, or `Stale` when
    /// a newer fetch started in the meantime.
    pub async fn refresh(&self) -> Transition {
        self.fetch(None).await
    }

    /// [`refresh`](Self::refresh) on a background task.
    pub fn spawn_refresh(&self) -> JoinHandle<Transition> {
        let this = self.clone();
        tokio::spawn(async move { this.refresh().await })
    }

    /// The one-time category fetch.
    pub async fn load_categories(&self) -> Transition {
        let action = match self.api.fetch_categories().await {
            Ok(raw) => {
                debug!(count = raw.len(), "Categories loaded");
                CatalogAction::CategoriesLoaded(raw)
            }
            Err(err) => {
                warn!(error = %err, "Categories fetch failed");
                CatalogAction::CategoriesFailed(err.to_string())
            }
        };
        self.with_shared(|shared| shared.store.dispatch(action))
    }

    /// The "try again" button under a fetch error.
    ///
    /// Issues an unfiltered fetch (page 1, all categories, no search), not
    /// the query that failed. The query state is left as it is, so the next
    /// query change fetches the filtered page again.
    pub async fn retry(&self) -> Transition {
        info!("Retrying with an unfiltered products fetch");
        self.fetch(Some(CatalogQuery::default())).await
    }

    /// Runs one products fetch under a fresh request id. `None` fetches the
    /// current query.
    async fn fetch(&self, query: Option<CatalogQuery>) -> Transition {
        let (request, query) = self.with_shared(|shared| {
            shared.generation += 1;
            let request = RequestId::new(shared.generation);
            shared
                .store
                .dispatch(CatalogAction::FetchStarted { request });
            let query = query.unwrap_or_else(|| shared.store.catalog.query().clone());
            (request, query)
        });

        debug!(%request, page = query.page, category = %query.category, search = %query.search, "Fetching products");

        let action = match self.api.fetch_products(&query).await {
            Ok(page) => {
                info!(%request, count = page.products.len(), total = page.total, "Products loaded");
                CatalogAction::FetchSucceeded { request, page }
            }
            Err(err) => {
                warn!(%request, error = %err, retryable = err.is_retryable(), "Products fetch failed");
                CatalogAction::FetchFailed {
                    request,
                    message: err.to_string(),
                }
            }
        };

        let transition = self.with_shared(|shared| shared.store.dispatch(action));
        if transition == Transition::Stale {
            debug!(%request, "Discarded stale products response");
        }
        transition
    }

    // =========================================================================
    // Cart & Checkout
    // =========================================================================

    /// Adds a product from the current page, behind the session and stock gates.
    pub fn add_to_cart(&self, id: ProductId) -> CoreResult<Transition> {
        self.with_shared(|shared| shared.store.add_to_cart(id))
    }

    /// The + button on a cart line.
    pub fn increment(&self, id: ProductId) -> Transition {
        self.with_shared(|shared| shared.store.cart.increment(id))
    }

    /// The − button on a cart line; at quantity 1 the line goes away.
    pub fn decrement(&self, id: ProductId) -> Transition {
        self.with_shared(|shared| shared.store.cart.decrement(id))
    }

    pub fn checkout_summary(&self) -> CoreResult<CheckoutSummary> {
        self.with_store(Store::checkout_summary)
    }

    pub fn place_order(&self) -> CoreResult<OrderConfirmation> {
        let confirmation = self.with_shared(|shared| shared.store.place_order())?;
        info!(
            order_id = %confirmation.order_id,
            items = confirmation.summary.total_items,
            total = %confirmation.summary.total,
            "Order placed"
        );
        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use storefront_core::auth::AuthAction;
    use storefront_core::types::{Product, ProductPage, RawCategory};
    use storefront_core::{CoreError, Money};

    use crate::error::ClientError;

    fn product(id: u64, title: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            description: String::new(),
            price: Money::from_cents(1999),
            discount_percentage: 0.0,
            rating: 4.2,
            stock: 3,
            brand: "Brand".to_string(),
            category: "beauty".to_string(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    /// Answers with one product titled after the query. Searches for
    /// "slow" take 500 ms, "fail" errors, everything else takes 10 ms.
    #[derive(Default)]
    struct FakeApi {
        calls: std::sync::Mutex<Vec<CatalogQuery>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<CatalogQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn fetch_products(&self, query: &CatalogQuery) -> ClientResult<ProductPage> {
            self.calls.lock().unwrap().push(query.clone());

            let delay = if query.search == "slow" { 500 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            if query.search == "fail" {
                return Err(ClientError::FetchFailed(
                    "Request failed with status code 500".into(),
                ));
            }

            let title = format!("{}:{}:{}", query.category, query.search, query.page);
            Ok(ProductPage {
                products: vec![product(query.page as u64, &title)],
                total: 40,
                skip: query.skip(),
                limit: 12,
            })
        }

        async fn fetch_categories(&self) -> ClientResult<Vec<RawCategory>> {
            Ok(vec![
                RawCategory::Name("beauty".into()),
                RawCategory::Descriptor {
                    slug: Some("furniture".into()),
                    name: Some("Furniture".into()),
                },
            ])
        }
    }

    struct DownApi;

    #[async_trait]
    impl CatalogApi for DownApi {
        async fn fetch_products(&self, _query: &CatalogQuery) -> ClientResult<ProductPage> {
            Err(ClientError::FetchFailed("connection refused".into()))
        }

        async fn fetch_categories(&self) -> ClientResult<Vec<RawCategory>> {
            Err(ClientError::FetchFailed("connection refused".into()))
        }
    }

    fn titles(storefront: &Storefront) -> Vec<String> {
        storefront.with_store(|s| {
            s.catalog
                .products()
                .iter()
                .map(|p| p.title.clone())
                .collect()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_change_triggers_one_fetch() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());

        storefront
            .dispatch(CatalogAction::SetCategory("beauty".into()))
            .await;

        assert_eq!(api.calls().len(), 1);
        assert_eq!(api.calls()[0].category, "beauty");
        assert_eq!(titles(&storefront), vec!["beauty::1"]);
        assert_eq!(storefront.with_store(|s| s.catalog.total_pages()), 4);
        assert!(!storefront.with_store(|s| s.catalog.is_loading()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_query_does_not_fetch() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());

        let transition = storefront
            .dispatch(CatalogAction::SetCategory("all".into()))
            .await;
        assert_eq!(transition, Transition::Unchanged);

        storefront.dispatch(AuthAction::sign_in("emilys")).await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_change_fetches_with_offset() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());

        storefront.dispatch(CatalogAction::SetPage(3)).await;

        assert_eq!(api.calls()[0].skip(), 24);
        assert_eq!(titles(&storefront), vec!["all::3"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_issued_query_wins() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());

        let slow = storefront.dispatch(CatalogAction::SetSearchQuery("slow".into()));
        let fast = async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            storefront
                .dispatch(CatalogAction::SetSearchQuery("fast".into()))
                .await
        };
        tokio::join!(slow, fast);

        assert_eq!(api.calls().len(), 2);
        assert_eq!(storefront.with_store(|s| s.catalog.query().search.clone()), "fast");
        assert_eq!(titles(&storefront), vec!["all:fast:1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_refresh_reports_stale() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());
        storefront
            .dispatch(CatalogAction::SetSearchQuery("slow".into()))
            .await;

        let first = storefront.spawn_refresh();
        tokio::time::sleep(Duration::from_millis(1)).await;
        let second = storefront.refresh().await;

        assert_eq!(second, Transition::Changed);
        assert_eq!(first.await.unwrap(), Transition::Stale);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_products_and_records_error() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());
        storefront.refresh().await;
        assert_eq!(titles(&storefront), vec!["all::1"]);

        storefront
            .dispatch(CatalogAction::SetSearchQuery("fail".into()))
            .await;

        storefront.with_store(|s| {
            assert_eq!(s.catalog.error(), Some("Request failed with status code 500"));
            assert!(!s.catalog.is_loading());
        });
        assert_eq!(titles(&storefront), vec!["all::1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_fetches_unfiltered_listing() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());

        storefront
            .dispatch(CatalogAction::SetCategory("beauty".into()))
            .await;
        storefront
            .dispatch(CatalogAction::SetSearchQuery("fail".into()))
            .await;
        storefront.dispatch(CatalogAction::SetPage(2)).await;
        assert!(storefront.with_store(|s| s.catalog.error().is_some()));

        assert_eq!(storefront.retry().await, Transition::Changed);

        let calls = api.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[3], CatalogQuery::default());

        storefront.with_store(|s| {
            assert!(s.catalog.error().is_none());
            // The filters stay as the user left them.
            assert_eq!(s.catalog.query().category, "beauty");
            assert_eq!(s.catalog.query().search, "fail");
            assert_eq!(s.catalog.query().page, 2);
        });
        assert_eq!(titles(&storefront), vec!["all::1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_supersedes_pending_fetch() {
        let api = Arc::new(FakeApi::default());
        let storefront = Storefront::new(api.clone());

        let slow = storefront.dispatch(CatalogAction::SetSearchQuery("slow".into()));
        let retry = async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            storefront.retry().await
        };
        let (_, retried) = tokio::join!(slow, retry);

        assert_eq!(retried, Transition::Changed);
        assert_eq!(titles(&storefront), vec!["all::1"]);
    }

    #[tokio::test]
    async fn test_load_categories() {
        let storefront = Storefront::new(Arc::new(FakeApi::default()));
        storefront.load_categories().await;
        assert_eq!(
            storefront.with_store(|s| s.catalog.categories().to_vec()),
            vec!["beauty", "furniture"]
        );

        let down = Storefront::new(Arc::new(DownApi));
        down.load_categories().await;
        down.with_store(|s| {
            assert!(s.catalog.categories().is_empty());
            assert_eq!(s.catalog.error(), Some("connection refused"));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_through_controller() {
        let storefront = Storefront::new(Arc::new(FakeApi::default()));
        storefront.refresh().await;

        assert!(matches!(
            storefront.add_to_cart(1),
            Err(CoreError::NotAuthenticated)
        ));

        storefront.dispatch(AuthAction::sign_in("emilys")).await;
        storefront.add_to_cart(1).unwrap();
        assert_eq!(storefront.checkout_summary().unwrap().total.cents(), 1999);

        let confirmation = storefront.place_order().unwrap();
        assert_eq!(confirmation.summary.total_items, 1);
        assert!(storefront.with_store(|s| s.cart.is_empty()));
    }
}
