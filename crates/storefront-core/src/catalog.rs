//! # Catalog Slice
//!
//! Query state (page, category, search) and the fetched result set.
//!
//! ## Query → Endpoint Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Which listing endpoint is called?                    │
//! │                                                                         │
//! │  search non-empty? ──yes──► /products/search?q={search}                 │
//! │        │                                                                │
//! │        no                                                               │
//! │        ▼                                                                │
//! │  category != "all"? ──yes──► /products/category/{category}              │
//! │        │                                                                │
//! │        no                                                               │
//! │        ▼                                                                │
//! │  /products                                                              │
//! │                                                                         │
//! │  Always: limit=12, skip=(page - 1) × 12                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fetch Lifecycle
//! ```text
//! SetCategory / SetSearchQuery / SetPage / ClearFilters
//!      │  (query changed)
//!      ▼
//! FetchStarted { request: #7 }   ─► is_loading = true, error = None
//!      │
//!      ├── FetchSucceeded { request: #7 } ─► products replaced, totals updated
//!      │
//!      └── FetchFailed { request: #7 }    ─► previous products kept, error set
//!
//! A success/failure for any request other than the latest started one
//! (#6 arriving after #7 started) is discarded as stale.
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{normalize_categories, Product, ProductPage, RawCategory};
use crate::validation::clamp_page;
use crate::{ALL_CATEGORIES, MAX_VISIBLE_PAGES, PAGE_SIZE};

// =============================================================================
// Request Identity
// =============================================================================

/// Generation number attached to each products fetch.
///
/// Allocated in increasing order by the effects layer. Only the response to
/// the most recently started request may change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    #[inline]
    pub const fn new(generation: u64) -> Self {
        RequestId(generation)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Catalog Query
// =============================================================================

/// The query tuple that determines which products are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    /// 1-based page number.
    pub page: u32,

    /// Category filter; `"all"` means unfiltered.
    pub category: String,

    /// Search text; empty means no search.
    pub search: String,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            page: 1,
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
        }
    }
}

impl CatalogQuery {
    /// Selects the listing endpoint: search beats category beats listing.
    pub fn endpoint(&self) -> CatalogEndpoint {
        if !self.search.is_empty() {
            CatalogEndpoint::Search(self.search.clone())
        } else if self.category != ALL_CATEGORIES {
            CatalogEndpoint::Category(self.category.clone())
        } else {
            CatalogEndpoint::All
        }
    }

    /// Offset of the first product on this page.
    pub fn skip(&self) -> u64 {
        (self.page.max(1) as u64 - 1) * PAGE_SIZE as u64
    }

    #[inline]
    pub const fn limit(&self) -> u32 {
        PAGE_SIZE
    }
}

/// One of the three listing endpoint shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEndpoint {
    /// Unfiltered listing.
    All,
    /// Category-scoped listing.
    Category(String),
    /// Search-scoped listing.
    Search(String),
}

/// `ceil(total / PAGE_SIZE)`.
pub fn total_pages_for(total: u64) -> u32 {
    let pages = total.div_ceil(PAGE_SIZE as u64);
    pages.min(u32::MAX as u64) as u32
}

// =============================================================================
// Actions
// =============================================================================

/// Named transitions of the catalog slice.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Pick a category; resets to page 1.
    SetCategory(String),

    /// Commit (debounced) search text; resets to page 1.
    SetSearchQuery(String),

    /// Jump to a page (clamped to at least 1).
    SetPage(u32),

    /// Back to all categories, no search, page 1.
    ClearFilters,

    /// A products fetch was issued.
    FetchStarted { request: RequestId },

    /// A products fetch returned a page.
    FetchSucceeded { request: RequestId, page: ProductPage },

    /// A products fetch failed (transport, status or body).
    FetchFailed { request: RequestId, message: String },

    /// The one-time category fetch returned.
    CategoriesLoaded(Vec<RawCategory>),

    /// The one-time category fetch failed.
    CategoriesFailed(String),
}

/// What a dispatched action did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed.
    Changed,
    /// The action was applied but left state as it was.
    Unchanged,
    /// A fetch result for a superseded request; ignored.
    Stale,
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed)
    }
}

// =============================================================================
// Catalog State
// =============================================================================

/// The products slice.
///
/// Fields are private: the only way to change them is [`CatalogState::apply`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    query: CatalogQuery,
    products: Vec<Product>,
    categories: Vec<String>,
    total_products: u64,
    total_pages: u32,
    is_loading: bool,
    error: Option<String>,
    #[serde(skip)]
    latest_request: Option<RequestId>,
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState {
            query: CatalogQuery::default(),
            products: Vec::new(),
            categories: Vec::new(),
            total_products: 0,
            total_pages: 1,
            is_loading: false,
            error: None,
            latest_request: None,
        }
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action. This is the slice's reducer.
    pub fn apply(&mut self, action: CatalogAction) -> Transition {
        match action {
            CatalogAction::SetCategory(category) => self.update_query(|q| {
                q.category = category;
                q.page = 1;
            }),
            CatalogAction::SetSearchQuery(search) => self.update_query(|q| {
                q.search = search;
                q.page = 1;
            }),
            CatalogAction::SetPage(page) => self.update_query(|q| {
                q.page = clamp_page(page as i64);
            }),
            CatalogAction::ClearFilters => self.update_query(|q| *q = CatalogQuery::default()),
            CatalogAction::FetchStarted { request } => {
                self.latest_request = Some(request);
                self.is_loading = true;
                self.error = None;
                Transition::Changed
            }
            CatalogAction::FetchSucceeded { request, page } => {
                if !self.is_latest(request) {
                    return Transition::Stale;
                }
                let mut products = page.products;
                products.truncate(PAGE_SIZE as usize);

                self.products = products;
                self.total_products = page.total;
                self.total_pages = total_pages_for(page.total);
                self.is_loading = false;
                self.error = None;
                Transition::Changed
            }
            CatalogAction::FetchFailed { request, message } => {
                if !self.is_latest(request) {
                    return Transition::Stale;
                }
                self.is_loading = false;
                self.error = Some(message);
                Transition::Changed
            }
            CatalogAction::CategoriesLoaded(raw) => {
                self.categories = normalize_categories(&raw);
                Transition::Changed
            }
            CatalogAction::CategoriesFailed(message) => {
                self.categories.clear();
                self.error = Some(message);
                Transition::Changed
            }
        }
    }

    fn update_query(&mut self, f: impl FnOnce(&mut CatalogQuery)) -> Transition {
        let before = self.query.clone();
        f(&mut self.query);
        if self.query == before {
            Transition::Unchanged
        } else {
            Transition::Changed
        }
    }

    fn is_latest(&self, request: RequestId) -> bool {
        self.latest_request == Some(request)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn total_products(&self) -> u64 {
        self.total_products
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Looks up a product on the currently loaded page.
    pub fn product(&self, id: crate::ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    pub fn has_previous(&self) -> bool {
        self.query.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.query.page < self.total_pages
    }

    /// The pagination control is only shown for more than one page.
    pub fn shows_pagination(&self) -> bool {
        self.total_pages > 1
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        page_window(self.query.page, self.total_pages)
    }
}

// =============================================================================
// Page Window
// =============================================================================

/// One entry of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    /// Skipped pages, rendered as `...`.
    Gap,
}

/// Builds the numbered links around `current`.
///
/// ```text
/// total ≤ 5:        1 2 3 4 5
/// page 1 of 20:     1 2 3 4 5 ... 20
/// page 10 of 20:    1 ... 8 9 10 11 12 ... 20
/// page 20 of 20:    1 ... 18 19 20
/// ```
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageLink> {
    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let start = current.saturating_sub(2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    let mut links = Vec::with_capacity(MAX_VISIBLE_PAGES as usize + 4);

    if start > 1 {
        links.push(PageLink::Page(1));
        if start > 2 {
            links.push(PageLink::Gap);
        }
    }

    links.extend((start..=end).map(PageLink::Page));

    if end < total_pages {
        if end < total_pages - 1 {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(total_pages));
    }

    links
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: u64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            description: String::new(),
            price: Money::from_cents(1000),
            discount_percentage: 0.0,
            rating: 4.0,
            stock: 10,
            brand: "Brand".to_string(),
            category: "beauty".to_string(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }

    fn page_of(count: u64, total: u64) -> ProductPage {
        ProductPage {
            products: (1..=count).map(product).collect(),
            total,
            skip: 0,
            limit: PAGE_SIZE as u64,
        }
    }

    #[test]
    fn test_default_query() {
        let state = CatalogState::new();
        assert_eq!(state.query().page, 1);
        assert_eq!(state.query().category, "all");
        assert_eq!(state.query().search, "");
        assert_eq!(state.query().endpoint(), CatalogEndpoint::All);
    }

    #[test]
    fn test_endpoint_precedence() {
        let mut query = CatalogQuery {
            page: 1,
            category: "beauty".to_string(),
            search: String::new(),
        };
        assert_eq!(query.endpoint(), CatalogEndpoint::Category("beauty".into()));

        query.search = "mascara".to_string();
        assert_eq!(query.endpoint(), CatalogEndpoint::Search("mascara".into()));
    }

    #[test]
    fn test_skip_from_page() {
        let mut query = CatalogQuery::default();
        assert_eq!(query.skip(), 0);
        query.page = 3;
        assert_eq!(query.skip(), 24);
        assert_eq!(query.limit(), 12);
    }

    #[test]
    fn test_category_and_search_reset_page() {
        let mut state = CatalogState::new();
        state.apply(CatalogAction::SetPage(4));
        assert_eq!(state.query().page, 4);

        state.apply(CatalogAction::SetCategory("furniture".into()));
        assert_eq!(state.query().page, 1);

        state.apply(CatalogAction::SetPage(2));
        state.apply(CatalogAction::SetSearchQuery("chair".into()));
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn test_same_category_on_page_one_is_unchanged() {
        let mut state = CatalogState::new();
        assert_eq!(
            state.apply(CatalogAction::SetCategory("all".into())),
            Transition::Unchanged
        );

        // Re-picking the same category from page 3 still resets the page.
        state.apply(CatalogAction::SetPage(3));
        assert_eq!(
            state.apply(CatalogAction::SetCategory("all".into())),
            Transition::Changed
        );
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn test_set_page_is_clamped() {
        let mut state = CatalogState::new();
        state.apply(CatalogAction::SetPage(5));
        state.apply(CatalogAction::SetPage(0));
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn test_clear_filters() {
        let mut state = CatalogState::new();
        state.apply(CatalogAction::SetCategory("beauty".into()));
        state.apply(CatalogAction::SetSearchQuery("lip".into()));
        state.apply(CatalogAction::SetPage(2));

        state.apply(CatalogAction::ClearFilters);
        assert_eq!(state.query(), &CatalogQuery::default());
    }

    #[test]
    fn test_fetch_success_replaces_products() {
        let mut state = CatalogState::new();
        let request = RequestId::new(1);

        state.apply(CatalogAction::FetchStarted { request });
        assert!(state.is_loading());

        let transition = state.apply(CatalogAction::FetchSucceeded {
            request,
            page: page_of(12, 194),
        });
        assert_eq!(transition, Transition::Changed);
        assert!(!state.is_loading());
        assert_eq!(state.products().len(), 12);
        assert_eq!(state.total_products(), 194);
        assert_eq!(state.total_pages(), 17); // ceil(194 / 12)
        assert!(state.error().is_none());
    }

    #[test]
    fn test_page_never_exceeds_page_size() {
        let mut state = CatalogState::new();
        let request = RequestId::new(1);
        state.apply(CatalogAction::FetchStarted { request });
        state.apply(CatalogAction::FetchSucceeded {
            request,
            page: page_of(30, 30),
        });
        assert_eq!(state.products().len(), 12);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(total_pages_for(0), 0);
        assert_eq!(total_pages_for(1), 1);
        assert_eq!(total_pages_for(12), 1);
        assert_eq!(total_pages_for(13), 2);
        assert_eq!(total_pages_for(194), 17);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_products() {
        let mut state = CatalogState::new();
        let first = RequestId::new(1);
        state.apply(CatalogAction::FetchStarted { request: first });
        state.apply(CatalogAction::FetchSucceeded {
            request: first,
            page: page_of(3, 3),
        });

        let second = RequestId::new(2);
        state.apply(CatalogAction::FetchStarted { request: second });
        state.apply(CatalogAction::FetchFailed {
            request: second,
            message: "Failed to fetch products".into(),
        });

        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("Failed to fetch products"));
        assert_eq!(state.products().len(), 3);
    }

    #[test]
    fn test_next_fetch_clears_error() {
        let mut state = CatalogState::new();
        let first = RequestId::new(1);
        state.apply(CatalogAction::FetchStarted { request: first });
        state.apply(CatalogAction::FetchFailed {
            request: first,
            message: "boom".into(),
        });

        state.apply(CatalogAction::FetchStarted {
            request: RequestId::new(2),
        });
        assert!(state.error().is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = CatalogState::new();
        let old = RequestId::new(1);
        let new = RequestId::new(2);

        state.apply(CatalogAction::FetchStarted { request: old });
        state.apply(CatalogAction::FetchStarted { request: new });
        state.apply(CatalogAction::FetchSucceeded {
            request: new,
            page: page_of(2, 2),
        });

        let transition = state.apply(CatalogAction::FetchSucceeded {
            request: old,
            page: page_of(12, 100),
        });
        assert_eq!(transition, Transition::Stale);
        assert_eq!(state.products().len(), 2);
        assert_eq!(state.total_products(), 2);

        let transition = state.apply(CatalogAction::FetchFailed {
            request: old,
            message: "late".into(),
        });
        assert_eq!(transition, Transition::Stale);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_categories_loaded_and_failed() {
        let mut state = CatalogState::new();
        state.apply(CatalogAction::CategoriesLoaded(vec![
            RawCategory::Descriptor {
                slug: Some("beauty".into()),
                name: None,
            },
            RawCategory::Name("furniture".into()),
        ]));
        assert_eq!(state.categories(), ["beauty", "furniture"]);

        state.apply(CatalogAction::CategoriesFailed("offline".into()));
        assert!(state.categories().is_empty());
        assert_eq!(state.error(), Some("offline"));
    }

    #[test]
    fn test_page_window_small() {
        assert_eq!(
            page_window(2, 3),
            vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)]
        );
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_page_window_large() {
        use PageLink::{Gap, Page};

        assert_eq!(
            page_window(1, 20),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Gap, Page(20)]
        );
        assert_eq!(
            page_window(10, 20),
            vec![Page(1), Gap, Page(8), Page(9), Page(10), Page(11), Page(12), Gap, Page(20)]
        );
        assert_eq!(
            page_window(20, 20),
            vec![Page(1), Gap, Page(18), Page(19), Page(20)]
        );
        // No gap marker between adjacent pages.
        assert_eq!(
            page_window(4, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_previous_next() {
        let mut state = CatalogState::new();
        let request = RequestId::new(1);
        state.apply(CatalogAction::FetchStarted { request });
        state.apply(CatalogAction::FetchSucceeded {
            request,
            page: page_of(12, 30),
        });

        assert!(!state.has_previous());
        assert!(state.has_next());
        assert!(state.shows_pagination());

        state.apply(CatalogAction::SetPage(3));
        assert!(state.has_previous());
        assert!(!state.has_next());
    }
}
