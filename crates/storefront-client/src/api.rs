//! # Catalog API
//!
//! The two read-only calls the storefront makes against the catalog API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CatalogEndpoint::All           GET /products?limit=12&skip=S           │
//! │  CatalogEndpoint::Category(c)   GET /products/category/{c}?limit=..     │
//! │  CatalogEndpoint::Search(q)     GET /products/search?q={q}&limit=..     │
//! │                                                                         │
//! │  fetch_categories()             GET /products/categories                │
//! │                                                                         │
//! │  Response: { products: [...], total, skip, limit }                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The controller only sees the [`CatalogApi`] trait, so tests swap in fakes.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use storefront_core::catalog::{CatalogEndpoint, CatalogQuery};
use storefront_core::types::{ProductPage, RawCategory};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page of products for the query.
    async fn fetch_products(&self, query: &CatalogQuery) -> ClientResult<ProductPage>;

    /// The raw category list (strings or `{slug, name, url}` objects).
    async fn fetch_categories(&self) -> ClientResult<Vec<RawCategory>>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`CatalogApi`] over HTTP with one shared connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: Url,
}

impl HttpCatalogApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .user_agent(config.api.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the listing URL for a query.
    pub fn products_url(&self, query: &CatalogQuery) -> ClientResult<Url> {
        let endpoint = query.endpoint();
        let mut url = self.base_url.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push("products");
            match &endpoint {
                CatalogEndpoint::All => {}
                CatalogEndpoint::Category(category) => {
                    segments.push("category").push(category);
                }
                CatalogEndpoint::Search(_) => {
                    segments.push("search");
                }
            }
        }

        {
            let mut pairs = url.query_pairs_mut();
            if let CatalogEndpoint::Search(text) = &endpoint {
                pairs.append_pair("q", text);
            }
            pairs
                .append_pair("limit", &query.limit().to_string())
                .append_pair("skip", &query.skip().to_string());
        }

        Ok(url)
    }

    pub fn categories_url(&self) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("products")
            .push("categories");
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_products(&self, query: &CatalogQuery) -> ClientResult<ProductPage> {
        let url = self.products_url(query)?;
        self.get_json(url).await
    }

    async fn fetch_categories(&self) -> ClientResult<Vec<RawCategory>> {
        let url = self.categories_url()?;
        self.get_json(url).await
    }
}
