//! # storefront-client: Catalog API and Effects
//!
//! The I/O half of the storefront. `storefront-core` decides *what* the
//! state becomes; this crate performs the fetches those decisions call for.
//!
//! ## Components
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       storefront-client                                 │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐   │
//! │  │   Storefront     │   │  HttpCatalogApi  │   │   Debouncer      │   │
//! │  │ (storefront.rs)  │──►│    (api.rs)      │   │ (debounce.rs)    │   │
//! │  │                  │   │                  │   │                  │   │
//! │  │ store + mutex    │   │ reqwest, url     │   │ 700 ms search    │   │
//! │  │ request gens     │   │ 3 listing shapes │   │ idle window      │   │
//! │  └──────────────────┘   └──────────────────┘   └──────────────────┘   │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐                          │
//! │  │  ClientConfig    │   │   ClientError    │                          │
//! │  │  (config.rs)     │   │   (error.rs)     │                          │
//! │  │  TOML + env      │   │   thiserror      │                          │
//! │  └──────────────────┘   └──────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use storefront_client::{ClientConfig, Storefront};
//! use storefront_core::catalog::CatalogAction;
//!
//! let config = ClientConfig::load_or_default(None);
//! let storefront = Storefront::from_config(&config)?;
//!
//! storefront.load_categories().await;
//! storefront.refresh().await;
//! storefront.dispatch(CatalogAction::SetCategory("beauty".into())).await;
//! ```

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod storefront;

pub use api::{CatalogApi, HttpCatalogApi};
pub use config::ClientConfig;
pub use debounce::Debouncer;
pub use error::{ClientError, ClientResult};
pub use storefront::Storefront;
