//! # Catalog State
//!
//! Observable product list and product detail.
//!
//! ## Fetch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch_products()                                                       │
//! │     │  (synchronously, before the future is returned)                  │
//! │     ├──► products = Loading                                             │
//! │     ▼                                                                   │
//! │  .await ──► CatalogApi::list_products()                                 │
//! │     │                                                                   │
//! │     ├── Ok(list) ──► products = Success(list)                           │
//! │     └── Err(e)   ──► products = Error(e, previous list)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasir_core::catalog::filter_by_name;
use kasir_core::{Product, ResourceState};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use super::resource::ResourceCell;
use crate::api::CatalogApi;

// =============================================================================
// Product List
// =============================================================================

/// The catalog as seen by the front end.
#[derive(Debug)]
pub struct CatalogState<C> {
    catalog: Arc<C>,
    products: ResourceCell<Vec<Product>>,
}

impl<C: CatalogApi> CatalogState<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        CatalogState {
            catalog,
            products: ResourceCell::new("products"),
        }
    }

    /// Observable product list.
    pub fn products(&self) -> watch::Receiver<ResourceState<Vec<Product>>> {
        self.products.subscribe()
    }

    /// Current product list state.
    pub fn current(&self) -> ResourceState<Vec<Product>> {
        self.products.current()
    }

    /// Reloads the product list.
    ///
    /// `Loading` is published before this returns; the returned future
    /// performs the request.
    pub fn fetch_products(&self) -> impl Future<Output = ()> + Send + '_ {
        let ticket = self.products.begin();
        async move {
            let result = self.catalog.list_products().await;
            if let Ok(products) = &result {
                debug!(count = products.len(), "Catalog refreshed");
            }
            self.products.finish(ticket, result);
        }
    }

    /// Reloads the list after a product was created, edited or deleted.
    pub fn refresh(&self) -> impl Future<Output = ()> + Send + '_ {
        self.fetch_products()
    }

    /// Loaded products whose name matches `query`.
    pub fn search(&self, query: &str) -> Vec<Product> {
        let state = self.products.current();
        match state.data() {
            Some(products) => filter_by_name(products, query).into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }
}

// =============================================================================
// Product Detail
// =============================================================================

/// One product loaded by id.
#[derive(Debug)]
pub struct ProductDetailState<C> {
    catalog: Arc<C>,
    detail: ResourceCell<Product>,
}

impl<C: CatalogApi> ProductDetailState<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        ProductDetailState {
            catalog,
            detail: ResourceCell::new("product_detail"),
        }
    }

    /// Observable detail.
    pub fn detail(&self) -> watch::Receiver<ResourceState<Product>> {
        self.detail.subscribe()
    }

    pub fn current(&self) -> ResourceState<Product> {
        self.detail.current()
    }

    /// Loads the product with `id`. Publishes `Loading` immediately.
    pub fn fetch<'a>(&'a self, id: &'a str) -> impl Future<Output = ()> + Send + 'a {
        let ticket = self.detail.begin();
        async move {
            let result = self.catalog.get_product(id).await;
            self.detail.finish(ticket, result);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
