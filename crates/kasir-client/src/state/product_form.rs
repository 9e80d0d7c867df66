//! # Add Product State
//!
//! Drives the create-product form.
//!
//! ## Submit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product(req)                                                       │
//! │     ├──► state = Loading                                                │
//! │     ▼                                                                   │
//! │  CatalogApi::create_product(req)                                        │
//! │     │                                                                   │
//! │     ├── Err(e) ──► state = Error(e)                                     │
//! │     │                                                                   │
//! │     └── Ok(created) ──► state = Success(created)                        │
//! │                           │                                             │
//! │                           ├──► CatalogState::refresh()   ┐ concurrently │
//! │                           └──► sleep(reset_delay)        ┘              │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                           state = Success(None)  (form is idle again)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is refreshed through a direct reference to the
//! [`CatalogState`] that owns it.

use kasir_core::{CreatedProduct, NewProduct, ResourceState};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use super::catalog::CatalogState;
use super::resource::ResourceCell;
use crate::api::CatalogApi;

/// Create-product form state.
#[derive(Debug)]
pub struct AddProductState<C> {
    catalog: Arc<C>,
    listing: Arc<CatalogState<C>>,
    submission: ResourceCell<CreatedProduct>,
    reset_delay: Duration,
}

impl<C: CatalogApi> AddProductState<C> {
    /// `listing` is refreshed after every successful create.
    pub fn new(catalog: Arc<C>, listing: Arc<CatalogState<C>>, reset_delay: Duration) -> Self {
        AddProductState {
            catalog,
            listing,
            submission: ResourceCell::new("add_product"),
            reset_delay,
        }
    }

    /// Observable submission state.
    pub fn state(&self) -> watch::Receiver<ResourceState<CreatedProduct>> {
        self.submission.subscribe()
    }

    pub fn current(&self) -> ResourceState<CreatedProduct> {
        self.submission.current()
    }

    /// Submits the form. Publishes `Loading` immediately.
    ///
    /// The returned future completes once the form is idle again (after a
    /// success) or the error has been published, and yields the terminal
    /// state of this submission. A submission overtaken by a newer one still
    /// reports its own outcome, though it was never published.
    pub fn add_product(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = ResourceState<CreatedProduct>> + Send + '_ {
        let ticket = self.submission.begin();
        async move {
            let result = self.catalog.create_product(product).await;
            let own = match &result {
                Ok(created) => ResourceState::success(created.clone()),
                Err(e) => ResourceState::error(e.to_string(), None),
            };

            let Some(outcome) = self.submission.settle(ticket, result) else {
                return own;
            };
            if outcome.is_success() {
                tokio::join!(self.listing.refresh(), tokio::time::sleep(self.reset_delay));
                self.submission.reset_if_latest(ticket);
            }
            outcome
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::state::testing::FakeCatalog;
    use kasir_core::{Money, Product, ProductSize, ProductType};

    fn request(name: &str) -> NewProduct {
        NewProduct {
            user_id: "u-1".to_string(),
            name: name.to_string(),
            price: Money::from_units(15_000),
            description: None,
            size: ProductSize::Medium,
            product_type: ProductType::Drink,
            image: None,
        }
    }

    type Fixture = (
        Arc<FakeCatalog>,
        Arc<CatalogState<FakeCatalog>>,
        Arc<AddProductState<FakeCatalog>>,
    );

    fn setup(delay: Duration) -> Fixture {
        let fake = Arc::new(FakeCatalog::default());
        let listing = Arc::new(CatalogState::new(fake.clone()));
        let form = Arc::new(AddProductState::new(fake.clone(), listing.clone(), delay));
        (fake, listing, form)
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_refreshes_catalog_then_resets() {
        let (fake, listing, form) = setup(Duration::from_millis(300));
        fake.push_list(Ok(vec![Product::new("new-1", "Es Kopi", Money::from_units(15_000))]));
        let mut rx = form.state();

        let task = {
            let form = form.clone();
            tokio::spawn(async move { form.add_product(request("Es Kopi")).await })
        };

        // The created product is visible before the reset delay elapses.
        let created = rx
            .wait_for(|s| s.data().is_some())
            .await
            .unwrap()
            .clone();
        assert_eq!(created.data().unwrap().id, "new-1");

        task.await.unwrap();
        assert!(form.current().is_idle());
        assert_eq!(fake.list_calls(), 1);
        assert_eq!(listing.current().data().unwrap()[0].id, "new-1");
        assert_eq!(fake.created().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_publishes_error_without_refresh() {
        let (fake, _listing, form) = setup(Duration::ZERO);
        fake.reject_creates();

        let pending = form.add_product(request("Es Kopi"));
        assert!(form.current().is_loading());
        let outcome = pending.await;

        assert_eq!(outcome.error_message(), Some("HTTP 400"));
        assert_eq!(form.current().error_message(), Some("HTTP 400"));
        assert_eq!(fake.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_consecutive_submits_each_refresh() {
        let (fake, _listing, form) = setup(Duration::ZERO);

        form.add_product(request("Es Teh")).await;
        let second = form.add_product(request("Es Kopi")).await;

        assert_eq!(second.data().unwrap().id, "new-2");
        assert!(form.current().is_idle());
        assert_eq!(fake.created().len(), 2);
        assert_eq!(fake.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_outcome_survives_immediate_reset() {
        let (fake, listing, form) = setup(Duration::ZERO);
        fake.push_list(Err(ClientError::Network("connection refused".into())));

        let outcome = form.add_product(request("Es Kopi")).await;

        // The form is already idle again, but the caller still gets the result.
        assert!(form.current().is_idle());
        assert_eq!(outcome.data().unwrap().id, "new-1");
        assert!(listing.current().is_error());
    }

    #[tokio::test]
    async fn test_overtaken_submit_reports_its_own_outcome() {
        let (fake, _listing, form) = setup(Duration::ZERO);

        let first = form.add_product(request("Es Teh"));
        let second = form.add_product(request("Es Kopi"));
        let (second, first) = tokio::join!(second, first);

        assert_eq!(second.data().unwrap().id, "new-1");
        assert_eq!(first.data().unwrap().id, "new-2");
        assert_eq!(fake.created().len(), 2);
        assert!(form.current().is_idle());
    }
}
