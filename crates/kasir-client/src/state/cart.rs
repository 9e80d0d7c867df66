//! # Cart State
//!
//! Observable wrapper around [`CartStore`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Front end Action         CartState               Observers             │
//! │  ────────────────         ─────────               ─────────             │
//! │                                                                         │
//! │  Pick product ──────────► add_to_cart() ────────► changed()            │
//! │  "+" / "-" ─────────────► increase/decrease() ──► changed()            │
//! │  Remove ────────────────► remove() ─────────────► changed()            │
//! │  Pay ───────────────────► checkout() ───────────► changed() (empty)    │
//! │                                                                         │
//! │  Every mutation runs inside `send_modify`, so line items and total     │
//! │  are updated together before any observer is woken.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasir_core::{CartSnapshot, CartStore, Money, OrderSummary, Product};
use tokio::sync::watch;
use tracing::{debug, info};

/// Cart of the current checkout session.
#[derive(Debug)]
pub struct CartState {
    tx: watch::Sender<CartStore>,
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CartStore::new());
        CartState { tx }
    }

    /// New receiver observing the cart.
    pub fn subscribe(&self) -> watch::Receiver<CartStore> {
        self.tx.subscribe()
    }

    /// Serializable view of the current cart.
    pub fn snapshot(&self) -> CartSnapshot {
        self.tx.borrow().snapshot()
    }

    pub fn total(&self) -> Money {
        self.tx.borrow().total()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn add_to_cart(&self, quantity: u32, product: &Product) {
        debug!(product_id = %product.id, quantity, "Adding to cart");
        self.tx.send_modify(|cart| cart.add_to_cart(quantity, product));
    }

    pub fn increase_quantity(&self, product_id: &str) {
        self.tx.send_modify(|cart| cart.increase_quantity(product_id));
    }

    pub fn decrease_quantity(&self, product_id: &str) {
        self.tx.send_modify(|cart| cart.decrease_quantity(product_id));
    }

    pub fn remove(&self, product_id: &str) {
        self.tx.send_modify(|cart| {
            cart.remove(product_id);
        });
    }

    pub fn clear(&self) {
        self.tx.send_modify(CartStore::clear);
    }

    /// Captures the order and empties the cart.
    pub fn checkout(&self) -> OrderSummary {
        let mut order = OrderSummary::default();
        self.tx.send_modify(|cart| order = cart.checkout());
        info!(
            items = order.item_count,
            quantity = order.total_quantity,
            total = order.total.units(),
            "Checked out"
        );
        order
    }
}
