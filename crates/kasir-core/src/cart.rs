//! # Cart Store
//!
//! The shopping cart: line items keyed by product id plus a derived total.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Cashier Action            Operation               Line Change          │
//! │  ──────────────            ─────────               ───────────          │
//! │                                                                         │
//! │  Pick product + qty ─────► add_to_cart(n, p) ────► qty += n / push     │
//! │                                                                         │
//! │  Tap "+" ────────────────► increase_quantity() ──► qty += 1            │
//! │                                                                         │
//! │  Tap "-" ────────────────► decrease_quantity() ──► qty -= 1 / remove   │
//! │                                                                         │
//! │  Swipe away ─────────────► remove() ─────────────► remove line         │
//! │                                                                         │
//! │  Pay ────────────────────► checkout() ───────────► summary + clear     │
//! │                                                                         │
//! │  After every mutation: total = Σ(unit price × quantity)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id.
//! - Every line has `quantity >= 1`. A line that would reach zero is removed.
//! - `total()` always equals the sum of line totals. It has no setter.
//!
//! Quantity lives on the line only. The product snapshot carries no counter
//! of its own, so there is nothing to keep in sync.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Line Items
// =============================================================================

/// Product data frozen at the moment it was added to the cart.
///
/// A later catalog refresh that changes the price does not change what the
/// cashier already rang up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductSnapshot {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub size: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        ProductSnapshot {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            size: product.size.clone(),
            product_type: product.product_type.clone(),
            image: product.image.clone(),
        }
    }
}

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl CartLineItem {
    /// Product id of this line.
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The cart of one checkout session.
///
/// Every operation is total: unknown ids are ignored, nothing returns an
/// error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    lines: Vec<CartLineItem>,
    total: Money,
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product`.
    ///
    /// Merges into the existing line for `product.id` if there is one.
    /// Adding zero units of a product that is not in the cart does nothing.
    pub fn add_to_cart(&mut self, quantity: u32, product: &Product) {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else if quantity > 0 {
            self.lines.push(CartLineItem {
                product: ProductSnapshot::from(product),
                quantity,
            });
        }
        self.recompute_total();
    }

    /// Adds one unit to the line for `product_id`. Unknown ids are ignored.
    pub fn increase_quantity(&mut self, product_id: &str) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_add(1);
        }
        self.recompute_total();
    }

    /// Removes one unit from the line for `product_id`.
    ///
    /// A line at quantity 1 is removed. Unknown ids are ignored.
    pub fn decrease_quantity(&mut self, product_id: &str) {
        if let Some(idx) = self.position(product_id) {
            if self.lines[idx].quantity > 1 {
                self.lines[idx].quantity -= 1;
            } else {
                self.lines.remove(idx);
            }
        }
        self.recompute_total();
    }

    /// Removes the whole line for `product_id`. Returns the removed line.
    pub fn remove(&mut self, product_id: &str) -> Option<CartLineItem> {
        let removed = self.position(product_id).map(|idx| self.lines.remove(idx));
        self.recompute_total();
        removed
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute_total();
    }

    /// Captures the order and empties the cart.
    ///
    /// The summary is taken before clearing, so it reflects exactly what was
    /// paid for.
    pub fn checkout(&mut self) -> OrderSummary {
        let summary = OrderSummary {
            lines: self.lines.clone(),
            total: self.total,
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
        };
        self.clear();
        summary
    }

    /// Derived total of all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Line for `product_id`, if present.
    pub fn line(&self, product_id: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serializable view for observers.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total,
        }
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLineItem> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }

    fn recompute_total(&mut self) {
        self.total = self.lines.iter().map(CartLineItem::line_total).sum();
    }
}

// =============================================================================
// Views
// =============================================================================

/// Read-only cart view handed to observers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLineItem>,
    pub total: Money,
}

/// What was rung up by a checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub lines: Vec<CartLineItem>,
    pub total: Money,
    #[ts(type = "number")]
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> Product {
        Product::new("p-1", "Es Kopi", Money::from_units(15_000))
            .with_size("JUMBO")
            .with_type("DRINK")
    }

    fn toast() -> Product {
        Product::new("p-2", "Roti Bakar", Money::from_units(12_000))
            .with_size("MEDIUM")
            .with_type("FOOD")
    }

    fn expected_total(cart: &CartStore) -> i64 {
        cart.lines()
            .iter()
            .map(|l| l.product.price.units() * i64::from(l.quantity))
            .sum()
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = CartStore::new();
        cart.add_to_cart(2, &coffee());
        cart.add_to_cart(3, &coffee());

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line("p-1").unwrap().quantity, 5);
        assert_eq!(cart.total(), Money::from_units(75_000));
    }

    #[test]
    fn test_add_distinct_products_keeps_order() {
        let mut cart = CartStore::new();
        cart.add_to_cart(1, &toast());
        cart.add_to_cart(2, &coffee());

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id()).collect();
        assert_eq!(ids, vec!["p-2", "p-1"]);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total(), Money::from_units(42_000));
    }

    #[test]
    fn test_add_zero_does_not_create_line() {
        let mut cart = CartStore::new();
        cart.add_to_cart(0, &coffee());
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());

        cart.add_to_cart(1, &coffee());
        cart.add_to_cart(0, &coffee());
        assert_eq!(cart.line("p-1").unwrap().quantity, 1);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut cart = CartStore::new();
        let mut product = coffee();
        cart.add_to_cart(1, &product);

        product.price = Money::from_units(99_000);
        cart.add_to_cart(1, &product);

        assert_eq!(cart.line("p-1").unwrap().product.price, Money::from_units(15_000));
        assert_eq!(cart.total(), Money::from_units(30_000));
    }

    #[test]
    fn test_increase_quantity() {
        let mut cart = CartStore::new();
        cart.add_to_cart(1, &coffee());
        cart.increase_quantity("p-1");
        cart.increase_quantity("missing");

        assert_eq!(cart.line("p-1").unwrap().quantity, 2);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Money::from_units(30_000));
    }

    #[test]
    fn test_decrease_quantity_decrements_then_removes() {
        let mut cart = CartStore::new();
        cart.add_to_cart(2, &coffee());

        cart.decrease_quantity("p-1");
        assert_eq!(cart.line("p-1").unwrap().quantity, 1);
        assert_eq!(cart.total(), Money::from_units(15_000));

        cart.decrease_quantity("p-1");
        assert!(cart.line("p-1").is_none());
        assert_eq!(cart.total(), Money::zero());

        // Already gone: no-op.
        cart.decrease_quantity("p-1");
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_remove_line() {
        let mut cart = CartStore::new();
        cart.add_to_cart(3, &coffee());
        cart.add_to_cart(1, &toast());

        let removed = cart.remove("p-1").unwrap();
        assert_eq!(removed.quantity, 3);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Money::from_units(12_000));
        assert!(cart.remove("p-1").is_none());
    }

    #[test]
    fn test_clear_resets_total() {
        let mut cart = CartStore::new();
        cart.add_to_cart(4, &coffee());
        cart.add_to_cart(2, &toast());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_checkout_captures_then_clears() {
        let mut cart = CartStore::new();
        cart.add_to_cart(2, &coffee());
        cart.add_to_cart(1, &toast());

        let order = cart.checkout();
        assert_eq!(order.item_count, 2);
        assert_eq!(order.total_quantity, 3);
        assert_eq!(order.total, Money::from_units(42_000));
        assert_eq!(order.lines.len(), 2);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = CartStore::new();
        cart.add_to_cart(u32::MAX, &coffee());
        cart.increase_quantity("p-1");
        cart.add_to_cart(10, &coffee());

        assert_eq!(cart.line("p-1").unwrap().quantity, u32::MAX);
        assert_eq!(cart.total(), Money::from_units(15_000).multiply_quantity(u32::MAX));
    }

    #[test]
    fn test_total_tracks_any_operation_sequence() {
        let products = [coffee(), toast(), Product::new("p-3", "Air Mineral", Money::from_units(4_000))];
        let mut cart = CartStore::new();

        // Deterministic pseudo-random walk over the operations.
        let mut seed: u32 = 7;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let product = &products[(seed >> 8) as usize % products.len()];
            match (seed >> 16) % 4 {
                0 => cart.add_to_cart((seed >> 20) % 4, product),
                1 => cart.increase_quantity(&product.id),
                2 => cart.decrease_quantity(&product.id),
                _ => {
                    cart.remove(&product.id);
                }
            }

            assert_eq!(cart.total().units(), expected_total(&cart));

            let mut ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), before, "duplicate line for one product id");
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut cart = CartStore::new();
        cart.add_to_cart(2, &coffee());

        let value = serde_json::to_value(cart.snapshot()).unwrap();
        assert_eq!(value["total"], 30_000);
        assert_eq!(value["lines"][0]["quantity"], 2);
        assert_eq!(value["lines"][0]["product"]["type"], "DRINK");
    }
}
