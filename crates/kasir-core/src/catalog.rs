//! # Catalog Helpers
//!
//! Search and filter-chip helpers over a fetched product list.

use crate::types::Product;

/// Products whose name contains `query`, ignoring case.
///
/// A blank query matches everything.
///
/// ```rust
/// use kasir_core::catalog::filter_by_name;
/// use kasir_core::{Money, Product};
///
/// let products = vec![
///     Product::new("1", "Es Kopi", Money::from_units(15_000)),
///     Product::new("2", "Roti Bakar", Money::from_units(12_000)),
/// ];
/// let hits = filter_by_name(&products, "kopi");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "1");
/// ```
pub fn filter_by_name<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return products.iter().collect();
    }
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Distinct product names in first-seen order.
pub fn distinct_names(products: &[Product]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for product in products {
        if !names.contains(&product.name.as_str()) {
            names.push(&product.name);
        }
    }
    names
}
