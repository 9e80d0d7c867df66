//! `order`: ring up line items and check out.

use anyhow::{bail, Context as _};
use tracing::info;

use kasir_client::CartState;
use kasir_core::{OrderSummary, Product};

use super::{settled, Context};

/// Parses a `<product-id>=<quantity>` argument.
pub fn parse_line(arg: &str) -> Result<(String, u32), String> {
    let (id, qty) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected <product-id>=<quantity>, got '{arg}'"))?;

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing product id in '{arg}'"));
    }

    let qty: u32 = qty
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a quantity", qty.trim()))?;
    if qty == 0 {
        return Err(format!("quantity for '{id}' must be at least 1"));
    }

    Ok((id.to_string(), qty))
}

pub async fn place(ctx: &Context, lines: &[(String, u32)]) -> anyhow::Result<()> {
    let catalog = ctx.clients.catalog_state();
    catalog.fetch_products().await;
    let products = settled(catalog.current()).context("could not load the catalog")?;

    let cart = CartState::new();
    fill_cart(&cart, &products, lines)?;

    let summary = cart.checkout();
    info!(items = summary.item_count, total = %summary.total, "Order checked out");
    print!("{}", render_summary(&summary));
    Ok(())
}

/// Adds each requested line to `cart`, failing on the first unknown id.
fn fill_cart(cart: &CartState, products: &[Product], lines: &[(String, u32)]) -> anyhow::Result<()> {
    for (id, qty) in lines {
        let Some(product) = products.iter().find(|p| p.id == *id) else {
            bail!("no product with id '{id}'");
        };
        cart.add_to_cart(*qty, product);
    }
    Ok(())
}

fn render_summary(summary: &OrderSummary) -> String {
    let mut out = String::new();
    for line in &summary.lines {
        out.push_str(&format!(
            "{:>4} x {:<30} {:>16}\n",
            line.quantity,
            line.product.name,
            line.line_total().to_string()
        ));
    }
    out.push_str(&format!(
        "{} item(s), {} unit(s)    Total {}\n",
        summary.item_count, summary.total_quantity, summary.total
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::Money;

    fn products() -> Vec<Product> {
        vec![
            Product::new("p-1", "Es Teh", Money::from_units(5_000)),
            Product::new("p-2", "Nasi Goreng", Money::from_units(18_000)),
        ]
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("p-1=2").unwrap(), ("p-1".to_string(), 2));
        assert_eq!(parse_line(" p-1 = 3 ").unwrap(), ("p-1".to_string(), 3));
        assert!(parse_line("p-1").is_err());
        assert!(parse_line("=2").is_err());
        assert!(parse_line("p-1=two").is_err());
        assert!(parse_line("p-1=0").is_err());
    }

    #[test]
    fn test_fill_cart_merges_repeated_ids() {
        let cart = CartState::new();
        let lines = vec![
            ("p-1".to_string(), 2),
            ("p-2".to_string(), 1),
            ("p-1".to_string(), 1),
        ];
        fill_cart(&cart, &products(), &lines).unwrap();

        let summary = cart.checkout();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 4);
        assert_eq!(summary.total, Money::from_units(33_000));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_fill_cart_unknown_id() {
        let cart = CartState::new();
        let err = fill_cart(&cart, &products(), &[("p-9".to_string(), 1)]).unwrap_err();
        assert!(err.to_string().contains("p-9"));
    }

    #[test]
    fn test_render_summary() {
        let cart = CartState::new();
        fill_cart(&cart, &products(), &[("p-2".to_string(), 2)]).unwrap();

        let text = render_summary(&cart.checkout());
        assert!(text.contains("Nasi Goreng"));
        assert!(text.contains("1 item(s), 2 unit(s)"));
        assert!(text.contains("Total Rp 36.000"));
    }
}
