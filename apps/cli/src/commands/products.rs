//! `products`, `product` and `add-product`.

use anyhow::Context as _;
use std::sync::Arc;
use tracing::{debug, info};

use kasir_core::catalog::distinct_names;
use kasir_core::{
    claims, CreatedProduct, Money, NewProduct, Product, ProductSize, ProductType, ResourceState,
};

use super::{settled, Context};

/// Raw `add-product` arguments.
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub size: ProductSize,
    pub product_type: ProductType,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProductForm {
    /// Builds the create request, reading the price the way the form
    /// field does (separators dropped, empty is zero).
    fn into_request(self, user_id: String) -> NewProduct {
        NewProduct {
            user_id,
            name: self.name.trim().to_string(),
            price: Money::parse_digits(&self.price),
            description: self.description.filter(|d| !d.trim().is_empty()),
            size: self.size,
            product_type: self.product_type,
            image: self.image.filter(|i| !i.trim().is_empty()),
        }
    }
}

pub async fn list(ctx: &Context, search: Option<&str>, names_only: bool) -> anyhow::Result<()> {
    let catalog = ctx.clients.catalog_state();
    catalog.fetch_products().await;
    let all = settled(catalog.current())?;

    let shown = match search {
        Some(query) => catalog.search(query),
        None => all,
    };
    debug!(count = shown.len(), "Products loaded");

    if names_only {
        for name in distinct_names(&shown) {
            println!("{name}");
        }
        return Ok(());
    }

    if shown.is_empty() {
        println!("No products");
        return Ok(());
    }
    for product in &shown {
        println!("{}", render_row(product));
    }
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let detail = ctx.clients.product_detail_state();
    detail.fetch(id).await;

    let product = settled(detail.current())?;
    print!("{}", render_detail(&product));
    Ok(())
}

pub async fn add(ctx: &Context, form: ProductForm) -> anyhow::Result<()> {
    let token = ctx.clients.tokens.require().context("sign in before adding products")?;
    let user_id = claims::user_id(&token).context("session token carries no user id")?;
    let request = form.into_request(user_id);

    let listing = Arc::new(ctx.clients.catalog_state());
    let state = ctx.clients.add_product_state(listing.clone());

    let created: CreatedProduct = settled(state.add_product(request).await)?;
    info!(id = %created.id, "Product created");
    println!("{} ({})", created.message, created.id);

    if let ResourceState::Success { data: Some(products) } = listing.current() {
        println!("{} products in catalog", products.len());
    }
    Ok(())
}

fn render_row(product: &Product) -> String {
    format!(
        "{:<26} {:<30} {:>14}  {:<7} {}",
        product.id, product.name, product.price.to_string(), product.size, product.product_type
    )
}

fn render_detail(product: &Product) -> String {
    let mut out = format!("{}\n", product.name);
    out.push_str(&format!("  id          {}\n", product.id));
    out.push_str(&format!("  price       {}\n", product.price));
    out.push_str(&format!("  size        {}\n", product.size));
    out.push_str(&format!("  type        {}\n", product.product_type));
    if !product.description.is_empty() {
        out.push_str(&format!("  description {}\n", product.description));
    }
    if let Some(image) = &product.image {
        out.push_str(&format!("  image       {}\n", image));
    }
    let created = match product.created_at_utc() {
        Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => product.created_at.clone(),
    };
    if !created.is_empty() {
        out.push_str(&format!("  created     {} by {}\n", created, product.created_by));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: "  Es Kopi ".to_string(),
            price: "15.000".to_string(),
            size: ProductSize::Jumbo,
            product_type: ProductType::Drink,
            description: Some("   ".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_into_request() {
        let request = form().into_request("u-1".to_string());

        assert_eq!(request.user_id, "u-1");
        assert_eq!(request.name, "Es Kopi");
        assert_eq!(request.price, Money::from_units(15_000));
        assert_eq!(request.description, None);
        assert_eq!(request.size, ProductSize::Jumbo);
        assert!(kasir_core::validation::validate_new_product(&request).is_ok());
    }

    #[test]
    fn test_unparseable_price_is_zero() {
        let mut f = form();
        f.price = "gratis".to_string();
        let request = f.into_request("u-1".to_string());

        assert!(request.price.is_zero());
        assert!(kasir_core::validation::validate_new_product(&request).is_err());
    }

    #[test]
    fn test_render_detail() {
        let product = Product::new("p-1", "Es Teh", Money::from_units(5_000))
            .with_size("MEDIUM")
            .with_type("DRINK");
        let text = render_detail(&product);

        assert!(text.starts_with("Es Teh\n"));
        assert!(text.contains("Rp 5.000"));
        assert!(text.contains("MEDIUM"));
        assert!(!text.contains("description"));
        assert!(!text.contains("created"));
    }

    #[test]
    fn test_render_detail_plain_timestamp() {
        let mut product = Product::new("p-2", "Roti Bakar", Money::from_units(12_000));
        product.created_at = "2024-05-01 08:00:00".to_string();
        product.created_by = "u-1".to_string();

        let text = render_detail(&product);
        assert!(text.contains("created     2024-05-01 08:00 UTC by u-1"));
    }
}
