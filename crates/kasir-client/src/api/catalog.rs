//! Product catalog client.

use kasir_core::validation::validate_new_product;
use kasir_core::{CreatedProduct, NewProduct, Product};
use reqwest::Method;
use tracing::{debug, info, warn};

use super::{decode_body, is_empty_body, ApiClient, CatalogApi};
use crate::error::{ClientError, ClientResult};

const PRODUCTS: &str = "products/";

/// REST implementation of [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    pub fn new(api: ApiClient) -> Self {
        CatalogClient { api }
    }
}

impl CatalogApi for CatalogClient {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        let url = self.api.endpoint(PRODUCTS)?;
        let (status, body) = self.api.send(self.api.request(Method::GET, url)).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Product list request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: "Failed to fetch products".to_string(),
            });
        }

        if is_empty_body(&body) {
            return Ok(Vec::new());
        }

        let products: Vec<Product> = decode_body(&body)?;
        debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    async fn get_product(&self, id: &str) -> ClientResult<Product> {
        let url = self.api.item_endpoint(PRODUCTS, id)?;
        let (status, body) = self.api.send(self.api.request(Method::GET, url)).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), product_id = %id, "Product detail request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: "Failed to fetch detail product".to_string(),
            });
        }

        decode_body(&body)
    }

    async fn create_product(&self, product: NewProduct) -> ClientResult<CreatedProduct> {
        validate_new_product(&product)?;

        let url = self.api.endpoint(PRODUCTS)?;
        let request = self.api.request(Method::POST, url).json(&product);
        let (status, body) = self.api.send(request).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), name = %product.name, "Product create request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        let created: CreatedProduct = decode_body(&body)?;
        info!(product_id = %created.id, name = %product.name, "Product created");
        Ok(created)
    }
}
