//! Fakes for the view state tests.

use kasir_core::{CreatedProduct, LoginResponse, NewProduct, Product};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::api::{AuthApi, CatalogApi};
use crate::error::{ClientError, ClientResult};

/// Scripted catalog backend.
#[derive(Default)]
pub struct FakeCatalog {
    lists: Mutex<VecDeque<ClientResult<Vec<Product>>>>,
    products: Mutex<HashMap<String, Product>>,
    created: Mutex<Vec<NewProduct>>,
    reject_creates: Mutex<bool>,
    list_calls: AtomicUsize,
}

impl FakeCatalog {
    /// Queues the response for the next `list_products` call.
    pub fn push_list(&self, result: ClientResult<Vec<Product>>) {
        self.lists.lock().unwrap().push_back(result);
    }

    /// Makes `product` available to `get_product`.
    pub fn insert(&self, product: Product) {
        self.products
            .lock()
            .unwrap()
            .insert(product.id.clone(), product);
    }

    pub fn reject_creates(&self) {
        *self.reject_creates.lock().unwrap() = true;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<NewProduct> {
        self.created.lock().unwrap().clone()
    }
}

impl CatalogApi for FakeCatalog {
    async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.lists.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_product(&self, id: &str) -> ClientResult<Product> {
        let found = self.products.lock().unwrap().get(id).cloned();
        found.ok_or(ClientError::Status {
            status: 404,
            message: "Failed to fetch detail product".into(),
        })
    }

    async fn create_product(&self, product: NewProduct) -> ClientResult<CreatedProduct> {
        if *self.reject_creates.lock().unwrap() {
            return Err(ClientError::Status {
                status: 400,
                message: "HTTP 400".into(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push(product);
        Ok(CreatedProduct {
            id: format!("new-{}", created.len()),
            created_at: "2024-05-01T08:00:00Z".into(),
            message: "Product created".into(),
        })
    }
}

/// Accepts exactly one password.
#[derive(Default)]
pub struct FakeAuth {
    logouts: AtomicUsize,
}

impl FakeAuth {
    pub const PASSWORD: &'static str = "rahasia";

    pub fn logouts(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

impl AuthApi for FakeAuth {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        if password != Self::PASSWORD {
            return Err(ClientError::Status {
                status: 401,
                message: "Invalid email or password".into(),
            });
        }
        Ok(LoginResponse {
            message: "Login successful".into(),
            user_id: "u-1".into(),
            first_name: email.split('@').next().unwrap_or_default().into(),
            last_name: String::new(),
            token: "header.payload.signature".into(),
        })
    }

    fn logout(&self) -> ClientResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
