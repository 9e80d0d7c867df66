//! # REST API
//!
//! Thin clients for the cashier backend.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Backend Endpoints                               │
//! │                                                                         │
//! │  Method  Path              Client          Non-2xx message              │
//! │  ──────  ────              ──────          ───────────────              │
//! │  GET     products/         CatalogClient   Failed to fetch products     │
//! │  GET     products/{id}     CatalogClient   Failed to fetch detail ...   │
//! │  POST    products/         CatalogClient   HTTP <code>                  │
//! │  POST    users/login       AuthClient      ErrorResponse.error          │
//! │                                                                         │
//! │  Every request carries `Authorization: Bearer <token>` when the        │
//! │  TokenStore holds an unexpired token.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The view states only see the [`CatalogApi`] and [`AuthApi`] traits, so
//! they can be driven by fakes in tests.

mod auth;
mod catalog;

pub use auth::AuthClient;
pub use catalog::CatalogClient;

use kasir_core::{CreatedProduct, LoginResponse, NewProduct, Product};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::token::TokenStore;

// =============================================================================
// Seams
// =============================================================================

/// Product catalog operations.
pub trait CatalogApi: Send + Sync {
    /// `GET products/`. An empty body is an empty catalog.
    fn list_products(&self) -> impl Future<Output = ClientResult<Vec<Product>>> + Send;

    /// `GET products/{id}`.
    fn get_product(&self, id: &str) -> impl Future<Output = ClientResult<Product>> + Send;

    /// `POST products/`. The request is validated before it is sent.
    fn create_product(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = ClientResult<CreatedProduct>> + Send;
}

/// Authentication operations.
pub trait AuthApi: Send + Sync {
    /// `POST users/login`. Saves the issued token on success.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = ClientResult<LoginResponse>> + Send;

    /// Forgets the stored token.
    fn logout(&self) -> ClientResult<()>;
}

// =============================================================================
// Shared HTTP Client
// =============================================================================

/// HTTP plumbing shared by [`CatalogClient`] and [`AuthClient`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenStore,
}

impl ApiClient {
    /// Creates a client with default timeouts.
    pub fn new(base_url: Url, tokens: TokenStore) -> ClientResult<Self> {
        let defaults = ClientConfig::default();
        Self::build(base_url, tokens, defaults.timeout(), defaults.connect_timeout())
    }

    /// Creates a client from loaded configuration.
    pub fn from_config(config: &ClientConfig, tokens: TokenStore) -> ClientResult<Self> {
        Self::build(
            config.base_url()?,
            tokens,
            config.timeout(),
            config.connect_timeout(),
        )
    }

    fn build(
        base_url: Url,
        tokens: TokenStore,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(ApiClient {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Resolves a relative endpoint against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// `collection/{id}` with `id` percent-encoded as one path segment.
    pub(crate) fn item_endpoint(&self, collection: &str, id: &str) -> ClientResult<Url> {
        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Starts a request, attaching the bearer token when one is usable.
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.tokens.get() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and reads the whole body.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> ClientResult<(StatusCode, Vec<u8>)> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Response received");
        Ok((status, body.to_vec()))
    }
}

// =============================================================================
// Body Decoding
// =============================================================================

/// True for a body that carries no payload (`""` or `null`).
pub(crate) fn is_empty_body(body: &[u8]) -> bool {
    let trimmed = body.trim_ascii();
    trimmed.is_empty() || trimmed == b"null"
}

/// Decodes a required JSON body.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ClientResult<T> {
    if is_empty_body(body) {
        return Err(ClientError::EmptyResponseBody);
    }
    Ok(serde_json::from_slice(body)?)
}

// =============================================================================
// Test Support
// =============================================================================
