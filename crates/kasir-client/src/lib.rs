//! # kasir-client: REST Collaborators and View States
//!
//! Everything in the cashier client that performs I/O: the REST clients,
//! the persisted session token, configuration, and the observable view
//! states a front end renders from.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         kasir-client                                    │
//! │                                                                         │
//! │   ClientConfig ──► ApiClient ──┬──► CatalogClient ──► CatalogState      │
//! │        │               ▲       │                      ProductDetail     │
//! │        │               │       │                      AddProductState   │
//! │        ▼               │       └──► AuthClient ─────► LoginState        │
//! │   TokenStore ──────────┘                                                │
//! │   (session.toml)                                       CartState        │
//! │                                                        (no I/O)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//! ```rust,no_run
//! use kasir_client::{ClientConfig, Clients};
//!
//! # async fn run() -> kasir_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let clients = Clients::from_config(&config)?;
//!
//! let catalog = clients.catalog_state();
//! catalog.fetch_products().await;
//! if let Some(products) = catalog.current().data() {
//!     println!("{} products", products.len());
//! }
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod token;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use api::{ApiClient, AuthApi, AuthClient, CatalogApi, CatalogClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use state::{
    AddProductState, CartState, CatalogState, LoginState, ProductDetailState, ResourceCell,
};
pub use token::{FileTokenStorage, MemoryTokenStorage, TokenStorage, TokenStore};

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// =============================================================================
// Wiring
// =============================================================================

/// The REST clients and token store for one backend, wired together.
#[derive(Debug, Clone)]
pub struct Clients {
    pub tokens: TokenStore,
    pub catalog: Arc<CatalogClient>,
    pub auth: Arc<AuthClient>,
    reset_delay: Duration,
}

impl Clients {
    /// Builds clients from configuration, persisting the token to the
    /// configured session file (or memory when no path can be determined).
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let tokens = match config.token_path() {
            Some(path) => {
                info!(?path, "Using session file");
                TokenStore::file(path)
            }
            None => TokenStore::in_memory(),
        };
        Self::with_tokens(config, tokens)
    }

    /// Builds clients around an existing token store.
    pub fn with_tokens(config: &ClientConfig, tokens: TokenStore) -> ClientResult<Self> {
        let api = ApiClient::from_config(config, tokens.clone())?;
        info!(base_url = %api.base_url(), "API client ready");
        Ok(Clients {
            tokens,
            catalog: Arc::new(CatalogClient::new(api.clone())),
            auth: Arc::new(AuthClient::new(api)),
            reset_delay: config.reset_delay(),
        })
    }

    pub fn catalog_state(&self) -> CatalogState<CatalogClient> {
        CatalogState::new(self.catalog.clone())
    }

    pub fn product_detail_state(&self) -> ProductDetailState<CatalogClient> {
        ProductDetailState::new(self.catalog.clone())
    }

    /// Form state that refreshes `listing` after each create.
    pub fn add_product_state(
        &self,
        listing: Arc<CatalogState<CatalogClient>>,
    ) -> AddProductState<CatalogClient> {
        AddProductState::new(self.catalog.clone(), listing, self.reset_delay)
    }

    pub fn login_state(&self) -> LoginState<AuthClient> {
        LoginState::new(self.auth.clone())
    }
}
