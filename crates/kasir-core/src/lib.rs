//! # kasir-core: Pure Business Logic for the Kasir POS Client
//!
//! This crate holds every piece of the cashier client that has real
//! invariants: the cart, the request state wrapper, token claim decoding and
//! input validation. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir Client Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Front end (kasir CLI / any UI)                 │   │
//! │  │     Login ──► Catalog ──► Cart ──► Checkout                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kasir-client (REST + view states)               │   │
//! │  │     CatalogClient, AuthClient, TokenStore, CatalogState, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  types   │ │   cart   │ │ resource │ │  claims  │          │   │
//! │  │   │ Product  │ │CartStore │ │ Loading  │ │  exp     │          │   │
//! │  │   │ Login    │ │ total    │ │ Success  │ │  userId  │          │   │
//! │  │   └──────────┘ └──────────┘ │ Error    │ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ └──────────┘ ┌──────────┐          │   │
//! │  │   │  money   │ │ catalog  │              │validation│          │   │
//! │  │   └──────────┘ └──────────┘              └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire and domain types (Product, login payloads, ...)
//! - [`money`] - Integer money with rupiah display formatting
//! - [`cart`] - `CartStore`: line items keyed by product id, derived total
//! - [`resource`] - `ResourceState` and request generations
//! - [`claims`] - Best-effort bearer token claim extraction
//! - [`catalog`] - Name search and filter-chip helpers
//! - [`validation`] - Form input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::cart::CartStore;
//! use kasir_core::money::Money;
//! use kasir_core::types::Product;
//!
//! let coffee = Product::new("p-1", "Es Kopi", Money::from_units(15_000));
//!
//! let mut cart = CartStore::new();
//! cart.add_to_cart(2, &coffee);
//! cart.add_to_cart(3, &coffee);
//!
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.total().units(), 75_000);
//! assert_eq!(cart.total().to_string(), "Rp 75.000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod claims;
pub mod error;
pub mod money;
pub mod resource;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLineItem, CartSnapshot, CartStore, OrderSummary, ProductSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use resource::{RequestSequence, RequestTicket, ResourceState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Claim carrying the signed-in cashier's id.
pub const USER_ID_CLAIM: &str = "userId";

/// Claim carrying the token expiry (seconds since the Unix epoch).
pub const EXPIRY_CLAIM: &str = "exp";

/// Currency prefix used when rendering money.
pub const CURRENCY_PREFIX: &str = "Rp";

/// Thousands separator used when rendering money.
pub const THOUSANDS_SEPARATOR: char = '.';
