//! # View States
//!
//! Observable state the front end renders from.
//!
//! ## State Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        View States                                      │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ CatalogState     │  │ ProductDetail    │  │ AddProductState  │      │
//! │  │ Vec<Product>     │  │ Product          │  │ CreatedProduct   │──┐   │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘  │   │
//! │           ▲                                                         │   │
//! │           └──────────────── refresh() on success ───────────────────┘   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐                            │
//! │  │ LoginState       │  │ CartState        │                            │
//! │  │ LoginResponse    │  │ CartStore        │                            │
//! │  └──────────────────┘  └──────────────────┘                            │
//! │                                                                         │
//! │  Network-backed states publish ResourceState<T> through a              │
//! │  ResourceCell. CartState publishes the CartStore itself.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod product_form;
mod resource;
mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use cart::CartState;
pub use catalog::{CatalogState, ProductDetailState};
pub use product_form::AddProductState;
pub use resource::ResourceCell;
pub use session::LoginState;
