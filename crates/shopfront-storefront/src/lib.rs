//! Storefront workflows over the REST backend.
//!
//! Each module drives one shopper-facing flow against an [`ApiClient`] and
//! the local [`AppState`](shopfront_core::AppState): signing in, browsing
//! the catalog, checking out, reading order history, and managing the
//! profile.
//!
//! [`ApiClient`]: shopfront_api::ApiClient

pub mod account;
pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod orders;
pub mod state_file;

pub use auth::{login, logout, require_session};
pub use catalog::{product_detail, CatalogBrowser, ProductDetail};
pub use checkout::{
    checkout, CheckoutError, CheckoutReceipt, CheckoutRequest, CheckoutStage, Orphaned,
};
pub use error::StorefrontError;
pub use orders::{order_history, order_view, OrderView};
pub use state_file::StateStore;
