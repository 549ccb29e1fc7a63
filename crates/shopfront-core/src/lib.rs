//! Domain types and client-side state for the shopfront storefront.
//!
//! Everything here is I/O free apart from reading environment variables:
//! passthrough DTOs for the backend's REST resources, the integer lookup
//! tables, the cart and catalog state, and the application state container
//! that reducer actions mutate.

pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod lookup;
pub mod models;
pub mod state;
pub mod validate;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartError, CartLine};
pub use catalog::{filter_by_name, PageWindow};
pub use config::{load_app_config, load_app_config_from_env};
pub use lookup::{DeliveryMethod, OrderStatus, PaymentType, UnknownCode};
pub use models::{
    Address, AddressDraft, Bill, BillDraft, Category, CategoryDraft, Client, ClientDraft, Order,
    OrderDetail, OrderDetailDraft, OrderDraft, Product, ProductDraft, Review, ReviewDraft,
};
pub use state::{Action, AppState, Session};
pub use validate::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
