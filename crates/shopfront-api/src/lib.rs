//! Typed client for the storefront REST backend.
//!
//! The backend owns every business rule. This crate only moves DTOs over
//! HTTP, turns error responses into [`ApiError`]s with the backend's detail
//! text attached, and classifies those errors for display.

pub mod classify;
pub mod client;
pub mod error;
pub mod health;
pub mod resources;

pub use classify::ErrorClass;
pub use client::ApiClient;
pub use error::ApiError;
pub use health::{CacheGuess, HealthCheck, HealthReport, PoolStats, Timed};
pub use resources::Resource;
