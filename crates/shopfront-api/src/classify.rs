//! Mapping backend failures to user-facing messages.
//!
//! The backend has no structured error codes. The only signals are the HTTP
//! status and the free-text `detail` field, so classification matches on
//! known substrings of that text. Any wording change on the backend drops the
//! error into [`ErrorClass::Fatal`].

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    InsufficientStock,
    PriceMismatch,
    /// A foreign-key constraint fired: the record is referenced elsewhere or
    /// references something missing.
    ReferenceConflict,
    NotFound,
    /// The request never got a response.
    Connectivity,
    Fatal,
}

impl ErrorClass {
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorClass::InsufficientStock => {
                "Not enough stock for one of the products in your cart."
            }
            ErrorClass::PriceMismatch => {
                "A product price changed since it was added to your cart."
            }
            ErrorClass::ReferenceConflict => {
                "The record is still in use or references something that no longer exists."
            }
            ErrorClass::NotFound => "The requested record does not exist.",
            ErrorClass::Connectivity => "Could not reach the server. Check your connection.",
            ErrorClass::Fatal => "The server could not complete the request.",
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}

/// Classify free-text detail from an error response.
fn classify_detail(detail: &str) -> Option<ErrorClass> {
    let lowered = detail.to_lowercase();
    if lowered.contains("insufficient stock") {
        Some(ErrorClass::InsufficientStock)
    } else if lowered.contains("price") && lowered.contains("mismatch") {
        Some(ErrorClass::PriceMismatch)
    } else if lowered.contains("foreignkey violation") || lowered.contains("foreign key") {
        Some(ErrorClass::ReferenceConflict)
    } else {
        None
    }
}

impl ApiError {
    /// Coarse classification used to choose a user-facing message.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Http(e) if e.is_timeout() || e.is_connect() || e.is_request() => {
                ErrorClass::Connectivity
            }
            ApiError::NotFound { .. } => ErrorClass::NotFound,
            ApiError::Status {
                detail: Some(detail),
                ..
            } => classify_detail(detail).unwrap_or(ErrorClass::Fatal),
            _ => ErrorClass::Fatal,
        }
    }
}
