//! Pre-submit form checks.
//!
//! These only catch obvious input mistakes before a request is sent. Stock,
//! price and uniqueness rules are enforced by the backend.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

pub(crate) fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require_non_empty(field, value)?;
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::new(field, "is not a valid email address")),
    }
}

pub(crate) fn require_positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::new(field, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::new(field, "must not be negative"));
    }
    Ok(())
}

pub(crate) fn require_rating(field: &'static str, value: f32) -> Result<(), ValidationError> {
    if !(1.0..=5.0).contains(&value) {
        return Err(ValidationError::new(field, "must be between 1 and 5"));
    }
    Ok(())
}

/// Parse a user-typed money amount such as `"12.50"`.
///
/// # Errors
///
/// Returns [`ValidationError`] if the text is not a decimal number or is not
/// strictly positive.
pub fn parse_money(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let value = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| ValidationError::new(field, format!("'{raw}' is not a number")))?;
    require_positive(field, value)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_non_empty("name", "  ").is_err());
        assert!(require_non_empty("name", "Ada").is_ok());
    }

    #[test]
    fn email_needs_both_sides_of_at() {
        assert!(require_email("email", "ada@example.com").is_ok());
        assert!(require_email("email", "@example.com").is_err());
        assert!(require_email("email", "ada@").is_err());
        assert!(require_email("email", "ada@@example.com").is_err());
        assert!(require_email("email", "ada.example.com").is_err());
    }

    #[test]
    fn parse_money_accepts_decimal_text() {
        assert_eq!(parse_money("price", " 12.50 ").unwrap(), Decimal::new(1250, 2));
    }

    #[test]
    fn parse_money_rejects_garbage_and_non_positive() {
        let err = parse_money("price", "twelve").unwrap_err();
        assert_eq!(err.field, "price");
        assert!(parse_money("price", "0").is_err());
        assert!(parse_money("price", "-3").is_err());
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(require_rating("rating", 1.0).is_ok());
        assert!(require_rating("rating", 5.0).is_ok());
        assert!(require_rating("rating", 0.5).is_err());
        assert!(require_rating("rating", 5.5).is_err());
    }
}
