//! Shared output helpers for command handlers.

use rust_decimal::Decimal;
use shopfront_api::ApiError;
use shopfront_storefront::StorefrontError;

const MISSING: &str = "-";

pub(crate) fn fmt_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

pub(crate) fn fmt_opt(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(MISSING)
}

/// Shortens `text` to `max` characters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Wraps a backend error with the message for its class.
pub(crate) fn explain_api(err: ApiError) -> anyhow::Error {
    let message = err.class().user_message();
    anyhow::Error::new(err).context(message)
}

/// Like [`explain_api`] for workflow errors that carry a backend error.
pub(crate) fn explain(err: StorefrontError) -> anyhow::Error {
    match err {
        StorefrontError::Api(api) => explain_api(api),
        other => anyhow::Error::new(other),
    }
}
