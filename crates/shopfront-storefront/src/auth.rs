//! Sign-in by client id and email.
//!
//! There is no password: the backend record is fetched by id and its email is
//! compared to the one typed in. This is an identification step, not
//! authentication. Anyone who knows an id and its email can sign in.

use chrono::Utc;
use shopfront_api::ApiClient;
use shopfront_core::{AppState, Client, Session};

use crate::error::StorefrontError;

/// Case-insensitive comparison with surrounding whitespace ignored.
fn emails_match(stored: &str, submitted: &str) -> bool {
    stored.trim().to_lowercase() == submitted.trim().to_lowercase()
}

/// Establish a session for `client_id` when `email` matches its record.
///
/// On any failure `state` is left exactly as it was, including an existing
/// session.
///
/// # Errors
///
/// - [`StorefrontError::UnknownClient`] when the backend returns 404.
/// - [`StorefrontError::EmailMismatch`] when the emails differ.
/// - [`StorefrontError::Api`] for every other backend failure.
pub async fn login(
    api: &ApiClient,
    state: &mut AppState,
    client_id: i64,
    email: &str,
) -> Result<Session, StorefrontError> {
    let client = match api.get::<Client>(client_id).await {
        Ok(client) => client,
        Err(e) if e.is_not_found() => return Err(StorefrontError::UnknownClient(client_id)),
        Err(e) => return Err(e.into()),
    };

    if !emails_match(&client.email, email) {
        tracing::info!(client_id, "login rejected: email mismatch");
        return Err(StorefrontError::EmailMismatch { client_id });
    }

    let session = Session {
        client_id,
        email: client.email,
        logged_in_at: Utc::now(),
    };
    state.log_in(session.clone());
    tracing::info!(client_id, "logged in");
    Ok(session)
}

/// Drop the session and the cart.
pub fn logout(state: &mut AppState) {
    if let Some(client_id) = state.client_id() {
        tracing::info!(client_id, "logged out");
    }
    state.log_out();
}

/// The signed-in client id.
///
/// # Errors
///
/// Returns [`StorefrontError::NotLoggedIn`] without a session.
pub fn require_session(state: &AppState) -> Result<i64, StorefrontError> {
    state.client_id().ok_or(StorefrontError::NotLoggedIn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_match_ignores_case_and_whitespace() {
        assert!(emails_match("Ada@Example.com", "  ada@example.COM "));
        assert!(!emails_match("ada@example.com", "ada@example.org"));
    }

    #[test]
    fn logout_without_session_is_harmless() {
        let mut state = AppState::default();
        logout(&mut state);
        assert!(state.session.is_none());
    }

    #[test]
    fn require_session_without_login_fails() {
        let state = AppState::default();
        assert!(matches!(
            require_session(&state),
            Err(StorefrontError::NotLoggedIn)
        ));
    }
}
