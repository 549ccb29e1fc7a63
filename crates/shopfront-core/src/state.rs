//! Application state container.
//!
//! All client-side state that outlives a single request lives here: the
//! signed-in session and the cart. Transitions are [`Action`]s passed to
//! [`AppState::dispatch`]. The ones that cannot fail are also plain methods
//! ([`AppState::log_in`], [`AppState::log_out`], [`AppState::clear_cart`]),
//! and `dispatch` delegates to them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartError};

/// A signed-in client.
///
/// The client id doubles as the credential; holding a session proves nothing
/// to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub client_id: i64,
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddToCart {
        product_id: i64,
        name: String,
        unit_price: Decimal,
    },
    RemoveFromCart {
        product_id: i64,
    },
    ClearCart,
    LoggedIn(Session),
    /// Drops the session and the cart.
    LoggedOut,
    /// A checkout finished; the cart is emptied.
    CheckoutCompleted {
        order_id: i64,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub cart: Cart,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn client_id(&self) -> Option<i64> {
        self.session.as_ref().map(|s| s.client_id)
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Signs a client in, replacing any previous session.
    pub fn log_in(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drops the session and the cart.
    pub fn log_out(&mut self) {
        self.session = None;
        self.cart.clear();
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Apply one state transition.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when removing a product that is not in the cart;
    /// the state is left untouched in that case. Every other action succeeds.
    pub fn dispatch(&mut self, action: Action) -> Result<(), CartError> {
        match action {
            Action::AddToCart {
                product_id,
                name,
                unit_price,
            } => self.cart.add_item(product_id, &name, unit_price),
            Action::RemoveFromCart { product_id } => self.cart.remove_item(product_id)?,
            Action::ClearCart | Action::CheckoutCompleted { .. } => self.clear_cart(),
            Action::LoggedIn(session) => self.log_in(session),
            Action::LoggedOut => self.log_out(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(client_id: i64) -> Session {
        Session {
            client_id,
            email: "ada@example.com".to_string(),
            logged_in_at: Utc::now(),
        }
    }

    fn add(state: &mut AppState, product_id: i64, price: i64) {
        state
            .dispatch(Action::AddToCart {
                product_id,
                name: format!("product-{product_id}"),
                unit_price: Decimal::new(price, 0),
            })
            .unwrap();
    }

    #[test]
    fn login_sets_session() {
        let mut state = AppState::new();
        state.dispatch(Action::LoggedIn(session(7))).unwrap();
        assert_eq!(state.client_id(), Some(7));
        assert!(state.is_logged_in());
    }

    #[test]
    fn logout_clears_session_and_cart() {
        let mut state = AppState::new();
        state.dispatch(Action::LoggedIn(session(7))).unwrap();
        add(&mut state, 1, 10);
        state.dispatch(Action::LoggedOut).unwrap();
        assert!(state.session.is_none());
        assert!(state.cart.is_empty());
    }

    #[test]
    fn checkout_completion_clears_cart_but_keeps_session() {
        let mut state = AppState::new();
        state.dispatch(Action::LoggedIn(session(7))).unwrap();
        add(&mut state, 1, 10);
        state
            .dispatch(Action::CheckoutCompleted { order_id: 3 })
            .unwrap();
        assert!(state.cart.is_empty());
        assert_eq!(state.client_id(), Some(7));
    }

    #[test]
    fn log_out_method_matches_logged_out_action() {
        let mut via_method = AppState::new();
        via_method.log_in(session(7));
        add(&mut via_method, 1, 10);
        let mut via_action = via_method.clone();

        via_method.log_out();
        via_action.dispatch(Action::LoggedOut).unwrap();
        assert_eq!(via_method, via_action);
        assert_eq!(via_method, AppState::default());
    }

    #[test]
    fn clear_cart_keeps_session() {
        let mut state = AppState::new();
        state.log_in(session(7));
        add(&mut state, 1, 10);
        add(&mut state, 2, 5);
        state.clear_cart();
        assert!(state.cart.is_empty());
        assert_eq!(state.client_id(), Some(7));
    }

    #[test]
    fn failed_remove_leaves_state_untouched() {
        let mut state = AppState::new();
        add(&mut state, 1, 10);
        let before = state.clone();
        assert!(state
            .dispatch(Action::RemoveFromCart { product_id: 2 })
            .is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn state_snapshot_round_trips() {
        let mut state = AppState::new();
        state.dispatch(Action::LoggedIn(session(7))).unwrap();
        add(&mut state, 1, 10);
        add(&mut state, 2, 5);
        let json = serde_json::to_string(&state).unwrap();
        let restored: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.cart.total(), Decimal::new(15, 0));
    }

    #[test]
    fn empty_json_object_is_default_state() {
        let restored: AppState = serde_json::from_str("{}").unwrap();
        assert_eq!(restored, AppState::default());
    }
}
