use shopfront_api::ApiError;
use shopfront_core::ValidationError;
use thiserror::Error;

use crate::checkout::CheckoutError;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("not signed in; run `login` first")]
    NotLoggedIn,

    #[error("no client with id {0}")]
    UnknownClient(i64),

    #[error("email does not match client {client_id}")]
    EmailMismatch { client_id: i64 },

    /// The record exists but belongs to another client.
    #[error("{kind} {id} does not belong to the signed-in client")]
    NotOwned { kind: &'static str, id: i64 },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("state file I/O error at {path}: {source}")]
    StateIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {path} is corrupt: {source}")]
    StateParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
