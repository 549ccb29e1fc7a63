//! Profile, addresses and reviews for the signed-in client.

use shopfront_api::ApiClient;
use shopfront_core::{Address, AddressDraft, AppState, Client, ClientDraft, Review, ReviewDraft};

use crate::auth::require_session;
use crate::error::StorefrontError;

const BULK_PAGE_SIZE: u32 = 100;

/// The signed-in client's record.
///
/// # Errors
///
/// [`StorefrontError::NotLoggedIn`] without a session, otherwise propagates
/// [`StorefrontError::Api`].
pub async fn profile(api: &ApiClient, state: &AppState) -> Result<Client, StorefrontError> {
    let client_id = require_session(state)?;
    Ok(api.get::<Client>(client_id).await?)
}

/// Replace the signed-in client's record.
///
/// The draft is validated before anything is sent. When the email changes
/// the stored session is updated to match, so the next login check uses the
/// new address.
///
/// # Errors
///
/// [`StorefrontError::Validation`] for bad input, [`StorefrontError::NotLoggedIn`]
/// without a session, [`StorefrontError::Api`] for backend rejections.
pub async fn update_profile(
    api: &ApiClient,
    state: &mut AppState,
    draft: &ClientDraft,
) -> Result<Client, StorefrontError> {
    let client_id = require_session(state)?;
    draft.validate()?;

    let updated = api.update::<Client>(client_id, draft).await?;
    if let Some(session) = state.session.as_mut() {
        session.email.clone_from(&updated.email);
    }
    tracing::info!(client_id, "profile updated");
    Ok(updated)
}

/// Addresses on file for the signed-in client.
///
/// # Errors
///
/// [`StorefrontError::NotLoggedIn`] or [`StorefrontError::Api`].
pub async fn addresses(api: &ApiClient, state: &AppState) -> Result<Vec<Address>, StorefrontError> {
    let client_id = require_session(state)?;
    Ok(api
        .list_all::<Address>(BULK_PAGE_SIZE)
        .await?
        .into_iter()
        .filter(|a| a.client_id == client_id)
        .collect())
}

/// Add an address for the signed-in client. `draft.client_id` is overwritten
/// with the session's id.
///
/// # Errors
///
/// [`StorefrontError::Validation`], [`StorefrontError::NotLoggedIn`] or
/// [`StorefrontError::Api`].
pub async fn add_address(
    api: &ApiClient,
    state: &AppState,
    mut draft: AddressDraft,
) -> Result<Address, StorefrontError> {
    let client_id = require_session(state)?;
    draft.client_id = client_id;
    draft.validate()?;

    let address = api.create::<Address>(&draft).await?;
    tracing::info!(client_id, address_id = address.id, "address added");
    Ok(address)
}

/// Check that `address_id` is one of the signed-in client's addresses.
///
/// # Errors
///
/// [`StorefrontError::NotOwned`] when it belongs to someone else, plus
/// session and backend errors.
pub async fn owned_address(
    api: &ApiClient,
    state: &AppState,
    address_id: i64,
) -> Result<Address, StorefrontError> {
    let client_id = require_session(state)?;
    let address = api.get::<Address>(address_id).await?;
    if address.client_id != client_id {
        return Err(StorefrontError::NotOwned {
            kind: "address",
            id: address_id,
        });
    }
    Ok(address)
}

/// Post a review as the signed-in client.
///
/// # Errors
///
/// [`StorefrontError::Validation`] for a rating outside 1–5, plus session and
/// backend errors.
pub async fn post_review(
    api: &ApiClient,
    state: &AppState,
    product_id: i64,
    rating: f32,
    comment: Option<String>,
) -> Result<Review, StorefrontError> {
    let client_id = require_session(state)?;
    let draft = ReviewDraft {
        rating,
        comment: comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        product_id,
        client_id: Some(client_id),
    };
    draft.validate()?;

    let review = api.create::<Review>(&draft).await?;
    tracing::info!(client_id, product_id, review_id = review.id, "review posted");
    Ok(review)
}
