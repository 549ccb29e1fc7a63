//! Checkout: bill, then order, then one order detail per cart line.
//!
//! The three steps are dependent REST calls with no transaction around them.
//! A failure stops the sequence where it is. Records already created are not
//! deleted; their ids are returned in [`Orphaned`] and logged so they can be
//! cleaned up by hand. Nothing here is retried, and there is no idempotency
//! key, so submitting again after a failure creates new bill and order
//! records.
//!
//! Order details are posted concurrently. Some may persist while others fail.

use std::fmt;

use chrono::Utc;
use futures::future::join_all;
use rust_decimal::Decimal;
use shopfront_api::{ApiClient, ApiError, ErrorClass};
use shopfront_core::{
    AppState, Bill, BillDraft, CartLine, DeliveryMethod, Order, OrderDetail,
    OrderDetailDraft, OrderDraft, OrderStatus, PaymentType,
};
use thiserror::Error;

/// Status every new order starts in.
pub const INITIAL_ORDER_STATUS: OrderStatus = OrderStatus::Pending;

/// What the shopper picked on the checkout screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub address_id: Option<i64>,
    pub delivery_method: DeliveryMethod,
    pub payment_type: PaymentType,
}

/// Everything created by a successful checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub bill: Bill,
    pub order: Order,
    pub details: Vec<OrderDetail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    Bill,
    Order,
    OrderDetails,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStage::Bill => write!(f, "bill"),
            CheckoutStage::Order => write!(f, "order"),
            CheckoutStage::OrderDetails => write!(f, "order details"),
        }
    }
}

/// Records left behind by a checkout that failed part-way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Orphaned {
    pub bill_id: Option<i64>,
    pub order_id: Option<i64>,
    /// Order details that were created before the failure was seen.
    pub detail_ids: Vec<i64>,
}

impl Orphaned {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bill_id.is_none() && self.order_id.is_none() && self.detail_ids.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("sign in before checking out")]
    NotLoggedIn,

    #[error("the cart is empty")]
    EmptyCart,

    #[error("select a delivery address")]
    NoAddress,

    #[error("order total must be greater than zero (got {0})")]
    NonPositiveTotal(Decimal),

    #[error("checkout failed while creating the {stage}: {class}")]
    Failed {
        stage: CheckoutStage,
        class: ErrorClass,
        orphaned: Orphaned,
        /// Number of order-detail posts that failed (only at the details stage).
        failed_details: usize,
        #[source]
        source: ApiError,
    },
}

impl CheckoutError {
    /// Warning text about records left on the server, if any.
    #[must_use]
    pub fn orphan_warning(&self) -> Option<String> {
        let CheckoutError::Failed { orphaned, .. } = self else {
            return None;
        };
        if orphaned.is_empty() {
            return None;
        }
        let mut parts = Vec::new();
        if let Some(id) = orphaned.bill_id {
            parts.push(format!("bill {id}"));
        }
        if let Some(id) = orphaned.order_id {
            parts.push(format!("order {id}"));
        }
        if !orphaned.detail_ids.is_empty() {
            parts.push(format!("{} order detail(s)", orphaned.detail_ids.len()));
        }
        Some(format!(
            "Warning: {} were created before the failure and were not removed.",
            parts.join(", ")
        ))
    }
}

/// Bill number derived from the client and the current time.
fn bill_number(client_id: i64) -> String {
    format!("B-{client_id}-{}", Utc::now().timestamp_millis())
}

fn failed(
    stage: CheckoutStage,
    source: ApiError,
    orphaned: Orphaned,
    failed_details: usize,
) -> CheckoutError {
    let class = source.class();
    if !orphaned.is_empty() {
        tracing::warn!(
            %stage,
            bill_id = ?orphaned.bill_id,
            order_id = ?orphaned.order_id,
            detail_ids = ?orphaned.detail_ids,
            "checkout aborted with records left on the server"
        );
    }
    CheckoutError::Failed {
        stage,
        class,
        orphaned,
        failed_details,
        source,
    }
}

/// Run the purchase sequence for the cart in `state`.
///
/// Preconditions are checked before any request is sent. On success the cart
/// is cleared through [`AppState::clear_cart`]; on failure the cart is
/// left as it was so the shopper can fix the problem and resubmit.
///
/// # Errors
///
/// A precondition variant of [`CheckoutError`] when nothing was sent, or
/// [`CheckoutError::Failed`] naming the stage that failed and any records
/// that were created before it.
pub async fn checkout(
    api: &ApiClient,
    state: &mut AppState,
    request: &CheckoutRequest,
) -> Result<CheckoutReceipt, CheckoutError> {
    let client_id = state.client_id().ok_or(CheckoutError::NotLoggedIn)?;
    if state.cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    if request.address_id.is_none() {
        return Err(CheckoutError::NoAddress);
    }
    let total = state.cart.total();
    if total <= Decimal::ZERO {
        return Err(CheckoutError::NonPositiveTotal(total));
    }

    let now = Utc::now();

    let bill_draft = BillDraft {
        bill_number: bill_number(client_id),
        discount: None,
        date: now.date_naive(),
        total,
        payment_type: request.payment_type,
        client_id,
    };
    let bill = api
        .create::<Bill>(&bill_draft)
        .await
        .map_err(|e| failed(CheckoutStage::Bill, e, Orphaned::default(), 0))?;

    let order_draft = OrderDraft {
        date: now,
        total,
        delivery_method: request.delivery_method,
        status: INITIAL_ORDER_STATUS,
        client_id,
        bill_id: bill.id,
    };
    let order = api.create::<Order>(&order_draft).await.map_err(|e| {
        let orphaned = Orphaned {
            bill_id: Some(bill.id),
            ..Orphaned::default()
        };
        failed(CheckoutStage::Order, e, orphaned, 0)
    })?;

    let details = create_details(api, order.id, state.cart.lines())
        .await
        .map_err(|(e, detail_ids, failed_count)| {
            let orphaned = Orphaned {
                bill_id: Some(bill.id),
                order_id: Some(order.id),
                detail_ids,
            };
            failed(CheckoutStage::OrderDetails, e, orphaned, failed_count)
        })?;

    state.clear_cart();
    tracing::info!(
        client_id,
        order_id = order.id,
        bill_id = bill.id,
        lines = details.len(),
        %total,
        "checkout completed"
    );

    Ok(CheckoutReceipt {
        bill,
        order,
        details,
    })
}

/// Post one detail per line concurrently.
///
/// On failure returns the first error, the ids of details that did persist,
/// and how many posts failed.
async fn create_details(
    api: &ApiClient,
    order_id: i64,
    lines: &[CartLine],
) -> Result<Vec<OrderDetail>, (ApiError, Vec<i64>, usize)> {
    let drafts: Vec<OrderDetailDraft> = lines
        .iter()
        .map(|line| OrderDetailDraft {
            quantity: line.quantity,
            price: line.unit_price,
            order_id,
            product_id: line.product_id,
        })
        .collect();

    let results = join_all(drafts.iter().map(|d| api.create::<OrderDetail>(d))).await;

    let mut created = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(detail) => created.push(detail),
            Err(e) => errors.push(e),
        }
    }

    let failed_count = errors.len();
    match errors.into_iter().next() {
        None => Ok(created),
        Some(first) => Err((first, created.iter().map(|d| d.id).collect(), failed_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bill_number_includes_client() {
        assert!(bill_number(42).starts_with("B-42-"));
    }

    #[test]
    fn orphan_warning_lists_created_records() {
        let err = CheckoutError::Failed {
            stage: CheckoutStage::OrderDetails,
            class: ErrorClass::InsufficientStock,
            orphaned: Orphaned {
                bill_id: Some(1),
                order_id: Some(2),
                detail_ids: vec![3, 4],
            },
            failed_details: 1,
            source: ApiError::NotFound {
                path: "/order_details".to_string(),
            },
        };
        let warning = err.orphan_warning().unwrap();
        assert!(warning.contains("bill 1"));
        assert!(warning.contains("order 2"));
        assert!(warning.contains("2 order detail(s)"));
    }

    #[test]
    fn no_orphan_warning_when_bill_failed() {
        let err = CheckoutError::Failed {
            stage: CheckoutStage::Bill,
            class: ErrorClass::Connectivity,
            orphaned: Orphaned::default(),
            failed_details: 0,
            source: ApiError::NotFound {
                path: "/bills".to_string(),
            },
        };
        assert!(err.orphan_warning().is_none());
        assert!(CheckoutError::EmptyCart.orphan_warning().is_none());
    }

    #[test]
    fn failed_message_uses_class_text() {
        let err = CheckoutError::Failed {
            stage: CheckoutStage::Order,
            class: ErrorClass::PriceMismatch,
            orphaned: Orphaned::default(),
            failed_details: 0,
            source: ApiError::NotFound {
                path: "/orders".to_string(),
            },
        };
        let text = err.to_string();
        assert!(text.contains("the order"));
        assert!(text.contains("price changed"));
    }
}
