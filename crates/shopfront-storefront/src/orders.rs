//! Order history for the signed-in client.

use rust_decimal::Decimal;
use shopfront_api::ApiClient;
use shopfront_core::{Bill, Order, OrderDetail};

use crate::error::StorefrontError;

const BULK_PAGE_SIZE: u32 = 100;

/// One order with its lines and bill.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub order: Order,
    pub details: Vec<OrderDetail>,
    /// `None` when the referenced bill no longer exists.
    pub bill: Option<Bill>,
}

impl OrderView {
    /// Sum of the line totals. May differ from `order.total` if prices were
    /// edited after the order was placed.
    #[must_use]
    pub fn lines_total(&self) -> Decimal {
        self.details.iter().map(OrderDetail::line_total).sum()
    }
}

/// Every order placed by `client_id`, newest first.
///
/// The backend has no per-client filter, so the full order list is fetched
/// and filtered here.
///
/// # Errors
///
/// Propagates [`StorefrontError::Api`].
pub async fn order_history(
    api: &ApiClient,
    client_id: i64,
) -> Result<Vec<Order>, StorefrontError> {
    let mut orders: Vec<Order> = api
        .list_all::<Order>(BULK_PAGE_SIZE)
        .await?
        .into_iter()
        .filter(|o| o.client_id == client_id)
        .collect();
    orders.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    Ok(orders)
}

/// Loads one order of `client_id` with its details and bill.
///
/// # Errors
///
/// - [`StorefrontError::NotOwned`] when the order belongs to another client.
/// - [`StorefrontError::Api`] for backend failures, including a 404 for the
///   order itself.
pub async fn order_view(
    api: &ApiClient,
    client_id: i64,
    order_id: i64,
) -> Result<OrderView, StorefrontError> {
    let order = api.get::<Order>(order_id).await?;
    if order.client_id != client_id {
        return Err(StorefrontError::NotOwned {
            kind: "order",
            id: order_id,
        });
    }
    load_view(api, order).await
}

/// Loads details and bill for an order without an ownership check.
///
/// # Errors
///
/// Propagates [`StorefrontError::Api`].
pub async fn load_view(api: &ApiClient, order: Order) -> Result<OrderView, StorefrontError> {
    let details: Vec<OrderDetail> = api
        .list_all::<OrderDetail>(BULK_PAGE_SIZE)
        .await?
        .into_iter()
        .filter(|d| d.order_id == order.id)
        .collect();

    let bill = match api.get::<Bill>(order.bill_id).await {
        Ok(bill) => Some(bill),
        Err(e) if e.is_not_found() => {
            tracing::warn!(order_id = order.id, bill_id = order.bill_id, "order bill missing");
            None
        }
        Err(e) => return Err(e.into()),
    };

    Ok(OrderView {
        order,
        details,
        bill,
    })
}
