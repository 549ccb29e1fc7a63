use shopfront_api::ApiClient;
use shopfront_core::{AppState, DeliveryMethod, PaymentType};
use shopfront_storefront::orders::load_view;
use shopfront_storefront::{account, checkout, CheckoutError, CheckoutRequest, OrderView};

use crate::display::{explain, fmt_money};
use crate::orders::print_order_view;

/// Place the order, then print it the way `orders show` does.
///
/// When a failure leaves bill or order records behind, a warning naming them
/// goes to stderr before the error is returned.
pub(crate) async fn run_checkout(
    api: &ApiClient,
    state: &mut AppState,
    address_id: Option<i64>,
    delivery: DeliveryMethod,
    payment: PaymentType,
) -> anyhow::Result<()> {
    if let (Some(id), true) = (address_id, state.is_logged_in()) {
        let address = account::owned_address(api, state, id)
            .await
            .map_err(explain)?;
        println!("Delivering to {}", address.one_line());
    }

    let request = CheckoutRequest {
        address_id,
        delivery_method: delivery,
        payment_type: payment,
    };
    let total = state.cart.total();

    let receipt = match checkout(api, state, &request).await {
        Ok(receipt) => receipt,
        Err(e) => return Err(report_failure(e)),
    };

    println!(
        "Order #{} placed: {} paid by {}",
        receipt.order.id,
        fmt_money(total),
        payment
    );
    println!();

    // Re-read so the view shows what the backend stored.
    let view = match load_view(api, receipt.order.clone()).await {
        Ok(view) => view,
        Err(e) => {
            tracing::warn!(order_id = receipt.order.id, error = %e, "could not reload order");
            OrderView {
                order: receipt.order,
                details: receipt.details,
                bill: Some(receipt.bill),
            }
        }
    };
    print_order_view(&view);
    Ok(())
}

fn report_failure(err: CheckoutError) -> anyhow::Error {
    if let Some(warning) = err.orphan_warning() {
        eprintln!("{warning}");
    }
    anyhow::Error::new(err)
}
