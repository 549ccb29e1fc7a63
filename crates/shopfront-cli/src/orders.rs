//! `orders` commands for the signed-in client.

use clap::Subcommand;
use shopfront_api::ApiClient;
use shopfront_core::AppState;
use shopfront_storefront::{order_history, order_view, require_session, OrderView};

use crate::display::{explain, fmt_money};

#[derive(Debug, Subcommand)]
pub enum OrdersCommands {
    /// List past orders, newest first
    List,
    /// Show one order with its lines and bill
    Show {
        /// Order id
        id: i64,
    },
}

pub(crate) async fn run(
    command: OrdersCommands,
    api: &ApiClient,
    state: &AppState,
) -> anyhow::Result<()> {
    let client_id = require_session(state)?;
    match command {
        OrdersCommands::List => {
            let orders = order_history(api, client_id).await.map_err(explain)?;
            if orders.is_empty() {
                println!("no orders yet");
                return Ok(());
            }
            println!(
                "{:<8}{:<18}{:<14}{:<16}{:>11}",
                "ID", "DATE", "STATUS", "DELIVERY", "TOTAL"
            );
            for order in &orders {
                println!(
                    "{:<8}{:<18}{:<14}{:<16}{:>11}",
                    order.id,
                    order.date.format("%Y-%m-%d %H:%M").to_string(),
                    order.status.label(),
                    order.delivery_method.label(),
                    fmt_money(order.total)
                );
            }
        }
        OrdersCommands::Show { id } => {
            let view = order_view(api, client_id, id).await.map_err(explain)?;
            print_order_view(&view);
        }
    }
    Ok(())
}

/// Prints an order, its lines and its bill. Shared with checkout and admin.
pub(crate) fn print_order_view(view: &OrderView) {
    let order = &view.order;
    println!("Order #{} for client {}", order.id, order.client_id);
    println!("Placed:   {}", order.date.format("%Y-%m-%d %H:%M UTC"));
    println!("Status:   {}", order.status);
    println!("Delivery: {}", order.delivery_method);
    println!();

    if view.details.is_empty() {
        println!("  (no order lines)");
    } else {
        println!("  {:<10}{:>5}{:>11}{:>11}", "PRODUCT", "QTY", "PRICE", "SUBTOTAL");
        for detail in &view.details {
            println!(
                "  {:<10}{:>5}{:>11}{:>11}",
                detail.product_id,
                detail.quantity,
                fmt_money(detail.price),
                fmt_money(detail.line_total())
            );
        }
    }
    println!();
    println!("Total:    {}", fmt_money(order.total));
    if view.lines_total() != order.total && !view.details.is_empty() {
        println!("          (lines add up to {})", fmt_money(view.lines_total()));
    }

    match &view.bill {
        Some(bill) => println!(
            "Bill:     {} on {}, paid by {}",
            bill.bill_number,
            bill.date.format("%Y-%m-%d"),
            bill.payment_type
        ),
        None => println!("Bill:     #{} (not found)", order.bill_id),
    }
}
