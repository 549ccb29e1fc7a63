//! Orders and bills. Both are created only by checkout, so there is no
//! create command here.

use clap::Subcommand;
use shopfront_api::ApiClient;
use shopfront_core::{AppConfig, Bill, Order, OrderDraft, OrderStatus};
use shopfront_storefront::orders::load_view;

use super::{delete_record, list_page, print_page_footer};
use crate::display::{explain, explain_api, fmt_money};
use crate::orders::print_order_view;

#[derive(Debug, Subcommand)]
pub enum OrderCommands {
    /// List orders one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only show orders of this client (filters the fetched page)
        #[arg(long)]
        client: Option<i64>,
    },
    /// Show an order with its lines and bill
    Show { id: i64 },
    /// Move an order to another status
    SetStatus {
        id: i64,
        /// pending, in-progress, delivered or canceled (or the numeric code)
        status: OrderStatus,
    },
    /// Delete an order
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum BillCommands {
    /// List bills one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Show { id: i64 },
    /// Delete a bill that no order references
    Delete { id: i64 },
}

pub(super) async fn run_orders(
    command: OrderCommands,
    config: &AppConfig,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        OrderCommands::List { page, client } => {
            let (orders, window) = list_page::<Order>(api, config, page).await?;
            let shown: Vec<&Order> = orders
                .iter()
                .filter(|o| client.is_none_or(|c| o.client_id == c))
                .collect();
            if shown.is_empty() {
                println!("no orders on page {}", window.page);
            } else {
                println!(
                    "{:<8}{:<8}{:<18}{:<14}{:>11}",
                    "ID", "CLIENT", "DATE", "STATUS", "TOTAL"
                );
                for order in shown {
                    println!(
                        "{:<8}{:<8}{:<18}{:<14}{:>11}",
                        order.id,
                        order.client_id,
                        order.date.format("%Y-%m-%d %H:%M").to_string(),
                        order.status.label(),
                        fmt_money(order.total)
                    );
                }
            }
            print_page_footer(window);
        }
        OrderCommands::Show { id } => {
            let order = api.get::<Order>(id).await.map_err(explain_api)?;
            let view = load_view(api, order).await.map_err(explain)?;
            print_order_view(&view);
        }
        OrderCommands::SetStatus { id, status } => {
            let current = api.get::<Order>(id).await.map_err(explain_api)?;
            if current.status == status {
                println!("order {id} is already {status}");
                return Ok(());
            }
            let draft = OrderDraft {
                status,
                ..OrderDraft::from(&current)
            };
            let updated = api.update::<Order>(id, &draft).await.map_err(explain_api)?;
            tracing::info!(order_id = id, from = %current.status, to = %updated.status, "order status changed");
            println!("order {id}: {} -> {}", current.status, updated.status);
        }
        OrderCommands::Delete { id } => delete_record::<Order>(api, id).await?,
    }
    Ok(())
}

pub(super) async fn run_bills(
    command: BillCommands,
    config: &AppConfig,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        BillCommands::List { page } => {
            let (bills, window) = list_page::<Bill>(api, config, page).await?;
            if bills.is_empty() {
                println!("no bills on page {}", window.page);
                return Ok(());
            }
            println!(
                "{:<8}{:<24}{:<12}{:<8}{:<15}{:>11}",
                "ID", "NUMBER", "DATE", "CLIENT", "PAYMENT", "TOTAL"
            );
            for bill in &bills {
                println!(
                    "{:<8}{:<24}{:<12}{:<8}{:<15}{:>11}",
                    bill.id,
                    bill.bill_number,
                    bill.date.format("%Y-%m-%d").to_string(),
                    bill.client_id,
                    bill.payment_type.label(),
                    fmt_money(bill.total)
                );
            }
            print_page_footer(window);
        }
        BillCommands::Show { id } => {
            let bill = api.get::<Bill>(id).await.map_err(explain_api)?;
            println!("Bill #{} ({})", bill.id, bill.bill_number);
            println!("Date:     {}", bill.date.format("%Y-%m-%d"));
            println!("Client:   {}", bill.client_id);
            println!("Payment:  {}", bill.payment_type);
            if let Some(discount) = bill.discount {
                println!("Discount: {}", fmt_money(discount));
            }
            println!("Total:    {}", fmt_money(bill.total));
        }
        BillCommands::Delete { id } => delete_record::<Bill>(api, id).await?,
    }
    Ok(())
}
