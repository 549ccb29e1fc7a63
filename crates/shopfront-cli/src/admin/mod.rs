//! Back-office commands over the raw backend resources.
//!
//! Creates and updates are validated locally before anything is sent.
//! Deletes that trip a foreign-key constraint are reported as "still in use".

mod catalog;
mod clients;
mod sales;

use clap::Subcommand;
use shopfront_api::{ApiClient, ErrorClass, Resource};
use shopfront_core::{AppConfig, PageWindow};

use crate::display::explain_api;

pub(crate) use catalog::{CategoryCommands, ProductCommands};
pub(crate) use clients::ClientCommands;
pub(crate) use sales::{BillCommands, OrderCommands};

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Manage clients
    Clients {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Inspect orders and change their status
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Inspect and delete bills
    Bills {
        #[command(subcommand)]
        command: BillCommands,
    },
}

pub(crate) async fn run(
    command: AdminCommands,
    config: &AppConfig,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        AdminCommands::Clients { command } => clients::run(command, config, api).await,
        AdminCommands::Products { command } => catalog::run_products(command, config, api).await,
        AdminCommands::Categories { command } => {
            catalog::run_categories(command, config, api).await
        }
        AdminCommands::Orders { command } => sales::run_orders(command, config, api).await,
        AdminCommands::Bills { command } => sales::run_bills(command, config, api).await,
    }
}

/// Fetches one page of `R` using the configured page size.
async fn list_page<R: Resource>(
    api: &ApiClient,
    config: &AppConfig,
    page: u32,
) -> anyhow::Result<(Vec<R>, PageWindow)> {
    let window = PageWindow::new(page, config.page_size);
    let items = api
        .list::<R>(window.offset(), window.limit())
        .await
        .map_err(explain_api)?;
    let window = window.with_count(items.len());
    Ok((items, window))
}

fn print_page_footer(window: PageWindow) {
    println!();
    if window.has_next() {
        println!("page {} (more with --page {})", window.page, window.page + 1);
    } else {
        println!("page {} (last page)", window.page);
    }
}

/// Deletes one record, translating constraint failures.
async fn delete_record<R: Resource>(api: &ApiClient, id: i64) -> anyhow::Result<()> {
    match api.delete::<R>(id).await {
        Ok(()) => {
            tracing::info!(resource = R::NAME, id, "record deleted");
            println!("deleted {} {id}", R::NAME);
            Ok(())
        }
        Err(e) if e.class() == ErrorClass::ReferenceConflict => {
            Err(anyhow::Error::new(e).context(format!(
                "cannot delete {} {id}: it is still in use by other records",
                R::NAME
            )))
        }
        Err(e) => Err(explain_api(e)),
    }
}
