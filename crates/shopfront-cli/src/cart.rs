//! `cart` commands. The cart lives in the local state file.

use anyhow::bail;
use clap::Subcommand;
use shopfront_api::ApiClient;
use shopfront_core::{Action, AppState, Product};

use crate::display::{explain_api, fmt_money, truncate};

#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Add a product to the cart
    Add {
        /// Product id
        product_id: i64,
        /// Units to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove one unit of a product
    Remove {
        /// Product id
        product_id: i64,
    },
    /// Show the cart
    Show,
    /// Empty the cart
    Clear,
}

pub(crate) async fn run(
    command: CartCommands,
    api: &ApiClient,
    state: &mut AppState,
) -> anyhow::Result<()> {
    match command {
        CartCommands::Add {
            product_id,
            quantity,
        } => run_add(api, state, product_id, quantity).await,
        CartCommands::Remove { product_id } => {
            state.dispatch(Action::RemoveFromCart { product_id })?;
            print_cart(state);
            Ok(())
        }
        CartCommands::Show => {
            print_cart(state);
            Ok(())
        }
        CartCommands::Clear => {
            state.clear_cart();
            println!("cart cleared");
            Ok(())
        }
    }
}

/// Adds `quantity` units, one dispatch per unit, at the product's current
/// price.
async fn run_add(
    api: &ApiClient,
    state: &mut AppState,
    product_id: i64,
    quantity: u32,
) -> anyhow::Result<()> {
    if quantity == 0 {
        bail!("quantity must be at least 1");
    }
    let product = api.get::<Product>(product_id).await.map_err(explain_api)?;
    if !product.in_stock() {
        bail!("{} is out of stock", product.name);
    }

    let wanted = state.cart.quantity_of(product_id).saturating_add(quantity);
    if i64::from(wanted) > i64::from(product.stock) {
        eprintln!(
            "warning: only {} of {} in stock; checkout may be rejected",
            product.stock, product.name
        );
    }

    for _ in 0..quantity {
        state.dispatch(Action::AddToCart {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
        })?;
    }
    print_cart(state);
    Ok(())
}

fn print_cart(state: &AppState) {
    let cart = &state.cart;
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }
    println!("{:<6}{:<34}{:>5}{:>11}{:>11}", "ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL");
    for line in cart.lines() {
        println!(
            "{:<6}{:<34}{:>5}{:>11}{:>11}",
            line.product_id,
            truncate(&line.name, 31),
            line.quantity,
            fmt_money(line.unit_price),
            fmt_money(line.line_total())
        );
    }
    println!();
    println!("{} item(s), total {}", cart.item_count(), fmt_money(cart.total()));
}
