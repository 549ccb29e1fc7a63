mod account;
mod admin;
mod cart;
mod catalog;
mod checkout;
mod display;
mod health;
mod orders;

use clap::{CommandFactory, Parser, Subcommand};
use shopfront_api::ApiClient;
use shopfront_core::{AppConfig, AppState, DeliveryMethod, PaymentType};
use shopfront_storefront::{StateStore, StorefrontError};
use tracing_subscriber::EnvFilter;

use crate::account::{AddressCommands, ProfileCommands, ReviewCommands};
use crate::admin::AdminCommands;
use crate::cart::CartCommands;
use crate::catalog::CatalogCommands;
use crate::orders::OrdersCommands;

#[derive(Debug, Parser)]
#[command(name = "shopfront")]
#[command(about = "Storefront and admin client for the shop REST backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse products and categories
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Sign in as an existing client
    Login {
        /// Client id
        #[arg(long)]
        id: i64,
        /// Email on file for the client
        #[arg(long)]
        email: String,
    },
    /// Sign out and empty the cart
    Logout,
    /// Show or edit the signed-in client's profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Delivery addresses of the signed-in client
    Address {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Product reviews
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Place an order for everything in the cart
    Checkout {
        /// Delivery address id (see `address list`)
        #[arg(long)]
        address: Option<i64>,
        /// drive-thru, on-hand or home-delivery (or the numeric code)
        #[arg(long, default_value = "home-delivery")]
        delivery: DeliveryMethod,
        /// cash, card, debit-card, credit-card or bank-transfer
        #[arg(long, default_value = "card")]
        payment: PaymentType,
    },
    /// Order history of the signed-in client
    Orders {
        #[command(subcommand)]
        command: OrdersCommands,
    },
    /// Back-office record management
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Query the backend health endpoint
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = shopfront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let api = ApiClient::from_config(&config)?;
    let store = StateStore::new(&config.state_path);
    let mut state = load_state(&store)?;
    let before = state.clone();

    let result = run(command, &config, &api, &mut state).await;

    if state != before {
        store.save(&state)?;
    }
    result
}

/// Loads the saved session and cart. A corrupt snapshot is discarded.
fn load_state(store: &StateStore) -> anyhow::Result<AppState> {
    match store.load() {
        Ok(state) => Ok(state),
        Err(StorefrontError::StateParse { path, source }) => {
            tracing::warn!(%path, error = %source, "discarding unreadable state file");
            Ok(AppState::default())
        }
        Err(e) => Err(e.into()),
    }
}

async fn run(
    command: Commands,
    config: &AppConfig,
    api: &ApiClient,
    state: &mut AppState,
) -> anyhow::Result<()> {
    match command {
        Commands::Catalog { command } => catalog::run(command, config, api).await,
        Commands::Cart { command } => cart::run(command, api, state).await,
        Commands::Login { id, email } => account::run_login(api, state, id, &email).await,
        Commands::Logout => {
            account::run_logout(state);
            Ok(())
        }
        Commands::Profile { command } => account::run_profile(command, api, state).await,
        Commands::Address { command } => account::run_address(command, api, state).await,
        Commands::Review { command } => account::run_review(command, api, state).await,
        Commands::Checkout {
            address,
            delivery,
            payment,
        } => checkout::run_checkout(api, state, address, delivery, payment).await,
        Commands::Orders { command } => orders::run(command, api, state).await,
        Commands::Admin { command } => admin::run(command, config, api).await,
        Commands::Health => health::run_health(config, api).await,
    }
}
