//! Sign-in, profile, address and review commands.

use clap::Subcommand;
use shopfront_api::ApiClient;
use shopfront_core::{AddressDraft, AppState, ClientDraft};
use shopfront_storefront::{account, login, logout};

use crate::display::{explain, fmt_opt};

#[derive(Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the signed-in client's profile
    Show,
    /// Change profile fields; omitted fields keep their value
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        telephone: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AddressCommands {
    /// List saved addresses
    List,
    /// Save a new delivery address
    Add {
        #[arg(long)]
        street: String,
        /// Street number
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        city: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommands {
    /// Review a product
    Add {
        /// Product id
        product_id: i64,
        /// Rating from 1 to 5
        #[arg(long)]
        rating: f32,
        #[arg(long)]
        comment: Option<String>,
    },
}

pub(crate) async fn run_login(
    api: &ApiClient,
    state: &mut AppState,
    client_id: i64,
    email: &str,
) -> anyhow::Result<()> {
    let session = login(api, state, client_id, email).await.map_err(explain)?;
    println!("signed in as client {} ({})", session.client_id, session.email);
    Ok(())
}

pub(crate) fn run_logout(state: &mut AppState) {
    let was_signed_in = state.is_logged_in();
    logout(state);
    if was_signed_in {
        println!("signed out; cart emptied");
    } else {
        println!("not signed in");
    }
}

pub(crate) async fn run_profile(
    command: ProfileCommands,
    api: &ApiClient,
    state: &mut AppState,
) -> anyhow::Result<()> {
    match command {
        ProfileCommands::Show => {
            let client = account::profile(api, state).await.map_err(explain)?;
            println!("Client #{}", client.id);
            println!("Name:      {}", client.full_name());
            println!("Email:     {}", client.email);
            println!("Telephone: {}", fmt_opt(client.telephone.as_deref()));
        }
        ProfileCommands::Update {
            name,
            lastname,
            email,
            telephone,
        } => {
            let current = account::profile(api, state).await.map_err(explain)?;
            let mut draft = ClientDraft::from(&current);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(lastname) = lastname {
                draft.lastname = lastname;
            }
            if let Some(email) = email {
                draft.email = email;
            }
            if let Some(telephone) = telephone {
                draft.telephone = Some(telephone).filter(|t| !t.trim().is_empty());
            }
            let updated = account::update_profile(api, state, &draft)
                .await
                .map_err(explain)?;
            println!("profile updated for {}", updated.full_name());
        }
    }
    Ok(())
}

pub(crate) async fn run_address(
    command: AddressCommands,
    api: &ApiClient,
    state: &AppState,
) -> anyhow::Result<()> {
    match command {
        AddressCommands::List => {
            let addresses = account::addresses(api, state).await.map_err(explain)?;
            if addresses.is_empty() {
                println!("no addresses saved; add one with `address add`");
                return Ok(());
            }
            println!("{:<6}ADDRESS", "ID");
            for address in &addresses {
                println!("{:<6}{}", address.id, address.one_line());
            }
        }
        AddressCommands::Add {
            street,
            number,
            city,
        } => {
            let draft = AddressDraft {
                street,
                number,
                city,
                client_id: 0,
            };
            let address = account::add_address(api, state, draft)
                .await
                .map_err(explain)?;
            println!("saved address {}: {}", address.id, address.one_line());
        }
    }
    Ok(())
}

pub(crate) async fn run_review(
    command: ReviewCommands,
    api: &ApiClient,
    state: &AppState,
) -> anyhow::Result<()> {
    match command {
        ReviewCommands::Add {
            product_id,
            rating,
            comment,
        } => {
            let review = account::post_review(api, state, product_id, rating, comment)
                .await
                .map_err(explain)?;
            println!("review {} posted for product {product_id}", review.id);
        }
    }
    Ok(())
}
