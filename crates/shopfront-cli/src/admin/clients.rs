use clap::Subcommand;
use shopfront_api::ApiClient;
use shopfront_core::{AppConfig, Client, ClientDraft};

use super::{delete_record, list_page, print_page_footer};
use crate::display::{explain_api, fmt_opt, truncate};

#[derive(Debug, Subcommand)]
pub enum ClientCommands {
    /// List clients one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one client
    Show { id: i64 },
    /// Register a client
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        lastname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        telephone: Option<String>,
    },
    /// Change a client; omitted fields keep their value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        lastname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        telephone: Option<String>,
    },
    /// Delete a client that no other record references
    Delete { id: i64 },
}

pub(super) async fn run(
    command: ClientCommands,
    config: &AppConfig,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        ClientCommands::List { page } => {
            let (clients, window) = list_page::<Client>(api, config, page).await?;
            if clients.is_empty() {
                println!("no clients on page {}", window.page);
                return Ok(());
            }
            println!("{:<6}{:<30}{:<32}TELEPHONE", "ID", "NAME", "EMAIL");
            for client in &clients {
                println!(
                    "{:<6}{:<30}{:<32}{}",
                    client.id,
                    truncate(&client.full_name(), 27),
                    truncate(&client.email, 29),
                    fmt_opt(client.telephone.as_deref())
                );
            }
            print_page_footer(window);
        }
        ClientCommands::Show { id } => {
            let client = api.get::<Client>(id).await.map_err(explain_api)?;
            print_client(&client);
        }
        ClientCommands::Create {
            name,
            lastname,
            email,
            telephone,
        } => {
            let draft = ClientDraft {
                name,
                lastname,
                email,
                telephone,
            };
            draft.validate()?;
            let client = api.create::<Client>(&draft).await.map_err(explain_api)?;
            println!("created client {}", client.id);
            print_client(&client);
        }
        ClientCommands::Update {
            id,
            name,
            lastname,
            email,
            telephone,
        } => {
            let current = api.get::<Client>(id).await.map_err(explain_api)?;
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
            draft.validate()?;
            let client = api.update::<Client>(id, &draft).await.map_err(explain_api)?;
            println!("updated client {}", client.id);
            print_client(&client);
        }
        ClientCommands::Delete { id } => delete_record::<Client>(api, id).await?,
    }
    Ok(())
}

fn print_client(client: &Client) {
    println!("Name:      {}", client.full_name());
    println!("Email:     {}", client.email);
    println!("Telephone: {}", fmt_opt(client.telephone.as_deref()));
}
