use clap::Subcommand;
use shopfront_api::ApiClient;
use shopfront_core::validate::parse_money;
use shopfront_core::{AppConfig, Category, CategoryDraft, Product, ProductDraft};

use super::{delete_record, list_page, print_page_footer};
use crate::display::{explain_api, fmt_money, truncate};

#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List products one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one product
    Show { id: i64 },
    /// Add a product
    Create {
        #[arg(long)]
        name: String,
        /// Unit price, e.g. 12.50
        #[arg(long)]
        price: String,
        #[arg(long, default_value_t = 0)]
        stock: i32,
        #[arg(long)]
        category: i64,
    },
    /// Change a product; omitted fields keep their value
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        stock: Option<i32>,
        #[arg(long)]
        category: Option<i64>,
    },
    /// Delete a product that no order references
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// List categories one page at a time
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Show { id: i64 },
    Create {
        #[arg(long)]
        name: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a category with no products
    Delete { id: i64 },
}

pub(super) async fn run_products(
    command: ProductCommands,
    config: &AppConfig,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        ProductCommands::List { page } => {
            let (products, window) = list_page::<Product>(api, config, page).await?;
            if products.is_empty() {
                println!("no products on page {}", window.page);
                return Ok(());
            }
            println!(
                "{:<6}{:<36}{:>10}{:>7}{:>10}",
                "ID", "NAME", "PRICE", "STOCK", "CATEGORY"
            );
            for product in &products {
                println!(
                    "{:<6}{:<36}{:>10}{:>7}{:>10}",
                    product.id,
                    truncate(&product.name, 33),
                    fmt_money(product.price),
                    product.stock,
                    product.category_id
                );
            }
            print_page_footer(window);
        }
        ProductCommands::Show { id } => {
            let product = api.get::<Product>(id).await.map_err(explain_api)?;
            print_product(&product);
        }
        ProductCommands::Create {
            name,
            price,
            stock,
            category,
        } => {
            let draft = ProductDraft {
                name,
                price: parse_money("price", &price)?,
                stock,
                category_id: category,
            };
            draft.validate()?;
            let product = api.create::<Product>(&draft).await.map_err(explain_api)?;
            println!("created product {}", product.id);
            print_product(&product);
        }
        ProductCommands::Update {
            id,
            name,
            price,
            stock,
            category,
        } => {
            let current = api.get::<Product>(id).await.map_err(explain_api)?;
            let mut draft = ProductDraft::from(&current);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(price) = price {
                draft.price = parse_money("price", &price)?;
            }
            if let Some(stock) = stock {
                draft.stock = stock;
            }
            if let Some(category) = category {
                draft.category_id = category;
            }
            draft.validate()?;
            let product = api.update::<Product>(id, &draft).await.map_err(explain_api)?;
            println!("updated product {}", product.id);
            print_product(&product);
        }
        ProductCommands::Delete { id } => delete_record::<Product>(api, id).await?,
    }
    Ok(())
}

pub(super) async fn run_categories(
    command: CategoryCommands,
    config: &AppConfig,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        CategoryCommands::List { page } => {
            let (categories, window) = list_page::<Category>(api, config, page).await?;
            if categories.is_empty() {
                println!("no categories on page {}", window.page);
                return Ok(());
            }
            println!("{:<6}NAME", "ID");
            for category in &categories {
                println!("{:<6}{}", category.id, category.name);
            }
            print_page_footer(window);
        }
        CategoryCommands::Show { id } => {
            let category = api.get::<Category>(id).await.map_err(explain_api)?;
            println!("Category #{}: {}", category.id, category.name);
        }
        CategoryCommands::Create { name } => {
            let draft = CategoryDraft { name };
            draft.validate()?;
            let category = api.create::<Category>(&draft).await.map_err(explain_api)?;
            println!("created category {}: {}", category.id, category.name);
        }
        CategoryCommands::Update { id, name } => {
            let draft = CategoryDraft { name };
            draft.validate()?;
            let category = api
                .update::<Category>(id, &draft)
                .await
                .map_err(explain_api)?;
            println!("updated category {}: {}", category.id, category.name);
        }
        CategoryCommands::Delete { id } => delete_record::<Category>(api, id).await?,
    }
    Ok(())
}

fn print_product(product: &Product) {
    println!("Name:     {}", product.name);
    println!("Price:    {}", fmt_money(product.price));
    println!("Stock:    {}", product.stock);
    println!("Category: {}", product.category_id);
}
