//! `catalog` commands: product pages, product detail, categories.

use std::time::Duration;

use clap::Subcommand;
use shopfront_api::ApiClient;
use shopfront_core::AppConfig;
use shopfront_storefront::{product_detail, CatalogBrowser};

use crate::display::{explain_api, fmt_money, fmt_opt, truncate};

#[derive(Debug, Subcommand)]
pub enum CatalogCommands {
    /// List one page of products
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only show products in this category
        #[arg(long)]
        category: Option<i64>,
        /// Filter the page by product name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product with its reviews
    Show {
        /// Product id
        id: i64,
    },
    /// List product categories
    Categories,
}

pub(crate) async fn run(
    command: CatalogCommands,
    config: &AppConfig,
    api: &ApiClient,
) -> anyhow::Result<()> {
    match command {
        CatalogCommands::List {
            page,
            category,
            search,
        } => run_list(config, api, page, category, search.as_deref()).await,
        CatalogCommands::Show { id } => run_show(api, id).await,
        CatalogCommands::Categories => run_categories(config, api).await,
    }
}

async fn run_list(
    config: &AppConfig,
    api: &ApiClient,
    page: u32,
    category: Option<i64>,
    search: Option<&str>,
) -> anyhow::Result<()> {
    let mut browser = CatalogBrowser::new(config.page_size).with_category(category);
    browser.go_to_page(api, page).await.map_err(explain_api)?;
    if let Some(term) = search {
        browser.set_search(term);
    }

    let products = browser.visible_products();
    if products.is_empty() {
        println!("no products on page {}", browser.window().page);
    } else {
        println!("{:<6}{:<40}{:>10}{:>7}", "ID", "NAME", "PRICE", "STOCK");
        for product in &products {
            println!(
                "{:<6}{:<40}{:>10}{:>7}",
                product.id,
                truncate(&product.name, 37),
                fmt_money(product.price),
                product.stock
            );
        }
    }

    let window = browser.window();
    let more = if window.has_next() { "" } else { " (last page)" };
    println!();
    println!(
        "Page {} of ~{}{more}, about {} products",
        window.page,
        window.estimated_pages(),
        window.estimated_total()
    );
    let threshold = Duration::from_millis(config.cache_hit_threshold_ms);
    if let Some(guess) = browser.last_cache_guess(threshold) {
        println!("Response: {}", guess.label());
    }
    Ok(())
}

async fn run_show(api: &ApiClient, id: i64) -> anyhow::Result<()> {
    let detail = product_detail(api, id).await.map_err(explain_api)?;
    let product = &detail.product;

    println!("{} (#{})", product.name, product.id);
    println!("Price: {}", fmt_money(product.price));
    if product.in_stock() {
        println!("Stock: {}", product.stock);
    } else {
        println!("Stock: out of stock");
    }
    println!(
        "Category: {}",
        fmt_opt(detail.category.as_ref().map(|c| c.name.as_str()))
    );
    match detail.average_rating {
        Some(avg) => println!("Rating: {avg:.1} / 5 ({} reviews)", detail.reviews.len()),
        None => println!("Rating: no reviews yet"),
    }

    for review in &detail.reviews {
        println!(
            "  {:.0}/5  {}",
            review.rating,
            fmt_opt(review.comment.as_deref())
        );
    }
    Ok(())
}

async fn run_categories(config: &AppConfig, api: &ApiClient) -> anyhow::Result<()> {
    let mut browser = CatalogBrowser::new(config.page_size);
    let categories = browser.categories(api).await.map_err(explain_api)?;
    if categories.is_empty() {
        println!("no categories");
        return Ok(());
    }
    println!("{:<6}NAME", "ID");
    for category in categories {
        println!("{:<6}{}", category.id, category.name);
    }
    Ok(())
}
