//! Product catalog command handlers.

use clap::Subcommand;
use storefront_client::{ProductQuery, StorefrontClient};
use storefront_core::{available_sort_options, SortOption};

use serde_json::Value;

use crate::{parse_payload, print_json};

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductCommands {
    /// List products, optionally filtered
    List {
        /// Category name, slug, or ID
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        /// One of: newest, price-asc, price-desc, name-asc, rating
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortOption>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        /// Print the sort options that apply to the result instead of the products
        #[arg(long)]
        sort_options: bool,
    },
    /// Show one product by ID
    Get { id: String },
    /// Show one product by URL slug
    Slug { slug: String },
    /// Full-text product search
    Search { term: String },
    /// List featured products
    Featured,
    /// Create a product from a JSON payload
    Create {
        #[arg(value_parser = parse_payload)]
        payload: Value,
    },
    /// Replace a product with a JSON payload
    Update {
        id: String,
        #[arg(value_parser = parse_payload)]
        payload: Value,
    },
    /// Delete a product
    Delete { id: String },
}

fn parse_sort(raw: &str) -> Result<SortOption, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unknown sort option '{raw}'"))
}

/// Runs a `products` sub-command and prints the result.
///
/// # Errors
///
/// Returns the classified failure of the underlying operation.
pub(crate) async fn run_products(
    client: &StorefrontClient,
    command: ProductCommands,
) -> anyhow::Result<()> {
    match command {
        ProductCommands::List {
            category,
            brand,
            min_price,
            max_price,
            sort,
            page,
            page_size,
            sort_options,
        } => {
            let query = ProductQuery {
                category,
                brand,
                min_price,
                max_price,
                sort,
                page,
                page_size,
                ..ProductQuery::default()
            };
            let products = client.list_products(&query).await?;
            if sort_options {
                let names: Vec<&str> = available_sort_options(&products)
                    .into_iter()
                    .map(SortOption::as_str)
                    .collect();
                print_json(&names)
            } else {
                print_json(&products)
            }
        }
        ProductCommands::Get { id } => print_json(&client.get_product(&id).await?),
        ProductCommands::Slug { slug } => print_json(&client.get_product_by_slug(&slug).await?),
        ProductCommands::Search { term } => print_json(&client.search_products(&term).await?),
        ProductCommands::Featured => print_json(&client.featured_products().await?),
        ProductCommands::Create { payload } => print_json(&client.create_product(&payload).await?),
        ProductCommands::Update { id, payload } => {
            print_json(&client.update_product(&id, &payload).await?)
        }
        ProductCommands::Delete { id } => {
            client.delete_product(&id).await?;
            tracing::info!(%id, "product deleted");
            Ok(())
        }
    }
}
