mod catalog;
mod orders;
mod state;

use clap::{Parser, Subcommand};
use serde::Serialize;
use storefront_client::StorefrontClient;
use tracing_subscriber::EnvFilter;

use crate::catalog::ProductCommands;
use crate::orders::OrderCommands;
use crate::state::{CartCommands, WishlistCommands};

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Storefront and admin API client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// List catalog categories
    Categories,
    /// Inspect and manage orders
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// Show admin dashboard analytics
    Dashboard,
    /// Manage the local shopping cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Manage the local wishlist
    Wishlist {
        #[command(subcommand)]
        command: WishlistCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = StorefrontClient::from_config(&config)?;
    tracing::debug!(env = %config.env, base_url = client.base_url(), "client ready");

    match cli.command {
        Commands::Products { command } => catalog::run_products(&client, command).await,
        Commands::Categories => print_json(&client.list_categories().await?),
        Commands::Orders { command } => orders::run_orders(&client, command).await,
        Commands::Dashboard => print_json(&client.dashboard_analytics().await?),
        Commands::Cart { command } => state::run_cart(&client, &config, command).await,
        Commands::Wishlist { command } => state::run_wishlist(&config, command),
    }
}

/// Parses a raw JSON object given on the command line as a write payload.
pub(crate) fn parse_payload(raw: &str) -> Result<serde_json::Value, String> {
    match serde_json::from_str(raw) {
        Ok(value @ serde_json::Value::Object(_)) => Ok(value),
        Ok(_) => Err("payload must be a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON payload: {e}")),
    }
}

/// Writes `value` to stdout as pretty-printed JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
