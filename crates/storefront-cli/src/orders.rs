//! Order command handlers.

use clap::Subcommand;
use storefront_client::StorefrontClient;
use storefront_core::OrderStatus;

use serde_json::Value;

use crate::{parse_payload, print_json};

/// Sub-commands available under `orders`.
#[derive(Debug, Subcommand)]
pub enum OrderCommands {
    /// List orders
    List,
    /// Show one order by ID
    Get { id: String },
    /// Move an order to a new status (name or numeric code)
    Status { id: String, status: String },
    /// Place an order from a JSON payload
    Create {
        #[arg(value_parser = parse_payload)]
        payload: Value,
    },
    /// Delete an order
    Delete { id: String },
}

pub(crate) async fn run_orders(
    client: &StorefrontClient,
    command: OrderCommands,
) -> anyhow::Result<()> {
    match command {
        OrderCommands::List => print_json(&client.list_orders().await?),
        OrderCommands::Get { id } => print_json(&client.get_order(&id).await?),
        OrderCommands::Status { id, status } => {
            let status = OrderStatus::parse(&status);
            if let OrderStatus::Other(raw) = &status {
                anyhow::bail!(
                    "unknown order status '{raw}'; expected one of: {}",
                    OrderStatus::KNOWN
                        .iter()
                        .map(OrderStatus::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            print_json(&client.update_order_status(&id, &status).await?)
        }
        OrderCommands::Create { payload } => print_json(&client.create_order(&payload).await?),
        OrderCommands::Delete { id } => {
            client.delete_order(&id).await?;
            tracing::info!(%id, "order deleted");
            Ok(())
        }
    }
}
