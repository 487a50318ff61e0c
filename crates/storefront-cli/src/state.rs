//! Local cart and wishlist command handlers.
//!
//! State lives in JSON files at the configured paths and is saved after
//! every change.

use clap::Subcommand;
use serde::Serialize;
use storefront_client::StorefrontClient;
use storefront_core::{AppConfig, Cart, CartLine, JsonFilePersistence, StateStore, Wishlist};

use crate::print_json;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Print the cart with its totals
    Show,
    /// Add a product; name, price, and image are looked up from the catalog
    Add {
        product_id: String,
        /// Variant size, e.g. 50ml. Defaults to the product's first variant
        #[arg(long)]
        volume: Option<String>,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        product_id: String,
        #[arg(long)]
        volume: Option<String>,
    },
    /// Set a line's quantity; 0 removes it
    Set {
        product_id: String,
        quantity: u32,
        #[arg(long)]
        volume: Option<String>,
    },
}

/// Sub-commands available under `wishlist`.
#[derive(Debug, Subcommand)]
pub enum WishlistCommands {
    /// Print the wishlist
    Show,
    /// Add the product if absent, remove it if present
    Toggle { product_id: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartSummary<'a> {
    lines: &'a [CartLine],
    item_count: u32,
    total: f64,
}

fn print_cart(cart: &Cart) -> anyhow::Result<()> {
    print_json(&CartSummary {
        lines: &cart.lines,
        item_count: cart.item_count(),
        total: cart.total(),
    })
}

pub(crate) async fn run_cart(
    client: &StorefrontClient,
    config: &AppConfig,
    command: CartCommands,
) -> anyhow::Result<()> {
    let mut store: StateStore<Cart, _> =
        StateStore::open(JsonFilePersistence::new(&config.cart_path))?;

    match command {
        CartCommands::Show => {}
        CartCommands::Add {
            product_id,
            volume,
            quantity,
        } => {
            let product = client.get_product(&product_id).await?;
            let variant = match volume.as_deref() {
                Some(wanted) => Some(
                    product
                        .variants
                        .iter()
                        .find(|v| v.volume.eq_ignore_ascii_case(wanted))
                        .ok_or_else(|| {
                            anyhow::anyhow!("product '{product_id}' has no '{wanted}' variant")
                        })?,
                ),
                None => product.default_variant(),
            };
            let line = CartLine {
                product_id: product.id.clone(),
                volume: variant.map(|v| v.volume.clone()),
                name: product.name.clone(),
                price: variant.map_or(product.price, |v| v.price),
                quantity,
                image_url: product.images.first().cloned(),
            };
            store.apply(|cart| cart.add_item(line))?;
        }
        CartCommands::Remove { product_id, volume } => {
            store.apply(|cart| cart.remove_item(&product_id, volume.as_deref()))?;
        }
        CartCommands::Set {
            product_id,
            quantity,
            volume,
        } => {
            store.apply(|cart| cart.set_quantity(&product_id, volume.as_deref(), quantity))?;
        }
    }

    print_cart(store.state())
}

pub(crate) fn run_wishlist(config: &AppConfig, command: WishlistCommands) -> anyhow::Result<()> {
    let mut store: StateStore<Wishlist, _> =
        StateStore::open(JsonFilePersistence::new(&config.wishlist_path))?;

    if let WishlistCommands::Toggle { product_id } = command {
        let now_listed = store.apply(|list| list.toggle(&product_id))?.contains(&product_id);
        tracing::info!(%product_id, now_listed, "wishlist updated");
    }

    print_json(store.state())
}
