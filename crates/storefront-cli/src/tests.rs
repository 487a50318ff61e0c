use super::*;

#[test]
fn parses_products_list_with_filters() {
    let cli = Cli::try_parse_from([
        "storefront-cli",
        "products",
        "list",
        "--category",
        "floral",
        "--sort",
        "price-desc",
        "--page-size",
        "12",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Products {
            command:
                ProductCommands::List {
                    category,
                    sort,
                    page_size,
                    ..
                },
        } => {
            assert_eq!(category.as_deref(), Some("floral"));
            assert_eq!(sort, Some(storefront_core::SortOption::PriceDesc));
            assert_eq!(page_size, Some(12));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_unknown_sort_option() {
    let result = Cli::try_parse_from(["storefront-cli", "products", "list", "--sort", "cheapest"]);
    assert!(result.is_err());
}

#[test]
fn parses_product_slug_command() {
    let cli = Cli::try_parse_from(["storefront-cli", "products", "slug", "rose-absolue"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Products {
            command: ProductCommands::Slug { ref slug }
        } if slug == "rose-absolue"
    ));
}

#[test]
fn parses_order_status_command() {
    let cli = Cli::try_parse_from(["storefront-cli", "orders", "status", "o-1", "shipped"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Orders {
            command: OrderCommands::Status { ref id, ref status }
        } if id == "o-1" && status == "shipped"
    ));
}

#[test]
fn cart_add_defaults_to_one_unit() {
    let cli = Cli::try_parse_from(["storefront-cli", "cart", "add", "p-1", "--volume", "50ml"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Add { quantity: 1, ref volume, .. }
        } if volume.as_deref() == Some("50ml")
    ));
}

#[test]
fn parses_wishlist_toggle_and_dashboard() {
    let cli = Cli::try_parse_from(["storefront-cli", "wishlist", "toggle", "p-2"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Wishlist {
            command: WishlistCommands::Toggle { .. }
        }
    ));

    let cli = Cli::try_parse_from(["storefront-cli", "dashboard"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Dashboard));
}

#[test]
fn parses_product_update_payload() {
    let cli = Cli::try_parse_from([
        "storefront-cli",
        "products",
        "update",
        "p-5",
        r#"{"name":"Oud Noir","price":120}"#,
    ])
    .expect("expected valid cli args");

    match cli.command {
        Commands::Products {
            command: ProductCommands::Update { id, payload },
        } => {
            assert_eq!(id, "p-5");
            assert_eq!(payload["name"], "Oud Noir");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_non_object_payload() {
    let result = Cli::try_parse_from(["storefront-cli", "orders", "create", "[1,2]"]);
    assert!(result.is_err());
    let result = Cli::try_parse_from(["storefront-cli", "products", "create", "{not json"]);
    assert!(result.is_err());
}

#[test]
fn parses_delete_commands() {
    let cli = Cli::try_parse_from(["storefront-cli", "orders", "delete", "o-3"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Orders {
            command: OrderCommands::Delete { ref id }
        } if id == "o-3"
    ));

    let cli = Cli::try_parse_from(["storefront-cli", "products", "delete", "p-9"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Products {
            command: ProductCommands::Delete { ref id }
        } if id == "p-9"
    ));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["storefront-cli"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
