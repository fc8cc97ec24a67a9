// Shop operations - Shop, Cart, Checkout

use anyhow::{Context, Result};

use super::open_storefront;
use crate::cart::{CartStore, checkout};
use crate::cli::{CartArgs, CartCommands, ShopArgs};
use crate::config::Config;
use crate::core::traits::ProductCatalog;
use crate::utils::error::{FlowResult, handle_flow};
use crate::utils::{OutputStyle, print_success};

pub async fn handle_shop_command(config: Config, args: &ShopArgs) -> Result<()> {
    let storefront = open_storefront(&config)?;
    let sections = storefront
        .shop(args.standard.as_deref())
        .await
        .context("Failed to load products")?;

    if sections.is_empty() {
        match &args.standard {
            Some(query) => handle_flow(FlowResult::NotFound {
                item_type: "Beauty standard".to_string(),
                search_term: query.clone(),
            }),
            None => handle_flow(FlowResult::EmptyList {
                item_type: "products".to_string(),
            }),
        }
        return Ok(());
    }

    OutputStyle::print_shop(&sections);
    Ok(())
}

pub async fn handle_cart_command(config: Config, args: &CartArgs) -> Result<()> {
    let cart_store = CartStore::new(&config.general.data_dir);
    let mut cart = cart_store.load().context("Failed to load cart")?;

    match args.command.clone().unwrap_or(CartCommands::Show) {
        CartCommands::Show => {
            OutputStyle::print_cart(&cart);
            return Ok(());
        }
        CartCommands::Add { product_id } => {
            let storefront = open_storefront(&config)?;
            let Some(product) = storefront.store().find_product(&product_id).await? else {
                handle_flow(FlowResult::NotFound {
                    item_type: "Product".to_string(),
                    search_term: product_id,
                });
                return Ok(());
            };
            cart.add_item(&product);
            print_success(&format!("Added {} to your cart", product.name));
        }
        CartCommands::Remove { product_id } => match cart.remove_item(&product_id) {
            Some(item) => print_success(&format!("Removed {} from your cart", item.name)),
            None => {
                handle_flow(FlowResult::NotFound {
                    item_type: "Cart item".to_string(),
                    search_term: product_id,
                });
                return Ok(());
            }
        },
        CartCommands::Set {
            product_id,
            quantity,
        } => {
            cart.update_quantity(&product_id, quantity)?;
            print_success(&format!("Updated {}", product_id));
        }
        CartCommands::Clear => {
            cart.clear();
            print_success("Cart cleared");
        }
    }

    cart_store.save(&cart).context("Failed to save cart")?;
    Ok(())
}

pub async fn handle_checkout_command(config: Config) -> Result<()> {
    let cart = CartStore::new(&config.general.data_dir)
        .load()
        .context("Failed to load cart")?;

    let summary = checkout(&cart)?;
    OutputStyle::print_checkout(&summary);
    Ok(())
}
