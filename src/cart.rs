//! Shopping cart and checkout
//!
//! The cart is a plain value. [`CartStore`] loads and saves it explicitly.

use crate::core::data::BeautyProduct;
use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const CART_FILE: &str = "cart.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub standard_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStatus {
    /// Order summarised but no payment provider is wired up
    PaymentUnavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSummary {
    pub lines: usize,
    pub item_count: u32,
    pub total: f64,
    pub status: CheckoutStatus,
}

impl CartItem {
    fn from_product(product: &BeautyProduct) -> Self {
        Self {
            id: product.id.clone(),
            standard_id: product.standard_id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit, merging with an existing line for the same product
    pub fn add_item(&mut self, product: &BeautyProduct) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem::from_product(product));
        }
    }

    /// Remove a line; returns it if it was present
    pub fn remove_item(&mut self, id: &str) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Set a line's quantity; zero removes the line
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> AppResult<()> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Cart item '{}'", id)))?;

        if quantity == 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = quantity;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Summarise the order. Payment is not processed and the cart is left intact.
pub fn checkout(cart: &Cart) -> AppResult<CheckoutSummary> {
    if cart.is_empty() {
        return Err(AppError::Validation("Your cart is empty".to_string()));
    }

    Ok(CheckoutSummary {
        lines: cart.items.len(),
        item_count: cart.item_count(),
        total: cart.total(),
        status: CheckoutStatus::PaymentUnavailable,
    })
}

pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CART_FILE),
        }
    }

    pub fn load(&self) -> AppResult<Cart> {
        if !self.path.exists() {
            return Ok(Cart::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Cart::new());
        }

        toml::from_str(&content)
            .map_err(|e| AppError::Store(format!("Failed to parse cart file: {}", e)))
    }

    pub fn save(&self, cart: &Cart) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(cart)
            .map_err(|e| AppError::Store(format!("Failed to serialize cart: {}", e)))?;
        std::fs::write(&self.path, content)?;
        debug!(lines = cart.items.len(), "saved cart");
        Ok(())
    }
}
