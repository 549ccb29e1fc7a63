//! Session-local shopping cart.
//!
//! The cart keeps one line per product with a snapshot of the unit price at
//! the moment the product was first added. The total is recomputed by a full
//! reduction over all lines after every mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} is not in the cart")]
    ItemNotFound(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    /// Price captured when the product entered the cart.
    #[serde(with = "rust_decimal::serde::str")]
    pub unit_price: Decimal,
}

impl CartLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Only the lines are serialized; the total is rebuilt on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Decimal,
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Self {
            lines: lines.into_iter().filter(|l| l.quantity > 0).collect(),
            total: Decimal::ZERO,
        };
        cart.recalculate();
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Add one unit of a product.
    ///
    /// An existing line is incremented and keeps its original price snapshot;
    /// otherwise a new line is inserted at quantity 1.
    pub fn add_item(&mut self, product_id: i64, name: &str, unit_price: Decimal) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product_id,
                name: name.to_string(),
                quantity: 1,
                unit_price,
            });
        }
        self.recalculate();
    }

    /// Remove one unit of a product, dropping the line when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the product has no line.
    pub fn remove_item(&mut self, product_id: i64) -> Result<(), CartError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or(CartError::ItemNotFound(product_id))?;

        let remaining = self.lines[idx].quantity.saturating_sub(1);
        if remaining == 0 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity = remaining;
        }
        self.recalculate();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.total = self.lines.iter().map(CartLine::line_total).sum();
    }
}
