//! Cart and cart line types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product-and-quantity pairing in a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// The product, as supplied by the catalog.
    pub product: Product,
    /// Quantity, always positive once stored in a cart.
    pub quantity: i64,
}

impl CartLine {
    /// Create a new line.
    pub fn new(product: Product, quantity: i64) -> Self {
        Self { product, quantity }
    }

    /// Product ID of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.saturating_multiply(self.quantity)
    }
}

/// An ordered collection of cart lines.
///
/// Lines keep the order in which their product was first added. Only the
/// crate can mutate a cart; everything else reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines, restoring the cart invariants.
    ///
    /// Lines with a non-positive quantity are dropped and repeated product
    /// ids are merged into their first occurrence.
    pub(crate) fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity <= 0 {
                continue;
            }
            match cart.position(&line.product.id) {
                Some(idx) => {
                    if let Some(existing) = cart.lines.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add `quantity` of a product.
    ///
    /// Increments an existing line for the same product id, otherwise
    /// appends a new line.
    pub(crate) fn add(&mut self, product: Product, quantity: i64) -> Result<(), CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }

        self.lines.push(CartLine::new(product, quantity));
        Ok(())
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub(crate) fn remove(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.product.id != product_id);
        self.lines.len() < len_before
    }

    /// Set the absolute quantity of an existing line.
    ///
    /// A quantity <= 0 removes the line. Returns whether the cart changed.
    pub(crate) fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        match self.lines.iter_mut().find(|l| &l.product.id == product_id) {
            Some(line) => {
                let changed = line.quantity != quantity;
                line.quantity = quantity;
                changed
            }
            None => false,
        }
    }

    /// Remove every line.
    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in stored order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product.id == product_id)
    }
}
