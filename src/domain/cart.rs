use serde::{Deserialize, Serialize};

use crate::domain::pricing::PriceTier;

/// One row of the cart, keyed by product and resolved tier price.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CartLine {
    /// Product the line refers to.
    pub product_id: i32,
    /// Product name captured when the line was added.
    pub product_name: String,
    /// Article code captured when the line was added.
    pub item_number: Option<String>,
    /// Tier the price was resolved from.
    pub tier: PriceTier,
    /// Resolved price in cents for one unit, immutable once set.
    pub unit_price_cents: i64,
    /// Number of units, at least 1.
    pub quantity: i64,
}

impl CartLine {
    /// Line subtotal in cents, saturating at `i64::MAX`.
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents.saturating_mul(self.quantity)
    }
}

/// In-memory cart holding the current sale's lines.
///
/// Holds at most one line per `(product_id, unit_price_cents)` pair;
/// adding the same product at the same resolved price merges
/// quantities, a different resolved price appends a distinct line.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines (not units) in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Look up the line addressed by product and resolved unit price.
    pub fn find_line(&self, product_id: i32, unit_price_cents: i64) -> Option<&CartLine> {
        self.position(product_id, unit_price_cents)
            .map(|index| &self.lines[index])
    }

    /// Merge a resolved line into the cart, returning the affected line.
    ///
    /// Merged quantities saturate at `i64::MAX`.
    pub fn merge_line(&mut self, line: CartLine) -> &CartLine {
        let index = match self.position(line.product_id, line.unit_price_cents) {
            Some(index) => {
                let merged = self.lines[index].quantity.saturating_add(line.quantity);
                self.lines[index].quantity = merged;
                index
            }
            None => {
                self.lines.push(line);
                self.lines.len() - 1
            }
        };

        &self.lines[index]
    }

    /// Applies `delta` to the quantity of the line addressed by product
    /// and unit price.
    ///
    /// The quantity never drops below 1: a delta that would reach zero
    /// or less leaves the line unchanged. Removal is a distinct
    /// operation. Returns the resulting quantity, or `None` when no
    /// such line exists.
    pub fn adjust_quantity(
        &mut self,
        product_id: i32,
        unit_price_cents: i64,
        delta: i64,
    ) -> Option<i64> {
        let index = self.position(product_id, unit_price_cents)?;
        let line = &mut self.lines[index];

        let updated = line.quantity.saturating_add(delta);
        if updated >= 1 {
            line.quantity = updated;
        }

        Some(line.quantity)
    }

    /// Removes every line for the product, across all tiers.
    ///
    /// Removing a product that is not in the cart is a no-op. Returns
    /// the number of lines removed.
    pub fn remove_product(&mut self, product_id: i32) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        before - self.lines.len()
    }

    /// Cart total in cents, saturating at `i64::MAX`.
    pub fn total_cents(&self) -> i64 {
        self.lines
            .iter()
            .map(CartLine::line_total_cents)
            .fold(0, i64::saturating_add)
    }

    /// Drops all lines. Used after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, product_id: i32, unit_price_cents: i64) -> Option<usize> {
        self.lines.iter().position(|line| {
            line.product_id == product_id && line.unit_price_cents == unit_price_cents
        })
    }
}
