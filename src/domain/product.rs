use serde::{Deserialize, Serialize};

/// Catalog entry as served by the products endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown on the product card.
    pub description: Option<String>,
    /// Optional scanned barcode, globally unique when present.
    pub barcode: Option<String>,
    /// Optional short article code, matched ignoring case.
    pub item_number: Option<String>,
    /// Single-unit price in cents.
    pub price_cents: i64,
    /// Optional retail price in cents; absent or non-positive means the
    /// tier is not offered.
    pub retail_price_cents: Option<i64>,
    /// Optional bundle price in cents; absent or non-positive means the
    /// tier is not offered.
    pub bulk_price_cents: Option<i64>,
    /// Units currently on hand, informational only.
    pub stock_quantity: i64,
    /// Threshold at which the product is flagged as low stock.
    pub min_stock_level: i64,
    /// Optional category name.
    pub category: Option<String>,
    /// Optional size span covered by one bundle, e.g. `35 al 40`.
    pub size_range: Option<String>,
    /// Optional number of units in one bundle, backing the bulk tier.
    pub units_per_bundle: Option<i64>,
}

impl Product {
    /// Whether the on-hand quantity has reached the configured alert
    /// threshold.
    pub fn is_low_stock(&self) -> bool {
        self.min_stock_level > 0 && self.stock_quantity <= self.min_stock_level
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional description update, `None` clearing the existing value.
    pub description: Option<Option<String>>,
    /// Optional unit price update in cents.
    pub price_cents: Option<i64>,
    /// Optional retail price update, `None` withdrawing the tier.
    pub retail_price_cents: Option<Option<i64>>,
    /// Optional bulk price update, `None` withdrawing the tier.
    pub bulk_price_cents: Option<Option<i64>>,
    /// Optional stock quantity update.
    pub stock_quantity: Option<i64>,
}

impl ProductPatch {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    /// Update the unit price.
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Update the retail price, using `None` to stop offering the tier.
    pub fn retail_price_cents(mut self, amount_cents: Option<i64>) -> Self {
        self.retail_price_cents = Some(amount_cents);
        self
    }

    /// Update the bulk price, using `None` to stop offering the tier.
    pub fn bulk_price_cents(mut self, amount_cents: Option<i64>) -> Self {
        self.bulk_price_cents = Some(amount_cents);
        self
    }

    /// Update the on-hand stock quantity.
    pub fn stock_quantity(mut self, quantity: i64) -> Self {
        self.stock_quantity = Some(quantity);
        self
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.retail_price_cents.is_none()
            && self.bulk_price_cents.is_none()
            && self.stock_quantity.is_none()
    }
}
