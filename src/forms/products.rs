use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::parse_amount;
use crate::domain::product::ProductPatch;
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing the product edit form.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// A price field is not a usable non-negative decimal.
    #[error("{field} must be a non-negative amount with at most two decimals")]
    InvalidPrice { field: &'static str },
    /// The unit price can be changed but never cleared.
    #[error("unit price cannot be empty")]
    MissingUnitPrice,
    /// The stock quantity is negative.
    #[error("stock quantity cannot be negative")]
    NegativeStock,
    /// The form carries no change at all.
    #[error("nothing to update")]
    EmptyPatch,
}

/// Form payload emitted by the quick product edit dialog.
///
/// Every field is optional; an empty string clears the clearable
/// fields (description and the retail/bulk tiers).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EditProductForm {
    /// Optional new name.
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub name: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional unit price update.
    pub price: Option<String>,
    /// Optional retail tier update.
    pub price_retail: Option<String>,
    /// Optional bulk tier update.
    pub price_bulk: Option<String>,
    /// Optional stock quantity update.
    pub stock_quantity: Option<i64>,
}

impl EditProductForm {
    /// Validates and sanitizes the payload into a domain `ProductPatch`.
    pub fn into_product_patch(self) -> ProductFormResult<ProductPatch> {
        self.validate()?;

        let mut patch = ProductPatch::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(ProductFormError::EmptyName);
            }
            patch = patch.name(sanitized);
        }

        if let Some(description) = self.description {
            let sanitized = sanitize_multiline_text(&description);
            if sanitized.is_empty() {
                patch = patch.description(None::<String>);
            } else {
                patch = patch.description(Some(sanitized));
            }
        }

        if let Some(price) = self.price {
            let trimmed = price.trim();
            if trimmed.is_empty() {
                return Err(ProductFormError::MissingUnitPrice);
            }
            let cents =
                parse_amount(trimmed).ok_or(ProductFormError::InvalidPrice { field: "price" })?;
            patch = patch.price_cents(cents);
        }

        if let Some(price_retail) = self.price_retail {
            patch = patch.retail_price_cents(parse_tier_amount(&price_retail, "retail price")?);
        }

        if let Some(price_bulk) = self.price_bulk {
            patch = patch.bulk_price_cents(parse_tier_amount(&price_bulk, "bulk price")?);
        }

        if let Some(stock_quantity) = self.stock_quantity {
            if stock_quantity < 0 {
                return Err(ProductFormError::NegativeStock);
            }
            patch = patch.stock_quantity(stock_quantity);
        }

        if patch.is_empty() {
            return Err(ProductFormError::EmptyPatch);
        }

        Ok(patch)
    }
}

fn parse_tier_amount(raw: &str, field: &'static str) -> ProductFormResult<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    parse_amount(trimmed)
        .map(Some)
        .ok_or(ProductFormError::InvalidPrice { field })
}
