use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::MAX_LINE_QUANTITY;
use crate::domain::pricing::PriceTier;

/// Maximum accepted length for the raw quantity input.
const QUANTITY_INPUT_MAX_LEN: usize = 10;
const QUANTITY_INPUT_MAX_LEN_VALIDATOR: u64 = QUANTITY_INPUT_MAX_LEN as u64;

/// Result type returned by the cart form helpers.
pub type CartFormResult<T> = Result<T, CartFormError>;

/// Errors that can occur while processing cart input forms.
#[derive(Debug, Error)]
pub enum CartFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The quantity field is not a usable positive integer.
    #[error("quantity must be a whole number of at least 1")]
    InvalidQuantity,
    /// The quantity exceeds the per-line cap.
    #[error("quantity cannot exceed {MAX_LINE_QUANTITY}")]
    QuantityTooLarge,
    /// The submitted tier key is not recognized.
    #[error("unknown price tier `{value}`")]
    UnknownTier { value: String },
}

/// Form payload emitted by the quantity dialog.
#[derive(Debug, Deserialize, Validate)]
pub struct QuantityForm {
    /// Quantity exactly as typed by the user.
    #[validate(length(min = 1, max = QUANTITY_INPUT_MAX_LEN_VALIDATOR))]
    pub quantity: String,
}

impl QuantityForm {
    /// Validates and parses the payload into a line quantity.
    pub fn into_quantity(self) -> CartFormResult<i64> {
        self.validate()?;

        let quantity: i64 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| CartFormError::InvalidQuantity)?;

        if quantity < 1 {
            return Err(CartFormError::InvalidQuantity);
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(CartFormError::QuantityTooLarge);
        }

        Ok(quantity)
    }
}

/// Form payload emitted by the tier chooser.
#[derive(Debug, Deserialize, Validate)]
pub struct TierChoiceForm {
    /// Tier key selected in the chooser.
    #[validate(length(min = 1))]
    pub tier: String,
}

impl TierChoiceForm {
    /// Validates and parses the payload into a price tier.
    pub fn into_tier(self) -> CartFormResult<PriceTier> {
        self.validate()?;

        let normalized = self.tier.trim().to_ascii_lowercase();
        PriceTier::from_key(&normalized).ok_or(CartFormError::UnknownTier { value: self.tier })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_form_parses_positive_integers() {
        let quantity = QuantityForm {
            quantity: " 12 ".to_string(),
        }
        .into_quantity()
        .expect("expected success");

        assert_eq!(quantity, 12);
    }

    #[test]
    fn quantity_form_rejects_non_positive_and_garbage_input() {
        for raw in ["0", "-3", "2.5", "abc", "   "] {
            let result = QuantityForm {
                quantity: raw.to_string(),
            }
            .into_quantity();

            assert!(
                matches!(result, Err(CartFormError::InvalidQuantity)),
                "input {raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn quantity_form_rejects_amounts_over_the_cap() {
        let result = QuantityForm {
            quantity: "10000".to_string(),
        }
        .into_quantity();

        assert!(matches!(result, Err(CartFormError::QuantityTooLarge)));

        let at_cap = QuantityForm {
            quantity: MAX_LINE_QUANTITY.to_string(),
        }
        .into_quantity()
        .expect("expected success");
        assert_eq!(at_cap, MAX_LINE_QUANTITY);
    }

    #[test]
    fn quantity_form_rejects_empty_input_via_validator() {
        let result = QuantityForm {
            quantity: String::new(),
        }
        .into_quantity();

        assert!(matches!(result, Err(CartFormError::Validation(_))));
    }

    #[test]
    fn tier_choice_form_parses_known_keys() {
        for (raw, expected) in [
            ("unit", PriceTier::Unit),
            (" Retail ", PriceTier::Retail),
            ("BULK", PriceTier::Bulk),
        ] {
            let tier = TierChoiceForm {
                tier: raw.to_string(),
            }
            .into_tier()
            .expect("expected success");

            assert_eq!(tier, expected);
        }
    }

    #[test]
    fn tier_choice_form_rejects_unknown_keys() {
        let result = TierChoiceForm {
            tier: "wholesale".to_string(),
        }
        .into_tier();

        assert!(matches!(
            result,
            Err(CartFormError::UnknownTier { value }) if value == "wholesale"
        ));
    }
}
