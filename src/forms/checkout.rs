use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::parse_amount;
use crate::domain::sale::{PaymentMethod, SaleDraft};

/// Maximum accepted length for the raw amount input.
const AMOUNT_INPUT_MAX_LEN: usize = 20;
const AMOUNT_INPUT_MAX_LEN_VALIDATOR: u64 = AMOUNT_INPUT_MAX_LEN as u64;

/// Result type returned by the checkout form helpers.
pub type CheckoutFormResult<T> = Result<T, CheckoutFormError>;

/// Errors that can occur while processing the checkout form.
#[derive(Debug, Error)]
pub enum CheckoutFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The paid amount is not a usable non-negative decimal.
    #[error("amount paid must be a non-negative amount with at most two decimals")]
    InvalidAmount,
    /// The submitted payment method key is not recognized.
    #[error("unknown payment method `{value}`")]
    UnknownPaymentMethod { value: String },
}

/// Form payload emitted by the checkout dialog.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CheckoutForm {
    /// Client selected in the dropdown, when any.
    pub client_id: Option<i32>,
    /// Amount tendered, exactly as typed; empty means the full total.
    #[validate(length(max = AMOUNT_INPUT_MAX_LEN_VALIDATOR))]
    pub amount_paid: Option<String>,
    /// Payment method key; empty falls back to the configured default.
    pub payment_method: Option<String>,
}

impl CheckoutForm {
    /// Validates the payload into a sale draft against the cart total.
    pub fn into_sale_draft(
        self,
        total_cents: i64,
        default_method: PaymentMethod,
    ) -> CheckoutFormResult<SaleDraft> {
        self.validate()?;

        let amount_paid_cents = match self.amount_paid.as_deref().map(str::trim) {
            None | Some("") => total_cents,
            Some(raw) => parse_amount(raw).ok_or(CheckoutFormError::InvalidAmount)?,
        };

        let payment_method = match self.payment_method.as_deref().map(str::trim) {
            None | Some("") => default_method,
            Some(raw) => PaymentMethod::from_key(&raw.to_ascii_lowercase()).ok_or_else(|| {
                CheckoutFormError::UnknownPaymentMethod {
                    value: raw.to_string(),
                }
            })?,
        };

        Ok(SaleDraft {
            client_id: self.client_id,
            amount_paid_cents,
            payment_method,
        })
    }
}
