use std::env;

use crate::domain::sale::PaymentMethod;

/// Policy knobs for a register session.
#[derive(Debug, Clone)]
pub struct RegisterConfig {
    /// Whether a blank search shows the full catalog instead of
    /// nothing.
    pub show_idle_catalog: bool,
    /// Payment method pre-selected in the checkout dialog.
    pub default_payment_method: PaymentMethod,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            show_idle_catalog: false,
            default_payment_method: PaymentMethod::Cash,
        }
    }
}

impl RegisterConfig {
    /// Build a config from the process environment.
    ///
    /// `SHOW_IDLE_CATALOG` accepts `1`/`true` and `0`/`false`;
    /// `DEFAULT_PAYMENT_METHOD` accepts the wire keys `cash`, `card`
    /// and `transfer`. Unset or unrecognized values fall back to the
    /// defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let show_idle_catalog = env::var("SHOW_IDLE_CATALOG")
            .ok()
            .and_then(|value| parse_flag(&value))
            .unwrap_or(defaults.show_idle_catalog);

        let default_payment_method = env::var("DEFAULT_PAYMENT_METHOD")
            .ok()
            .and_then(|value| parse_payment_method(&value))
            .unwrap_or(defaults.default_payment_method);

        Self {
            show_idle_catalog,
            default_payment_method,
        }
    }

    /// Enable the permissive blank-search policy.
    pub fn with_idle_catalog(mut self) -> Self {
        self.show_idle_catalog = true;
        self
    }

    /// Override the pre-selected payment method.
    pub fn with_default_payment_method(mut self, method: PaymentMethod) -> Self {
        self.default_payment_method = method;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn parse_payment_method(value: &str) -> Option<PaymentMethod> {
    PaymentMethod::from_key(value.trim().to_ascii_lowercase().as_str())
}
