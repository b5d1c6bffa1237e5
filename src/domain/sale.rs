use serde::{Deserialize, Serialize};

/// Payment method accepted at the register.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payment.
    Cash,
    /// Card payment.
    Card,
    /// Bank transfer.
    Transfer,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

impl PaymentMethod {
    /// Stable wire key for the method.
    pub fn key(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
        }
    }

    /// Parses a wire key back into a method.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "cash" => Some(Self::Cash),
            "card" => Some(Self::Card),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

/// Settlement state of a sale relative to its total.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// The paid amount covers the whole total.
    Paid,
    /// A positive amount below the total was paid.
    Partial,
    /// Nothing was paid yet.
    Pending,
}

impl PaymentStatus {
    /// Derives the status the backend will assign for the given
    /// amounts.
    pub fn from_amounts(amount_paid_cents: i64, total_cents: i64) -> Self {
        if amount_paid_cents >= total_cents {
            Self::Paid
        } else if amount_paid_cents > 0 {
            Self::Partial
        } else {
            Self::Pending
        }
    }
}

/// Validated checkout intent, ready to be turned into a wire request.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    /// Optional client the sale is attributed to.
    pub client_id: Option<i32>,
    /// Amount the buyer pays now, in cents.
    pub amount_paid_cents: i64,
    /// How the buyer pays.
    pub payment_method: PaymentMethod,
}

impl SaleDraft {
    /// Build a draft that pays the given total in full.
    pub fn paid_in_full(total_cents: i64, payment_method: PaymentMethod) -> Self {
        Self {
            client_id: None,
            amount_paid_cents: total_cents,
            payment_method,
        }
    }

    /// Attach a client to the draft.
    pub fn with_client_id(mut self, client_id: i32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Status the backend is expected to assign against this total.
    pub fn status_preview(&self, total_cents: i64) -> PaymentStatus {
        PaymentStatus::from_amounts(self.amount_paid_cents, total_cents)
    }
}
