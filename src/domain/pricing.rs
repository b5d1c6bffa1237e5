use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Price tier a cart line can be sold at.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    /// Single-unit price, offered for every product.
    Unit,
    /// Retail price, offered when the product carries one.
    Retail,
    /// Bundle price, offered when the product carries one.
    Bulk,
}

impl PriceTier {
    /// Stable key used in wire payloads and UI commands.
    pub fn key(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Retail => "retail",
            Self::Bulk => "bulk",
        }
    }

    /// Label shown next to the amount in the tier chooser.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unit => "Unit",
            Self::Retail => "Retail",
            Self::Bulk => "Bulk",
        }
    }

    /// Parses a tier key back into a tier.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "unit" => Some(Self::Unit),
            "retail" => Some(Self::Retail),
            "bulk" => Some(Self::Bulk),
            _ => None,
        }
    }
}

/// One selectable price option for a product.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TierOption {
    /// Tier being offered.
    pub tier: PriceTier,
    /// Display label for the tier.
    pub label: &'static str,
    /// Price in cents for one unit at this tier.
    pub amount_cents: i64,
}

impl Product {
    /// Price in cents for the given tier, when that tier is offered.
    ///
    /// The unit tier always resolves; retail and bulk resolve only when
    /// the stored amount is positive.
    pub fn tier_price(&self, tier: PriceTier) -> Option<i64> {
        match tier {
            PriceTier::Unit => Some(self.price_cents),
            PriceTier::Retail => self.retail_price_cents.filter(|amount| *amount > 0),
            PriceTier::Bulk => self.bulk_price_cents.filter(|amount| *amount > 0),
        }
    }

    /// All offered tiers in unit, retail, bulk order.
    pub fn tier_options(&self) -> Vec<TierOption> {
        [PriceTier::Unit, PriceTier::Retail, PriceTier::Bulk]
            .into_iter()
            .filter_map(|tier| {
                self.tier_price(tier).map(|amount_cents| TierOption {
                    tier,
                    label: tier.label(),
                    amount_cents,
                })
            })
            .collect()
    }

    /// Tier pre-selected for this product: bulk when offered, unit
    /// otherwise.
    pub fn default_tier(&self) -> PriceTier {
        if self.tier_price(PriceTier::Bulk).is_some() {
            PriceTier::Bulk
        } else {
            PriceTier::Unit
        }
    }
}
