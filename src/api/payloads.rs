use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::cart::Cart;
use crate::domain::client::Client;
use crate::domain::product::Product;
use crate::domain::sale::{PaymentMethod, PaymentStatus, SaleDraft};

/// Serde bridge between JSON decimal amounts and integer cents.
///
/// Amounts cross the wire as JSON numbers with two-decimal precision;
/// everything behind the wire boundary stays in `i64` cents.
pub mod cents_decimal {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok((value * 100.0).round() as i64)
    }

    /// Bridge for optional amounts.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serialize, Serializer};

        pub fn serialize<S>(cents: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            cents.map(|cents| cents as f64 / 100.0).serialize(serializer)
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let value = Option::<f64>::deserialize(deserializer)?;
            Ok(value.map(|value| (value * 100.0).round() as i64))
        }
    }
}

/// Product record as served by `GET /api/products`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProductPayload {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub item_number: Option<String>,
    /// Unit price as a decimal amount.
    #[serde(default, with = "cents_decimal::option")]
    pub price: Option<i64>,
    /// Retail tier as a decimal amount.
    #[serde(default, with = "cents_decimal::option")]
    pub price_retail: Option<i64>,
    /// Bulk tier as a decimal amount.
    #[serde(default, with = "cents_decimal::option")]
    pub price_bulk: Option<i64>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub min_stock_level: i64,
    #[serde(default)]
    pub category: Option<String>,
    /// Size span covered by one bundle (`numeracion` in the backend).
    #[serde(default)]
    pub numeracion: Option<String>,
    /// Units per bundle (`cant_bulto` in the backend).
    #[serde(default)]
    pub cant_bulto: Option<i64>,
}

impl From<ProductPayload> for Product {
    fn from(payload: ProductPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            description: payload.description,
            barcode: payload.barcode,
            item_number: payload.item_number,
            // an absent unit price is not a valid business state
            price_cents: payload.price.unwrap_or(0),
            retail_price_cents: payload.price_retail,
            bulk_price_cents: payload.price_bulk,
            stock_quantity: payload.stock_quantity,
            min_stock_level: payload.min_stock_level,
            category: payload.category,
            size_range: payload.numeracion,
            units_per_bundle: payload.cant_bulto,
        }
    }
}

/// Client record as served by `GET /api/clients`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClientPayload {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub cuit: Option<String>,
}

impl From<ClientPayload> for Client {
    fn from(payload: ClientPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            cuit: payload.cuit,
        }
    }
}

/// One purchased line within a sale submission.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SaleItemRequest {
    pub product_id: i32,
    pub quantity: i64,
}

/// Body of `POST /api/sales`.
///
/// Items carry no price: the backend prices every line at the
/// product's current unit price.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleRequest {
    pub items: Vec<SaleItemRequest>,
    pub client_id: Option<i32>,
    #[serde(with = "cents_decimal")]
    pub amount_paid: i64,
    pub payment_method: PaymentMethod,
}

impl SaleRequest {
    /// Builds the wire request for a cart and a validated draft, one
    /// item per cart line.
    pub fn from_cart(cart: &Cart, draft: &SaleDraft) -> Self {
        let items = cart
            .lines()
            .iter()
            .map(|line| SaleItemRequest {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect();

        Self {
            items,
            client_id: draft.client_id,
            amount_paid: draft.amount_paid_cents,
            payment_method: draft.payment_method,
        }
    }
}

/// Sale record returned by a successful `POST /api/sales`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleReceipt {
    pub id: i32,
    pub timestamp: NaiveDateTime,
    #[serde(with = "cents_decimal")]
    pub total_amount: i64,
    #[serde(with = "cents_decimal")]
    pub amount_paid: i64,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
}

/// Path of the printable receipt for a submitted sale.
pub fn remito_path(sale_id: i32) -> String {
    format!("/sales/{sale_id}/remito")
}
