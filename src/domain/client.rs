use serde::{Deserialize, Serialize};

/// Buyer account as served by the clients endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Client {
    /// Unique identifier of the client.
    pub id: i32,
    /// Display name of the client.
    pub name: String,
    /// Optional tax identifier printed on the receipt.
    pub cuit: Option<String>,
}
