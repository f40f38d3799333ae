/// Orders as exchanged with the restaurant API.
///
/// [`OrderDraft`] is assembled by the submission flow and lives for one request;
/// [`OrderRecord`] is what the server assigns and returns.
use crate::model::Cart;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Server-assigned order identifier (opaque, e.g. `"IIDSAT"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer: String,
    pub phone: String,
    pub address: String,
    pub priority: bool,
    pub cart: Cart,
    pub position: String,
}

/// An order as confirmed by the restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    pub status: String,
    pub priority: bool,
    pub priority_price: f64,
    pub order_price: f64,
    pub estimated_delivery: DateTime<Utc>,
    pub cart: Cart,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl OrderRecord {
    /// Amount due on delivery.
    pub fn total_to_pay(&self) -> f64 {
        self.order_price + self.priority_price
    }
}

/// Partial update for an existing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<bool>,
}
