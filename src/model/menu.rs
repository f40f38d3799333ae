use crate::model::PizzaId;
use serde::{Deserialize, Serialize};

/// A pizza on the restaurant's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: PizzaId,
    pub name: String,
    pub unit_price: f64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub sold_out: bool,
}
