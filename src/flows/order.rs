//! Loading an order for the order status page.

use crate::flows::PageError;
use crate::model::{OrderId, OrderRecord, PizzaId};
use crate::services::RestaurantApi;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Whole minutes until `estimated_delivery`, rounded down.
///
/// Zero or negative once the estimate has passed.
pub fn minutes_left(estimated_delivery: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (estimated_delivery - now).num_milliseconds().div_euclid(60_000)
}

/// The delivery line shown on the order page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryEstimate {
    MinutesLeft(i64),
    ShouldHaveArrived,
}

impl DeliveryEstimate {
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes > 0 {
            Self::MinutesLeft(minutes)
        } else {
            Self::ShouldHaveArrived
        }
    }

    pub fn at(estimated_delivery: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_minutes(minutes_left(estimated_delivery, now))
    }
}

impl Display for DeliveryEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinutesLeft(n) => write!(f, "Only {n} minutes left 😃"),
            Self::ShouldHaveArrived => f.write_str("Order should have arrived"),
        }
    }
}

/// Ingredients per pizza in the order.
pub type Ingredients = HashMap<PizzaId, Vec<String>>;

/// A fetched order plus the menu lookup running next to it.
#[derive(Debug)]
pub struct LoadedOrder {
    pub order: OrderRecord,
    ingredients: JoinHandle<Option<Ingredients>>,
}

impl LoadedOrder {
    pub fn estimate(&self, now: DateTime<Utc>) -> DeliveryEstimate {
        DeliveryEstimate::at(self.order.estimated_delivery, now)
    }

    /// Whether the ingredient lookup has already finished.
    pub fn ingredients_ready(&self) -> bool {
        self.ingredients.is_finished()
    }

    /// Waits for the ingredient lookup. `None` if the menu could not be loaded.
    pub async fn ingredients(self) -> Option<Ingredients> {
        match self.ingredients.await {
            Ok(ingredients) => ingredients,
            Err(e) => {
                warn!(error = %e, "Ingredient lookup task failed");
                None
            }
        }
    }
}

/// Fetches an order.
///
/// The menu is fetched in a separate task started before the order request, so
/// a slow or failing menu never delays or fails the order. Its result is
/// available through [`LoadedOrder::ingredients`].
#[instrument(skip(api))]
pub async fn load_order(api: Arc<dyn RestaurantApi>, id: &OrderId) -> Result<LoadedOrder, PageError> {
    let menu_api = api.clone();
    let ingredients = tokio::spawn(async move {
        match menu_api.get_menu().await {
            Ok(menu) => Some(
                menu.into_iter()
                    .map(|pizza| (pizza.id, pizza.ingredients))
                    .collect::<Ingredients>(),
            ),
            Err(e) => {
                warn!(error = %e, "Menu unavailable, showing order without ingredients");
                None
            }
        }
    });

    let order = match api.get_order(id).await {
        Ok(order) => order,
        Err(e) => {
            ingredients.abort();
            return Err(e.into());
        }
    };
    debug!(?order, "Order fetched");
    info!(order_id = %order.id, status = %order.status, "Order loaded");

    let cart: Vec<PizzaId> = order.cart.items().iter().map(|item| item.pizza_id).collect();
    let ingredients = tokio::spawn(async move {
        let by_pizza = ingredients.await.ok().flatten();
        by_pizza.map(|mut by_pizza| {
            by_pizza.retain(|pizza_id, _| cart.contains(pizza_id));
            by_pizza
        })
    });

    Ok(LoadedOrder { order, ingredients })
}
