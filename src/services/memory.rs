//! In-process restaurant used by tests and the `--offline` demo.

use super::restaurant::{ApiError, RestaurantApi};
use crate::model::{priority_price, MenuItem, OrderDraft, OrderId, OrderPatch, OrderRecord, PizzaId};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

/// Minutes from order creation to the estimated delivery.
const DELIVERY_MINUTES: i64 = 45;

/// A [`RestaurantApi`] backed by in-memory maps.
///
/// Orders get sequential ids (`"ORD1"`, `"ORD2"`, ...). Every draft passed to
/// [`RestaurantApi::create_order`] is recorded and can be read back with
/// [`InMemoryRestaurant::drafts`]. Setting [`fail_with`](InMemoryRestaurant::fail_with)
/// makes every call return a `Status` error, which lets tests drive the
/// page-level error path.
#[derive(Debug, Default)]
pub struct InMemoryRestaurant {
    menu: Vec<MenuItem>,
    orders: Mutex<HashMap<OrderId, OrderRecord>>,
    drafts: Mutex<Vec<OrderDraft>>,
    failure: Mutex<Option<u16>>,
    next_id: AtomicU64,
}

impl InMemoryRestaurant {
    pub fn new(menu: Vec<MenuItem>) -> Self {
        Self {
            menu,
            ..Self::default()
        }
    }

    /// A small menu for demos.
    pub fn with_sample_menu() -> Self {
        let pizza = |id: u32, name: &str, unit_price: f64, ingredients: &[&str], sold_out: bool| MenuItem {
            id: PizzaId(id),
            name: name.to_string(),
            unit_price,
            image_url: format!("https://example.invalid/pizzas/{id}.jpg"),
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            sold_out,
        };
        Self::new(vec![
            pizza(1, "Margherita", 12.0, &["tomato", "mozzarella", "basil"], false),
            pizza(2, "Capricciosa", 14.0, &["tomato", "mozzarella", "ham", "mushrooms", "artichoke"], true),
            pizza(3, "Romana", 15.0, &["tomato", "mozzarella", "prosciutto"], false),
            pizza(4, "Prosciutto e Rucola", 16.0, &["tomato", "mozzarella", "prosciutto", "arugula"], false),
        ])
    }

    /// Makes every subsequent call fail with `status`, or succeed again with `None`.
    pub fn fail_with(&self, status: Option<u16>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = status;
        }
    }

    /// Drafts received by `create_order`, in arrival order.
    pub fn drafts(&self) -> Vec<OrderDraft> {
        self.drafts.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Stores `order` as if the restaurant had created it.
    pub fn insert_order(&self, order: OrderRecord) {
        if let Ok(mut orders) = self.orders.lock() {
            orders.insert(order.id.clone(), order);
        }
    }

    fn check_failure(&self, operation: &'static str) -> Result<(), ApiError> {
        match self.failure.lock().ok().and_then(|f| *f) {
            Some(status) => Err(ApiError::Status {
                operation,
                status,
                message: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// An injected 404 reads as a missing order, like the HTTP API.
fn not_found_as(id: &OrderId, err: ApiError) -> ApiError {
    match err {
        ApiError::Status { status: 404, .. } => ApiError::OrderNotFound(id.clone()),
        other => other,
    }
}

#[async_trait]
impl RestaurantApi for InMemoryRestaurant {
    async fn get_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        self.check_failure("getting menu")?;
        Ok(self.menu.clone())
    }

    async fn get_order(&self, id: &OrderId) -> Result<OrderRecord, ApiError> {
        self.check_failure("getting order").map_err(|e| not_found_as(id, e))?;
        self.orders
            .lock()
            .ok()
            .and_then(|orders| orders.get(id).cloned())
            .ok_or_else(|| ApiError::OrderNotFound(id.clone()))
    }

    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderRecord, ApiError> {
        self.check_failure("creating your order")?;
        debug!(?draft, "create_order called");

        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let order_price = draft.cart.total_price();
        let order = OrderRecord {
            id: OrderId(format!("ORD{n}")),
            status: "preparing".to_string(),
            priority: draft.priority,
            priority_price: if draft.priority { priority_price(order_price) } else { 0.0 },
            order_price,
            estimated_delivery: Utc::now() + Duration::minutes(DELIVERY_MINUTES),
            cart: draft.cart.clone(),
            customer: Some(draft.customer.clone()),
            phone: Some(draft.phone.clone()),
            address: Some(draft.address.clone()),
            position: Some(draft.position.clone()),
        };

        if let Ok(mut drafts) = self.drafts.lock() {
            drafts.push(draft.clone());
        }
        self.insert_order(order.clone());
        info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    async fn update_order(&self, id: &OrderId, patch: &OrderPatch) -> Result<(), ApiError> {
        self.check_failure("updating your order").map_err(|e| not_found_as(id, e))?;
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| ApiError::OrderNotFound(id.clone()))?;
        let order = orders
            .get_mut(id)
            .ok_or_else(|| ApiError::OrderNotFound(id.clone()))?;

        if let Some(priority) = patch.priority {
            order.priority = priority;
            order.priority_price = if priority { priority_price(order.order_price) } else { 0.0 };
        }
        info!(order_id = %id, priority = order.priority, "Order updated");
        Ok(())
    }
}
