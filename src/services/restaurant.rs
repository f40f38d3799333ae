//! The restaurant's menu and order REST API.

use crate::model::{MenuItem, OrderDraft, OrderId, OrderPatch, OrderRecord};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const DEFAULT_API_URL: &str = "https://react-fast-pizza-api.jonas.io/api";

/// Errors from the restaurant API.
///
/// [`ApiError::OrderNotFound`] is kept apart from the transport variants so the
/// order page can tell "no such order" from "the request failed".
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Couldn't find order #{0}")]
    OrderNotFound(OrderId),

    #[error("Failed {operation}: status {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::OrderNotFound(_))
    }
}

#[async_trait]
pub trait RestaurantApi: Send + Sync {
    async fn get_menu(&self) -> Result<Vec<MenuItem>, ApiError>;

    async fn get_order(&self, id: &OrderId) -> Result<OrderRecord, ApiError>;

    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderRecord, ApiError>;

    async fn update_order(&self, id: &OrderId, patch: &OrderPatch) -> Result<(), ApiError>;
}

/// Every successful response wraps its payload in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Failure responses carry `{ "status": "fail", "message": ... }`.
#[derive(Debug, Default, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: String,
}

/// HTTP implementation of [`RestaurantApi`].
#[derive(Debug, Clone)]
pub struct HttpRestaurantApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRestaurantApi {
    pub fn new() -> Self {
        Self::new_with_base_url(DEFAULT_API_URL.to_string())
    }

    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn decode<T: DeserializeOwned>(
        resp: reqwest::Response,
        operation: &'static str,
    ) -> Result<T, ApiError> {
        let resp = Self::check(resp, operation).await?;
        let envelope: Envelope<T> = resp.json().await?;
        Ok(envelope.data)
    }

    async fn check(resp: reqwest::Response, operation: &'static str) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<FailureBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        Err(ApiError::Status {
            operation,
            status: status.as_u16(),
            message,
        })
    }

    fn not_found_as(id: &OrderId, err: ApiError) -> ApiError {
        match err {
            ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
                ApiError::OrderNotFound(id.clone())
            }
            other => other,
        }
    }
}

impl Default for HttpRestaurantApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RestaurantApi for HttpRestaurantApi {
    #[instrument(skip(self))]
    async fn get_menu(&self) -> Result<Vec<MenuItem>, ApiError> {
        let resp = self.http.get(self.url("menu")).send().await?;
        let menu: Vec<MenuItem> = Self::decode(resp, "getting menu").await?;
        debug!(items = menu.len(), "Menu fetched");
        Ok(menu)
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: &OrderId) -> Result<OrderRecord, ApiError> {
        let resp = self.http.get(self.url(&format!("order/{id}"))).send().await?;
        Self::decode(resp, "getting order")
            .await
            .map_err(|e| Self::not_found_as(id, e))
    }

    #[instrument(skip(self, draft), fields(customer = %draft.customer, priority = draft.priority))]
    async fn create_order(&self, draft: &OrderDraft) -> Result<OrderRecord, ApiError> {
        debug!(?draft, "create_order called");
        let resp = self.http.post(self.url("order")).json(draft).send().await?;
        let order: OrderRecord = Self::decode(resp, "creating your order").await?;
        info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn update_order(&self, id: &OrderId, patch: &OrderPatch) -> Result<(), ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("order/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::check(resp, "updating your order")
            .await
            .map_err(|e| Self::not_found_as(id, e))?;
        info!(order_id = %id, "Order updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cart, CartItem, PizzaId};
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    fn order_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "status": "preparing",
            "priority": false,
            "priorityPrice": 0,
            "orderPrice": 20,
            "estimatedDelivery": "2027-01-01T12:30:00Z",
            "cart": [{ "pizzaId": 1, "name": "Margherita", "quantity": 2, "unitPrice": 10, "totalPrice": 20 }]
        })
    }

    #[tokio::test]
    async fn test_get_menu_unwraps_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/menu");
                then.status(200).json_body(json!({
                    "status": "success",
                    "data": [
                        { "id": 1, "name": "Margherita", "unitPrice": 12, "imageUrl": "m.jpg",
                          "ingredients": ["tomato", "mozzarella", "basil"], "soldOut": false },
                        { "id": 2, "name": "Capricciosa", "unitPrice": 14, "imageUrl": "c.jpg",
                          "ingredients": ["tomato", "ham"], "soldOut": true }
                    ]
                }));
            })
            .await;

        let api = HttpRestaurantApi::new_with_base_url(server.url("/api"));
        let menu = api.get_menu().await.unwrap();

        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].ingredients, vec!["tomato", "mozzarella", "basil"]);
        assert!(menu[1].sold_out);
    }

    #[tokio::test]
    async fn test_get_order_not_found_is_distinguishable_from_outage() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/order/NOPE");
                then.status(404)
                    .json_body(json!({ "status": "fail", "message": "Order not found" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/order/BOOM");
                then.status(503).body("unavailable");
            })
            .await;

        let api = HttpRestaurantApi::new_with_base_url(server.url("/api"));

        let err = api.get_order(&OrderId::from("NOPE")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Couldn't find order #NOPE");

        let err = api.get_order(&OrderId::from("BOOM")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 503, .. }));
        assert!(!err.is_not_found());

        let unreachable = HttpRestaurantApi::new_with_base_url("http://127.0.0.1:1".to_string());
        let err = unreachable.get_order(&OrderId::from("NOPE")).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_order_posts_structured_cart() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/order").json_body(json!({
                    "customer": "Ada",
                    "phone": "+1 555-123-4567",
                    "address": "Lisbon",
                    "priority": true,
                    "cart": [{ "pizzaId": 1, "name": "Margherita", "quantity": 2,
                               "unitPrice": 10.0, "totalPrice": 20.0 }],
                    "position": ""
                }));
                then.status(201).json_body(json!({ "status": "success", "data": order_json("NEW1") }));
            })
            .await;

        let draft = OrderDraft {
            customer: "Ada".into(),
            phone: "+1 555-123-4567".into(),
            address: "Lisbon".into(),
            priority: true,
            cart: Cart::with_items([CartItem::new(PizzaId(1), "Margherita", 2, 10.0)]).unwrap(),
            position: String::new(),
        };

        let api = HttpRestaurantApi::new_with_base_url(server.url("/api"));
        let order = api.create_order(&draft).await.unwrap();

        mock.assert_async().await;
        assert_eq!(order.id, OrderId::from("NEW1"));
    }

    #[tokio::test]
    async fn test_update_order_sends_patch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH).path("/api/order/ABC").json_body(json!({ "priority": true }));
                then.status(200).json_body(json!({ "status": "success" }));
            })
            .await;

        let api = HttpRestaurantApi::new_with_base_url(server.url("/api"));
        api.update_order(&OrderId::from("ABC"), &OrderPatch { priority: Some(true) })
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
