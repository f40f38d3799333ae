//! Submission of the order form.

use crate::model::{Cart, OrderDraft, OrderId, OrderRecord};
use crate::services::{ApiError, RestaurantApi};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub const INVALID_PHONE_MESSAGE: &str =
    "Please give us your correct phone number. We might need it to contact you.";

/// Optional `+`, a 1-4 digit country code, then digit groups separated by
/// spaces, dashes, dots or parentheses.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9]{1,4}?[-.\s]?\(?[0-9]{1,3}?\)?[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,9}$")
        .expect("phone pattern compiles")
});

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Raw values of the submitted order form, exactly as the browser sends them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderForm {
    pub customer: String,
    pub phone: String,
    pub address: String,
    /// Absent when the checkbox was left unchecked.
    #[serde(default)]
    pub priority: Option<String>,
    /// The cart serialized as JSON.
    pub cart: String,
    /// `"latitude, longitude"`, or empty.
    #[serde(default)]
    pub position: String,
}

impl OrderForm {
    /// Whether the priority checkbox was checked.
    pub fn priority_checked(&self) -> bool {
        matches!(self.priority.as_deref(), Some("true") | Some("on"))
    }
}

/// Field-keyed validation messages, rendered inline next to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
    }
}

/// Side effects the caller must apply after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ClearCart,
}

/// Instruction to show another page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
}

impl Redirect {
    pub fn to_order(id: &OrderId) -> Self {
        Self {
            path: format!("/order/{id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FormErrors),
    Created {
        order: OrderRecord,
        effects: Vec<Effect>,
        redirect: Redirect,
    },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Malformed cart: {0}")]
    MalformedCart(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validates the form and creates the order.
///
/// Only the phone number is validated. A failed validation is returned as
/// [`SubmissionOutcome::Invalid`] without calling the API.
#[instrument(skip_all, fields(customer = %form.customer))]
pub async fn submit_order(api: &dyn RestaurantApi, form: OrderForm) -> Result<SubmissionOutcome, SubmitError> {
    debug!(?form, "submit_order called");
    let cart: Cart = serde_json::from_str(&form.cart)?;
    let priority = form.priority_checked();

    if !is_valid_phone(&form.phone) {
        info!("Rejected order form: invalid phone");
        return Ok(SubmissionOutcome::Invalid(FormErrors {
            phone: Some(INVALID_PHONE_MESSAGE.to_string()),
        }));
    }

    let draft = OrderDraft {
        customer: form.customer,
        phone: form.phone,
        address: form.address,
        priority,
        cart,
        position: form.position,
    };
    let order = api.create_order(&draft).await?;
    info!(order_id = %order.id, priority, "Order submitted");

    Ok(SubmissionOutcome::Created {
        redirect: Redirect::to_order(&order.id),
        order,
        effects: vec![Effect::ClearCart],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PizzaId;
    use crate::services::InMemoryRestaurant;

    fn form(phone: &str, priority: Option<&str>) -> OrderForm {
        OrderForm {
            customer: "Ada".into(),
            phone: phone.into(),
            address: "Rua Augusta 1, Lisbon".into(),
            priority: priority.map(str::to_string),
            cart: r#"[{"pizzaId":1,"quantity":2,"unitPrice":10,"totalPrice":20}]"#.into(),
            position: String::new(),
        }
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+1 555-123-4567"));
        assert!(is_valid_phone("912345678"));
        assert!(!is_valid_phone("abc"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("555-123-4567 ext"));
    }

    #[test]
    fn test_priority_sentinel() {
        assert!(form("1", Some("true")).priority_checked());
        assert!(form("1", Some("on")).priority_checked());
        assert!(!form("1", Some("false")).priority_checked());
        assert!(!form("1", None).priority_checked());
    }

    #[tokio::test]
    async fn test_valid_form_creates_structured_order() {
        let restaurant = InMemoryRestaurant::default();

        let outcome = submit_order(&restaurant, form("+1 555-123-4567", Some("true")))
            .await
            .unwrap();

        let drafts = restaurant.drafts();
        assert_eq!(drafts.len(), 1);
        assert!(drafts[0].priority);
        assert_eq!(drafts[0].cart.quantity_of(PizzaId(1)), 2);
        assert_eq!(drafts[0].cart.total_price(), 20.0);

        match outcome {
            SubmissionOutcome::Created { order, effects, redirect } => {
                assert_eq!(effects, vec![Effect::ClearCart]);
                assert_eq!(redirect.path, format!("/order/{}", order.id));
            }
            other => panic!("expected a created order, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_phone_skips_api() {
        let restaurant = InMemoryRestaurant::default();

        let outcome = submit_order(&restaurant, form("abc", None)).await.unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Invalid(FormErrors {
                phone: Some(INVALID_PHONE_MESSAGE.to_string())
            })
        );
        assert!(restaurant.drafts().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_cart() {
        let restaurant = InMemoryRestaurant::default();
        let mut bad = form("+1 555-123-4567", None);
        bad.cart = "not json".into();

        let err = submit_order(&restaurant, bad).await.unwrap_err();
        assert!(matches!(err, SubmitError::MalformedCart(_)));
        assert!(restaurant.drafts().is_empty());
    }

    #[tokio::test]
    async fn test_cart_breaking_invariants_is_malformed() {
        let restaurant = InMemoryRestaurant::default();
        let mut bad = form("+1 555-123-4567", None);
        bad.cart = r#"[{"pizzaId":1,"quantity":0,"unitPrice":10,"totalPrice":999},
                       {"pizzaId":1,"quantity":2,"unitPrice":-5,"totalPrice":20}]"#
            .into();

        let err = submit_order(&restaurant, bad).await.unwrap_err();
        assert!(matches!(err, SubmitError::MalformedCart(_)));
        assert!(restaurant.drafts().is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_propagates() {
        let restaurant = InMemoryRestaurant::default();
        restaurant.fail_with(Some(500));

        let err = submit_order(&restaurant, form("+1 555-123-4567", None)).await.unwrap_err();
        assert!(matches!(err, SubmitError::Api(ApiError::Status { status: 500, .. })));
    }

    #[test]
    fn test_form_errors_serialize_by_field() {
        let errors = FormErrors {
            phone: Some(INVALID_PHONE_MESSAGE.to_string()),
        };
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({ "phone": INVALID_PHONE_MESSAGE })
        );
        assert!(FormErrors::default().is_empty());
    }
}
