use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, StoreClient};
use crate::model::{Cart, CartItem, PizzaId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
///
/// Every mutation is a [`CartAction`] dispatch; the derived totals are computed
/// from a snapshot so they always reflect the cart at the time of the call.
#[derive(Clone, Debug)]
pub struct CartClient {
    inner: StoreClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StoreClient<Cart>) -> Self {
        Self { inner }
    }

    /// Adds `item` to the cart and returns the line's new quantity.
    #[instrument(skip(self, item), fields(pizza_id = %item.pizza_id))]
    pub async fn add_item(&self, item: CartItem) -> Result<u32, CartError> {
        debug!(?item, "add_item called");
        match self.dispatch(CartAction::Add(item)).await? {
            CartActionResult::Added(quantity) => Ok(quantity),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the new quantity, or `None` if the pizza was not in the cart.
    #[instrument(skip(self))]
    pub async fn increase_quantity(&self, pizza_id: PizzaId) -> Result<Option<u32>, CartError> {
        match self.dispatch(CartAction::Increase(pizza_id)).await? {
            CartActionResult::Increased(quantity) => Ok(quantity),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the new quantity (0 once the line is gone), or `None` if the pizza was not in the cart.
    #[instrument(skip(self))]
    pub async fn decrease_quantity(&self, pizza_id: PizzaId) -> Result<Option<u32>, CartError> {
        match self.dispatch(CartAction::Decrease(pizza_id)).await? {
            CartActionResult::Decreased(quantity) => Ok(quantity),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, pizza_id: PizzaId) -> Result<bool, CartError> {
        match self.dispatch(CartAction::Delete(pizza_id)).await? {
            CartActionResult::Removed(removed) => Ok(removed),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        match self.dispatch(CartAction::Clear).await? {
            CartActionResult::Cleared => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// The current cart.
    pub async fn cart(&self) -> Result<Cart, CartError> {
        self.snapshot().await
    }

    pub async fn total_quantity(&self) -> Result<u32, CartError> {
        Ok(self.snapshot().await?.total_quantity())
    }

    pub async fn total_price(&self) -> Result<f64, CartError> {
        Ok(self.snapshot().await?.total_price())
    }

    pub async fn quantity_of(&self, pizza_id: PizzaId) -> Result<u32, CartError> {
        Ok(self.snapshot().await?.quantity_of(pizza_id))
    }

    async fn dispatch(&self, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner.dispatch(action).await.map_err(Self::map_error)
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("Unexpected response: {result:?}"))
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StoreClient<Cart> {
        &self.inner
    }

    /// Unwraps [`CartError`]s raised by the cart itself; everything else is a
    /// communication failure.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::StateError(inner) => match inner.downcast::<CartError>() {
                Ok(cart_error) => *cart_error,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;

    #[tokio::test]
    async fn test_add_item_dispatches_add() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_dispatch().return_ok(CartActionResult::Added(2));

        let client = CartClient::new(mock.client());
        let quantity = client
            .add_item(CartItem::new(PizzaId(1), "Margherita", 1, 12.0))
            .await
            .unwrap();

        assert_eq!(quantity, 2);
        assert!(matches!(
            mock.dispatched().as_slice(),
            [CartAction::Add(item)] if item.pizza_id == PizzaId(1)
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_state_error_is_unwrapped() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_dispatch().return_err(FrameworkError::StateError(Box::new(
            CartError::InvalidItem("pizza_1 has quantity 0".into()),
        )));

        let client = CartClient::new(mock.client());
        let err = client
            .add_item(CartItem::new(PizzaId(1), "Margherita", 0, 12.0))
            .await
            .unwrap_err();

        assert_eq!(err, CartError::InvalidItem("pizza_1 has quantity 0".into()));
    }

    #[tokio::test]
    async fn test_mismatched_result_is_reported() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_dispatch().return_ok(CartActionResult::Cleared);

        let client = CartClient::new(mock.client());
        let err = client.delete_item(PizzaId(3)).await.unwrap_err();

        assert!(matches!(err, CartError::ActorCommunicationError(_)));
    }

    #[tokio::test]
    async fn test_derived_totals_read_a_snapshot() {
        let mut mock = MockClient::<Cart>::new();
        let cart = Cart::with_items([
            CartItem::new(PizzaId(1), "Margherita", 2, 12.0),
            CartItem::new(PizzaId(2), "Diavola", 1, 16.0),
        ])
        .unwrap();
        mock.expect_snapshot().return_ok(cart.clone());
        mock.expect_snapshot().return_ok(cart);

        let client = CartClient::new(mock.client());
        assert_eq!(client.total_quantity().await.unwrap(), 3);
        assert_eq!(client.total_price().await.unwrap(), 40.0);
        mock.verify();
    }
}
