//! ActorState trait implementation for the Cart.
//!
//! See the trait implementation on [`Cart`] for method documentation.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::framework::ActorState;
use crate::model::Cart;
use async_trait::async_trait;
use tracing::info;

#[async_trait]
impl ActorState for Cart {
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    /// Applies a cart mutation.
    ///
    /// # Actions
    /// - `Add`: merges by pizza id, returns the line's new quantity
    /// - `Increase` / `Decrease`: adjust one unit, `Decrease` at 1 deletes the line
    /// - `Delete`: removes the line unconditionally
    /// - `Clear`: empties the cart
    async fn handle_action(&mut self, action: CartAction, _ctx: &()) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::Add(item) => {
                let pizza_id = item.pizza_id;
                self.add(item)?;
                let quantity = self.quantity_of(pizza_id);
                info!(%pizza_id, quantity, lines = self.len(), "Added to cart");
                Ok(CartActionResult::Added(quantity))
            }
            CartAction::Increase(pizza_id) => {
                let changed = self.increase(pizza_id);
                Ok(CartActionResult::Increased(changed.then(|| self.quantity_of(pizza_id))))
            }
            CartAction::Decrease(pizza_id) => {
                let changed = self.decrease(pizza_id);
                if changed && self.quantity_of(pizza_id) == 0 {
                    info!(%pizza_id, lines = self.len(), "Removed from cart");
                }
                Ok(CartActionResult::Decreased(changed.then(|| self.quantity_of(pizza_id))))
            }
            CartAction::Delete(pizza_id) => {
                let removed = self.delete(pizza_id);
                if removed {
                    info!(%pizza_id, lines = self.len(), "Removed from cart");
                }
                Ok(CartActionResult::Removed(removed))
            }
            CartAction::Clear => {
                self.clear();
                info!("Cart cleared");
                Ok(CartActionResult::Cleared)
            }
        }
    }
}
