//! Actions accepted by the Cart store.
//!
//! These are the only ways the cart changes; they are applied by
//! [`ActorState::handle_action`](crate::framework::ActorState::handle_action) in the
//! order they were dispatched.

use crate::model::{CartItem, PizzaId};

/// Mutations of the [`Cart`](crate::model::Cart).
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Inserts the item, or merges it into the existing line for the same pizza.
    Add(CartItem),
    /// Adds one to a line's quantity.
    Increase(PizzaId),
    /// Removes one from a line's quantity, deleting the line at zero.
    Decrease(PizzaId),
    /// Removes a line regardless of quantity.
    Delete(PizzaId),
    /// Empties the cart.
    Clear,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// New quantity of the line the item was added to.
    Added(u32),
    /// Quantity after the change, `None` if the pizza was not in the cart.
    Increased(Option<u32>),
    /// Quantity after the change (0 once removed), `None` if the pizza was not in the cart.
    Decreased(Option<u32>),
    /// Whether a line was removed.
    Removed(bool),
    Cleared,
}
