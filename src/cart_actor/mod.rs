//! # Cart Store
//!
//! The cart is a single [`Cart`] value owned by a [`StoreActor`]. Every change goes
//! through a [`CartAction`], so mutations are applied one at a time in the order the
//! UI dispatched them.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorState`](crate::framework::ActorState) implementation for [`Cart`]
//! - [`error`] - [`CartError`] type
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use pizza_order::cart_actor;
//! use pizza_order::model::{Cart, CartItem, PizzaId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = cart_actor::new(Cart::default(), 32);
//!     tokio::spawn(actor.run(()));
//!
//!     client.add_item(CartItem::new(PizzaId(1), "Margherita", 1, 12.0)).await?;
//!     client.add_item(CartItem::new(PizzaId(1), "Margherita", 1, 12.0)).await?;
//!     assert_eq!(client.quantity_of(PizzaId(1)).await?, 2);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::StoreActor;
use crate::model::Cart;

/// Creates a new Cart actor seeded with `initial` and its client.
pub fn new(initial: Cart, buffer_size: usize) -> (StoreActor<Cart>, CartClient) {
    let (actor, generic_client) = StoreActor::new(initial, buffer_size);
    (actor, CartClient::new(generic_client))
}
