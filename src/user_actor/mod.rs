//! # User Store
//!
//! Holds the username and the result of the address lookup. The lookup itself
//! (geolocation, then reverse geocoding) is orchestrated by
//! [`UserClient::fetch_address`], which drives the store through its
//! `loading -> idle|error` transitions.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorState`](crate::framework::ActorState) implementation for [`UserState`]
//! - [`error`] - [`UserError`] type
//! - [`actions`] - [`UserAction`] and [`UserActionResult`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::UserClient;
use crate::framework::StoreActor;
use crate::model::UserState;

/// Creates a new User actor seeded with `initial` and its client.
pub fn new(initial: UserState, buffer_size: usize) -> (StoreActor<UserState>, UserClient) {
    let (actor, generic_client) = StoreActor::new(initial, buffer_size);
    (actor, UserClient::new(generic_client))
}
