//! # Page Flows
//!
//! The stateless async functions behind each page: submitting the order form,
//! loading an order, loading the menu and upgrading an order to priority.
//!
//! Flows never touch a store or navigate on their own. Anything that has to
//! happen afterwards is handed back as data ([`Effect`], [`Redirect`]) for the
//! caller to carry out; see [`PizzaSystem::submit_order`](crate::lifecycle::PizzaSystem::submit_order).
//! Fetch failures are surfaced as [`PageError`], the full-page error view.

pub mod create_order;
pub mod error;
pub mod menu;
pub mod order;
pub mod priority;

pub use create_order::*;
pub use error::*;
pub use menu::*;
pub use order::*;
pub use priority::*;
