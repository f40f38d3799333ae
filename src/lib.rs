//! # Pizza Order
//!
//! > **Client-side logic of a pizza ordering app: stores, page flows and the services behind them.**
//!
//! The cart and the user profile are long-lived stores, each owned by its own
//! Tokio task. Pages talk to them through typed clients and run stateless async
//! flows against the restaurant and geocoding APIs.
//!
//! ## 🚀 Core Concepts
//!
//! ### Stores as Actors
//! [`StoreActor<S: ActorState>`](framework::StoreActor) owns a single state value and
//! applies [`ActorState::Action`](framework::ActorState::Action)s one at a time, in the
//! order they were dispatched. There are no locks, and a store's lifetime is explicit:
//! it is spawned by [`PizzaSystem`](lifecycle::PizzaSystem) and stops when its last
//! client is dropped.
//!
//! ### Flows Return Effects
//! Flows never reach into a store or navigate. The order submission flow hands back
//! `[ClearCart]` and a redirect to `/order/{id}`; the system applies them.
//!
//! ### Two Error Tiers
//! Form validation problems are data ([`FormErrors`](flows::FormErrors)). Fetch
//! failures become a [`PageError`](flows::PageError), the full-page error view with
//! a way back home. A missing order stays distinguishable from a failed request.
//!
//! ### Mocking
//! Store clients can be tested without a running store; see [`framework::mock`].
//! Services sit behind `async_trait` seams, with [`InMemoryRestaurant`](services::InMemoryRestaurant)
//! as the offline restaurant.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Key items**: [`ActorState`](framework::ActorState), [`StoreActor`](framework::StoreActor),
//!   [`StoreClient`](framework::StoreClient).
//!
//! ### 2. The Stores ([`cart_actor`], [`user_actor`]) and their state ([`model`])
//! - **Key items**: [`Cart`](model::Cart), [`UserState`](model::UserState).
//!
//! ### 3. The Interface ([`clients`])
//! - **Key items**: [`CartClient`](clients::CartClient), [`UserClient::fetch_address`](clients::UserClient::fetch_address).
//!
//! ### 4. The Pages ([`flows`])
//! - **Key items**: [`submit_order`](flows::submit_order), [`load_order`](flows::load_order),
//!   [`load_menu`](flows::load_menu), [`make_priority`](flows::make_priority).
//!
//! ### 5. The Outside World ([`services`])
//! - **Key items**: [`RestaurantApi`](services::RestaurantApi), [`GeocodingApi`](services::GeocodingApi),
//!   [`Geolocator`](services::Geolocator).
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`PizzaSystem`](lifecycle::PizzaSystem), [`AppConfig`](lifecycle::AppConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Walk through a full order against the in-memory restaurant
//! RUST_LOG=info cargo run -- demo --offline
//!
//! # Show the live menu, or an order
//! cargo run -- menu
//! cargo run -- order IIDSAT
//! ```

pub mod cart_actor;
pub mod clients;
pub mod flows;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod services;
pub mod user_actor;
