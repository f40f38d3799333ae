//! # System Lifecycle & Orchestration
//!
//! Wiring the stores to the flows and services, and starting and stopping them.
//!
//! - [`PizzaSystem`] - spawns the Cart and User stores, runs the page flows
//!   against the configured [`Services`], and applies the effects they return
//! - [`AppConfig`] - endpoints, device position and store sizing from flags,
//!   environment variables or `.env`
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod config;
pub mod system;
pub mod tracing;

pub use config::*;
pub use system::*;
pub use self::tracing::setup_tracing;
