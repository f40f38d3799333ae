//! Generic state-actor framework for the client-side stores.
//!
//! This module provides the building blocks for keeping a piece of application state
//! (the cart, the user profile) inside a single Tokio task and talking to it through
//! cheap, cloneable handles.
//!
//! # Main Components
//!
//! - [`ActorState`] - Trait that state containers implement to be owned by an actor
//! - [`StoreActor`] - Generic actor that owns the state and applies actions in order
//! - [`StoreClient`] - Type-safe handle used to read snapshots and dispatch actions
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
