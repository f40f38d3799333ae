//! # Core Store Framework
//!
//! This module defines the generic building blocks for the store actors.
//!
//! ## Key Types
//!
//! - [`ActorState`]: The trait every store state must implement.
//! - [`StoreActor`]: The generic actor that owns one state value.
//! - [`StoreClient`]: The generic client for communicating with the actor.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, StateError).

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any state container must implement to be owned by a [`StoreActor`].
///
/// # Architecture Note
/// A store is a single value (the cart, the user profile) mutated only through
/// [`ActorState::Action`] messages. Writing the message loop once in [`StoreActor`]
/// lets every store share the same ordering and shutdown behavior.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may await. The `Context` type is injected
/// into every hook by [`StoreActor::run`], which lets dependencies be bound after the
/// actor was constructed.
#[async_trait]
pub trait ActorState: Clone + Send + Sync + 'static {
    /// Enum of the mutations this state accepts (e.g., `AddItem`).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this state.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once before the first message is processed.
    async fn on_start(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an action to the state.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Snapshot**: Read. Returns a clone of the current state.
/// - **Dispatch**: Write. Applies an [`ActorState::Action`] and returns its result.
#[derive(Debug)]
pub enum StoreRequest<S: ActorState> {
    Snapshot {
        respond_to: Response<S>,
    },
    Dispatch {
        action: S::Action,
        respond_to: Response<S::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns a single state value.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the state and the
/// receiver end of the channel, and processes requests *sequentially*: actions are
/// applied in exactly the order they were dispatched, and no `Mutex` is needed.
#[derive(Debug)]
pub struct StoreActor<S: ActorState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
}

impl<S: ActorState> StoreActor<S> {
    /// Creates a new `StoreActor` holding `initial` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel, at least 1. If the
    /// channel is full, calls to the client wait until there is space.
    pub fn new(initial: S, buffer_size: usize) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            state: initial,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// Returns the final state so the owner can inspect it after shutdown.
    pub async fn run(mut self, context: S::Context) -> S {
        // Extract just the type name (e.g., "Cart" instead of "pizza_order::model::cart::Cart")
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Actor started");

        if let Err(e) = self.state.on_start(&context).await {
            warn!(state_type, error = %e, "on_start failed");
        }

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Snapshot { respond_to } => {
                    debug!(state_type, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                StoreRequest::Dispatch { action, respond_to } => {
                    debug!(state_type, ?action, "Dispatch");
                    let result = self
                        .state
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::StateError(Box::new(e)));
                    match &result {
                        Ok(_) => debug!(state_type, "Action ok"),
                        Err(e) => warn!(state_type, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(state_type, "Shutdown");
        self.state
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe, cloneable handle for interacting with a [`StoreActor`].
#[derive(Clone, Debug)]
pub struct StoreClient<S: ActorState> {
    sender: mpsc::Sender<StoreRequest<S>>,
}

impl<S: ActorState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self { sender }
    }

    pub async fn snapshot(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn dispatch(&self, action: S::Action) -> Result<S::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Dispatch { action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
