//! # Mock Framework
//!
//! Utilities for testing store clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers like
//! [`expect_dispatch`] to assert on what arrives. For a fluent API with queued
//! responses, use [`MockClient`].

use crate::framework::{ActorState, FrameworkError, StoreClient, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request to the mock client and the response it should get.
enum Expectation<S: ActorState> {
    Snapshot {
        response: Result<S, FrameworkError>,
    },
    Dispatch {
        response: Result<S::ActionResult, FrameworkError>,
    },
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

/// A mock store client with expectation tracking.
///
/// Requests are answered from the expectation queue in FIFO order. Every
/// dispatched action is recorded so tests can assert on it afterwards.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Cart>::new();
/// mock.expect_dispatch().return_ok(CartActionResult::Cleared);
///
/// let client = CartClient::new(mock.client());
/// client.clear().await?;
/// mock.verify();
/// ```
pub struct MockClient<S: ActorState> {
    client: StoreClient<S>,
    expectations: Expectations<S>,
    dispatched: Arc<Mutex<Vec<S::Action>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: ActorState> std::fmt::Debug for MockClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pending = self.expectations.lock().map(|e| e.len()).unwrap_or(0);
        f.debug_struct("MockClient").field("pending", &pending).finish()
    }
}

impl<S: ActorState> Default for MockClient<S>
where
    S::Action: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ActorState> MockClient<S>
where
    S::Action: Clone,
{
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let dispatched = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let dispatched_clone = dispatched.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = match expectations_clone.lock() {
                    Ok(mut exps) => exps.pop_front(),
                    Err(_) => None,
                };

                match (request, expectation) {
                    (StoreRequest::Snapshot { respond_to }, Some(Expectation::Snapshot { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Dispatch { action, respond_to }, Some(Expectation::Dispatch { response })) => {
                        if let Ok(mut log) = dispatched_clone.lock() {
                            log.push(action.clone());
                        }
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        // Dropping the responder surfaces as ActorDropped on the caller side.
                        tracing::warn!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            dispatched,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<S> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `dispatch` request.
    pub fn expect_dispatch(&mut self) -> DispatchExpectationBuilder<S> {
        DispatchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Actions received so far, in arrival order.
    pub fn dispatched(&self) -> Vec<S::Action> {
        self.dispatched
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().map(|e| e.len()).unwrap_or(0);
        assert_eq!(remaining, 0, "Not all expectations were met. {remaining} remaining");
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<S: ActorState> {
    expectations: Expectations<S>,
}

impl<S: ActorState> SnapshotExpectationBuilder<S> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, state: S) {
        push(&self.expectations, Expectation::Snapshot { response: Ok(state) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Snapshot { response: Err(error) });
    }
}

/// Builder for `dispatch` expectations.
pub struct DispatchExpectationBuilder<S: ActorState> {
    expectations: Expectations<S>,
}

impl<S: ActorState> DispatchExpectationBuilder<S> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: S::ActionResult) {
        push(&self.expectations, Expectation::Dispatch { response: Ok(result) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, Expectation::Dispatch { response: Err(error) });
    }
}

fn push<S: ActorState>(expectations: &Expectations<S>, expectation: Expectation<S>) {
    if let Ok(mut exps) = expectations.lock() {
        exps.push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// The returned client sends messages to a channel the test controls. The test
/// pulls each request off the receiver, asserts on it, and answers through the
/// responder. This makes it possible to observe intermediate states, e.g. that a
/// store was switched to `Loading` before a slow lookup finished.
pub fn create_mock_client<S: ActorState>(
    buffer_size: usize,
) -> (StoreClient<S>, mpsc::Receiver<StoreRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Dispatch request.
pub async fn expect_dispatch<S: ActorState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<(S::Action, oneshot::Sender<Result<S::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Dispatch { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request.
pub async fn expect_snapshot<S: ActorState>(
    receiver: &mut mpsc::Receiver<StoreRequest<S>>,
) -> Option<oneshot::Sender<Result<S, FrameworkError>>> {
    match receiver.recv().await {
        Some(StoreRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{CartAction, CartActionResult};
    use crate::model::{Cart, CartItem, PizzaId};

    #[tokio::test]
    async fn test_raw_mock_client() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);

        let task = tokio::spawn(async move { client.dispatch(CartAction::Delete(PizzaId(4))).await });

        let (action, responder) = expect_dispatch(&mut receiver).await.expect("Expected Dispatch request");
        assert!(matches!(action, CartAction::Delete(PizzaId(4))));
        responder.send(Ok(CartActionResult::Removed(true))).unwrap();

        let result = task.await.unwrap().unwrap();
        assert!(matches!(result, CartActionResult::Removed(true)));
    }

    #[tokio::test]
    async fn test_raw_mock_snapshot() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);

        let task = tokio::spawn(async move { client.snapshot().await });

        let responder = expect_snapshot(&mut receiver).await.expect("Expected Snapshot request");
        let cart = Cart::with_items([CartItem::new(PizzaId(3), "Romana", 2, 15.0)]).unwrap();
        responder.send(Ok(cart)).unwrap();

        let snapshot = task.await.unwrap().unwrap();
        assert_eq!(snapshot.quantity_of(PizzaId(3)), 2);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Cart>::new();
        let mut cart = Cart::default();
        cart.add(CartItem::new(PizzaId(1), "Margherita", 1, 12.0)).unwrap();

        mock.expect_dispatch().return_ok(CartActionResult::Cleared);
        mock.expect_snapshot().return_ok(cart);

        let client = mock.client();
        client.dispatch(CartAction::Clear).await.unwrap();
        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.total_quantity(), 1);

        assert!(matches!(mock.dispatched().as_slice(), [CartAction::Clear]));
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_surfaces_as_dropped() {
        let mock = MockClient::<Cart>::new();
        let err = mock.client().snapshot().await.unwrap_err();
        assert!(matches!(err, FrameworkError::ActorDropped));
    }
}
