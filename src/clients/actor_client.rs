use crate::framework::{ActorState, FrameworkError, StoreClient};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the common read path.
///
/// Implementors only provide access to the generic [`StoreClient`] and an error
/// mapping; `snapshot` comes for free.
#[async_trait]
pub trait ActorClient<S: ActorState>: Send + Sync {
    /// The store-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map framework errors to the specific store error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a copy of the current state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }
}
