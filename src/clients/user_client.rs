use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, StoreClient};
use crate::model::{Position, UserState};
use crate::services::{GeocodingApi, Geolocator};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

/// Stored as the lookup error when a caller abandons [`UserClient::fetch_address`].
pub const LOOKUP_CANCELLED: &str = "Address lookup cancelled";

/// Outcome of [`UserClient::fetch_address`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddressFetch {
    Resolved { position: Position, address: String },
    /// Another lookup was loading; this call did nothing.
    AlreadyInFlight,
}

/// Client for interacting with the User actor.
#[derive(Clone, Debug)]
pub struct UserClient {
    inner: StoreClient<UserState>,
}

impl UserClient {
    pub fn new(inner: StoreClient<UserState>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn set_username(&self, name: String) -> Result<(), UserError> {
        self.dispatch(UserAction::SetUsername(name)).await.map(|_| ())
    }

    /// Looks up the device position, reverse geocodes it, and stores the result.
    ///
    /// The store is `loading` for the duration of the lookup, then `idle` with the
    /// position and address set, or `error` with the failure message. Either
    /// failure is also returned to the caller. Dropping the returned future
    /// mid-lookup records [`LOOKUP_CANCELLED`] so a later call can start again.
    #[instrument(skip_all)]
    pub async fn fetch_address(
        &self,
        geolocator: &dyn Geolocator,
        geocoder: &dyn GeocodingApi,
    ) -> Result<AddressFetch, UserError> {
        match self.dispatch(UserAction::AddressRequested).await? {
            UserActionResult::AddressRequested(true) => {}
            UserActionResult::AddressRequested(false) => return Ok(AddressFetch::AlreadyInFlight),
            other => return Err(unexpected(other)),
        }

        let guard = LookupGuard(Some(self.inner.clone()));
        let result = self.lookup(geolocator, geocoder).await;
        guard.disarm();
        result
    }

    async fn lookup(
        &self,
        geolocator: &dyn Geolocator,
        geocoder: &dyn GeocodingApi,
    ) -> Result<AddressFetch, UserError> {
        let position = match geolocator.current_position().await {
            Ok(position) => position,
            Err(e) => return Err(self.fail(e.into()).await),
        };
        debug!(%position, "Position acquired");

        let address = match geocoder.reverse_geocode(position).await {
            Ok(geocoded) => geocoded.format(),
            Err(e) => return Err(self.fail(e.into()).await),
        };

        self.dispatch(UserAction::AddressResolved {
            position,
            address: address.clone(),
        })
        .await?;
        info!(%address, "Address fetched");
        Ok(AddressFetch::Resolved { position, address })
    }

    /// Records `error` in the store and hands it back for the caller to return.
    async fn fail(&self, error: UserError) -> UserError {
        warn!(%error, "Address lookup failed");
        match self.dispatch(UserAction::AddressFailed(error.to_string())).await {
            Ok(_) => error,
            Err(comm) => comm,
        }
    }

    async fn dispatch(&self, action: UserAction) -> Result<UserActionResult, UserError> {
        self.inner.dispatch(action).await.map_err(Self::map_error)
    }
}

/// Fails a started lookup that is dropped before it reached `idle` or `error`.
struct LookupGuard(Option<StoreClient<UserState>>);

impl LookupGuard {
    fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for LookupGuard {
    fn drop(&mut self) {
        let Some(inner) = self.0.take() else {
            return;
        };
        warn!("Address lookup dropped before finishing");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let failed = UserAction::AddressFailed(LOOKUP_CANCELLED.to_string());
                    if let Err(e) = inner.dispatch(failed).await {
                        warn!(error = %e, "Could not record the cancelled lookup");
                    }
                });
            }
            Err(e) => warn!(error = %e, "No runtime to record the cancelled lookup"),
        }
    }
}

fn unexpected(result: UserActionResult) -> UserError {
    UserError::ActorCommunicationError(format!("Unexpected response: {result:?}"))
}

#[async_trait]
impl ActorClient<UserState> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &StoreClient<UserState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UserError::ActorCommunicationError(e.to_string())
    }
}
