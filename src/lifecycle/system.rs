use crate::cart_actor::CartError;
use crate::clients::{ActorClient, AddressFetch, CartClient, UserClient};
use crate::flows::{
    self, Effect, LoadedOrder, OrderForm, PageError, SubmissionOutcome, SubmitError,
};
use crate::lifecycle::{AppConfig, ConfigError};
use crate::model::{Cart, MenuItem, OrderId, UserState};
use crate::services::{
    GeocodingApi, Geolocator, HttpGeocodingApi, HttpRestaurantApi, RestaurantApi,
};
use crate::user_actor::UserError;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// Errors from [`PizzaSystem`] operations that touch a store.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    User(#[from] UserError),
}

/// The external collaborators of the application.
#[derive(Clone)]
pub struct Services {
    pub restaurant: Arc<dyn RestaurantApi>,
    pub geocoder: Arc<dyn GeocodingApi>,
    pub geolocator: Arc<dyn Geolocator>,
}

impl Services {
    /// HTTP services pointed at the configured endpoints.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            restaurant: Arc::new(HttpRestaurantApi::new_with_base_url(config.api_url.clone())),
            geocoder: Arc::new(HttpGeocodingApi::new_with_base_url(config.geocoding_url.clone())),
            geolocator: config.geolocator()?,
        })
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// The application runtime: owns the store actors and runs the page flows.
///
/// `PizzaSystem` is responsible for:
/// - **Lifecycle Management**: spawning the Cart and User stores at start and
///   stopping them in [`shutdown`](PizzaSystem::shutdown)
/// - **Effects**: carrying out what the flows hand back (e.g. clearing the cart
///   after an order was created)
/// - **Wiring**: giving the flows and the address lookup their services
///
/// # Example
///
/// ```ignore
/// let system = PizzaSystem::new(Services::from_config(&config)?, config.store_buffer_size);
///
/// system.cart_client.add_item(CartItem::new(PizzaId(1), "Margherita", 1, 12.0)).await?;
/// let form = system.order_form("+1 555-123-4567", "Rua Augusta 1", true).await?;
/// let outcome = system.submit_order(form).await?;
///
/// system.shutdown().await?;
/// ```
#[derive(Debug)]
pub struct PizzaSystem {
    /// Client for the Cart store
    pub cart_client: CartClient,

    /// Client for the User store
    pub user_client: UserClient,

    services: Services,
    cart_handle: JoinHandle<Cart>,
    user_handle: JoinHandle<UserState>,
}

impl PizzaSystem {
    /// Spawns both stores with empty initial state.
    pub fn new(services: Services, buffer_size: usize) -> Self {
        Self::with_state(services, buffer_size, Cart::default(), UserState::default())
    }

    /// Spawns both stores seeded with the given state.
    pub fn with_state(services: Services, buffer_size: usize, cart: Cart, user: UserState) -> Self {
        let (cart_actor, cart_client) = crate::cart_actor::new(cart, buffer_size);
        let (user_actor, user_client) = crate::user_actor::new(user, buffer_size);

        let cart_handle = tokio::spawn(cart_actor.run(()));
        let user_handle = tokio::spawn(user_actor.run(()));

        Self {
            cart_client,
            user_client,
            services,
            cart_handle,
            user_handle,
        }
    }

    /// Builds the order form from the stores: customer name, serialized cart and
    /// position come from state, the rest from the user's input.
    ///
    /// A fetched address is used when `address` is empty.
    pub async fn order_form(&self, phone: &str, address: &str, priority: bool) -> Result<OrderForm, SystemError> {
        let cart = self.cart_client.cart().await?;
        let user = self.user_client.snapshot().await?;
        let address = if address.is_empty() { user.address.clone() } else { address.to_string() };

        Ok(OrderForm {
            customer: user.username.clone(),
            phone: phone.to_string(),
            address,
            priority: priority.then(|| "true".to_string()),
            cart: serde_json::to_string(&cart).map_err(SubmitError::MalformedCart)?,
            position: user.position_field(),
        })
    }

    /// Submits the order form and applies the resulting effects.
    ///
    /// Once the order exists it is always returned. A store failure while
    /// applying an effect is logged and does not hide the created order.
    #[instrument(skip_all)]
    pub async fn submit_order(&self, form: OrderForm) -> Result<SubmissionOutcome, SystemError> {
        let outcome = flows::submit_order(self.services.restaurant.as_ref(), form).await?;
        if let SubmissionOutcome::Created { order, effects, redirect } = &outcome {
            for effect in effects {
                match effect {
                    Effect::ClearCart => {
                        if let Err(e) = self.cart_client.clear().await {
                            error!(order_id = %order.id, error = %e, "Could not clear the cart");
                        }
                    }
                }
            }
            info!(path = %redirect.path, "Redirecting");
        }
        Ok(outcome)
    }

    /// Looks up the device address and stores it in the User store.
    pub async fn fetch_address(&self) -> Result<AddressFetch, UserError> {
        self.user_client
            .fetch_address(self.services.geolocator.as_ref(), self.services.geocoder.as_ref())
            .await
    }

    pub async fn load_menu(&self) -> Result<Vec<MenuItem>, PageError> {
        flows::load_menu(self.services.restaurant.as_ref()).await
    }

    pub async fn load_order(&self, id: &OrderId) -> Result<LoadedOrder, PageError> {
        flows::load_order(self.services.restaurant.clone(), id).await
    }

    pub async fn make_priority(&self, id: &OrderId) -> Result<(), PageError> {
        flows::make_priority(self.services.restaurant.as_ref(), id).await
    }

    /// Gracefully shuts down both stores.
    ///
    /// Dropping the clients closes the store channels; each actor then leaves its
    /// loop and the task finishes. Returns an error if a store task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.cart_client);
        drop(self.user_client);

        let cart = self.cart_handle.await.map_err(|e| {
            error!("Actor task failed: {:?}", e);
            format!("Actor task failed: {:?}", e)
        })?;
        let user = self.user_handle.await.map_err(|e| {
            error!("Actor task failed: {:?}", e);
            format!("Actor task failed: {:?}", e)
        })?;

        info!(cart_lines = cart.len(), username = %user.username, "System shutdown complete.");
        Ok(())
    }
}
