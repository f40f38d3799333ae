//! Error types for the User store.

use crate::services::{GeocodingError, GeolocationError};
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// The device position could not be acquired.
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// The position could not be turned into an address.
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    /// An error occurred while communicating with the store actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::ActorCommunicationError(msg)
    }
}
