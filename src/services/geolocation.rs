//! Device geolocation source.

use crate::model::Position;
use async_trait::async_trait;
use thiserror::Error;

/// Why a position could not be acquired.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeolocationError {
    #[error("User denied Geolocation")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}

/// Platform capability returning the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<Position, GeolocationError>;
}

/// Always reports the configured position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Position);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        Ok(self.0)
    }
}

/// A device without a position source; every request fails.
#[derive(Debug, Clone, Default)]
pub struct UnavailableGeolocator {
    pub denied: bool,
}

#[async_trait]
impl Geolocator for UnavailableGeolocator {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        if self.denied {
            Err(GeolocationError::PermissionDenied)
        } else {
            Err(GeolocationError::Unavailable("no position source configured".to_string()))
        }
    }
}
