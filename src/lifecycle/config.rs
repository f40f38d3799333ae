//! Application configuration.
//!
//! Every setting has a command line flag and an environment variable; a `.env`
//! file in the working directory is loaded first.

use crate::model::Position;
use crate::services::{
    FixedGeolocator, Geolocator, UnavailableGeolocator, DEFAULT_API_URL, DEFAULT_GEOCODING_URL,
};
use clap::Args;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Cli(#[from] clap::Error),

    #[error("Both PIZZA_LATITUDE and PIZZA_LONGITUDE must be set, or neither")]
    IncompletePosition,

    #[error("Store buffer size must be at least 1")]
    InvalidBufferSize,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Base URL of the restaurant API
    #[arg(long, env = "PIZZA_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Reverse geocoding endpoint
    #[arg(long, env = "GEOCODING_API_URL", default_value = DEFAULT_GEOCODING_URL)]
    pub geocoding_url: String,

    /// Latitude reported as the device position
    #[arg(long, env = "PIZZA_LATITUDE", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude reported as the device position
    #[arg(long, env = "PIZZA_LONGITUDE", allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Capacity of each store's request channel
    #[arg(long, env = "STORE_BUFFER_SIZE", default_value = "32")]
    pub store_buffer_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            latitude: None,
            longitude: None,
            store_buffer_size: 32,
        }
    }
}

impl AppConfig {
    /// Checks settings clap cannot express on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if only one coordinate is set or the buffer size is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_buffer_size == 0 {
            return Err(ConfigError::InvalidBufferSize);
        }
        self.position().map(|_| ())
    }

    /// The configured device position, if any.
    pub fn position(&self) -> Result<Option<Position>, ConfigError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Some(Position { latitude, longitude })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::IncompletePosition),
        }
    }

    /// A geolocator reporting the configured position, or one with no position source.
    pub fn geolocator(&self) -> Result<Arc<dyn Geolocator>, ConfigError> {
        Ok(match self.position()? {
            Some(position) => Arc::new(FixedGeolocator(position)),
            None => Arc::new(UnavailableGeolocator::default()),
        })
    }
}
