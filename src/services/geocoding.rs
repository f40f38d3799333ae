//! Reverse geocoding: coordinates to a human-readable address.

use crate::model::Position;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_GEOCODING_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

/// Errors from the geocoding service.
#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Failed getting address (status {0})")]
    Status(u16),

    #[error("Failed getting address: {0}")]
    Http(#[from] reqwest::Error),
}

/// The parts of a reverse-geocoding answer used to build an address line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodedAddress {
    pub locality: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub country_name: Option<String>,
}

impl GeocodedAddress {
    /// `"{locality}, {city} {postcode}, {countryName}"`, missing parts left blank.
    pub fn format(&self) -> String {
        let part = |p: &Option<String>| p.clone().unwrap_or_default();
        format!(
            "{}, {} {}, {}",
            part(&self.locality),
            part(&self.city),
            part(&self.postcode),
            part(&self.country_name)
        )
    }
}

#[async_trait]
pub trait GeocodingApi: Send + Sync {
    async fn reverse_geocode(&self, position: Position) -> Result<GeocodedAddress, GeocodingError>;
}

/// BigDataCloud-style reverse geocoding over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGeocodingApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGeocodingApi {
    pub fn new() -> Self {
        Self::new_with_base_url(DEFAULT_GEOCODING_URL.to_string())
    }

    pub fn new_with_base_url(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for HttpGeocodingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeocodingApi for HttpGeocodingApi {
    #[instrument(skip(self))]
    async fn reverse_geocode(&self, position: Position) -> Result<GeocodedAddress, GeocodingError> {
        let latitude = position.latitude.to_string();
        let longitude = position.longitude.to_string();

        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("latitude", latitude.as_str()), ("longitude", longitude.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GeocodingError::Status(status.as_u16()));
        }

        let address: GeocodedAddress = resp.json().await?;
        debug!(?address, "Reverse geocoded");
        Ok(address)
    }
}
