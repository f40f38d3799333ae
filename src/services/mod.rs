//! # External Services
//!
//! The collaborators the stores and flows talk to, each behind an `async_trait`
//! seam so tests and offline runs can swap the implementation:
//!
//! - [`RestaurantApi`] - menu and order REST API ([`HttpRestaurantApi`], [`InMemoryRestaurant`])
//! - [`GeocodingApi`] - reverse geocoding ([`HttpGeocodingApi`])
//! - [`Geolocator`] - the device position ([`FixedGeolocator`], [`UnavailableGeolocator`])

pub mod geocoding;
pub mod geolocation;
pub mod memory;
pub mod restaurant;

pub use geocoding::*;
pub use geolocation::*;
pub use memory::*;
pub use restaurant::*;
