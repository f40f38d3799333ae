use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Status of the address lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// A geolocation fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Position {
    /// The `"latitude, longitude"` form carried by the order form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// The user profile and address lookup state.
///
/// # Actor Framework
/// This struct implements the [`ActorState`](crate::framework::ActorState) trait,
/// allowing it to be owned by a [`StoreActor`](crate::framework::StoreActor).
///
/// See [`impl ActorState for UserState`](#impl-ActorState-for-UserState) for the
/// status transitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub username: String,
    pub status: AddressStatus,
    pub position: Option<Position>,
    pub address: String,
    pub error: String,
}

impl UserState {
    /// Creates the state for a named user with no address yet.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn is_loading_address(&self) -> bool {
        self.status == AddressStatus::Loading
    }

    /// The position as serialized into the order form, empty when unknown.
    pub fn position_field(&self) -> String {
        self.position.map(|p| p.to_string()).unwrap_or_default()
    }
}
