//! ActorState trait implementation for the user profile.
//!
//! See the trait implementation on [`UserState`] for the status transitions.

use super::actions::{UserAction, UserActionResult};
use super::error::UserError;
use crate::framework::ActorState;
use crate::model::{AddressStatus, UserState};
use async_trait::async_trait;
use tracing::{info, warn};

#[async_trait]
impl ActorState for UserState {
    type Action = UserAction;
    type ActionResult = UserActionResult;
    type Context = ();
    type Error = UserError;

    /// Applies a profile change or an address lookup transition.
    ///
    /// Resolution and failure are only accepted while a lookup is loading; a late
    /// result arriving after the state moved on is dropped.
    async fn handle_action(&mut self, action: UserAction, _ctx: &()) -> Result<UserActionResult, UserError> {
        match action {
            UserAction::SetUsername(name) => {
                self.username = name;
                Ok(UserActionResult::UsernameSet)
            }
            UserAction::AddressRequested => {
                if self.is_loading_address() {
                    warn!("Address lookup already in flight");
                    return Ok(UserActionResult::AddressRequested(false));
                }
                self.status = AddressStatus::Loading;
                self.error.clear();
                Ok(UserActionResult::AddressRequested(true))
            }
            UserAction::AddressResolved { position, address } => {
                if self.is_loading_address() {
                    info!(%position, %address, "Address resolved");
                    self.position = Some(position);
                    self.address = address;
                    self.status = AddressStatus::Idle;
                }
                Ok(UserActionResult::AddressResolved)
            }
            UserAction::AddressFailed(message) => {
                if self.is_loading_address() {
                    warn!(error = %message, "Address lookup failed");
                    self.status = AddressStatus::Error;
                    self.error = message;
                }
                Ok(UserActionResult::AddressFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    #[tokio::test]
    async fn test_lookup_transitions() {
        let mut user = UserState::new("Ada");

        let started = user.handle_action(UserAction::AddressRequested, &()).await.unwrap();
        assert_eq!(started, UserActionResult::AddressRequested(true));
        assert_eq!(user.status, AddressStatus::Loading);

        let again = user.handle_action(UserAction::AddressRequested, &()).await.unwrap();
        assert_eq!(again, UserActionResult::AddressRequested(false));

        let position = Position { latitude: 1.0, longitude: 2.0 };
        user.handle_action(UserAction::AddressResolved { position, address: "Lisbon".into() }, &())
            .await
            .unwrap();
        assert_eq!(user.status, AddressStatus::Idle);
        assert_eq!(user.position, Some(position));
        assert_eq!(user.address, "Lisbon");
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_retry_clears_it() {
        let mut user = UserState::new("Ada");
        user.handle_action(UserAction::AddressRequested, &()).await.unwrap();
        user.handle_action(UserAction::AddressFailed("User denied Geolocation".into()), &())
            .await
            .unwrap();
        assert_eq!(user.status, AddressStatus::Error);
        assert_eq!(user.error, "User denied Geolocation");

        user.handle_action(UserAction::AddressRequested, &()).await.unwrap();
        assert_eq!(user.status, AddressStatus::Loading);
        assert!(user.error.is_empty());
    }

    #[tokio::test]
    async fn test_late_result_without_request_is_ignored() {
        let mut user = UserState::new("Ada");
        let position = Position { latitude: 1.0, longitude: 2.0 };
        user.handle_action(UserAction::AddressResolved { position, address: "Lisbon".into() }, &())
            .await
            .unwrap();
        assert!(user.position.is_none());
        assert_eq!(user.status, AddressStatus::Idle);
    }
}
