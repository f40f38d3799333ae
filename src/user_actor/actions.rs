//! Actions accepted by the User store.
//!
//! The three `Address*` actions are the status transitions of an address lookup:
//! `idle|error -> loading` on [`UserAction::AddressRequested`], then
//! `loading -> idle` or `loading -> error`.

use crate::model::Position;

/// Mutations of the [`UserState`](crate::model::UserState).
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Sets the username unconditionally.
    SetUsername(String),
    /// Marks an address lookup as started. Ignored while one is already loading.
    AddressRequested,
    /// Stores the resolved position and address.
    AddressResolved { position: Position, address: String },
    /// Records why the lookup failed.
    AddressFailed(String),
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone, PartialEq)]
pub enum UserActionResult {
    UsernameSet,
    /// `false` when a lookup was already in flight and this request was ignored.
    AddressRequested(bool),
    AddressResolved,
    AddressFailed,
}
