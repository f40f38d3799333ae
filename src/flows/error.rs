//! Page-level errors.

use crate::flows::SubmitError;
use crate::services::ApiError;
use std::fmt::Display;

/// Where the "go back" action of the error view leads.
pub const HOME_PATH: &str = "/";

/// What a page renders in place of its content when a fetch fails.
///
/// Carries the display message and a recovery path. Whether the underlying
/// failure was a missing order is kept so callers can react differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageError {
    pub message: String,
    pub recovery_path: String,
    pub not_found: bool,
}

impl PageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recovery_path: HOME_PATH.to_string(),
            not_found: false,
        }
    }
}

impl Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Something went wrong 😢 {}", self.message)
    }
}

impl std::error::Error for PageError {}

impl From<ApiError> for PageError {
    fn from(e: ApiError) -> Self {
        Self {
            not_found: e.is_not_found(),
            ..Self::new(e.to_string())
        }
    }
}

impl From<SubmitError> for PageError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Api(api) => api.into(),
            other => Self::new(other.to_string()),
        }
    }
}
