//! Wire types shared between the platform backend and its clients.

pub mod events;
pub mod locations;
pub mod partners;
pub mod reports;

use serde::{Deserialize, Serialize};

/// Error body returned by the backend on any 4xx/5xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(default)]
    pub message: String,
}

/// A form failed local validation before any network call was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("capacity must be at least 1")]
    ZeroCapacity,
}
