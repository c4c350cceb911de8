//! Shared result vocabulary for the interactive flows.

use canopy_sdk::client::ClientError;
use canopy_sdk::objects::ValidationError;

/// How the initial fetch (or latest refetch) of a list ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// No fetch has completed yet.
    Loading,
    /// The held collection reflects the latest successful fetch.
    Ready,
    /// The fetch failed; `message` is the user-facing explanation.
    Failed { message: String },
}

impl LoadPhase {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadPhase::Ready)
    }
}

/// Why a form submission did not go through.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A moderated action was attempted without an unlocked dialog.
    #[error("the moderation dialog has not been unlocked")]
    Locked,

    /// The form failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The geocoding service had no match for the given name.
    #[error("no geocoding match for the given name")]
    GeocodeMiss,

    /// The backend (or the network) rejected the submission.
    #[error(transparent)]
    Store(#[from] ClientError),
}
