//! Error types for the `nexus-store` crate.

use nexus_types::PlayerId;

/// Errors surfaced by repository implementations.
///
/// Load failures propagate: the pipeline cannot run without its inputs.
/// Save failures are swallowed by the session pipeline with a logged
/// warning; the in-memory state transition is the source of truth.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No player record exists for the id.
    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// No world snapshot exists for the player.
    #[error("world state not found for player {0}")]
    WorldNotFound(PlayerId),

    /// The backing store refused or failed the operation.
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Description of the failure, for the warning log.
        reason: String,
    },
}
