//! Error types for the progression engine and store layer.

/// Errors returned by [`crate::ProgressUpdateEngine::apply`].
///
/// Only structurally invalid input is rejected; malformed nutrition values
/// never abort an update (absent entries are treated as zero / not met).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("meal event has no user id")]
    MissingUserId,

    #[error("unparseable logged_at timestamp: {0:?}")]
    BadTimestamp(String),

    #[error("event user id {event:?} does not match state user id {state:?}")]
    UserIdMismatch { event: String, state: String },
}

/// Errors returned by the persistence seam.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The stored revision moved under us; reload and retry.
    #[error("revision conflict for user {user_id}: expected {expected}, found {found}")]
    RevisionConflict {
        user_id: String,
        expected: u64,
        found: u64,
    },

    #[error("failed to serialize progress document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
