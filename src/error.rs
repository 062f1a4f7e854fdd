//! Error types for the capsule store and its collaborators.
//!
//! The store itself never surfaces these to its default callers; they exist so
//! that failures can be logged with structure and so that strict callers (the
//! CLI, diagnostics) can use the `try_*` variants of the facade.

use thiserror::Error;

/// A stored value could not be turned back into a record.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown mood glyph: {0}")]
    UnknownMood(String),

    #[error("capsule record is not a JSON object")]
    RecordShape,

    #[error("unexpected index shape: expected array or object")]
    IndexShape,
}

/// The key-value backend failed to complete an I/O call.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("backend task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("backend lock poisoned")]
    Poisoned,

    #[error("{0}")]
    Unavailable(String),
}

/// Error returned by the strict (`try_*`) facade operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// An external device capability (camera, image library) refused or failed.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure modes of the generative-text call behind the daily insight.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("insight provider is not configured")]
    NotConfigured,

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("response blocked by safety filters")]
    SafetyBlocked,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("provider returned no text")]
    EmptyResponse,
}
