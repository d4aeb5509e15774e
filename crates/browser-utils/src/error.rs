//! Error types for browser-utils operations.

use thiserror::Error;

/// Errors raised by the fallible utilities (deep clone and storage).
///
/// The formatting helpers never return these; they degrade to an empty
/// string or their unchanged input instead.
#[derive(Error, Debug)]
pub enum UtilError {
    /// The argument has the wrong shape, e.g. a scalar passed to `deep_clone`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value could not be serialized, or stored text was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing key-value store failed (I/O, poisoned lock).
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience alias used throughout browser-utils.
pub type Result<T> = std::result::Result<T, UtilError>;
