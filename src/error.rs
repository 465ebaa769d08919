use std::path::PathBuf;

use thiserror::Error;

/// Failures inside the navigation subsystem.
///
/// None of these cross the mode boundary: modes log them, keep the last one
/// for inspection and fall back to a safe pose or a no-op.
#[derive(Debug, Error)]
pub enum NavError {
    /// Waypoint dataset missing, malformed or empty
    #[error("waypoint data error: {0}")]
    Data(String),

    /// A configuration value was unusable and had to be defaulted
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Operation invoked before the mode had a camera
    #[error("{0} called before initialize")]
    NotReady(&'static str),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type NavResult<T> = std::result::Result<T, NavError>;
