//! Error types for ytgrab

use thiserror::Error;

/// Main error type for ytgrab operations
#[derive(Debug, Error)]
pub enum YtgrabError {
    #[error("download engine is not available: {0}")]
    EngineMissing(String),

    #[error("{0}")]
    Download(String),

    #[error("engine failure: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl YtgrabError {
    /// Check if this is an engine-reported download failure, as opposed to
    /// an unexpected failure around the engine call
    pub fn is_download_error(&self) -> bool {
        matches!(self, YtgrabError::Download(_))
    }
}
