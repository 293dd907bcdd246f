//! Error types for the fretboard trainer

use thiserror::Error;

/// Result type alias for trainer operations
pub type TrainerResult<T> = Result<T, TrainerError>;

/// Main error type for the fretboard trainer
#[derive(Error, Debug)]
pub enum TrainerError {
    /// Invalid session or plan configuration, raised at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stats file IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stats file serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrainerError {
    /// Create a configuration error from a message
    pub fn config<S: Into<String>>(message: S) -> Self {
        TrainerError::Config(message.into())
    }
}
