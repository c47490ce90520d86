// Typed errors with thiserror. Surface meaningful messages to JS.
// Per-frame paths never return these; only construction and config parsing do.

use thiserror::Error;

/// Motion engine error types.
#[derive(Error, Debug)]
pub enum MotionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown spring preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid scroll offset {input:?}: {message}")]
    InvalidOffset { input: String, message: String },

    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        MotionError::Serialization(err.to_string())
    }
}
