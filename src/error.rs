//! Error types for the facial emotion estimation library.
//!
//! The per-frame classification path never returns an error: invalid or
//! degenerate input is encoded as a sentinel [`EmotionResult`] so a scanning
//! loop cannot be aborted by a single bad frame. `Error` covers everything
//! around that path: configuration, frame files, and detector construction.
//!
//! [`EmotionResult`]: crate::classifier::EmotionResult

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Landmark frame file could not be parsed
    #[error("Frame parse error: {0}")]
    FrameParse(#[from] serde_json::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Deep expression model loading or inference error
    #[error("Expression model error: {0}")]
    ModelError(String),

    /// Unknown detector mode or malformed detector request
    #[error("Detector error: {0}")]
    DetectorError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
