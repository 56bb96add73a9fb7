//! Error types for the regression harness

use thiserror::Error;

/// Errors raised while running a regression check
#[derive(Debug, Error)]
pub enum TestError {
    /// A fixture could not be read
    #[error("failed to load image '{path}': {message}")]
    ImageLoad { path: String, message: String },

    /// An output image could not be written
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations
pub type TestResult<T> = Result<T, TestError>;
