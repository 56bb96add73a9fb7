//! Error types for seedgrow-transform

use thiserror::Error;

/// Errors that can occur during geometric transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedgrow_core::Error),

    /// Invalid scale factor
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: {0}")]
    UnsupportedDepth(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
