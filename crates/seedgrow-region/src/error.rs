//! Error types for seedgrow-region

use thiserror::Error;

/// Errors that can occur during region growing
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedgrow_core::Error),

    /// Morphology error while thickening borders
    #[error("morphology error: {0}")]
    Morph(#[from] seedgrow_morph::MorphError),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Operation called out of order
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
