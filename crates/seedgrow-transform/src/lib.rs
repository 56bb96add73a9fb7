//! seedgrow-transform - Geometric resampling
//!
//! The segmentation pipeline normalizes every input to a fixed working
//! size before filtering; this crate provides that resize step, a
//! bilinear interpolation with half-pixel centers.

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::scale_to_size;
