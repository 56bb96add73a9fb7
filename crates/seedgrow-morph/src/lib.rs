//! seedgrow-morph - Grayscale morphology
//!
//! Brick (rectangular) dilation of 8 bpp images, used to thicken border
//! masks.

mod error;
pub mod grayscale;

pub use error::{MorphError, MorphResult};
pub use grayscale::{dilate_gray, dilate_gray_square};
