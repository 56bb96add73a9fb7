//! seedgrow-core - Raster containers for region-growing segmentation
//!
//! This crate provides the data structures shared by every other seedgrow
//! crate:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`PixelDepth`] - Bits per pixel
//! - [`ImageFormat`] - File formats known to the I/O layer
//!
//! Intensity grids are 8 bpp, label grids are 32 bpp (one region id per
//! pixel) and colorized region maps are 32 bpp RGB.

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{ImageFormat, Pix, PixMut, PixelDepth};

/// Color channel helpers for 32-bit RGB pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Luma of an RGB triple, weights 0.299 / 0.587 / 0.114, rounded.
    #[inline]
    pub fn luma(r: u8, g: u8, b: u8) -> u8 {
        let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        (y + 0.5).min(255.0) as u8
    }

}
