//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word,
//! and in an 8-bit image pixel 0 occupies bits 24..32.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Read the sample at column `x` of a packed row.
#[inline]
pub fn get_data_sample(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    let bits = depth.bits();
    if bits == 32 {
        return line[x as usize];
    }
    let bit = x * bits;
    let shift = 32 - bits - (bit % 32);
    (line[(bit / 32) as usize] >> shift) & depth.max_value()
}

/// Write the sample at column `x` of a packed row. `val` is masked to the depth.
#[inline]
pub fn set_data_sample(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    let bits = depth.bits();
    if bits == 32 {
        line[x as usize] = val;
        return;
    }
    let bit = x * bits;
    let shift = 32 - bits - (bit % 32);
    let mask = depth.max_value() << shift;
    let word = &mut line[(bit / 32) as usize];
    *word = (*word & !mask) | ((val << shift) & mask);
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        get_data_sample(self.row_data(y), x, self.depth())
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let start = (y * self.wpl()) as usize;
        let line = &self.data()[start..start + self.wpl() as usize];
        get_data_sample(line, x, self.depth())
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        set_data_sample(self.row_data_mut(y), x, depth, val);
    }

    /// Set RGB values at (x, y) in a 32-bit image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non-32-bit images and
    /// [`Error::IndexOutOfBounds`] for coordinates outside the image.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }
}
