//! Depth conversion
//!
//! The segmentation engine works on 8 bpp intensity grids; these helpers
//! bring decoded images of other depths down to 8 bpp.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Convert to an 8 bpp grayscale image.
    ///
    /// - 8 bpp: returned as a shared clone
    /// - 16 bpp: keeps the most significant byte
    /// - 32 bpp: luma of the RGB channels (see [`color::luma`])
    /// - 1 bpp: 0 -> 0, 1 -> 255
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 2 and 4 bpp images.
    pub fn convert_to_8(&self) -> Result<Pix> {
        let depth = self.depth();
        if depth == PixelDepth::Bit8 {
            return Ok(self.clone());
        }
        let map: fn(u32) -> u32 = match depth {
            PixelDepth::Bit1 => |v| if v != 0 { 255 } else { 0 },
            PixelDepth::Bit16 => |v| v >> 8,
            PixelDepth::Bit32 => |v| {
                let (r, g, b) = color::extract_rgb(v);
                color::luma(r, g, b) as u32
            },
            other => return Err(Error::UnsupportedDepth(other.bits())),
        };

        let mut out = Pix::new(self.width(), self.height(), PixelDepth::Bit8)?.to_mut();
        for y in 0..self.height() {
            for x in 0..self.width() {
                out.set_pixel_unchecked(x, y, map(self.get_pixel_unchecked(x, y)));
            }
        }
        Ok(out.into())
    }
}
