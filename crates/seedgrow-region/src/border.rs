//! Region border extraction
//!
//! Turns a colorized region map into an 8 bpp mask where pixels on the
//! boundary between two colors are 255 and everything else is 0.

use crate::grower::neighbors4;
use crate::{RegionError, RegionResult};
use seedgrow_core::{Pix, PixelDepth};
use seedgrow_morph::dilate_gray_square;

/// Mark every pixel whose RGB differs from any of its 4-neighbors.
///
/// Both sides of a color change are marked, so a straight seam between
/// two regions is two pixels wide. With `thickness > 1` the mask is then
/// dilated by a `thickness x thickness` square; `0` and `1` leave it as is.
///
/// # Errors
///
/// Returns [`RegionError::UnsupportedDepth`] unless `color_pix` is 32 bpp.
pub fn extract_borders(color_pix: &Pix, thickness: u32) -> RegionResult<Pix> {
    if color_pix.depth() != PixelDepth::Bit32 {
        return Err(RegionError::UnsupportedDepth {
            expected: "32-bpp",
            actual: color_pix.depth().bits(),
        });
    }

    let (w, h) = (color_pix.width(), color_pix.height());
    // alpha is ignored
    let rgb = |x: u32, y: u32| color_pix.get_pixel_unchecked(x, y) >> 8;

    let mut mask = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
    for y in 0..h {
        for x in 0..w {
            let c = rgb(x, y);
            if neighbors4(x, y, w, h).any(|(nx, ny)| rgb(nx, ny) != c) {
                mask.set_pixel_unchecked(x, y, 255);
            }
        }
    }
    let mask: Pix = mask.into();

    if thickness > 1 {
        Ok(dilate_gray_square(&mask, thickness)?)
    } else {
        Ok(mask)
    }
}
