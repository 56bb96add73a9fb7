//! Rank filtering operations
//!
//! Square-window rank filters over 8 bpp images. Only pixels whose full
//! window fits inside the image are filtered; pixels closer than half a
//! window to an edge keep their input value. Every output pixel is
//! computed from the untouched input, so scan order does not matter.

use crate::{FilterError, FilterResult};
use seedgrow_core::{Pix, PixelDepth};

/// Apply a rank filter to an 8 bpp grayscale image.
///
/// # Arguments
/// * `pix` - Input 8-bit grayscale image
/// * `kernel_size` - Side of the square window; even sizes (including 0)
///   return an unmodified copy
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
pub fn rank_filter_gray(pix: &Pix, kernel_size: u32, rank: f32) -> FilterResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8-bit",
            actual: pix.depth().bits(),
        });
    }
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0.0, 1.0], got {}",
            rank
        )));
    }
    if kernel_size % 2 == 0 || kernel_size == 1 {
        return Ok(pix.deep_clone());
    }

    let half = kernel_size / 2;
    let (w, h) = (pix.width(), pix.height());
    let mut out = pix.to_mut();
    if w <= 2 * half || h <= 2 * half {
        return Ok(out.into());
    }

    let n = (kernel_size * kernel_size) as usize;
    let index = (rank * (n - 1) as f32).round() as usize;
    let mut window = Vec::with_capacity(n);

    for y in half..h - half {
        for x in half..w - half {
            window.clear();
            for wy in y - half..=y + half {
                for wx in x - half..=x + half {
                    window.push(pix.get_pixel_unchecked(wx, wy));
                }
            }
            let (_, &mut value, _) = window.select_nth_unstable(index);
            out.set_pixel_unchecked(x, y, value);
        }
    }

    Ok(out.into())
}

/// Apply a median filter with a square `kernel_size` window.
///
/// For odd sizes the window holds an odd number of samples, so the median
/// is the exact middle element. Even sizes are a no-op.
///
/// # Examples
///
/// ```
/// use seedgrow_core::{Pix, PixelDepth};
/// use seedgrow_filter::median_filter;
///
/// let pix = Pix::new(5, 5, PixelDepth::Bit8).unwrap();
/// let mut pm = pix.to_mut();
/// pm.set_pixel(2, 2, 255).unwrap();
/// let filtered = median_filter(&pm.into(), 3).unwrap();
/// assert_eq!(filtered.get_pixel(2, 2), Some(0));
/// ```
pub fn median_filter(pix: &Pix, kernel_size: u32) -> FilterResult<Pix> {
    rank_filter_gray(pix, kernel_size, 0.5)
}
