//! Grayscale morphological operations
//!
//! Dilation of 8 bpp images with a brick structuring element. The brick of
//! size `hsize x vsize` has its origin at `(hsize / 2, vsize / 2)`; output
//! pixel `(x, y)` takes the maximum of the input over columns
//! `x - hsize/2 .. x - hsize/2 + hsize` and the matching rows. Samples that
//! fall outside the image are ignored rather than padded.
//!
//! The brick is separable, so the maximum is taken along rows first and
//! then along columns of the intermediate result.

use crate::{MorphError, MorphResult};
use seedgrow_core::{Pix, PixelDepth};

/// Dilate a grayscale image with a brick structuring element
///
/// Dilation computes the maximum pixel value in the neighborhood,
/// which expands bright regions and shrinks dark regions. A `1 x 1` brick
/// returns a copy.
///
/// # Errors
///
/// Returns [`MorphError::UnsupportedDepth`] for non-8 bpp input and
/// [`MorphError::InvalidParameters`] if either size is 0.
pub fn dilate_gray(pix: &Pix, hsize: u32, vsize: u32) -> MorphResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(MorphError::UnsupportedDepth {
            expected: "8-bpp",
            actual: pix.depth().bits(),
        });
    }
    if hsize == 0 || vsize == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "brick size must be at least 1x1, got {}x{}",
            hsize, vsize
        )));
    }
    if hsize == 1 && vsize == 1 {
        return Ok(pix.deep_clone());
    }

    let w = pix.width() as usize;
    let h = pix.height() as usize;
    let mut buf = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            buf[y * w + x] = pix.get_pixel_unchecked(x as u32, y as u32) as u8;
        }
    }

    if hsize > 1 {
        let mut line = vec![0u8; w];
        for row in buf.chunks_exact_mut(w) {
            line.copy_from_slice(row);
            max_along(&line, hsize as usize, |i, v| row[i] = v);
        }
    }
    if vsize > 1 {
        let mut column = vec![0u8; h];
        for x in 0..w {
            for (y, c) in column.iter_mut().enumerate() {
                *c = buf[y * w + x];
            }
            max_along(&column, vsize as usize, |i, v| buf[i * w + x] = v);
        }
    }

    let mut out = pix.create_template().to_mut();
    for (y, row) in buf.chunks_exact(w).enumerate() {
        for (x, &v) in row.iter().enumerate() {
            out.set_pixel_unchecked(x as u32, y as u32, v as u32);
        }
    }
    Ok(out.into())
}

/// Dilate with a `size x size` square brick.
pub fn dilate_gray_square(pix: &Pix, size: u32) -> MorphResult<Pix> {
    dilate_gray(pix, size, size)
}

/// Sliding maximum over a 1-D window of `size` with origin `size / 2`.
fn max_along(src: &[u8], size: usize, mut store: impl FnMut(usize, u8)) {
    let anchor = size / 2;
    let len = src.len();
    for i in 0..len {
        let lo = i.saturating_sub(anchor);
        let hi = (i + size - anchor).min(len);
        let m = src[lo..hi].iter().copied().max().unwrap_or(0);
        store(i, m);
    }
}
