//! Image scaling
//!
//! [`scale_to_size`] resizes 8 bpp grayscale or 32 bpp RGB images with
//! bilinear interpolation; RGB is interpolated per channel.

use crate::{TransformError, TransformResult};
use seedgrow_core::{Pix, PixelDepth, color};

/// Scale an image to a specific size using bilinear interpolation
///
/// Returns a shared clone when the size is unchanged.
pub fn scale_to_size(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "target size {}x{}",
            width, height
        )));
    }
    let depth = pix.depth();
    if !matches!(depth, PixelDepth::Bit8 | PixelDepth::Bit32) {
        return Err(TransformError::UnsupportedDepth(format!(
            "expected 8 or 32 bpp, got {}",
            depth.bits()
        )));
    }
    if width == pix.width() && height == pix.height() {
        return Ok(pix.clone());
    }

    let mut out = Pix::new(width, height, depth)?.to_mut();
    let ratio_x = pix.width() as f32 / width as f32;
    let ratio_y = pix.height() as f32 / height as f32;

    let xs: Vec<_> = (0..width)
        .map(|x| source_coord(x, ratio_x, pix.width()))
        .collect();
    for y in 0..height {
        let (y0, y1, fy) = source_coord(y, ratio_y, pix.height());
        for (x, &(x0, x1, fx)) in (0u32..).zip(xs.iter()) {
            let corners = [
                pix.get_pixel_unchecked(x0, y0),
                pix.get_pixel_unchecked(x1, y0),
                pix.get_pixel_unchecked(x0, y1),
                pix.get_pixel_unchecked(x1, y1),
            ];
            let val = if depth == PixelDepth::Bit8 {
                lerp2(corners.map(|c| c as u8), fx, fy) as u32
            } else {
                let r = lerp2(corners.map(color::red), fx, fy);
                let g = lerp2(corners.map(color::green), fx, fy);
                let b = lerp2(corners.map(color::blue), fx, fy);
                color::compose_rgb(r, g, b)
            };
            out.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(out.into())
}

/// Map a destination index to (left, right, fraction) in the source,
/// using half-pixel centers and clamping at the edges.
fn source_coord(dst: u32, ratio: f32, src_len: u32) -> (u32, u32, f32) {
    let pos = ((dst as f32 + 0.5) * ratio - 0.5).max(0.0);
    let lo = (pos.floor() as u32).min(src_len - 1);
    let hi = (lo + 1).min(src_len - 1);
    (lo, hi, pos - lo as f32)
}

/// Bilinear blend of `[top_left, top_right, bottom_left, bottom_right]`.
fn lerp2(c: [u8; 4], fx: f32, fy: f32) -> u8 {
    let top = c[0] as f32 * (1.0 - fx) + c[1] as f32 * fx;
    let bottom = c[2] as f32 * (1.0 - fx) + c[3] as f32 * fx;
    let v = top * (1.0 - fy) + bottom * fy;
    (v + 0.5).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_row(values: &[u32]) -> Pix {
        let mut pm = Pix::new(values.len() as u32, 1, PixelDepth::Bit8)
            .unwrap()
            .to_mut();
        for (x, &v) in values.iter().enumerate() {
            pm.set_pixel(x as u32, 0, v).unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_linear_upscale_row() {
        let pix = gray_row(&[0, 100]);
        let out = scale_to_size(&pix, 4, 1).unwrap();
        let got: Vec<_> = (0..4).map(|x| out.get_pixel(x, 0).unwrap()).collect();
        assert_eq!(got, vec![0, 25, 75, 100]);
    }

    #[test]
    fn test_uniform_rgb_stays_uniform() {
        let mut pm = Pix::new(7, 5, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_all(color::compose_rgb(40, 80, 120));
        let pix: Pix = pm.into();
        let out = scale_to_size(&pix, 16, 3).unwrap();
        assert_eq!((out.width(), out.height()), (16, 3));
        for y in 0..3 {
            for x in 0..16 {
                assert_eq!(out.get_rgb(x, y), Some((40, 80, 120)));
            }
        }
    }

    #[test]
    fn test_same_size_shares_data() {
        let pix = gray_row(&[1, 2, 3]);
        let out = scale_to_size(&pix, 3, 1).unwrap();
        assert_eq!(out.ref_count(), 2);
    }

    #[test]
    fn test_invalid_inputs() {
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(scale_to_size(&pix, 2, 2).is_err());
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(scale_to_size(&pix, 0, 2).is_err());
    }
}
