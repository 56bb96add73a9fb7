//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Writing is not
//! supported; `jpeg-decoder` is decode-only.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use seedgrow_core::{Pix, PixelDepth, color};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// # Returns
/// A `Pix` at 8 bpp (grayscale) or 32 bpp (RGB). CMYK images are
/// converted to RGB; 16-bit grayscale keeps its high byte.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let (depth, samples) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1),
        PixelFormat::L16 => (PixelDepth::Bit8, 2),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3),
        PixelFormat::CMYK32 => (PixelDepth::Bit32, 4),
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    let needed = width as usize * height as usize * samples;
    if pixels.len() < needed {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            pixels.len(),
            needed
        )));
    }

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    for y in 0..height {
        for x in 0..width {
            let idx = (y as usize * width as usize + x as usize) * samples;
            let px = &pixels[idx..idx + samples];
            // L16 samples are big-endian pairs, so px[0] is the high byte
            let val = match samples {
                1 | 2 => px[0] as u32,
                3 => color::compose_rgb(px[0], px[1], px[2]),
                _ => {
                    let k = 255 - px[3] as u32;
                    let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
                    color::compose_rgb(channel(px[0]), channel(px[1]), channel(px[2]))
                }
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_jpeg_rejects_garbage() {
        let data = vec![0xFF, 0xD8, 0xFF, 0x00, 0x01, 0x02];
        assert!(read_jpeg(Cursor::new(data)).is_err());
    }
}
