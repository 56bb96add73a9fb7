//! PNG image format support
//!
//! Decoding normalizes every PNG flavor to 8 bits per channel: grayscale
//! (with or without alpha) becomes an 8 bpp `Pix`, RGB / RGBA / palette
//! images become 32 bpp RGB. Alpha is discarded.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use seedgrow_core::{Pix, PixelDepth, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let (depth, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit8, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let (width, height) = (output_info.width, output_info.height);
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let px = &row[x as usize * samples..];
            let val = match depth {
                PixelDepth::Bit8 => px[0] as u32,
                _ => color::compose_rgb(px[0], px[1], px[2]),
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// 8 bpp images are written as 8-bit grayscale, 32 bpp images as RGB,
/// 1 bpp images as 1-bit grayscale.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth, bytes_per_row) = match pix.depth() {
        PixelDepth::Bit1 => (ColorType::Grayscale, BitDepth::One, width.div_ceil(8)),
        PixelDepth::Bit8 => (ColorType::Grayscale, BitDepth::Eight, width),
        PixelDepth::Bit32 => (ColorType::Rgb, BitDepth::Eight, width * 3),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNG writer does not handle {} bpp",
                other.bits()
            )));
        }
    };
    let bytes_per_row = bytes_per_row as usize;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);
    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; bytes_per_row * height as usize];
    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let val = pix.get_pixel_unchecked(x, y);
            match pix.depth() {
                PixelDepth::Bit1 => {
                    if val != 0 {
                        row[(x / 8) as usize] |= 1 << (7 - (x % 8));
                    }
                }
                PixelDepth::Bit8 => row[x as usize] = val as u8,
                _ => {
                    let (r, g, b) = color::extract_rgb(val);
                    let idx = x as usize * 3;
                    row[idx..idx + 3].copy_from_slice(&[r, g, b]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
