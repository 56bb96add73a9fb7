//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII / P5 binary) and PPM (P3 ASCII / P6 binary),
//! and writes P5 (8 bpp) or P6 (32 bpp). Sample values with a maxval
//! other than 255 are rescaled to 0..=255.

use crate::{IoError, IoResult};
use seedgrow_core::{Pix, PixelDepth, color};
use std::io::{BufRead, Read, Write};

/// Header fields shared by all PNM variants
#[derive(Debug, Clone, Copy)]
struct PnmHeader {
    magic: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read a PNM image from a reader.
///
/// # Returns
/// A `Pix` at 8 bpp (PGM) or 32 bpp (PPM).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Pix> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    let mut pos = 0usize;

    let magic = next_token(&raw, &mut pos)?;
    let magic = match magic.as_slice() {
        b"P2" => b'2',
        b"P3" => b'3',
        b"P5" => b'5',
        b"P6" => b'6',
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM magic {:?}",
                String::from_utf8_lossy(other)
            )));
        }
    };
    let header = PnmHeader {
        magic,
        width: parse_number(&raw, &mut pos)?,
        height: parse_number(&raw, &mut pos)?,
        maxval: parse_number(&raw, &mut pos)?,
    };
    if header.maxval == 0 || header.maxval > 65535 {
        return Err(IoError::InvalidData(format!(
            "PNM maxval out of range: {}",
            header.maxval
        )));
    }

    let channels = if matches!(header.magic, b'3' | b'6') { 3 } else { 1 };
    let count = header.width as usize * header.height as usize * channels;
    let samples = if matches!(header.magic, b'2' | b'3') {
        // every ASCII sample takes at least one byte, so the body bounds the count
        let mut samples = Vec::with_capacity(count.min(raw.len() - pos));
        for _ in 0..count {
            samples.push(parse_number(&raw, &mut pos)?);
        }
        samples
    } else {
        // exactly one whitespace byte separates the header from the raster
        pos += 1;
        read_binary_samples(&raw[pos.min(raw.len())..], count, header.maxval)?
    };

    let depth = if channels == 3 {
        PixelDepth::Bit32
    } else {
        PixelDepth::Bit8
    };
    let scale = |v: u32| -> u8 {
        if header.maxval == 255 {
            v.min(255) as u8
        } else {
            ((v.min(header.maxval) * 255 + header.maxval / 2) / header.maxval) as u8
        }
    };

    let mut pix_mut = Pix::new(header.width, header.height, depth)?.to_mut();
    for y in 0..header.height {
        for x in 0..header.width {
            let idx = (y as usize * header.width as usize + x as usize) * channels;
            let val = if channels == 3 {
                color::compose_rgb(
                    scale(samples[idx]),
                    scale(samples[idx + 1]),
                    scale(samples[idx + 2]),
                )
            } else {
                scale(samples[idx]) as u32
            };
            pix_mut.set_pixel_unchecked(x, y, val);
        }
    }

    Ok(pix_mut.into())
}

fn read_binary_samples(data: &[u8], count: usize, maxval: u32) -> IoResult<Vec<u32>> {
    let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
    if data.len() < count * bytes_per_sample {
        return Err(IoError::InvalidData(format!(
            "PNM raster too short: {} < {}",
            data.len(),
            count * bytes_per_sample
        )));
    }
    Ok(if bytes_per_sample == 1 {
        data[..count].iter().map(|&b| b as u32).collect()
    } else {
        data[..count * 2]
            .chunks_exact(2)
            .map(|c| ((c[0] as u32) << 8) | c[1] as u32)
            .collect()
    })
}

/// Next whitespace-delimited header token, skipping `#` comments.
fn next_token(raw: &[u8], pos: &mut usize) -> IoResult<Vec<u8>> {
    loop {
        while *pos < raw.len() && raw[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < raw.len() && raw[*pos] == b'#' {
            while *pos < raw.len() && raw[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }
    let start = *pos;
    while *pos < raw.len() && !raw[*pos].is_ascii_whitespace() {
        *pos += 1;
    }
    if start == *pos {
        return Err(IoError::InvalidData("unexpected end of PNM data".to_string()));
    }
    Ok(raw[start..*pos].to_vec())
}

fn parse_number(raw: &[u8], pos: &mut usize) -> IoResult<u32> {
    let token = next_token(raw, pos)?;
    std::str::from_utf8(&token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "bad PNM number: {:?}",
                String::from_utf8_lossy(&token)
            ))
        })
}

/// Write a `Pix` as binary PNM to a writer.
///
/// Chooses P5 (8 bpp grayscale) or P6 (32 bpp RGB) based on the depth.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let (magic, channels) = match pix.depth() {
        PixelDepth::Bit8 => ("P5", 1usize),
        PixelDepth::Bit32 => ("P6", 3usize),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM writer does not handle {} bpp",
                other.bits()
            )));
        }
    };
    write!(writer, "{}\n{} {}\n255\n", magic, pix.width(), pix.height())?;

    let mut data = Vec::with_capacity(pix.width() as usize * pix.height() as usize * channels);
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let val = pix.get_pixel_unchecked(x, y);
            if channels == 1 {
                data.push(val as u8);
            } else {
                let (r, g, b) = color::extract_rgb(val);
                data.extend_from_slice(&[r, g, b]);
            }
        }
    }
    writer.write_all(&data)?;
    Ok(())
}
