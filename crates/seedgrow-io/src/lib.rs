//! seedgrow-io - Image I/O for the segmentation pipeline
//!
//! Supported formats (each behind a cargo feature, all on by default):
//!
//! - **PNG** (`png-format`) - read and write
//! - **JPEG** (`jpeg`) - read only
//! - **PNM** (`pnm`) - PGM/PPM, ASCII and binary read, binary write
//!
//! # Usage
//!
//! ```no_run
//! use seedgrow_io::{read_image_gray, write_image, ImageFormat};
//!
//! let gray = read_image_gray("scene.jpg").unwrap();
//! write_image(&gray, "scene_gray.png", ImageFormat::Png).unwrap();
//! ```

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_extension};
pub use seedgrow_core::ImageFormat;

use seedgrow_core::Pix;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Read an image from memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(cursor),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(cursor),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(cursor),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot read {:?} images",
            other
        ))),
    }
}

/// Read an image and convert it to 8 bpp grayscale.
pub fn read_image_gray<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    Ok(read_image(path)?.convert_to_8()?)
}

/// Write an image to a file path in the given format.
///
/// [`ImageFormat::Unknown`] picks the format from the file extension,
/// falling back to PNG.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => match format_from_extension(path) {
            ImageFormat::Unknown => ImageFormat::Png,
            guessed => guessed,
        },
        other => other,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(pix, &mut buf, format)?;
    Ok(buf)
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?} images",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedgrow_core::PixelDepth;

    #[test]
    fn test_mem_roundtrip_dispatch() {
        let mut pm = Pix::new(6, 4, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(5, 3, 128).unwrap();
        let pix: Pix = pm.into();
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_mem(&pix, format).unwrap();
            assert!(read_image_mem(&bytes).unwrap().equals(&pix));
        }
    }

    #[test]
    fn test_unknown_bytes_rejected() {
        assert!(read_image_mem(b"GIF89a....").is_err());
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(write_image_mem(&pix, ImageFormat::Jpeg).is_err());
    }

    #[test]
    fn test_short_ascii_body_is_an_error() {
        assert!(read_image_mem(b"P3\n60000 60000\n255\n1 2 3\n").is_err());
    }
}
