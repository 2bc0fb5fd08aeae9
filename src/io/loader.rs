//! Raster decoding into `PixelBuffer`. Format is sniffed from the file
//! contents first, falling back to the extension.
use std::io::ErrorKind;
use std::path::Path;

use image::{ImageError, ImageReader};
use tracing::debug;

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};

pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    if !path.is_file() {
        return Err(Error::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let reader = ImageReader::open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?
        .with_guessed_format()?;

    let decoded = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(u) => Error::UnsupportedFormat {
            path: path.to_path_buf(),
            message: u.to_string(),
        },
        ImageError::IoError(io) => Error::Io(io),
        other => Error::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(Error::DegenerateGeometry {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
        });
    }
    debug!(
        "Loaded {:?}: {}x{} ({:?})",
        path,
        rgba.width(),
        rgba.height(),
        decoded.color()
    );

    PixelBuffer::from_rgba_image(&rgba)
}
