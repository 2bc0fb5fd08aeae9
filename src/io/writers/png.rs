use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageError};
use tracing::info;

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::io::writers::{StagedFile, stage};

/// Encode `buffer` as an 8-bit RGBA PNG into a temp file next to `output`.
pub fn stage_rgba_png(output: &Path, buffer: &PixelBuffer) -> Result<StagedFile> {
    let img = buffer.to_rgba_image()?;
    let (width, height) = img.dimensions();

    stage(output, |writer| {
        let encoder =
            PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
        encoder
            .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
            .map_err(|e| match e {
                ImageError::IoError(io) => Error::write(output, io),
                other => Error::processing(other),
            })
    })
}

/// Write `buffer` as an 8-bit RGBA PNG. Lossless, alpha kept as-is.
pub fn write_rgba_png(output: &Path, buffer: &PixelBuffer) -> Result<()> {
    stage_rgba_png(output, buffer)?.commit()?;
    info!(
        "Saved {}x{} RGBA PNG to {:?}",
        buffer.width(),
        buffer.height(),
        output
    );
    Ok(())
}
