use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::buffer::PixelBuffer;
use crate::core::params::ProcessingParams;
use crate::core::processing::classify::classify_buffer;
use crate::core::processing::crop::{BoundingBox, crop_to_content};
use crate::core::processing::matte::apply_alpha_matte;
use crate::core::processing::resize::resize_to_height;
use crate::core::processing::sharpen::sharpen;
use crate::error::{Error, Result};

/// What a single pipeline run did to its input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub source_width: usize,
    pub source_height: usize,
    /// Pixels that qualified as background candidates
    pub pixels_modified: usize,
    /// Crop applied in source coordinates; `None` when content was empty
    /// and the frame passed through
    pub crop: Option<BoundingBox>,
    pub width: usize,
    pub height: usize,
}

/// Finished sprite plus its processing report.
#[derive(Debug, Clone)]
pub struct ProcessedSprite {
    pub buffer: PixelBuffer,
    pub report: ProcessingReport,
}

/// Run classify -> matte -> crop -> resize -> sharpen on one buffer.
pub fn process_buffer(buffer: PixelBuffer, params: &ProcessingParams) -> Result<ProcessedSprite> {
    params.validate()?;

    let (source_width, source_height) = (buffer.width(), buffer.height());
    if buffer.is_empty() {
        return Err(Error::DegenerateGeometry {
            width: source_width,
            height: source_height,
        });
    }
    info!("Source image size: {}x{}", source_width, source_height);

    let classification = classify_buffer(&buffer, params);
    info!(
        "Modified {} pixels for background removal",
        classification.candidates
    );

    let matted = apply_alpha_matte(&buffer, &classification.confidence)?;
    drop(buffer);

    let (cropped, crop) = crop_to_content(matted, params.empty_content)?;
    let resized = resize_to_height(cropped, params.target_height, params.filter)?;
    let sharpened = sharpen(resized, params.sharpen_alpha);
    debug!("Sharpened (alpha included: {})", params.sharpen_alpha);

    let report = ProcessingReport {
        source_width,
        source_height,
        pixels_modified: classification.candidates,
        crop,
        width: sharpened.width(),
        height: sharpened.height(),
    };
    info!("Final sprite size: {}x{}", report.width, report.height);

    Ok(ProcessedSprite {
        buffer: sharpened,
        report,
    })
}
