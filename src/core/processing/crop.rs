use ndarray::s;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::types::EmptyContentPolicy;

/// Alpha at or above this rounds to a visible 8-bit level.
pub const MIN_VISIBLE_ALPHA: f32 = 0.5;

/// Inclusive pixel rectangle `[min_x, max_x] x [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})..=({}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Tightest box around every visible pixel, `None` if nothing is visible.
///
/// Visible means the alpha is above zero once quantized to 8 bits, i.e.
/// `alpha >= MIN_VISIBLE_ALPHA`. Fainter pixels would be written as fully
/// transparent, so they never widen the box.
pub fn content_bounds(buffer: &PixelBuffer) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;
    for ((y, x), &a) in buffer.alpha().indexed_iter() {
        if a < MIN_VISIBLE_ALPHA {
            continue;
        }
        bounds = Some(match bounds {
            None => BoundingBox {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            Some(b) => BoundingBox {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            },
        });
    }
    bounds
}

pub fn crop(buffer: PixelBuffer, bbox: BoundingBox) -> Result<PixelBuffer> {
    if bbox.max_x >= buffer.width() || bbox.max_y >= buffer.height() {
        return Err(Error::Processing(format!(
            "crop box {} outside {}x{} buffer",
            bbox,
            buffer.width(),
            buffer.height()
        )));
    }
    let view = buffer
        .data()
        .slice(s![bbox.min_y..=bbox.max_y, bbox.min_x..=bbox.max_x, ..]);
    PixelBuffer::from_array(view.to_owned())
}

/// Crop to visible content, applying `policy` when nothing is visible.
///
/// Returns the (possibly unchanged) buffer and the box that was applied.
pub fn crop_to_content(
    buffer: PixelBuffer,
    policy: EmptyContentPolicy,
) -> Result<(PixelBuffer, Option<BoundingBox>)> {
    match content_bounds(&buffer) {
        Some(bbox) => {
            let cropped = crop(buffer, bbox)?;
            info!(
                "Cropped to content: {}x{} at {}",
                cropped.width(),
                cropped.height(),
                bbox
            );
            Ok((cropped, Some(bbox)))
        }
        None => match policy {
            EmptyContentPolicy::Fail => Err(Error::EmptyContent),
            EmptyContentPolicy::PassThrough => {
                warn!(
                    "No visible content left after background removal; keeping full {}x{} frame",
                    buffer.width(),
                    buffer.height()
                );
                Ok((buffer, None))
            }
        },
    }
}
