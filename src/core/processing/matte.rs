use ndarray::{Array2, Axis, Zip};

use crate::core::buffer::{ALPHA, PixelBuffer};
use crate::error::{Error, Result};

/// Build the matted buffer: RGB copied as-is, alpha = 255 * (1 - confidence).
///
/// `source` is left untouched. Any alpha the source carried is replaced.
pub fn apply_alpha_matte(source: &PixelBuffer, confidence: &Array2<f32>) -> Result<PixelBuffer> {
    let (rows, cols) = confidence.dim();
    if (rows, cols) != (source.height(), source.width()) {
        return Err(Error::Processing(format!(
            "confidence grid {}x{} does not match buffer {}x{}",
            cols,
            rows,
            source.width(),
            source.height()
        )));
    }

    let mut out = source.clone();
    Zip::from(out.data_mut().lanes_mut(Axis(2)))
        .and(confidence)
        .par_for_each(|mut px, &c| {
            px[ALPHA] = 255.0 * (1.0 - c);
        });
    Ok(out)
}
