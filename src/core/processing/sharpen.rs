use ndarray::{Axis, Zip};

use crate::core::buffer::{ALPHA, PixelBuffer};

/// 3x3 sharpen kernel, applied as `sum(k * px) / SHARPEN_DIVISOR`.
pub const SHARPEN_KERNEL: [[f32; 3]; 3] = [[-2.0, -2.0, -2.0], [-2.0, 32.0, -2.0], [-2.0, -2.0, -2.0]];
pub const SHARPEN_DIVISOR: f32 = 16.0;

/// Restore edge contrast after downsampling.
///
/// RGB is always sharpened and clamped to [0, 255]; alpha only when
/// `include_alpha` is set. The outermost rows and columns are copied
/// unchanged, and buffers smaller than 3x3 are returned as-is.
pub fn sharpen(buffer: PixelBuffer, include_alpha: bool) -> PixelBuffer {
    let (cols, rows) = (buffer.width(), buffer.height());
    if cols < 3 || rows < 3 {
        return buffer;
    }

    let channels = if include_alpha { ALPHA + 1 } else { ALPHA };
    let src = buffer.data();
    let mut out = buffer.clone();

    Zip::indexed(out.data_mut().lanes_mut(Axis(2))).par_for_each(|(y, x), mut px| {
        if y == 0 || x == 0 || y == rows - 1 || x == cols - 1 {
            return;
        }
        for c in 0..channels {
            let mut acc = 0.0;
            for (ky, krow) in SHARPEN_KERNEL.iter().enumerate() {
                for (kx, k) in krow.iter().enumerate() {
                    acc += k * src[[y + ky - 1, x + kx - 1, c]];
                }
            }
            px[c] = (acc / SHARPEN_DIVISOR).clamp(0.0, 255.0);
        }
    });
    out
}
