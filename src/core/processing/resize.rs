use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use ndarray::Array3;
use tracing::info;

use crate::core::buffer::{CHANNELS, PixelBuffer};
use crate::error::{Error, Result};
use crate::types::ResampleFilter;

/// 8-bit sample to 16-bit scale factor (255 * 257 = 65535).
const U16_SCALE: f32 = 257.0;

/// Width/height for scaling `cols x rows` to a fixed `target_height`,
/// keeping the aspect ratio. Width never drops below one pixel.
pub fn calculate_target_dimensions(
    cols: usize,
    rows: usize,
    target_height: usize,
) -> Result<(usize, usize)> {
    if cols == 0 || rows == 0 {
        return Err(Error::DegenerateGeometry {
            width: cols,
            height: rows,
        });
    }
    if target_height == 0 {
        return Err(Error::InvalidArgument {
            arg: "target_height",
            value: target_height.to_string(),
        });
    }

    let target_width = (target_height as f64 * cols as f64 / rows as f64).round() as usize;
    Ok((target_width.max(1), target_height))
}

fn filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Mitchell => FilterType::Mitchell,
    }
}

/// Resample an interleaved RGBA16 buffer. Alpha is premultiplied during
/// convolution so fully transparent pixels don't bleed their color inward.
pub fn resize_rgba16_image(
    data: &[u16],
    original_cols: usize,
    original_rows: usize,
    target_cols: usize,
    target_rows: usize,
    filter: ResampleFilter,
) -> Result<Vec<u16>> {
    let resize_options = ResizeOptions::new()
        .resize_alg(ResizeAlg::Convolution(filter_type(filter)))
        .use_alpha(true);
    let mut resizer = Resizer::new();

    // fast_image_resize wants raw little-endian bytes
    let mut src_bytes = Vec::with_capacity(data.len() * 2);
    for &v in data {
        src_bytes.extend_from_slice(&v.to_le_bytes());
    }

    let src_image = Image::from_vec_u8(
        original_cols as u32,
        original_rows as u32,
        src_bytes,
        PixelType::U16x4,
    )
    .map_err(Error::processing)?;
    let mut dst_image = Image::new(target_cols as u32, target_rows as u32, PixelType::U16x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::processing)?;

    let dst_bytes = dst_image.into_vec();
    let mut out = Vec::with_capacity(dst_bytes.len() / 2);
    for chunk in dst_bytes.chunks_exact(2) {
        out.push(u16::from_le_bytes([chunk[0], chunk[1]]));
    }
    Ok(out)
}

/// Scale `buffer` to `target_height`, preserving aspect ratio.
pub fn resize_to_height(
    buffer: PixelBuffer,
    target_height: usize,
    filter: ResampleFilter,
) -> Result<PixelBuffer> {
    let (cols, rows) = (buffer.width(), buffer.height());
    let (new_cols, new_rows) = calculate_target_dimensions(cols, rows, target_height)?;

    info!(
        "Aspect ratio {:.2}:1, resizing {}x{} -> {}x{} ({})",
        cols as f64 / rows as f64,
        cols,
        rows,
        new_cols,
        new_rows,
        filter
    );

    if (new_cols, new_rows) == (cols, rows) {
        return Ok(buffer);
    }

    let samples: Vec<u16> = buffer
        .data()
        .iter()
        .map(|&v| (v.clamp(0.0, 255.0) * U16_SCALE).round() as u16)
        .collect();
    let resized = resize_rgba16_image(&samples, cols, rows, new_cols, new_rows, filter)?;

    let widened: Vec<f32> = resized.iter().map(|&v| f32::from(v) / U16_SCALE).collect();
    let data = Array3::from_shape_vec((new_rows, new_cols, CHANNELS), widened)
        .map_err(Error::processing)?;
    PixelBuffer::from_array(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_width_follows_aspect_ratio() {
        assert_eq!(calculate_target_dimensions(80, 130, 80).unwrap(), (49, 80));
        assert_eq!(calculate_target_dimensions(500, 500, 80).unwrap(), (80, 80));
        assert_eq!(calculate_target_dimensions(1920, 1080, 80).unwrap(), (142, 80));
        assert_eq!(calculate_target_dimensions(300, 400, 80).unwrap(), (60, 80));
    }

    #[test]
    fn aspect_ratio_is_preserved_within_a_pixel() {
        for (cols, rows) in [(1, 1), (16, 9), (3, 4), (160, 90), (333, 1000), (7, 3)] {
            let (w, h) = calculate_target_dimensions(cols, rows, 80).unwrap();
            let exact = h as f64 * cols as f64 / rows as f64;
            assert!((w as f64 - exact).abs() <= 1.0, "{cols}x{rows} -> {w}x{h}");
        }
    }

    #[test]
    fn very_tall_inputs_keep_one_column() {
        assert_eq!(calculate_target_dimensions(1, 1000, 80).unwrap(), (1, 80));
    }

    #[test]
    fn zero_height_is_degenerate() {
        assert!(matches!(
            calculate_target_dimensions(10, 0, 80),
            Err(Error::DegenerateGeometry {
                width: 10,
                height: 0
            })
        ));
        assert!(matches!(
            calculate_target_dimensions(0, 10, 80),
            Err(Error::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn uniform_color_survives_resampling() {
        let buffer = PixelBuffer::from_fn(80, 130, |_, _| [200.0, 30.0, 30.0, 255.0]);
        let out = resize_to_height(buffer, 80, ResampleFilter::Lanczos3).unwrap();
        assert_eq!((out.width(), out.height()), (49, 80));
        for v in out.to_rgba_image().unwrap().pixels() {
            assert_eq!(v.0, [200, 30, 30, 255]);
        }
    }

    #[test]
    fn alpha_channel_is_resampled() {
        // left half opaque, right half clear; the seam must come out soft
        let buffer = PixelBuffer::from_fn(40, 40, |x, _| {
            let a = if x < 20 { 255.0 } else { 0.0 };
            [10.0, 120.0, 200.0, a]
        });
        let out = resize_to_height(buffer, 10, ResampleFilter::CatmullRom).unwrap();
        assert_eq!((out.width(), out.height()), (10, 10));
        let alpha = out.alpha();
        assert!(alpha[[5, 0]] > 250.0);
        assert!(alpha[[5, 9]] < 5.0);
    }

    #[test]
    fn matching_size_skips_resampling() {
        let buffer = PixelBuffer::from_fn(8, 80, |x, y| [x as f32, y as f32, 1.0, 255.0]);
        let out = resize_to_height(buffer.clone(), 80, ResampleFilter::Mitchell).unwrap();
        assert_eq!(out, buffer);
    }
}
