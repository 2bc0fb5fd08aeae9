//! In-memory RGBA pixel buffer shared by every pipeline stage.
//!
//! Samples are 8-bit values widened to `f32` so classification, matting and
//! resampling never round between stages. Layout is `(rows, cols, channel)`.
use image::RgbaImage;
use ndarray::{Array3, ArrayView2, Axis};

use crate::error::{Error, Result};

pub const CHANNELS: usize = 4;
pub const ALPHA: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    data: Array3<f32>,
}

impl PixelBuffer {
    /// Wrap an existing `(rows, cols, 4)` array.
    pub fn from_array(data: Array3<f32>) -> Result<Self> {
        let (_, _, channels) = data.dim();
        if channels != CHANNELS {
            return Err(Error::Processing(format!(
                "expected {CHANNELS} channels, got {channels}"
            )));
        }
        Ok(Self { data })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> [f32; CHANNELS],
    {
        let mut data = Array3::<f32>::zeros((height, width, CHANNELS));
        for y in 0..height {
            for x in 0..width {
                let rgba = f(x, y);
                for (c, v) in rgba.into_iter().enumerate() {
                    data[[y, x, c]] = v;
                }
            }
        }
        Self { data }
    }

    pub fn from_rgba_image(img: &RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        let samples: Vec<f32> = img.as_raw().iter().map(|&v| f32::from(v)).collect();
        let data = Array3::from_shape_vec((height as usize, width as usize, CHANNELS), samples)
            .map_err(Error::processing)?;
        Ok(Self { data })
    }

    /// Quantize back to 8-bit, rounding and clamping every sample.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let raw: Vec<u8> = self
            .data
            .iter()
            .map(|&v| v.round().clamp(0.0, 255.0) as u8)
            .collect();
        RgbaImage::from_raw(self.width() as u32, self.height() as u32, raw)
            .ok_or_else(|| Error::Processing("pixel count does not match dimensions".into()))
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [f32; CHANNELS] {
        let px = self.data.slice(ndarray::s![y, x, ..]);
        [px[0], px[1], px[2], px[3]]
    }

    pub fn alpha(&self) -> ArrayView2<'_, f32> {
        self.data.index_axis(Axis(2), ALPHA)
    }

    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array3<f32> {
        &mut self.data
    }
}
