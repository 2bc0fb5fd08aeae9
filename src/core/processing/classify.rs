use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::{Array2, Axis, Zip};
use tracing::debug;

use crate::core::buffer::PixelBuffer;
use crate::core::params::ProcessingParams;

/// Per-pixel background confidence plus the number of candidate pixels.
#[derive(Debug, Clone)]
pub struct Classification {
    /// 0.0 = certainly foreground, 1.0 = certainly background
    pub confidence: Array2<f32>,
    /// Pixels that passed both the brightness and uniformity tests
    pub candidates: usize,
}

/// Perceived brightness with broadcast (BT.601) weights.
///
/// Written with integer weights so equal integer channels map back exactly.
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    (299.0 * r + 587.0 * g + 114.0 * b) / 1000.0
}

/// Population standard deviation of the three color channels.
pub fn channel_std_dev(r: f32, g: f32, b: f32) -> f32 {
    let mean = (r + g + b) / 3.0;
    let var = ((r - mean).powi(2) + (g - mean).powi(2) + (b - mean).powi(2)) / 3.0;
    var.sqrt()
}

/// Confidence for a pixel that qualifies as background, `None` otherwise.
pub fn candidate_confidence(r: f32, g: f32, b: f32, params: &ProcessingParams) -> Option<f32> {
    let start = params.ramp_start();
    let l = luminance(r, g, b);
    if l < start || channel_std_dev(r, g, b) >= params.variance_cutoff {
        return None;
    }
    Some(((l - start) / params.gradient_range).clamp(0.0, 1.0))
}

pub fn background_confidence(r: f32, g: f32, b: f32, params: &ProcessingParams) -> f32 {
    candidate_confidence(r, g, b, params).unwrap_or(0.0)
}

/// Classify every pixel of `buffer`. Source alpha is ignored.
pub fn classify_buffer(buffer: &PixelBuffer, params: &ProcessingParams) -> Classification {
    let data = buffer.data();
    let (rows, cols, _) = data.dim();
    let mut confidence = Array2::<f32>::zeros((rows, cols));
    let candidates = AtomicUsize::new(0);

    Zip::from(&mut confidence)
        .and(data.lanes(Axis(2)))
        .par_for_each(|out, px| {
            if let Some(c) = candidate_confidence(px[0], px[1], px[2], params) {
                candidates.fetch_add(1, Ordering::Relaxed);
                *out = c;
            }
        });

    let candidates = candidates.into_inner();
    debug!(
        "Classified {}x{} pixels, {} background candidates",
        cols, rows, candidates
    );

    Classification {
        confidence,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProcessingParams {
        ProcessingParams::default()
    }

    #[test]
    fn saturated_pixels_are_never_background() {
        let p = params();
        // stddev well above the cutoff at every brightness
        for (r, g, b) in [(255.0, 200.0, 255.0), (255.0, 255.0, 180.0), (200.0, 30.0, 30.0)] {
            assert!(channel_std_dev(r, g, b) >= p.variance_cutoff);
            assert_eq!(background_confidence(r, g, b, &p), 0.0);
        }
    }

    #[test]
    fn confidence_is_monotonic_in_luminance() {
        let p = params();
        let mut last = 0.0;
        for v in 0..=255 {
            let v = v as f32;
            // small fixed tint keeps stddev constant and below the cutoff
            let c = background_confidence(v, v, (v - 6.0).max(0.0), &p);
            assert!(c >= last, "confidence dropped at {v}: {c} < {last}");
            last = c;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn ramp_boundaries_are_exact() {
        let p = params();
        assert_eq!(luminance(235.0, 235.0, 235.0), 235.0);
        assert_eq!(background_confidence(235.0, 235.0, 235.0, &p), 1.0);
        assert_eq!(background_confidence(195.0, 195.0, 195.0, &p), 0.0);
        assert_eq!(candidate_confidence(195.0, 195.0, 195.0, &p), Some(0.0));
        assert_eq!(candidate_confidence(194.0, 194.0, 194.0, &p), None);
        assert_eq!(background_confidence(215.0, 215.0, 215.0, &p), 0.5);
    }

    #[test]
    fn custom_thresholds_shift_the_ramp() {
        let p = ProcessingParams {
            white_threshold: 250.0,
            gradient_range: 10.0,
            ..Default::default()
        };
        assert_eq!(background_confidence(235.0, 235.0, 235.0, &p), 0.0);
        assert_eq!(background_confidence(245.0, 245.0, 245.0, &p), 0.5);
    }

    #[test]
    fn classify_buffer_counts_candidates() {
        let buffer = PixelBuffer::from_fn(4, 2, |x, _| {
            if x < 2 {
                [255.0, 255.0, 255.0, 255.0]
            } else {
                [200.0, 30.0, 30.0, 255.0]
            }
        });
        let result = classify_buffer(&buffer, &params());
        assert_eq!(result.candidates, 4);
        assert_eq!(result.confidence.dim(), (2, 4));
        assert_eq!(result.confidence[[1, 0]], 1.0);
        assert_eq!(result.confidence[[1, 3]], 0.0);
    }

    #[test]
    fn source_alpha_is_ignored() {
        let buffer = PixelBuffer::from_fn(1, 1, |_, _| [255.0, 255.0, 255.0, 0.0]);
        let result = classify_buffer(&buffer, &params());
        assert_eq!(result.confidence[[0, 0]], 1.0);
    }
}
