use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{EmptyContentPolicy, ResampleFilter};

pub const DEFAULT_WHITE_THRESHOLD: f32 = 235.0;
pub const DEFAULT_GRADIENT_RANGE: f32 = 40.0;
pub const DEFAULT_VARIANCE_CUTOFF: f32 = 15.0;
pub const DEFAULT_TARGET_HEIGHT: usize = 80;

/// Processing parameters suitable for config files and presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingParams {
    /// Luminance at or above which a uniform pixel is fully transparent
    pub white_threshold: f32,
    /// Width of the luminance band over which alpha ramps from opaque to clear
    pub gradient_range: f32,
    /// Maximum RGB standard deviation for a pixel to count as background
    pub variance_cutoff: f32,
    /// Output height in pixels; width follows the cropped aspect ratio
    pub target_height: usize,
    pub filter: ResampleFilter,
    pub empty_content: EmptyContentPolicy,
    /// If true, the sharpening kernel also runs over the alpha channel
    pub sharpen_alpha: bool,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            gradient_range: DEFAULT_GRADIENT_RANGE,
            variance_cutoff: DEFAULT_VARIANCE_CUTOFF,
            target_height: DEFAULT_TARGET_HEIGHT,
            filter: ResampleFilter::Lanczos3,
            empty_content: EmptyContentPolicy::Fail,
            sharpen_alpha: false,
        }
    }
}

impl ProcessingParams {
    /// Load a preset from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Luminance where the transparency ramp starts.
    pub fn ramp_start(&self) -> f32 {
        self.white_threshold - self.gradient_range
    }

    pub fn validate(&self) -> Result<()> {
        if !self.white_threshold.is_finite() {
            return Err(Error::InvalidArgument {
                arg: "white_threshold",
                value: self.white_threshold.to_string(),
            });
        }
        if !self.gradient_range.is_finite() || self.gradient_range <= 0.0 {
            return Err(Error::InvalidArgument {
                arg: "gradient_range",
                value: self.gradient_range.to_string(),
            });
        }
        if !self.variance_cutoff.is_finite() || self.variance_cutoff < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "variance_cutoff",
                value: self.variance_cutoff.to_string(),
            });
        }
        if self.target_height == 0 {
            return Err(Error::InvalidArgument {
                arg: "target_height",
                value: self.target_height.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let params = ProcessingParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.ramp_start(), 195.0);
    }

    #[test]
    fn rejects_zero_gradient_range() {
        let params = ProcessingParams {
            gradient_range: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidArgument {
                arg: "gradient_range",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_target_height() {
        let params = ProcessingParams {
            target_height: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_preset_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"white_threshold": 220, "empty_content": "pass-through"}}"#).unwrap();

        let params = ProcessingParams::from_json_file(file.path()).unwrap();
        assert_eq!(params.white_threshold, 220.0);
        assert_eq!(params.gradient_range, DEFAULT_GRADIENT_RANGE);
        assert_eq!(params.empty_content, EmptyContentPolicy::PassThrough);
        assert_eq!(params.filter, ResampleFilter::Lanczos3);
    }

    #[test]
    fn malformed_preset_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ProcessingParams::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
