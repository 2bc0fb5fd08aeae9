use clap::Parser;
use std::path::PathBuf;

use sprite_matte::{EmptyContentPolicy, ProcessingParams, ResampleFilter};

use super::errors::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "sprite-matte",
    version,
    about = "Cut flat-background artwork into cropped, soft-alpha sprites"
)]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory of input images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output PNG (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing; each input becomes <stem>.png
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON preset with processing parameters; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Luminance at which uniform pixels become fully transparent [default: 235]
    #[arg(long)]
    pub white_threshold: Option<f32>,

    /// Width of the soft transparency ramp below the white threshold [default: 40]
    #[arg(long)]
    pub gradient_range: Option<f32>,

    /// Maximum RGB standard deviation still treated as background [default: 15]
    #[arg(long)]
    pub variance_cutoff: Option<f32>,

    /// Sprite height in pixels; width follows the aspect ratio [default: 80]
    #[arg(long)]
    pub target_height: Option<usize>,

    /// Resampling filter [default: lanczos3]
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Behavior when nothing is left after background removal [default: fail]
    #[arg(long, value_enum)]
    pub empty_content: Option<EmptyContentPolicy>,

    /// Also sharpen the alpha channel
    #[arg(long, default_value_t = false)]
    pub sharpen_alpha: bool,

    /// Write a JSON metadata sidecar next to each sprite
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: keep processing remaining files after a failure
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}

impl CliArgs {
    /// Preset (or defaults) with individual flags layered on top.
    pub fn processing_params(&self) -> Result<ProcessingParams, AppError> {
        let mut params = match &self.config {
            Some(path) => ProcessingParams::from_json_file(path)?,
            None => ProcessingParams::default(),
        };

        if let Some(v) = self.white_threshold {
            params.white_threshold = v;
        }
        if let Some(v) = self.gradient_range {
            params.gradient_range = v;
        }
        if let Some(v) = self.variance_cutoff {
            params.variance_cutoff = v;
        }
        if let Some(v) = self.target_height {
            params.target_height = v;
        }
        if let Some(v) = self.filter {
            params.filter = v;
        }
        if let Some(v) = self.empty_content {
            params.empty_content = v;
        }
        if self.sharpen_alpha {
            params.sharpen_alpha = true;
        }

        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_flags() {
        let args = CliArgs::try_parse_from(["sprite-matte", "-i", "in.jpg", "-o", "out.png"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("in.jpg")));
        assert_eq!(args.processing_params().unwrap(), ProcessingParams::default());
    }

    #[test]
    fn flags_override_preset() {
        let mut preset = tempfile::NamedTempFile::new().unwrap();
        write!(preset, r#"{{"white_threshold": 240, "target_height": 64}}"#).unwrap();
        let config = preset.path().to_str().unwrap().to_string();

        let args = CliArgs::try_parse_from([
            "sprite-matte",
            "--config",
            config.as_str(),
            "--target-height",
            "128",
            "--filter",
            "catmull-rom",
            "--empty-content",
            "pass-through",
            "--sharpen-alpha",
        ])
        .unwrap();
        let params = args.processing_params().unwrap();

        assert_eq!(params.white_threshold, 240.0);
        assert_eq!(params.target_height, 128);
        assert_eq!(params.filter, ResampleFilter::CatmullRom);
        assert_eq!(params.empty_content, EmptyContentPolicy::PassThrough);
        assert!(params.sharpen_alpha);
    }

    #[test]
    fn invalid_values_are_reported() {
        let args = CliArgs::try_parse_from(["sprite-matte", "--gradient-range", "0"]).unwrap();
        assert!(args.processing_params().is_err());
    }

    #[test]
    fn unknown_filter_is_rejected_by_parser() {
        assert!(CliArgs::try_parse_from(["sprite-matte", "--filter", "nearest"]).is_err());
    }
}
