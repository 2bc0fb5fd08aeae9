use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::ProcessingParams;
use crate::core::processing::pipeline::ProcessingReport;
use crate::error::{Error, Result};
use crate::io::writers::{StagedFile, stage};

/// Contents of the JSON sidecar written next to a sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteMetadata {
    pub source: PathBuf,
    pub output: PathBuf,
    /// RFC 3339, UTC
    pub processed_at: String,
    pub report: ProcessingReport,
    pub params: ProcessingParams,
}

impl SpriteMetadata {
    pub fn new(
        source: &Path,
        output: &Path,
        report: ProcessingReport,
        params: &ProcessingParams,
    ) -> Self {
        Self {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            processed_at: chrono::Utc::now().to_rfc3339(),
            report,
            params: params.clone(),
        }
    }
}

pub fn sidecar_path(output: &Path) -> PathBuf {
    output.with_extension("json")
}

/// Serialize `meta` as pretty JSON into a temp file next to `<output>.json`.
pub fn stage_metadata_sidecar(output: &Path, meta: &SpriteMetadata) -> Result<StagedFile> {
    let path = sidecar_path(output);
    let json = serde_json::to_string_pretty(meta).map_err(Error::processing)?;
    stage(&path, |w| {
        w.write_all(json.as_bytes())
            .map_err(|e| Error::write(&path, e))
    })
}

/// Write `meta` as pretty JSON to `<output>.json`; returns the sidecar path.
pub fn create_metadata_sidecar(output: &Path, meta: &SpriteMetadata) -> Result<PathBuf> {
    let path = stage_metadata_sidecar(output, meta)?.commit()?;
    info!("Created metadata sidecar: {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::crop::BoundingBox;
    use pretty_assertions::assert_eq;

    #[test]
    fn sidecar_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("hero.png");
        let report = ProcessingReport {
            source_width: 100,
            source_height: 150,
            pixels_modified: 4600,
            crop: Some(BoundingBox {
                min_x: 10,
                min_y: 10,
                max_x: 89,
                max_y: 139,
            }),
            width: 49,
            height: 80,
        };
        let meta = SpriteMetadata::new(
            Path::new("in/hero.jpg"),
            &output,
            report,
            &ProcessingParams::default(),
        );

        let path = create_metadata_sidecar(&output, &meta).unwrap();
        assert_eq!(path, dir.path().join("hero.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: SpriteMetadata = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, meta);
        assert!(chrono::DateTime::parse_from_rfc3339(&parsed.processed_at).is_ok());
    }
}
