//! High-level, ergonomic library API: process an image file to a sprite on
//! disk or in memory, and batch helpers for whole directories. Prefer these
//! entrypoints over the low-level processing modules.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::params::ProcessingParams;
use crate::core::processing::pipeline::{ProcessedSprite, ProcessingReport, process_buffer};
use crate::error::{Error, Result};
use crate::io::load_image;
use crate::io::writers::metadata::{SpriteMetadata, stage_metadata_sidecar};
use crate::io::writers::png::stage_rgba_png;

/// Input extensions picked up by directory processing (compared lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Extra outputs written alongside the sprite
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Write `<output>.json` with the processing report and parameters
    pub sidecar: bool,
}

/// Load `input` and run the full pipeline in memory (no disk writes)
pub fn process_file_to_buffer(input: &Path, params: &ProcessingParams) -> Result<ProcessedSprite> {
    let buffer = load_image(input)?;
    process_buffer(buffer, params)
}

/// Load `input`, run the pipeline, and write the sprite as PNG to `output`.
///
/// Every output is fully encoded before any of them is renamed into place.
/// On error neither the sprite nor its sidecar is left at its destination.
pub fn process_file_to_path(
    input: &Path,
    output: &Path,
    params: &ProcessingParams,
    options: &SaveOptions,
) -> Result<ProcessingReport> {
    info!("Processing: {:?} -> {:?}", input, output);
    let sprite = process_file_to_buffer(input, params)?;
    let png = stage_rgba_png(output, &sprite.buffer)?;

    if !options.sidecar {
        png.commit()?;
        info!("Saved {}x{} sprite to {:?}", sprite.report.width, sprite.report.height, output);
        return Ok(sprite.report);
    }

    let meta = SpriteMetadata::new(input, output, sprite.report, params);
    let sidecar = stage_metadata_sidecar(output, &meta)?;

    // sidecar lands first so the sprite never appears without it
    let sidecar_path = sidecar.commit()?;
    if let Err(e) = png.commit() {
        if let Err(rm) = std::fs::remove_file(&sidecar_path) {
            warn!("Could not remove orphaned sidecar {:?}: {}", sidecar_path, rm);
        }
        return Err(e);
    }
    info!(
        "Saved {}x{} sprite and sidecar {:?} to {:?}",
        sprite.report.width, sprite.report.height, sidecar_path, output
    );
    Ok(sprite.report)
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

pub fn is_supported_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

fn scan_directory(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if is_supported_image(&path) {
            files.push(path);
        } else {
            info!("Skipping non-image entry: {:?}", path);
            skipped += 1;
        }
    }
    files.sort();
    Ok((files, skipped))
}

/// Return the supported image files directly inside `input_dir`, sorted by path
pub fn iterate_image_files(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let (files, _) = scan_directory(input_dir)?;
    Ok(files.into_iter())
}

/// Output path for `input` inside `output_dir`: same stem, `.png` extension
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sprite".to_string());
    output_dir.join(format!("{stem}.png"))
}

/// Process every supported image in `input_dir` into `output_dir` using `params`.
///
/// Files are independent and run in parallel. If `continue_on_error` is true,
/// failures are counted in the report; otherwise the first failure (in path
/// order) is returned once the batch has finished.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ProcessingParams,
    options: &SaveOptions,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir)?;
    if input_dir.canonicalize()? == output_dir.canonicalize()? {
        return Err(Error::InvalidArgument {
            arg: "output_dir",
            value: output_dir.display().to_string(),
        });
    }

    let (candidates, mut skipped) = scan_directory(input_dir)?;

    // Two inputs sharing a stem would race for the same output file
    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(candidates.len());
    for input in candidates {
        let output = output_path_for(&input, output_dir);
        if seen.insert(output.clone()) {
            jobs.push((input, output));
        } else {
            warn!("Skipping {:?}: {:?} is already produced by another input", input, output);
            skipped += 1;
        }
    }

    info!("Starting batch of {} images", jobs.len());
    let outcomes: Vec<(PathBuf, Result<ProcessingReport>)> = jobs
        .par_iter()
        .map(|(input, output)| {
            (
                input.clone(),
                process_file_to_path(input, output, params, options),
            )
        })
        .collect();

    let mut report = BatchReport {
        skipped,
        ..Default::default()
    };
    let mut first_error = None;
    for (input, outcome) in outcomes {
        match outcome {
            Ok(r) => {
                info!("Successfully processed: {:?} ({}x{})", input, r.width, r.height);
                report.processed += 1;
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", input, e);
                report.errors += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) if !continue_on_error => Err(e),
        _ => Ok(report),
    }
}
