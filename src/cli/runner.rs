use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sprite_matte::{
    ProcessingParams, SaveOptions, process_directory_to_path, process_file_to_path,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Install the stderr subscriber: DEBUG with `--log`, else `RUST_LOG` or WARN.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn process_single_file(
    input: &Path,
    output: &Path,
    params: &ProcessingParams,
    options: &SaveOptions,
) -> Result<(), AppError> {
    let report = process_file_to_path(input, output, params, options)?;
    match report.crop {
        Some(bbox) => println!(
            "{} -> {}: cropped {}x{} to {}x{}, scaled to {}x{}",
            input.display(),
            output.display(),
            report.source_width,
            report.source_height,
            bbox.width(),
            bbox.height(),
            report.width,
            report.height
        ),
        None => println!(
            "{} -> {}: no content found, kept full frame, scaled to {}x{}",
            input.display(),
            output.display(),
            report.width,
            report.height
        ),
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    let params = args.processing_params()?;
    let options = SaveOptions {
        sidecar: args.sidecar,
    };
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report =
            process_directory_to_path(&input_dir, &output_dir, &params, &options, args.batch)?;

        println!(
            "Processed: {}, skipped: {}, errors: {}",
            report.processed, report.skipped, report.errors
        );
        if report.errors > 0 {
            return Err(AppError::BatchFailures {
                errors: report.errors,
                total: report.processed + report.errors,
            });
        }
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;

        process_single_file(&input, &output, &params, &options)?;
        info!("Successfully processed: {:?} -> {:?}", input, output);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use image::{Rgba, RgbaImage};

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("sprite-matte").chain(argv.iter().copied()))
            .unwrap()
    }

    fn missing_arg(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::MissingArgument { arg }) => arg,
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn single_file_needs_output() {
        assert_eq!(missing_arg(run(args(&["-i", "in.png"]))), "--output");
        assert_eq!(missing_arg(run(args(&["-o", "out.png"]))), "--input");
    }

    #[test]
    fn batch_needs_output_dir() {
        assert_eq!(
            missing_arg(run(args(&["--input-dir", "sprites"]))),
            "--output-dir"
        );
        assert_eq!(
            missing_arg(run(args(&["--batch", "--output-dir", "out"]))),
            "--input-dir"
        );
    }

    #[test]
    fn batch_with_failures_is_an_error() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]))
            .save(input_dir.path().join("blank.png"))
            .unwrap();

        let input = input_dir.path().to_string_lossy().into_owned();
        let output = output_dir.path().to_string_lossy().into_owned();
        let result = run(args(&[
            "--batch",
            "--input-dir",
            input.as_str(),
            "--output-dir",
            output.as_str(),
        ]));

        assert!(
            matches!(result, Err(AppError::BatchFailures { errors: 1, total: 1 })),
            "got {result:?}"
        );
        assert!(!output_dir.path().join("blank.png").exists());
    }

    #[test]
    fn single_file_writes_sprite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dot.png");
        let output = dir.path().join("dot_sprite.png");
        RgbaImage::from_fn(20, 20, |x, y| {
            if (5..15).contains(&x) && (5..15).contains(&y) {
                Rgba([20, 90, 200, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
        .save(&input)
        .unwrap();

        let input_arg = input.to_string_lossy().into_owned();
        let output_arg = output.to_string_lossy().into_owned();
        run(args(&[
            "-i",
            input_arg.as_str(),
            "-o",
            output_arg.as_str(),
            "--target-height",
            "10",
        ]))
        .unwrap();

        let sprite = image::open(&output).unwrap().to_rgba8();
        assert_eq!(sprite.dimensions(), (10, 10));
    }
}
