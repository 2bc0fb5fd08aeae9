//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Covers the loader and writer boundaries, the geometric preconditions of the
//! pipeline, and argument/config validation.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Unsupported image format for {}: {message}", path.display())]
    UnsupportedFormat { path: PathBuf, message: String },

    #[error("Failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Empty content after background removal: every pixel classified as background")]
    EmptyContent,

    #[error("Degenerate geometry: {width}x{height} has zero area")]
    DegenerateGeometry { width: usize, height: usize },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn processing<E: std::fmt::Display>(e: E) -> Self {
        Error::Processing(e.to_string())
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }
}
