//! Shared enums used across the crate: `ResampleFilter` and `EmptyContentPolicy`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Convolution filter used when scaling the cropped sprite.
///
/// Only multi-tap filters are offered; nearest and box averaging alias badly
/// on downscaled line art.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    #[default]
    Lanczos3,
    CatmullRom,
    Mitchell,
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleFilter::Lanczos3 => write!(f, "Lanczos3"),
            ResampleFilter::CatmullRom => write!(f, "CatmullRom"),
            ResampleFilter::Mitchell => write!(f, "Mitchell"),
        }
    }
}

/// What to do when background removal leaves no visible pixel.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyContentPolicy {
    /// Abort the run with `Error::EmptyContent`.
    #[default]
    Fail,
    /// Keep the full, fully transparent frame and continue.
    PassThrough,
}

impl std::fmt::Display for EmptyContentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyContentPolicy::Fail => write!(f, "Fail"),
            EmptyContentPolicy::PassThrough => write!(f, "PassThrough"),
        }
    }
}
