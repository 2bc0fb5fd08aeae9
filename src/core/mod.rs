//! Core building blocks: the pixel buffer, processing parameters, and the
//! matting/cropping/resampling stages. These are internal primitives
//! consumed by the high-level `api` module.
pub mod buffer;
pub mod params;
pub mod processing;
