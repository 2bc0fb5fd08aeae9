//! I/O layer: raster decoding (`loader`) and the PNG and JSON sidecar
//! `writers`.
pub mod loader;
pub use loader::load_image;

pub mod writers;
pub use writers::metadata::{SpriteMetadata, create_metadata_sidecar};
pub use writers::png::write_rgba_png;
