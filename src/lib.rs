#![doc = r#"
sprite-matte — turns flat-background artwork into game-ready sprites.

Given an image drawn or rendered on a white (or near-white) background, the
pipeline classifies every pixel by brightness and color uniformity, converts
that confidence into a soft alpha matte, crops to the visible content, scales
to a fixed target height with a Lanczos-class filter, and sharpens the result.
It powers the `sprite-matte` CLI and can be embedded in your own tools.

Add dependency
--------------
```toml
[dependencies]
sprite-matte = "0.1"
```

Quick start: process a file to a PNG sprite
-------------------------------------------
```rust,no_run
use std::path::Path;
use sprite_matte::{process_file_to_path, ProcessingParams, SaveOptions};

fn main() -> sprite_matte::Result<()> {
    let report = process_file_to_path(
        Path::new("assets/caveman.jpg"),
        Path::new("assets/caveman.png"),
        &ProcessingParams::default(),
        &SaveOptions { sidecar: true },
    )?;
    println!("{}x{} sprite, {} pixels cleared", report.width, report.height, report.pixels_modified);
    Ok(())
}
```

Process in memory
-----------------
```rust
use sprite_matte::{process_buffer, PixelBuffer, ProcessingParams};

fn main() -> sprite_matte::Result<()> {
    // white frame around a dark square
    let buffer = PixelBuffer::from_fn(40, 40, |x, y| {
        if (10..30).contains(&x) && (10..30).contains(&y) {
            [40.0, 40.0, 40.0, 255.0]
        } else {
            [255.0, 255.0, 255.0, 255.0]
        }
    });

    let sprite = process_buffer(buffer, &ProcessingParams::default())?;
    assert_eq!((sprite.report.width, sprite.report.height), (80, 80));
    Ok(())
}
```

Tuning
------
`ProcessingParams` carries the classifier thresholds (`white_threshold`,
`gradient_range`, `variance_cutoff`), the output `target_height`, the
resampling filter, the empty-content policy, and whether alpha is sharpened.
Presets can be loaded from JSON with [`ProcessingParams::from_json_file`].

Error handling
--------------
All public functions return `sprite_matte::Result<T>`; match on
`sprite_matte::Error` to handle specific cases.

```rust,no_run
use std::path::Path;
use sprite_matte::{process_file_to_path, Error, ProcessingParams, SaveOptions};

fn main() {
    match process_file_to_path(
        Path::new("blank.png"),
        Path::new("blank_sprite.png"),
        &ProcessingParams::default(),
        &SaveOptions::default(),
    ) {
        Ok(_) => {}
        Err(Error::EmptyContent) => eprintln!("nothing left after background removal"),
        Err(Error::InputNotFound { path }) => eprintln!("missing input: {}", path.display()),
        Err(other) => eprintln!("failed: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level entry points, including batch directory processing.
- [`core`] — pixel buffer, parameters and the individual pipeline stages.
- [`io`] — image loading and the PNG / JSON sidecar writers.
- [`types`] — `ResampleFilter` and `EmptyContentPolicy`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Types
pub use crate::core::buffer::PixelBuffer;
pub use crate::core::params::ProcessingParams;
pub use crate::core::processing::crop::BoundingBox;
pub use crate::core::processing::pipeline::{ProcessedSprite, ProcessingReport, process_buffer};
pub use error::{Error, Result};
pub use types::{EmptyContentPolicy, ResampleFilter};

// Readers / writers
pub use io::{SpriteMetadata, create_metadata_sidecar, load_image, write_rgba_png};

// High-level API re-exports
pub use api::{
    BatchReport, SaveOptions, iterate_image_files, process_directory_to_path,
    process_file_to_buffer, process_file_to_path,
};
