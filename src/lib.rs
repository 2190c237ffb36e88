#![doc = r#"
PixSkin — a deterministic raster-to-pixel-art converter.

This crate turns arbitrary PNG/JPEG images into pixel art through a fixed, staged
pipeline: background removal, nearest-neighbor downscale and upscale, and a
finishing pass that clears faint alpha, removes orphan pixels and validates the
result. It powers the `pixskin` CLI and can be embedded in your own Rust
applications.

Pipeline
--------
For every image:

1. `BackgroundPreparer` decodes the source, runs the background-removal
   collaborator and normalizes the buffer to RGBA.
2. `Resizer` downscales to the configured size and upscales by an integer factor,
   both nearest-neighbor, so every output pixel is a copy of a source pixel.
3. The upscaled image is autocropped to its visible content and written as
   `<stem>_pixelart.png`.
4. `Finisher` reloads that file, clears alpha below the threshold, removes orphan
   pixels, optionally quantizes the palette and checks grid alignment, validates,
   and writes `<stem>_final.png`.

With `preserve_intermediates`, the background-removed and downscaled buffers are
also written to `<output>/.pixskin_temp/{01_input,02_resize}`.

Quick start: one image
----------------------
```rust,no_run
use std::path::Path;
use pixskin::{PipelineConfig, PixelArtConverter};

fn main() -> pixskin::Result<()> {
    let config = PipelineConfig {
        downscale_size: (64, 64),
        upscale_factor: 4,
        ..Default::default()
    };
    let converter = PixelArtConverter::new(config)?;
    let output = converter.process_image(Path::new("/art/knight.jpg"))?;
    println!("wrote {}", output.display());
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use pixskin::{PipelineConfig, PixelArtConverter};

fn main() -> pixskin::Result<()> {
    let converter = PixelArtConverter::new(PipelineConfig::default())?;
    // Failing images are logged and skipped; outputs land in /art/pixskin_output.
    let outputs = converter.process_folder(Path::new("/art"))?;
    println!("converted {} images", outputs.len());
    Ok(())
}
```

Custom background removal
-------------------------
The built-in `BorderKeyRemover` keys out the border color. Plug a model-backed
remover in through the `BackgroundRemover` trait:

```rust
use image::DynamicImage;
use pixskin::{BackgroundRemover, PipelineConfig, PixelArtConverter};

struct MyModel;

impl BackgroundRemover for MyModel {
    fn name(&self) -> &str {
        "my-model"
    }

    fn remove(&self, image: DynamicImage) -> pixskin::Result<DynamicImage> {
        // run inference here
        Ok(image)
    }
}

fn build() -> pixskin::Result<PixelArtConverter> {
    PixelArtConverter::with_remover(PipelineConfig::default(), Box::new(MyModel))
}
```

Error handling
--------------
All public functions return `pixskin::Result<T>`; match on `pixskin::Error` to
handle specific cases.

```rust,no_run
use std::path::Path;
use pixskin::{Error, PipelineConfig, PixelArtConverter};

fn main() -> pixskin::Result<()> {
    let converter = PixelArtConverter::new(PipelineConfig::default())?;
    match converter.process_image(Path::new("/art/sprite.gif")) {
        Ok(path) => println!("{}", path.display()),
        Err(Error::NotFound { path }) => eprintln!("missing: {}", path.display()),
        Err(Error::UnsupportedFormat { extension, .. }) => eprintln!("cannot read .{extension}"),
        Err(other) => eprintln!("failed: {other}"),
    }
    Ok(())
}
```

Useful modules
--------------
- [`api`] — the `PixelArtConverter` orchestrator.
- [`core`](crate::core) — configuration and the Resizer/Finisher algorithms.
- [`background`] — background-removal seam and `BackgroundPreparer`.
- [`io`] — decoding, output layout and the PNG writer.
- [`logging`] — console subscriber setup and `LogCapture`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod background;
pub mod core;
pub mod error;
pub mod io;
pub mod logging;
pub mod types;

// Curated public API surface
pub use api::{PipelineOutput, PixelArtConverter};
pub use background::{BackgroundPreparer, BackgroundRemover, BorderKeyRemover, PassthroughRemover};
pub use crate::core::params::PipelineConfig;
pub use crate::core::processing::finish::Finisher;
pub use crate::core::processing::resize::Resizer;
pub use crate::core::processing::validate::ValidationReport;
pub use error::{Error, Result};
pub use types::{ImageExtension, IntermediateStage, OutputSuffix, QualityStatus};
