use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};

use crate::error::{Error, Result};

/// Write an 8-bit RGBA PNG. Alpha is stored exactly.
pub fn write_png(image: &RgbaImage, output: &Path) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new(writer);
    let (cols, rows) = image.dimensions();
    encoder
        .write_image(image.as_raw(), cols, rows, image::ExtendedColorType::Rgba8)
        .map_err(|source| Error::Encode {
            path: output.to_path_buf(),
            source,
        })
}
