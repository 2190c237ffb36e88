use std::path::{Path, PathBuf};

use fast_image_resize::{self as fr, PixelType, ResizeAlg, ResizeOptions, images::Image};
use image::RgbaImage;
use tracing::{debug, info};

use crate::core::processing::crop::autocrop;
use crate::error::{Error, Result};
use crate::io::layout::ensure_png;
use crate::io::writers::png::write_png;

/// Size after an integer upscale, rejecting overflow.
pub fn calculate_upscaled_dimensions(cols: u32, rows: u32, factor: u32) -> Result<(u32, u32)> {
    if factor == 0 {
        return Err(Error::invalid("upscale_factor", factor));
    }
    match (cols.checked_mul(factor), rows.checked_mul(factor)) {
        (Some(new_cols), Some(new_rows)) => Ok((new_cols, new_rows)),
        _ => Err(Error::invalid(
            "upscale_factor",
            format!("{} overflows {}x{}", factor, cols, rows),
        )),
    }
}

/// Nearest-neighbor resample of an RGBA buffer. Every output pixel is a copy of
/// one source pixel; alpha is treated as a plain channel (no premultiplication).
pub fn resize_rgba_nearest(
    image: &RgbaImage,
    target_cols: u32,
    target_rows: u32,
) -> Result<RgbaImage> {
    if target_cols == 0 || target_rows == 0 {
        return Err(Error::invalid(
            "target_size",
            format!("{}x{}", target_cols, target_rows),
        ));
    }
    let (cols, rows) = image.dimensions();
    if (cols, rows) == (target_cols, target_rows) {
        return Ok(image.clone());
    }

    let resize_options = ResizeOptions::new()
        .resize_alg(ResizeAlg::Nearest)
        .use_alpha(false);
    let mut resizer = fr::Resizer::new();

    let src_image = Image::from_vec_u8(cols, rows, image.as_raw().clone(), PixelType::U8x4)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    RgbaImage::from_raw(target_cols, target_rows, dst_image.into_vec())
        .ok_or_else(|| Error::Resize("resized buffer has unexpected length".to_string()))
}

/// Resize stage. Owns one RGBA buffer; each transform consumes the stage and hands
/// it back so calls chain as `Resizer::new(img).downscale(size)?.upscale(f)?`.
#[derive(Debug, Clone)]
pub struct Resizer {
    image: RgbaImage,
}

impl Resizer {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Resize to exactly `target_size`; aspect ratio is the caller's concern.
    pub fn downscale(self, target_size: (u32, u32)) -> Result<Self> {
        let (cols, rows) = self.image.dimensions();
        let (target_cols, target_rows) = target_size;
        let image = resize_rgba_nearest(&self.image, target_cols, target_rows)?;
        info!(
            "Downscale applied: {}x{} -> {}x{}",
            cols, rows, target_cols, target_rows
        );
        Ok(Self { image })
    }

    /// Block-replicate every pixel `factor` times in both directions.
    pub fn upscale(self, factor: u32) -> Result<Self> {
        let (cols, rows) = self.image.dimensions();
        let (new_cols, new_rows) = calculate_upscaled_dimensions(cols, rows, factor)?;
        let image = resize_rgba_nearest(&self.image, new_cols, new_rows)?;
        info!("Upscale applied (factor={}): {}x{}", factor, new_cols, new_rows);
        Ok(Self { image })
    }

    /// Crop the buffer in place to its non-transparent content.
    pub fn autocrop(&mut self) {
        let image = std::mem::take(&mut self.image);
        self.image = autocrop(image);
    }

    /// Force a `.png` path, autocrop, then write. Returns the path actually written.
    pub fn save(&mut self, path: &Path) -> Result<PathBuf> {
        let output = ensure_png(path);
        self.autocrop();
        write_png(&self.image, &output)?;
        debug!("Resizer output saved: {:?}", output);
        Ok(output)
    }
}
