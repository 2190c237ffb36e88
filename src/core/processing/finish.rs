use std::path::Path;

use image::{DynamicImage, RgbaImage};
use tracing::{info, warn};

use crate::core::processing::cleanup;
use crate::core::processing::quantize;
use crate::core::processing::validate::{ValidationReport, validate};
use crate::error::Result;
use crate::io::writers::png::write_png;

/// Final polish stage.
///
/// Only discards information: pixels are made transparent, never recolored or moved.
/// `quantize_palette` is the one opt-in lossy step. Consuming methods keep exclusive
/// ownership of the buffer flowing through a chain.
#[derive(Debug, Clone)]
pub struct Finisher {
    image: RgbaImage,
    grid_size: u32,
    orphans_removed: usize,
}

impl Finisher {
    pub fn new(image: DynamicImage) -> Self {
        Self::from_rgba(image.into_rgba8())
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            image,
            grid_size: 1,
            orphans_removed: 0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Pixels removed by the last `remove_orphan_pixels` call.
    pub fn orphans_removed(&self) -> usize {
        self.orphans_removed
    }

    pub fn clean_alpha(mut self, threshold: u8) -> Self {
        let cleared = cleanup::clean_alpha(&mut self.image, threshold);
        info!("Alpha cleaned (threshold={}, cleared={})", threshold, cleared);
        self
    }

    pub fn remove_orphan_pixels(mut self, min_neighbors: usize) -> Self {
        self.orphans_removed = cleanup::remove_orphan_pixels(&mut self.image, min_neighbors);
        info!("Orphan pixels removed ({})", self.orphans_removed);
        self
    }

    /// Record the grid the image should sit on and report whether it does.
    /// Never changes the image.
    pub fn align_to_grid(mut self, grid_size: u32) -> Self {
        let (cols, rows) = self.image.dimensions();
        if crate::core::processing::validate::is_grid_aligned(cols, rows, grid_size) {
            info!("Grid aligned ({}x{} on {})", cols, rows, grid_size);
        } else {
            warn!("Grid misaligned ({}x{} vs {})", cols, rows, grid_size);
        }
        self.grid_size = grid_size;
        self
    }

    /// `None` leaves the buffer untouched.
    pub fn quantize_palette(mut self, colors: Option<u16>) -> Result<Self> {
        match colors {
            None => info!("Palette quantization skipped"),
            Some(colors) => {
                self.image = quantize::quantize_palette(&self.image, colors)?;
                info!("Palette quantized ({} colors)", colors);
            }
        }
        Ok(self)
    }

    /// Checks against the grid given to `align_to_grid`, or 1 if none was.
    pub fn validate(&self) -> ValidationReport {
        let report = validate(&self.image, self.grid_size);
        info!("Validation: {}", report);
        report
    }

    /// Lossless write of the buffer as-is; cropping already happened upstream.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_png(&self.image, path)?;
        info!("Final output saved: {:?}", path);
        Ok(())
    }
}
