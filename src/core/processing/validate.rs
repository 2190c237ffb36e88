use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::core::processing::quantize::unique_colors;
use crate::types::QualityStatus;

/// Alpha above this counts as opaque in the report.
pub const OPAQUE_ALPHA_FLOOR: u8 = 200;
/// Fewer semi-transparent pixels than this is required for `OK`.
pub const SEMI_TRANSPARENT_LIMIT: usize = 50;

/// Read-only summary produced once per finished image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub size: (u32, u32),
    pub opaque_pixel_count: usize,
    pub semi_transparent_pixel_count: usize,
    pub unique_color_count: usize,
    pub grid_size: u32,
    pub grid_aligned: bool,
    pub quality: QualityStatus,
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}x{}, {} colors, {} opaque, {} semi-transparent, grid {} {})",
            self.quality,
            self.size.0,
            self.size.1,
            self.unique_color_count,
            self.opaque_pixel_count,
            self.semi_transparent_pixel_count,
            self.grid_size,
            if self.grid_aligned { "aligned" } else { "misaligned" },
        )
    }
}

/// Both dimensions are exact multiples of `grid_size`. A zero grid never aligns.
pub fn is_grid_aligned(cols: u32, rows: u32, grid_size: u32) -> bool {
    grid_size != 0 && cols % grid_size == 0 && rows % grid_size == 0
}

pub fn validate(image: &RgbaImage, grid_size: u32) -> ValidationReport {
    let (cols, rows) = image.dimensions();

    let mut opaque = 0;
    let mut semi_transparent = 0;
    for pixel in image.pixels() {
        match pixel[3] {
            0 => {}
            a if a > OPAQUE_ALPHA_FLOOR => opaque += 1,
            _ => semi_transparent += 1,
        }
    }

    let grid_aligned = is_grid_aligned(cols, rows, grid_size);
    let quality = if semi_transparent < SEMI_TRANSPARENT_LIMIT && grid_aligned {
        QualityStatus::Ok
    } else {
        QualityStatus::Check
    };

    ValidationReport {
        size: (cols, rows),
        opaque_pixel_count: opaque,
        semi_transparent_pixel_count: semi_transparent,
        unique_color_count: unique_colors(image),
        grid_size,
        grid_aligned,
        quality,
    }
}
