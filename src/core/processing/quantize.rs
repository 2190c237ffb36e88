use std::collections::HashSet;

use color_quant::NeuQuant;
use image::RgbaImage;

use crate::core::params::MAX_PALETTE_COLORS;
use crate::error::{Error, Result};

// 1 samples every pixel; sprites are small enough that speed is not a concern.
const SAMPLE_FACTOR: i32 = 1;

pub fn unique_colors(image: &RgbaImage) -> usize {
    image.pixels().map(|p| p.0).collect::<HashSet<[u8; 4]>>().len()
}

/// Distinct RGB values among pixels with non-zero alpha.
pub fn unique_visible_colors(image: &RgbaImage) -> usize {
    image
        .pixels()
        .filter(|p| p[3] > 0)
        .map(|p| [p[0], p[1], p[2]])
        .collect::<HashSet<[u8; 3]>>()
        .len()
}

/// Map the visible pixels onto a palette of at most `colors` RGB entries.
///
/// The palette is trained on pixels with non-zero alpha only, and only RGB is
/// written back: every pixel keeps its alpha, and fully transparent pixels are
/// left untouched. Images already within the limit are returned as-is.
pub fn quantize_palette(image: &RgbaImage, colors: u16) -> Result<RgbaImage> {
    if colors == 0 || colors > MAX_PALETTE_COLORS {
        return Err(Error::invalid("palette_colors", colors));
    }
    if unique_visible_colors(image) <= colors as usize {
        return Ok(image.clone());
    }

    let visible: Vec<u8> = image
        .pixels()
        .filter(|p| p[3] > 0)
        .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
        .collect();
    let quantizer = NeuQuant::new(SAMPLE_FACTOR, colors as usize, &visible);
    let palette = quantizer.color_map_rgb();

    let mut out = image.clone();
    for pixel in out.pixels_mut().filter(|p| p[3] > 0) {
        let index = quantizer.index_of(&[pixel[0], pixel[1], pixel[2], u8::MAX]) * 3;
        pixel.0[..3].copy_from_slice(&palette[index..index + 3]);
    }
    Ok(out)
}
