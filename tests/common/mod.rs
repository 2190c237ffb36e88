#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use pixskin::{PassthroughRemover, PipelineConfig, PixelArtConverter};

/// 64x48 white backdrop with a 24x24 red square at (20, 12). No alpha channel.
pub fn sprite_on_white() -> RgbImage {
    let mut img = RgbImage::from_pixel(64, 48, Rgb([255, 255, 255]));
    for y in 12..36 {
        for x in 20..44 {
            img.put_pixel(x, y, Rgb([200, 30, 30]));
        }
    }
    img
}

pub fn write_sprite_jpeg(path: &Path) -> PathBuf {
    sprite_on_white()
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
    path.to_path_buf()
}

pub fn write_sprite_png(path: &Path) -> PathBuf {
    sprite_on_white()
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
    path.to_path_buf()
}

/// 40x40 transparent canvas with a 24x24 opaque block at (4, 8).
pub fn write_cutout_png(path: &Path) -> PathBuf {
    let mut img = RgbaImage::new(40, 40);
    for y in 8..32 {
        for x in 4..28 {
            img.put_pixel(x, y, Rgba([20, 120, 220, 255]));
        }
    }
    img.save(path).unwrap();
    path.to_path_buf()
}

pub fn write_corrupt(path: &Path) -> PathBuf {
    std::fs::write(path, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();
    path.to_path_buf()
}

pub fn passthrough(config: PipelineConfig) -> PixelArtConverter {
    PixelArtConverter::with_remover(config, Box::new(PassthroughRemover)).unwrap()
}
