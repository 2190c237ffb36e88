use std::collections::VecDeque;

use image::{DynamicImage, Rgba, RgbaImage};
use ndarray::Array2;
use tracing::debug;

use crate::error::Result;

/// Background-removal collaborator: image in, image with a transparent background out.
///
/// Implementations may add an alpha channel; the preparer normalizes to RGBA afterwards.
pub trait BackgroundRemover {
    fn name(&self) -> &str;
    fn remove(&self, image: DynamicImage) -> Result<DynamicImage>;
}

/// Leaves the image as it is. Useful for sources that are already cut out.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRemover;

impl BackgroundRemover for PassthroughRemover {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn remove(&self, image: DynamicImage) -> Result<DynamicImage> {
        Ok(image)
    }
}

/// Color-key removal seeded from the image border.
///
/// The background color is the most frequent of the four corners. Every pixel
/// reachable from the border through 4-connected pixels within `tolerance` of that
/// color (per channel) becomes fully transparent; interior regions of the same
/// color that are enclosed by the subject are kept.
#[derive(Debug, Clone, Copy)]
pub struct BorderKeyRemover {
    pub tolerance: u8,
}

impl Default for BorderKeyRemover {
    fn default() -> Self {
        Self { tolerance: 24 }
    }
}

impl BorderKeyRemover {
    fn matches(&self, pixel: &Rgba<u8>, key: &Rgba<u8>) -> bool {
        pixel[3] > 0
            && pixel
                .0
                .iter()
                .zip(key.0.iter())
                .take(3)
                .all(|(&a, &b)| a.abs_diff(b) <= self.tolerance)
    }
}

/// Most frequent corner color; ties go to the earliest of TL, TR, BL, BR.
pub fn estimate_background(image: &RgbaImage) -> Rgba<u8> {
    let (cols, rows) = image.dimensions();
    let corners = [
        *image.get_pixel(0, 0),
        *image.get_pixel(cols - 1, 0),
        *image.get_pixel(0, rows - 1),
        *image.get_pixel(cols - 1, rows - 1),
    ];
    let mut best = corners[0];
    let mut best_count = 0;
    for candidate in corners {
        let count = corners.iter().filter(|&&c| c == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

impl BackgroundRemover for BorderKeyRemover {
    fn name(&self) -> &str {
        "border-key"
    }

    fn remove(&self, image: DynamicImage) -> Result<DynamicImage> {
        let mut rgba = image.into_rgba8();
        let (cols, rows) = rgba.dimensions();
        if cols == 0 || rows == 0 {
            return Ok(DynamicImage::ImageRgba8(rgba));
        }

        let key = estimate_background(&rgba);
        if key[3] == 0 {
            debug!("Border already transparent; nothing to key out");
            return Ok(DynamicImage::ImageRgba8(rgba));
        }

        let mut visited = Array2::<bool>::from_elem((rows as usize, cols as usize), false);
        let mut queue = VecDeque::new();
        let border = (0..cols)
            .flat_map(|x| [(x, 0), (x, rows - 1)])
            .chain((0..rows).flat_map(|y| [(0, y), (cols - 1, y)]));
        for (x, y) in border {
            let idx = (y as usize, x as usize);
            if !visited[idx] && self.matches(rgba.get_pixel(x, y), &key) {
                visited[idx] = true;
                queue.push_back((x, y));
            }
        }

        let mut cleared = 0usize;
        while let Some((x, y)) = queue.pop_front() {
            rgba.get_pixel_mut(x, y)[3] = 0;
            cleared += 1;

            let neighbors = [
                (x.checked_sub(1), Some(y)),
                ((x + 1 < cols).then_some(x + 1), Some(y)),
                (Some(x), y.checked_sub(1)),
                (Some(x), (y + 1 < rows).then_some(y + 1)),
            ];
            for (nx, ny) in neighbors {
                let (Some(nx), Some(ny)) = (nx, ny) else {
                    continue;
                };
                let idx = (ny as usize, nx as usize);
                if !visited[idx] && self.matches(rgba.get_pixel(nx, ny), &key) {
                    visited[idx] = true;
                    queue.push_back((nx, ny));
                }
            }
        }

        debug!("Border key {:?} cleared {} pixels", key.0, cleared);
        Ok(DynamicImage::ImageRgba8(rgba))
    }
}
