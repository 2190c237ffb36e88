use image::RgbaImage;
use image::imageops;
use tracing::{debug, info};

/// Minimal rectangle `(x, y, width, height)` holding every pixel with alpha > 0.
/// `None` when the image is fully transparent.
pub fn alpha_bounding_box(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        found = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Crop to the non-transparent content. Fully transparent images come back unchanged.
pub fn autocrop(image: RgbaImage) -> RgbaImage {
    let (cols, rows) = image.dimensions();
    match alpha_bounding_box(&image) {
        Some((x, y, width, height)) if (width, height) != (cols, rows) => {
            info!(
                "Autocrop: {}x{} -> {}x{} at ({}, {})",
                cols, rows, width, height, x, y
            );
            imageops::crop_imm(&image, x, y, width, height).to_image()
        }
        Some(_) => image,
        None => {
            debug!("Autocrop skipped: image is fully transparent");
            image
        }
    }
}
