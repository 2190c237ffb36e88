use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader, RgbaImage};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ImageExtension;

/// Check that `path` exists and carries a supported extension, in that order.
/// Only metadata is touched; the file is not opened.
pub fn check_source(path: &Path) -> Result<ImageExtension> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    ImageExtension::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })
}

/// Decode an image, sniffing the format from content rather than the extension.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let decode_error = |source: ImageError| Error::Decode {
        path: path.to_path_buf(),
        source,
    };
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?;
    debug!(
        "Loaded {:?}: {}x{} {:?}",
        path,
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(load_image(path)?.into_rgba8())
}
