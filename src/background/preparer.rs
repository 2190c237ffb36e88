use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use tracing::info;

use crate::background::remover::BackgroundRemover;
use crate::error::{Error, Result};
use crate::io::layout::ensure_png;
use crate::io::reader::load_image;
use crate::io::writers::png::write_png;

#[derive(Debug, Clone)]
enum PrepState {
    Loaded,
    Prepared(RgbaImage),
}

/// First pipeline stage: decodes the source, optionally strips its background and
/// normalizes the result to RGBA.
#[derive(Debug, Clone)]
pub struct BackgroundPreparer {
    path: PathBuf,
    source: DynamicImage,
    state: PrepState,
}

impl BackgroundPreparer {
    /// Decode `path`; fails with `Decode` if it cannot be opened or decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let source = load_image(path)?;
        Ok(Self::from_image(path, source))
    }

    /// Wrap an already decoded image. `path` is used for naming and logs only.
    pub fn from_image(path: &Path, source: DynamicImage) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
            state: PrepState::Loaded,
        }
    }

    /// Run the remover (if any) and convert to RGBA. A repeated call starts from the
    /// previous call's output instead of the decoded source.
    pub fn process(&mut self, remover: Option<&dyn BackgroundRemover>) -> Result<&RgbaImage> {
        let input = match std::mem::replace(&mut self.state, PrepState::Loaded) {
            PrepState::Prepared(previous) => DynamicImage::ImageRgba8(previous),
            PrepState::Loaded => self.source.clone(),
        };

        let output = match remover {
            Some(remover) => {
                let removed = remover.remove(input)?;
                info!(
                    "Background removed ({}): {:?}",
                    remover.name(),
                    self.path.file_name().unwrap_or_default()
                );
                removed
            }
            None => input,
        };

        self.state = PrepState::Prepared(output.into_rgba8());
        self.prepared()
    }

    pub fn prepared(&self) -> Result<&RgbaImage> {
        match &self.state {
            PrepState::Prepared(image) => Ok(image),
            PrepState::Loaded => Err(Error::NotReady {
                stage: "background preparation",
            }),
        }
    }

    /// Write the prepared image as PNG (extension forced). Returns the written path.
    pub fn save_prepared(&self, path: &Path) -> Result<PathBuf> {
        let image = self.prepared()?;
        let output = ensure_png(path);
        write_png(image, &output)?;
        info!("Prepared image saved: {:?}", output);
        Ok(output)
    }

    /// Hand the prepared buffer to the next stage.
    pub fn into_prepared(self) -> Result<RgbaImage> {
        match self.state {
            PrepState::Prepared(image) => Ok(image),
            PrepState::Loaded => Err(Error::NotReady {
                stage: "background preparation",
            }),
        }
    }
}
