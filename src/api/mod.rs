//! High-level library API: the `PixelArtConverter` orchestrator, which runs
//! background preparation, nearest-neighbor downscale and upscale, and the finishing
//! pass over one image or a folder of images. Prefer these entrypoints over the
//! individual stages when integrating PixSkin.
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::background::{BackgroundPreparer, BackgroundRemover, BorderKeyRemover};
use crate::core::params::PipelineConfig;
use crate::core::processing::finish::Finisher;
use crate::core::processing::resize::Resizer;
use crate::core::processing::validate::ValidationReport;
use crate::error::{Error, Result};
use crate::io::layout::{
    BATCH_OUTPUT_DIR_NAME, IntermediateFolders, TEMP_DIR_NAME, list_images, output_name,
};
use crate::io::reader::{check_source, load_image};
use crate::types::{IntermediateStage, OutputSuffix};

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Polished `<stem>_final.png`
    pub final_path: PathBuf,
    /// Autocropped, upscaled `<stem>_pixelart.png` the finishing pass reloaded
    pub pixelart_path: PathBuf,
    /// Observational artifacts written under `.pixskin_temp`, in stage order
    pub intermediates: Vec<(IntermediateStage, PathBuf)>,
    pub report: ValidationReport,
}

/// Converter from raster images to pixel art.
///
/// Configuration is fixed at construction. Runs are sequential and share no state
/// across images.
pub struct PixelArtConverter {
    config: PipelineConfig,
    remover: Box<dyn BackgroundRemover>,
}

impl std::fmt::Debug for PixelArtConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelArtConverter")
            .field("config", &self.config)
            .field("remover", &self.remover.name())
            .finish()
    }
}

impl PixelArtConverter {
    /// Validate `config` and use the built-in border-key background remover.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_remover(config, Box::new(BorderKeyRemover::default()))
    }

    /// Validate `config` and use `remover` as the background-removal collaborator.
    pub fn with_remover(
        config: PipelineConfig,
        remover: Box<dyn BackgroundRemover>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, remover })
    }

    /// Convert one image, writing outputs next to it. Returns the final image path.
    pub fn process_image(&self, path: &Path) -> Result<PathBuf> {
        let path = resolve_source(path)?;
        let output_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(self.run(&path, &output_dir)?.final_path)
    }

    /// Convert one image into `output_dir`. Returns the final image path.
    pub fn process_image_to(&self, path: &Path, output_dir: &Path) -> Result<PathBuf> {
        Ok(self.process_image_with_report(path, output_dir)?.final_path)
    }

    /// Convert one image into `output_dir` and return every artifact plus the report.
    pub fn process_image_with_report(
        &self,
        path: &Path,
        output_dir: &Path,
    ) -> Result<PipelineOutput> {
        self.run(&resolve_source(path)?, output_dir)
    }

    /// `path` has already passed `resolve_source`.
    fn run(&self, path: &Path, output_dir: &Path) -> Result<PipelineOutput> {
        let name = path.file_name().unwrap_or_default();
        info!("Processing image: {:?}", name);

        fs::create_dir_all(output_dir)?;
        let folders = if self.config.preserve_intermediates {
            Some(IntermediateFolders::setup(&output_dir.join(TEMP_DIR_NAME))?)
        } else {
            None
        };
        let mut intermediates = Vec::new();

        // Background
        let mut prep = BackgroundPreparer::open(path)?;
        let remover = self
            .config
            .remove_background
            .then_some(self.remover.as_ref());
        prep.process(remover)?;
        if let Some(folders) = &folders {
            let target = folders.artifact_path(
                IntermediateStage::Input,
                path,
                OutputSuffix::BackgroundRemoved,
            );
            intermediates.push((IntermediateStage::Input, prep.save_prepared(&target)?));
        }

        // Downscale
        let mut resizer =
            Resizer::new(prep.into_prepared()?).downscale(self.config.downscale_size)?;
        if let Some(folders) = &folders {
            let target =
                folders.artifact_path(IntermediateStage::Resize, path, OutputSuffix::Downscaled);
            intermediates.push((IntermediateStage::Resize, resizer.save(&target)?));
        }

        // Upscale, then persist the pixel art
        resizer = resizer.upscale(self.config.upscale_factor)?;
        let pixelart_path =
            resizer.save(&output_dir.join(output_name(path, OutputSuffix::PixelArt)))?;
        drop(resizer);

        // Finish from the file on disk, not the in-memory buffer
        let mut finisher = Finisher::new(load_image(&pixelart_path)?)
            .clean_alpha(self.config.alpha_threshold)
            .remove_orphan_pixels(self.config.min_neighbors)
            .quantize_palette(self.config.palette_colors)?;
        match self.config.grid_size {
            Some(grid_size) => finisher = finisher.align_to_grid(grid_size),
            None => debug!("No grid configured; grid check is trivially satisfied"),
        }
        let report = finisher.validate();

        let final_path = output_dir.join(output_name(path, OutputSuffix::Final));
        finisher.save(&final_path)?;
        info!("Output saved: {:?}", final_path.file_name().unwrap_or_default());

        Ok(PipelineOutput {
            final_path,
            pixelart_path,
            intermediates,
            report,
        })
    }

    /// Convert every supported image directly inside `folder` into
    /// `<folder>/pixskin_output`.
    ///
    /// A failing image is logged and skipped; the result holds the final paths of
    /// the images that succeeded, in listing order.
    pub fn process_folder(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            return Err(Error::NotADirectory {
                path: folder.to_path_buf(),
            });
        }
        let folder = fs::canonicalize(folder)?;

        let images = list_images(&folder)?;
        if images.is_empty() {
            warn!("No images found in {:?}", folder);
            return Ok(Vec::new());
        }

        info!(
            "Processing {} images from {:?}",
            images.len(),
            folder.file_name().unwrap_or_default()
        );

        let output_dir = folder.join(BATCH_OUTPUT_DIR_NAME);
        fs::create_dir_all(&output_dir)?;

        let mut results = Vec::with_capacity(images.len());
        let mut claimed: HashMap<String, &Path> = HashMap::new();
        for image_path in &images {
            let final_name = output_name(image_path, OutputSuffix::Final);
            if let Some(earlier) = claimed.insert(final_name.clone(), image_path) {
                warn!(
                    "{:?} and {:?} both write {:?}; the later one overwrites",
                    earlier.file_name().unwrap_or_default(),
                    image_path.file_name().unwrap_or_default(),
                    final_name
                );
            }
            match self.process_image_to(image_path, &output_dir) {
                Ok(final_path) => results.push(final_path),
                Err(e) => {
                    error!(
                        "Failed to process {:?}: {}",
                        image_path.file_name().unwrap_or_default(),
                        e
                    );
                }
            }
        }

        info!(
            "Batch processing completed ({}/{})",
            results.len(),
            images.len()
        );
        Ok(results)
    }
}

/// Check existence and extension, then canonicalize.
fn resolve_source(path: &Path) -> Result<PathBuf> {
    check_source(path)?;
    Ok(fs::canonicalize(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::PassthroughRemover;
    use image::{Rgba, RgbaImage};

    fn converter(config: PipelineConfig) -> PixelArtConverter {
        PixelArtConverter::with_remover(config, Box::new(PassthroughRemover)).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = PipelineConfig {
            upscale_factor: 0,
            ..Default::default()
        };
        assert!(matches!(
            PixelArtConverter::new(config),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn intermediates_are_reported_in_stage_order() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("blob.png");
        RgbaImage::from_pixel(8, 8, Rgba([30, 60, 90, 255]))
            .save(&src)
            .unwrap();

        let out = converter(PipelineConfig {
            downscale_size: (4, 4),
            ..Default::default()
        })
        .process_image_with_report(&src, dir.path())
        .unwrap();

        let stages: Vec<IntermediateStage> = out.intermediates.iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, [IntermediateStage::Input, IntermediateStage::Resize]);
        assert!(out.intermediates.iter().all(|(_, p)| p.is_file()));
        assert!(out.pixelart_path.is_file());
        assert_eq!(out.report.size, (8, 8));
    }

    #[test]
    fn no_intermediates_means_no_temp_tree() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("blob.png");
        RgbaImage::from_pixel(8, 8, Rgba([30, 60, 90, 255]))
            .save(&src)
            .unwrap();

        let out = converter(PipelineConfig {
            preserve_intermediates: false,
            ..Default::default()
        })
        .process_image_with_report(&src, dir.path())
        .unwrap();

        assert!(out.intermediates.is_empty());
        assert!(!dir.path().join(TEMP_DIR_NAME).exists());
    }
}
