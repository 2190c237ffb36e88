use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest palette the quantizer accepts.
pub const MAX_PALETTE_COLORS: u16 = 256;

/// Pipeline parameters suitable for config files and CLI presets.
/// Fixed for the lifetime of a converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Downscale target (width, height); both > 0
    pub downscale_size: (u32, u32),
    /// Integer nearest-neighbor upscale factor; >= 1
    pub upscale_factor: u32,
    /// Pixels with alpha below this are cleared
    pub alpha_threshold: u8,
    /// Write background-removed and downscaled artifacts under `.pixskin_temp`
    pub preserve_intermediates: bool,
    /// Run the background-removal collaborator before resizing
    pub remove_background: bool,
    /// Optional palette size for the finishing stage (1..=256)
    pub palette_colors: Option<u16>,
    /// Optional grid the final image must align to
    pub grid_size: Option<u32>,
    /// Opaque pixels with fewer 4-connected opaque neighbors are cleared
    pub min_neighbors: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            downscale_size: (80, 80),
            upscale_factor: 2,
            alpha_threshold: 20,
            preserve_intermediates: true,
            remove_background: true,
            palette_colors: None,
            grid_size: None,
            min_neighbors: 1,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.downscale_size;
        if width == 0 || height == 0 {
            return Err(Error::invalid(
                "downscale_size",
                format!("{}x{}", width, height),
            ));
        }
        if self.upscale_factor == 0 {
            return Err(Error::invalid("upscale_factor", self.upscale_factor));
        }
        if let Some(colors) = self.palette_colors {
            if colors == 0 || colors > MAX_PALETTE_COLORS {
                return Err(Error::invalid("palette_colors", colors));
            }
        }
        if self.grid_size == Some(0) {
            return Err(Error::invalid("grid_size", 0));
        }
        Ok(())
    }

    /// Load and validate a JSON config; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
