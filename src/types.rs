//! Shared types and enums used across PixSkin.
//! Includes `IntermediateStage`, `ImageExtension`, `OutputSuffix` and `QualityStatus`.
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Named intermediate stages, in pipeline order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntermediateStage {
    Input,
    Resize,
    Final,
}

impl IntermediateStage {
    pub const ALL: [IntermediateStage; 3] = [
        IntermediateStage::Input,
        IntermediateStage::Resize,
        IntermediateStage::Final,
    ];

    /// Directory name under the temp root, e.g. `01_input`.
    pub fn dir_name(self) -> &'static str {
        match self {
            IntermediateStage::Input => "01_input",
            IntermediateStage::Resize => "02_resize",
            IntermediateStage::Final => "03_final",
        }
    }
}

impl std::fmt::Display for IntermediateStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IntermediateStage::Input => "input",
            IntermediateStage::Resize => "resize",
            IntermediateStage::Final => "final",
        };
        write!(f, "{}", s)
    }
}

/// Accepted source extensions. Declaration order is the folder listing order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ImageExtension {
    Png,
    Jpg,
    Jpeg,
}

impl ImageExtension {
    pub const LISTING_ORDER: [ImageExtension; 3] =
        [ImageExtension::Png, ImageExtension::Jpg, ImageExtension::Jpeg];

    pub fn as_str(self) -> &'static str {
        match self {
            ImageExtension::Png => "png",
            ImageExtension::Jpg => "jpg",
            ImageExtension::Jpeg => "jpeg",
        }
    }

    /// Case-insensitive match on the path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::LISTING_ORDER
            .into_iter()
            .find(|candidate| ext.eq_ignore_ascii_case(candidate.as_str()))
    }
}

/// Fixed filename suffixes for pipeline artifacts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OutputSuffix {
    BackgroundRemoved,
    Downscaled,
    PixelArt,
    Final,
}

impl OutputSuffix {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputSuffix::BackgroundRemoved => "_background_removed",
            OutputSuffix::Downscaled => "_downscaled",
            OutputSuffix::PixelArt => "_pixelart",
            OutputSuffix::Final => "_final",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum QualityStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "CHECK")]
    Check,
}

impl std::fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityStatus::Ok => write!(f, "OK"),
            QualityStatus::Check => write!(f, "CHECK"),
        }
    }
}
