//! Output naming and folder layout: `.png` normalization, artifact names,
//! the intermediate folder tree, and source listing for batch runs.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{ImageExtension, IntermediateStage, OutputSuffix};

/// Root of the intermediate tree inside an output directory.
pub const TEMP_DIR_NAME: &str = ".pixskin_temp";
/// Subdirectory of a batch folder receiving the outputs.
pub const BATCH_OUTPUT_DIR_NAME: &str = "pixskin_output";

/// Replace any non-`.png` extension with `.png`; paths without one get it appended.
pub fn ensure_png(path: &Path) -> PathBuf {
    let is_png = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// `<stem><suffix>.png`
pub fn output_name(source: &Path, suffix: OutputSuffix) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}.png", stem, suffix.as_str())
}

/// Stage directories under `<output>/.pixskin_temp`.
#[derive(Debug, Clone)]
pub struct IntermediateFolders {
    root: PathBuf,
    dirs: BTreeMap<IntermediateStage, PathBuf>,
}

impl IntermediateFolders {
    /// Create (or reuse) every stage directory under `root`.
    pub fn setup(root: &Path) -> Result<Self> {
        let mut dirs = BTreeMap::new();
        for stage in IntermediateStage::ALL {
            let dir = root.join(stage.dir_name());
            fs::create_dir_all(&dir)?;
            dirs.insert(stage, dir);
        }
        Ok(Self {
            root: root.to_path_buf(),
            dirs,
        })
    }

    pub fn dir(&self, stage: IntermediateStage) -> &Path {
        // setup() inserts every stage
        self.dirs
            .get(&stage)
            .map(PathBuf::as_path)
            .unwrap_or(self.root.as_path())
    }

    pub fn artifact_path(
        &self,
        stage: IntermediateStage,
        source: &Path,
        suffix: OutputSuffix,
    ) -> PathBuf {
        self.dir(stage).join(output_name(source, suffix))
    }
}

/// Supported images directly inside `dir`: every `.png` (sorted), then `.jpg`, then `.jpeg`.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut groups: BTreeMap<ImageExtension, Vec<PathBuf>> = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = ImageExtension::from_path(&path) {
            groups.entry(ext).or_default().push(path);
        }
    }

    let mut images = Vec::new();
    for ext in ImageExtension::LISTING_ORDER {
        if let Some(mut group) = groups.remove(&ext) {
            group.sort();
            images.extend(group);
        }
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_png_rewrites_other_extensions() {
        assert_eq!(ensure_png(Path::new("a/b.jpg")), PathBuf::from("a/b.png"));
        assert_eq!(ensure_png(Path::new("a/b.PNG")), PathBuf::from("a/b.PNG"));
        assert_eq!(ensure_png(Path::new("a/b")), PathBuf::from("a/b.png"));
    }

    #[test]
    fn output_name_uses_stem_and_suffix() {
        assert_eq!(
            output_name(Path::new("/x/cat.photo.jpeg"), OutputSuffix::PixelArt),
            "cat.photo_pixelart.png"
        );
        assert_eq!(
            output_name(Path::new("hero.png"), OutputSuffix::Final),
            "hero_final.png"
        );
    }

    #[test]
    fn setup_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(TEMP_DIR_NAME);

        let first = IntermediateFolders::setup(&root).unwrap();
        let second = IntermediateFolders::setup(&root).unwrap();

        for stage in IntermediateStage::ALL {
            assert!(first.dir(stage).is_dir());
            assert_eq!(first.dir(stage), second.dir(stage));
        }
        assert_eq!(
            first.artifact_path(
                IntermediateStage::Resize,
                Path::new("cat.jpg"),
                OutputSuffix::Downscaled,
            ),
            root.join("02_resize").join("cat_downscaled.png")
        );
    }

    #[test]
    fn listing_groups_by_extension_then_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.jpeg", "c.png", "a.png", "z.JPG", "notes.txt", "anim.gif"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = list_images(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.png", "c.png", "b.jpg", "z.JPG", "a.jpeg"]);
    }
}
