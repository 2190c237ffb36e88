mod common;

use std::fs;

use pixskin::logging::LogCapture;
use pixskin::{Error, PipelineConfig};
use tracing_subscriber::layer::SubscriberExt;

use common::{passthrough, write_corrupt, write_cutout_png, write_sprite_jpeg};

#[test]
fn empty_folder_returns_nothing_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("readme.txt"), b"no images here").unwrap();

    let results = passthrough(PipelineConfig::default())
        .process_folder(dir.path())
        .unwrap();

    assert!(results.is_empty());
    assert!(!dir.path().join("pixskin_output").exists());
}

#[test]
fn file_path_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_cutout_png(&dir.path().join("gem.png"));

    let err = passthrough(PipelineConfig::default())
        .process_folder(&file)
        .unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));

    let err = passthrough(PipelineConfig::default())
        .process_folder(&dir.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));
}

#[test]
fn one_corrupt_image_is_logged_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_cutout_png(&dir.path().join("a_gem.png"));
    write_corrupt(&dir.path().join("b_broken.png"));
    write_sprite_jpeg(&dir.path().join("c_knight.jpg"));

    let capture = LogCapture::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let converter = passthrough(PipelineConfig::default());

    let results = tracing::subscriber::with_default(subscriber, || {
        converter.process_folder(dir.path()).unwrap()
    });

    let names: Vec<String> = results
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a_gem_final.png", "c_knight_final.png"]);
    assert!(results.iter().all(|p| p.is_file()));

    let errors = capture.entries_at(tracing::Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("b_broken.png"), "{}", errors[0].message);

    let summary = capture
        .entries_at(tracing::Level::INFO)
        .into_iter()
        .any(|e| e.message.contains("(2/3)"));
    assert!(summary, "missing batch summary");
}

#[test]
fn outputs_follow_extension_group_order() {
    let dir = tempfile::tempdir().unwrap();
    write_sprite_jpeg(&dir.path().join("a.jpeg"));
    write_sprite_jpeg(&dir.path().join("b.jpg"));
    write_cutout_png(&dir.path().join("z.png"));
    write_cutout_png(&dir.path().join("m.png"));

    let results = passthrough(PipelineConfig::default())
        .process_folder(dir.path())
        .unwrap();

    let names: Vec<String> = results
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        ["m_final.png", "z_final.png", "b_final.png", "a_final.png"]
    );

    let output_dir = fs::canonicalize(dir.path()).unwrap().join("pixskin_output");
    assert!(results.iter().all(|p| p.parent().unwrap() == output_dir));
    assert!(output_dir.join(".pixskin_temp/02_resize/m_downscaled.png").is_file());
}

#[test]
fn rerunning_a_batch_reuses_existing_folders() {
    let dir = tempfile::tempdir().unwrap();
    write_cutout_png(&dir.path().join("gem.png"));
    let converter = passthrough(PipelineConfig::default());

    let first = converter.process_folder(dir.path()).unwrap();
    let second = converter.process_folder(dir.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.len(), 1);
}

#[test]
fn shared_stem_is_warned_about() {
    let dir = tempfile::tempdir().unwrap();
    write_cutout_png(&dir.path().join("a.png"));
    write_sprite_jpeg(&dir.path().join("a.jpg"));

    let capture = LogCapture::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let converter = passthrough(PipelineConfig::default());

    let results = tracing::subscriber::with_default(subscriber, || {
        converter.process_folder(dir.path()).unwrap()
    });
    assert_eq!(results.len(), 2);

    let warned = capture
        .entries_at(tracing::Level::WARN)
        .into_iter()
        .any(|e| e.message.contains("a_final.png") && e.message.contains("a.jpg"));
    assert!(warned, "missing collision warning");
}
