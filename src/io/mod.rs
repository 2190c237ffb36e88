//! I/O layer: source validation and decoding (`reader`), output naming and folder
//! layout (`layout`), and lossless `writers`.
pub mod layout;
pub mod reader;
pub mod writers;

pub use layout::{IntermediateFolders, ensure_png, list_images, output_name};
pub use reader::{check_source, load_image, load_rgba};
