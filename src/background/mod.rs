//! Background stage: the removal collaborator seam (`remover`) and the
//! `BackgroundPreparer` that turns a decoded source into an RGBA buffer.
pub mod preparer;
pub mod remover;

pub use preparer::BackgroundPreparer;
pub use remover::{BackgroundRemover, BorderKeyRemover, PassthroughRemover};
