//! Core processing building blocks: nearest-neighbor resize and autocrop, alpha and
//! orphan cleanup, palette quantization, validation, and the stateful Resizer and
//! Finisher stages. These are consumed by the high-level `api` module.
pub mod params;
pub mod processing;
