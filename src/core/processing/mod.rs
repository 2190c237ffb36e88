pub mod cleanup;
pub mod crop;
pub mod finish;
pub mod quantize;
pub mod resize;
pub mod validate;
