//! Decoded image buffers and the sampling done on them

/// RGBA8 buffers and readiness checks
pub mod buffer;
/// Brightness sampling at cell centres
pub mod sampling;

pub use buffer::{RasterImage, Readiness};
