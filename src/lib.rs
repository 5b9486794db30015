//! Halftone-style mosaics built by stamping a pattern image on a regular grid
//!
//! Brightness is sampled from a source image at the centre of every grid
//! cell and mapped to a scale for that cell's copy of the stamp. The same
//! render runs at preview and full resolution, with cell sizes defined once
//! at the full (reference) resolution.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// Range mapping used for the brightness-to-scale curve
pub mod math;
/// RGBA input buffers and brightness sampling
pub mod raster;
/// Grid derivation, cell layout, compositing and the renderer itself
pub mod render;

pub use io::error::{Result, StampError};
pub use raster::buffer::RasterImage;
pub use render::grid::{RenderConfig, TargetSize};
pub use render::renderer::{PatternRenderer, RenderTarget};
