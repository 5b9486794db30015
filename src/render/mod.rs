//! The grid-sampling and compositing pipeline
//!
//! - `grid` derives cell geometry for a target size
//! - `layout` plans one placement per cell
//! - `stamp` composites a placement into the output
//! - `fallback` paints the error panel for unusable inputs
//! - `renderer` ties these together

/// Error panel for inputs without pixel data
pub mod fallback;
/// Render configuration and grid geometry
pub mod grid;
/// Per-cell placement planning
pub mod layout;
/// Public renderer entry points
pub mod renderer;
/// Stamp resampling and blending
pub mod stamp;

pub use grid::{GridSpec, RenderConfig, TargetSize};
pub use renderer::{PatternRenderer, RenderOutcome, RenderPair, RenderTarget};
