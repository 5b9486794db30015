//! Mathematical utilities for the renderer

/// Linear range mapping and clamping
pub mod mapping;
