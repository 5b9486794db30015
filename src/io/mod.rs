//! Everything between the renderer and the outside world

/// Command-line parsing and batch processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Image decoding and PNG export
pub mod image;
/// Tracing subscriber initialisation
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Settings persisted between sessions
pub mod settings;
