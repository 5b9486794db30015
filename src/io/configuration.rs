//! Rendering constants and runtime configuration defaults

// Grid geometry, defined at the reference (full) resolution
/// Nominal cell width in reference pixels
pub const DEFAULT_CELL_WIDTH: f64 = 24.0;
/// Nominal cell height in reference pixels (2.4:1 cells)
pub const DEFAULT_CELL_HEIGHT: f64 = 10.0;

/// Full resolution output width
pub const DEFAULT_OUTPUT_WIDTH: u32 = 640 * 7;
/// Full resolution output height
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 480 * 7;

/// Preview width; the preview height follows the output aspect ratio
pub const DEFAULT_PREVIEW_WIDTH: u32 = 640;

// Stamps are resized to a multiple of the cell size before any render
/// Stamp oversampling factor (0 keeps the decoded stamp untouched)
pub const DEFAULT_STAMP_OVERSAMPLE: u32 = 4;

// Output settings
/// Suffix added to full resolution output filenames
pub const OUTPUT_SUFFIX: &str = "_pattern";
/// Suffix added to preview output filenames
pub const PREVIEW_SUFFIX: &str = "_preview";
/// Extensions accepted as source images
pub const SOURCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// File that remembers the last used images and dimensions
pub const DEFAULT_SETTINGS_FILE: &str = "stampgrid.json";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Stages reported per file: decode, preview, full, export
pub const STAGES_PER_FILE: usize = 4;
