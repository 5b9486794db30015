//! Render configuration and grid derivation for a given target size
//!
//! Nominal cell sizes are defined at the reference resolution. Every render
//! target derives its effective cell size from a single width-based factor,
//! so preview and full renders of the same scene line up cell for cell.

use crate::io::configuration::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH,
};
use crate::io::error::{Result, invalid_parameter};

/// Smallest nominal cell edge accepted at the reference resolution
pub const MIN_CELL_SIZE: f64 = 1.0;

/// Opaque white, painted before any stamp is composited
pub const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Dimensions of one render target in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl TargetSize {
    /// Validate and build a target size
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be positive"));
        }
        if height == 0 {
            return Err(invalid_parameter("height", &height, &"must be positive"));
        }
        Ok(Self { width, height })
    }

    /// Same aspect ratio as `self`, scaled to the given width
    ///
    /// The height is rounded and never drops below one pixel.
    pub fn with_width(self, width: u32) -> Self {
        let width = width.max(1);
        let height = (f64::from(self.height) * f64::from(width) / f64::from(self.width))
            .round()
            .max(1.0) as u32;
        Self { width, height }
    }

    /// Total pixel count
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Everything a render needs besides the two input images
///
/// Owned by the calling application and passed into each render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Resolution at which the nominal cell size is defined
    pub reference: TargetSize,
    /// Cell width at the reference resolution
    pub cell_width: f64,
    /// Cell height at the reference resolution
    pub cell_height: f64,
    /// Added to the brightness-derived scale before clamping
    pub scale_bias: f64,
    /// Fill color painted before compositing
    pub background: [u8; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            reference: TargetSize {
                width: DEFAULT_OUTPUT_WIDTH,
                height: DEFAULT_OUTPUT_HEIGHT,
            },
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            scale_bias: 0.0,
            background: BACKGROUND,
        }
    }
}

impl RenderConfig {
    /// Build a configuration with the default bias and background
    ///
    /// # Errors
    ///
    /// Returns an error if a cell dimension is not finite or is smaller than
    /// [`MIN_CELL_SIZE`]
    pub fn new(reference: TargetSize, cell_width: f64, cell_height: f64) -> Result<Self> {
        let config = Self {
            reference,
            cell_width,
            cell_height,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the scale bias
    #[must_use]
    pub const fn with_scale_bias(mut self, scale_bias: f64) -> Self {
        self.scale_bias = scale_bias;
        self
    }

    /// Check every numeric parameter
    ///
    /// # Errors
    ///
    /// Returns an error if the reference size is zero, a cell dimension is not
    /// finite or is under [`MIN_CELL_SIZE`], or the scale bias is not finite
    pub fn validate(&self) -> Result<()> {
        TargetSize::new(self.reference.width, self.reference.height)?;
        if !(self.cell_width.is_finite() && self.cell_width >= MIN_CELL_SIZE) {
            return Err(invalid_parameter(
                "cell_width",
                &self.cell_width,
                &"must be a finite number of at least one pixel",
            ));
        }
        if !(self.cell_height.is_finite() && self.cell_height >= MIN_CELL_SIZE) {
            return Err(invalid_parameter(
                "cell_height",
                &self.cell_height,
                &"must be a finite number of at least one pixel",
            ));
        }
        if !self.scale_bias.is_finite() {
            return Err(invalid_parameter(
                "scale_bias",
                &self.scale_bias,
                &"must be finite",
            ));
        }
        Ok(())
    }
}

/// Grid geometry for one render target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Target width over reference width, applied to both axes
    pub scale_factor: f64,
    /// Cell width in target pixels
    pub cell_width: f64,
    /// Cell height in target pixels
    pub cell_height: f64,
    /// Whole cells that fit horizontally
    pub cols: u32,
    /// Whole cells that fit vertically
    pub rows: u32,
}

impl GridSpec {
    /// Derive the grid for `target` from a validated configuration
    ///
    /// Partial cells at the right and bottom edges are dropped.
    pub fn derive(config: &RenderConfig, target: TargetSize) -> Self {
        let scale_factor = f64::from(target.width) / f64::from(config.reference.width);
        let cell_width = config.cell_width * scale_factor;
        let cell_height = config.cell_height * scale_factor;

        // Integer products are exact in f64, so each count is a single rounding
        // and same-aspect targets agree with the reference grid
        let reference_width = f64::from(config.reference.width);
        let cols = (f64::from(target.width) * reference_width
            / (config.cell_width * f64::from(target.width)))
        .floor() as u32;
        let rows = (f64::from(target.height) * reference_width
            / (config.cell_height * f64::from(target.width)))
        .floor() as u32;

        Self {
            scale_factor,
            cell_width,
            cell_height,
            cols,
            rows,
        }
    }

    /// Number of cells in the grid
    pub const fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Top-left corner of cell `(col, row)` in target space
    pub fn origin(&self, col: u32, row: u32) -> (f64, f64) {
        (
            f64::from(col) * self.cell_width,
            f64::from(row) * self.cell_height,
        )
    }

    /// Centre of cell `(col, row)` in target space
    pub fn center(&self, col: u32, row: u32) -> (f64, f64) {
        (
            (f64::from(col) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }
}
