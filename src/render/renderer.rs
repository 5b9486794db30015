//! Grid-sampling halftone renderer
//!
//! A render is a pure function of the configuration, the two input images
//! and the target size. The same renderer produces both the interactive
//! preview and the export-quality full resolution output; only the target
//! size differs between the two.

use crate::io::error::Result;
use crate::raster::buffer::{RasterImage, Readiness};
use crate::render::fallback::{FailedInput, paint_error_panel};
use crate::render::grid::{GridSpec, RenderConfig, TargetSize};
use crate::render::layout::{Layout, plan};
use crate::render::stamp::composite;
use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

/// How a render finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every planned stamp was composited
    Complete {
        /// Stamps drawn
        drawn_cells: usize,
        /// Cells dropped by the source bound check
        skipped_cells: usize,
    },
    /// An input had no pixel data and the error panel was drawn instead
    ErrorPanel(FailedInput),
}

/// A filled output raster
#[derive(Debug, Clone)]
pub struct RenderTarget {
    image: RgbaImage,
    outcome: RenderOutcome,
}

impl RenderTarget {
    /// Output width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Output height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Rendered pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// How the render finished
    pub const fn outcome(&self) -> RenderOutcome {
        self.outcome
    }

    /// Take ownership of the rendered pixels
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Whether the error panel replaced the pattern
    pub const fn is_error_panel(&self) -> bool {
        matches!(self.outcome, RenderOutcome::ErrorPanel(_))
    }
}

/// Preview and full resolution renders of the same inputs
#[derive(Debug, Clone)]
pub struct RenderPair {
    /// Low resolution render for interactive display
    pub preview: RenderTarget,
    /// Export quality render
    pub full: RenderTarget,
}

/// Renders halftone mosaics for a fixed configuration
#[derive(Debug, Clone)]
pub struct PatternRenderer {
    config: RenderConfig,
}

impl PatternRenderer {
    /// Create a renderer after validating the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`RenderConfig::validate`]
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration every render uses
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Grid geometry for a target size
    pub fn grid(&self, target: TargetSize) -> GridSpec {
        GridSpec::derive(&self.config, target)
    }

    /// Plan stamp placements without drawing anything
    pub fn layout(&self, source: &RasterImage, target: TargetSize) -> Layout {
        plan(&self.config, source, target)
    }

    /// Render one target
    ///
    /// Inputs without pixel data produce the error panel. Placeholder inputs
    /// are rendered as-is; use [`Self::render_if_ready`] to skip them.
    pub fn render(
        &self,
        source: &RasterImage,
        stamp: &RasterImage,
        target: TargetSize,
    ) -> RenderTarget {
        let mut image =
            RgbaImage::from_pixel(target.width, target.height, Rgba(self.config.background));

        let failed = if source.readiness() == Readiness::Undecoded {
            Some(FailedInput::Source)
        } else if stamp.readiness() == Readiness::Undecoded {
            Some(FailedInput::Stamp)
        } else {
            None
        };
        if let Some(input) = failed {
            warn!(
                width = target.width,
                height = target.height,
                "{}; drawing error panel",
                input.message()
            );
            paint_error_panel(&mut image, input.message());
            return RenderTarget {
                image,
                outcome: RenderOutcome::ErrorPanel(input),
            };
        }

        let layout = self.layout(source, target);
        for placement in &layout.placements {
            composite(&mut image, stamp, placement);
        }

        debug!(
            width = target.width,
            height = target.height,
            cols = layout.grid.cols,
            rows = layout.grid.rows,
            skipped = layout.skipped_cells,
            "rendered pattern"
        );

        RenderTarget {
            image,
            outcome: RenderOutcome::Complete {
                drawn_cells: layout.placements.len(),
                skipped_cells: layout.skipped_cells,
            },
        }
    }

    /// Render unless either input is still a placeholder
    pub fn render_if_ready(
        &self,
        source: &RasterImage,
        stamp: &RasterImage,
        target: TargetSize,
    ) -> Option<RenderTarget> {
        if source.readiness() == Readiness::Placeholder
            || stamp.readiness() == Readiness::Placeholder
        {
            debug!("input image not ready; skipping render");
            return None;
        }
        Some(self.render(source, stamp, target))
    }

    /// Render the preview and then the full resolution target from the same inputs
    pub fn render_pair(
        &self,
        source: &RasterImage,
        stamp: &RasterImage,
        preview: TargetSize,
        full: TargetSize,
    ) -> Option<RenderPair> {
        let preview = self.render_if_ready(source, stamp, preview)?;
        let full = self.render_if_ready(source, stamp, full)?;
        Some(RenderPair { preview, full })
    }
}
