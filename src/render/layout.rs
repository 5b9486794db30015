//! Per-cell placement planning, separate from pixel compositing

use crate::math::mapping::brightness_to_scale;
use crate::raster::buffer::RasterImage;
use crate::raster::sampling::sample_brightness;
use crate::render::grid::{GridSpec, RenderConfig, TargetSize};

/// Where and how large one stamp is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPlacement {
    /// Grid column
    pub col: u32,
    /// Grid row
    pub row: u32,
    /// Left edge of the cell in target pixels
    pub origin_x: f64,
    /// Top edge of the cell in target pixels
    pub origin_y: f64,
    /// Unscaled stamp width in target pixels (the effective cell width)
    pub footprint_width: f64,
    /// Unscaled stamp height in target pixels (the effective cell height)
    pub footprint_height: f64,
    /// Sampled source brightness in `[0, 255]`
    pub brightness: f64,
    /// Clamped stamp scale applied about the origin
    pub scale: f64,
}

impl CellPlacement {
    /// Width actually covered once the scale is applied
    pub fn drawn_width(&self) -> f64 {
        self.footprint_width * self.scale
    }

    /// Height actually covered once the scale is applied
    pub fn drawn_height(&self) -> f64 {
        self.footprint_height * self.scale
    }
}

/// Planned placements for one render target
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Grid geometry the placements were derived from
    pub grid: GridSpec,
    /// Placements in drawing order (column-major)
    pub placements: Vec<CellPlacement>,
    /// Cells dropped because their sample fell outside the source buffer
    pub skipped_cells: usize,
}

/// Plan every cell of `target`, sampling brightness from `source`
///
/// Columns form the outer loop so later columns draw over earlier ones where
/// scaled stamps overlap.
pub fn plan(config: &RenderConfig, source: &RasterImage, target: TargetSize) -> Layout {
    let grid = GridSpec::derive(config, target);
    let mut placements = Vec::with_capacity(grid.cell_count().min(target.area()));
    let mut skipped_cells = 0;

    for col in 0..grid.cols {
        for row in 0..grid.rows {
            let (center_x, center_y) = grid.center(col, row);
            let Some(brightness) =
                sample_brightness(source, target.width, target.height, center_x, center_y)
            else {
                skipped_cells += 1;
                continue;
            };

            let (origin_x, origin_y) = grid.origin(col, row);
            placements.push(CellPlacement {
                col,
                row,
                origin_x,
                origin_y,
                footprint_width: grid.cell_width,
                footprint_height: grid.cell_height,
                brightness,
                scale: brightness_to_scale(brightness, config.scale_bias),
            });
        }
    }

    Layout {
        grid,
        placements,
        skipped_cells,
    }
}
