//! Decoding input images and exporting finished renders as PNG

use crate::io::error::{Result, StampError};
use crate::raster::buffer::{RasterImage, Readiness};
use crate::render::renderer::RenderTarget;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;
use tracing::warn;

/// Decode an image file into an RGBA raster
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a supported image
pub fn decode_raster(path: &Path) -> Result<RasterImage> {
    let decoded = image::open(path).map_err(|e| StampError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(RasterImage::from(decoded.to_rgba8()))
}

/// Decode an image, substituting an undecoded raster on failure
///
/// The renderer turns undecoded inputs into a visible error panel, so a
/// broken file still yields an output instead of aborting the run.
pub fn decode_or_undecoded(path: &Path) -> RasterImage {
    decode_raster(path).unwrap_or_else(|error| {
        warn!("{error}");
        RasterImage::undecoded()
    })
}

/// Resize a stamp to `factor` times the nominal cell size
///
/// A factor of zero, or a stamp that is not ready, is returned unchanged.
pub fn oversample_stamp(
    stamp: RasterImage,
    cell_width: f64,
    cell_height: f64,
    factor: u32,
) -> RasterImage {
    if factor == 0 || stamp.readiness() != Readiness::Ready {
        return stamp;
    }

    let width = (cell_width * f64::from(factor)).round().max(1.0) as u32;
    let height = (cell_height * f64::from(factor)).round().max(1.0) as u32;
    if (width, height) == (stamp.width(), stamp.height()) {
        return stamp;
    }

    let Some(buffer) = RgbaImage::from_raw(stamp.width(), stamp.height(), stamp.pixels().to_vec())
    else {
        return stamp;
    };
    RasterImage::from(imageops::resize(&buffer, width, height, FilterType::Lanczos3))
}

/// Save a render as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn export_png(target: &RenderTarget, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StampError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    target
        .image()
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| StampError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
