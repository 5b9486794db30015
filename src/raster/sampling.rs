//! Brightness sampling at cell-proportional source coordinates

use crate::raster::buffer::RasterImage;

/// Unweighted mean of the color channels; alpha is ignored
pub fn brightness(rgba: [u8; 4]) -> f64 {
    let [r, g, b, _] = rgba;
    (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0
}

/// Map a point in target space to clamped integer source coordinates
///
/// The point is scaled by `source / target` on each axis, floored, then
/// clamped to the source bounds.
pub fn source_coordinates(
    source: &RasterImage,
    target_width: u32,
    target_height: u32,
    target_x: f64,
    target_y: f64,
) -> (u32, u32) {
    let scale_x = f64::from(source.width()) / f64::from(target_width);
    let scale_y = f64::from(source.height()) / f64::from(target_height);

    let max_x = f64::from(source.width().saturating_sub(1));
    let max_y = f64::from(source.height().saturating_sub(1));

    // Float-to-int casts saturate; the clamp keeps negatives and NaN at zero
    let x = (target_x * scale_x).floor().clamp(0.0, max_x) as u32;
    let y = (target_y * scale_y).floor().clamp(0.0, max_y) as u32;
    (x, y)
}

/// Brightness of the source pixel under a target-space point
///
/// Returns `None` when the computed offset lies outside the pixel buffer,
/// in which case the caller skips the cell.
pub fn sample_brightness(
    source: &RasterImage,
    target_width: u32,
    target_height: u32,
    target_x: f64,
    target_y: f64,
) -> Option<f64> {
    let (x, y) = source_coordinates(source, target_width, target_height, target_x, target_y);
    source
        .pixel_at_offset(source.offset(x, y))
        .map(brightness)
}
