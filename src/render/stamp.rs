//! Scaled stamp compositing with bilinear resampling and alpha blending

use crate::raster::buffer::RasterImage;
use crate::render::layout::CellPlacement;
use image::RgbaImage;

/// Premultiplied RGBA in `[0, 1]`
pub type Premultiplied = [f64; 4];

const TRANSPARENT: Premultiplied = [0.0; 4];

fn premultiply(rgba: [u8; 4]) -> Premultiplied {
    let alpha = f64::from(rgba[3]) / 255.0;
    [
        f64::from(rgba[0]) / 255.0 * alpha,
        f64::from(rgba[1]) / 255.0 * alpha,
        f64::from(rgba[2]) / 255.0 * alpha,
        alpha,
    ]
}

fn lerp(a: Premultiplied, b: Premultiplied, t: f64) -> Premultiplied {
    [
        (b[0] - a[0]).mul_add(t, a[0]),
        (b[1] - a[1]).mul_add(t, a[1]),
        (b[2] - a[2]).mul_add(t, a[2]),
        (b[3] - a[3]).mul_add(t, a[3]),
    ]
}

/// Sample the stamp at normalised coordinates `(u, v)` in `[0, 1]`
///
/// Texel centres sit at half-pixel offsets and the edges are clamped.
/// Texels missing from a short buffer read as transparent.
pub fn sample_bilinear(stamp: &RasterImage, u: f64, v: f64) -> Premultiplied {
    let (width, height) = (stamp.width(), stamp.height());
    if width == 0 || height == 0 {
        return TRANSPARENT;
    }

    let fx = u
        .mul_add(f64::from(width), -0.5)
        .clamp(0.0, f64::from(width - 1));
    let fy = v
        .mul_add(f64::from(height), -0.5)
        .clamp(0.0, f64::from(height - 1));

    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let tx = fx - f64::from(x0);
    let ty = fy - f64::from(y0);

    let texel = |x, y| stamp.pixel(x, y).map_or(TRANSPARENT, premultiply);

    let top = lerp(texel(x0, y0), texel(x1, y0), tx);
    let bottom = lerp(texel(x0, y1), texel(x1, y1), tx);
    lerp(top, bottom, ty)
}

/// Source-over blend of a premultiplied color onto a straight-alpha pixel
pub fn blend_over(dst: [u8; 4], src: Premultiplied) -> [u8; 4] {
    let src_alpha = src[3];
    if src_alpha <= 0.0 {
        return dst;
    }

    let dst_p = premultiply(dst);
    let inverse = 1.0 - src_alpha;
    let out_alpha = dst_p[3].mul_add(inverse, src_alpha);
    if out_alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |s: f64, d: f64| {
        let straight = d.mul_add(inverse, s) / out_alpha;
        (straight * 255.0).round().clamp(0.0, 255.0) as u8
    };

    [
        channel(src[0], dst_p[0]),
        channel(src[1], dst_p[1]),
        channel(src[2], dst_p[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Integer pixel span whose centres fall inside `[start, start + length)`
fn covered_span(start: f64, length: f64, limit: u32) -> std::ops::Range<u32> {
    let first = (start - 0.5).ceil().max(0.0);
    let end = (start + length - 0.5).ceil().clamp(0.0, f64::from(limit));
    if first >= end {
        return 0..0;
    }
    first as u32..end as u32
}

/// Draw `stamp` into `canvas` for one planned cell
///
/// The stamp is stretched over the cell footprint, then scaled about the
/// cell origin, so bright cells may spill into their neighbours.
pub fn composite(canvas: &mut RgbaImage, stamp: &RasterImage, placement: &CellPlacement) {
    let drawn_width = placement.drawn_width();
    let drawn_height = placement.drawn_height();
    if drawn_width <= 0.0 || drawn_height <= 0.0 {
        return;
    }

    let columns = covered_span(placement.origin_x, drawn_width, canvas.width());
    let rows = covered_span(placement.origin_y, drawn_height, canvas.height());

    for y in rows {
        let v = (f64::from(y) + 0.5 - placement.origin_y) / drawn_height;
        for x in columns.clone() {
            let u = (f64::from(x) + 0.5 - placement.origin_x) / drawn_width;
            let color = sample_bilinear(stamp, u, v);
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                pixel.0 = blend_over(pixel.0, color);
            }
        }
    }
}
