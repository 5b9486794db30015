//! Visible error panel drawn in place of a render that has no usable input

use image::{Rgba, RgbaImage};
use spleen_font::{FONT_8X16, PSF2Font};

/// Panel fill color
pub const ERROR_FILL: [u8; 4] = [255, 191, 0, 255];
/// Message text color
pub const ERROR_TEXT: [u8; 4] = [0, 0, 0, 255];

const GLYPH_WIDTH: u32 = 8;
const GLYPH_HEIGHT: u32 = 16;
const MAX_TEXT_SCALE: u32 = 4;

/// Which input could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedInput {
    /// The brightness source
    Source,
    /// The stamp pattern
    Stamp,
}

impl FailedInput {
    /// Short human-readable message for the panel
    pub const fn message(self) -> &'static str {
        match self {
            Self::Source => "source image failed to decode",
            Self::Stamp => "stamp image failed to decode",
        }
    }
}

/// Integer glyph magnification so the message spans at most ~3/4 of the width
pub fn text_scale(canvas_width: u32, canvas_height: u32, chars: usize) -> u32 {
    let text_width = (chars as u32).max(1) * GLYPH_WIDTH;
    let by_width = canvas_width * 3 / 4 / text_width;
    let by_height = canvas_height / 2 / GLYPH_HEIGHT;
    by_width.min(by_height).clamp(1, MAX_TEXT_SCALE)
}

/// Fill `canvas` with the warning color and centre `message` on it
///
/// Text that does not fit is clipped at the canvas edges.
pub fn paint_error_panel(canvas: &mut RgbaImage, message: &str) {
    for pixel in canvas.pixels_mut() {
        *pixel = Rgba(ERROR_FILL);
    }

    let Ok(mut font) = PSF2Font::new(FONT_8X16) else {
        return;
    };

    let chars = message.chars().count();
    let scale = text_scale(canvas.width(), canvas.height(), chars);
    let text_width = i64::from(chars as u32 * GLYPH_WIDTH * scale);
    let text_height = i64::from(GLYPH_HEIGHT * scale);
    let left = (i64::from(canvas.width()) - text_width) / 2;
    let top = (i64::from(canvas.height()) - text_height) / 2;

    let mut utf8 = [0u8; 4];
    for (index, ch) in message.chars().enumerate() {
        let Some(glyph) = font.glyph_for_utf8(ch.encode_utf8(&mut utf8).as_bytes()) else {
            continue;
        };
        let glyph_left = left + index as i64 * i64::from(GLYPH_WIDTH * scale);

        for (row_y, row) in glyph.enumerate() {
            for (col_x, on) in row.enumerate() {
                if on {
                    fill_block(
                        canvas,
                        glyph_left + col_x as i64 * i64::from(scale),
                        top + row_y as i64 * i64::from(scale),
                        scale,
                    );
                }
            }
        }
    }
}

fn fill_block(canvas: &mut RgbaImage, left: i64, top: i64, size: u32) {
    for dy in 0..i64::from(size) {
        for dx in 0..i64::from(size) {
            let (Ok(x), Ok(y)) = (u32::try_from(left + dx), u32::try_from(top + dy)) else {
                continue;
            };
            if let Some(pixel) = canvas.get_pixel_mut_checked(x, y) {
                *pixel = Rgba(ERROR_TEXT);
            }
        }
    }
}
