//! Read-only RGBA8 pixel buffers used as renderer inputs
//!
//! Decoding happens outside the renderer; by the time an image reaches this
//! type it is only ever read, one cell sample at a time.

use image::RgbaImage;

/// Number of bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// Classification of an input image before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Usable pixel data of at least 2x2
    Ready,
    /// Trivially small stand-in for an image that has not loaded yet
    Placeholder,
    /// No pixel data at all, decoding failed upstream
    Undecoded,
}

/// A decoded image as a row-major RGBA8 byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an existing RGBA8 buffer
    ///
    /// The buffer length is not checked against the dimensions; readers
    /// bound-check every access instead.
    pub const fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image filled with a single color
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self::from_rgba(width, height, pixels)
    }

    /// The 1x1 stand-in used before a real image is available
    pub fn placeholder() -> Self {
        Self::filled(1, 1, [0, 0, 0, 0])
    }

    /// An image whose decoding failed, carrying no pixel data
    pub const fn undecoded() -> Self {
        Self::from_rgba(0, 0, Vec::new())
    }

    /// Image width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes in row-major order
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Decide whether this image can be rendered
    pub fn readiness(&self) -> Readiness {
        if self.pixels.is_empty() {
            Readiness::Undecoded
        } else if self.width <= 1 || self.height <= 1 {
            Readiness::Placeholder
        } else {
            Readiness::Ready
        }
    }

    /// Byte offset of the pixel at `(x, y)`, without bounds checking
    pub const fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Pixel at `(x, y)`, or `None` when the offset falls outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixel_at_offset(self.offset(x, y))
    }

    /// Pixel starting at a raw byte offset
    pub fn pixel_at_offset(&self, offset: usize) -> Option<[u8; 4]> {
        let bytes = self.pixels.get(offset..offset.checked_add(CHANNELS)?)?;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(bytes);
        Some(rgba)
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_rgba(width, height, image.into_raw())
    }
}
