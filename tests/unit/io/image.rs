//! Tests for image decoding, stamp oversampling and PNG export

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use stampgrid::StampError;
    use stampgrid::io::image::{decode_or_undecoded, decode_raster, export_png, oversample_stamp};
    use stampgrid::raster::buffer::{RasterImage, Readiness};
    use stampgrid::render::grid::{RenderConfig, TargetSize};
    use stampgrid::render::renderer::PatternRenderer;
    use std::fs;
    use tempfile::TempDir;

    // Tests PNG files decode to RGBA rasters
    // Verified by decoding to RGB and dropping alpha
    #[test]
    fn test_decode_raster_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("source.png");
        let mut buffer = RgbaImage::from_pixel(5, 3, Rgba([10, 20, 30, 255]));
        buffer.put_pixel(4, 2, Rgba([1, 2, 3, 4]));
        buffer.save(&path).unwrap();

        let raster = decode_raster(&path).unwrap();

        assert_eq!((raster.width(), raster.height()), (5, 3));
        assert_eq!(raster.pixel(4, 2), Some([1, 2, 3, 4]));
        assert_eq!(raster.readiness(), Readiness::Ready);
    }

    // Tests corrupt files report the offending path
    // Verified by losing the path in the error
    #[test]
    fn test_decode_raster_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        fs::write(&path, "not a png").unwrap();

        let error = decode_raster(&path).unwrap_err();

        assert!(matches!(error, StampError::ImageLoad { .. }));
        assert!(error.to_string().contains("broken.png"));
    }

    // Tests decode failures become undecoded rasters
    // Verified by returning a placeholder instead
    #[test]
    fn test_decode_or_undecoded() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.png");

        assert_eq!(decode_or_undecoded(&missing).readiness(), Readiness::Undecoded);
    }

    // Tests the stamp is resized to cell size times the factor
    // Verified by ignoring the factor
    #[test]
    fn test_oversample_stamp_resizes() {
        let stamp = RasterImage::filled(7, 3, [0, 0, 0, 255]);

        let resized = oversample_stamp(stamp, 24.0, 10.0, 4);

        assert_eq!((resized.width(), resized.height()), (96, 40));
        let center = resized.pixel(48, 20).unwrap();
        assert_eq!(center[..3], [0, 0, 0]);
        assert!(center[3] >= 254);
    }

    // Tests factor zero and unusable stamps pass through unchanged
    // Verified by resizing placeholders
    #[test]
    fn test_oversample_stamp_passthrough() {
        let stamp = RasterImage::filled(7, 3, [5, 5, 5, 255]);
        assert_eq!(oversample_stamp(stamp.clone(), 24.0, 10.0, 0), stamp);

        let placeholder = RasterImage::placeholder();
        assert_eq!(
            oversample_stamp(placeholder.clone(), 24.0, 10.0, 4),
            placeholder
        );
        assert_eq!(
            oversample_stamp(RasterImage::undecoded(), 24.0, 10.0, 4).readiness(),
            Readiness::Undecoded
        );

        let exact = RasterImage::filled(48, 20, [5, 5, 5, 255]);
        assert_eq!(oversample_stamp(exact.clone(), 24.0, 10.0, 2), exact);
    }

    // Tests PNG export creates nested directories and round-trips dimensions
    // Verified by disabling directory creation
    #[test]
    fn test_export_png_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("nested/dir/out.png");
        let renderer = PatternRenderer::new(
            RenderConfig::new(TargetSize::new(48, 20).unwrap(), 24.0, 10.0).unwrap(),
        )
        .unwrap();
        let target = renderer.render(
            &RasterImage::filled(4, 4, [255; 4]),
            &RasterImage::filled(2, 2, [0, 0, 0, 255]),
            TargetSize::new(48, 20).unwrap(),
        );

        export_png(&target, &output_path).unwrap();

        let reloaded = image::open(&output_path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (48, 20));
        assert_eq!(reloaded.as_raw(), target.image().as_raw());
    }
}
