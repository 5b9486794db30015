//! Tests for stamp resampling, blending and clipped compositing

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use stampgrid::raster::buffer::RasterImage;
    use stampgrid::render::layout::CellPlacement;
    use stampgrid::render::stamp::{blend_over, composite, sample_bilinear};

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn placement(x: f64, y: f64, width: f64, height: f64, scale: f64) -> CellPlacement {
        CellPlacement {
            col: 0,
            row: 0,
            origin_x: x,
            origin_y: y,
            footprint_width: width,
            footprint_height: height,
            brightness: 0.0,
            scale,
        }
    }

    fn count_black(canvas: &RgbaImage) -> usize {
        canvas.pixels().filter(|p| p.0 == BLACK).count()
    }

    // Tests uniform stamps sample to their own color everywhere
    // Verified by skipping the edge clamp
    #[test]
    fn test_sample_uniform_stamp() {
        let stamp = RasterImage::filled(3, 3, [0, 0, 0, 255]);

        for &(u, v) in &[(0.0, 0.0), (0.5, 0.5), (0.999, 0.2), (1.0, 1.0)] {
            let color = sample_bilinear(&stamp, u, v);
            assert!(color[0].abs() < 1e-12);
            assert!((color[3] - 1.0).abs() < 1e-12);
        }
    }

    // Tests interpolation halfway between two texel centres
    // Verified by using nearest-neighbour sampling
    #[test]
    fn test_sample_interpolates_between_texels() {
        // Black texel on the left, white on the right
        let stamp = RasterImage::from_rgba(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]);

        let middle = sample_bilinear(&stamp, 0.5, 0.5);
        assert!((middle[0] - 0.5).abs() < 1e-12);

        let left = sample_bilinear(&stamp, 0.25, 0.5);
        assert!(left[0].abs() < 1e-12);
    }

    // Tests empty stamps sample as transparent
    // Verified by reading texel (0, 0) unconditionally
    #[test]
    fn test_sample_empty_stamp_is_transparent() {
        let color = sample_bilinear(&RasterImage::undecoded(), 0.5, 0.5);
        assert_eq!(color, [0.0; 4]);
    }

    // Tests opaque, transparent and half-transparent blending
    // Verified by blending straight instead of premultiplied colors
    #[test]
    fn test_blend_over() {
        assert_eq!(blend_over(WHITE, [0.0, 0.0, 0.0, 1.0]), BLACK);
        assert_eq!(blend_over(WHITE, [0.0; 4]), WHITE);
        assert_eq!(blend_over(WHITE, [0.0, 0.0, 0.0, 0.5]), [128, 128, 128, 255]);
        assert_eq!(blend_over([0, 0, 0, 0], [0.5, 0.0, 0.0, 0.5]), [255, 0, 0, 128]);
    }

    // Tests an unscaled stamp covers exactly its footprint
    // Verified by extending coverage one pixel past the edge
    #[test]
    fn test_composite_covers_footprint() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba(WHITE));
        let stamp = RasterImage::filled(4, 4, BLACK);

        composite(&mut canvas, &stamp, &placement(2.0, 3.0, 4.0, 2.0, 1.0));

        assert_eq!(count_black(&canvas), 8);
        assert_eq!(canvas.get_pixel(2, 3).0, BLACK);
        assert_eq!(canvas.get_pixel(5, 4).0, BLACK);
        assert_eq!(canvas.get_pixel(6, 4).0, WHITE);
        assert_eq!(canvas.get_pixel(2, 5).0, WHITE);
        assert_eq!(canvas.get_pixel(1, 3).0, WHITE);
    }

    // Tests scaling happens about the cell origin
    // Verified by scaling about the cell centre
    #[test]
    fn test_composite_scales_about_origin() {
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba(WHITE));
        let stamp = RasterImage::filled(2, 2, BLACK);

        composite(&mut canvas, &stamp, &placement(4.0, 4.0, 8.0, 8.0, 0.5));

        assert_eq!(count_black(&canvas), 16);
        assert_eq!(canvas.get_pixel(4, 4).0, BLACK);
        assert_eq!(canvas.get_pixel(7, 7).0, BLACK);
        assert_eq!(canvas.get_pixel(8, 8).0, WHITE);
    }

    // Tests scales above one spill past the footprint and are clipped at the canvas edge
    // Verified by clamping the drawn size to the footprint
    #[test]
    fn test_composite_overlaps_and_clips() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba(WHITE));
        let stamp = RasterImage::filled(2, 2, BLACK);

        composite(&mut canvas, &stamp, &placement(6.0, 6.0, 4.0, 4.0, 1.5));

        // 6x6 drawn, only 4x4 lands on the canvas
        assert_eq!(count_black(&canvas), 16);
        assert_eq!(canvas.get_pixel(9, 9).0, BLACK);
    }

    // Tests transparent stamp regions leave the background untouched
    // Verified by ignoring stamp alpha
    #[test]
    fn test_composite_respects_transparency() {
        let mut canvas = RgbaImage::from_pixel(6, 6, Rgba(WHITE));
        let stamp = RasterImage::filled(3, 3, [0, 0, 0, 0]);

        composite(&mut canvas, &stamp, &placement(0.0, 0.0, 6.0, 6.0, 1.0));

        assert!(canvas.pixels().all(|p| p.0 == WHITE));
    }

    // Tests zero-sized and fully off-canvas placements draw nothing
    // Verified by removing the empty span check
    #[test]
    fn test_composite_degenerate_placements() {
        let mut canvas = RgbaImage::from_pixel(6, 6, Rgba(WHITE));
        let stamp = RasterImage::filled(2, 2, BLACK);

        composite(&mut canvas, &stamp, &placement(1.0, 1.0, 0.0, 3.0, 1.0));
        composite(&mut canvas, &stamp, &placement(50.0, 50.0, 3.0, 3.0, 1.0));
        composite(&mut canvas, &stamp, &placement(-10.0, -10.0, 3.0, 3.0, 1.0));

        assert_eq!(count_black(&canvas), 0);
    }
}
