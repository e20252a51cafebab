/// Scene-level tests: the shared test scene drawn on the no-op renderer,
/// plus the pixel-expectation checker itself.
///
/// The scene's pixel expectations are validated against real GL output by
/// the `scene` demo; here the checker runs against hand-built buffers.
///
/// Run with:   cargo test --test scenes
use easel::femtovg::Transform2D;
use easel::Canvas;
use easel_test_scenes::{
    check_pixels, draw_main_scene, PixelExpectation, BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH,
};

/// The main scene draws headless without errors and leaves the transform
/// stack balanced.
#[test]
fn main_scene_draws_headless() {
    let mut canvas = Canvas::headless(CANVAS_WIDTH, CANVAS_HEIGHT);
    canvas.background(BACKGROUND);

    let mut frame = canvas.begin();
    let expectations = draw_main_scene(&mut frame);

    assert!(!expectations.is_empty());
    assert_eq!(frame.transform(), Transform2D::identity());
}

/// The checker reads RGBA in row-major order with the origin at the top left.
#[test]
fn check_pixels_reads_rgba_rows() {
    // 2x2 buffer: red, green / blue, white
    #[rustfmt::skip]
    let pixels: Vec<u8> = vec![
        255, 0, 0, 255,    0, 255, 0, 255,
        0, 0, 255, 255,    255, 255, 255, 255,
    ];
    let expectations = [
        PixelExpectation::opaque(0, 0, 255, 0, 0, "top_left"),
        PixelExpectation::opaque(1, 0, 0, 255, 0, "top_right"),
        PixelExpectation::opaque(0, 1, 0, 0, 255, "bottom_left"),
        PixelExpectation::opaque(1, 1, 255, 255, 255, "bottom_right"),
    ];
    assert!(check_pixels(&pixels, 2, 2, &expectations).is_empty());
}

/// Mismatches and out-of-range coordinates produce one failure each, and
/// failures carry the expectation's label.
#[test]
fn check_pixels_reports_failures() {
    let pixels = vec![0u8; 4];
    let expectations = [
        PixelExpectation::opaque(0, 0, 255, 0, 0, "wrong_color"),
        PixelExpectation::transparent(0, 0, "right_color"),
        PixelExpectation::opaque(5, 0, 0, 0, 0, "outside"),
    ];
    let failures = check_pixels(&pixels, 1, 1, &expectations);
    assert_eq!(failures.len(), 2);
    assert!(failures[0].contains("wrong_color"));
    assert!(failures[1].contains("outside"));
}

/// Tolerance widens the acceptance band per channel.
#[test]
fn tolerance_is_per_channel() {
    let pixels = vec![100u8, 100, 100, 255];
    let tight = [PixelExpectation::opaque(0, 0, 110, 100, 100, "tight")];
    let loose = [PixelExpectation::opaque(0, 0, 110, 100, 100, "loose").with_tolerance(10)];
    assert_eq!(check_pixels(&pixels, 1, 1, &tight).len(), 1);
    assert!(check_pixels(&pixels, 1, 1, &loose).is_empty());
}
