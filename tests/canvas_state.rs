/// State behavior of the canvas over the engine's no-op renderer.
///
/// These tests cover everything that does not need a GL context: sizing,
/// the font registry, transform save/restore and the error paths.
///
/// Run with:   cargo test --test canvas_state
use easel::femtovg::Transform2D;
use easel::{Canvas, Color, Error};

/// Construction reports the requested size; zero dimensions clamp to 1.
#[test]
fn construction_and_clamping() {
    let canvas = Canvas::headless(320, 200);
    assert_eq!(canvas.size(), (320, 200));
    assert_eq!(canvas.width(), 320);
    assert_eq!(canvas.height(), 200);

    let clamped = Canvas::headless(0, 200);
    assert_eq!(clamped.size(), (1, 200));
}

/// A headless canvas carries no offscreen framebuffer.
#[test]
fn headless_canvas_has_no_framebuffer() {
    let canvas = Canvas::headless(32, 32);
    assert!(canvas.framebuffer().is_none());
}

/// Resizing takes effect immediately and clamps zero dimensions.
#[test]
fn resize_updates_the_reported_size() {
    let mut canvas = Canvas::headless(100, 100);
    canvas.resize(640, 480).unwrap();
    assert_eq!(canvas.size(), (640, 480));

    canvas.resize(0, 0).unwrap();
    assert_eq!(canvas.size(), (1, 1));

    // Resizing to the current size is a no-op.
    canvas.resize(1, 1).unwrap();
    assert_eq!(canvas.size(), (1, 1));
}

/// The background color is sticky until changed.
#[test]
fn background_color_roundtrip() {
    let mut canvas = Canvas::headless(10, 10);
    assert_eq!(canvas.background_color(), Color::TRANSPARENT);
    canvas.background(Color::rgb(10, 20, 30));
    assert_eq!(canvas.background_color(), Color::rgb(10, 20, 30));
}

/// push/pop brackets the transform exactly.
#[test]
fn push_pop_restores_the_transform() {
    let mut canvas = Canvas::headless(100, 100);
    let mut frame = canvas.begin();
    let before = frame.transform();

    frame.push();
    frame.translate(15.0, 25.0);
    frame.rotate(30.0);
    frame.scale(2.0, 0.5);
    assert_ne!(frame.transform(), before);
    frame.pop();

    assert_eq!(frame.transform(), before);
}

/// Popping with nothing pushed leaves the state unchanged.
#[test]
fn unbalanced_pop_is_harmless() {
    let mut canvas = Canvas::headless(100, 100);
    let mut frame = canvas.begin();
    frame.translate(5.0, 5.0);
    let before = frame.transform();
    frame.pop();
    frame.pop();
    assert_eq!(frame.transform(), before);

    // The stray pops must not have eaten into the save stack either.
    frame.push();
    frame.translate(10.0, 0.0);
    frame.pop();
    assert_eq!(frame.transform(), before);
}

/// A frame that ends with unpopped saves does not leak them into the next
/// frame's save stack.
#[test]
fn dropped_frame_unwinds_saved_state() {
    let mut canvas = Canvas::headless(100, 100);
    {
        let mut frame = canvas.begin();
        frame.push();
        frame.translate(30.0, 40.0);
    }

    let mut frame = canvas.begin();
    let before = frame.transform();
    assert_eq!(before, Transform2D::identity());
    // Without a push in this frame, pop must not restore last frame's save.
    frame.pop();
    assert_eq!(frame.transform(), before);
}

/// reset_state drops transforms mid-frame without ending the frame.
#[test]
fn reset_state_resets_the_transform() {
    let mut canvas = Canvas::headless(100, 100);
    let mut frame = canvas.begin();
    frame.translate(10.0, 20.0);
    frame.rotate(90.0);
    frame.reset_state();
    assert_eq!(frame.transform(), Transform2D::identity());
}

/// identity() clears the transform but keeps the rest of the frame state.
#[test]
fn identity_clears_the_transform() {
    let mut canvas = Canvas::headless(100, 100);
    let mut frame = canvas.begin();
    frame.translate(3.0, 4.0);
    frame.identity();
    assert_eq!(frame.transform(), Transform2D::identity());
}

/// Selecting a name that was never registered is an error and keeps the
/// previous selection.
#[test]
fn unknown_font_name_is_an_error() {
    let mut canvas = Canvas::headless(100, 100);
    let mut frame = canvas.begin();
    let result = frame.set_font("missing");
    assert!(matches!(result, Err(Error::FontNotFound(_))));
    assert_eq!(frame.font(), None);
}

/// Loading a font from a path that does not exist fails and leaves the
/// registry unchanged.
#[test]
fn bad_font_path_is_an_error() {
    let mut canvas = Canvas::headless(100, 100);
    let result = canvas.load_font("missing", "/nonexistent/font.ttf");
    assert!(matches!(result, Err(Error::FontLoad { .. })));
    assert_eq!(canvas.font_id("missing"), None);
}

/// Garbage bytes are not a font.
#[test]
fn bad_font_data_is_an_error() {
    let mut canvas = Canvas::headless(100, 100);
    let result = canvas.load_font_mem("garbage", &[0u8; 16]);
    assert!(result.is_err());
    assert_eq!(canvas.font_id("garbage"), None);
}

/// Pixel uploads validate the buffer length against the declared size.
#[test]
fn upload_image_checks_dimensions() {
    let mut canvas = Canvas::headless(64, 64);
    let short = canvas.upload_image(4, 4, &[0u8; 4 * 4 * 4 - 1]);
    assert!(matches!(
        short,
        Err(Error::ImageSize {
            expected: 64,
            got: 63,
            ..
        })
    ));

    let image = canvas.upload_image(4, 4, &[128u8; 4 * 4 * 4]).unwrap();
    canvas.delete_image(image);
}
