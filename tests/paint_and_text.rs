/// Paint style construction, headless drawing smoke tests and the text
/// error paths.
///
/// Run with:   cargo test --test paint_and_text
use easel::{
    BoxGradient, Canvas, Color, Error, FontStyle, ImagePattern, LinearGradient, PaintStyle, Point,
    RadialGradient, Rect,
};

/// Each style converts into the matching enum variant.
#[test]
fn styles_convert_into_paint_style() {
    let linear = LinearGradient::new((0.0, 0.0), (0.0, 10.0), Color::BLACK, Color::WHITE);
    assert_eq!(PaintStyle::from(linear), PaintStyle::LinearGradient(linear));

    let radial = RadialGradient::new((5.0, 5.0), 1.0, 4.0, Color::BLACK, Color::WHITE);
    assert_eq!(PaintStyle::from(radial), PaintStyle::RadialGradient(radial));

    let boxed = BoxGradient::new((0.0, 0.0, 10.0, 10.0), 2.0, 4.0, Color::BLACK, Color::WHITE);
    assert_eq!(PaintStyle::from(boxed), PaintStyle::BoxGradient(boxed));
}

/// Style constructors keep their inputs.
#[test]
fn gradient_fields_are_kept() {
    let linear = LinearGradient::new((1.0, 2.0), (3.0, 4.0), Color::BLACK, Color::WHITE);
    assert_eq!(linear.start, Point::new(1.0, 2.0));
    assert_eq!(linear.end, Point::new(3.0, 4.0));

    let boxed = BoxGradient::new((1.0, 2.0, 3.0, 4.0), 2.0, 6.0, Color::BLACK, Color::WHITE);
    assert_eq!(boxed.rect, Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(boxed.corner_radius, 2.0);
    assert_eq!(boxed.feather, 6.0);
}

/// Tuple conversions for the geometry helpers.
#[test]
fn geometry_tuple_conversions() {
    assert_eq!(Point::from((3.0, 4.0)), Point::new(3.0, 4.0));
    assert_eq!(Rect::from((1.0, 2.0, 3.0, 4.0)), Rect::new(1.0, 2.0, 3.0, 4.0));
}

/// Every paint style draws without error on the no-op renderer, for fills
/// and strokes alike.
#[test]
fn paint_styles_draw_headless() {
    let mut canvas = Canvas::headless(64, 64);
    let image = canvas.upload_image(2, 2, &[255u8; 2 * 2 * 4]).unwrap();

    let mut frame = canvas.begin();
    frame.begin_path();
    frame.rect(4.0, 4.0, 56.0, 56.0);

    frame.fill_path_with(LinearGradient::new(
        (4.0, 4.0),
        (4.0, 60.0),
        Color::BLACK,
        Color::WHITE,
    ));
    frame.fill_path_with(RadialGradient::new(
        (32.0, 32.0),
        4.0,
        28.0,
        Color::BLACK,
        Color::WHITE,
    ));
    frame.fill_path_with(BoxGradient::new(
        (8.0, 8.0, 48.0, 48.0),
        6.0,
        10.0,
        Color::BLACK,
        Color::WHITE,
    ));
    frame.fill_path_with(ImagePattern::new(image, (4.0, 4.0, 56.0, 56.0), 0.0, 1.0));
    frame.stroke_path_with(LinearGradient::new(
        (4.0, 4.0),
        (60.0, 4.0),
        Color::BLACK,
        Color::WHITE,
    ));
}

/// A style set with `fill_path_with` stays current for later plain fills.
#[test]
fn fill_style_is_sticky_within_the_frame() {
    let mut canvas = Canvas::headless(64, 64);
    let mut frame = canvas.begin();
    frame.begin_path();
    frame.rect(0.0, 0.0, 32.0, 32.0);
    frame.fill_path_with(LinearGradient::new(
        (0.0, 0.0),
        (0.0, 32.0),
        Color::BLACK,
        Color::WHITE,
    ));

    // Second fill reuses the gradient without re-stating it.
    frame.begin_path();
    frame.rect(32.0, 0.0, 32.0, 32.0);
    frame.fill_path();
}

/// Text operations without any registered font fail cleanly and leave the
/// frame usable.
#[test]
fn text_without_font_is_an_error() {
    let mut canvas = Canvas::headless(100, 100);
    let mut frame = canvas.begin();
    assert!(frame.text("hello", 10.0, 10.0).is_err());
    assert!(frame.text_bounds("hello", 10.0, 10.0).is_err());
    assert!(frame.text_box("hello world", 10.0, 10.0, 40.0).is_err());
    assert!(frame.text_box_bounds("hello world", 10.0, 10.0, 40.0).is_err());

    // Shape drawing still works on the same frame.
    frame.begin_path();
    frame.rect(0.0, 0.0, 10.0, 10.0);
    frame.fill_path();
}

/// `font_style` with an unknown name fails without selecting a font or
/// touching any text attribute.
#[test]
fn font_style_with_unknown_name_is_an_error() {
    let mut canvas = Canvas::headless(100, 100);
    let mut frame = canvas.begin();
    let style = FontStyle {
        size: 22.0,
        ..FontStyle::new("missing")
    };
    assert!(matches!(frame.font_style(&style), Err(Error::FontNotFound(_))));
    assert_eq!(frame.font(), None);
}
