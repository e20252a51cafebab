//! The shared validation scene: a 3x2 grid of cells, each exercising one
//! paint or transform feature, with pixel expectations at the spots that
//! prove the feature rendered.

use easel::femtovg::Renderer;
use easel::{BoxGradient, Color, Frame, LineCap, LinearGradient, RadialGradient};

use crate::expectations::PixelExpectation;

// ── Scene layout ─────────────────────────────────────────────────────────────

const CELL: u32 = 80;
const GRID_COLUMNS: u32 = 3;
const GRID_ROWS: u32 = 2;

pub const CANVAS_WIDTH: u32 = CELL * GRID_COLUMNS;
pub const CANVAS_HEIGHT: u32 = CELL * GRID_ROWS;

/// Background the scene expects the canvas to clear to.
pub const BACKGROUND: Color = Color::WHITE;

/// Top-left pixel corner of the grid cell at `(column, row)`, both 0-based.
fn cell(column: u32, row: u32) -> (f32, f32) {
    ((column * CELL) as f32, (row * CELL) as f32)
}

/// An expectation that the pixel at `(x, y)` holds exactly `color`.
fn expect_color(x: f32, y: f32, color: Color, label: &'static str) -> PixelExpectation {
    let [r, g, b, _] = color.to_array();
    PixelExpectation::opaque(x as u32, y as u32, r, g, b, label)
}

/// Draws every cell of the scene into `frame` and returns the pixel
/// expectations that validate the result.
///
/// The headless state tests call this to make sure the whole scene draws
/// without errors; the visual-confirmation demo additionally checks the
/// expectations against `read_pixels()` on a real GL context.
pub fn draw_main_scene<R: Renderer>(frame: &mut Frame<'_, R>) -> Vec<PixelExpectation> {
    [
        solid_fill(frame, cell(0, 0)),
        linear_ramp(frame, cell(1, 0)),
        radial_ring(frame, cell(2, 0)),
        box_glow(frame, cell(0, 1)),
        thick_stroke(frame, cell(1, 1)),
        rotated_square(frame, cell(2, 1)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

// ── Fills and gradients ──────────────────────────────────────────────────────

fn solid_fill<R: Renderer>(
    frame: &mut Frame<'_, R>,
    (ox, oy): (f32, f32),
) -> Vec<PixelExpectation> {
    let red = Color::rgb(200, 70, 60);
    frame.begin_path();
    frame.rect(ox + 10.0, oy + 10.0, 60.0, 60.0);
    frame.fill_color(red);
    frame.fill_path();

    vec![
        expect_color(ox + 40.0, oy + 40.0, red, "solid_fill_interior"),
        expect_color(ox + 5.0, oy + 5.0, BACKGROUND, "solid_fill_margin"),
    ]
}

fn linear_ramp<R: Renderer>(
    frame: &mut Frame<'_, R>,
    (ox, oy): (f32, f32),
) -> Vec<PixelExpectation> {
    let top = Color::rgb(235, 90, 60);
    let bottom = Color::rgb(40, 90, 200);
    frame.begin_path();
    frame.rect(ox + 10.0, oy + 10.0, 60.0, 60.0);
    // The ramp is shorter than the rect, so both ends have a clamped band
    // holding the exact end color.
    frame.fill_path_with(LinearGradient::new(
        (ox + 40.0, oy + 25.0),
        (ox + 40.0, oy + 55.0),
        top,
        bottom,
    ));

    vec![
        expect_color(ox + 40.0, oy + 14.0, top, "linear_ramp_top_band").with_tolerance(10),
        expect_color(ox + 40.0, oy + 66.0, bottom, "linear_ramp_bottom_band").with_tolerance(10),
        expect_color(ox + 5.0, oy + 5.0, BACKGROUND, "linear_ramp_margin"),
    ]
}

fn radial_ring<R: Renderer>(
    frame: &mut Frame<'_, R>,
    (ox, oy): (f32, f32),
) -> Vec<PixelExpectation> {
    let core = Color::rgb(255, 220, 50);
    let rim = Color::rgb(50, 120, 50);
    frame.begin_path();
    frame.circle(ox + 40.0, oy + 40.0, 34.0);
    // The circle is wider than the outer radius, leaving a band of pure rim
    // color between the gradient edge and the path edge.
    frame.fill_path_with(RadialGradient::new((ox + 40.0, oy + 40.0), 4.0, 26.0, core, rim));

    vec![
        expect_color(ox + 40.0, oy + 40.0, core, "radial_ring_core").with_tolerance(10),
        expect_color(ox + 40.0, oy + 10.0, rim, "radial_ring_rim_band").with_tolerance(10),
        expect_color(ox + 4.0, oy + 4.0, BACKGROUND, "radial_ring_margin"),
    ]
}

fn box_glow<R: Renderer>(
    frame: &mut Frame<'_, R>,
    (ox, oy): (f32, f32),
) -> Vec<PixelExpectation> {
    let inner = Color::rgb(210, 160, 70);
    let outer = Color::rgb(60, 60, 90);
    frame.begin_path();
    frame.rect(ox + 10.0, oy + 10.0, 60.0, 60.0);
    // The gradient box sits well inside the path, so the rect corners show
    // the outer color while the box center shows the inner one.
    frame.fill_path_with(BoxGradient::new(
        (ox + 25.0, oy + 25.0, 30.0, 30.0),
        4.0,
        8.0,
        inner,
        outer,
    ));

    vec![
        expect_color(ox + 40.0, oy + 40.0, inner, "box_glow_center").with_tolerance(16),
        expect_color(ox + 14.0, oy + 14.0, outer, "box_glow_corner").with_tolerance(16),
        expect_color(ox + 5.0, oy + 5.0, BACKGROUND, "box_glow_margin"),
    ]
}

// ── Strokes and transforms ───────────────────────────────────────────────────

fn thick_stroke<R: Renderer>(
    frame: &mut Frame<'_, R>,
    (ox, oy): (f32, f32),
) -> Vec<PixelExpectation> {
    let blue = Color::rgb(30, 60, 190);
    frame.begin_path();
    frame.move_to(ox + 10.0, oy + 40.0);
    frame.line_to(ox + 70.0, oy + 40.0);
    frame.stroke_color(blue);
    frame.line_width(10.0);
    frame.line_cap(LineCap::Round);
    frame.stroke_path();

    vec![
        expect_color(ox + 40.0, oy + 40.0, blue, "thick_stroke_core"),
        // 12px above the line center, past the 5px half-width.
        expect_color(ox + 40.0, oy + 28.0, BACKGROUND, "thick_stroke_above"),
    ]
}

fn rotated_square<R: Renderer>(
    frame: &mut Frame<'_, R>,
    (ox, oy): (f32, f32),
) -> Vec<PixelExpectation> {
    let green = Color::rgb(70, 160, 60);
    let amber = Color::rgb(230, 140, 60);

    frame.push();
    frame.translate(ox + 40.0, oy + 40.0);
    frame.rotate(45.0);
    frame.begin_path();
    frame.rect(-15.0, -15.0, 30.0, 30.0);
    frame.fill_color(green);
    frame.fill_path();
    frame.pop();

    // After the pop the origin is back at the canvas corner.
    frame.begin_path();
    frame.rect(ox + 2.0, oy + 2.0, 10.0, 10.0);
    frame.fill_color(amber);
    frame.fill_path();

    vec![
        expect_color(ox + 40.0, oy + 40.0, green, "rotated_square_center"),
        // The unrotated square would cover this point; the diamond leaves it
        // to the background.
        expect_color(ox + 27.0, oy + 27.0, BACKGROUND, "rotated_square_corner_gap"),
        expect_color(ox + 7.0, oy + 7.0, amber, "rotated_square_after_pop"),
    ]
}
