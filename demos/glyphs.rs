//! Text rendering: registered fonts, alignment, letter spacing and
//! word-wrapped text boxes.
//!
//! Pass a font path as the first argument, or let the demo try a few
//! well-known system font locations:
//!
//!     cargo run --example glyphs -- /path/to/font.ttf

use std::num::NonZeroU32;
use std::path::Path;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use easel::{Align, Baseline, Canvas, Color, FontStyle, LinearGradient, TextAlign};

const PARAGRAPH: &str = "The canvas wraps long runs of text on word boundaries, \
advancing the baseline by the font's line height. Shorter words fill the line \
until the break width runs out.";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

struct State {
    window: Window,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    canvas: Canvas,
    has_font: bool,
}

struct App {
    state: Option<State>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        self.state = Some(create_state(event_loop));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                let (Some(width), Some(height)) =
                    (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                else {
                    return;
                };
                state.surface.resize(&state.context, width, height);
                state.canvas.set_viewport(size.width, size.height);
                state
                    .canvas
                    .resize(size.width, size.height)
                    .expect("Failed to resize the canvas");
            }
            WindowEvent::RedrawRequested => {
                if state.has_font {
                    draw_text_page(&mut state.canvas);
                } else {
                    draw_missing_font_notice(&mut state.canvas);
                }
                state.canvas.draw_at(0.0, 0.0);
                state
                    .surface
                    .swap_buffers(&state.context)
                    .expect("Failed to swap buffers");
            }
            _ => {}
        }
    }
}

fn draw_text_page(canvas: &mut Canvas) {
    let (width, _) = canvas.size();
    let width = width as f32;
    let mut frame = canvas.begin();

    // Title with a gradient fill.
    frame
        .font_style(&FontStyle {
            size: 42.0,
            ..FontStyle::new("demo")
        })
        .expect("Font disappeared from the registry");
    frame.fill_style(LinearGradient::new(
        (40.0, 30.0),
        (40.0, 80.0),
        Color::rgb(150, 210, 255),
        Color::rgb(70, 110, 220),
    ));
    frame.text("easel glyphs", 40.0, 40.0).expect("Title draw failed");

    // Underline the title using its measured bounds.
    let bounds = frame
        .text_bounds("easel glyphs", 40.0, 40.0)
        .expect("Title measure failed");
    frame.begin_path();
    frame.move_to(bounds.x, bounds.bottom() + 6.0);
    frame.line_to(bounds.right(), bounds.bottom() + 6.0);
    frame.line_width(3.0);
    frame.stroke_color(Color::rgb(70, 110, 220));
    frame.stroke_path();

    // Wrapped paragraph.
    frame.fill_color(Color::rgb(220, 224, 232));
    frame.text_size(18.0);
    frame.text_line_height(1.3);
    frame
        .text_box(PARAGRAPH, 40.0, 130.0, width - 80.0)
        .expect("Paragraph draw failed");

    // Letter-spacing sample.
    frame.text_letter_spacing(6.0);
    frame.fill_color(Color::rgb(255, 180, 90));
    frame
        .text("LETTERSPACED", 40.0, 280.0)
        .expect("Sample draw failed");
    frame.text_letter_spacing(0.0);

    // Alignment samples around a center line.
    let center = width / 2.0;
    frame.begin_path();
    frame.move_to(center, 330.0);
    frame.line_to(center, 440.0);
    frame.line_width(1.0);
    frame.stroke_color(Color::rgba(255, 255, 255, 60));
    frame.stroke_path();

    frame.fill_color(Color::rgb(180, 220, 180));
    for (label, align, y) in [
        ("left of the line", Align::Left, 350.0),
        ("centered on the line", Align::Center, 385.0),
        ("right of the line", Align::Right, 420.0),
    ] {
        frame.text_align(TextAlign::new(align, Baseline::Alphabetic));
        frame.text(label, center, y).expect("Aligned draw failed");
    }
}

fn draw_missing_font_notice(canvas: &mut Canvas) {
    let (width, height) = canvas.size();
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let mut frame = canvas.begin();

    // No font found: draw a crossed-out glyph box instead of text.
    frame.begin_path();
    frame.rounded_rect(cx - 60.0, cy - 60.0, 120.0, 120.0, 10.0);
    frame.line_width(4.0);
    frame.stroke_color(Color::rgb(220, 80, 80));
    frame.stroke_path();

    frame.begin_path();
    frame.move_to(cx - 60.0, cy - 60.0);
    frame.line_to(cx + 60.0, cy + 60.0);
    frame.move_to(cx + 60.0, cy - 60.0);
    frame.line_to(cx - 60.0, cy + 60.0);
    frame.stroke_path();
}

fn create_state(event_loop: &ActiveEventLoop) -> State {
    let attributes = Window::default_attributes()
        .with_title("easel glyphs")
        .with_inner_size(PhysicalSize::new(720, 480));
    let template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_stencil_size(8);
    let (window, config) = DisplayBuilder::new()
        .with_window_attributes(Some(attributes))
        .build(event_loop, template, |mut configs| {
            configs.next().expect("No matching GL configs")
        })
        .expect("Failed to create the window");
    let window = window.expect("Window was not created");

    let display = config.display();
    let raw_handle = window
        .window_handle()
        .expect("Failed to get the window handle")
        .as_raw();
    let context_attributes = ContextAttributesBuilder::new().build(Some(raw_handle));
    let context = unsafe { display.create_context(&config, &context_attributes) }
        .expect("Failed to create a GL context");

    let surface_attributes = window
        .build_surface_attributes(Default::default())
        .expect("Failed to build surface attributes");
    let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
        .expect("Failed to create the GL surface");
    let context = context
        .make_current(&surface)
        .expect("Failed to make the GL context current");

    let size = window.inner_size();
    let mut canvas =
        unsafe { Canvas::new_cstr(|name| display.get_proc_address(name), size.width, size.height) }
            .expect("Failed to create the canvas");
    canvas.background(Color::rgb(24, 26, 32));
    let has_font = register_font(&mut canvas);

    State {
        window,
        context,
        surface,
        canvas,
        has_font,
    }
}

/// Registers the font from argv, falling back to well-known system paths.
fn register_font(canvas: &mut Canvas) -> bool {
    if let Some(path) = std::env::args().nth(1) {
        return canvas.load_font("demo", &path).is_ok();
    }
    for path in SYSTEM_FONTS {
        if Path::new(path).exists() && canvas.load_font("demo", path).is_ok() {
            return true;
        }
    }
    eprintln!("No usable font found; pass one as the first argument");
    false
}

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().expect("Failed to create the event loop");
    let mut app = App { state: None };
    event_loop.run_app(&mut app).expect("Event loop failed");
}
