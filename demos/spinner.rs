//! An animated loading spinner: gradient strokes, arcs and transforms,
//! composited into a winit window each frame.
//!
//! Run with:   cargo run --example spinner

use std::num::NonZeroU32;
use std::time::Instant;

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

use easel::{ArcDirection, BoxGradient, Canvas, Color, LineCap, LinearGradient};

struct State {
    window: Window,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    canvas: Canvas,
}

struct App {
    state: Option<State>,
    start: Instant,
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
                draw_spinner(&mut state.canvas, self.start.elapsed().as_secs_f32());
                state.canvas.draw_at(0.0, 0.0);
                state
                    .surface
                    .swap_buffers(&state.context)
                    .expect("Failed to swap buffers");
                state.window.request_redraw();
            }
            _ => {}
        }
    }
}

fn draw_spinner(canvas: &mut Canvas, elapsed: f32) {
    let (width, height) = canvas.size();
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);

    let mut frame = canvas.begin();

    // Backdrop card with a soft box gradient.
    frame.begin_path();
    frame.rounded_rect(cx - 180.0, cy - 180.0, 360.0, 360.0, 24.0);
    frame.fill_path_with(BoxGradient::new(
        (cx - 180.0, cy - 180.0, 360.0, 360.0),
        24.0,
        60.0,
        Color::rgb(40, 44, 60),
        Color::rgb(16, 17, 22),
    ));

    // Rotating arc with a gradient that fades out towards the tail.
    frame.push();
    frame.translate(cx, cy);
    frame.rotate(elapsed * 140.0);
    frame.begin_path();
    frame.arc(0.0, 0.0, 120.0, 0.0, 4.4, ArcDirection::Clockwise);
    frame.line_width(14.0);
    frame.line_cap(LineCap::Round);
    frame.stroke_path_with(LinearGradient::new(
        (-120.0, 0.0),
        (120.0, 0.0),
        Color::rgba(120, 200, 255, 0),
        Color::rgb(120, 200, 255),
    ));
    frame.pop();

    // Counter-rotating inner arc.
    frame.push();
    frame.translate(cx, cy);
    frame.rotate(-elapsed * 220.0);
    frame.begin_path();
    frame.arc(0.0, 0.0, 80.0, 0.0, 3.4, ArcDirection::Clockwise);
    frame.line_width(8.0);
    frame.line_cap(LineCap::Round);
    frame.stroke_color(Color::rgba(255, 180, 90, 200));
    frame.stroke_path();
    frame.pop();

    // Center dot that pulses with time.
    let pulse = 10.0 + 4.0 * (elapsed * 3.0).sin();
    frame.begin_path();
    frame.circle(cx, cy, pulse);
    frame.fill_color(Color::rgb(230, 235, 245));
    frame.fill_path();
}

fn create_state(event_loop: &ActiveEventLoop) -> State {
    let attributes = Window::default_attributes()
        .with_title("easel spinner")
        .with_inner_size(PhysicalSize::new(800, 600));
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
    canvas.background(Color::rgb(18, 18, 24));

    State {
        window,
        context,
        surface,
        canvas,
    }
}

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().expect("Failed to create the event loop");
    let mut app = App {
        state: None,
        start: Instant::now(),
    };
    event_loop.run_app(&mut app).expect("Event loop failed");
}
