//! Visual confirmation for the shared test scene: draws it on a real GL
//! context, validates the pixel expectations against `read_pixels()`, and
//! shows the scene scaled up for eyeballing. Before the first frame it also
//! checks that a frame hands the host's own GL state back untouched.
//!
//! Run with:   cargo run --example scene

use std::num::NonZeroU32;

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

use easel::glow::{self, HasContext};
use easel::Canvas;
use easel_test_scenes::{check_pixels, draw_main_scene, BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH};

const WINDOW_SCALE: u32 = 3;

struct State {
    window: Window,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    gl: glow::Context,
    canvas: Canvas,
    checked: bool,
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
            }
            WindowEvent::RedrawRequested => {
                if !state.checked {
                    verify_host_state_preserved(&state.gl, &mut state.canvas);
                }

                let mut frame = state.canvas.begin();
                let expectations = draw_main_scene(&mut frame);
                drop(frame);

                // Validate once, on the first rendered frame.
                if !state.checked {
                    state.checked = true;
                    let pixels = state.canvas.read_pixels();
                    let failures =
                        check_pixels(&pixels, CANVAS_WIDTH, CANVAS_HEIGHT, &expectations);
                    if failures.is_empty() {
                        println!("All {} pixel expectations passed", expectations.len());
                    } else {
                        eprintln!("{} pixel expectation(s) failed:", failures.len());
                        for failure in &failures {
                            eprintln!("  {failure}");
                        }
                    }
                }

                let size = state.window.inner_size();
                state
                    .canvas
                    .draw(0.0, 0.0, size.width as f32, size.height as f32);
                state
                    .surface
                    .swap_buffers(&state.context)
                    .expect("Failed to swap buffers");
            }
            _ => {}
        }
    }
}

fn create_state(event_loop: &ActiveEventLoop) -> State {
    let attributes = Window::default_attributes()
        .with_title("easel test scene")
        .with_inner_size(PhysicalSize::new(
            CANVAS_WIDTH * WINDOW_SCALE,
            CANVAS_HEIGHT * WINDOW_SCALE,
        ));
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

    // A second handle onto the same GL context, for inspecting raw state
    // from the host's side.
    let gl =
        unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };

    // The canvas stays at the scene's native size; draw() scales it to
    // whatever size the window has.
    let mut canvas = unsafe {
        Canvas::new_cstr(
            |name| display.get_proc_address(name),
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
        )
    }
    .expect("Failed to create the canvas");
    canvas.background(BACKGROUND);

    State {
        window,
        context,
        surface,
        gl,
        canvas,
        checked: false,
    }
}

/// Sets deliberately odd stencil and color-mask state, runs a throwaway
/// frame, and reports whether the canvas handed that state back intact.
fn verify_host_state_preserved(gl: &glow::Context, canvas: &mut Canvas) {
    unsafe {
        gl.stencil_func(glow::EQUAL, 7, 0xAA);
        gl.stencil_op(glow::INCR, glow::DECR, glow::INVERT);
        gl.stencil_mask(0x0F);
        gl.color_mask(false, true, true, false);
    }

    // A concave fill sends the engine through its stencil-heavy path; the
    // next begin() clears the target, so nothing of this frame is visible.
    let mut frame = canvas.begin();
    frame.begin_path();
    frame.move_to(4.0, 4.0);
    frame.line_to(28.0, 4.0);
    frame.line_to(16.0, 16.0);
    frame.line_to(28.0, 28.0);
    frame.line_to(4.0, 28.0);
    frame.close_path();
    frame.fill_path();
    drop(frame);

    let expected = (
        glow::EQUAL,
        7,
        0xAA,
        0x0F,
        glow::INCR,
        glow::DECR,
        glow::INVERT,
        [0, 1, 1, 0],
    );
    let actual = unsafe {
        let mut color_writemask = [0i32; 4];
        gl.get_parameter_i32_slice(glow::COLOR_WRITEMASK, &mut color_writemask);
        (
            gl.get_parameter_i32(glow::STENCIL_FUNC) as u32,
            gl.get_parameter_i32(glow::STENCIL_REF),
            gl.get_parameter_i32(glow::STENCIL_VALUE_MASK) as u32 & 0xFF,
            gl.get_parameter_i32(glow::STENCIL_WRITEMASK) as u32 & 0xFF,
            gl.get_parameter_i32(glow::STENCIL_FAIL) as u32,
            gl.get_parameter_i32(glow::STENCIL_PASS_DEPTH_FAIL) as u32,
            gl.get_parameter_i32(glow::STENCIL_PASS_DEPTH_PASS) as u32,
            color_writemask,
        )
    };
    if actual == expected {
        println!("Host GL state preserved across the frame");
    } else {
        eprintln!("Host GL state changed across the frame:");
        eprintln!("  expected {expected:?}");
        eprintln!("  got      {actual:?}");
    }

    // Back to defaults so the scene frames render normally.
    unsafe {
        gl.stencil_func(glow::ALWAYS, 0, 0xFFFF_FFFF);
        gl.stencil_op(glow::KEEP, glow::KEEP, glow::KEEP);
        gl.stencil_mask(0xFFFF_FFFF);
        gl.color_mask(true, true, true, true);
    }
}

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().expect("Failed to create the event loop");
    let mut app = App { state: None };
    event_loop.run_app(&mut app).expect("Event loop failed");
}
