//! Drawing scenes shared between the integration tests and the demos.
//!
//! The tests draw the scenes headless to exercise the canvas API; the demos
//! draw them on a real GL context and check the pixel expectations against
//! `read_pixels()`.

pub mod expectations;
pub mod scene;

pub use expectations::{check_pixels, PixelExpectation};
pub use scene::{draw_main_scene, BACKGROUND, CANVAS_HEIGHT, CANVAS_WIDTH};
