pub use femtovg;
pub use glow;

mod canvas;
mod color;
mod error;
mod framebuffer;
mod geometry;
mod gl_state;
mod paint;
mod text;

pub use canvas::{ArcDirection, Canvas, Frame};
pub use color::Color;
pub use error::Error;
pub use framebuffer::FrameBuffer;
pub use geometry::{Point, Rect};
pub use paint::{BoxGradient, ImagePattern, LinearGradient, PaintStyle, RadialGradient};
pub use text::{FontStyle, TextAlign};

// Engine types that appear in this crate's own signatures.
pub use femtovg::{Align, Baseline, FontId, ImageId, LineCap, LineJoin};
