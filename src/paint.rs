use femtovg::{ImageId, Paint};

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// A fill or stroke style beyond a plain solid color.
///
/// Styles are small immutable value objects; build one, then hand it to
/// [`Frame::fill_path_with`](crate::Frame::fill_path_with) or
/// [`Frame::stroke_path_with`](crate::Frame::stroke_path_with). Like solid
/// colors, an installed style stays active for subsequent fills or strokes
/// until it is replaced.
///
/// # Examples
///
/// ```
/// use easel::{Color, LinearGradient, PaintStyle};
///
/// let fade: PaintStyle =
///     LinearGradient::new((0.0, 0.0), (0.0, 120.0), Color::WHITE, Color::TRANSPARENT).into();
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    LinearGradient(LinearGradient),
    BoxGradient(BoxGradient),
    RadialGradient(RadialGradient),
    ImagePattern(ImagePattern),
}

impl PaintStyle {
    pub(crate) fn to_paint(&self) -> Paint {
        match self {
            PaintStyle::LinearGradient(style) => style.paint(),
            PaintStyle::BoxGradient(style) => style.paint(),
            PaintStyle::RadialGradient(style) => style.paint(),
            PaintStyle::ImagePattern(style) => style.paint(),
        }
    }
}

impl From<LinearGradient> for PaintStyle {
    fn from(style: LinearGradient) -> Self {
        PaintStyle::LinearGradient(style)
    }
}

impl From<BoxGradient> for PaintStyle {
    fn from(style: BoxGradient) -> Self {
        PaintStyle::BoxGradient(style)
    }
}

impl From<RadialGradient> for PaintStyle {
    fn from(style: RadialGradient) -> Self {
        PaintStyle::RadialGradient(style)
    }
}

impl From<ImagePattern> for PaintStyle {
    fn from(style: ImagePattern) -> Self {
        PaintStyle::ImagePattern(style)
    }
}

/// A gradient that blends between two colors along a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub start_color: Color,
    pub end_color: Color,
}

impl LinearGradient {
    /// # Examples
    ///
    /// ```
    /// use easel::{Color, LinearGradient};
    ///
    /// // Vertical white-to-black fade over 100 pixels
    /// let fade = LinearGradient::new((0.0, 0.0), (0.0, 100.0), Color::WHITE, Color::BLACK);
    /// ```
    pub fn new(
        start: impl Into<Point>,
        end: impl Into<Point>,
        start_color: Color,
        end_color: Color,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            start_color,
            end_color,
        }
    }

    fn paint(&self) -> Paint {
        Paint::linear_gradient(
            self.start.x,
            self.start.y,
            self.end.x,
            self.end.y,
            self.start_color.into(),
            self.end_color.into(),
        )
    }
}

/// A rounded-rectangle gradient, typically used for drop shadows and glows.
///
/// `inner_color` fills the rectangle; `feather` controls how far the blend
/// towards `outer_color` extends past its edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGradient {
    pub rect: Rect,
    pub corner_radius: f32,
    pub feather: f32,
    pub inner_color: Color,
    pub outer_color: Color,
}

impl BoxGradient {
    pub fn new(
        rect: impl Into<Rect>,
        corner_radius: f32,
        feather: f32,
        inner_color: Color,
        outer_color: Color,
    ) -> Self {
        Self {
            rect: rect.into(),
            corner_radius,
            feather,
            inner_color,
            outer_color,
        }
    }

    fn paint(&self) -> Paint {
        Paint::box_gradient(
            self.rect.x,
            self.rect.y,
            self.rect.width,
            self.rect.height,
            self.corner_radius,
            self.feather,
            self.inner_color.into(),
            self.outer_color.into(),
        )
    }
}

/// A gradient that blends between two colors across a circular ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub inner_color: Color,
    pub outer_color: Color,
}

impl RadialGradient {
    pub fn new(
        center: impl Into<Point>,
        inner_radius: f32,
        outer_radius: f32,
        inner_color: Color,
        outer_color: Color,
    ) -> Self {
        Self {
            center: center.into(),
            inner_radius,
            outer_radius,
            inner_color,
            outer_color,
        }
    }

    fn paint(&self) -> Paint {
        Paint::radial_gradient(
            self.center.x,
            self.center.y,
            self.inner_radius,
            self.outer_radius,
            self.inner_color.into(),
            self.outer_color.into(),
        )
    }
}

/// A style that fills with an image registered on the canvas.
///
/// The image is placed in `rect`, rotated by `angle` degrees around the
/// rectangle's top-left corner and blended with `alpha` (0.0 to 1.0). The
/// referenced image must stay registered on the canvas that draws the
/// pattern; see [`Canvas::upload_image`](crate::Canvas::upload_image) and
/// [`Canvas::import_texture`](crate::Canvas::import_texture).
///
/// # Examples
///
/// ```
/// use easel::ImagePattern;
///
/// let mut canvas = easel::Canvas::headless(64, 64);
/// let image = canvas.upload_image(2, 2, &[255u8; 16]).unwrap();
/// let pattern = ImagePattern::new(image, (0.0, 0.0, 32.0, 32.0), 0.0, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePattern {
    pub image: ImageId,
    pub rect: Rect,
    /// Rotation around the rectangle's top-left corner, in degrees.
    pub angle: f32,
    /// Blend factor from 0.0 (invisible) to 1.0 (opaque).
    pub alpha: f32,
}

impl ImagePattern {
    pub fn new(image: ImageId, rect: impl Into<Rect>, angle: f32, alpha: f32) -> Self {
        Self {
            image,
            rect: rect.into(),
            angle,
            alpha,
        }
    }

    fn paint(&self) -> Paint {
        Paint::image(
            self.image,
            self.rect.x,
            self.rect.y,
            self.rect.width,
            self.rect.height,
            self.angle.to_radians(),
            self.alpha,
        )
    }
}
