//! The [`Canvas`] owns the vector-graphics engine and an offscreen render
//! target; [`Frame`] is the short-lived handle through which a single frame
//! is drawn. All drawing methods live on `Frame`, so the borrow checker
//! guarantees that path building, painting and text always happen between
//! `begin()` and the end of the frame.

use std::ffi::{c_void, CStr};
use std::path::Path as FsPath;
use std::rc::Rc;

use ahash::AHashMap;
use femtovg::renderer::{OpenGl, Void};
use femtovg::{
    FontId, ImageFlags, ImageId, ImageInfo, ImageSource, LineCap, LineJoin, Paint, Path,
    PixelFormat, Renderer, Transform2D,
};
use glow::HasContext;
use imgref::Img;
use rgb::FromSlice;
use smallvec::SmallVec;
use tracing::{debug, error, warn};

use crate::color::Color;
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::geometry::Rect;
use crate::gl_state::GlState;
use crate::paint::PaintStyle;
use crate::text::{FontStyle, TextAlign, TextState};

/// Sweep direction for [`Frame::arc`] segments.
///
/// Angles on the canvas grow clockwise (the y axis points down), so an arc
/// from `0` to `PI / 2` drawn `Clockwise` sweeps from "3 o'clock" down to
/// "6 o'clock".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl From<ArcDirection> for femtovg::Solidity {
    fn from(direction: ArcDirection) -> Self {
        match direction {
            ArcDirection::CounterClockwise => femtovg::Solidity::Solid,
            ArcDirection::Clockwise => femtovg::Solidity::Hole,
        }
    }
}

// ── Mirrored paint state ────────────────────────────────────────────────────

/// What the next fill or stroke paints with. The engine's `Paint` bundles
/// line attributes with the brush, so the canvas keeps brush and line state
/// separate and assembles a `Paint` per draw call instead.
#[derive(Debug, Clone)]
enum PaintSource {
    Color(Color),
    Style(PaintStyle),
}

impl PaintSource {
    fn to_paint(&self) -> Paint {
        match self {
            PaintSource::Color(color) => Paint::color((*color).into()),
            PaintSource::Style(style) => style.to_paint(),
        }
    }
}

#[derive(Debug, Clone)]
struct StrokeAttrs {
    width: f32,
    cap: LineCap,
    join: LineJoin,
}

impl Default for StrokeAttrs {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        }
    }
}

/// Everything [`Frame::push`] snapshots alongside the engine's own state.
#[derive(Debug, Clone)]
struct DrawState {
    fill: PaintSource,
    stroke: PaintSource,
    stroke_attrs: StrokeAttrs,
    text: TextState,
}

/// An external GL texture registered with the engine, keyed by its GL name
/// so repeated imports of the same texture reuse the registration.
struct ImportedTexture {
    image: ImageId,
    width: u32,
    height: u32,
}

// ── Canvas ──────────────────────────────────────────────────────────────────

/// An offscreen vector-graphics canvas.
///
/// The canvas owns a [femtovg](femtovg::Canvas) engine instance and, when
/// GL-backed, an offscreen [`FrameBuffer`] that every frame renders into.
/// The host application composites the result with [`Canvas::draw`] whenever
/// it likes; the canvas never touches the window surface on its own.
///
/// The renderer parameter defaults to the GL backend. [`Canvas::headless`]
/// builds a canvas over the engine's no-op renderer instead, which runs
/// without any GPU and is what the test suite uses.
///
/// # Examples
///
/// ```no_run
/// use easel::{Canvas, Color, LinearGradient};
///
/// # fn proc_address(_name: &str) -> *const std::ffi::c_void { std::ptr::null() }
/// // `proc_address` comes from the windowing stack (glutin, SDL, ...).
/// let mut canvas = unsafe { Canvas::new(proc_address, 800, 600) }.unwrap();
/// canvas.background(Color::rgb(24, 24, 28));
///
/// let mut frame = canvas.begin();
/// frame.begin_path();
/// frame.rounded_rect(40.0, 40.0, 200.0, 120.0, 12.0);
/// frame.fill_path_with(LinearGradient::new(
///     (40.0, 40.0),
///     (40.0, 160.0),
///     Color::rgb(90, 160, 255),
///     Color::rgb(30, 60, 120),
/// ));
/// drop(frame); // flushes the frame into the offscreen target
///
/// canvas.draw_at(0.0, 0.0);
/// ```
pub struct Canvas<R: Renderer = OpenGl> {
    inner: femtovg::Canvas<R>,
    gl: Option<Rc<glow::Context>>,
    framebuffer: Option<FrameBuffer>,
    width: u32,
    height: u32,
    background: Color,
    fonts: AHashMap<String, FontId>,
    imported: AHashMap<glow::NativeTexture, ImportedTexture>,
    fill: PaintSource,
    stroke: PaintSource,
    stroke_attrs: StrokeAttrs,
    text: TextState,
}

impl Canvas<OpenGl> {
    /// Creates a GL-backed canvas with a `width` x `height` offscreen target.
    ///
    /// `load_fn` resolves GL symbol names to function pointers, exactly what
    /// `glutin`'s `get_proc_address` or SDL's `gl_get_proc_address` provide.
    /// Zero dimensions are clamped to 1.
    ///
    /// # Safety
    ///
    /// A GL context must be current on this thread, and `load_fn` must return
    /// pointers valid for that context.
    pub unsafe fn new<F>(mut load_fn: F, width: u32, height: u32) -> Result<Self, Error>
    where
        F: FnMut(&str) -> *const c_void,
    {
        let renderer = OpenGl::new_from_function(&mut load_fn)?;
        let gl = Rc::new(glow::Context::from_loader_function(load_fn));
        Self::build(renderer, Some(gl), width, height)
    }

    /// [`Canvas::new`] for loaders that hand out `&CStr` names, such as
    /// `glutin`'s display `get_proc_address`.
    ///
    /// # Safety
    ///
    /// Same contract as [`Canvas::new`].
    pub unsafe fn new_cstr<F>(mut load_fn: F, width: u32, height: u32) -> Result<Self, Error>
    where
        F: FnMut(&CStr) -> *const c_void,
    {
        let renderer = OpenGl::new_from_function_cstr(&mut load_fn)?;
        let gl = Rc::new(glow::Context::from_loader_function_cstr(load_fn));
        Self::build(renderer, Some(gl), width, height)
    }

    /// Blits the offscreen target into the currently bound framebuffer.
    ///
    /// `x` and `y` are in viewport coordinates with the origin at the top
    /// left, matching the canvas's own coordinate system. A `width` or
    /// `height` of `0.0` (or anything non-positive) falls back to the
    /// canvas size, so `draw(x, y, 0.0, 0.0)` draws unscaled.
    pub fn draw(&self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(framebuffer) = &self.framebuffer {
            let (width, height) = resolve_draw_size(width, height, self.width, self.height);
            framebuffer.blit(x, y, width, height);
        }
    }

    /// [`Canvas::draw`] at the canvas's natural size.
    pub fn draw_at(&self, x: f32, y: f32) {
        self.draw(x, y, 0.0, 0.0);
    }

    /// Copies the offscreen target back to the CPU as tightly packed RGBA8
    /// rows, top row first.
    pub fn read_pixels(&self) -> Vec<u8> {
        match &self.framebuffer {
            Some(framebuffer) => framebuffer.read_pixels(),
            None => Vec::new(),
        }
    }

    /// Registers a GL texture owned by the host so paints can reference it
    /// as an [`ImagePattern`](crate::ImagePattern).
    ///
    /// Importing the same texture again with the same dimensions returns the
    /// cached handle without touching the engine. If the dimensions changed,
    /// the texture is re-registered and the stale handle released.
    pub fn import_texture(
        &mut self,
        texture: glow::NativeTexture,
        width: u32,
        height: u32,
    ) -> Result<ImageId, Error> {
        if let Some(entry) = self.imported.get(&texture) {
            if entry.width == width && entry.height == height {
                return Ok(entry.image);
            }
        }
        let info = ImageInfo::new(
            ImageFlags::empty(),
            width as usize,
            height as usize,
            PixelFormat::Rgba8,
        );
        let image = self.inner.create_image_from_native_texture(texture, info)?;
        if let Some(stale) = self.imported.insert(
            texture,
            ImportedTexture {
                image,
                width,
                height,
            },
        ) {
            self.inner.delete_image(stale.image);
        }
        debug!("Imported {}x{} external texture as {:?}", width, height, image);
        Ok(image)
    }

    /// Drops the registration created by [`Canvas::import_texture`]. The GL
    /// texture itself still belongs to the host and is not deleted.
    pub fn forget_texture(&mut self, texture: glow::NativeTexture) {
        match self.imported.remove(&texture) {
            Some(entry) => self.inner.delete_image(entry.image),
            None => warn!("Texture was never imported, nothing to forget"),
        }
    }

    /// Resets the GL viewport to cover a `width` x `height` window surface.
    ///
    /// [`Canvas::draw`] positions its output using the viewport that is
    /// current at call time, so hosts that change the viewport themselves
    /// (or let a resized window invalidate it) should call this once per
    /// resize before drawing.
    pub fn set_viewport(&self, width: u32, height: u32) {
        if let Some(gl) = &self.gl {
            unsafe {
                gl.viewport(0, 0, width as i32, height as i32);
            }
        }
    }
}

impl Canvas<Void> {
    /// Builds a canvas over the engine's no-op renderer. No GL context is
    /// required; paths, paints, transforms and the font registry behave as
    /// usual while actual rasterization goes nowhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use easel::{Canvas, Color};
    ///
    /// let mut canvas = Canvas::headless(320, 200);
    /// let mut frame = canvas.begin();
    /// frame.begin_path();
    /// frame.circle(160.0, 100.0, 40.0);
    /// frame.fill_color(Color::rgb(255, 0, 0));
    /// frame.fill_path();
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the engine rejects the no-op renderer, which does not
    /// happen in practice. [`Canvas::try_headless`] returns the error
    /// instead.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::try_headless(width, height).expect("Failed to build a headless canvas")
    }

    /// Fallible twin of [`Canvas::headless`].
    pub fn try_headless(width: u32, height: u32) -> Result<Self, Error> {
        Self::build(Void, None, width, height)
    }
}

impl<R: Renderer> Canvas<R> {
    /// Shared constructor: wraps the renderer in an engine instance and,
    /// when a GL handle is present, allocates the offscreen target.
    fn build(
        renderer: R,
        gl: Option<Rc<glow::Context>>,
        width: u32,
        height: u32,
    ) -> Result<Self, Error> {
        let (width, height) = clamp_size(width, height);
        let inner = femtovg::Canvas::new(renderer)?;
        let background = Color::TRANSPARENT;
        let framebuffer = match &gl {
            Some(gl) => Some(FrameBuffer::new(gl.clone(), width, height, background)?),
            None => None,
        };
        debug!("Created {}x{} canvas", width, height);
        Ok(Self {
            inner,
            gl,
            framebuffer,
            width,
            height,
            background,
            fonts: AHashMap::new(),
            imported: AHashMap::new(),
            fill: PaintSource::Color(Color::gray(127)),
            stroke: PaintSource::Color(Color::gray(127)),
            stroke_attrs: StrokeAttrs::default(),
            text: TextState::default(),
        })
    }

    /// Starts a frame: clears the offscreen target to the background color
    /// and returns the [`Frame`] handle that all drawing goes through.
    ///
    /// On a GL-backed canvas this captures the host's GL state first; the
    /// frame restores it when dropped, so the host's own rendering never
    /// sees the canvas's bindings.
    pub fn begin(&mut self) -> Frame<'_, R> {
        let saved = match (&self.gl, &self.framebuffer) {
            (Some(gl), Some(framebuffer)) => {
                let state = GlState::capture(gl);
                unsafe {
                    gl.disable(glow::DEPTH_TEST);
                    gl.disable(glow::SCISSOR_TEST);
                    gl.viewport(0, 0, self.width as i32, self.height as i32);
                }
                framebuffer.bind();
                framebuffer.clear(self.background);
                Some(state)
            }
            _ => None,
        };

        self.inner.set_size(self.width, self.height, 1.0);
        self.inner.reset();
        self.frame_defaults();

        Frame {
            canvas: self,
            path: Path::new(),
            stack: SmallVec::new(),
            saved,
        }
    }

    /// Sets the color the target is cleared to at the start of each frame.
    /// Defaults to [`Color::TRANSPARENT`].
    pub fn background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn background_color(&self) -> Color {
        self.background
    }

    /// Reallocates the offscreen target for a new size. Zero dimensions are
    /// clamped to 1. Registered fonts and imported textures are preserved;
    /// the target's contents are not, so draw a frame before compositing.
    ///
    /// On failure the canvas keeps its previous target and size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        let (width, height) = clamp_size(width, height);
        if width == self.width && height == self.height {
            return Ok(());
        }
        if let Some(gl) = &self.gl {
            let framebuffer = FrameBuffer::new(gl.clone(), width, height, self.background)?;
            self.framebuffer = Some(framebuffer);
        }
        self.width = width;
        self.height = height;
        debug!("Canvas resized to {}x{}", width, height);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The offscreen target, or `None` on a headless canvas. Gives access
    /// to the raw GL object names for hosts that composite manually.
    pub fn framebuffer(&self) -> Option<&FrameBuffer> {
        self.framebuffer.as_ref()
    }

    // ── Font registry ───────────────────────────────────────────────────

    /// Loads a font file and registers it under `name` for
    /// [`Frame::set_font`] and [`FontStyle`] lookups.
    ///
    /// Registering a different file under an existing name replaces the
    /// registry entry; text already drawn is unaffected.
    pub fn load_font(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<FsPath>,
    ) -> Result<FontId, Error> {
        let name = name.into();
        let path = path.as_ref();
        match self.inner.add_font(path) {
            Ok(font) => {
                debug!("Registered font {:?} from {}", name, path.display());
                self.fonts.insert(name, font);
                Ok(font)
            }
            Err(source) => {
                error!(
                    "Failed to load font {:?} from {}: {}",
                    name,
                    path.display(),
                    source
                );
                Err(Error::FontLoad { name, source })
            }
        }
    }

    /// Registers font data already resident in memory under `name`.
    pub fn load_font_mem(&mut self, name: impl Into<String>, data: &[u8]) -> Result<FontId, Error> {
        let name = name.into();
        match self.inner.add_font_mem(data) {
            Ok(font) => {
                debug!("Registered font {:?} from memory", name);
                self.fonts.insert(name, font);
                Ok(font)
            }
            Err(source) => {
                error!("Failed to parse font {:?} from memory: {}", name, source);
                Err(Error::FontLoad { name, source })
            }
        }
    }

    /// Looks up a registered font by name.
    pub fn font_id(&self, name: &str) -> Option<FontId> {
        self.fonts.get(name).copied()
    }

    // ── Image registry ──────────────────────────────────────────────────

    /// Uploads tightly packed RGBA8 pixels as an engine-owned image for use
    /// with [`ImagePattern`](crate::ImagePattern) paints.
    pub fn upload_image(
        &mut self,
        width: usize,
        height: usize,
        pixels: &[u8],
    ) -> Result<ImageId, Error> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(Error::ImageSize {
                width,
                height,
                expected,
                got: pixels.len(),
            });
        }
        let source = ImageSource::from(Img::new(pixels.as_rgba(), width, height));
        let image = self.inner.create_image(source, ImageFlags::empty())?;
        Ok(image)
    }

    /// Releases an image created by [`Canvas::upload_image`].
    pub fn delete_image(&mut self, image: ImageId) {
        self.inner.delete_image(image);
    }

    // ── Per-draw paint assembly ─────────────────────────────────────────

    fn frame_defaults(&mut self) {
        self.fill = PaintSource::Color(Color::gray(127));
        self.stroke = PaintSource::Color(Color::gray(127));
        self.stroke_attrs = StrokeAttrs::default();
        self.text = TextState::default();
    }

    fn stroke_paint(&self) -> Paint {
        let mut paint = self.stroke.to_paint();
        paint.set_line_width(self.stroke_attrs.width);
        paint.set_line_cap(self.stroke_attrs.cap);
        paint.set_line_join(self.stroke_attrs.join);
        paint
    }

    fn text_paint(&self) -> Paint {
        let mut paint = self.fill.to_paint();
        if let Some(font) = self.text.font {
            paint.set_font(&[font]);
        }
        paint.set_font_size(self.text.size);
        paint.set_letter_spacing(self.text.letter_spacing);
        paint.set_text_align(self.text.align.horizontal);
        paint.set_text_baseline(self.text.align.vertical);
        paint
    }
}

// ── Frame ───────────────────────────────────────────────────────────────────

/// A frame in progress. Created by [`Canvas::begin`]; dropping it flushes
/// the frame into the offscreen target and hands the GL state back to the
/// host.
///
/// The frame holds the current path under construction. Fill and stroke
/// rasterize that path with the current paint state, which persists across
/// draws within the frame and resets at the next `begin()`.
pub struct Frame<'a, R: Renderer = OpenGl> {
    canvas: &'a mut Canvas<R>,
    path: Path,
    stack: SmallVec<[DrawState; 4]>,
    saved: Option<GlState>,
}

impl<R: Renderer> Frame<'_, R> {
    // ── Path building ───────────────────────────────────────────────────

    /// Discards the current path and starts a new one.
    pub fn begin_path(&mut self) {
        self.path = Path::new();
    }

    /// Closes the current sub-path with a line back to its first point.
    pub fn close_path(&mut self) {
        self.path.close();
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(x, y);
    }

    /// Adds a cubic bezier through the two control points to `(x, y)`.
    pub fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.path.bezier_to(c1x, c1y, c2x, c2y, x, y);
    }

    /// Adds a quadratic bezier through `(cx, cy)` to `(x, y)`.
    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.path.quad_to(cx, cy, x, y);
    }

    /// Adds an arc joining the current point towards `(x1, y1)` and on to
    /// `(x2, y2)`, rounded with `radius`.
    pub fn arc_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, radius: f32) {
        self.path.arc_to(x1, y1, x2, y2, radius);
    }

    /// Adds a circular arc around `(cx, cy)`. Angles are in radians, with
    /// `0` at "3 o'clock" and positive angles going clockwise.
    pub fn arc(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        direction: ArcDirection,
    ) {
        self.path
            .arc(cx, cy, radius, start_angle, end_angle, direction.into());
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.path.rect(x, y, width, height);
    }

    pub fn rounded_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) {
        self.path.rounded_rect(x, y, width, height, radius);
    }

    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.path.circle(cx, cy, radius);
    }

    pub fn ellipse(&mut self, cx: f32, cy: f32, radius_x: f32, radius_y: f32) {
        self.path.ellipse(cx, cy, radius_x, radius_y);
    }

    // ── Painting ────────────────────────────────────────────────────────

    /// Fills the current path with the current fill paint. The path stays
    /// available for further draws.
    pub fn fill_path(&mut self) {
        let paint = self.canvas.fill.to_paint();
        self.canvas.inner.fill_path(&self.path, &paint);
    }

    /// Strokes the current path outline with the current stroke paint and
    /// line attributes.
    pub fn stroke_path(&mut self) {
        let paint = self.canvas.stroke_paint();
        self.canvas.inner.stroke_path(&self.path, &paint);
    }

    /// Sets the fill paint to `style` and fills the current path with it.
    /// The style stays current for subsequent [`Frame::fill_path`] calls.
    pub fn fill_path_with(&mut self, style: impl Into<PaintStyle>) {
        self.canvas.fill = PaintSource::Style(style.into());
        self.fill_path();
    }

    /// Sets the stroke paint to `style` and strokes the current path.
    pub fn stroke_path_with(&mut self, style: impl Into<PaintStyle>) {
        self.canvas.stroke = PaintSource::Style(style.into());
        self.stroke_path();
    }

    /// Makes a solid color the current fill paint, replacing any style.
    pub fn fill_color(&mut self, color: Color) {
        self.canvas.fill = PaintSource::Color(color);
    }

    /// Makes a solid color the current stroke paint, replacing any style.
    pub fn stroke_color(&mut self, color: Color) {
        self.canvas.stroke = PaintSource::Color(color);
    }

    /// Sets the current fill paint to a gradient or image pattern without
    /// drawing anything.
    pub fn fill_style(&mut self, style: impl Into<PaintStyle>) {
        self.canvas.fill = PaintSource::Style(style.into());
    }

    /// Sets the current stroke paint to a gradient or image pattern without
    /// drawing anything.
    pub fn stroke_style(&mut self, style: impl Into<PaintStyle>) {
        self.canvas.stroke = PaintSource::Style(style.into());
    }

    /// Stroke width in canvas units. Defaults to `1.0`.
    pub fn line_width(&mut self, width: f32) {
        self.canvas.stroke_attrs.width = width;
    }

    /// How stroke ends are capped. Defaults to [`LineCap::Butt`].
    pub fn line_cap(&mut self, cap: LineCap) {
        self.canvas.stroke_attrs.cap = cap;
    }

    /// How stroke corners are joined. Defaults to [`LineJoin::Miter`].
    pub fn line_join(&mut self, join: LineJoin) {
        self.canvas.stroke_attrs.join = join;
    }

    // ── Text ────────────────────────────────────────────────────────────

    /// Selects a font previously registered with [`Canvas::load_font`].
    ///
    /// An unknown name leaves the current selection in place and returns
    /// [`Error::FontNotFound`].
    pub fn set_font(&mut self, name: &str) -> Result<(), Error> {
        match self.canvas.fonts.get(name) {
            Some(font) => {
                self.canvas.text.font = Some(*font);
                Ok(())
            }
            None => {
                error!("No font registered under the name {:?}", name);
                Err(Error::FontNotFound(name.to_owned()))
            }
        }
    }

    /// The currently selected font, if any. Selection resets at `begin()`.
    pub fn font(&self) -> Option<FontId> {
        self.canvas.text.font
    }

    /// Font size in canvas units. Defaults to `16.0`.
    pub fn text_size(&mut self, size: f32) {
        self.canvas.text.size = size;
    }

    /// Extra spacing between glyphs, in canvas units.
    pub fn text_letter_spacing(&mut self, spacing: f32) {
        self.canvas.text.letter_spacing = spacing;
    }

    /// Line height for [`Frame::text_box`], as a multiple of the font's own
    /// line height. Defaults to `1.0`.
    pub fn text_line_height(&mut self, factor: f32) {
        self.canvas.text.line_height = factor;
    }

    /// Horizontal and vertical anchoring of drawn text relative to the
    /// given position.
    pub fn text_align(&mut self, align: TextAlign) {
        self.canvas.text.align = align;
    }

    /// Applies a [`FontStyle`] bundle: looks the font up by name and sets
    /// size, letter spacing, line height and alignment.
    ///
    /// An unknown name fails the lookup and leaves every text attribute,
    /// including the current font selection, untouched.
    pub fn font_style(&mut self, style: &FontStyle) -> Result<(), Error> {
        self.set_font(&style.name)?;
        self.canvas.text.size = style.size;
        self.canvas.text.letter_spacing = style.letter_spacing;
        self.canvas.text.line_height = style.line_height;
        self.canvas.text.align = style.align;
        Ok(())
    }

    /// Draws a single run of text anchored at `(x, y)` with the current
    /// fill paint and text attributes.
    ///
    /// Fails when no usable font is selected; the frame is otherwise
    /// unaffected.
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> Result<(), Error> {
        let paint = self.canvas.text_paint();
        self.canvas
            .inner
            .fill_text(x, y, text, &paint)
            .map_err(Error::Text)?;
        Ok(())
    }

    /// Draws `text` wrapped to `break_width`, one line per baseline step.
    ///
    /// Lines break on word boundaries where possible. The baseline advances
    /// by the font's line height times the [`Frame::text_line_height`]
    /// factor.
    pub fn text_box(&mut self, text: &str, x: f32, y: f32, break_width: f32) -> Result<(), Error> {
        let paint = self.canvas.text_paint();
        let line_step = self.line_step(&paint)?;
        let lines = self
            .canvas
            .inner
            .break_text_vec(break_width, text, &paint)
            .map_err(Error::Text)?;
        let mut baseline = y;
        for line in lines {
            self.canvas
                .inner
                .fill_text(x, baseline, &text[line], &paint)
                .map_err(Error::Text)?;
            baseline += line_step;
        }
        Ok(())
    }

    /// Measures the rectangle [`Frame::text`] would cover, without drawing.
    pub fn text_bounds(&mut self, text: &str, x: f32, y: f32) -> Result<Rect, Error> {
        let paint = self.canvas.text_paint();
        let metrics = self
            .canvas
            .inner
            .measure_text(x, y, text, &paint)
            .map_err(Error::Text)?;
        Ok(Rect::new(metrics.x, metrics.y, metrics.width(), metrics.height()))
    }

    /// Measures the rectangle [`Frame::text_box`] would cover, without
    /// drawing. Empty text yields a zero-sized rectangle at the anchor.
    pub fn text_box_bounds(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        break_width: f32,
    ) -> Result<Rect, Error> {
        let paint = self.canvas.text_paint();
        let line_step = self.line_step(&paint)?;
        let lines = self
            .canvas
            .inner
            .break_text_vec(break_width, text, &paint)
            .map_err(Error::Text)?;
        let mut baseline = y;
        let mut bounds: Option<Rect> = None;
        for line in lines {
            let metrics = self
                .canvas
                .inner
                .measure_text(x, baseline, &text[line], &paint)
                .map_err(Error::Text)?;
            let line_rect = Rect::new(metrics.x, metrics.y, metrics.width(), metrics.height());
            bounds = Some(match bounds {
                Some(rect) => rect.union(line_rect),
                None => line_rect,
            });
            baseline += line_step;
        }
        Ok(bounds.unwrap_or(Rect::new(x, y, 0.0, 0.0)))
    }

    fn line_step(&mut self, paint: &Paint) -> Result<f32, Error> {
        let metrics = self.canvas.inner.measure_font(paint).map_err(Error::Text)?;
        Ok(metrics.height() * self.canvas.text.line_height)
    }

    // ── Transforms and state ────────────────────────────────────────────

    /// Saves the transform and paint state; [`Frame::pop`] returns to it.
    pub fn push(&mut self) {
        self.canvas.inner.save();
        self.stack.push(DrawState {
            fill: self.canvas.fill.clone(),
            stroke: self.canvas.stroke.clone(),
            stroke_attrs: self.canvas.stroke_attrs.clone(),
            text: self.canvas.text.clone(),
        });
    }

    /// Restores the most recent [`Frame::push`]. Popping with nothing
    /// pushed leaves the state unchanged.
    pub fn pop(&mut self) {
        // The engine's restore() resets the live state outright when its
        // save stack is empty, so it only runs for a matching save.
        if let Some(state) = self.stack.pop() {
            self.canvas.inner.restore();
            self.canvas.fill = state.fill;
            self.canvas.stroke = state.stroke;
            self.canvas.stroke_attrs = state.stroke_attrs;
            self.canvas.text = state.text;
        }
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.canvas.inner.translate(x, y);
    }

    /// Rotates subsequent drawing around the current origin. Positive
    /// `degrees` turn clockwise.
    pub fn rotate(&mut self, degrees: f32) {
        self.canvas.inner.rotate(degrees.to_radians());
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        self.canvas.inner.scale(x, y);
    }

    /// Replaces the current transform with the identity.
    pub fn identity(&mut self) {
        self.canvas.inner.reset_transform();
    }

    /// The current transform matrix.
    pub fn transform(&self) -> Transform2D {
        self.canvas.inner.transform()
    }

    /// Resets transform, paints, line attributes and text attributes to
    /// their frame defaults. Entries saved with [`Frame::push`] are kept.
    pub fn reset_state(&mut self) {
        self.canvas.inner.reset();
        self.canvas.frame_defaults();
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width, self.canvas.height)
    }
}

impl<R: Renderer> Drop for Frame<'_, R> {
    fn drop(&mut self) {
        // Unwind saves the frame never popped so the engine's state stack
        // stays balanced across frames.
        for _ in 0..self.stack.len() {
            self.canvas.inner.restore();
        }
        self.canvas.inner.flush();
        if let (Some(gl), Some(saved)) = (self.canvas.gl.as_ref(), self.saved.take()) {
            unsafe {
                // The engine leaves its last vertex array and buffer bound;
                // clear them before handing the captured state back.
                gl.bind_vertex_array(None);
                gl.bind_buffer(glow::ARRAY_BUFFER, None);
            }
            saved.restore(gl);
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn clamp_size(width: u32, height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        warn!("Zero-sized canvas requested ({}x{}), clamping to 1x1", width, height);
    }
    (width.max(1), height.max(1))
}

fn resolve_draw_size(width: f32, height: f32, canvas_width: u32, canvas_height: u32) -> (f32, f32) {
    let width = if width <= 0.0 { canvas_width as f32 } else { width };
    let height = if height <= 0.0 {
        canvas_height as f32
    } else {
        height
    };
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_draw_size_falls_back_to_canvas_size() {
        assert_eq!(resolve_draw_size(0.0, 0.0, 640, 480), (640.0, 480.0));
        assert_eq!(resolve_draw_size(-1.0, 120.0, 640, 480), (640.0, 120.0));
        assert_eq!(resolve_draw_size(320.0, 0.0, 640, 480), (320.0, 480.0));
        assert_eq!(resolve_draw_size(320.0, 240.0, 640, 480), (320.0, 240.0));
    }

    #[test]
    fn zero_canvas_size_clamps_to_one() {
        assert_eq!(clamp_size(0, 0), (1, 1));
        assert_eq!(clamp_size(800, 0), (800, 1));
        assert_eq!(clamp_size(800, 600), (800, 600));
    }

    /// A failed `font_style` lookup must not write any of the bundled
    /// attributes.
    #[test]
    fn failed_font_style_leaves_text_state_untouched() {
        let mut canvas = Canvas::headless(100, 100);
        let mut frame = canvas.begin();
        frame.text_size(42.0);
        frame.text_letter_spacing(2.0);
        frame.text_line_height(1.5);
        frame.text_align(TextAlign::CENTER);

        let style = FontStyle {
            size: 11.0,
            letter_spacing: 0.5,
            line_height: 2.0,
            align: TextAlign::default(),
            ..FontStyle::new("missing")
        };
        assert!(frame.font_style(&style).is_err());

        let text = &frame.canvas.text;
        assert_eq!(text.font, None);
        assert_eq!(text.size, 42.0);
        assert_eq!(text.letter_spacing, 2.0);
        assert_eq!(text.line_height, 1.5);
        assert_eq!(text.align, TextAlign::CENTER);
    }

    /// `pop` restores the paint and text state captured by `push`, not just
    /// the transform.
    #[test]
    fn pop_restores_paint_and_text_state() {
        let mut canvas = Canvas::headless(100, 100);
        let mut frame = canvas.begin();
        frame.fill_color(Color::rgb(220, 40, 40));
        frame.line_width(3.0);
        frame.text_size(42.0);

        frame.push();
        frame.fill_color(Color::rgb(40, 40, 220));
        frame.line_width(9.0);
        frame.text_size(11.0);
        frame.pop();

        match &frame.canvas.fill {
            PaintSource::Color(color) => assert_eq!(*color, Color::rgb(220, 40, 40)),
            other => panic!("fill should be a plain color, got {:?}", other),
        }
        assert_eq!(frame.canvas.stroke_attrs.width, 3.0);
        assert_eq!(frame.canvas.text.size, 42.0);
    }
}
