use femtovg::{Align, Baseline, FontId};

/// Horizontal and vertical anchoring for drawn and measured text.
///
/// The horizontal part decides where `x` lands relative to the glyph run;
/// the vertical part decides what `y` means (top of the line, the alphabetic
/// baseline, and so on). Defaults to left-aligned text on the alphabetic
/// baseline, which is what the engine resets to at the start of each frame.
///
/// # Examples
///
/// ```rust
/// use easel::{Align, Baseline, TextAlign};
///
/// let centered = TextAlign::CENTER;
/// let custom = TextAlign::new(Align::Right, Baseline::Bottom);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAlign {
    /// Where the anchor `x` lands relative to the glyph run.
    pub horizontal: Align,
    /// What the anchor `y` means for the line.
    pub vertical: Baseline,
}

impl TextAlign {
    /// Anchors `x` at the left edge and `y` at the top of the line.
    pub const TOP_LEFT: Self = Self {
        horizontal: Align::Left,
        vertical: Baseline::Top,
    };

    /// Centers the text on the anchor point both ways.
    pub const CENTER: Self = Self {
        horizontal: Align::Center,
        vertical: Baseline::Middle,
    };

    pub const fn new(horizontal: Align, vertical: Baseline) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for TextAlign {
    fn default() -> Self {
        Self {
            horizontal: Align::Left,
            vertical: Baseline::Alphabetic,
        }
    }
}

/// A bundle of text attributes applied in one call.
///
/// Handy when the same label style is used in many places: build the style
/// once, then apply it with [`Frame::font_style`](crate::Frame::font_style)
/// instead of repeating four setter calls per frame.
///
/// # Fields
///
/// - `name`: The name the font was registered under.
/// - `size`: The font size in pixels.
/// - `letter_spacing`: Extra spacing between glyphs, in pixels.
/// - `line_height`: Line advance for wrapped text, as a multiple of the font height.
/// - `align`: Anchoring for the drawn text.
///
/// # Examples
///
/// ```rust
/// use easel::{FontStyle, TextAlign};
///
/// let heading = FontStyle {
///     size: 28.0,
///     align: TextAlign::CENTER,
///     ..FontStyle::new("sans-bold")
/// };
/// assert_eq!(heading.line_height, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    /// Name the font was registered under with
    /// [`Canvas::load_font`](crate::Canvas::load_font).
    pub name: String,
    /// Font size in pixels.
    pub size: f32,
    /// Extra spacing between glyphs, in pixels.
    pub letter_spacing: f32,
    /// Line advance for wrapped text, as a multiple of the font height.
    pub line_height: f32,
    /// Anchoring for the drawn text.
    pub align: TextAlign,
}

impl FontStyle {
    /// A 14 px style for the named font, top-left anchored, with default
    /// spacing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 14.0,
            letter_spacing: 0.0,
            line_height: 1.0,
            align: TextAlign::TOP_LEFT,
        }
    }
}

/// Text attributes of the frame in flight. Reset to engine defaults by
/// `Canvas::begin`.
#[derive(Debug, Clone)]
pub(crate) struct TextState {
    pub font: Option<FontId>,
    pub size: f32,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub align: TextAlign,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: None,
            size: 16.0,
            letter_spacing: 0.0,
            line_height: 1.0,
            align: TextAlign::default(),
        }
    }
}
