/// An RGBA color with 8 bits per channel.
///
/// The canvas API speaks `u8` color channels throughout; conversion to the
/// engine's float colors happens internally at draw time.
///
/// # Examples
///
/// ```
/// use easel::Color;
///
/// let translucent = Color::rgba(0, 0, 255, 128);
///
/// assert_eq!(Color::WHITE.normalize(), [1.0; 4]);
/// assert_eq!(translucent.to_array(), [0, 0, 255, 128]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color(pub [u8; 4]);

impl Color {
    /// Fully transparent black, the default background of a fresh canvas.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    /// Opaque black.
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    /// Opaque white.
    pub const WHITE: Self = Self([255, 255, 255, 255]);

    /// An opaque color from red, green and blue channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use easel::Color;
    ///
    /// assert_eq!(Color::rgb(0, 255, 0), Color([0, 255, 0, 255]));
    /// ```
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// A color from all four channels; `a` runs from 0 (transparent) to 255
    /// (opaque).
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// An opaque gray where all three color channels share one value.
    ///
    /// # Examples
    ///
    /// ```
    /// use easel::Color;
    ///
    /// assert_eq!(Color::gray(127), Color([127, 127, 127, 255]));
    /// ```
    pub const fn gray(value: u8) -> Self {
        Self([value, value, value, 255])
    }

    /// The channels scaled into `[0.0, 1.0]`, in RGBA order.
    pub fn normalize(&self) -> [f32; 4] {
        let [r, g, b, a] = self.0;
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    /// The raw channels in RGBA order.
    pub fn to_array(&self) -> [u8; 4] {
        self.0
    }
}

impl From<Color> for femtovg::Color {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.0;
        femtovg::Color::rgba(r, g, b, a)
    }
}
