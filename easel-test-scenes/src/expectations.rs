/// One pixel the rendered scene is expected to contain.
///
/// Coordinates use the canvas convention: origin at the top left, `y` grows
/// downwards, matching the buffer layout `Canvas::read_pixels()` returns.
pub struct PixelExpectation {
    pub x: u32,
    pub y: u32,
    /// Expected channels in RGBA order.
    pub expected: [u8; 4],
    /// Allowed per-channel deviation. Defaults to [`DEFAULT_TOLERANCE`],
    /// enough to absorb driver-dependent antialiasing and rounding.
    pub tolerance: u8,
    /// Short identifier included in failure messages.
    pub label: &'static str,
}

/// Per-channel deviation allowed unless overridden with
/// [`PixelExpectation::with_tolerance`].
pub const DEFAULT_TOLERANCE: u8 = 5;

impl PixelExpectation {
    pub fn new(x: u32, y: u32, expected: [u8; 4], label: &'static str) -> Self {
        Self {
            x,
            y,
            expected,
            tolerance: DEFAULT_TOLERANCE,
            label,
        }
    }

    /// Expects an opaque color at `(x, y)`.
    pub fn opaque(x: u32, y: u32, r: u8, g: u8, b: u8, label: &'static str) -> Self {
        Self::new(x, y, [r, g, b, 255], label)
    }

    /// Expects a fully transparent pixel at `(x, y)`.
    pub fn transparent(x: u32, y: u32, label: &'static str) -> Self {
        Self::new(x, y, [0, 0, 0, 0], label)
    }

    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Checks every expectation against an RGBA8 buffer of `width` x `height`
/// pixels (tightly packed rows, top row first, as `Canvas::read_pixels()`
/// produces).
///
/// The returned list holds one message per failed expectation; an empty list
/// means the buffer matched.
pub fn check_pixels(
    pixel_data: &[u8],
    width: u32,
    height: u32,
    expectations: &[PixelExpectation],
) -> Vec<String> {
    expectations
        .iter()
        .filter_map(|expectation| check_one(pixel_data, width, height, expectation).err())
        .collect()
}

fn check_one(
    pixel_data: &[u8],
    width: u32,
    height: u32,
    expectation: &PixelExpectation,
) -> Result<(), String> {
    let PixelExpectation { x, y, label, .. } = *expectation;

    if x >= width || y >= height {
        return Err(format!(
            "[{label}] ({x},{y}) lies outside the {width}x{height} canvas"
        ));
    }
    let offset = (y as usize * width as usize + x as usize) * 4;
    let Some(actual) = pixel_data.get(offset..offset + 4) else {
        return Err(format!(
            "[{label}] ({x},{y}) is past the end of the {}-byte buffer",
            pixel_data.len()
        ));
    };

    let allowed = expectation.tolerance as i16;
    let off_by = actual
        .iter()
        .zip(expectation.expected)
        .map(|(&got, want)| (got as i16 - want as i16).abs())
        .max()
        .unwrap_or(0);
    if off_by > allowed {
        let [er, eg, eb, ea] = expectation.expected;
        return Err(format!(
            "[{label}] ({x},{y}) expected rgba({er},{eg},{eb},{ea}) within {allowed}, \
             got rgba({},{},{},{})",
            actual[0], actual[1], actual[2], actual[3]
        ));
    }
    Ok(())
}
