use thiserror::Error;

/// Errors reported by a [`Canvas`](crate::Canvas) and its framebuffer.
///
/// GPU resource failures (`Framebuffer`, `Engine`) surface from construction
/// and resizing; the remaining variants are logical failures that leave the
/// canvas state untouched, so the caller can recover or ignore them.
#[derive(Debug, Error)]
pub enum Error {
    /// The vector-graphics engine rejected an operation.
    #[error("engine error: {0}")]
    Engine(#[from] femtovg::ErrorKind),

    /// A GL call failed while building or using the offscreen framebuffer.
    #[error("framebuffer error while {stage}: {detail}")]
    Framebuffer {
        stage: &'static str,
        detail: String,
    },

    /// A font file could not be read or parsed. The offending path is
    /// reported on the error log; the registry keeps its previous entries.
    #[error("failed to load font {name:?}: {source}")]
    FontLoad {
        name: String,
        source: femtovg::ErrorKind,
    },

    /// The requested font name was never registered with `load_font`.
    #[error("no font registered under the name {0:?}")]
    FontNotFound(String),

    /// A text draw or measurement failed, usually because no usable font
    /// is selected or registered.
    #[error("text operation failed: {0}")]
    Text(femtovg::ErrorKind),

    /// Pixel data passed to `upload_image` does not match the declared size.
    #[error("image data is {got} bytes, expected {expected} for {width}x{height} rgba")]
    ImageSize {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
}

impl Error {
    pub(crate) fn framebuffer(stage: &'static str, detail: impl Into<String>) -> Self {
        Error::Framebuffer {
            stage,
            detail: detail.into(),
        }
    }
}
