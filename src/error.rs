use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by the image level entry points.
///
/// Block level encoding and decoding cannot fail; these only describe
/// buffers and dimensions that do not fit together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Width or height is zero or not a multiple of the 4 pixel tile size.
    #[error("Invalid image dimensions {width}x{height}, both must be non-zero multiples of 4")]
    InvalidDimensions { width: u32, height: u32 },

    /// The input buffer does not hold exactly the expected number of bytes.
    #[error("Invalid input length, expected {expected} bytes, got {actual}")]
    InvalidInputLength { expected: usize, actual: usize },

    /// The destination buffer cannot hold the output.
    #[error("Output buffer too small, need {needed} bytes, got {actual}")]
    OutputBufferTooSmall { needed: usize, actual: usize },
}
