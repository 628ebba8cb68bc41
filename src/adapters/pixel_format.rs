//! Pixel format conversion helpers for presentation adapters.

use crate::core::data::pixel_buffer::PixelBuffer;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelFormatError {
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for PixelFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "dst length {} does not match expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl Error for PixelFormatError {}

/// Copies a pixel buffer into an RGBA frame, setting alpha to 255.
///
/// `dst` must hold exactly four bytes per pixel of `src`.
pub fn copy_colours_to_rgba(src: &PixelBuffer, dst: &mut [u8]) -> Result<(), PixelFormatError> {
    let expected = src.len() * 4;
    if dst.len() != expected {
        return Err(PixelFormatError::LengthMismatch {
            expected,
            actual: dst.len(),
        });
    }

    for (colour, dst_pixel) in src.colours().zip(dst.chunks_exact_mut(4)) {
        dst_pixel[0] = colour.r;
        dst_pixel[1] = colour.g;
        dst_pixel[2] = colour.b;
        dst_pixel[3] = 255;
    }

    Ok(())
}
