use crate::core::data::canvas::Canvas;
use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

/// Half of the visible real-axis span at zoom 1.
pub const BASE_HALF_WIDTH: f64 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PixelToComplexCoordsError {
    PointOutsideCanvas { x: f64, y: f64, canvas: Canvas },
    NonPositiveZoom { zoom: f64 },
}

impl fmt::Display for PixelToComplexCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideCanvas { x, y, canvas } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the {}x{} canvas",
                    x,
                    y,
                    canvas.width(),
                    canvas.height()
                )
            }
            Self::NonPositiveZoom { zoom } => {
                write!(f, "zoom must be positive and finite, got {}", zoom)
            }
        }
    }
}

impl Error for PixelToComplexCoordsError {}

/// Maps a (possibly sub-pixel) canvas position to the complex plane.
///
/// The visible window spans `±BASE_HALF_WIDTH / zoom` horizontally and the
/// same scaled by `height / width` vertically, with the imaginary axis
/// pointing up, centred on `offset`. The canvas centre maps to `offset`
/// exactly.
pub fn pixel_to_complex_coords(
    x: f64,
    y: f64,
    canvas: Canvas,
    zoom: f64,
    offset: Complex,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !(zoom.is_finite() && zoom > 0.0) {
        return Err(PixelToComplexCoordsError::NonPositiveZoom { zoom });
    }

    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());

    if !(0.0..width).contains(&x) || !(0.0..height).contains(&y) {
        return Err(PixelToComplexCoordsError::PointOutsideCanvas { x, y, canvas });
    }

    let half_width = BASE_HALF_WIDTH / zoom;
    let half_height = half_width * canvas.aspect_ratio();

    let real = (2.0 * x / width - 1.0) * half_width;
    let imag = (1.0 - 2.0 * y / height) * half_height;

    Ok(Complex { real, imag } + offset)
}
