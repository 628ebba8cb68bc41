use crate::core::actions::render_band::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::canvas::Canvas;
use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::view_state::ViewState;
use crate::core::fractals::escape_time::errors::EscapeTimeError;
use crate::core::fractals::fractal_kinds::FractalKinds;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};
use std::ops::ControlFlow;

const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Iterates `z = z² + c` from `z0` and returns the index of the iteration on
/// which `|z|² > 4`, or `max_iterations - 1` when it never escapes.
#[must_use]
pub fn escape_time(z0: Complex, c: Complex, max_iterations: u32) -> u32 {
    let outcome = (0..max_iterations).try_fold(z0, |z, iteration| {
        let next = z * z + c;
        if next.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
            ControlFlow::Break(iteration)
        } else {
            ControlFlow::Continue(next)
        }
    });

    match outcome {
        ControlFlow::Break(iteration) => iteration,
        ControlFlow::Continue(_) => max_iterations.saturating_sub(1),
    }
}

/// Supersampled escape-time evaluation of one canvas pixel for a fixed view.
#[derive(Debug, Clone, PartialEq)]
pub struct EscapeTimeAlgorithm {
    canvas: Canvas,
    view: ViewState,
    grid_side: u32,
}

impl FractalAlgorithm for EscapeTimeAlgorithm {
    type Success = u32;
    type Failure = PixelToComplexCoordsError;

    /// Averages the iteration count over the sub-pixel grid and truncates,
    /// blending escape bands rather than colours.
    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let grid = f64::from(self.grid_side);
        let x = f64::from(pixel.x);
        let y = f64::from(pixel.y);

        let mut total = 0.0;
        for sample in 0..self.view.sample_count {
            let x_offset = f64::from(sample % self.grid_side) / grid;
            let y_offset = f64::from(sample / self.grid_side) / grid;
            total += f64::from(self.sample(x + x_offset, y + y_offset)?);
        }

        Ok((total / f64::from(self.view.sample_count)) as u32)
    }
}

impl EscapeTimeAlgorithm {
    pub fn new(canvas: Canvas, view: ViewState) -> Result<Self, EscapeTimeError> {
        if view.max_iterations == 0 {
            return Err(EscapeTimeError::ZeroMaxIterationsError);
        }

        if view.sample_count == 0 {
            return Err(EscapeTimeError::ZeroSampleCountError);
        }

        if !(view.zoom.is_finite() && view.zoom > 0.0) {
            return Err(EscapeTimeError::NonPositiveZoomError { zoom: view.zoom });
        }

        Ok(Self {
            canvas,
            view,
            grid_side: view.sample_grid_side(),
        })
    }

    /// Escape time of a single canvas position.
    pub fn sample(&self, x: f64, y: f64) -> Result<u32, PixelToComplexCoordsError> {
        let point = pixel_to_complex_coords(x, y, self.canvas, self.view.zoom, self.view.offset)?;

        Ok(match self.view.mode {
            FractalKinds::Julia => escape_time(point, self.view.cursor, self.view.max_iterations),
            FractalKinds::Mandelbrot => {
                escape_time(Complex::ZERO, point, self.view.max_iterations)
            }
        })
    }
}
