use crate::core::actions::render_band::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::escape_time::errors::{ColourMapError, EscapeTimeError};

/// Colour of points that never escape.
pub const INTERIOR_COLOUR: Colour = Colour {
    r: 255,
    g: 255,
    b: 180,
};

/// Black through red to yellow by escape time; the interior is pale yellow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeTimeColourMap {
    max_iterations: u32,
}

impl ColourMap for EscapeTimeColourMap {
    type T = u32;
    type Failure = ColourMapError;

    fn map(&self, iterations: u32) -> Result<Colour, Self::Failure> {
        if iterations >= self.max_iterations {
            return Err(ColourMapError::IterationsExceedMax {
                iterations,
                max_iterations: self.max_iterations,
            });
        }

        if iterations == self.max_iterations - 1 {
            return Ok(INTERIOR_COLOUR);
        }

        let t = f64::from(iterations) / f64::from(self.max_iterations);

        Ok(if t <= 0.5 {
            Colour {
                r: (255.0 * t * 2.0) as u8,
                g: 0,
                b: 0,
            }
        } else {
            Colour {
                r: 255,
                g: (255.0 * (t - 0.5) * 2.0) as u8,
                b: 0,
            }
        })
    }
}

impl EscapeTimeColourMap {
    pub fn new(max_iterations: u32) -> Result<Self, EscapeTimeError> {
        if max_iterations == 0 {
            return Err(EscapeTimeError::ZeroMaxIterationsError);
        }

        Ok(Self { max_iterations })
    }
}
