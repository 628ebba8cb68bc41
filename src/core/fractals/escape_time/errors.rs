use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EscapeTimeError {
    ZeroMaxIterationsError,
    ZeroSampleCountError,
    NonPositiveZoomError { zoom: f64 },
}

impl fmt::Display for EscapeTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterationsError => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::ZeroSampleCountError => {
                write!(f, "Sample count must be greater than zero")
            }
            Self::NonPositiveZoomError { zoom } => {
                write!(f, "Zoom must be positive and finite, got {}", zoom)
            }
        }
    }
}

impl Error for EscapeTimeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourMapError {
    IterationsExceedMax { iterations: u32, max_iterations: u32 },
}

impl fmt::Display for ColourMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationsExceedMax {
                iterations,
                max_iterations,
            } => {
                write!(
                    f,
                    "iteration count {} is outside [0, {})",
                    iterations, max_iterations
                )
            }
        }
    }
}

impl Error for ColourMapError {}
