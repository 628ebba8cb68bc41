use crate::core::data::complex::Complex;
use crate::core::fractals::fractal_kinds::FractalKinds;

pub const DEFAULT_MAX_ITERATIONS: u32 = 64;
pub const DEFAULT_JULIA_SAMPLE_COUNT: u32 = 4;
pub const DEFAULT_MANDELBROT_SAMPLE_COUNT: u32 = 1;

/// What the user is looking at: where, how deep, and at what quality.
///
/// Mutated only by the input-translation layer; render passes take a copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub offset: Complex,
    /// Julia parameter `c`, derived from the cursor position.
    pub cursor: Complex,
    pub mode: FractalKinds,
    pub max_iterations: u32,
    pub sample_count: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Complex::ZERO,
            cursor: Complex::ZERO,
            mode: FractalKinds::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            sample_count: DEFAULT_JULIA_SAMPLE_COUNT,
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn with_sample_count(self, sample_count: u32) -> Self {
        Self {
            sample_count,
            ..self
        }
    }

    /// Restores the home view, keeping the current mode and cursor.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset = Complex::ZERO;
        self.max_iterations = DEFAULT_MAX_ITERATIONS;
        self.sample_count = match self.mode {
            FractalKinds::Mandelbrot => DEFAULT_MANDELBROT_SAMPLE_COUNT,
            FractalKinds::Julia => DEFAULT_JULIA_SAMPLE_COUNT,
        };
    }

    /// True when switching from `previous` to `self` changes the preview image.
    ///
    /// Sample count is a quality setting and is ignored here. The cursor only
    /// matters while it drives the Julia parameter.
    #[must_use]
    pub fn invalidates(&self, previous: &ViewState) -> bool {
        self.zoom != previous.zoom
            || self.offset != previous.offset
            || self.mode != previous.mode
            || self.max_iterations != previous.max_iterations
            || (self.mode.follows_cursor() && self.cursor != previous.cursor)
    }

    /// Grid side of the supersample pattern: `ceil(sqrt(sample_count))`.
    #[must_use]
    pub fn sample_grid_side(&self) -> u32 {
        sample_grid_side(self.sample_count)
    }
}

/// Smallest `g` with `g * g >= sample_count`.
///
/// Non-square counts leave part of the grid unvisited (5 samples walk 5 of 9
/// offsets), which matches the established rendering.
#[must_use]
pub fn sample_grid_side(sample_count: u32) -> u32 {
    let mut side = (f64::from(sample_count).sqrt() as u32).max(1);
    while u64::from(side) * u64::from(side) < u64::from(sample_count) {
        side += 1;
    }
    while side > 1 && u64::from(side - 1) * u64::from(side - 1) >= u64::from(sample_count) {
        side -= 1;
    }
    side
}
