use crate::core::data::canvas::Canvas;
use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use rayon::prelude::*;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    BoundsMismatch {
        canvas_size: usize,
        buffer_size: usize,
    },
    CanvasMismatch {
        expected: Canvas,
        actual: Canvas,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                canvas_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "canvas size {} does not match buffer size {}",
                    canvas_size, buffer_size
                )
            }
            Self::CanvasMismatch { expected, actual } => {
                write!(
                    f,
                    "canvas {}x{} does not match canvas {}x{}",
                    actual.width(),
                    actual.height(),
                    expected.width(),
                    expected.height()
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

/// The shared render surface.
///
/// Pixels are stored row-major (`index = x + y * width`) as packed words so
/// that every write goes through `&self`. Render workers and parallel
/// rasterization tasks share one buffer by reference; each task owns a
/// disjoint region for the duration of a pass, so relaxed stores are enough
/// and no pixel is ever locked. Overlapping writes of the same colour are
/// harmless.
pub struct PixelBuffer {
    canvas: Canvas,
    pixels: Box<[AtomicU32]>,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    #[must_use]
    pub fn new(canvas: Canvas) -> Self {
        Self::filled(canvas, Colour::BLACK)
    }

    #[must_use]
    pub fn filled(canvas: Canvas, colour: Colour) -> Self {
        let packed = colour.to_packed();

        Self {
            canvas,
            pixels: (0..canvas.size()).map(|_| AtomicU32::new(packed)).collect(),
        }
    }

    pub fn from_colours(canvas: Canvas, colours: Vec<Colour>) -> Result<Self, PixelBufferError> {
        if colours.len() != canvas.size() {
            return Err(PixelBufferError::BoundsMismatch {
                canvas_size: canvas.size(),
                buffer_size: colours.len(),
            });
        }

        Ok(Self {
            canvas,
            pixels: colours
                .into_iter()
                .map(|colour| AtomicU32::new(colour.to_packed()))
                .collect(),
        })
    }

    #[must_use]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Writes one pixel. Coordinates outside the canvas are ignored.
    #[inline]
    pub fn plot(&self, x: i32, y: i32, colour: Colour) {
        if let Some(index) = self.canvas.index_of(Point { x, y }) {
            self.pixels[index].store(colour.to_packed(), Ordering::Relaxed);
        }
    }

    /// Writes `length` contiguous pixels of row `y` starting at column `x`,
    /// clipped to the canvas.
    pub fn plot_span(&self, x: i32, y: i32, length: i32, colour: Colour) {
        if length <= 0 || y < 0 || i64::from(y) >= i64::from(self.height()) {
            return;
        }

        let start = i64::from(x).max(0);
        let end = (i64::from(x) + i64::from(length)).min(i64::from(self.width()));
        if start >= end {
            return;
        }

        let row_offset = y as usize * self.width() as usize;
        let packed = colour.to_packed();
        for pixel in &self.pixels[row_offset + start as usize..row_offset + end as usize] {
            pixel.store(packed, Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Colour> {
        self.canvas
            .index_of(Point { x, y })
            .map(|index| Colour::from_packed(self.pixels[index].load(Ordering::Relaxed)))
    }

    pub fn clear(&self, colour: Colour) {
        let packed = colour.to_packed();
        self.pixels
            .par_iter()
            .for_each(|pixel| pixel.store(packed, Ordering::Relaxed));
    }

    /// Copies every pixel of `source` into this buffer.
    pub fn copy_from(&self, source: &PixelBuffer) -> Result<(), PixelBufferError> {
        if source.canvas != self.canvas {
            return Err(PixelBufferError::CanvasMismatch {
                expected: self.canvas,
                actual: source.canvas,
            });
        }

        self.pixels
            .par_iter()
            .zip(source.pixels.par_iter())
            .for_each(|(dst, src)| dst.store(src.load(Ordering::Relaxed), Ordering::Relaxed));

        Ok(())
    }

    /// Copies the current contents out in row-major order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Colour> {
        self.colours().collect()
    }

    pub fn colours(&self) -> impl Iterator<Item = Colour> + '_ {
        self.pixels
            .iter()
            .map(|pixel| Colour::from_packed(pixel.load(Ordering::Relaxed)))
    }
}
